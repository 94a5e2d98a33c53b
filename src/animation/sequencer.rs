use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::{
    animation::playhead::{Direction, Playhead},
    animation::timeline::Timeline,
    animation::trigger::{RegionPosition, ToggleActions, TriggerRegion, detect_crossings},
    foundation::core::VisualProps,
    host::frame::FrameCoalescer,
    host::{EventKind, Host, HostEvent, HostRef, ListenerGuard},
};

/// How scroll position drives a timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    /// Region crossings play/reverse the timeline on its own clock.
    Toggle(ToggleActions),
    /// Progress through the region is the timeline progress.
    Scrub {
        /// Catch-up time; `None` follows the scroll position exactly.
        #[serde(default)]
        lag_ms: Option<f64>,
    },
}

impl Default for Playback {
    fn default() -> Self {
        Self::Toggle(ToggleActions::default())
    }
}

struct BoundTimeline {
    timeline: Timeline,
    trigger: TriggerRegion,
    playback: Playback,
    playhead: Playhead,
    scrub_target_ms: f64,
    last_position: Option<RegionPosition>,
    originals: Vec<(String, VisualProps)>,
    written: Vec<(String, VisualProps)>,
    skipped: Vec<String>,
    coalescer: FrameCoalescer,
    scroll_dirty: bool,
    last_frame_ms: Option<f64>,
}

impl BoundTimeline {
    fn evaluate_scroll(&mut self, host: &dyn Host) {
        let Some(rect) = host.element_rect(&self.trigger.element) else {
            tracing::debug!(element = %self.trigger.element, "trigger element not in document");
            return;
        };
        let range = self.trigger.resolve(rect, host.viewport_height());
        let y = host.scroll_y();

        match self.playback {
            Playback::Toggle(actions) => {
                let position = range.locate(y);
                let previous = self.last_position.unwrap_or(RegionPosition::Before);
                for crossing in detect_crossings(previous, position) {
                    let action = actions.action_for(crossing);
                    tracing::trace!(?crossing, ?action, y, "trigger region crossed");
                    self.playhead.apply(action);
                }
                self.last_position = Some(position);
            }
            Playback::Scrub { .. } => {
                self.scrub_target_ms = range.progress(y) * self.timeline.duration_ms();
                if self.last_position.is_none() {
                    self.playhead.seek(self.scrub_target_ms);
                }
                self.last_position = Some(range.locate(y));
            }
        }
    }

    fn step(&mut self, dt_ms: f64) {
        match self.playback {
            Playback::Toggle(_) => {
                self.playhead.advance(dt_ms);
            }
            Playback::Scrub { lag_ms } => {
                self.playhead.follow(self.scrub_target_ms, dt_ms, lag_ms);
            }
        }
    }

    fn render(&mut self, host: &dyn Host) {
        let sampled = self.timeline.sample(self.playhead.time_ms());
        for (target, props) in sampled {
            let base = self
                .originals
                .iter()
                .find(|(id, _)| id == target)
                .map(|(_, p)| *p)
                .unwrap_or_default();
            let next = base.merged(&props);

            let slot = self.written.iter().position(|(id, _)| id == target);
            if slot.is_some_and(|i| self.written[i].1 == next) {
                continue;
            }
            if !host.set_style(target, &next) {
                tracing::debug!(element = target, "animated element detached; skipping write");
                continue;
            }
            match slot {
                Some(i) => self.written[i].1 = next,
                None => self.written.push((target.to_owned(), next)),
            }
        }
    }

    fn revert(&mut self, host: &dyn Host) {
        for (id, original) in &self.originals {
            // Detached elements are left alone.
            host.set_style(id, original);
        }
        self.written.clear();
    }
}

/// Binds timelines to scroll trigger regions on one host.
///
/// Every registered timeline is an independent state machine with its own listeners and frame
/// loop; the sequencer only hands out [`TimelineHandle`]s and keeps track of which are alive.
pub struct AnimationSequencer {
    host: HostRef,
    live: RefCell<Vec<Weak<RefCell<BoundTimeline>>>>,
}

impl std::fmt::Debug for AnimationSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSequencer")
            .field("live_timelines", &self.live_timelines())
            .finish()
    }
}

impl AnimationSequencer {
    /// Sequencer for `host`.
    pub fn new(host: HostRef) -> Self {
        Self {
            host,
            live: RefCell::new(Vec::new()),
        }
    }

    /// Play `timeline` according to `actions` as `trigger` is crossed.
    pub fn register_timeline(
        &self,
        timeline: Timeline,
        trigger: TriggerRegion,
        actions: ToggleActions,
    ) -> TimelineHandle {
        self.register(timeline, trigger, Playback::Toggle(actions))
    }

    /// Tie `timeline` progress to scroll progress through `trigger`.
    pub fn register_scrubbed(
        &self,
        timeline: Timeline,
        trigger: TriggerRegion,
        lag_ms: Option<f64>,
    ) -> TimelineHandle {
        self.register(timeline, trigger, Playback::Scrub { lag_ms })
    }

    /// Bind a timeline with any playback mode.
    ///
    /// Stages whose target is not in the document are dropped; the remaining targets have their
    /// current style recorded (restored on dispose) and show their first `from` values at once.
    #[tracing::instrument(skip(self, timeline, trigger), fields(trigger = %trigger.element))]
    pub fn register(
        &self,
        timeline: Timeline,
        trigger: TriggerRegion,
        playback: Playback,
    ) -> TimelineHandle {
        let host = &self.host;
        let mut originals = Vec::new();
        let mut skipped = Vec::new();
        for target in timeline.targets() {
            match host.style(target) {
                Some(style) => originals.push((target.to_owned(), style)),
                None => skipped.push(target.to_owned()),
            }
        }
        if !skipped.is_empty() {
            tracing::debug!(?skipped, "skipping stages with missing targets");
        }
        let timeline = timeline.retain_targets(|t| !skipped.iter().any(|s| s == t));

        let mut bound = BoundTimeline {
            playhead: Playhead::new(timeline.duration_ms()),
            timeline,
            trigger,
            playback,
            scrub_target_ms: 0.0,
            last_position: None,
            originals,
            written: Vec::new(),
            skipped,
            coalescer: FrameCoalescer::new(),
            scroll_dirty: true,
            last_frame_ms: None,
        };
        bound.render(&**host);

        let state = Rc::new(RefCell::new(bound));
        let listener = {
            let state = Rc::downgrade(&state);
            let host = Rc::downgrade(host);
            Rc::new(move |_: &HostEvent| {
                if let Some(strong) = state.upgrade() {
                    strong.borrow_mut().scroll_dirty = true;
                }
                ensure_frame(&state, &host);
            })
        };
        let listeners = [
            ListenerGuard::register(host, EventKind::Scroll, listener.clone()),
            ListenerGuard::register(host, EventKind::Resize, listener),
        ];
        ensure_frame(&Rc::downgrade(&state), &Rc::downgrade(host));

        let mut live = self.live.borrow_mut();
        live.retain(|w| w.strong_count() > 0);
        live.push(Rc::downgrade(&state));

        TimelineHandle {
            host: host.clone(),
            state,
            _listeners: listeners,
        }
    }

    /// Timelines whose handle has not been disposed.
    pub fn live_timelines(&self) -> usize {
        self.live
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }
}

fn ensure_frame(state: &Weak<RefCell<BoundTimeline>>, host: &Weak<dyn Host>) {
    let (Some(strong), Some(h)) = (state.upgrade(), host.upgrade()) else {
        return;
    };
    let cb = {
        let state = state.clone();
        let host = host.clone();
        Box::new(move |now_ms: f64| on_frame(&state, &host, now_ms))
    };
    strong.borrow_mut().coalescer.schedule(&*h, cb);
}

fn on_frame(state: &Weak<RefCell<BoundTimeline>>, host: &Weak<dyn Host>, now_ms: f64) {
    let (Some(strong), Some(h)) = (state.upgrade(), host.upgrade()) else {
        return;
    };
    let keep_running = {
        let mut bound = strong.borrow_mut();
        bound.coalescer.fired();
        if std::mem::take(&mut bound.scroll_dirty) {
            bound.evaluate_scroll(&*h);
        }
        let dt = bound
            .last_frame_ms
            .map_or(0.0, |last| (now_ms - last).max(0.0));
        bound.step(dt);
        bound.render(&*h);

        let running = bound.playhead.is_playing();
        bound.last_frame_ms = running.then_some(now_ms);
        running
    };
    if keep_running {
        ensure_frame(state, host);
    }
}

/// Live binding of one timeline. Dropping it (or calling [`dispose`](Self::dispose)) removes its
/// listeners, cancels its pending frame and restores the recorded styles of its targets.
pub struct TimelineHandle {
    host: HostRef,
    state: Rc<RefCell<BoundTimeline>>,
    _listeners: [ListenerGuard; 2],
}

impl std::fmt::Debug for TimelineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bound = self.state.borrow();
        f.debug_struct("TimelineHandle")
            .field("trigger", &bound.trigger.element)
            .field("playhead", &bound.playhead)
            .finish()
    }
}

impl TimelineHandle {
    /// Current timeline time.
    pub fn time_ms(&self) -> f64 {
        self.state.borrow().playhead.time_ms()
    }

    /// Current progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.state.borrow().playhead.progress()
    }

    /// True while the playhead moves.
    pub fn is_playing(&self) -> bool {
        self.state.borrow().playhead.is_playing()
    }

    /// Current playback direction.
    pub fn direction(&self) -> Direction {
        self.state.borrow().playhead.direction()
    }

    /// Targets that were animated.
    pub fn bound_targets(&self) -> Vec<String> {
        self.state
            .borrow()
            .originals
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Targets whose stages were dropped because the element was missing at bind time.
    pub fn skipped_targets(&self) -> Vec<String> {
        self.state.borrow().skipped.clone()
    }

    /// Tear down now; equivalent to dropping.
    pub fn dispose(self) {}
}

impl Drop for TimelineHandle {
    fn drop(&mut self) {
        if let Ok(mut bound) = self.state.try_borrow_mut() {
            bound.coalescer.cancel(&*self.host);
            bound.revert(&*self.host);
            tracing::debug!(trigger = %bound.trigger.element, "timeline disposed");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequencer.rs"]
mod tests;
