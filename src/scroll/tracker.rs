use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::{
    foundation::config::TrackerConfig,
    foundation::error::ScrollcueResult,
    foundation::observe::{ObserverId, Observers, notify},
    host::frame::FrameCoalescer,
    host::{EventKind, Host, HostRef, ListenerGuard},
    scroll::spy::{ScrollState, compute_scroll_state},
    sections::registry::SectionRegistry,
};

struct TrackerState {
    registry: Rc<SectionRegistry>,
    config: TrackerConfig,
    current: ScrollState,
    coalescer: FrameCoalescer,
    observers: Observers<ScrollState>,
    recomputes: u64,
}

/// Mounted scroll-spy.
///
/// Listens to scroll and resize events, recomputes [`ScrollState`] at most once per animation
/// frame, and notifies observers only when the state actually changed. Dropping the tracker
/// removes its listeners and cancels a pending frame.
pub struct ScrollTracker {
    host: HostRef,
    state: Rc<RefCell<TrackerState>>,
    _listeners: [ListenerGuard; 2],
}

impl std::fmt::Debug for ScrollTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let st = self.state.borrow();
        f.debug_struct("ScrollTracker")
            .field("current", &st.current)
            .field("frame_pending", &st.coalescer.is_scheduled())
            .field("recomputes", &st.recomputes)
            .finish()
    }
}

impl ScrollTracker {
    /// Subscribe to `host` and schedule the initial check.
    #[tracing::instrument(skip(host, registry), fields(sections = registry.len()))]
    pub fn mount(
        host: HostRef,
        registry: Rc<SectionRegistry>,
        config: TrackerConfig,
    ) -> ScrollcueResult<Self> {
        config.validate()?;

        let current = ScrollState {
            scroll_offset_y: 0.0,
            is_scrolled: false,
            active_section_id: registry.default_id().map(str::to_owned),
        };
        let state = Rc::new(RefCell::new(TrackerState {
            registry,
            config,
            current,
            coalescer: FrameCoalescer::new(),
            observers: Observers::default(),
            recomputes: 0,
        }));

        let listener = {
            let state = Rc::downgrade(&state);
            let host = Rc::downgrade(&host);
            Rc::new(move |_: &crate::host::HostEvent| schedule_recompute(&state, &host))
        };
        let listeners = [
            ListenerGuard::register(&host, EventKind::Scroll, listener.clone()),
            ListenerGuard::register(&host, EventKind::Resize, listener),
        ];

        schedule_recompute(&Rc::downgrade(&state), &Rc::downgrade(&host));
        tracing::debug!("scroll tracker mounted");

        Ok(Self {
            host,
            state,
            _listeners: listeners,
        })
    }

    /// Latest derived state.
    pub fn state(&self) -> ScrollState {
        self.state.borrow().current.clone()
    }

    /// Latest active section id.
    pub fn active_section_id(&self) -> Option<String> {
        self.state.borrow().current.active_section_id.clone()
    }

    /// Registry this tracker scans.
    pub fn registry(&self) -> Rc<SectionRegistry> {
        self.state.borrow().registry.clone()
    }

    /// Tracker constants.
    pub fn config(&self) -> TrackerConfig {
        self.state.borrow().config
    }

    /// Recomputes performed so far (one per frame that had pending events).
    pub fn recompute_count(&self) -> u64 {
        self.state.borrow().recomputes
    }

    /// True while a recompute is scheduled for the next frame.
    pub fn is_frame_pending(&self) -> bool {
        self.state.borrow().coalescer.is_scheduled()
    }

    /// Be told about every state change.
    pub fn subscribe(&self, f: impl FnMut(&ScrollState) + 'static) -> ObserverId {
        self.state.borrow_mut().observers.add(f)
    }

    /// Stop an observer; returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.state.borrow_mut().observers.remove(id)
    }

    /// Mark the section with this navigation title active (a nav link was selected).
    ///
    /// Unknown titles are ignored. The next scroll recompute may override the choice.
    pub fn set_active(&self, title: &str) -> bool {
        let id = self
            .state
            .borrow()
            .registry
            .by_title(title)
            .map(|s| s.id.clone());
        match id {
            Some(id) => {
                self.set_active_id(Some(id));
                true
            }
            None => {
                tracing::debug!(title, "set_active ignored: unknown section title");
                false
            }
        }
    }

    /// Mark the registry default active (logo / home selection).
    pub fn reset_to_default(&self) {
        let id = self.state.borrow().registry.default_id().map(str::to_owned);
        self.set_active_id(id);
    }

    /// Force an immediate recompute outside the frame cadence.
    pub fn refresh(&self) {
        recompute(&self.state, &*self.host, false);
    }

    fn set_active_id(&self, id: Option<String>) {
        let changed = {
            let mut st = self.state.borrow_mut();
            if st.current.active_section_id == id {
                None
            } else {
                st.current = ScrollState {
                    active_section_id: id,
                    ..st.current.clone()
                };
                Some((st.observers.snapshot(), st.current.clone()))
            }
        };
        if let Some((observers, value)) = changed {
            notify(observers, &value);
        }
    }

    /// Tear down explicitly; equivalent to dropping.
    pub fn unmount(self) {}
}

impl Drop for ScrollTracker {
    fn drop(&mut self) {
        if let Ok(mut st) = self.state.try_borrow_mut() {
            st.coalescer.cancel(&*self.host);
        }
        tracing::debug!("scroll tracker unmounted");
    }
}

fn schedule_recompute(state: &Weak<RefCell<TrackerState>>, host: &Weak<dyn Host>) {
    let (Some(strong), Some(h)) = (state.upgrade(), host.upgrade()) else {
        return;
    };
    let cb = {
        let state = state.clone();
        let host = host.clone();
        Box::new(move |_now_ms: f64| {
            if let (Some(state), Some(host)) = (state.upgrade(), host.upgrade()) {
                recompute(&state, &*host, true);
            }
        })
    };
    if strong.borrow_mut().coalescer.schedule(&*h, cb) {
        tracing::trace!("scroll recompute scheduled");
    }
}

fn recompute(state: &Rc<RefCell<TrackerState>>, host: &dyn Host, from_frame: bool) {
    let changed = {
        let mut st = state.borrow_mut();
        if from_frame {
            st.coalescer.fired();
        }
        st.recomputes += 1;
        let next = compute_scroll_state(
            host.scroll_y(),
            &st.registry,
            host,
            &st.current,
            &st.config,
        );
        if next == st.current {
            None
        } else {
            tracing::trace!(
                y = next.scroll_offset_y,
                active = ?next.active_section_id,
                "scroll state changed"
            );
            st.current = next.clone();
            Some((st.observers.snapshot(), next))
        }
    };
    if let Some((observers, value)) = changed {
        notify(observers, &value);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/tracker.rs"]
mod tests;
