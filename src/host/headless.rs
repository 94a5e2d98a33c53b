use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::foundation::core::{ElementRect, VisualProps};
use crate::host::{
    EventKind, EventTarget, FrameCallback, FrameHandle, FrameScheduler, GeometryProvider,
    HostEvent, Listener, ListenerId, StyleStore, Task, TaskHandle, Viewport,
};

/// Nominal frame interval used by [`HeadlessPage::run_frame`].
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

#[derive(Clone, Debug)]
struct Element {
    rect: ElementRect,
    style: VisualProps,
    parent: Option<String>,
}

#[derive(Default)]
struct PageState {
    scroll_y: f64,
    viewport_height: f64,
    clock_ms: f64,
    next_id: u64,
    elements: BTreeMap<String, Element>,
    listeners: Vec<(ListenerId, EventKind, Listener)>,
    frames: Vec<(FrameHandle, FrameCallback)>,
    cancelled_in_flight: BTreeSet<FrameHandle>,
    tasks: VecDeque<(TaskHandle, Task)>,
    smooth_scrolls: Vec<f64>,
    style_writes: u64,
}

impl PageState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Deterministic in-memory page.
///
/// Events are dispatched synchronously, animation frames run only when
/// [`advance_frame`](Self::advance_frame) is called, and next-tick tasks only when
/// [`run_tasks`](Self::run_tasks) is called. This gives tests full control over the ordering the
/// components rely on.
pub struct HeadlessPage {
    state: RefCell<PageState>,
}

impl std::fmt::Debug for HeadlessPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let st = self.state.borrow();
        f.debug_struct("HeadlessPage")
            .field("scroll_y", &st.scroll_y)
            .field("viewport_height", &st.viewport_height)
            .field("clock_ms", &st.clock_ms)
            .field("elements", &st.elements.len())
            .field("listeners", &st.listeners.len())
            .field("frames", &st.frames.len())
            .field("tasks", &st.tasks.len())
            .finish()
    }
}

impl HeadlessPage {
    /// Empty page scrolled to the top.
    pub fn new(viewport_height: f64) -> Self {
        Self {
            state: RefCell::new(PageState {
                viewport_height,
                ..PageState::default()
            }),
        }
    }

    /// Add (or replace) a top-level element.
    pub fn insert_element(&self, id: impl Into<String>, rect: ElementRect) {
        self.insert(id.into(), rect, None);
    }

    /// Add (or replace) an element nested inside `parent`.
    pub fn insert_child(&self, id: impl Into<String>, parent: &str, rect: ElementRect) {
        self.insert(id.into(), rect, Some(parent.to_owned()));
    }

    fn insert(&self, id: String, rect: ElementRect, parent: Option<String>) {
        self.state.borrow_mut().elements.insert(
            id,
            Element {
                rect,
                style: VisualProps::default(),
                parent,
            },
        );
    }

    /// Detach an element; later lookups and style writes on it miss.
    pub fn remove_element(&self, id: &str) -> bool {
        self.state.borrow_mut().elements.remove(id).is_some()
    }

    /// Move or resize an element without dispatching anything.
    pub fn set_rect(&self, id: &str, rect: ElementRect) -> bool {
        match self.state.borrow_mut().elements.get_mut(id) {
            Some(el) => {
                el.rect = rect;
                true
            }
            None => false,
        }
    }

    /// Set the scroll offset without dispatching a scroll event.
    pub fn set_scroll_y(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y;
    }

    /// Set the scroll offset and dispatch a scroll event.
    pub fn scroll_to(&self, y: f64) {
        self.set_scroll_y(y);
        self.dispatch(EventKind::Scroll, None);
    }

    /// Change the viewport height and dispatch a resize event.
    pub fn resize(&self, viewport_height: f64) {
        self.state.borrow_mut().viewport_height = viewport_height;
        self.dispatch(EventKind::Resize, None);
    }

    /// Dispatch a click on `target` (or on the bare document).
    pub fn click(&self, target: Option<&str>) {
        self.dispatch(EventKind::Click, target.map(str::to_owned));
    }

    /// Deliver an event to the listeners registered for its kind at dispatch start.
    ///
    /// Listeners added during dispatch see the next event, not this one; listeners removed
    /// during dispatch are not called.
    pub fn dispatch(&self, kind: EventKind, target: Option<String>) {
        let snapshot: Vec<(ListenerId, Listener)> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(id, _, l)| (*id, l.clone()))
            .collect();
        let event = HostEvent { kind, target };
        for (id, listener) in snapshot {
            let still_registered = self
                .state
                .borrow()
                .listeners
                .iter()
                .any(|(lid, _, _)| *lid == id);
            if still_registered {
                listener(&event);
            }
        }
    }

    /// Advance the clock by `dt_ms` and run every frame callback requested before this call.
    ///
    /// Returns the number of callbacks that ran. Frames requested from inside a callback wait
    /// for the next call.
    pub fn advance_frame(&self, dt_ms: f64) -> usize {
        let (now, batch) = {
            let mut st = self.state.borrow_mut();
            st.clock_ms += dt_ms;
            (st.clock_ms, std::mem::take(&mut st.frames))
        };
        let mut ran = 0;
        for (handle, cb) in batch {
            if self.state.borrow_mut().cancelled_in_flight.remove(&handle) {
                continue;
            }
            cb(now);
            ran += 1;
        }
        self.state.borrow_mut().cancelled_in_flight.clear();
        ran
    }

    /// Run one frame at the nominal 60 Hz interval.
    pub fn run_frame(&self) -> usize {
        self.advance_frame(FRAME_INTERVAL_MS)
    }

    /// Run frames until none are pending or `max_frames` ran; returns the frames advanced.
    pub fn run_frames_until_idle(&self, max_frames: usize) -> usize {
        let mut n = 0;
        while n < max_frames && self.pending_frames() > 0 {
            self.run_frame();
            n += 1;
        }
        n
    }

    /// Run queued next-tick tasks, including tasks queued while draining.
    pub fn run_tasks(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.state.borrow_mut().tasks.pop_front();
            match next {
                Some((_, task)) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }

    /// Current frame clock in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.state.borrow().clock_ms
    }

    /// Registered listeners of one kind.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.state
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    /// Frame callbacks waiting for the next frame.
    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    /// Tasks waiting for the next tick.
    pub fn pending_tasks(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    /// Targets passed to [`Viewport::smooth_scroll_to`], oldest first.
    pub fn smooth_scroll_requests(&self) -> Vec<f64> {
        self.state.borrow().smooth_scrolls.clone()
    }

    /// Successful style writes so far.
    pub fn style_writes(&self) -> u64 {
        self.state.borrow().style_writes
    }
}

impl GeometryProvider for HeadlessPage {
    fn element_rect(&self, id: &str) -> Option<ElementRect> {
        self.state.borrow().elements.get(id).map(|el| el.rect)
    }
}

impl StyleStore for HeadlessPage {
    fn style(&self, id: &str) -> Option<VisualProps> {
        self.state.borrow().elements.get(id).map(|el| el.style)
    }

    fn set_style(&self, id: &str, props: &VisualProps) -> bool {
        let st = &mut *self.state.borrow_mut();
        match st.elements.get_mut(id) {
            Some(el) => {
                el.style = *props;
                st.style_writes += 1;
                true
            }
            None => false,
        }
    }
}

impl Viewport for HeadlessPage {
    fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.state.borrow().viewport_height
    }

    /// Records the request and lands on `y` at once, dispatching a scroll event.
    fn smooth_scroll_to(&self, y: f64) {
        self.state.borrow_mut().smooth_scrolls.push(y);
        self.scroll_to(y);
    }
}

impl EventTarget for HeadlessPage {
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let mut st = self.state.borrow_mut();
        let id = ListenerId(st.next_id());
        st.listeners.push((id, kind, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut st = self.state.borrow_mut();
        let before = st.listeners.len();
        st.listeners.retain(|(lid, _, _)| *lid != id);
        st.listeners.len() != before
    }

    fn is_within(&self, target: &str, ancestor: &str) -> bool {
        let st = self.state.borrow();
        let mut cur = Some(target);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = st.elements.get(id).and_then(|el| el.parent.as_deref());
        }
        false
    }
}

impl FrameScheduler for HeadlessPage {
    fn request_animation_frame(&self, cb: FrameCallback) -> FrameHandle {
        let mut st = self.state.borrow_mut();
        let handle = FrameHandle(st.next_id());
        st.frames.push((handle, cb));
        handle
    }

    fn cancel_animation_frame(&self, handle: FrameHandle) {
        let mut st = self.state.borrow_mut();
        let before = st.frames.len();
        st.frames.retain(|(h, _)| *h != handle);
        if st.frames.len() == before {
            // Possibly part of the batch currently being run.
            st.cancelled_in_flight.insert(handle);
        }
    }

    fn queue_task(&self, task: Task) -> TaskHandle {
        let mut st = self.state.borrow_mut();
        let handle = TaskHandle(st.next_id());
        st.tasks.push_back((handle, task));
        handle
    }

    fn cancel_task(&self, handle: TaskHandle) {
        self.state
            .borrow_mut()
            .tasks
            .retain(|(h, _)| *h != handle);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;
