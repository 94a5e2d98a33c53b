//! The seams between the crate and the page it runs in.
//!
//! A real embedding forwards these calls to the DOM (`window.scrollY`, `offsetTop`,
//! `element.style`, `addEventListener`, `requestAnimationFrame`, `setTimeout(.., 0)`).
//! [`HeadlessPage`](crate::HeadlessPage) implements them in memory.
//!
//! Every method takes `&self`: hosts use interior mutability the same way DOM handles do, so
//! components can share one host through an `Rc`.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::foundation::core::{ElementRect, VisualProps};

pub(crate) mod frame;
pub(crate) mod headless;

/// Kinds of page events the components listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The document scrolled.
    Scroll,
    /// The viewport was resized.
    Resize,
    /// A pointer click anywhere in the document.
    Click,
}

/// A dispatched page event.
///
/// Scroll and resize events carry no payload; listeners read the current state from the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostEvent {
    /// Event kind.
    pub kind: EventKind,
    /// Id of the innermost element hit by a click, if it has one.
    pub target: Option<String>,
}

/// Identifies a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Identifies a requested animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Identifies a queued next-tick task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(pub u64);

/// Event listener callback.
pub type Listener = Rc<dyn Fn(&HostEvent)>;
/// Animation frame callback; receives the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;
/// Deferred task run after the current event has been fully processed.
pub type Task = Box<dyn FnOnce()>;

/// Document-relative element geometry lookup.
pub trait GeometryProvider {
    /// Geometry of the element with this id, or `None` when it is not in the document.
    fn element_rect(&self, id: &str) -> Option<ElementRect>;
}

impl GeometryProvider for HashMap<String, ElementRect> {
    fn element_rect(&self, id: &str) -> Option<ElementRect> {
        self.get(id).copied()
    }
}

impl GeometryProvider for BTreeMap<String, ElementRect> {
    fn element_rect(&self, id: &str) -> Option<ElementRect> {
        self.get(id).copied()
    }
}

impl<F> GeometryProvider for F
where
    F: Fn(&str) -> Option<ElementRect>,
{
    fn element_rect(&self, id: &str) -> Option<ElementRect> {
        self(id)
    }
}

/// Read/write access to the animated style of elements.
pub trait StyleStore {
    /// Current animated props of an element; `None` when it is not in the document.
    fn style(&self, id: &str) -> Option<VisualProps>;
    /// Replace the animated props of an element; returns `false` when it is not in the document.
    fn set_style(&self, id: &str, props: &VisualProps) -> bool;
}

/// Window-level scroll state.
pub trait Viewport {
    /// Current vertical scroll offset.
    fn scroll_y(&self) -> f64;
    /// Visible height of the viewport.
    fn viewport_height(&self) -> f64;
    /// Smoothly scroll the document to `y`.
    fn smooth_scroll_to(&self, y: f64);
}

/// Document-level event registration.
pub trait EventTarget {
    /// Register `listener` for `kind`.
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId;
    /// Remove a listener; returns `false` if it was not registered.
    fn remove_listener(&self, id: ListenerId) -> bool;
    /// True when `target` is `ancestor` or one of its descendants.
    fn is_within(&self, target: &str, ancestor: &str) -> bool;
}

/// Frame and task scheduling.
pub trait FrameScheduler {
    /// Run `cb` at the next rendered frame.
    fn request_animation_frame(&self, cb: FrameCallback) -> FrameHandle;
    /// Drop a frame callback that has not run yet.
    fn cancel_animation_frame(&self, handle: FrameHandle);
    /// Run `task` once the current event has been fully dispatched.
    fn queue_task(&self, task: Task) -> TaskHandle;
    /// Drop a task that has not run yet.
    fn cancel_task(&self, handle: TaskHandle);
}

/// Everything a mounted component needs from its page.
pub trait Host: GeometryProvider + StyleStore + Viewport + EventTarget + FrameScheduler {}

impl<T> Host for T where T: GeometryProvider + StyleStore + Viewport + EventTarget + FrameScheduler {}

/// Shared host handle held by mounted components.
pub type HostRef = Rc<dyn Host>;

/// Removes a listener when dropped.
pub(crate) struct ListenerGuard {
    host: std::rc::Weak<dyn Host>,
    id: ListenerId,
}

impl ListenerGuard {
    pub(crate) fn register(host: &HostRef, kind: EventKind, listener: Listener) -> Self {
        let id = host.add_listener(kind, listener);
        Self {
            host: Rc::downgrade(host),
            id,
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(host) = self.host.upgrade() {
            host.remove_listener(self.id);
        }
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}
