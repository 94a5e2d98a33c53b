use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::{
    foundation::error::{ScrollcueError, ScrollcueResult},
    foundation::observe::{ObserverId, Observers, notify},
    host::{EventKind, Host, HostEvent, HostRef, ListenerGuard, TaskHandle},
};

/// Open/closed state of the collapsible menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ToggleState {
    /// True while the menu is shown.
    pub open: bool,
}

struct MenuState {
    menu_element: String,
    current: ToggleState,
    pending_arm: Option<TaskHandle>,
    dismiss: Option<ListenerGuard>,
    observers: Observers<ToggleState>,
}

/// Collapsible menu with outside-click dismissal.
///
/// Opening arms a document click listener one task tick later, so the click that opened the menu
/// is never seen as an outside click. Closing (or dropping the controller) disarms it; there is
/// never more than one such listener.
pub struct MenuToggleController {
    host: HostRef,
    state: Rc<RefCell<MenuState>>,
}

impl std::fmt::Debug for MenuToggleController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let st = self.state.borrow();
        f.debug_struct("MenuToggleController")
            .field("menu_element", &st.menu_element)
            .field("open", &st.current.open)
            .field("arm_pending", &st.pending_arm.is_some())
            .field("armed", &st.dismiss.is_some())
            .finish()
    }
}

impl MenuToggleController {
    /// Closed controller for the menu element `menu_element`.
    pub fn mount(host: HostRef, menu_element: impl Into<String>) -> ScrollcueResult<Self> {
        let menu_element = menu_element.into();
        if menu_element.trim().is_empty() {
            return Err(ScrollcueError::validation("menu element id must not be empty"));
        }
        Ok(Self {
            host,
            state: Rc::new(RefCell::new(MenuState {
                menu_element,
                current: ToggleState::default(),
                pending_arm: None,
                dismiss: None,
                observers: Observers::default(),
            })),
        })
    }

    /// Current state.
    pub fn state(&self) -> ToggleState {
        self.state.borrow().current
    }

    /// True while the menu is shown.
    pub fn is_open(&self) -> bool {
        self.state.borrow().current.open
    }

    /// Id of the element whose subtree counts as "inside".
    pub fn menu_element(&self) -> String {
        self.state.borrow().menu_element.clone()
    }

    /// True once the outside-click listener is registered.
    pub fn is_dismiss_armed(&self) -> bool {
        self.state.borrow().dismiss.is_some()
    }

    /// Flip open/closed.
    pub fn toggle(&self) {
        let open = !self.is_open();
        set_open(&self.state, &self.host, open);
    }

    /// Show the menu.
    pub fn open(&self) {
        set_open(&self.state, &self.host, true);
    }

    /// Hide the menu.
    pub fn close_menu(&self) {
        set_open(&self.state, &self.host, false);
    }

    /// Be told about every open/close.
    pub fn subscribe(&self, f: impl FnMut(&ToggleState) + 'static) -> ObserverId {
        self.state.borrow_mut().observers.add(f)
    }

    /// Stop an observer; returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.state.borrow_mut().observers.remove(id)
    }

    /// Registered observers.
    pub fn observer_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    /// Tear down explicitly; equivalent to dropping.
    pub fn unmount(self) {}
}

impl Drop for MenuToggleController {
    fn drop(&mut self) {
        let disarmed = match self.state.try_borrow_mut() {
            Ok(mut st) => disarm(&mut st, &*self.host),
            Err(_) => None,
        };
        drop(disarmed);
    }
}

/// Cancel a pending arm and hand back the listener guard, to be dropped once no borrow is held.
fn disarm(st: &mut MenuState, host: &dyn Host) -> Option<ListenerGuard> {
    if let Some(task) = st.pending_arm.take() {
        host.cancel_task(task);
    }
    st.dismiss.take()
}

fn set_open(state: &Rc<RefCell<MenuState>>, host: &HostRef, open: bool) {
    let (observers, released) = {
        let mut st = state.borrow_mut();
        if st.current.open == open {
            return;
        }
        st.current.open = open;
        let released = if open {
            if st.pending_arm.is_none() && st.dismiss.is_none() {
                let task = queue_arm(Rc::downgrade(state), Rc::downgrade(host), &**host);
                st.pending_arm = Some(task);
            }
            None
        } else {
            disarm(&mut st, &**host)
        };
        (st.observers.snapshot(), released)
    };
    drop(released);
    tracing::debug!(open, "menu toggled");
    notify(observers, &ToggleState { open });
}

fn queue_arm(
    state: Weak<RefCell<MenuState>>,
    host: Weak<dyn Host>,
    scheduler: &dyn Host,
) -> TaskHandle {
    scheduler.queue_task(Box::new(move || {
        let (Some(strong), Some(h)) = (state.upgrade(), host.upgrade()) else {
            return;
        };
        let menu_element = {
            let mut st = strong.borrow_mut();
            st.pending_arm = None;
            if !st.current.open || st.dismiss.is_some() {
                return;
            }
            st.menu_element.clone()
        };

        let listener = {
            let state = state.clone();
            let host = host.clone();
            Rc::new(move |event: &HostEvent| {
                let (Some(strong), Some(h)) = (state.upgrade(), host.upgrade()) else {
                    return;
                };
                let inside = event
                    .target
                    .as_deref()
                    .is_some_and(|t| h.is_within(t, &menu_element));
                if !inside {
                    tracing::trace!(clicked = ?event.target, "outside click dismisses menu");
                    set_open(&strong, &h, false);
                }
            })
        };
        let guard = ListenerGuard::register(&h, EventKind::Click, listener);
        strong.borrow_mut().dismiss = Some(guard);
        tracing::trace!("outside-click dismissal armed");
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/nav/menu.rs"]
mod tests;
