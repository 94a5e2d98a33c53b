use std::cell::RefCell;
use std::rc::Rc;

/// Identifies a registered change observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

pub(crate) type Observer<T> = Rc<RefCell<dyn FnMut(&T)>>;

/// Change observers of one reactive value.
///
/// Components keep this inside their `RefCell` state; [`snapshot`](Self::snapshot) lets them
/// release that borrow before calling out, so observers may read the component again.
pub(crate) struct Observers<T> {
    next: u64,
    entries: Vec<(ObserverId, Observer<T>)>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            next: 0,
            entries: Vec::new(),
        }
    }
}

impl<T: 'static> Observers<T> {
    pub(crate) fn add(&mut self, f: impl FnMut(&T) + 'static) -> ObserverId {
        self.next += 1;
        let id = ObserverId(self.next);
        let observer: Observer<T> = Rc::new(RefCell::new(f));
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(oid, _)| *oid != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn snapshot(&self) -> Vec<Observer<T>> {
        self.entries.iter().map(|(_, o)| o.clone()).collect()
    }
}

/// Call every observer once. An observer that is already running (re-entrant change) is
/// skipped for this value.
pub(crate) fn notify<T>(observers: Vec<Observer<T>>, value: &T) {
    for observer in observers {
        if let Ok(mut f) = observer.try_borrow_mut() {
            (&mut *f)(value);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/observe.rs"]
mod tests;
