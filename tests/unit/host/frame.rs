use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::host::headless::HeadlessPage;

#[test]
fn second_schedule_is_dropped_until_fired() {
    let page = HeadlessPage::new(800.0);
    let mut co = FrameCoalescer::new();
    let hits = Rc::new(Cell::new(0));

    let h = hits.clone();
    assert!(co.schedule(&page, Box::new(move |_| h.set(h.get() + 1))));
    let h = hits.clone();
    assert!(!co.schedule(&page, Box::new(move |_| h.set(h.get() + 100))));
    assert!(co.is_scheduled());
    assert_eq!(page.pending_frames(), 1);

    page.run_frame();
    co.fired();
    assert_eq!(hits.get(), 1);
    assert!(!co.is_scheduled());
}

#[test]
fn cancel_removes_pending_frame() {
    let page = HeadlessPage::new(800.0);
    let mut co = FrameCoalescer::new();
    co.schedule(&page, Box::new(|_| panic!("cancelled frame ran")));
    co.cancel(&page);
    assert!(!co.is_scheduled());
    assert_eq!(page.run_frame(), 0);
}
