use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;

#[test]
fn listeners_added_during_dispatch_wait_for_next_event() {
    let page = Rc::new(HeadlessPage::new(800.0));
    let calls = Rc::new(Cell::new(0));

    let p = page.clone();
    let c = calls.clone();
    page.add_listener(
        EventKind::Click,
        Rc::new(move |_| {
            let c = c.clone();
            p.add_listener(EventKind::Click, Rc::new(move |_| c.set(c.get() + 1)));
        }),
    );

    page.click(None);
    assert_eq!(calls.get(), 0);
    page.click(None);
    assert_eq!(calls.get(), 1);
}

#[test]
fn listener_removed_mid_dispatch_is_skipped() {
    let page = Rc::new(HeadlessPage::new(800.0));
    let second_ran = Rc::new(Cell::new(false));
    let second_id = Rc::new(Cell::new(None));

    let p = page.clone();
    let sid = second_id.clone();
    page.add_listener(
        EventKind::Scroll,
        Rc::new(move |_| {
            if let Some(id) = sid.get() {
                p.remove_listener(id);
            }
        }),
    );
    let flag = second_ran.clone();
    let id = page.add_listener(EventKind::Scroll, Rc::new(move |_| flag.set(true)));
    second_id.set(Some(id));

    page.scroll_to(10.0);
    assert!(!second_ran.get());
    assert_eq!(page.listener_count(EventKind::Scroll), 1);
}

#[test]
fn frames_requested_inside_a_frame_run_next_frame() {
    let page = Rc::new(HeadlessPage::new(800.0));
    let stamps = Rc::new(RefCell::new(Vec::new()));

    let p = page.clone();
    let s = stamps.clone();
    page.request_animation_frame(Box::new(move |t| {
        s.borrow_mut().push(t);
        let s = s.clone();
        p.request_animation_frame(Box::new(move |t| s.borrow_mut().push(t)));
    }));

    assert_eq!(page.advance_frame(10.0), 1);
    assert_eq!(page.advance_frame(10.0), 1);
    assert_eq!(*stamps.borrow(), vec![10.0, 20.0]);
    assert_eq!(page.pending_frames(), 0);
}

#[test]
fn tasks_run_only_when_drained_and_can_be_cancelled() {
    let page = HeadlessPage::new(800.0);
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    page.queue_task(Box::new(move || h.set(h.get() + 1)));
    let h = hits.clone();
    let dropped = page.queue_task(Box::new(move || h.set(h.get() + 10)));
    page.cancel_task(dropped);

    assert_eq!(hits.get(), 0);
    assert_eq!(page.run_tasks(), 1);
    assert_eq!(hits.get(), 1);
}

#[test]
fn styles_and_geometry_miss_for_detached_elements() {
    let page = HeadlessPage::new(800.0);
    page.insert_element("hero", ElementRect::new(0.0, 900.0));
    page.insert_child("title", "hero", ElementRect::new(100.0, 80.0));

    assert!(page.set_style("title", &VisualProps::none().opacity(0.5)));
    assert_eq!(page.style("title").unwrap().opacity, Some(0.5));
    assert!(page.is_within("title", "hero"));
    assert!(!page.is_within("hero", "title"));

    assert!(page.remove_element("title"));
    assert!(!page.set_style("title", &VisualProps::none()));
    assert!(page.element_rect("title").is_none());
    assert_eq!(page.style_writes(), 1);
}

#[test]
fn smooth_scroll_is_recorded_and_dispatched() {
    let page = Rc::new(HeadlessPage::new(800.0));
    let seen = Rc::new(Cell::new(0));
    let s = seen.clone();
    page.add_listener(EventKind::Scroll, Rc::new(move |_| s.set(s.get() + 1)));

    page.set_scroll_y(1500.0);
    page.smooth_scroll_to(0.0);
    assert_eq!(page.smooth_scroll_requests(), vec![0.0]);
    assert_eq!(page.scroll_y(), 0.0);
    assert_eq!(seen.get(), 1);
}
