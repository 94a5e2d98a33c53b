use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::foundation::core::ElementRect;
use crate::host::EventTarget;
use crate::host::headless::HeadlessPage;

fn page() -> Rc<HeadlessPage> {
    let page = Rc::new(HeadlessPage::new(800.0));
    page.insert_element("nav", ElementRect::new(0.0, 80.0));
    page.insert_child("menu-button", "nav", ElementRect::new(0.0, 28.0));
    page.insert_child("mobile-menu", "nav", ElementRect::new(80.0, 200.0));
    page.insert_child("menu-link-about", "mobile-menu", ElementRect::new(100.0, 20.0));
    page.insert_element("hero", ElementRect::new(0.0, 900.0));
    page
}

#[test]
fn empty_menu_id_is_rejected() {
    let page = page();
    assert!(MenuToggleController::mount(page, " ").is_err());
}

#[test]
fn opening_click_does_not_dismiss_the_menu() {
    let page = page();
    let menu = Rc::new(MenuToggleController::mount(page.clone(), "mobile-menu").unwrap());

    // The button's own handler, as the presentation layer would wire it.
    let button = {
        let menu = Rc::downgrade(&menu);
        Rc::new(move |event: &HostEvent| {
            if event.target.as_deref() == Some("menu-button") {
                if let Some(menu) = menu.upgrade() {
                    menu.toggle();
                }
            }
        })
    };
    page.add_listener(EventKind::Click, button);

    page.click(Some("menu-button"));
    assert!(menu.is_open());
    assert!(!menu.is_dismiss_armed());
    assert_eq!(page.pending_tasks(), 1);

    page.run_tasks();
    assert!(menu.is_open());
    assert!(menu.is_dismiss_armed());

    page.click(Some("hero"));
    assert!(!menu.is_open());
    assert!(!menu.is_dismiss_armed());
}

#[test]
fn clicks_inside_the_menu_keep_it_open() {
    let page = page();
    let menu = MenuToggleController::mount(page.clone(), "mobile-menu").unwrap();
    menu.open();
    page.run_tasks();

    page.click(Some("menu-link-about"));
    assert!(menu.is_open());
    page.click(Some("mobile-menu"));
    assert!(menu.is_open());

    page.click(None);
    assert!(!menu.is_open());
}

#[test]
fn repeated_toggles_never_stack_listeners() {
    let page = page();
    let menu = MenuToggleController::mount(page.clone(), "mobile-menu").unwrap();

    for _ in 0..5 {
        menu.toggle();
        menu.toggle();
    }
    menu.toggle();
    assert!(menu.is_open());
    assert_eq!(page.pending_tasks(), 1);

    page.run_tasks();
    assert_eq!(page.listener_count(EventKind::Click), 1);

    menu.toggle();
    menu.toggle();
    page.run_tasks();
    assert_eq!(page.listener_count(EventKind::Click), 1);
}

#[test]
fn closing_before_the_tick_cancels_the_deferred_listener() {
    let page = page();
    let menu = MenuToggleController::mount(page.clone(), "mobile-menu").unwrap();
    menu.open();
    menu.close_menu();
    assert_eq!(page.pending_tasks(), 0);
    page.run_tasks();
    assert_eq!(page.listener_count(EventKind::Click), 0);
}

#[test]
fn observers_see_each_change_once() {
    let page = page();
    let menu = MenuToggleController::mount(page.clone(), "mobile-menu").unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let id = {
        let seen = seen.clone();
        menu.subscribe(move |s: &ToggleState| seen.borrow_mut().push(s.open))
    };
    assert_eq!(menu.observer_count(), 1);

    menu.open();
    menu.open();
    menu.close_menu();
    menu.close_menu();
    assert_eq!(*seen.borrow(), vec![true, false]);

    assert!(menu.unsubscribe(id));
    menu.toggle();
    assert_eq!(seen.borrow().len(), 2);
}

#[test]
fn drop_removes_listener_and_pending_task() {
    let page = page();
    let menu = MenuToggleController::mount(page.clone(), "mobile-menu").unwrap();
    menu.open();
    page.run_tasks();
    assert_eq!(page.listener_count(EventKind::Click), 1);
    drop(menu);
    assert_eq!(page.listener_count(EventKind::Click), 0);

    let menu = MenuToggleController::mount(page.clone(), "mobile-menu").unwrap();
    menu.open();
    menu.unmount();
    assert_eq!(page.pending_tasks(), 0);
}
