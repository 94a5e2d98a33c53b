use std::rc::Rc;

use super::*;
use crate::animation::ease::Ease;
use crate::foundation::core::ElementRect;
use crate::host::StyleStore;
use crate::host::headless::HeadlessPage;

fn page() -> Rc<HeadlessPage> {
    let page = Rc::new(HeadlessPage::new(800.0));
    page.insert_element("hero", ElementRect::new(1000.0, 200.0));
    page.insert_child("title", "hero", ElementRect::new(1000.0, 80.0));
    page.insert_child("subtitle", "hero", ElementRect::new(1080.0, 40.0));
    page
}

fn fade_in(target: &str) -> Timeline {
    Timeline::builder()
        .ease(Ease::Linear)
        .from_to(
            target,
            VisualProps::none().opacity(0.0),
            VisualProps::none().opacity(1.0),
            1000.0,
        )
        .build()
        .unwrap()
}

// Region: 360..1600 for the hero in an 800px viewport.
fn hero_region() -> TriggerRegion {
    TriggerRegion::new("hero", "top 80%", "bottom -50%").unwrap()
}

fn opacity(page: &HeadlessPage, id: &str) -> f64 {
    page.style(id).and_then(|p| p.opacity).unwrap()
}

#[test]
fn binding_shows_from_values_before_anything_plays() {
    let page = page();
    let seq = AnimationSequencer::new(page.clone());
    let handle = seq.register_timeline(fade_in("title"), hero_region(), ToggleActions::default());

    assert_eq!(opacity(&page, "title"), 0.0);
    page.advance_frame(100.0);
    assert!(!handle.is_playing());
    assert_eq!(handle.time_ms(), 0.0);
    assert_eq!(page.pending_frames(), 0);
}

#[test]
fn reversing_mid_flight_continues_from_current_state() {
    let page = page();
    let seq = AnimationSequencer::new(page.clone());
    let handle = seq.register_timeline(fade_in("title"), hero_region(), ToggleActions::default());
    page.advance_frame(100.0);

    page.scroll_to(500.0);
    page.advance_frame(100.0);
    assert!(handle.is_playing());
    for _ in 0..5 {
        page.advance_frame(100.0);
    }
    assert_eq!(handle.time_ms(), 500.0);
    assert!((opacity(&page, "title") - 0.5).abs() < 1e-9);

    page.scroll_to(0.0);
    page.advance_frame(100.0);
    assert_eq!(handle.direction(), Direction::Backward);
    assert_eq!(handle.time_ms(), 400.0);
    assert!((opacity(&page, "title") - 0.4).abs() < 1e-9);

    page.run_frames_until_idle(100);
    assert!(!handle.is_playing());
    assert_eq!(opacity(&page, "title"), 0.0);
}

#[test]
fn burst_of_scroll_events_requests_one_frame() {
    let page = page();
    let seq = AnimationSequencer::new(page.clone());
    let _handle = seq.register_timeline(fade_in("title"), hero_region(), ToggleActions::default());
    page.advance_frame(100.0);

    for i in 0..50 {
        page.scroll_to(f64::from(i) * 10.0);
    }
    assert_eq!(page.pending_frames(), 1);
}

#[test]
fn jumping_past_region_plays_then_reverses() {
    let page = page();
    let seq = AnimationSequencer::new(page.clone());
    let handle = seq.register_timeline(fade_in("title"), hero_region(), ToggleActions::default());
    page.advance_frame(100.0);

    page.scroll_to(5000.0);
    page.advance_frame(100.0);
    assert_eq!(handle.direction(), Direction::Backward);
    assert!(!handle.is_playing());
    assert_eq!(handle.time_ms(), 0.0);
}

#[test]
fn dispose_restores_styles_and_detaches() {
    let page = page();
    page.set_style("title", &VisualProps::none().opacity(0.7));
    let seq = AnimationSequencer::new(page.clone());
    let handle = seq.register_timeline(fade_in("title"), hero_region(), ToggleActions::default());
    assert_eq!(opacity(&page, "title"), 0.0);
    assert_eq!(page.listener_count(EventKind::Scroll), 1);
    assert_eq!(seq.live_timelines(), 1);

    handle.dispose();
    assert_eq!(opacity(&page, "title"), 0.7);
    assert_eq!(page.listener_count(EventKind::Scroll), 0);
    assert_eq!(page.listener_count(EventKind::Resize), 0);
    assert_eq!(page.pending_frames(), 0);
    assert_eq!(seq.live_timelines(), 0);
}

#[test]
fn missing_targets_are_skipped_without_shifting_timing() {
    let page = page();
    let seq = AnimationSequencer::new(page.clone());
    let timeline = Timeline::builder()
        .ease(Ease::Linear)
        .from_to(
            "ghost",
            VisualProps::none().opacity(0.0),
            VisualProps::none().opacity(1.0),
            500.0,
        )
        .from_to(
            "title",
            VisualProps::none().opacity(0.0),
            VisualProps::none().opacity(1.0),
            500.0,
        )
        .build()
        .unwrap();
    let handle = seq.register_timeline(timeline, hero_region(), ToggleActions::default());
    assert_eq!(handle.skipped_targets(), vec!["ghost".to_owned()]);
    assert_eq!(handle.bound_targets(), vec!["title".to_owned()]);

    page.advance_frame(100.0);
    page.scroll_to(500.0);
    page.advance_frame(100.0);
    for _ in 0..5 {
        page.advance_frame(100.0);
    }
    // Title starts at 500ms.
    assert_eq!(opacity(&page, "title"), 0.0);
    for _ in 0..3 {
        page.advance_frame(100.0);
    }
    assert!((opacity(&page, "title") - 0.6).abs() < 1e-9);
}

#[test]
fn timelines_run_independently() {
    let page = page();
    page.insert_element("footer", ElementRect::new(3000.0, 200.0));
    page.insert_child("credits", "footer", ElementRect::new(3000.0, 50.0));
    let seq = AnimationSequencer::new(page.clone());
    let hero = seq.register_timeline(fade_in("title"), hero_region(), ToggleActions::default());
    let footer = seq.register_timeline(
        fade_in("credits"),
        TriggerRegion::new("footer", "top 80%", "bottom -50%").unwrap(),
        ToggleActions::default(),
    );
    assert_eq!(seq.live_timelines(), 2);

    page.advance_frame(100.0);
    page.scroll_to(500.0);
    page.run_frames_until_idle(100);

    assert_eq!(hero.progress(), 1.0);
    assert_eq!(footer.progress(), 0.0);
    assert_eq!(opacity(&page, "credits"), 0.0);

    drop(hero);
    assert_eq!(seq.live_timelines(), 1);
    assert_eq!(page.listener_count(EventKind::Scroll), 1);
}

#[test]
fn detached_elements_are_never_written() {
    let page = page();
    let seq = AnimationSequencer::new(page.clone());
    let handle = seq.register_timeline(fade_in("title"), hero_region(), ToggleActions::default());
    page.advance_frame(100.0);
    page.scroll_to(500.0);
    page.advance_frame(100.0);
    page.advance_frame(100.0);

    assert!(page.remove_element("title"));
    let writes = page.style_writes();
    page.run_frames_until_idle(100);
    assert_eq!(page.style_writes(), writes);

    handle.dispose();
    assert_eq!(page.style_writes(), writes);
}

#[test]
fn scrub_tracks_scroll_progress() {
    let page = Rc::new(HeadlessPage::new(800.0));
    page.insert_element("work", ElementRect::new(1000.0, 1000.0));
    page.insert_child("rail", "work", ElementRect::new(1000.0, 100.0));
    let seq = AnimationSequencer::new(page.clone());
    let timeline = Timeline::builder()
        .ease(Ease::Linear)
        .from_to(
            "rail",
            VisualProps::none().x(0.0),
            VisualProps::none().x(100.0),
            1000.0,
        )
        .build()
        .unwrap();
    let region = TriggerRegion::new("work", "top top", "bottom top").unwrap();
    let handle = seq.register_scrubbed(timeline, region, None);
    page.run_frame();
    assert_eq!(handle.time_ms(), 0.0);

    page.scroll_to(1500.0);
    page.run_frame();
    assert_eq!(handle.time_ms(), 500.0);
    assert_eq!(page.style("rail").and_then(|p| p.x), Some(50.0));

    page.scroll_to(1250.0);
    page.run_frame();
    assert_eq!(handle.time_ms(), 250.0);
    assert_eq!(handle.direction(), Direction::Backward);
    assert_eq!(page.pending_frames(), 0);
}

#[test]
fn lagging_scrub_eases_toward_scroll_position() {
    let page = Rc::new(HeadlessPage::new(800.0));
    page.insert_element("work", ElementRect::new(1000.0, 1000.0));
    let seq = AnimationSequencer::new(page.clone());
    let region = TriggerRegion::new("work", "top top", "bottom top").unwrap();
    let handle = seq.register(
        fade_in("work"),
        region,
        Playback::Scrub { lag_ms: Some(400.0) },
    );
    page.run_frame();

    page.scroll_to(2000.0);
    page.run_frame();
    page.run_frame();
    let partway = handle.time_ms();
    assert!(partway > 0.0 && partway < 1000.0, "got {partway}");

    page.run_frames_until_idle(500);
    assert_eq!(handle.time_ms(), 1000.0);
    assert!(!handle.is_playing());
}

#[test]
fn playback_json_forms() {
    let p: Playback = serde_json::from_str(r#"{ "scrub": { "lag_ms": 250 } }"#).unwrap();
    assert_eq!(p, Playback::Scrub { lag_ms: Some(250.0) });
    let p: Playback = serde_json::from_str(r#"{ "toggle": "play none none reverse" }"#).unwrap();
    assert_eq!(
        p,
        Playback::Toggle("play none none reverse".parse().unwrap())
    );
    assert_eq!(Playback::default(), Playback::Toggle(ToggleActions::default()));
}
