use super::*;

#[test]
fn play_runs_to_end_and_stops() {
    let mut p = Playhead::new(100.0);
    p.play();
    assert!(p.is_playing());
    assert!(p.advance(60.0));
    assert!(p.advance(60.0));
    assert_eq!(p.time_ms(), 100.0);
    assert!(!p.is_playing());
    assert!(!p.advance(10.0));
}

#[test]
fn reverse_mid_flight_keeps_current_time() {
    let mut p = Playhead::new(100.0);
    p.play();
    p.advance(40.0);
    p.reverse();
    assert_eq!(p.time_ms(), 40.0);
    assert_eq!(p.direction(), Direction::Backward);
    p.advance(10.0);
    assert_eq!(p.time_ms(), 30.0);
    p.advance(100.0);
    assert_eq!(p.time_ms(), 0.0);
    assert!(!p.is_playing());
}

#[test]
fn play_at_end_and_reverse_at_start_are_idle() {
    let mut p = Playhead::new(100.0);
    p.reverse();
    assert!(!p.is_playing());
    p.apply(ToggleAction::Complete);
    assert_eq!(p.progress(), 1.0);
    p.play();
    assert!(!p.is_playing());
}

#[test]
fn restart_reset_pause_resume() {
    let mut p = Playhead::new(100.0);
    p.play();
    p.advance(50.0);
    p.apply(ToggleAction::Pause);
    assert!(!p.advance(10.0));
    p.apply(ToggleAction::Resume);
    assert!(p.advance(10.0));
    assert_eq!(p.time_ms(), 60.0);

    p.apply(ToggleAction::Restart);
    assert_eq!(p.time_ms(), 0.0);
    assert!(p.is_playing());

    p.advance(30.0);
    p.apply(ToggleAction::Reset);
    assert_eq!(p.time_ms(), 0.0);
    assert!(!p.is_playing());

    p.apply(ToggleAction::None);
    assert_eq!(p.time_ms(), 0.0);
}

#[test]
fn follow_without_lag_lands_immediately() {
    let mut p = Playhead::new(100.0);
    assert!(p.follow(70.0, 0.0, None));
    assert_eq!(p.time_ms(), 70.0);
    assert!(!p.is_playing());
    p.follow(500.0, 0.0, None);
    assert_eq!(p.time_ms(), 100.0);
}

#[test]
fn follow_with_lag_converges_monotonically() {
    let mut p = Playhead::new(1000.0);
    let mut last = 0.0;
    let mut frames = 0;
    while p.time_ms() != 800.0 {
        p.follow(800.0, 16.0, Some(1000.0));
        assert!(p.time_ms() >= last);
        assert!(p.time_ms() <= 800.0);
        last = p.time_ms();
        frames += 1;
        assert!(frames < 200, "did not settle");
    }
    assert!(!p.is_playing());
    // Roughly a second of frames, not instantly.
    assert!(frames > 30);
}
