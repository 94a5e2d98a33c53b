use super::*;

#[test]
fn defaults_match_the_site_constants() {
    let c = TrackerConfig::default();
    assert_eq!(c.scroll_threshold, 10.0);
    assert_eq!(c.near_top_threshold, 100.0);
    assert_eq!(c.navbar_offset, 200.0);
    c.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let c: TrackerConfig = serde_json::from_str(r#"{ "navbar_offset": 64 }"#).unwrap();
    assert_eq!(c.navbar_offset, 64.0);
    assert_eq!(c.near_top_threshold, TrackerConfig::NEAR_TOP_THRESHOLD);
    assert!(serde_json::from_str::<TrackerConfig>(r#"{ "offset": 1 }"#).is_err());
}

#[test]
fn validation_names_the_bad_field() {
    let c = TrackerConfig {
        near_top_threshold: f64::NAN,
        ..TrackerConfig::default()
    };
    let err = c.validate().unwrap_err().to_string();
    assert!(err.contains("near_top_threshold"), "{err}");

    let c = TrackerConfig {
        navbar_offset: -1.0,
        ..TrackerConfig::default()
    };
    assert!(matches!(c.validate(), Err(ScrollcueError::Config(_))));
}
