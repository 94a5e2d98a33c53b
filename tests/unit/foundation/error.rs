use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollcueError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrollcueError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        ScrollcueError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        ScrollcueError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollcueError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
