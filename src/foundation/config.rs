use crate::foundation::error::{ScrollcueError, ScrollcueResult};

/// Tunables of the scroll-spy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// `is_scrolled` is true strictly above this offset.
    pub scroll_threshold: f64,
    /// Offsets strictly below this select the registry default without reading geometry.
    pub near_top_threshold: f64,
    /// Added to the scroll offset before the section scan; compensates for the fixed header.
    pub navbar_offset: f64,
}

impl TrackerConfig {
    /// Default `scroll_threshold`.
    pub const SCROLL_THRESHOLD: f64 = 10.0;
    /// Default `near_top_threshold`.
    pub const NEAR_TOP_THRESHOLD: f64 = 100.0;
    /// Default `navbar_offset`.
    pub const NAVBAR_OFFSET: f64 = 200.0;

    /// Check that all values are finite and non-negative.
    pub fn validate(&self) -> ScrollcueResult<()> {
        for (name, v) in [
            ("scroll_threshold", self.scroll_threshold),
            ("near_top_threshold", self.near_top_threshold),
            ("navbar_offset", self.navbar_offset),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ScrollcueError::config(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: Self::SCROLL_THRESHOLD,
            near_top_threshold: Self::NEAR_TOP_THRESHOLD,
            navbar_offset: Self::NAVBAR_OFFSET,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
