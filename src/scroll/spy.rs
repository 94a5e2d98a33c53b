use crate::{
    foundation::config::TrackerConfig, host::GeometryProvider, sections::registry::SectionRegistry,
};

/// Derived navigation state for one scroll position.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ScrollState {
    /// Vertical scroll offset, clamped to `>= 0`.
    pub scroll_offset_y: f64,
    /// `scroll_offset_y > scroll_threshold`.
    pub is_scrolled: bool,
    /// Active section id; `None` when nothing is active.
    pub active_section_id: Option<String>,
}

impl ScrollState {
    /// True when `id` is the active section.
    pub fn is_active(&self, id: &str) -> bool {
        self.active_section_id.as_deref() == Some(id)
    }
}

/// Which section is active at scroll offset `y`.
///
/// - below `near_top_threshold` the registry default wins without any geometry read;
/// - otherwise the first section (in registry order) whose `[top, top + height)` contains
///   `y + navbar_offset` wins;
/// - sections missing from the document are skipped;
/// - when nothing matches, `previous` is kept.
pub fn resolve_active_section(
    y: f64,
    registry: &SectionRegistry,
    geometry: &(impl GeometryProvider + ?Sized),
    previous: Option<&str>,
    config: &TrackerConfig,
) -> Option<String> {
    if y < config.near_top_threshold {
        return registry.default_id().map(str::to_owned);
    }

    let probe = y + config.navbar_offset;
    for section in registry {
        let Some(rect) = geometry.element_rect(&section.id) else {
            tracing::trace!(id = %section.id, "section element not in document");
            continue;
        };
        if rect.contains(probe) {
            return Some(section.id.clone());
        }
    }
    previous.map(str::to_owned)
}

/// Full [`ScrollState`] for offset `y`. Negative offsets (overscroll) count as `0`.
pub fn compute_scroll_state(
    y: f64,
    registry: &SectionRegistry,
    geometry: &(impl GeometryProvider + ?Sized),
    previous: &ScrollState,
    config: &TrackerConfig,
) -> ScrollState {
    let y = if y.is_finite() { y.max(0.0) } else { 0.0 };
    ScrollState {
        scroll_offset_y: y,
        is_scrolled: y > config.scroll_threshold,
        active_section_id: resolve_active_section(
            y,
            registry,
            geometry,
            previous.active_section_id.as_deref(),
            config,
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/spy.rs"]
mod tests;
