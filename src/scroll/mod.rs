//! Scroll-spy: which section is current, and whether the page has left the top.

pub(crate) mod spy;
pub(crate) mod tracker;
