//! Header navigation: the collapsible menu and the navbar that wires it to the scroll-spy.

pub(crate) mod menu;
pub(crate) mod navbar;
