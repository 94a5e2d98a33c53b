//! The ordered list of page sections the scroll-spy scans.

pub(crate) mod registry;
