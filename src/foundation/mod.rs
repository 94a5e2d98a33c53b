//! Shared value types, configuration, change observers and errors.

pub(crate) mod config;
pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod observe;
