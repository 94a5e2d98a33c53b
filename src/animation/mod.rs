//! Staged tweens and the scroll triggers that drive them.

pub(crate) mod ease;
pub(crate) mod playhead;
pub(crate) mod sequencer;
pub(crate) mod timeline;
pub(crate) mod trigger;
