use crate::host::{FrameCallback, FrameHandle, FrameScheduler};

/// At-most-one-frame-in-flight guard.
///
/// Events arriving while a frame is pending are dropped; the frame reads the latest host state
/// when it runs, so nothing is lost but the intermediate values.
#[derive(Debug, Default)]
pub(crate) struct FrameCoalescer {
    pending: Option<FrameHandle>,
}

impl FrameCoalescer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Request a frame unless one is already pending. Returns `true` when a frame was requested.
    pub(crate) fn schedule(&mut self, scheduler: &dyn FrameScheduler, cb: FrameCallback) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(scheduler.request_animation_frame(cb));
        true
    }

    /// Must be called first thing in the frame callback.
    pub(crate) fn fired(&mut self) {
        self.pending = None;
    }

    pub(crate) fn cancel(&mut self, scheduler: &dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_animation_frame(handle);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/frame.rs"]
mod tests;
