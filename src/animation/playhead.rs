use crate::animation::trigger::ToggleAction;

/// Playback direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards the end.
    Forward,
    /// Towards the start.
    Backward,
}

/// Position and motion of one timeline.
///
/// Direction changes keep the current time, so reversing mid-flight continues from the current
/// interpolated state instead of restarting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playhead {
    time_ms: f64,
    duration_ms: f64,
    direction: Direction,
    playing: bool,
}

impl Playhead {
    /// Residual distance below which a scrubbing playhead snaps onto its target.
    pub const SCRUB_SNAP_MS: f64 = 0.5;
    /// A lagging scrub covers about 98% of the distance within its lag.
    const SCRUB_TIME_CONSTANTS: f64 = 4.0;

    /// Paused at the start.
    pub fn new(duration_ms: f64) -> Self {
        Self {
            time_ms: 0.0,
            duration_ms,
            direction: Direction::Forward,
            playing: false,
        }
    }

    /// Current time.
    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    /// Timeline length.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// `time / duration` in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.time_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Current direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// True while time is moving.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Run forward from here.
    pub fn play(&mut self) {
        self.direction = Direction::Forward;
        self.playing = self.time_ms < self.duration_ms;
    }

    /// Run backward from here.
    pub fn reverse(&mut self) {
        self.direction = Direction::Backward;
        self.playing = self.time_ms > 0.0;
    }

    /// Stop without moving.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Continue in the current direction.
    pub fn resume(&mut self) {
        match self.direction {
            Direction::Forward => self.play(),
            Direction::Backward => self.reverse(),
        }
    }

    /// Jump to `time_ms` (clamped) without changing whether it plays.
    pub fn seek(&mut self, time_ms: f64) {
        self.time_ms = time_ms.clamp(0.0, self.duration_ms);
    }

    /// Apply a crossing action.
    pub fn apply(&mut self, action: ToggleAction) {
        match action {
            ToggleAction::Play => self.play(),
            ToggleAction::Reverse => self.reverse(),
            ToggleAction::Restart => {
                self.time_ms = 0.0;
                self.play();
            }
            ToggleAction::Reset => {
                self.time_ms = 0.0;
                self.direction = Direction::Forward;
                self.playing = false;
            }
            ToggleAction::Complete => {
                self.time_ms = self.duration_ms;
                self.direction = Direction::Forward;
                self.playing = false;
            }
            ToggleAction::Pause => self.pause(),
            ToggleAction::Resume => self.resume(),
            ToggleAction::None => {}
        }
    }

    /// Move by `dt_ms` of wall time; stops at either end. Returns `true` if time changed.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if !self.playing || dt_ms <= 0.0 {
            return false;
        }
        let before = self.time_ms;
        match self.direction {
            Direction::Forward => {
                self.time_ms = (self.time_ms + dt_ms).min(self.duration_ms);
                if self.time_ms >= self.duration_ms {
                    self.playing = false;
                }
            }
            Direction::Backward => {
                self.time_ms = (self.time_ms - dt_ms).max(0.0);
                if self.time_ms <= 0.0 {
                    self.playing = false;
                }
            }
        }
        self.time_ms != before
    }

    /// Chase `target_ms` while scrubbing. Without a lag the playhead lands at once; with one it
    /// closes the gap exponentially. Returns `true` if time changed.
    pub fn follow(&mut self, target_ms: f64, dt_ms: f64, lag_ms: Option<f64>) -> bool {
        let target = target_ms.clamp(0.0, self.duration_ms);
        let before = self.time_ms;
        let gap = target - self.time_ms;
        self.direction = if gap < 0.0 {
            Direction::Backward
        } else {
            Direction::Forward
        };

        match lag_ms {
            Some(lag) if lag > 0.0 => {
                if gap.abs() <= Self::SCRUB_SNAP_MS {
                    self.time_ms = target;
                } else if dt_ms > 0.0 {
                    let tau = lag / Self::SCRUB_TIME_CONSTANTS;
                    let alpha = 1.0 - (-dt_ms / tau).exp();
                    self.time_ms += gap * alpha;
                    if (target - self.time_ms).abs() <= Self::SCRUB_SNAP_MS {
                        self.time_ms = target;
                    }
                }
            }
            _ => self.time_ms = target,
        }
        self.playing = self.time_ms != target;
        self.time_ms != before
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/playhead.rs"]
mod tests;
