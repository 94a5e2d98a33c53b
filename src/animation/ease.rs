use std::str::FromStr;

use crate::foundation::error::ScrollcueError;

/// Easing curves.
///
/// Parsed from the names used in scroll-animation configs: `"none"`/`"linear"`,
/// `"power1.in|out|inOut"` (quadratic), `"power2.in|out|inOut"` (cubic) and
/// `"back.out"` / `"back.out(<overshoot>)"`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    /// `none`.
    Linear,
    /// `power1.in`.
    InQuad,
    /// `power1.out`.
    OutQuad,
    /// `power1.inOut`.
    InOutQuad,
    /// `power2.in`.
    InCubic,
    /// `power2.out`.
    OutCubic,
    /// `power2.inOut`.
    InOutCubic,
    /// Overshoots the target by `overshoot` before settling.
    BackOut(f64),
}

impl Ease {
    /// Overshoot used by a bare `"back.out"`.
    pub const DEFAULT_BACK_OVERSHOOT: f64 = 1.70158;

    /// Map linear progress `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::BackOut(c1) => {
                let c3 = c1 + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u.powi(3) + c1 * u.powi(2)
            }
        }
    }
}

impl FromStr for Ease {
    type Err = ScrollcueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix("back.out") {
            if rest.is_empty() {
                return Ok(Self::BackOut(Self::DEFAULT_BACK_OVERSHOOT));
            }
            let inner = rest
                .strip_prefix('(')
                .and_then(|r| r.strip_suffix(')'))
                .ok_or_else(|| ScrollcueError::animation(format!("malformed ease '{s}'")))?;
            let overshoot: f64 = inner.trim().parse().map_err(|_| {
                ScrollcueError::animation(format!("bad back.out overshoot in '{s}'"))
            })?;
            if !overshoot.is_finite() {
                return Err(ScrollcueError::animation(format!(
                    "bad back.out overshoot in '{s}'"
                )));
            }
            return Ok(Self::BackOut(overshoot));
        }

        match s {
            "none" | "linear" => Ok(Self::Linear),
            "power1.in" => Ok(Self::InQuad),
            "power1" | "power1.out" => Ok(Self::OutQuad),
            "power1.inOut" => Ok(Self::InOutQuad),
            "power2.in" => Ok(Self::InCubic),
            "power2" | "power2.out" => Ok(Self::OutCubic),
            "power2.inOut" => Ok(Self::InOutCubic),
            _ => Err(ScrollcueError::animation(format!("unknown ease '{s}'"))),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = ScrollcueError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Ease> for String {
    fn from(e: Ease) -> Self {
        match e {
            Ease::Linear => "none".to_owned(),
            Ease::InQuad => "power1.in".to_owned(),
            Ease::OutQuad => "power1.out".to_owned(),
            Ease::InOutQuad => "power1.inOut".to_owned(),
            Ease::InCubic => "power2.in".to_owned(),
            Ease::OutCubic => "power2.out".to_owned(),
            Ease::InOutCubic => "power2.inOut".to_owned(),
            Ease::BackOut(c) => format!("back.out({c})"),
        }
    }
}

impl Default for Ease {
    /// `power2.out`, the timeline default of the site's hero choreography.
    fn default() -> Self {
        Self::OutCubic
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
