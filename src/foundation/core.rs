/// Document-relative vertical geometry of an element, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementRect {
    /// Distance from the top of the document to the element's top edge.
    pub top: f64,
    /// Element height.
    pub height: f64,
}

impl ElementRect {
    /// Build a rect from its top edge and height.
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Bottom edge (exclusive).
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: `top <= y < top + height`.
    pub fn contains(self, y: f64) -> bool {
        self.top <= y && y < self.bottom()
    }
}

/// Interpolation contract for animated values.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Snapshot of the animatable visual properties of one element.
///
/// `None` means the property is not set (the element shows its natural value).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisualProps {
    /// Opacity in `[0, 1]`.
    pub opacity: Option<f64>,
    /// Horizontal translation in pixels.
    pub x: Option<f64>,
    /// Vertical translation in pixels.
    pub y: Option<f64>,
    /// Uniform scale factor.
    pub scale: Option<f64>,
}

impl VisualProps {
    pub(crate) const NEUTRAL_OPACITY: f64 = 1.0;
    pub(crate) const NEUTRAL_TRANSLATE: f64 = 0.0;
    pub(crate) const NEUTRAL_SCALE: f64 = 1.0;

    /// Props with no fields set.
    pub fn none() -> Self {
        Self::default()
    }

    /// Set `opacity`.
    pub fn opacity(mut self, v: f64) -> Self {
        self.opacity = Some(v);
        self
    }

    /// Set `x`.
    pub fn x(mut self, v: f64) -> Self {
        self.x = Some(v);
        self
    }

    /// Set `y`.
    pub fn y(mut self, v: f64) -> Self {
        self.y = Some(v);
        self
    }

    /// Set `scale`.
    pub fn scale(mut self, v: f64) -> Self {
        self.scale = Some(v);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.opacity.is_none() && self.x.is_none() && self.y.is_none() && self.scale.is_none()
    }

    /// Overlay the fields set in `top` onto `self`.
    pub fn merged(&self, top: &Self) -> Self {
        Self {
            opacity: top.opacity.or(self.opacity),
            x: top.x.or(self.x),
            y: top.y.or(self.y),
            scale: top.scale.or(self.scale),
        }
    }
}

impl Lerp for VisualProps {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn field(a: Option<f64>, b: Option<f64>, neutral: f64, t: f64) -> Option<f64> {
            match (a, b) {
                (None, None) => None,
                (a, b) => Some(f64::lerp(&a.unwrap_or(neutral), &b.unwrap_or(neutral), t)),
            }
        }

        Self {
            opacity: field(a.opacity, b.opacity, Self::NEUTRAL_OPACITY, t),
            x: field(a.x, b.x, Self::NEUTRAL_TRANSLATE, t),
            y: field(a.y, b.y, Self::NEUTRAL_TRANSLATE, t),
            scale: field(a.scale, b.scale, Self::NEUTRAL_SCALE, t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
