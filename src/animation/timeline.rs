use crate::{
    animation::ease::Ease,
    foundation::core::{Lerp, VisualProps},
    foundation::error::{ScrollcueError, ScrollcueResult},
};

/// One `from → to` tween of one element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnimationStage {
    /// Id of the animated element.
    pub target: String,
    /// Props at the start of the stage.
    #[serde(default)]
    pub from: VisualProps,
    /// Props at the end of the stage.
    pub to: VisualProps,
    /// Stage length (`> 0`).
    pub duration_ms: f64,
    /// Start relative to the previous stage's end; negative values overlap it.
    #[serde(default)]
    pub offset_ms: f64,
    /// Overrides the timeline's default ease.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease: Option<Ease>,
}

impl AnimationStage {
    /// Stage that starts right after the previous one.
    pub fn new(
        target: impl Into<String>,
        from: VisualProps,
        to: VisualProps,
        duration_ms: f64,
    ) -> Self {
        Self {
            target: target.into(),
            from,
            to,
            duration_ms,
            offset_ms: 0.0,
            ease: None,
        }
    }

    /// Shift the start relative to the previous stage's end.
    pub fn with_offset(mut self, offset_ms: f64) -> Self {
        self.offset_ms = offset_ms;
        self
    }

    /// Use a specific ease for this stage.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    fn validate(&self, index: usize) -> ScrollcueResult<()> {
        if self.target.trim().is_empty() {
            return Err(ScrollcueError::animation(format!(
                "stage #{index} has an empty target"
            )));
        }
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(ScrollcueError::animation(format!(
                "stage #{index} ('{}') duration must be > 0 (got {})",
                self.target, self.duration_ms
            )));
        }
        if !self.offset_ms.is_finite() {
            return Err(ScrollcueError::animation(format!(
                "stage #{index} ('{}') offset must be finite",
                self.target
            )));
        }
        Ok(())
    }
}

/// Serializable timeline definition.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimelineDef {
    /// Ease of stages that do not set their own.
    #[serde(default)]
    pub ease: Ease,
    /// Stages in authoring order.
    pub stages: Vec<AnimationStage>,
}

/// A stage with its resolved absolute start time.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledStage {
    /// The stage definition.
    pub stage: AnimationStage,
    /// Absolute start on the timeline.
    pub start_ms: f64,
}

impl ScheduledStage {
    /// Absolute end on the timeline.
    pub fn end_ms(&self) -> f64 {
        self.start_ms + self.stage.duration_ms
    }
}

/// Validated, scheduled sequence of stages.
///
/// Immutable once built. Sampling is pure: the same time always yields the same props.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    stages: Vec<ScheduledStage>,
    duration_ms: f64,
    default_ease: Ease,
}

impl Timeline {
    /// Start a builder.
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::new()
    }

    /// Validate and schedule a definition.
    pub fn new(def: TimelineDef) -> ScrollcueResult<Self> {
        if def.stages.is_empty() {
            return Err(ScrollcueError::animation("timeline has no stages"));
        }

        let mut stages = Vec::with_capacity(def.stages.len());
        let mut prev_end = 0.0_f64;
        for (i, stage) in def.stages.into_iter().enumerate() {
            stage.validate(i)?;
            let start_ms = (prev_end + stage.offset_ms).max(0.0);
            prev_end = start_ms + stage.duration_ms;
            stages.push(ScheduledStage { stage, start_ms });
        }
        let duration_ms = stages
            .iter()
            .map(ScheduledStage::end_ms)
            .fold(0.0_f64, f64::max);

        Ok(Self {
            stages,
            duration_ms,
            default_ease: def.ease,
        })
    }

    /// Total length: the latest stage end.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    /// Scheduled stages in authoring order.
    pub fn stages(&self) -> &[ScheduledStage] {
        &self.stages
    }

    /// Ease of stages without their own.
    pub fn default_ease(&self) -> Ease {
        self.default_ease
    }

    /// Distinct targets in order of first appearance.
    pub fn targets(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for s in &self.stages {
            if !out.contains(&s.stage.target.as_str()) {
                out.push(&s.stage.target);
            }
        }
        out
    }

    /// Copy keeping only stages whose target passes `keep`.
    ///
    /// Start times and total duration are preserved so the remaining choreography keeps its
    /// timing.
    pub fn retain_targets(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        Self {
            stages: self
                .stages
                .iter()
                .filter(|s| keep(&s.stage.target))
                .cloned()
                .collect(),
            duration_ms: self.duration_ms,
            default_ease: self.default_ease,
        }
    }

    /// Props of every target at `time_ms` (clamped to the timeline).
    ///
    /// A target's first stage shows its `from` props before it starts; later stages only take
    /// effect once they start, overriding the props they animate.
    pub fn sample(&self, time_ms: f64) -> Vec<(&str, VisualProps)> {
        let t = time_ms.clamp(0.0, self.duration_ms);
        let mut out: Vec<(&str, VisualProps)> = Vec::new();

        for s in &self.stages {
            let target = s.stage.target.as_str();
            let (idx, first) = match out.iter().position(|(id, _)| *id == target) {
                Some(idx) => (idx, false),
                None => {
                    out.push((target, VisualProps::none()));
                    (out.len() - 1, true)
                }
            };

            let from = &s.stage.from;
            let to = &s.stage.to;
            let value = if t < s.start_ms {
                if !first {
                    continue;
                }
                VisualProps::lerp(from, to, 0.0).merged(from)
            } else {
                let p = (t - s.start_ms) / s.stage.duration_ms;
                if p >= 1.0 {
                    VisualProps::lerp(from, to, 1.0).merged(to)
                } else {
                    let ease = s.stage.ease.unwrap_or(self.default_ease);
                    VisualProps::lerp(from, to, ease.apply(p))
                }
            };
            out[idx].1 = out[idx].1.merged(&value);
        }
        out
    }
}

/// Fluent construction of a [`Timeline`].
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    def: TimelineDef,
}

impl TimelineBuilder {
    /// Empty builder with the default ease.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default ease for stages without one.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.def.ease = ease;
        self
    }

    /// Append a tween starting at the previous stage's end.
    pub fn from_to(
        self,
        target: impl Into<String>,
        from: VisualProps,
        to: VisualProps,
        duration_ms: f64,
    ) -> Self {
        self.stage(AnimationStage::new(target, from, to, duration_ms))
    }

    /// Append a tween starting `offset_ms` after (or, negative, before) the previous stage's end.
    pub fn from_to_offset(
        self,
        target: impl Into<String>,
        from: VisualProps,
        to: VisualProps,
        duration_ms: f64,
        offset_ms: f64,
    ) -> Self {
        self.stage(AnimationStage::new(target, from, to, duration_ms).with_offset(offset_ms))
    }

    /// Append a prepared stage.
    pub fn stage(mut self, stage: AnimationStage) -> Self {
        self.def.stages.push(stage);
        self
    }

    /// Validate and schedule.
    pub fn build(self) -> ScrollcueResult<Timeline> {
        Timeline::new(self.def)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
