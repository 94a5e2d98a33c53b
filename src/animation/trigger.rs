use std::str::FromStr;

use smallvec::SmallVec;

use crate::{
    foundation::core::ElementRect,
    foundation::error::{ScrollcueError, ScrollcueResult},
};

/// A point along an element or the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Fraction of the length (`top` = 0, `center` = 0.5, `bottom` = 1, `80%` = 0.8).
    Fraction(f64),
    /// Absolute pixel distance from the top.
    Pixels(f64),
}

impl Anchor {
    /// Distance from the top for a box of `length`.
    pub fn resolve(self, length: f64) -> f64 {
        match self {
            Self::Fraction(f) => f * length,
            Self::Pixels(px) => px,
        }
    }
}

impl FromStr for Anchor {
    type Err = ScrollcueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ScrollcueError::animation(format!("bad trigger anchor '{s}'"));
        let number = |v: &str| -> ScrollcueResult<f64> {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(bad)
        };
        match s {
            "top" => Ok(Self::Fraction(0.0)),
            "center" => Ok(Self::Fraction(0.5)),
            "bottom" => Ok(Self::Fraction(1.0)),
            _ => {
                if let Some(pct) = s.strip_suffix('%') {
                    Ok(Self::Fraction(number(pct)? / 100.0))
                } else if let Some(px) = s.strip_suffix("px") {
                    Ok(Self::Pixels(number(px)?))
                } else {
                    Ok(Self::Pixels(number(s)?))
                }
            }
        }
    }
}

/// `"<element anchor> <viewport anchor>"`: the edge is reached when the element anchor meets
/// the viewport anchor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriggerEdge {
    /// Point on the trigger element.
    pub element: Anchor,
    /// Point on the viewport.
    pub viewport: Anchor,
}

impl TriggerEdge {
    /// Scroll offset at which this edge is reached.
    pub fn scroll_position(self, element: ElementRect, viewport_height: f64) -> f64 {
        element.top + self.element.resolve(element.height) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for TriggerEdge {
    type Err = ScrollcueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ScrollcueError::animation(format!(
                "trigger edge '{s}' must be '<element> <viewport>'"
            )));
        };
        Ok(Self {
            element: element.parse()?,
            viewport: viewport.parse()?,
        })
    }
}

impl TryFrom<String> for TriggerEdge {
    type Error = ScrollcueError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TriggerEdge> for String {
    fn from(edge: TriggerEdge) -> Self {
        fn anchor(a: Anchor) -> String {
            match a {
                Anchor::Fraction(f) if f == 0.0 => "top".to_owned(),
                Anchor::Fraction(f) if f == 0.5 => "center".to_owned(),
                Anchor::Fraction(f) if f == 1.0 => "bottom".to_owned(),
                Anchor::Fraction(f) => format!("{}%", f * 100.0),
                Anchor::Pixels(px) => format!("{px}px"),
            }
        }
        format!("{} {}", anchor(edge.element), anchor(edge.viewport))
    }
}

/// Scroll range, relative to an element, that gates a timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerRegion {
    /// Id of the element the edges are measured against.
    pub element: String,
    /// Entering edge.
    pub start: TriggerEdge,
    /// Leaving edge.
    pub end: TriggerEdge,
}

impl TriggerRegion {
    /// Region from edge strings such as `"top 80%"` and `"bottom -50%"`.
    pub fn new(element: impl Into<String>, start: &str, end: &str) -> ScrollcueResult<Self> {
        Ok(Self {
            element: element.into(),
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    /// Resolved `[start, end)` scroll offsets; `end` is never below `start`.
    pub fn resolve(&self, element: ElementRect, viewport_height: f64) -> ScrollRange {
        let start = self.start.scroll_position(element, viewport_height);
        let end = self.end.scroll_position(element, viewport_height).max(start);
        ScrollRange { start, end }
    }
}

/// Resolved trigger range in scroll offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
    /// First offset inside the region.
    pub start: f64,
    /// First offset past the region.
    pub end: f64,
}

impl ScrollRange {
    /// Where `y` sits relative to the range.
    pub fn locate(self, y: f64) -> RegionPosition {
        if y < self.start {
            RegionPosition::Before
        } else if y < self.end {
            RegionPosition::Inside
        } else {
            RegionPosition::After
        }
    }

    /// Progress of `y` through the range in `[0, 1]`.
    pub fn progress(self, y: f64) -> f64 {
        let len = self.end - self.start;
        if len <= 0.0 {
            return if y < self.start { 0.0 } else { 1.0 };
        }
        ((y - self.start) / len).clamp(0.0, 1.0)
    }
}

/// Scroll offset relative to a trigger range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionPosition {
    /// Above the start edge.
    Before,
    /// Between the edges.
    Inside,
    /// Past the end edge.
    After,
}

/// The four region crossings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    /// Entered scrolling down.
    Enter,
    /// Left scrolling down.
    Leave,
    /// Re-entered scrolling up.
    EnterBack,
    /// Left scrolling up.
    LeaveBack,
}

/// Crossings caused by moving from `prev` to `next`, in the order they happened.
///
/// A jump over the whole region reports both crossings.
pub fn detect_crossings(prev: RegionPosition, next: RegionPosition) -> SmallVec<[Crossing; 2]> {
    use RegionPosition::{After, Before, Inside};

    let mut out = SmallVec::new();
    match (prev, next) {
        (Before, Inside) => out.push(Crossing::Enter),
        (Before, After) => {
            out.push(Crossing::Enter);
            out.push(Crossing::Leave);
        }
        (Inside, After) => out.push(Crossing::Leave),
        (After, Inside) => out.push(Crossing::EnterBack),
        (After, Before) => {
            out.push(Crossing::EnterBack);
            out.push(Crossing::LeaveBack);
        }
        (Inside, Before) => out.push(Crossing::LeaveBack),
        (Before, Before) | (Inside, Inside) | (After, After) => {}
    }
    out
}

/// What a crossing does to the playhead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    /// Play forward from the current time.
    Play,
    /// Play backward from the current time.
    Reverse,
    /// Jump to the start and play forward.
    Restart,
    /// Jump to the start and stop.
    Reset,
    /// Jump to the end and stop.
    Complete,
    /// Stop where it is.
    Pause,
    /// Continue in the current direction.
    Resume,
    /// Do nothing.
    None,
}

impl FromStr for ToggleAction {
    type Err = ScrollcueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "play" => Ok(Self::Play),
            "reverse" => Ok(Self::Reverse),
            "restart" => Ok(Self::Restart),
            "reset" => Ok(Self::Reset),
            "complete" => Ok(Self::Complete),
            "pause" => Ok(Self::Pause),
            "resume" => Ok(Self::Resume),
            "none" => Ok(Self::None),
            _ => Err(ScrollcueError::animation(format!(
                "unknown toggle action '{s}'"
            ))),
        }
    }
}

impl ToggleAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Reverse => "reverse",
            Self::Restart => "restart",
            Self::Reset => "reset",
            Self::Complete => "complete",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::None => "none",
        }
    }
}

/// Crossing → action policy, written as four words in
/// `onEnter onLeave onEnterBack onLeaveBack` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ToggleActions {
    /// Entering scrolling down.
    pub on_enter: ToggleAction,
    /// Leaving scrolling down.
    pub on_leave: ToggleAction,
    /// Re-entering scrolling up.
    pub on_enter_back: ToggleAction,
    /// Leaving scrolling up.
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    /// Action for one crossing.
    pub fn action_for(self, crossing: Crossing) -> ToggleAction {
        match crossing {
            Crossing::Enter => self.on_enter,
            Crossing::Leave => self.on_leave,
            Crossing::EnterBack => self.on_enter_back,
            Crossing::LeaveBack => self.on_leave_back,
        }
    }
}

impl Default for ToggleActions {
    /// `"play reverse play reverse"`: replays each time the region is re-entered.
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::Reverse,
            on_enter_back: ToggleAction::Play,
            on_leave_back: ToggleAction::Reverse,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = ScrollcueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: SmallVec<[&str; 4]> = s.split_whitespace().collect();
        let [on_enter, on_leave, on_enter_back, on_leave_back] = words.as_slice() else {
            return Err(ScrollcueError::animation(format!(
                "toggle actions '{s}' must have exactly four words"
            )));
        };
        Ok(Self {
            on_enter: on_enter.parse()?,
            on_leave: on_leave.parse()?,
            on_enter_back: on_enter_back.parse()?,
            on_leave_back: on_leave_back.parse()?,
        })
    }
}

impl TryFrom<String> for ToggleActions {
    type Error = ScrollcueError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ToggleActions> for String {
    fn from(a: ToggleActions) -> Self {
        format!(
            "{} {} {} {}",
            a.on_enter.as_str(),
            a.on_leave.as_str(),
            a.on_enter_back.as_str(),
            a.on_leave_back.as_str()
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/trigger.rs"]
mod tests;
