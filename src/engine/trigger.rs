use std::str::FromStr;

use crate::{
    animation::ease::Ease,
    animation::tween::{Measure, Property, PropertyValue, Timeline},
    foundation::core::ElementId,
    foundation::error::{SanctuaryError, SanctuaryResult},
};

/// A point along an element or the viewport, measured from its top.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Edge {
    /// Top edge.
    Top,
    /// Vertical midpoint.
    Center,
    /// Bottom edge.
    Bottom,
    /// Percentage of the box height.
    Percent(f64),
    /// Fixed pixel offset from the top.
    Px(f64),
}

impl Edge {
    /// Offset from the top of a box of height `extent`.
    pub fn resolve(self, extent: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => extent / 2.0,
            Self::Bottom => extent,
            Self::Percent(p) => extent * p / 100.0,
            Self::Px(px) => px,
        }
    }
}

impl FromStr for Edge {
    type Err = SanctuaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let number = |raw: &str| -> SanctuaryResult<f64> {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| SanctuaryError::trigger(format!("invalid edge \"{s}\"")))
        };
        match s {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            _ => {
                if let Some(p) = s.strip_suffix('%') {
                    Ok(Self::Percent(number(p)?))
                } else if let Some(px) = s.strip_suffix("px") {
                    Ok(Self::Px(number(px)?))
                } else {
                    Ok(Self::Px(number(s)?))
                }
            }
        }
    }
}

/// `"<element edge> <viewport edge>"`: the scroll position at which the given
/// point of the element meets the given point of the viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerPosition {
    /// Point on the anchor element.
    pub element: Edge,
    /// Point on the viewport.
    pub viewport: Edge,
}

impl TriggerPosition {
    /// Pair an element edge with a viewport edge.
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// `"top top"`.
    pub const TOP_TOP: Self = Self::new(Edge::Top, Edge::Top);

    /// Scroll offset of this position for an element at `top` with `height`.
    pub fn scroll_offset(self, top: f64, height: f64, viewport_height: f64) -> f64 {
        top + self.element.resolve(height) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for TriggerPosition {
    type Err = SanctuaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(element), viewport, None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(SanctuaryError::trigger(format!(
                "trigger position must be \"<element> <viewport>\", got \"{s}\""
            )));
        };
        Ok(Self {
            element: element.parse()?,
            // A lone element edge matches the same edge of the viewport.
            viewport: match viewport {
                Some(v) => v.parse()?,
                None => element.parse()?,
            },
        })
    }
}

/// Where a trigger region ends.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TriggerEnd {
    /// Another element/viewport meeting point.
    Position(TriggerPosition),
    /// Fixed scroll distance past the start (`"+=N"`).
    Distance(f64),
    /// Layout-dependent distance past the start, re-measured on refresh.
    Measured(Measure),
}

impl FromStr for TriggerEnd {
    type Err = SanctuaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(raw) = s.strip_prefix("+=") {
            let d = raw
                .trim()
                .trim_end_matches("px")
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite() && *d >= 0.0)
                .ok_or_else(|| SanctuaryError::trigger(format!("invalid end distance \"{s}\"")))?;
            return Ok(Self::Distance(d));
        }
        Ok(Self::Position(s.parse()?))
    }
}

/// Playback command issued when a toggle trigger crosses a boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleAction {
    /// Play forward from the current position.
    Play,
    /// Stop in place.
    Pause,
    /// Continue in the last direction.
    Resume,
    /// Play backward from the current position.
    Reverse,
    /// Jump to the start and play.
    Restart,
    /// Jump to the start and stop.
    Reset,
    /// Jump to the end and stop.
    Complete,
    /// Do nothing.
    None,
}

impl FromStr for ToggleAction {
    type Err = SanctuaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "play" => Self::Play,
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "reverse" => Self::Reverse,
            "restart" => Self::Restart,
            "reset" => Self::Reset,
            "complete" => Self::Complete,
            "none" => Self::None,
            other => {
                return Err(SanctuaryError::trigger(format!(
                    "unknown toggle action \"{other}\""
                )));
            }
        })
    }
}

/// Actions for onEnter, onLeave, onEnterBack and onLeaveBack, in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ToggleActions {
    /// Scrolling forward past `start`.
    pub on_enter: ToggleAction,
    /// Scrolling forward past `end`.
    pub on_leave: ToggleAction,
    /// Scrolling backward past `end`.
    pub on_enter_back: ToggleAction,
    /// Scrolling backward past `start`.
    pub on_leave_back: ToggleAction,
}

impl ToggleActions {
    /// `"play none none reverse"`.
    pub const PLAY_THEN_REVERSE: Self = Self {
        on_enter: ToggleAction::Play,
        on_leave: ToggleAction::None,
        on_enter_back: ToggleAction::None,
        on_leave_back: ToggleAction::Reverse,
    };

    /// Action bound to `crossing`.
    pub fn for_crossing(&self, crossing: Crossing) -> ToggleAction {
        match crossing {
            Crossing::Enter => self.on_enter,
            Crossing::Leave => self.on_leave,
            Crossing::EnterBack => self.on_enter_back,
            Crossing::LeaveBack => self.on_leave_back,
        }
    }
}

impl FromStr for ToggleActions {
    type Err = SanctuaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [enter, leave, enter_back, leave_back] = parts.as_slice() else {
            return Err(SanctuaryError::trigger(format!(
                "toggle actions need exactly four entries, got \"{s}\""
            )));
        };
        Ok(Self {
            on_enter: enter.parse()?,
            on_leave: leave.parse()?,
            on_enter_back: enter_back.parse()?,
            on_leave_back: leave_back.parse()?,
        })
    }
}

/// Boundary crossing events, in the order they fire for a single scroll step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Crossing {
    /// Forward past `start`.
    Enter,
    /// Forward past `end`.
    Leave,
    /// Backward past `end`.
    EnterBack,
    /// Backward past `start`.
    LeaveBack,
}

/// How a region drives its timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum TriggerMode {
    /// Timeline position is a direct, reversible function of progress.
    Scrub,
    /// Timeline plays at wall-clock speed when boundaries are crossed.
    Toggle(ToggleActions),
    /// Only progress hooks run.
    Observe,
}

/// Anchor element plus viewport-relative start/end boundaries.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerRegion {
    /// Element whose box defines the boundaries.
    pub anchor: ElementId,
    /// Where progress leaves 0.
    pub start: TriggerPosition,
    /// Where progress reaches 1.
    pub end: TriggerEnd,
    /// Freeze the anchor on screen while active and reserve the region's length.
    pub pin: bool,
    /// How progress drives the action.
    pub mode: TriggerMode,
}

impl TriggerRegion {
    /// Unpinned region with parsed `start` and `end` positions.
    pub fn new(
        anchor: impl Into<ElementId>,
        start: &str,
        end: &str,
        mode: TriggerMode,
    ) -> SanctuaryResult<Self> {
        Ok(Self {
            anchor: anchor.into(),
            start: start.parse()?,
            end: end.parse()?,
            pin: false,
            mode,
        })
    }

    /// Pin the anchor while the region is active.
    pub fn pinned(mut self) -> Self {
        self.pin = true;
        self
    }
}

/// Tween started outside any timeline, from whatever the property currently shows.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FreeTween {
    /// Element written.
    pub target: ElementId,
    /// Property written.
    pub property: Property,
    /// Final value.
    pub to: PropertyValue,
    /// Seconds on the ticker clock.
    pub duration: f64,
    /// Curve applied to elapsed time.
    pub ease: Ease,
}

/// Called with the region's progress whenever it changes.
pub type ProgressHook = Box<dyn FnMut(f64) -> Option<FreeTween>>;

/// What a registered region animates.
#[derive(Default)]
pub struct TriggerAction {
    /// Timeline scrubbed or toggled by the region.
    pub timeline: Option<Timeline>,
    /// Hook run with every progress change.
    pub on_update: Option<ProgressHook>,
}

impl TriggerAction {
    /// Action driving only a timeline.
    pub fn timeline(timeline: Timeline) -> Self {
        Self {
            timeline: Some(timeline),
            on_update: None,
        }
    }

    /// Action running only a progress hook.
    pub fn on_update(hook: impl FnMut(f64) -> Option<FreeTween> + 'static) -> Self {
        Self {
            timeline: None,
            on_update: Some(Box::new(hook)),
        }
    }
}

impl std::fmt::Debug for TriggerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerAction")
            .field("timeline", &self.timeline)
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/trigger.rs"]
mod tests;
