use smallvec::SmallVec;

use crate::{
    animation::ease::Ease,
    foundation::color::Rgba,
    foundation::core::ElementId,
    foundation::error::{SanctuaryError, SanctuaryResult},
};

/// Interpolation contract for animatable value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Visual property a tween can drive.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// `opacity`, 0 to 1.
    Opacity,
    /// Uniform `scale`.
    Scale,
    /// `filter: blur(..)` radius in pixels.
    BlurPx,
    /// Horizontal translation in pixels.
    TranslateX,
    /// Vertical translation in pixels.
    TranslateY,
    /// Vertical translation as a percentage of the element's own height.
    YPercent,
    /// `background-color`.
    BackgroundColor,
}

impl Property {
    /// Whether values of this property are colors rather than scalars.
    pub fn is_color(self) -> bool {
        matches!(self, Self::BackgroundColor)
    }

    /// Value the property has when nothing animates it.
    pub fn rest_value(self) -> PropertyValue {
        match self {
            Self::Opacity | Self::Scale => PropertyValue::Scalar(1.0),
            Self::BlurPx | Self::TranslateX | Self::TranslateY | Self::YPercent => {
                PropertyValue::Scalar(0.0)
            }
            Self::BackgroundColor => PropertyValue::Color(Rgba::rgba(0.0, 0.0, 0.0, 0.0)),
        }
    }
}

/// Concrete animated value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Numeric value.
    Scalar(f64),
    /// Color value.
    Color(Rgba),
}

impl PropertyValue {
    /// The number, if this is a scalar.
    pub fn as_scalar(self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(v),
            Self::Color(_) => None,
        }
    }

    /// The color, if this is a color.
    pub fn as_color(self) -> Option<Rgba> {
        match self {
            Self::Color(c) => Some(c),
            Self::Scalar(_) => None,
        }
    }

    fn matches(self, property: Property) -> bool {
        property.is_color() == matches!(self, Self::Color(_))
    }
}

impl Lerp for PropertyValue {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Self::Scalar(a), Self::Scalar(b)) => Self::Scalar(f64::lerp(a, b, t)),
            (Self::Color(a), Self::Color(b)) => Self::Color(Rgba::lerp(a, b, t)),
            // Mixed kinds are rejected at construction; snap if one slips through.
            _ => {
                if t < 1.0 {
                    *a
                } else {
                    *b
                }
            }
        }
    }
}

/// A layout-dependent quantity re-measured whenever the engine refreshes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// `scroll_width - viewport.width` of the given element, floored at 0.
    TrackOverflow(ElementId),
}

/// Tween endpoint: either fixed or derived from layout at refresh time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Endpoint {
    /// Fixed value.
    Value(PropertyValue),
    /// `factor * measure`, re-resolved on every refresh.
    Measured {
        /// Layout quantity.
        measure: Measure,
        /// Multiplier applied to the measured value.
        factor: f64,
    },
}

impl From<f64> for Endpoint {
    fn from(v: f64) -> Self {
        Self::Value(PropertyValue::Scalar(v))
    }
}

impl From<Rgba> for Endpoint {
    fn from(c: Rgba) -> Self {
        Self::Value(PropertyValue::Color(c))
    }
}

/// One animated channel of a tween.
#[derive(Clone, Debug)]
pub struct PropertyTrack {
    /// Driven property.
    pub property: Property,
    /// Value at local progress 0.
    pub from: Endpoint,
    /// Value at local progress 1.
    pub to: Endpoint,
    resolved: Option<(PropertyValue, PropertyValue)>,
}

impl PropertyTrack {
    /// Track from `from` to `to`; fixed endpoints resolve immediately.
    pub fn new(property: Property, from: impl Into<Endpoint>, to: impl Into<Endpoint>) -> Self {
        let from = from.into();
        let to = to.into();
        let resolved = match (&from, &to) {
            (Endpoint::Value(a), Endpoint::Value(b)) => Some((*a, *b)),
            _ => None,
        };
        Self {
            property,
            from,
            to,
            resolved,
        }
    }

    /// Whether either endpoint depends on layout.
    pub fn is_measured(&self) -> bool {
        matches!(self.from, Endpoint::Measured { .. }) || matches!(self.to, Endpoint::Measured { .. })
    }

    fn validate(&self) -> SanctuaryResult<()> {
        for end in [&self.from, &self.to] {
            match end {
                Endpoint::Value(v) if !v.matches(self.property) => {
                    return Err(SanctuaryError::animation(format!(
                        "endpoint kind does not match property {:?}",
                        self.property
                    )));
                }
                Endpoint::Measured { .. } if self.property.is_color() => {
                    return Err(SanctuaryError::animation(
                        "color properties cannot use measured endpoints",
                    ));
                }
                Endpoint::Value(PropertyValue::Scalar(v)) if !v.is_finite() => {
                    return Err(SanctuaryError::animation("scalar endpoint must be finite"));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// A set of property tracks sharing a start time, duration and ease.
#[derive(Clone, Debug)]
pub struct Tween {
    /// Element the tracks write to.
    pub target: ElementId,
    /// Animated channels.
    pub tracks: SmallVec<[PropertyTrack; 3]>,
    /// Start time on the owning timeline.
    pub start: f64,
    /// Length in timeline units.
    pub duration: f64,
    /// Curve applied to local progress.
    pub ease: Ease,
}

impl Tween {
    /// `start + duration`.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn local_progress(&self, t: f64) -> f64 {
        if self.duration <= 0.0 {
            return if t >= self.start { 1.0 } else { 0.0 };
        }
        ((t - self.start) / self.duration).clamp(0.0, 1.0)
    }
}

/// Where a new tween is placed relative to what is already on the timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Position {
    /// Absolute time.
    At(f64),
    /// End of the timeline plus an offset (negative overlaps the tail).
    End(f64),
    /// Start of the previously added tween plus an offset.
    WithPrevious(f64),
}

impl Default for Position {
    fn default() -> Self {
        Self::End(0.0)
    }
}

/// Resolved value of one (target, property) channel at a sampled time.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SampledValue {
    /// Element written.
    pub target: ElementId,
    /// Property written.
    pub property: Property,
    /// Value at the sampled time.
    pub value: PropertyValue,
}

/// Ordered set of tweens sampled as a pure function of time.
///
/// For every (target, property) channel the last tween starting at or before `t`
/// decides the value; before any of them starts, the first one's `from` value is
/// rendered. Sampling is therefore deterministic and seeking backwards reproduces
/// earlier states exactly.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    tweens: Vec<Tween>,
    channels: Vec<Channel>,
    duration: f64,
    last_start: f64,
}

#[derive(Clone, Debug)]
struct Channel {
    target: ElementId,
    property: Property,
    // (start, tween index, track index), sorted by start, insertion-stable.
    entries: Vec<(f64, usize, usize)>,
}

impl Timeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total length: the latest tween end.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Tweens in insertion order.
    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// Whether nothing was added.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Every (target, property) pair this timeline writes.
    pub fn channels(&self) -> impl Iterator<Item = (&ElementId, Property)> {
        self.channels.iter().map(|c| (&c.target, c.property))
    }

    /// Whether any track must be re-resolved against layout.
    pub fn has_measured_endpoints(&self) -> bool {
        self.tweens
            .iter()
            .any(|t| t.tracks.iter().any(PropertyTrack::is_measured))
    }

    /// Add a tween animating every track from its `from` to its `to` value.
    pub fn from_to(
        mut self,
        target: impl Into<ElementId>,
        tracks: impl IntoIterator<Item = PropertyTrack>,
        duration: f64,
        ease: Ease,
        position: Position,
    ) -> SanctuaryResult<Self> {
        self.push(target.into(), tracks.into_iter().collect(), duration, ease, position)?;
        Ok(self)
    }

    fn push(
        &mut self,
        target: ElementId,
        tracks: SmallVec<[PropertyTrack; 3]>,
        duration: f64,
        ease: Ease,
        position: Position,
    ) -> SanctuaryResult<()> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(SanctuaryError::animation(
                "tween duration must be finite and >= 0",
            ));
        }
        if tracks.is_empty() {
            return Err(SanctuaryError::animation(
                "tween must animate at least one property",
            ));
        }
        for track in &tracks {
            track.validate()?;
        }

        let start = match position {
            Position::At(t) => t,
            Position::End(offset) => self.duration + offset,
            Position::WithPrevious(offset) => self.last_start + offset,
        }
        .max(0.0);

        let tween_idx = self.tweens.len();
        for (track_idx, track) in tracks.iter().enumerate() {
            let channel = match self
                .channels
                .iter_mut()
                .position(|c| c.target == target && c.property == track.property)
            {
                Some(i) => &mut self.channels[i],
                None => {
                    self.channels.push(Channel {
                        target: target.clone(),
                        property: track.property,
                        entries: Vec::new(),
                    });
                    let last = self.channels.len() - 1;
                    &mut self.channels[last]
                }
            };
            let at = channel.entries.partition_point(|&(s, _, _)| s <= start);
            channel.entries.insert(at, (start, tween_idx, track_idx));
        }

        self.tweens.push(Tween {
            target,
            tracks,
            start,
            duration,
            ease,
        });
        self.last_start = start;
        self.duration = self.duration.max(start + duration);
        Ok(())
    }

    /// Resolve measured endpoints. `measure` returns `None` when the quantity is
    /// unavailable; those tracks keep their previous resolution (or none).
    pub fn resolve(&mut self, measure: impl Fn(&Measure) -> Option<f64>) {
        let eval = |end: &Endpoint| -> Option<PropertyValue> {
            match end {
                Endpoint::Value(v) => Some(*v),
                Endpoint::Measured { measure: m, factor } => {
                    measure(m).map(|v| PropertyValue::Scalar(v * factor))
                }
            }
        };
        for tween in &mut self.tweens {
            for track in &mut tween.tracks {
                if let (Some(a), Some(b)) = (eval(&track.from), eval(&track.to)) {
                    track.resolved = Some((a, b));
                }
            }
        }
    }

    /// Sample every channel at time `t` (clamped to `[0, duration]`).
    pub fn sample(&self, t: f64) -> SanctuaryResult<Vec<SampledValue>> {
        let t = t.clamp(0.0, self.duration);
        let mut out = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            let idx = channel.entries.partition_point(|&(s, _, _)| s <= t);
            let (tween_idx, track_idx, before_start) = if idx == 0 {
                let (_, ti, ki) = channel.entries[0];
                (ti, ki, true)
            } else {
                let (_, ti, ki) = channel.entries[idx - 1];
                (ti, ki, false)
            };

            let tween = &self.tweens[tween_idx];
            let track = &tween.tracks[track_idx];
            let (from, to) = track.resolved.ok_or_else(|| {
                SanctuaryError::animation(format!(
                    "unresolved measured endpoint on {} {:?}",
                    tween.target, track.property
                ))
            })?;

            let value = if before_start {
                from
            } else {
                let eased = tween.ease.apply(tween.local_progress(t));
                PropertyValue::lerp(&from, &to, eased)
            };
            out.push(SampledValue {
                target: channel.target.clone(),
                property: channel.property,
                value,
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
