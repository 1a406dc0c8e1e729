use crate::{
    animation::tween::{Property, PropertyValue},
    config::{BackgroundConfig, Palette},
    engine::trigger::FreeTween,
    foundation::color::Rgba,
    foundation::core::ElementId,
};

/// Background band of the horizontal story section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorZone {
    /// Start and end of the track.
    DarkNeutral,
    /// Early panels.
    CoolBlueGrey,
    /// Middle panels.
    WarmBrown,
}

/// `[0, 0.1)` dark, `[0.1, 0.4)` cool, `[0.4, 0.8)` warm, `[0.8, 1]` dark again.
pub fn zone_for(progress: f64) -> ColorZone {
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };
    if p < 0.1 {
        ColorZone::DarkNeutral
    } else if p < 0.4 {
        ColorZone::CoolBlueGrey
    } else if p < 0.8 {
        ColorZone::WarmBrown
    } else {
        ColorZone::DarkNeutral
    }
}

impl Palette {
    /// Configured color of `zone`.
    pub fn color(&self, zone: ColorZone) -> Rgba {
        match zone {
            ColorZone::DarkNeutral => self.dark_neutral,
            ColorZone::CoolBlueGrey => self.cool_blue_grey,
            ColorZone::WarmBrown => self.warm_brown,
        }
    }
}

/// Target background color for a horizontal-track progress value.
pub fn zone_color(progress: f64, palette: &Palette) -> Rgba {
    palette.color(zone_for(progress))
}

/// Progress hook retargeting the page background whenever the zone color changes.
#[derive(Clone, Debug)]
pub(crate) struct BackgroundHook {
    target: ElementId,
    config: BackgroundConfig,
    current: Option<Rgba>,
}

impl BackgroundHook {
    pub(crate) fn new(target: ElementId, config: BackgroundConfig) -> Self {
        Self {
            target,
            config,
            current: None,
        }
    }

    pub(crate) fn on_progress(&mut self, progress: f64) -> Option<FreeTween> {
        let color = zone_color(progress, &self.config.palette);
        if self.current == Some(color) {
            return None;
        }
        self.current = Some(color);
        Some(FreeTween {
            target: self.target.clone(),
            property: Property::BackgroundColor,
            to: PropertyValue::Color(color),
            duration: self.config.transition_s,
            ease: self.config.ease,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/background.rs"]
mod tests;
