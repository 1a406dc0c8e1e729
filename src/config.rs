use std::path::Path;

use anyhow::Context as _;

use crate::{
    animation::ease::Ease,
    foundation::color::{Rgba, serialize_hex},
    foundation::core::Viewport,
    foundation::error::{SanctuaryError, SanctuaryResult},
    scroll::smooth::SmoothScrollOptions,
    scroll::ticker::LagSmoothing,
};

/// Frame clock settings.
#[derive(Clone, Copy, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    /// `None` disables lag smoothing so long stalls are not stretched out.
    pub lag_smoothing: Option<LagSmoothing>,
}

/// Loading overlay reveal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Seconds to wait after both readiness signals before fading.
    pub grace_delay_s: f64,
    /// Seconds the overlay takes to fade out.
    pub fade_duration_s: f64,
    /// Fade curve.
    pub ease: Ease,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            grace_delay_s: 0.5,
            fade_duration_s: 1.5,
            ease: Ease::InOutQuad,
        }
    }
}

/// Gallery tile entrance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Vertical offset (px) tiles slide up from.
    pub offset_px: f64,
    /// Seconds the entrance takes.
    pub duration_s: f64,
    /// Entrance curve.
    pub ease: Ease,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            offset_px: 100.0,
            duration_s: 1.0,
            ease: Ease::OutQuart,
        }
    }
}

/// Header title parallax.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Title offset, in percent of its height, once the header has scrolled out.
    pub y_percent: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { y_percent: -50.0 }
    }
}

/// Pinned zoom hero.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Scroll distance the zoom hero stays pinned for.
    pub pin_distance_px: f64,
    /// Final scale of the foreground image.
    pub foreground_scale: f64,
    /// Timeline units each fly-text phrase overlaps the previous one.
    pub text_overlap: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            pin_distance_px: 6_000.0,
            foreground_scale: 50.0,
            text_overlap: 0.5,
        }
    }
}

/// Page background colors of the horizontal story section.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Start and end of the track.
    #[serde(serialize_with = "serialize_hex")]
    pub dark_neutral: Rgba,
    /// Early panels.
    #[serde(serialize_with = "serialize_hex")]
    pub cool_blue_grey: Rgba,
    /// Middle panels.
    #[serde(serialize_with = "serialize_hex")]
    pub warm_brown: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            dark_neutral: Rgba::from_rgb8(0x1a, 0x1a, 0x1a),
            cool_blue_grey: Rgba::from_rgb8(0x2c, 0x3e, 0x50),
            warm_brown: Rgba::from_rgb8(0x3e, 0x27, 0x23),
        }
    }
}

/// Page background transitions over the story track.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Zone colors.
    pub palette: Palette,
    /// Seconds each zone-to-zone color change takes.
    pub transition_s: f64,
    /// Transition curve.
    pub ease: Ease,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            transition_s: 0.6,
            ease: Ease::OutQuad,
        }
    }
}

/// Everything tunable about the page, loadable from JSON with every field optional.
#[derive(Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Virtual scroll tuning.
    pub smooth_scroll: SmoothScrollOptions,
    /// Frame clock.
    pub ticker: TickerConfig,
    /// Loading overlay.
    pub reveal: RevealConfig,
    /// Tile entrances.
    pub gallery: GalleryConfig,
    /// Title parallax.
    pub parallax: ParallaxConfig,
    /// Zoom hero.
    pub zoom: ZoomConfig,
    /// Color zones.
    pub background: BackgroundConfig,
    /// Initial viewport.
    pub viewport: Viewport,
}

fn positive(name: &str, v: f64) -> SanctuaryResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(SanctuaryError::validation(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

fn finite(name: &str, v: f64) -> SanctuaryResult<()> {
    if !v.is_finite() {
        return Err(SanctuaryError::validation(format!("{name} must be finite")));
    }
    Ok(())
}

fn color(name: &str, c: Rgba) -> SanctuaryResult<()> {
    if [c.r, c.g, c.b, c.a]
        .iter()
        .any(|ch| !ch.is_finite() || !(0.0..=1.0).contains(ch))
    {
        return Err(SanctuaryError::validation(format!(
            "{name} channels must be within [0, 1]"
        )));
    }
    Ok(())
}

impl SiteConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json_str(s: &str) -> SanctuaryResult<Self> {
        let config: Self =
            serde_json::from_str(s).map_err(|e| SanctuaryError::serde(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn from_path(path: &Path) -> SanctuaryResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Reject non-finite or non-positive tuning and out-of-range colors.
    pub fn validate(&self) -> SanctuaryResult<()> {
        self.smooth_scroll.validate()?;
        if let Some(lag) = self.ticker.lag_smoothing {
            positive("ticker.lag_smoothing.threshold_ms", lag.threshold_ms)?;
            positive("ticker.lag_smoothing.adjusted_lag_ms", lag.adjusted_lag_ms)?;
        }

        if !self.reveal.grace_delay_s.is_finite() || self.reveal.grace_delay_s < 0.0 {
            return Err(SanctuaryError::validation(
                "reveal.grace_delay_s must be finite and >= 0",
            ));
        }
        positive("reveal.fade_duration_s", self.reveal.fade_duration_s)?;

        finite("gallery.offset_px", self.gallery.offset_px)?;
        positive("gallery.duration_s", self.gallery.duration_s)?;
        finite("parallax.y_percent", self.parallax.y_percent)?;

        positive("zoom.pin_distance_px", self.zoom.pin_distance_px)?;
        positive("zoom.foreground_scale", self.zoom.foreground_scale)?;
        if !self.zoom.text_overlap.is_finite() || !(0.0..2.0).contains(&self.zoom.text_overlap) {
            return Err(SanctuaryError::validation(
                "zoom.text_overlap must be within [0, 2)",
            ));
        }

        let palette = &self.background.palette;
        color("background.palette.dark_neutral", palette.dark_neutral)?;
        color("background.palette.cool_blue_grey", palette.cool_blue_grey)?;
        color("background.palette.warm_brown", palette.warm_brown)?;
        positive("background.transition_s", self.background.transition_s)?;

        positive("viewport.width", self.viewport.width)?;
        positive("viewport.height", self.viewport.height)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
