use std::str::FromStr;

use crate::foundation::error::SanctuaryError;

/// Easing functions used to map normalized animation progress.
///
/// Names follow the polynomial degree; the `power{n}` aliases accepted by
/// [`Ease::from_str`] map `power1` to quad, `power2` to cubic and `power3` to quart.
/// Both spellings deserialize; serialization always uses the snake_case name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Ease {
    /// Constant rate (`none`).
    Linear,
    /// `t^2`.
    InQuad,
    /// `1 - (1 - t)^2`.
    OutQuad,
    /// Quadratic in, then out.
    InOutQuad,
    /// `t^3`.
    InCubic,
    /// `1 - (1 - t)^3`.
    OutCubic,
    /// Cubic in, then out.
    InOutCubic,
    /// `t^4`.
    InQuart,
    /// `1 - (1 - t)^4`.
    OutQuart,
    /// Quartic in, then out.
    InOutQuart,
    /// Exponential ease-out clamped to 1: `min(1, 1.001 - 2^(-10t))`.
    ///
    /// Note `apply(0.0)` is `0.001`, not `0.0`; the curve never starts exactly at rest.
    ExpoOutClamped,
}

impl Ease {
    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
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
            Self::InQuart => t.powi(4),
            Self::OutQuart => 1.0 - (1.0 - t).powi(4),
            Self::InOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(4) / 2.0)
                }
            }
            Self::ExpoOutClamped => (1.001 - 2f64.powf(-10.0 * t)).min(1.0),
        }
    }
}

impl FromStr for Ease {
    type Err = SanctuaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ease = match s.trim().to_ascii_lowercase().as_str() {
            "none" | "linear" => Self::Linear,
            "power1.in" | "in_quad" => Self::InQuad,
            "power1.out" | "power1" | "out_quad" => Self::OutQuad,
            "power1.inout" | "in_out_quad" => Self::InOutQuad,
            "power2.in" | "in_cubic" => Self::InCubic,
            "power2.out" | "power2" | "out_cubic" => Self::OutCubic,
            "power2.inout" | "in_out_cubic" => Self::InOutCubic,
            "power3.in" | "in_quart" => Self::InQuart,
            "power3.out" | "power3" | "out_quart" => Self::OutQuart,
            "power3.inout" | "in_out_quart" => Self::InOutQuart,
            "expo.out.clamped" | "expo_out_clamped" => Self::ExpoOutClamped,
            other => {
                return Err(SanctuaryError::animation(format!(
                    "unknown ease \"{other}\""
                )));
            }
        };
        Ok(ease)
    }
}

impl TryFrom<String> for Ease {
    type Error = SanctuaryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
