use crate::foundation::error::{SanctuaryError, SanctuaryResult};

pub use kurbo::Rect;

/// Stable name of a laid-out page element (the selector a trigger or tween targets).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    /// Build an id from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Id of the `index`-th member of an indexed family (`masonry-item-3`).
    pub fn indexed(prefix: &str, index: usize) -> Self {
        Self(format!("{prefix}-{index}"))
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Visible viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl Viewport {
    /// Validated viewport; both sides must be finite and positive.
    pub fn new(width: f64, height: f64) -> SanctuaryResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(SanctuaryError::validation(
                "Viewport width and height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// `pct` percent of the viewport height (`vh` units).
    pub fn vh(self, pct: f64) -> f64 {
        self.height * pct / 100.0
    }

    /// `pct` percent of the viewport width (`vw` units).
    pub fn vw(self, pct: f64) -> f64 {
        self.width * pct / 100.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
        }
    }
}

/// Measured box of an element in document coordinates (scroll offset 0).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementBox {
    /// Border box in document coordinates.
    pub rect: Rect,
    /// Full horizontal content width; equals `rect.width()` unless the element overflows.
    pub scroll_width: f64,
}

impl ElementBox {
    /// Box without horizontal overflow.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            scroll_width: rect.width(),
        }
    }

    /// Box whose content is `scroll_width` wide (never narrower than the rect).
    pub fn with_scroll_width(rect: Rect, scroll_width: f64) -> Self {
        Self {
            rect,
            scroll_width: scroll_width.max(rect.width()),
        }
    }

    /// Document offset of the top edge.
    pub fn top(&self) -> f64 {
        self.rect.y0
    }

    /// Document offset of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.rect.y1
    }

    /// Box height.
    pub fn height(&self) -> f64 {
        self.rect.height()
    }
}

/// Direction of the most recent scroll movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScrollDirection {
    /// No movement since the last update.
    #[default]
    Idle,
    /// Toward larger offsets (down the page).
    Forward,
    /// Toward smaller offsets.
    Backward,
}

impl ScrollDirection {
    /// Direction of a move from `previous` to `current`.
    pub fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            Self::Forward
        } else if current < previous {
            Self::Backward
        } else {
            Self::Idle
        }
    }
}
