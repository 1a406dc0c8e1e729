use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{SanctuaryError, SanctuaryResult};

/// Grid footprint of a gallery tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileLayout {
    /// One column, square.
    Square,
    /// Two columns, 16:9.
    Wide,
    /// One column spanning two rows, 9:16.
    Tall,
}

impl TileLayout {
    /// Columns the tile occupies.
    pub fn col_span(self) -> usize {
        match self {
            Self::Wide => 2,
            Self::Square | Self::Tall => 1,
        }
    }

    /// Width over height.
    pub fn aspect(self) -> f64 {
        match self {
            Self::Square => 1.0,
            Self::Wide => 16.0 / 9.0,
            Self::Tall => 9.0 / 16.0,
        }
    }
}

/// One gallery entry. Order in the registry is display order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tile {
    /// Text card.
    Text {
        /// Card heading.
        title: String,
        /// Card copy.
        body: String,
        /// Grid footprint.
        layout: TileLayout,
    },
    /// Image or video card.
    Media {
        /// Static file path or adaptive stream manifest URL.
        source: String,
        /// Caption and accessible name.
        label: String,
        /// Grid footprint.
        layout: TileLayout,
    },
}

impl Tile {
    /// Grid footprint.
    pub fn layout(&self) -> TileLayout {
        match self {
            Self::Text { layout, .. } | Self::Media { layout, .. } => *layout,
        }
    }

    /// Media reference of a media tile.
    pub fn media_source(&self) -> Option<&str> {
        match self {
            Self::Media { source, .. } => Some(source),
            Self::Text { .. } => None,
        }
    }
}

/// Horizontal alignment of a fly-through phrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlyTextLayout {
    /// Centered.
    Center,
    /// Left-aligned.
    Left,
    /// Right-aligned.
    Right,
}

/// Phrase revealed while flying through the zoom hero.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlyText {
    /// Lines shown stacked.
    pub lines: Vec<String>,
    /// Alignment.
    pub layout: FlyTextLayout,
}

/// Panel on the horizontally scrolling story track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StoryPanel {
    /// Panel title.
    pub heading: String,
    /// Panel copy.
    pub body: String,
}

/// Header content.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hero {
    /// Main title, the target of the parallax.
    pub title: String,
    /// Line under the title.
    pub subtitle: String,
    /// Hero background sequence, usually an adaptive manifest.
    pub video: String,
}

/// Call to action; the booking flow itself lives at `url`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Booking {
    /// Section heading.
    pub heading: String,
    /// Button label.
    pub cta_label: String,
    /// External booking URL.
    pub url: String,
}

/// Every content descriptor the page is built from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Registry {
    /// Header content.
    pub hero: Hero,
    /// Gallery tiles in display order.
    pub tiles: Vec<Tile>,
    /// Zoom hero phrases in reveal order.
    pub fly_texts: Vec<FlyText>,
    /// Story track panels, left to right.
    pub story_panels: Vec<StoryPanel>,
    /// Closing call to action.
    pub booking: Booking,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn text(title: &str, body: &str, layout: TileLayout) -> Tile {
    Tile::Text {
        title: title.to_owned(),
        body: body.to_owned(),
        layout,
    }
}

fn media(source: &str, label: &str, layout: TileLayout) -> Tile {
    Tile::Media {
        source: source.to_owned(),
        label: label.to_owned(),
        layout,
    }
}

fn fly(lines: &[&str], layout: FlyTextLayout) -> FlyText {
    FlyText {
        lines: lines.iter().map(|l| (*l).to_owned()).collect(),
        layout,
    }
}

fn panel(heading: &str, body: &str) -> StoryPanel {
    StoryPanel {
        heading: heading.to_owned(),
        body: body.to_owned(),
    }
}

impl Registry {
    /// The site's shipped content.
    pub fn builtin() -> Self {
        use TileLayout::{Square, Tall, Wide};

        Self {
            hero: Hero {
                title: "HIDDEN".to_owned(),
                subtitle: "Icelandic Sanctuary".to_owned(),
                video: "/streams/hero/master.m3u8".to_owned(),
            },
            tiles: vec![
                text(
                    "The Beginning",
                    "A collection of moments frozen in time.",
                    Square,
                ),
                media("/streams/timeless/master.m3u8", "Timeless", Wide),
                media("/collage-2.mp4", "Aurora", Tall),
                media("/streams/arrival/master.m3u8", "Arrival", Wide),
                text(
                    "Silence",
                    "In the quiet of the highlands, the world speaks.",
                    Square,
                ),
                media("/collage-3.mp4", "Stillness", Tall),
                media("/collage-1.mp4", "Horizons", Wide),
                text(
                    "Light",
                    "Chasing the midnight sun across the lava fields.",
                    Square,
                ),
                media("/flytowards.mp4", "Journey", Wide),
            ],
            fly_texts: vec![
                fly(&["Beyond the glass"], FlyTextLayout::Center),
                fly(&["the land", "holds its breath"], FlyTextLayout::Left),
                fly(&["fire beneath", "ice above"], FlyTextLayout::Right),
                fly(&["welcome", "to the edge"], FlyTextLayout::Center),
            ],
            story_panels: vec![
                panel("Arrive", "Gravel roads give way to moss and silence."),
                panel("Settle", "Wool, cedar and a window onto the fjord."),
                panel("Wander", "Black sand beaches an hour from the door."),
                panel("Rest", "The midnight sun sets late and rises early."),
            ],
            booking: Booking {
                heading: "Book Your Stay".to_owned(),
                cta_label: "Reserve Now".to_owned(),
                url: "https://example.com/book".to_owned(),
            },
        }
    }

    /// Parse and validate a registry from JSON.
    pub fn from_json_str(s: &str) -> SanctuaryResult<Self> {
        let registry: Self =
            serde_json::from_str(s).map_err(|e| SanctuaryError::serde(e.to_string()))?;
        registry.validate()?;
        Ok(registry)
    }

    /// Read, parse and validate a registry file.
    pub fn from_path(path: &Path) -> SanctuaryResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read registry '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Media sources must be non-empty; text tiles need a title and phrases need text.
    pub fn validate(&self) -> SanctuaryResult<()> {
        if self.hero.video.trim().is_empty() {
            return Err(SanctuaryError::validation("hero video source is empty"));
        }
        for (i, tile) in self.tiles.iter().enumerate() {
            match tile {
                Tile::Text { title, .. } if title.trim().is_empty() => {
                    return Err(SanctuaryError::validation(format!(
                        "tile {i}: text tile needs a title"
                    )));
                }
                Tile::Media { source, .. } if source.trim().is_empty() => {
                    return Err(SanctuaryError::validation(format!(
                        "tile {i}: media tile needs a source"
                    )));
                }
                _ => {}
            }
        }
        for (i, f) in self.fly_texts.iter().enumerate() {
            if f.lines.is_empty() || f.lines.iter().all(|l| l.trim().is_empty()) {
                return Err(SanctuaryError::validation(format!(
                    "fly text {i} has no lines"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/registry.rs"]
mod tests;
