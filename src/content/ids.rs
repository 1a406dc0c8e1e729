//! Element names shared by the page layout and the choreography.

use crate::foundation::core::ElementId;

/// Document root; carries the background color.
pub const PAGE: &str = "page";
/// Full-screen loading overlay.
pub const HAZE_OVERLAY: &str = "haze-overlay";
/// Header background video surface.
pub const HERO_VIDEO: &str = "hero-video";

/// Header section.
pub const HEADER: &str = "header-section";
/// Header title.
pub const MAIN_TITLE: &str = "main-title";

/// Pinned zoom hero section.
pub const ZOOM_SECTION: &str = "zoom-hero";
/// "Scroll" hint at the bottom of the zoom hero.
pub const SCROLL_INDICATOR: &str = "scroll-indicator";
/// Window frame image over the zoom hero.
pub const WINDOW_OVERLAY: &str = "window-overlay";
/// Foreground image scaled through during the zoom.
pub const ZOOM_FOREGROUND: &str = "zoom-foreground";
/// Prefix of the fly-through phrases.
pub const FLY_TEXT: &str = "fly-text";

/// Masonry gallery section.
pub const GALLERY: &str = "gallery";
/// Prefix of the gallery tiles.
pub const TILE: &str = "masonry-item";

/// Pinned story section.
pub const HORIZONTAL_SECTION: &str = "horizontal-section";
/// Sideways-translated row of story panels.
pub const HORIZONTAL_TRACK: &str = "horizontal-track";
/// Prefix of the story panels.
pub const STORY_PANEL: &str = "story-panel";

/// Booking section.
pub const BOOKING: &str = "booking";

/// Id of a single named element.
pub fn id(name: &str) -> ElementId {
    ElementId::new(name)
}

/// The `index`-th gallery tile.
pub fn tile(index: usize) -> ElementId {
    ElementId::indexed(TILE, index)
}

/// The `index`-th fly-through phrase.
pub fn fly_text(index: usize) -> ElementId {
    ElementId::indexed(FLY_TEXT, index)
}

/// The `index`-th story panel.
pub fn story_panel(index: usize) -> ElementId {
    ElementId::indexed(STORY_PANEL, index)
}

/// Playback surface of the `index`-th gallery tile.
pub fn tile_video(index: usize) -> ElementId {
    ElementId::new(format!("{TILE}-{index}-video"))
}
