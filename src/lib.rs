//! Sanctuary drives the scroll choreography of a single-page vacation-rental site.
//!
//! The page is modeled headlessly: a composed layout of element boxes, an eased
//! virtual scroll, a scroll-timeline engine writing inline style values, and
//! playback sessions for the hero and gallery videos.
//!
//! # Frame pipeline
//!
//! 1. **Tick**: wall-clock milliseconds become ticker time (lag smoothing off by default).
//! 2. **Scroll**: the [`SmoothScroller`] eases toward its target and broadcasts the new offset.
//! 3. **Trigger**: the [`ScrollTimelineEngine`] recomputes every region's progress and
//!    renders scrubbed timelines in the same frame.
//! 4. **Advance**: toggle timelines and free tweens run on the ticker clock.
//!
//! Decorative failures (a missing element, an unplayable video) are logged and skipped;
//! only malformed configuration and engine misuse surface as [`SanctuaryError`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod choreography;
mod content;
mod engine;
mod foundation;
mod scroll;
mod site;
mod video;

/// Site configuration loaded from JSON.
pub mod config;

pub use animation::ease::Ease;
pub use animation::playhead::Playhead;
pub use animation::tween::{
    Endpoint, Lerp, Measure, Position, Property, PropertyTrack, PropertyValue, SampledValue,
    Timeline, Tween,
};
pub use choreography::background::{ColorZone, zone_color, zone_for};
pub use choreography::context::{ChoreographyContext, Group, Skipped};
pub use choreography::script::Choreography;
pub use config::{
    BackgroundConfig, GalleryConfig, Palette, ParallaxConfig, RevealConfig, SiteConfig,
    TickerConfig, ZoomConfig,
};
pub use content::ids;
pub use content::registry::{
    Booking, FlyText, FlyTextLayout, Hero, Registry, StoryPanel, Tile, TileLayout,
};
pub use engine::layout::{Document, LayoutSource};
pub use engine::scroll_timeline::{
    Bounds, PinState, ScrollTimelineEngine, TimelineEngine, TriggerHandle, Zone,
};
pub use engine::style::StyleStore;
pub use engine::trigger::{
    Crossing, Edge, FreeTween, ProgressHook, ToggleAction, ToggleActions, TriggerAction,
    TriggerEnd, TriggerMode, TriggerPosition, TriggerRegion,
};
pub use foundation::color::Rgba;
pub use foundation::core::{ElementBox, ElementId, Rect, ScrollDirection, Viewport};
pub use foundation::error::{SanctuaryError, SanctuaryResult};
pub use scroll::smooth::{
    InputDisposition, ListenerId, ScrollEvent, ScrollInput, SmoothScrollOptions, SmoothScroller,
};
pub use scroll::ticker::{LagSmoothing, Ticker, TickerFrame};
pub use site::layout::{compose_layout, gallery_columns, story_panel_width};
pub use site::page::{FrameReport, Site, TeardownReport};
pub use site::reveal::{RevealGate, RevealPhase};
pub use video::host::{AdaptiveLoader, PlaybackHost};
pub use video::session::{PlaybackMode, PlaybackRegistry};
pub use video::simulated::{SimulatedHost, SimulatedLoader};
pub use video::source::{HLS_MIME, SourceKind, SurfaceId};
