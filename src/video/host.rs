use crate::{foundation::error::SanctuaryResult, video::source::SurfaceId};

/// Client-side adaptive streaming instance bound to at most one surface.
///
/// Segment fetching, buffering and bitrate selection happen behind this trait.
pub trait AdaptiveLoader {
    /// Start fetching the manifest at `url`.
    fn load_source(&mut self, url: &str) -> SanctuaryResult<()>;

    /// Bind to `surface`. A loader attaches at most once.
    fn attach_media(&mut self, surface: &SurfaceId) -> SanctuaryResult<()>;

    /// Stop network activity and release decoder resources. Must be idempotent.
    fn destroy(&mut self);
}

/// The environment playback surfaces live in.
pub trait PlaybackHost {
    /// Adaptive loader type this host creates.
    type Loader: AdaptiveLoader;

    /// Whether client-side adaptive loaders can run here at all.
    fn adaptive_supported(&self) -> bool;

    /// Whether the surface itself can play `mime` without a loader.
    fn can_play_native(&self, surface: &SurfaceId, mime: &str) -> bool;

    /// Point `surface` straight at `url`.
    fn assign_source(&mut self, surface: &SurfaceId, url: &str);

    /// Remove whatever source `surface` has.
    fn clear_source(&mut self, surface: &SurfaceId);

    /// New unattached loader.
    fn create_loader(&mut self) -> SanctuaryResult<Self::Loader>;
}
