use std::collections::BTreeMap;

use crate::{
    foundation::error::SanctuaryResult,
    video::host::{AdaptiveLoader, PlaybackHost},
    video::source::{HLS_MIME, SourceKind, SurfaceId},
};

/// How a surface ended up playing its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// A client-side adaptive loader drives the surface.
    Adaptive,
    /// The surface plays the manifest natively.
    NativeManifest,
    /// Plain file assigned directly.
    Direct,
    /// Neither a loader nor native support; the surface stays empty.
    Unavailable,
    /// Loader setup failed. Not retried.
    Failed,
}

struct Session<L> {
    source: String,
    mode: PlaybackMode,
    loader: Option<L>,
}

/// Playback sessions keyed by surface, with at most one live loader per surface.
pub struct PlaybackRegistry<H: PlaybackHost> {
    host: H,
    sessions: BTreeMap<SurfaceId, Session<H::Loader>>,
}

impl<H: PlaybackHost> std::fmt::Debug for PlaybackRegistry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackRegistry")
            .field("sessions", &self.sessions.len())
            .field("active_loaders", &self.active_loaders())
            .finish()
    }
}

impl<H: PlaybackHost> PlaybackRegistry<H> {
    /// Registry with no sessions.
    pub fn new(host: H) -> Self {
        Self {
            host,
            sessions: BTreeMap::new(),
        }
    }

    /// The playback environment.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Number of mounted surfaces.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no surface is mounted.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// How `surface` is playing, if mounted.
    pub fn mode(&self, surface: &SurfaceId) -> Option<PlaybackMode> {
        self.sessions.get(surface).map(|s| s.mode)
    }

    /// Source mounted on `surface`.
    pub fn source(&self, surface: &SurfaceId) -> Option<&str> {
        self.sessions.get(surface).map(|s| s.source.as_str())
    }

    /// Surfaces currently driven by a loader.
    pub fn active_loaders(&self) -> usize {
        self.sessions.values().filter(|s| s.loader.is_some()).count()
    }

    /// Start playback of `source` on `surface`, replacing whatever was there.
    #[tracing::instrument(skip(self), fields(surface = %surface))]
    pub fn mount(&mut self, surface: &SurfaceId, source: &str) -> PlaybackMode {
        self.unmount(surface);

        let (mode, loader) = match SourceKind::classify(source) {
            SourceKind::Progressive => {
                self.host.assign_source(surface, source);
                (PlaybackMode::Direct, None)
            }
            SourceKind::AdaptiveManifest if self.host.adaptive_supported() => {
                match self.start_loader(surface, source) {
                    Ok(loader) => (PlaybackMode::Adaptive, Some(loader)),
                    Err(err) => {
                        tracing::warn!(%err, source, "adaptive playback failed");
                        (PlaybackMode::Failed, None)
                    }
                }
            }
            SourceKind::AdaptiveManifest if self.host.can_play_native(surface, HLS_MIME) => {
                self.host.assign_source(surface, source);
                (PlaybackMode::NativeManifest, None)
            }
            SourceKind::AdaptiveManifest => {
                tracing::warn!(source, "no adaptive playback available");
                (PlaybackMode::Unavailable, None)
            }
        };
        tracing::debug!(?mode, "playback mounted");
        self.sessions.insert(
            surface.clone(),
            Session {
                source: source.to_owned(),
                mode,
                loader,
            },
        );
        mode
    }

    fn start_loader(&mut self, surface: &SurfaceId, source: &str) -> SanctuaryResult<H::Loader> {
        let mut loader = self.host.create_loader()?;
        let attached = loader
            .load_source(source)
            .and_then(|()| loader.attach_media(surface));
        if let Err(err) = attached {
            loader.destroy();
            return Err(err);
        }
        Ok(loader)
    }

    /// Switch a surface to a new source. An unchanged source keeps the running session.
    pub fn set_source(&mut self, surface: &SurfaceId, source: &str) -> PlaybackMode {
        match self.sessions.get(surface) {
            Some(s) if s.source == source => s.mode,
            _ => self.mount(surface, source),
        }
    }

    /// Tear down the surface's session. Returns `false` if nothing was mounted.
    pub fn unmount(&mut self, surface: &SurfaceId) -> bool {
        let Some(mut session) = self.sessions.remove(surface) else {
            return false;
        };
        match session.loader.take() {
            Some(mut loader) => loader.destroy(),
            None => {
                if matches!(
                    session.mode,
                    PlaybackMode::Direct | PlaybackMode::NativeManifest
                ) {
                    self.host.clear_source(surface);
                }
            }
        }
        tracing::debug!(surface = %surface, "playback unmounted");
        true
    }

    /// Unmount every surface. Returns how many loaders were destroyed.
    pub fn destroy_all(&mut self) -> usize {
        let loaders = self.active_loaders();
        let surfaces: Vec<SurfaceId> = self.sessions.keys().cloned().collect();
        for surface in &surfaces {
            self.unmount(surface);
        }
        loaders
    }
}

#[cfg(test)]
#[path = "../../tests/unit/video/session.rs"]
mod tests;
