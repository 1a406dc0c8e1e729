use crate::foundation::core::ElementId;

/// A playback surface is addressed like any other element.
pub type SurfaceId = ElementId;

/// MIME type probed on the surface before assigning a manifest natively.
pub const HLS_MIME: &str = "application/vnd.apple.mpegurl";

/// How a source reference has to be played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Segmented stream manifest (`.m3u8`); needs a loader or native support.
    AdaptiveManifest,
    /// Plain video file assigned straight to the surface.
    Progressive,
}

impl SourceKind {
    /// Classify by path extension, ignoring any query string or fragment.
    pub fn classify(url: &str) -> Self {
        let path = url
            .split(['?', '#'])
            .next()
            .unwrap_or(url)
            .trim_end_matches('/');
        let is_manifest = path
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("m3u8"));
        if is_manifest {
            Self::AdaptiveManifest
        } else {
            Self::Progressive
        }
    }
}
