use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::{
    foundation::error::{SanctuaryError, SanctuaryResult},
    video::host::{AdaptiveLoader, PlaybackHost},
    video::source::SurfaceId,
};

#[derive(Debug, Default)]
struct Counters {
    created: usize,
    live: usize,
}

/// Headless [`PlaybackHost`] that records what a real environment would be asked to do.
#[derive(Debug, Default)]
pub struct SimulatedHost {
    adaptive: bool,
    native_manifest: bool,
    assigned: BTreeMap<SurfaceId, String>,
    counters: Rc<RefCell<Counters>>,
}

impl SimulatedHost {
    /// Host with the given capabilities: client-side adaptive loaders and native manifest playback.
    pub fn new(adaptive: bool, native_manifest: bool) -> Self {
        Self {
            adaptive,
            native_manifest,
            ..Self::default()
        }
    }

    /// Source assigned directly to `surface`, if any.
    pub fn assigned(&self, surface: &SurfaceId) -> Option<&str> {
        self.assigned.get(surface).map(String::as_str)
    }

    /// Loaders created so far.
    pub fn loaders_created(&self) -> usize {
        self.counters.borrow().created
    }

    /// Loaders created and not yet destroyed.
    pub fn live_loaders(&self) -> usize {
        self.counters.borrow().live
    }
}

impl PlaybackHost for SimulatedHost {
    type Loader = SimulatedLoader;

    fn adaptive_supported(&self) -> bool {
        self.adaptive
    }

    fn can_play_native(&self, _surface: &SurfaceId, mime: &str) -> bool {
        self.native_manifest && mime == crate::video::source::HLS_MIME
    }

    fn assign_source(&mut self, surface: &SurfaceId, url: &str) {
        self.assigned.insert(surface.clone(), url.to_owned());
    }

    fn clear_source(&mut self, surface: &SurfaceId) {
        self.assigned.remove(surface);
    }

    fn create_loader(&mut self) -> SanctuaryResult<SimulatedLoader> {
        if !self.adaptive {
            return Err(SanctuaryError::playback("adaptive loaders are not supported"));
        }
        {
            let mut c = self.counters.borrow_mut();
            c.created += 1;
            c.live += 1;
        }
        Ok(SimulatedLoader {
            surface: None,
            destroyed: false,
            counters: Rc::clone(&self.counters),
        })
    }
}

/// Loader handed out by [`SimulatedHost`].
#[derive(Debug)]
pub struct SimulatedLoader {
    surface: Option<SurfaceId>,
    destroyed: bool,
    counters: Rc<RefCell<Counters>>,
}

impl AdaptiveLoader for SimulatedLoader {
    fn load_source(&mut self, _url: &str) -> SanctuaryResult<()> {
        if self.destroyed {
            return Err(SanctuaryError::playback("loader already destroyed"));
        }
        Ok(())
    }

    fn attach_media(&mut self, surface: &SurfaceId) -> SanctuaryResult<()> {
        if self.destroyed {
            return Err(SanctuaryError::playback("loader already destroyed"));
        }
        if self.surface.is_some() {
            return Err(SanctuaryError::playback("loader already attached"));
        }
        self.surface = Some(surface.clone());
        Ok(())
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.surface = None;
        self.counters.borrow_mut().live -= 1;
    }
}
