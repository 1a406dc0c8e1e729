use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::foundation::error::SanctuaryError;
use crate::video::simulated::SimulatedHost;

type Log = Rc<RefCell<Vec<String>>>;

struct MockHost {
    adaptive: bool,
    native: bool,
    fail_attach: bool,
    log: Log,
    next: usize,
}

struct MockLoader {
    id: usize,
    fail_attach: bool,
    log: Log,
}

impl MockHost {
    fn new(adaptive: bool, native: bool) -> Self {
        Self {
            adaptive,
            native,
            fail_attach: false,
            log: Rc::default(),
            next: 0,
        }
    }

    fn events(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl AdaptiveLoader for MockLoader {
    fn load_source(&mut self, url: &str) -> SanctuaryResult<()> {
        self.log.borrow_mut().push(format!("load#{} {url}", self.id));
        Ok(())
    }

    fn attach_media(&mut self, surface: &SurfaceId) -> SanctuaryResult<()> {
        if self.fail_attach {
            return Err(SanctuaryError::playback("decoder busy"));
        }
        self.log.borrow_mut().push(format!("attach#{} {surface}", self.id));
        Ok(())
    }

    fn destroy(&mut self) {
        self.log.borrow_mut().push(format!("destroy#{}", self.id));
    }
}

impl PlaybackHost for MockHost {
    type Loader = MockLoader;

    fn adaptive_supported(&self) -> bool {
        self.adaptive
    }

    fn can_play_native(&self, _surface: &SurfaceId, mime: &str) -> bool {
        self.native && mime == HLS_MIME
    }

    fn assign_source(&mut self, surface: &SurfaceId, url: &str) {
        self.log.borrow_mut().push(format!("assign {surface} {url}"));
    }

    fn clear_source(&mut self, surface: &SurfaceId) {
        self.log.borrow_mut().push(format!("clear {surface}"));
    }

    fn create_loader(&mut self) -> SanctuaryResult<MockLoader> {
        self.next += 1;
        Ok(MockLoader {
            id: self.next,
            fail_attach: self.fail_attach,
            log: Rc::clone(&self.log),
        })
    }
}

fn hero() -> SurfaceId {
    SurfaceId::new("hero-video")
}

#[test]
fn adaptive_support_wins_over_native_playback() {
    let mut reg = PlaybackRegistry::new(MockHost::new(true, true));
    assert_eq!(reg.mount(&hero(), "/hero/master.m3u8"), PlaybackMode::Adaptive);
    assert_eq!(reg.active_loaders(), 1);
    assert_eq!(
        reg.host().events(),
        ["load#1 /hero/master.m3u8", "attach#1 hero-video"]
    );
}

#[test]
fn native_manifest_support_is_the_fallback() {
    let mut reg = PlaybackRegistry::new(MockHost::new(false, true));
    assert_eq!(
        reg.mount(&hero(), "/hero/master.m3u8"),
        PlaybackMode::NativeManifest
    );
    assert_eq!(reg.active_loaders(), 0);
    assert_eq!(reg.host().events(), ["assign hero-video /hero/master.m3u8"]);
}

#[test]
fn no_capability_leaves_the_surface_empty() {
    let mut reg = PlaybackRegistry::new(MockHost::new(false, false));
    assert_eq!(
        reg.mount(&hero(), "/hero/master.m3u8"),
        PlaybackMode::Unavailable
    );
    assert!(reg.host().events().is_empty());
    assert!(reg.unmount(&hero()));
    assert!(reg.host().events().is_empty());
}

#[test]
fn plain_files_are_assigned_directly() {
    let mut reg = PlaybackRegistry::new(MockHost::new(true, false));
    assert_eq!(reg.mount(&hero(), "/collage-1.mp4"), PlaybackMode::Direct);
    assert!(reg.unmount(&hero()));
    assert_eq!(
        reg.host().events(),
        ["assign hero-video /collage-1.mp4", "clear hero-video"]
    );
}

#[test]
fn source_change_destroys_the_old_loader_before_creating_a_new_one() {
    let mut reg = PlaybackRegistry::new(MockHost::new(true, false));
    reg.mount(&hero(), "/a.m3u8");
    assert_eq!(reg.set_source(&hero(), "/a.m3u8"), PlaybackMode::Adaptive);
    reg.set_source(&hero(), "/b.m3u8");
    assert_eq!(reg.active_loaders(), 1);
    assert_eq!(reg.source(&hero()), Some("/b.m3u8"));
    assert_eq!(
        reg.host().events(),
        [
            "load#1 /a.m3u8",
            "attach#1 hero-video",
            "destroy#1",
            "load#2 /b.m3u8",
            "attach#2 hero-video",
        ]
    );
}

#[test]
fn failed_attach_is_not_retried_and_leaks_nothing() {
    let mut host = MockHost::new(true, true);
    host.fail_attach = true;
    let mut reg = PlaybackRegistry::new(host);
    assert_eq!(reg.mount(&hero(), "/a.m3u8"), PlaybackMode::Failed);
    assert_eq!(reg.active_loaders(), 0);
    assert_eq!(reg.host().events(), ["load#1 /a.m3u8", "destroy#1"]);
}

#[test]
fn destroy_all_releases_every_loader() {
    let mut reg = PlaybackRegistry::new(SimulatedHost::new(true, false));
    reg.mount(&SurfaceId::new("a"), "/a.m3u8");
    reg.mount(&SurfaceId::new("b"), "/b.m3u8");
    reg.mount(&SurfaceId::new("c"), "/c.mp4");
    assert_eq!(reg.host().live_loaders(), 2);
    assert_eq!(reg.host().assigned(&SurfaceId::new("c")), Some("/c.mp4"));

    assert_eq!(reg.destroy_all(), 2);
    assert!(reg.is_empty());
    assert_eq!(reg.host().live_loaders(), 0);
    assert_eq!(reg.host().loaders_created(), 2);
    assert_eq!(reg.host().assigned(&SurfaceId::new("c")), None);
}
