use std::{cell::Cell, rc::Rc};

use crate::{
    animation::tween::{Property, PropertyValue},
    choreography::context::ChoreographyContext,
    choreography::script::Choreography,
    config::SiteConfig,
    content::ids,
    content::registry::{Booking, Registry},
    engine::layout::{Document, LayoutSource},
    engine::scroll_timeline::{ScrollTimelineEngine, TimelineEngine},
    foundation::core::Viewport,
    foundation::error::SanctuaryResult,
    scroll::smooth::{InputDisposition, ScrollInput, SmoothScroller},
    scroll::ticker::{Ticker, TickerFrame},
    site::layout::compose_layout,
    site::reveal::{RevealGate, RevealPhase},
    video::host::PlaybackHost,
    video::session::PlaybackRegistry,
    video::source::SurfaceId,
};

/// What one call to [`Site::frame`] did.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameReport {
    /// Ticker state for this frame.
    pub frame: TickerFrame,
    /// Virtual scroll offset the engine saw this frame.
    pub scroll: f64,
    /// Whether a new scroll offset was applied.
    pub scrolled: bool,
    /// Loading overlay opacity implied by the reveal.
    pub overlay_opacity: f64,
    /// Reveal phase at this frame.
    pub reveal: RevealPhase,
}

/// Resources released by [`Site::unmount`], in release order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct TeardownReport {
    /// Scroll listeners dropped.
    pub listeners_released: usize,
    /// Trigger regions killed.
    pub regions_reverted: usize,
    /// Adaptive loaders destroyed.
    pub loaders_destroyed: usize,
}

/// The mounted page: layout, scroll, choreography, playback and reveal wired together.
pub struct Site<H: PlaybackHost> {
    config: SiteConfig,
    registry: Registry,
    layout: Document,
    engine: ScrollTimelineEngine,
    scroller: SmoothScroller,
    ticker: Ticker,
    choreography: ChoreographyContext,
    playback: PlaybackRegistry<H>,
    reveal: RevealGate,
    pending_scroll: Rc<Cell<Option<f64>>>,
    mounted: bool,
}

impl<H: PlaybackHost> std::fmt::Debug for Site<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("engine", &self.engine)
            .field("scroller", &self.scroller)
            .field("playback", &self.playback)
            .field("mounted", &self.mounted)
            .finish()
    }
}

impl<H: PlaybackHost> Site<H> {
    /// Build the page for `config` and start every collaborator.
    ///
    /// Fails on invalid config or content; missing elements only skip their animations.
    #[tracing::instrument(skip_all, fields(viewport = ?config.viewport))]
    pub fn mount(config: SiteConfig, registry: Registry, host: H) -> SanctuaryResult<Self> {
        config.validate()?;
        registry.validate()?;

        let layout = compose_layout(&registry, config.viewport);
        let mut engine = ScrollTimelineEngine::new();
        engine.set(
            &ids::id(ids::HAZE_OVERLAY),
            Property::Opacity,
            PropertyValue::Scalar(1.0),
        );
        let choreography = Choreography::mount(&mut engine, &layout, &registry, &config)?;

        let mut scroller = SmoothScroller::new(config.smooth_scroll, 0.0)?;
        scroller.set_limit(scroll_limit(&layout, &engine));
        let pending_scroll = Rc::new(Cell::new(None));
        let sink = Rc::clone(&pending_scroll);
        scroller.on_scroll(move |event| sink.set(Some(event.scroll)));

        let mut playback = PlaybackRegistry::new(host);
        let hero = ids::id(ids::HERO_VIDEO);
        if layout.contains(&hero) {
            playback.mount(&hero, &registry.hero.video);
        }
        for (i, tile) in registry.tiles.iter().enumerate() {
            let surface = ids::tile_video(i);
            if let Some(source) = tile.media_source()
                && layout.contains(&surface)
            {
                playback.mount(&surface, source);
            }
        }

        tracing::debug!(
            regions = engine.region_count(),
            surfaces = playback.len(),
            "site mounted"
        );
        Ok(Self {
            ticker: Ticker::new(config.ticker.lag_smoothing),
            reveal: RevealGate::new(config.reveal),
            config,
            registry,
            layout,
            engine,
            scroller,
            choreography,
            playback,
            pending_scroll,
            mounted: true,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Content the page was built from.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Booking call to action.
    pub fn booking(&self) -> &Booking {
        &self.registry.booking
    }

    /// Composed layout.
    pub fn layout(&self) -> &Document {
        &self.layout
    }

    /// Mutable access for content-size changes; follow with [`Site::refresh`].
    pub fn layout_mut(&mut self) -> &mut Document {
        &mut self.layout
    }

    /// The scroll-timeline engine.
    pub fn engine(&self) -> &ScrollTimelineEngine {
        &self.engine
    }

    /// The smooth scroller.
    pub fn scroller(&self) -> &SmoothScroller {
        &self.scroller
    }

    /// Regions the choreography owns.
    pub fn choreography(&self) -> &ChoreographyContext {
        &self.choreography
    }

    /// Video sessions.
    pub fn playback(&self) -> &PlaybackRegistry<H> {
        &self.playback
    }

    /// Loading overlay gate.
    pub fn reveal(&self) -> &RevealGate {
        &self.reveal
    }

    /// `false` once [`Site::unmount`] ran.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Run one animation frame at wall-clock `now_ms`.
    ///
    /// Order: ticker, smooth scroll, trigger progress, clock-driven playback, reveal.
    pub fn frame(&mut self, now_ms: f64) -> Option<FrameReport> {
        if !self.mounted {
            return None;
        }
        let frame = self.ticker.tick(now_ms);
        self.scroller.raf(frame.time_s * 1000.0);
        let scrolled = match self.pending_scroll.take() {
            Some(scroll) => {
                self.engine.update(scroll);
                true
            }
            None => false,
        };
        self.engine.advance(frame.delta_s);

        let now_s = now_ms / 1000.0;
        let reveal = self.reveal.phase(now_s);
        let overlay_opacity = self.reveal.overlay_opacity(now_s);
        if reveal != RevealPhase::Waiting {
            self.engine.set(
                &ids::id(ids::HAZE_OVERLAY),
                Property::Opacity,
                PropertyValue::Scalar(overlay_opacity),
            );
        }
        tracing::trace!(frame = frame.frame, scroll = self.engine.scroll(), "frame");
        Some(FrameReport {
            frame,
            scroll: self.engine.scroll(),
            scrolled,
            overlay_opacity,
            reveal,
        })
    }

    /// Forward a raw scroll input to the smooth scroller.
    pub fn input(&mut self, input: ScrollInput) -> InputDisposition {
        self.scroller.input(input)
    }

    /// Ease (or jump) the virtual scroll to `target`.
    pub fn scroll_to(&mut self, target: f64, immediate: bool) {
        self.scroller.scroll_to(target, immediate);
    }

    /// Recompose the page for a new viewport and re-measure every trigger.
    pub fn resize(&mut self, viewport: Viewport) {
        self.config.viewport = viewport;
        self.layout = compose_layout(&self.registry, viewport);
        self.refresh();
    }

    /// Re-measure triggers against the current layout and update the scroll limit.
    #[tracing::instrument(skip(self))]
    pub fn refresh(&mut self) {
        if !self.mounted {
            return;
        }
        self.engine.refresh(&self.layout);
        self.scroller
            .set_limit(scroll_limit(&self.layout, &self.engine));
        // Offsets queued before the limit changed are stale.
        self.pending_scroll.take();
        let scroll = self.scroller.scroll();
        if scroll != self.engine.scroll() {
            self.engine.update(scroll);
        }
    }

    /// The document finished loading.
    pub fn page_loaded(&mut self, now_ms: f64) {
        tracing::debug!(now_ms, "page loaded");
        self.reveal.page_loaded(now_ms / 1000.0);
    }

    /// A surface decoded its first frame. Only the hero video gates the reveal.
    pub fn first_frame(&mut self, surface: &SurfaceId, now_ms: f64) -> bool {
        if surface.as_str() != ids::HERO_VIDEO {
            return false;
        }
        tracing::debug!(now_ms, "hero video first frame");
        self.reveal.first_frame(now_ms / 1000.0);
        true
    }

    /// Tear down: stop scrolling, revert every trigger, then destroy every loader.
    #[tracing::instrument(skip(self))]
    pub fn unmount(&mut self) -> TeardownReport {
        if !self.mounted {
            return TeardownReport::default();
        }
        self.mounted = false;
        let listeners_released = self.scroller.listener_count();
        self.scroller.destroy();
        let regions_reverted = self.choreography.revert(&mut self.engine);
        let loaders_destroyed = self.playback.destroy_all();
        let report = TeardownReport {
            listeners_released,
            regions_reverted,
            loaders_destroyed,
        };
        tracing::debug!(?report, "site unmounted");
        report
    }
}

/// Maximum virtual scroll: natural height plus pin spacing, minus one viewport.
fn scroll_limit(layout: &Document, engine: &ScrollTimelineEngine) -> f64 {
    (layout.height() + engine.pin_spacing() - layout.viewport().height).max(0.0)
}
