use crate::{
    animation::ease::Ease,
    animation::tween::{Endpoint, Measure, Position, Property, PropertyTrack, Timeline},
    choreography::background::BackgroundHook,
    choreography::context::{ChoreographyContext, Group},
    config::SiteConfig,
    content::ids,
    content::registry::Registry,
    engine::layout::LayoutSource,
    engine::scroll_timeline::TimelineEngine,
    engine::trigger::{
        ToggleActions, TriggerAction, TriggerEnd, TriggerMode, TriggerPosition, TriggerRegion,
    },
    foundation::core::ElementId,
    foundation::error::SanctuaryResult,
};

/// Declares every scroll-driven animation of the page against a [`TimelineEngine`].
#[derive(Debug)]
pub struct Choreography;

impl Choreography {
    /// Register all trigger groups whose elements are laid out.
    ///
    /// Absent elements are skipped and recorded in the returned context. Any other
    /// failure reverts what was already registered before returning the error.
    #[tracing::instrument(skip_all, fields(tiles = registry.tiles.len()))]
    pub fn mount<E: TimelineEngine + ?Sized>(
        engine: &mut E,
        layout: &dyn LayoutSource,
        registry: &Registry,
        config: &SiteConfig,
    ) -> SanctuaryResult<ChoreographyContext> {
        let mut ctx = ChoreographyContext::default();
        let mut mounter = Mounter {
            engine: &mut *engine,
            layout,
            config,
            ctx: &mut ctx,
        };
        let result = mounter
            .gallery_entrance(registry)
            .and_then(|()| mounter.title_parallax())
            .and_then(|()| mounter.zoom_hero(registry))
            .and_then(|()| mounter.horizontal_track());
        if let Err(err) = result {
            ctx.revert(engine);
            return Err(err);
        }
        tracing::debug!(
            regions = ctx.len(),
            skipped = ctx.skipped().len(),
            "choreography mounted"
        );
        Ok(ctx)
    }
}

struct Mounter<'a, E: ?Sized> {
    engine: &'a mut E,
    layout: &'a dyn LayoutSource,
    config: &'a SiteConfig,
    ctx: &'a mut ChoreographyContext,
}

impl<E: TimelineEngine + ?Sized> Mounter<'_, E> {
    fn present(&mut self, group: Group, id: &ElementId) -> bool {
        if self.layout.contains(id) {
            return true;
        }
        self.ctx.skip(group, id.clone());
        false
    }

    fn register(
        &mut self,
        group: Group,
        region: TriggerRegion,
        action: TriggerAction,
    ) -> SanctuaryResult<()> {
        let handle = self.engine.register(region, action, self.layout)?;
        self.ctx.push(group, handle);
        Ok(())
    }

    fn gallery_entrance(&mut self, registry: &Registry) -> SanctuaryResult<()> {
        let cfg = self.config.gallery;
        for i in 0..registry.tiles.len() {
            let tile = ids::tile(i);
            if !self.present(Group::GalleryEntrance, &tile) {
                continue;
            }
            let timeline = Timeline::new().from_to(
                tile.clone(),
                [
                    PropertyTrack::new(Property::Opacity, 0.0, 1.0),
                    PropertyTrack::new(Property::TranslateY, cfg.offset_px, 0.0),
                ],
                cfg.duration_s,
                cfg.ease,
                Position::At(0.0),
            )?;
            let region = TriggerRegion::new(
                tile,
                "top 100%",
                "top 80%",
                TriggerMode::Toggle(ToggleActions::PLAY_THEN_REVERSE),
            )?;
            self.register(
                Group::GalleryEntrance,
                region,
                TriggerAction::timeline(timeline),
            )?;
        }
        Ok(())
    }

    fn title_parallax(&mut self) -> SanctuaryResult<()> {
        let header = ids::id(ids::HEADER);
        let title = ids::id(ids::MAIN_TITLE);
        if !self.present(Group::TitleParallax, &header) || !self.present(Group::TitleParallax, &title)
        {
            return Ok(());
        }
        let timeline = Timeline::new().from_to(
            title,
            [
                PropertyTrack::new(Property::YPercent, 0.0, self.config.parallax.y_percent),
                PropertyTrack::new(Property::Opacity, 1.0, 0.0),
            ],
            1.0,
            Ease::Linear,
            Position::At(0.0),
        )?;
        let region = TriggerRegion::new(header, "top top", "bottom top", TriggerMode::Scrub)?;
        self.register(
            Group::TitleParallax,
            region,
            TriggerAction::timeline(timeline),
        )
    }

    /// One pinned scrub timeline: intro fades, the fly-through, then the text cycles.
    fn zoom_hero(&mut self, registry: &Registry) -> SanctuaryResult<()> {
        let section = ids::id(ids::ZOOM_SECTION);
        if !self.present(Group::ZoomHero, &section) {
            return Ok(());
        }
        let cfg = self.config.zoom;
        let mut tl = Timeline::new();

        let indicator = ids::id(ids::SCROLL_INDICATOR);
        if self.present(Group::ZoomHero, &indicator) {
            tl = tl.from_to(
                indicator,
                [PropertyTrack::new(Property::Opacity, 1.0, 0.0)],
                0.5,
                Ease::Linear,
                Position::At(0.0),
            )?;
        }

        let overlay = ids::id(ids::WINDOW_OVERLAY);
        if self.present(Group::ZoomHero, &overlay) {
            tl = tl.from_to(
                overlay,
                [
                    PropertyTrack::new(Property::Scale, 1.0, 1.5),
                    PropertyTrack::new(Property::BlurPx, 0.0, 20.0),
                    PropertyTrack::new(Property::Opacity, 1.0, 0.0),
                ],
                1.5,
                Ease::InCubic,
                Position::At(0.0),
            )?;
        }

        let foreground = ids::id(ids::ZOOM_FOREGROUND);
        if self.present(Group::ZoomHero, &foreground) {
            tl = tl
                .from_to(
                    foreground.clone(),
                    [
                        PropertyTrack::new(Property::Scale, 1.0, cfg.foreground_scale),
                        PropertyTrack::new(Property::BlurPx, 0.0, 10.0),
                    ],
                    2.0,
                    Ease::InCubic,
                    Position::At(0.0),
                )?
                .from_to(
                    foreground,
                    [PropertyTrack::new(Property::Opacity, 1.0, 0.0)],
                    0.5,
                    Ease::Linear,
                    Position::At(1.5),
                )?;
        }

        for i in 0..registry.fly_texts.len() {
            let text = ids::fly_text(i);
            if !self.present(Group::ZoomHero, &text) {
                continue;
            }
            let lead_in = if i == 0 { 0.0 } else { -cfg.text_overlap };
            tl = tl
                .from_to(
                    text.clone(),
                    [
                        PropertyTrack::new(Property::Scale, 0.5, 1.0),
                        PropertyTrack::new(Property::Opacity, 0.0, 1.0),
                        PropertyTrack::new(Property::BlurPx, 10.0, 0.0),
                    ],
                    1.0,
                    Ease::OutQuad,
                    Position::End(lead_in),
                )?
                .from_to(
                    text,
                    [
                        PropertyTrack::new(Property::Scale, 1.0, 3.0),
                        PropertyTrack::new(Property::Opacity, 1.0, 0.0),
                        PropertyTrack::new(Property::BlurPx, 0.0, 20.0),
                    ],
                    1.0,
                    Ease::InQuad,
                    Position::End(0.0),
                )?;
        }

        if tl.is_empty() {
            tracing::warn!("zoom hero has nothing to animate");
            return Ok(());
        }
        let region = TriggerRegion {
            anchor: section,
            start: TriggerPosition::TOP_TOP,
            end: TriggerEnd::Distance(cfg.pin_distance_px),
            pin: true,
            mode: TriggerMode::Scrub,
        };
        self.register(Group::ZoomHero, region, TriggerAction::timeline(tl))
    }

    /// Pinned track translation plus the background color zones over the same range.
    fn horizontal_track(&mut self) -> SanctuaryResult<()> {
        let section = ids::id(ids::HORIZONTAL_SECTION);
        let track = ids::id(ids::HORIZONTAL_TRACK);
        if !self.present(Group::HorizontalTrack, &section)
            || !self.present(Group::HorizontalTrack, &track)
        {
            return Ok(());
        }
        let overflow = Measure::TrackOverflow(track.clone());
        let timeline = Timeline::new().from_to(
            track,
            [PropertyTrack::new(
                Property::TranslateX,
                0.0,
                Endpoint::Measured {
                    measure: overflow.clone(),
                    factor: -1.0,
                },
            )],
            1.0,
            Ease::Linear,
            Position::At(0.0),
        )?;
        let region = TriggerRegion {
            anchor: section,
            start: TriggerPosition::TOP_TOP,
            end: TriggerEnd::Measured(overflow),
            pin: true,
            mode: TriggerMode::Scrub,
        };
        self.register(
            Group::HorizontalTrack,
            region.clone(),
            TriggerAction::timeline(timeline),
        )?;

        let page = ids::id(ids::PAGE);
        if !self.present(Group::Background, &page) {
            return Ok(());
        }
        let mut hook = BackgroundHook::new(page, self.config.background);
        let colors = TriggerRegion {
            pin: false,
            mode: TriggerMode::Observe,
            ..region
        };
        self.register(
            Group::Background,
            colors,
            TriggerAction::on_update(move |p| hook.on_progress(p)),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/choreography/script.rs"]
mod tests;
