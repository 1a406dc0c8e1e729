use super::*;
use crate::config::Palette;
use crate::engine::layout::Document;
use crate::engine::scroll_timeline::{Bounds, ScrollTimelineEngine};
use crate::foundation::core::Viewport;
use crate::site::layout::compose_layout;

fn page() -> (Registry, Document) {
    let registry = Registry::builtin();
    let doc = compose_layout(&registry, Viewport::default());
    (registry, doc)
}

fn bounds(e: &ScrollTimelineEngine, ctx: &ChoreographyContext, group: Group) -> Bounds {
    let h = ctx.handles(group).next().unwrap();
    e.bounds(h).unwrap()
}

fn scalar(e: &ScrollTimelineEngine, id: &ElementId, p: Property) -> f64 {
    e.styles().scalar(id, p)
}

#[test]
fn full_page_registers_every_group() {
    let (registry, doc) = page();
    let mut e = ScrollTimelineEngine::new();
    let ctx = Choreography::mount(&mut e, &doc, &registry, &SiteConfig::default()).unwrap();

    assert!(ctx.skipped().is_empty());
    assert_eq!(ctx.handles(Group::GalleryEntrance).count(), 9);
    assert_eq!(ctx.handles(Group::TitleParallax).count(), 1);
    assert_eq!(ctx.handles(Group::ZoomHero).count(), 1);
    assert_eq!(ctx.handles(Group::HorizontalTrack).count(), 1);
    assert_eq!(ctx.handles(Group::Background).count(), 1);
    assert_eq!(e.region_count(), 13);

    // Tiles start hidden and offset.
    assert_eq!(scalar(&e, &ids::tile(0), Property::Opacity), 0.0);
    assert_eq!(scalar(&e, &ids::tile(0), Property::TranslateY), 100.0);
}

#[test]
fn revert_releases_everything() {
    let (registry, doc) = page();
    let mut e = ScrollTimelineEngine::new();
    let mut ctx = Choreography::mount(&mut e, &doc, &registry, &SiteConfig::default()).unwrap();
    e.update(8_000.0);
    e.advance(1.0);

    assert_eq!(ctx.revert(&mut e), 13);
    assert!(ctx.is_empty());
    assert_eq!(e.region_count(), 0);
    assert!(e.styles().is_empty());
    assert_eq!(e.pin_spacing(), 0.0);
    assert_eq!(ctx.revert(&mut e), 0);
}

#[test]
fn absent_elements_are_skipped_not_fatal() {
    let (registry, mut doc) = page();
    doc.remove(&ElementId::new(ids::MAIN_TITLE));
    doc.remove(&ids::tile(3));
    doc.remove(&ids::fly_text(2));

    let mut e = ScrollTimelineEngine::new();
    let ctx = Choreography::mount(&mut e, &doc, &registry, &SiteConfig::default()).unwrap();
    let skipped: Vec<&ElementId> = ctx.skipped().iter().map(|s| &s.element).collect();
    assert_eq!(
        skipped,
        [&ids::tile(3), &ElementId::new(ids::MAIN_TITLE), &ids::fly_text(2)]
    );
    assert_eq!(ctx.handles(Group::GalleryEntrance).count(), 8);
    assert_eq!(ctx.handles(Group::TitleParallax).count(), 0);
    // The zoom hero still runs with the remaining phrases.
    assert_eq!(ctx.handles(Group::ZoomHero).count(), 1);
    assert!(e.styles().get(&ids::fly_text(2), Property::Opacity).is_none());
}

#[test]
fn zoom_sequence_overlaps_consecutive_phrases() {
    let (registry, doc) = page();
    let mut e = ScrollTimelineEngine::new();
    let ctx = Choreography::mount(&mut e, &doc, &registry, &SiteConfig::default()).unwrap();
    let b = bounds(&e, &ctx, Group::ZoomHero);
    assert_eq!(b.end - b.start, 6_000.0);
    // Intro (2 units) plus four 2-unit cycles overlapping by 0.5.
    let duration = 8.5;
    let at = |t: f64| b.start + (b.end - b.start) * t / duration;

    assert_eq!(scalar(&e, &ids::fly_text(0), Property::Opacity), 0.0);
    assert_eq!(scalar(&e, &ElementId::new(ids::SCROLL_INDICATOR), Property::Opacity), 1.0);

    e.update(at(3.75));
    let first = scalar(&e, &ids::fly_text(0), Property::Opacity);
    let second = scalar(&e, &ids::fly_text(1), Property::Opacity);
    assert!(first > 0.0 && first < 1.0, "first phrase exiting: {first}");
    assert!(second > 0.0 && second < 1.0, "second phrase entering: {second}");
    assert_eq!(scalar(&e, &ids::fly_text(3), Property::Opacity), 0.0);

    e.update(b.end);
    let fg = ElementId::new(ids::ZOOM_FOREGROUND);
    assert_eq!(scalar(&e, &fg, Property::Scale), 50.0);
    assert_eq!(scalar(&e, &fg, Property::Opacity), 0.0);
    for i in 0..4 {
        assert_eq!(scalar(&e, &ids::fly_text(i), Property::Opacity), 0.0);
        assert_eq!(scalar(&e, &ids::fly_text(i), Property::Scale), 3.0);
    }

    e.update(b.end + 1.0);
    let pin = e.pin_state(&ElementId::new(ids::ZOOM_SECTION)).unwrap();
    assert!(!pin.active);
    assert_eq!(pin.offset, 6_000.0);
}

#[test]
fn horizontal_track_translates_and_recolors_the_page() {
    let (registry, doc) = page();
    let mut e = ScrollTimelineEngine::new();
    let ctx = Choreography::mount(&mut e, &doc, &registry, &SiteConfig::default()).unwrap();
    let track = bounds(&e, &ctx, Group::HorizontalTrack);
    assert_eq!(bounds(&e, &ctx, Group::Background), track);

    let section = doc.element(&ElementId::new(ids::HORIZONTAL_SECTION)).unwrap();
    assert_eq!(track.start, section.top() + 6_000.0);
    let overflow = doc
        .measure(&Measure::TrackOverflow(ElementId::new(ids::HORIZONTAL_TRACK)))
        .unwrap();
    assert!((track.end - track.start - overflow).abs() < 1e-9);

    let page_id = ElementId::new(ids::PAGE);
    let palette = Palette::default();
    let track_id = ElementId::new(ids::HORIZONTAL_TRACK);

    e.update(track.start + overflow * 0.25);
    assert!((scalar(&e, &track_id, Property::TranslateX) + overflow * 0.25).abs() < 1e-9);
    e.advance(1.0);
    assert_eq!(
        e.styles().color(&page_id, Property::BackgroundColor),
        Some(palette.cool_blue_grey)
    );

    e.update(track.start + overflow * 0.6);
    e.advance(1.0);
    let bg = e.styles().color(&page_id, Property::BackgroundColor).unwrap();
    assert!(bg.approx_eq(palette.warm_brown, 1e-12));

    e.update(track.end);
    assert_eq!(scalar(&e, &track_id, Property::TranslateX), -overflow);
}
