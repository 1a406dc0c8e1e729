use super::*;
use crate::animation::tween::{Endpoint, Measure, Position, PropertyTrack};
use crate::engine::layout::Document;
use crate::engine::trigger::{ToggleActions, TriggerPosition};
use crate::foundation::color::Rgba;
use crate::foundation::core::{Rect, Viewport};

fn doc() -> Document {
    let mut d = Document::new(Viewport::new(1_000.0, 800.0).unwrap());
    d.insert("hero", ElementBox::new(Rect::new(0.0, 0.0, 1_000.0, 800.0)));
    d.insert("tile", ElementBox::new(Rect::new(0.0, 2_000.0, 400.0, 2_300.0)));
    d.insert(
        "track",
        ElementBox::with_scroll_width(Rect::new(0.0, 3_000.0, 1_000.0, 3_800.0), 3_000.0),
    );
    d
}

fn opacity_timeline(target: &str, from: f64, to: f64, duration: f64) -> Timeline {
    Timeline::new()
        .from_to(
            target,
            [PropertyTrack::new(Property::Opacity, from, to)],
            duration,
            Ease::Linear,
            Position::At(0.0),
        )
        .unwrap()
}

fn opacity(engine: &ScrollTimelineEngine, target: &str) -> f64 {
    engine
        .styles()
        .scalar(&ElementId::new(target), Property::Opacity)
}

#[test]
fn scrub_progress_is_clamped_linear_and_invertible() {
    let layout = doc();
    let mut e = ScrollTimelineEngine::new();
    let region = TriggerRegion::new("hero", "top top", "bottom top", TriggerMode::Scrub).unwrap();
    let h = e
        .register(
            region,
            TriggerAction::timeline(opacity_timeline("hero", 1.0, 0.0, 1.0)),
            &layout,
        )
        .unwrap();
    assert_eq!(e.bounds(h), Some(Bounds { start: 0.0, end: 800.0 }));

    let mut last = -1.0;
    for p in [-100.0, 0.0, 200.0, 400.0, 799.0, 800.0, 1_200.0] {
        e.update(p);
        let progress = e.progress(h).unwrap();
        assert!(progress >= last);
        assert_eq!(progress, ((p - 0.0) / 800.0_f64).clamp(0.0, 1.0));
        last = progress;
    }

    e.update(200.0);
    let at_200 = opacity(&e, "hero");
    e.update(700.0);
    e.update(200.0);
    assert_eq!(opacity(&e, "hero"), at_200);
    assert!((at_200 - 0.75).abs() < 1e-12);
}

#[test]
fn toggle_plays_forward_on_enter_and_reverses_on_leave_back() {
    let layout = doc();
    let mut e = ScrollTimelineEngine::new();
    let region = TriggerRegion::new(
        "tile",
        "top 100%",
        "top 80%",
        TriggerMode::Toggle(ToggleActions::PLAY_THEN_REVERSE),
    )
    .unwrap();
    let h = e
        .register(
            region,
            TriggerAction::timeline(opacity_timeline("tile", 0.0, 1.0, 1.0)),
            &layout,
        )
        .unwrap();
    // Hidden immediately at registration.
    assert_eq!(opacity(&e, "tile"), 0.0);
    assert_eq!(e.bounds(h), Some(Bounds { start: 1_200.0, end: 1_360.0 }));

    e.update(1_250.0);
    assert_eq!(e.zone(h), Some(Zone::Active));
    e.advance(0.5);
    assert!((opacity(&e, "tile") - 0.5).abs() < 1e-12);
    // Scroll speed does not matter: playback runs on the clock.
    e.update(5_000.0);
    e.advance(0.5);
    assert!((opacity(&e, "tile") - 1.0).abs() < 1e-12);

    // Back above the start: reverse.
    e.update(1_000.0);
    assert_eq!(e.zone(h), Some(Zone::Before));
    e.advance(0.25);
    assert!((opacity(&e, "tile") - 0.75).abs() < 1e-12);
    e.advance(1.0);
    assert_eq!(opacity(&e, "tile"), 0.0);
}

#[test]
fn pinned_region_reserves_space_for_regions_below() {
    let layout = doc();
    let mut e = ScrollTimelineEngine::new();
    let pin = TriggerRegion::new("hero", "top top", "+=2000", TriggerMode::Observe)
        .unwrap()
        .pinned();
    e.register(pin, TriggerAction::default(), &layout).unwrap();
    let tile = TriggerRegion::new("tile", "top 100%", "top 80%", TriggerMode::Observe).unwrap();
    let th = e.register(tile, TriggerAction::default(), &layout).unwrap();

    assert_eq!(e.pin_spacing(), 2_000.0);
    assert_eq!(e.bounds(th), Some(Bounds { start: 3_200.0, end: 3_360.0 }));

    e.update(500.0);
    let pin_state = e.pin_state(&ElementId::new("hero")).unwrap();
    assert!(pin_state.active);
    assert_eq!(pin_state.offset, 500.0);

    e.update(2_500.0);
    let pin_state = e.pin_state(&ElementId::new("hero")).unwrap();
    assert!(!pin_state.active);
    assert_eq!(pin_state.offset, 2_000.0);
}

#[test]
fn refresh_recomputes_measured_end_and_values() {
    let mut layout = doc();
    let mut e = ScrollTimelineEngine::new();
    let measure = Measure::TrackOverflow(ElementId::new("track"));
    let region = TriggerRegion {
        anchor: ElementId::new("track"),
        start: TriggerPosition::TOP_TOP,
        end: TriggerEnd::Measured(measure.clone()),
        pin: true,
        mode: TriggerMode::Scrub,
    };
    let tl = Timeline::new()
        .from_to(
            "track",
            [PropertyTrack::new(
                Property::TranslateX,
                0.0,
                Endpoint::Measured {
                    measure,
                    factor: -1.0,
                },
            )],
            1.0,
            Ease::Linear,
            Position::At(0.0),
        )
        .unwrap();
    let h = e
        .register(region, TriggerAction::timeline(tl), &layout)
        .unwrap();
    assert_eq!(e.bounds(h), Some(Bounds { start: 3_000.0, end: 5_000.0 }));

    e.update(4_000.0);
    let tx = |e: &ScrollTimelineEngine| e.styles().scalar(&ElementId::new("track"), Property::TranslateX);
    assert_eq!(tx(&e), -1_000.0);
    assert_eq!(e.progress(h), Some(0.5));

    layout.set_scroll_width(&ElementId::new("track"), 5_000.0);
    e.refresh(&layout);
    assert_eq!(e.bounds(h), Some(Bounds { start: 3_000.0, end: 7_000.0 }));
    assert_eq!(e.progress(h), Some(0.25));
    assert_eq!(tx(&e), -1_000.0);
    assert_eq!(e.pin_spacing(), 4_000.0);

    e.update(7_000.0);
    assert_eq!(tx(&e), -4_000.0);
}

#[test]
fn missing_anchor_is_rejected_without_side_effects() {
    let layout = doc();
    let mut e = ScrollTimelineEngine::new();
    let region = TriggerRegion::new("ghost", "top top", "bottom top", TriggerMode::Scrub).unwrap();
    let err = e.register(
        region,
        TriggerAction::timeline(opacity_timeline("ghost", 0.0, 1.0, 1.0)),
        &layout,
    );
    assert!(err.is_err());
    assert_eq!(e.region_count(), 0);
    assert!(e.styles().is_empty());
}

#[test]
fn scrub_without_timeline_is_rejected() {
    let layout = doc();
    let mut e = ScrollTimelineEngine::new();
    let region = TriggerRegion::new("hero", "top top", "bottom top", TriggerMode::Scrub).unwrap();
    assert!(e.register(region, TriggerAction::default(), &layout).is_err());
}

#[test]
fn revert_clears_written_styles_and_pin_spacing() {
    let layout = doc();
    let mut e = ScrollTimelineEngine::new();
    let region = TriggerRegion::new("hero", "top top", "+=1000", TriggerMode::Scrub)
        .unwrap()
        .pinned();
    let h = e
        .register(
            region,
            TriggerAction::timeline(opacity_timeline("hero", 1.0, 0.0, 1.0)),
            &layout,
        )
        .unwrap();
    e.update(500.0);
    assert!(!e.styles().is_empty());
    assert!(e.revert(h));
    assert!(!e.revert(h));
    assert!(e.styles().is_empty());
    assert_eq!(e.region_count(), 0);
    assert_eq!(e.pin_spacing(), 0.0);
}

#[test]
fn progress_hook_tweens_overwrite_in_flight_tweens() {
    let layout = doc();
    let mut e = ScrollTimelineEngine::new();
    let page = ElementId::new("hero");
    let red = Rgba::from_rgb8(255, 0, 0);
    let blue = Rgba::from_rgb8(0, 0, 255);
    e.set(&page, Property::BackgroundColor, PropertyValue::Color(Rgba::from_rgb8(0, 0, 0)));

    let target = page.clone();
    let region = TriggerRegion::new("hero", "top top", "bottom top", TriggerMode::Observe).unwrap();
    let h = e
        .register(
            region,
            TriggerAction::on_update(move |p| {
                Some(FreeTween {
                    target: target.clone(),
                    property: Property::BackgroundColor,
                    to: PropertyValue::Color(if p < 0.5 { red } else { blue }),
                    duration: 1.0,
                    ease: Ease::Linear,
                })
            }),
            &layout,
        )
        .unwrap();
    assert_eq!(e.running_tweens(), 1);

    e.advance(0.5);
    e.update(600.0);
    // The red tween was replaced, not queued.
    assert_eq!(e.running_tweens(), 1);
    e.advance(1.0);
    assert_eq!(e.running_tweens(), 0);
    assert_eq!(e.styles().color(&page, Property::BackgroundColor), Some(blue));

    assert!(e.revert(h));
    assert_eq!(e.styles().color(&page, Property::BackgroundColor), None);
}
