use super::*;

fn scalar(samples: &[SampledValue], target: &str, property: Property) -> f64 {
    samples
        .iter()
        .find(|s| s.target.as_str() == target && s.property == property)
        .and_then(|s| s.value.as_scalar())
        .unwrap()
}

fn fade(from: f64, to: f64) -> PropertyTrack {
    PropertyTrack::new(Property::Opacity, from, to)
}

#[test]
fn end_position_chains_back_to_back_with_overlap() {
    let tl = Timeline::new()
        .from_to("a", [fade(0.0, 1.0)], 2.0, Ease::Linear, Position::End(0.0))
        .unwrap()
        .from_to("b", [fade(0.0, 1.0)], 2.0, Ease::Linear, Position::End(-0.5))
        .unwrap()
        .from_to("c", [fade(0.0, 1.0)], 1.0, Ease::Linear, Position::WithPrevious(0.0))
        .unwrap();
    let starts: Vec<f64> = tl.tweens().iter().map(|t| t.start).collect();
    assert_eq!(starts, vec![0.0, 1.5, 1.5]);
    assert_eq!(tl.duration(), 3.5);
}

#[test]
fn before_first_tween_renders_from_value() {
    let tl = Timeline::new()
        .from_to(
            "x",
            [PropertyTrack::new(Property::Scale, 0.5, 1.0)],
            1.0,
            Ease::Linear,
            Position::At(2.0),
        )
        .unwrap();
    let s = tl.sample(0.0).unwrap();
    assert_eq!(scalar(&s, "x", Property::Scale), 0.5);
    let s = tl.sample(2.5).unwrap();
    assert_eq!(scalar(&s, "x", Property::Scale), 0.75);
}

#[test]
fn later_tween_on_same_channel_takes_over() {
    let tl = Timeline::new()
        .from_to(
            "t",
            [PropertyTrack::new(Property::Opacity, 0.0, 1.0)],
            1.0,
            Ease::Linear,
            Position::End(0.0),
        )
        .unwrap()
        .from_to(
            "t",
            [PropertyTrack::new(Property::Opacity, 1.0, 0.0)],
            1.0,
            Ease::Linear,
            Position::End(0.0),
        )
        .unwrap();
    assert_eq!(scalar(&tl.sample(0.5).unwrap(), "t", Property::Opacity), 0.5);
    assert_eq!(scalar(&tl.sample(1.0).unwrap(), "t", Property::Opacity), 1.0);
    assert_eq!(scalar(&tl.sample(1.5).unwrap(), "t", Property::Opacity), 0.5);
    assert_eq!(scalar(&tl.sample(2.0).unwrap(), "t", Property::Opacity), 0.0);
}

#[test]
fn seeking_back_reproduces_values() {
    let tl = Timeline::new()
        .from_to(
            "t",
            [
                PropertyTrack::new(Property::Scale, 1.0, 50.0),
                PropertyTrack::new(Property::BlurPx, 0.0, 10.0),
            ],
            2.0,
            Ease::InOutCubic,
            Position::At(0.0),
        )
        .unwrap();
    let first = tl.sample(0.73).unwrap();
    let _ = tl.sample(1.9).unwrap();
    let again = tl.sample(0.73).unwrap();
    assert_eq!(first, again);
}

#[test]
fn measured_endpoints_require_resolution() {
    let mut tl = Timeline::new()
        .from_to(
            "track",
            [PropertyTrack::new(
                Property::TranslateX,
                0.0,
                Endpoint::Measured {
                    measure: Measure::TrackOverflow(ElementId::new("track")),
                    factor: -1.0,
                },
            )],
            1.0,
            Ease::Linear,
            Position::At(0.0),
        )
        .unwrap();
    assert!(tl.has_measured_endpoints());
    assert!(tl.sample(0.5).is_err());

    tl.resolve(|_| Some(1200.0));
    assert_eq!(
        scalar(&tl.sample(0.5).unwrap(), "track", Property::TranslateX),
        -600.0
    );

    tl.resolve(|_| Some(2000.0));
    assert_eq!(
        scalar(&tl.sample(1.0).unwrap(), "track", Property::TranslateX),
        -2000.0
    );
}

#[test]
fn mismatched_endpoint_kinds_are_rejected() {
    let err = Timeline::new().from_to(
        "bg",
        [PropertyTrack::new(Property::BackgroundColor, 0.0, 1.0)],
        1.0,
        Ease::Linear,
        Position::At(0.0),
    );
    assert!(err.is_err());

    let err = Timeline::new().from_to("x", Vec::<PropertyTrack>::new(), 1.0, Ease::Linear, Position::At(0.0));
    assert!(err.is_err());
}
