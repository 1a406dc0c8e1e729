use super::*;

#[test]
fn empty_json_yields_defaults() {
    let c = SiteConfig::from_json_str("{}").unwrap();
    assert_eq!(c, SiteConfig::default());
    assert_eq!(c.smooth_scroll.duration_s, 1.2);
    assert_eq!(c.smooth_scroll.touch_multiplier, 2.0);
    assert_eq!(c.ticker.lag_smoothing, None);
    assert_eq!(c.gallery.offset_px, 100.0);
    assert_eq!(c.zoom.foreground_scale, 50.0);
}

#[test]
fn palette_accepts_hex_and_serializes_back_to_hex() {
    let c = SiteConfig::from_json_str(
        r##"{"background": {"palette": {"warm_brown": "#5d4037"}, "transition_s": 0.4}}"##,
    )
    .unwrap();
    assert_eq!(c.background.palette.warm_brown, Rgba::from_rgb8(0x5d, 0x40, 0x37));
    assert_eq!(c.background.palette.dark_neutral, Palette::default().dark_neutral);
    assert_eq!(c.background.transition_s, 0.4);

    let json = serde_json::to_value(c).unwrap();
    assert_eq!(json["background"]["palette"]["warm_brown"], "#5d4037");
}

#[test]
fn eases_accept_snake_case_and_power_aliases() {
    let c = SiteConfig::from_json_str(
        r#"{"gallery": {"ease": "power2.inOut"}, "reveal": {"ease": "out_cubic"}}"#,
    )
    .unwrap();
    assert_eq!(c.gallery.ease, Ease::InOutCubic);
    assert_eq!(c.reveal.ease, Ease::OutCubic);

    let json = serde_json::to_value(c).unwrap();
    assert_eq!(json["gallery"]["ease"], "in_out_cubic");
    assert!(SiteConfig::from_json_str(r#"{"gallery": {"ease": "bounce.out"}}"#).is_err());
}

#[test]
fn bad_hex_color_is_rejected() {
    let err = SiteConfig::from_json_str(r##"{"background": {"palette": {"dark_neutral": "#zz0000"}}}"##)
        .unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn non_positive_durations_are_rejected() {
    for json in [
        r#"{"smooth_scroll": {"duration_s": 0}}"#,
        r#"{"reveal": {"fade_duration_s": -1}}"#,
        r#"{"gallery": {"duration_s": 0}}"#,
        r#"{"zoom": {"pin_distance_px": 0}}"#,
        r#"{"ticker": {"lag_smoothing": {"threshold_ms": 0, "adjusted_lag_ms": 33}}}"#,
    ] {
        let err = SiteConfig::from_json_str(json).unwrap_err();
        assert!(err.to_string().contains("validation error:"), "{json}: {err}");
    }
}

#[test]
fn overlap_must_leave_each_phrase_some_time() {
    let mut c = SiteConfig::default();
    c.zoom.text_overlap = 2.0;
    assert!(c.validate().is_err());
    c.zoom.text_overlap = 0.0;
    c.validate().unwrap();
}

#[test]
fn missing_file_mentions_the_path() {
    let err = SiteConfig::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}
