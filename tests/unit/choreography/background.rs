use super::*;

#[test]
fn sampled_progress_values_land_in_the_documented_zones() {
    let palette = Palette::default();
    let expected = [
        (0.05, palette.dark_neutral),
        (0.25, palette.cool_blue_grey),
        (0.6, palette.warm_brown),
        (0.95, palette.dark_neutral),
    ];
    for (p, color) in expected {
        assert_eq!(zone_color(p, &palette), color, "progress {p}");
    }
}

#[test]
fn zone_edges_are_half_open() {
    assert_eq!(zone_for(0.0), ColorZone::DarkNeutral);
    assert_eq!(zone_for(0.1), ColorZone::CoolBlueGrey);
    assert_eq!(zone_for(0.4), ColorZone::WarmBrown);
    assert_eq!(zone_for(0.8), ColorZone::DarkNeutral);
    assert_eq!(zone_for(1.0), ColorZone::DarkNeutral);
    assert_eq!(zone_for(f64::NAN), ColorZone::DarkNeutral);
}

#[test]
fn hook_only_emits_when_the_target_color_changes() {
    let mut hook = BackgroundHook::new(ElementId::new("page"), BackgroundConfig::default());
    assert!(hook.on_progress(0.0).is_some());
    assert!(hook.on_progress(0.05).is_none());

    let cool = hook.on_progress(0.2).unwrap();
    assert_eq!(cool.property, Property::BackgroundColor);
    assert_eq!(cool.to, PropertyValue::Color(Palette::default().cool_blue_grey));
    assert!(hook.on_progress(0.3).is_none());

    // Jumping straight from the first dark band to the last one needs no retarget.
    let mut hook = BackgroundHook::new(ElementId::new("page"), BackgroundConfig::default());
    hook.on_progress(0.0);
    assert!(hook.on_progress(0.95).is_none());
}
