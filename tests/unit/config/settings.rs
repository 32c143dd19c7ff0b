use super::*;
use serde_json::json;

#[test]
fn empty_object_yields_defaults() {
    let s = Settings::from_json_str("{}").unwrap();
    assert_eq!(s, Settings::default());
    assert_eq!(s.resolution_step, 10);
    assert_eq!(s.group_min, 3);
    assert_eq!(s.group_max, 6);
    assert_eq!(s.fill_color, ColorSpec::from("#3498db"));
    assert_eq!(s.sand_color, ColorSpec::from("#111111"));
}

#[test]
fn omitted_keys_take_defaults() {
    let s = Settings::from_json_str(r#"{"waveSpeed": 1.5, "fillEnabled": true}"#).unwrap();
    assert_eq!(s.wave_speed, 1.5);
    assert!(s.fill_enabled);
    assert_eq!(s.wave_distance, 120.0);
    assert_eq!(s.occlusion_strength, 80.0);
}

#[test]
fn malformed_json_falls_back_to_defaults() {
    assert!(Settings::from_json_str("{not json").is_err());
    assert_eq!(Settings::from_json_str_or_default("{not json"), Settings::default());
    assert_eq!(
        Settings::from_json_str_or_default(r#"{"groupMin": "three"}"#),
        Settings::default()
    );
}

#[test]
fn values_are_clamped_into_range() {
    let s = Settings::from_json_str(
        r#"{"resolutionStep": 0, "waveDistance": 1, "groupMin": 8, "groupMax": 2, "sandDensity": 90000}"#,
    )
    .unwrap();
    assert_eq!(s.resolution_step, 5);
    assert_eq!(s.wave_distance, 50.0);
    assert_eq!(s.group_min, 8);
    assert_eq!(s.group_max, 8);
    assert_eq!(s.sand_density, 5000);
}

#[test]
fn legacy_random_flag_promotes_single_mode() {
    let s = Settings::from_json_str(r#"{"fillRandomMode": true}"#).unwrap();
    assert_eq!(s.fill_color_mode, FillColorMode::Random);
    assert!(s.fill_random_mode);

    let s = Settings::from_json_str(r#"{"fillColorMode": "rainbow", "fillRandomMode": true}"#)
        .unwrap();
    assert_eq!(s.fill_color_mode, FillColorMode::Rainbow);
    assert!(!s.fill_random_mode);
}

#[test]
fn legacy_solid_flag_maps_to_fade_to_white() {
    let s = Settings::from_json_str(r#"{"fillSolid": true}"#).unwrap();
    assert_eq!(s.fill_gradient_type, GradientTarget::FadeToWhite);

    let s = Settings::from_json_str(r#"{"fillSolid": true, "fillGradientType": "solid_black"}"#)
        .unwrap();
    assert_eq!(s.fill_gradient_type, GradientTarget::FadeToBlack);
    assert!(s.fill_solid);

    let s = Settings::from_json_str(r#"{"fillGradientType": "fadeToBlack"}"#).unwrap();
    assert!(s.fill_solid);
}

#[test]
fn merge_overlays_only_given_keys() {
    let base = Settings::default();
    let next = base
        .merged(&json!({"direction": 45, "sandColor": "tan"}))
        .unwrap();
    assert_eq!(next.direction, 45.0);
    assert_eq!(next.sand_color, ColorSpec::from("tan"));
    assert_eq!(next.wave_amplitude, base.wave_amplitude);
    assert!(base.merged(&json!([1, 2])).is_err());
    assert!(base.merged(&json!({"waveSpeed": "fast"})).is_err());
}

#[test]
fn merge_with_only_legacy_flags_drives_enums() {
    let random = Settings::default()
        .merged(&json!({"fillRandomMode": true}))
        .unwrap();
    assert_eq!(random.fill_color_mode, FillColorMode::Random);

    let back = random.merged(&json!({"fillRandomMode": false})).unwrap();
    assert_eq!(back.fill_color_mode, FillColorMode::Single);

    let solid = Settings::default().merged(&json!({"fillSolid": true})).unwrap();
    assert_eq!(solid.fill_gradient_type, GradientTarget::FadeToWhite);
    let clear = solid.merged(&json!({"fillSolid": false})).unwrap();
    assert_eq!(clear.fill_gradient_type, GradientTarget::Transparent);
}

#[test]
fn explicit_enum_wins_over_stale_legacy_flag() {
    let random = Settings::default()
        .merged(&json!({"fillColorMode": "random"}))
        .unwrap();
    assert!(random.fill_random_mode);
    let single = random.merged(&json!({"fillColorMode": "single"})).unwrap();
    assert_eq!(single.fill_color_mode, FillColorMode::Single);
    assert!(!single.fill_random_mode);
}

#[test]
fn explicit_gradient_wins_over_stale_solid_flag() {
    let faded = Settings::default()
        .merged(&json!({"fillGradientType": "fadeToWhite"}))
        .unwrap();
    assert!(faded.fill_solid);
    let clear = faded
        .merged(&json!({"fillGradientType": "transparent"}))
        .unwrap();
    assert_eq!(clear.fill_gradient_type, GradientTarget::Transparent);
    assert!(!clear.fill_solid);
    let black = clear
        .merged(&json!({"fillGradientType": "fadeToBlack"}))
        .unwrap();
    assert_eq!(black.fill_gradient_type, GradientTarget::FadeToBlack);
    assert!(black.fill_solid);
}

#[test]
fn reinit_keys_are_detected() {
    let base = Settings::default();
    for patch in [
        json!({"width": 800}),
        json!({"height": 800}),
        json!({"waveScale": 2}),
        json!({"sandDensity": 100}),
        json!({"sandHeight": 100}),
        json!({"sandPower": 5}),
        json!({"waveDistance": 200}),
        json!({"groupMin": 1}),
        json!({"groupMax": 9}),
    ] {
        let next = base.merged(&patch).unwrap();
        assert!(base.needs_reinit(&next), "{patch}");
    }
    for patch in [
        json!({"waveSpeed": 2}),
        json!({"fillEnabled": true}),
        json!({"groupSpread": 100}),
        json!({"direction": 90}),
    ] {
        let next = base.merged(&patch).unwrap();
        assert!(!base.needs_reinit(&next), "{patch}");
    }
}

#[test]
fn aspect_ratio_parsing() {
    let mut s = Settings::default();
    assert_eq!(s.aspect_ratio(), None);
    assert!(!s.has_aspect_ratio());
    s.custom_aspect_ratio = Some("0.5".to_owned());
    assert_eq!(s.aspect_ratio(), Some(0.5));
    s.custom_aspect_ratio = Some("  ".to_owned());
    assert_eq!(s.aspect_ratio(), None);
    assert!(!s.has_aspect_ratio());
    s.custom_aspect_ratio = Some("wide".to_owned());
    assert_eq!(s.aspect_ratio(), None);
    assert!(s.has_aspect_ratio());

    let s = Settings::from_json_str(r#"{"customAspectRatio": null}"#).unwrap();
    assert_eq!(s.custom_aspect_ratio, None);
}

#[test]
fn consistent_stroke_scales_against_a_thousand_units() {
    let mut s = Settings {
        stroke_width: 2.0,
        ..Settings::default()
    };
    assert_eq!(s.effective_stroke_width(500.0), 2.0);
    s.consistent_stroke = true;
    assert_eq!(s.effective_stroke_width(500.0), 4.0);
    assert_eq!(s.effective_stroke_width(2000.0), 1.0);
    assert_eq!(s.effective_stroke_width(0.0), 2.0);
}

#[test]
fn serialization_uses_camel_case_keys() {
    let v = serde_json::to_value(Settings::default()).unwrap();
    assert_eq!(v["fillColorMode"], "single");
    assert_eq!(v["fillGradientType"], "transparent");
    assert_eq!(v["frontLineOpacity"], 100.0);
}
