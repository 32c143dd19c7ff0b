use super::*;
use crate::foundation::rng::seeded_rng;

fn ctx<'a>(settings: &'a Settings, colors: &'a ColorResolver) -> GroupContext<'a> {
    GroupContext {
        settings,
        colors,
        diagonal: 1000.0,
    }
}

#[test]
fn spawn_draws_speed_and_offset_in_range() {
    let settings = Settings::default();
    let colors = ColorResolver::default();
    let mut rng = seeded_rng(11);
    for _ in 0..200 {
        let g = WaveGroup::spawn(0.0, ctx(&settings, &colors), rng.as_mut());
        assert!((0.2..0.3).contains(&g.speed));
        assert!((0.0..50.0).contains(&g.offset));
        assert!(g.lines.len() >= 3 && g.lines.len() <= 6, "{}", g.lines.len());
    }
}

#[test]
fn line_parameters_follow_ranges() {
    let settings = Settings {
        group_min: 4,
        group_max: 4,
        group_spread: 90.0,
        ..Settings::default()
    };
    let colors = ColorResolver::default();
    let mut rng = seeded_rng(12);
    let g = WaveGroup::spawn(0.0, ctx(&settings, &colors), rng.as_mut());
    assert_eq!(g.lines.len(), 4);
    for (i, line) in g.lines.iter().enumerate() {
        let nominal = i as f64 * 30.0;
        assert!((line.relative_y - nominal).abs() <= 2.5);
        assert!((0.0..10.0).contains(&line.noise_phase));
        assert!((0.8..1.2).contains(&line.amplitude_mod));
    }
}

#[test]
fn single_line_group_sits_near_base() {
    let settings = Settings {
        group_min: 1,
        group_max: 1,
        ..Settings::default()
    };
    let colors = ColorResolver::default();
    let mut rng = seeded_rng(13);
    let g = WaveGroup::spawn(0.0, ctx(&settings, &colors), rng.as_mut());
    assert_eq!(g.lines.len(), 1);
    assert!(g.lines[0].relative_y.abs() <= 2.5);
}

#[test]
fn random_colors_are_saturated_and_mid_light() {
    let mut rng = seeded_rng(14);
    for _ in 0..500 {
        let Color::Hsl { h, s, l } = random_color(rng.as_mut()) else {
            panic!("expected hsl");
        };
        assert!((0.0..360.0).contains(&h) && h.fract() == 0.0);
        assert!((60.0..80.0).contains(&s) && s.fract() == 0.0);
        assert!((45.0..60.0).contains(&l) && l.fract() == 0.0);
    }
}

#[test]
fn random_mode_color_is_sticky_until_recycle() {
    let settings = Settings {
        fill_color_mode: FillColorMode::Random,
        ..Settings::default()
    };
    let colors = ColorResolver::default();
    let mut rng = seeded_rng(15);
    let mut g = WaveGroup::spawn(0.0, ctx(&settings, &colors), rng.as_mut());
    let first = g.color;
    assert_eq!(g.sticky_color, Some(first));

    recolor(&mut g, ctx(&settings, &colors), rng.as_mut());
    assert_eq!(g.color, first);

    recycle(&mut g, -120.0, ctx(&settings, &colors), rng.as_mut());
    assert_eq!(g.base_y, -120.0);
    assert_ne!(g.color, first);
}

#[test]
fn rainbow_hue_tracks_position() {
    let settings = Settings {
        fill_color_mode: FillColorMode::Rainbow,
        ..Settings::default()
    };
    let colors = ColorResolver::default();
    let mut rng = seeded_rng(16);
    let mid = WaveGroup::spawn(500.0, ctx(&settings, &colors), rng.as_mut());
    assert_eq!(mid.color, Color::Hsl { h: 180.0, s: 70.0, l: 50.0 });
    let above = WaveGroup::spawn(-300.0, ctx(&settings, &colors), rng.as_mut());
    assert_eq!(above.color, Color::Hsl { h: 0.0, s: 70.0, l: 50.0 });
    let below = WaveGroup::spawn(4000.0, ctx(&settings, &colors), rng.as_mut());
    assert_eq!(below.color, Color::Hsl { h: 360.0, s: 70.0, l: 50.0 });
}

#[test]
fn single_mode_uses_configured_color() {
    let settings = Settings {
        fill_color: "#ff0000".into(),
        ..Settings::default()
    };
    let colors = ColorResolver::default();
    let mut rng = seeded_rng(17);
    let g = WaveGroup::spawn(0.0, ctx(&settings, &colors), rng.as_mut());
    assert_eq!(g.color, Color::Rgb { r: 255, g: 0, b: 0 });
    assert_eq!(g.sticky_color, None);
}

#[test]
fn off_screen_threshold() {
    let settings = Settings::default();
    let colors = ColorResolver::default();
    let mut rng = seeded_rng(18);
    let mut g = WaveGroup::spawn(1200.0, ctx(&settings, &colors), rng.as_mut());
    assert!(!is_off_screen(&g, 1000.0));
    advance(&mut g, 3.0);
    assert!(is_off_screen(&g, 1000.0));
}

#[test]
fn sampled_line_spans_overscan_at_step() {
    let settings = Settings::default();
    let colors = ColorResolver::default();
    let mut rng = seeded_rng(19);
    let noise = NoiseField::new(rng.as_mut());
    let g = WaveGroup::spawn(100.0, ctx(&settings, &colors), rng.as_mut());
    let mut pts = Vec::new();
    sample_line(
        &g,
        &g.lines[0],
        SceneClock::default(),
        ctx(&settings, &colors),
        &noise,
        rng.as_mut(),
        &mut pts,
    )
    .unwrap();

    assert_eq!(pts.len(), 111);
    assert_eq!(pts[0].x, -50.0);
    assert_eq!(pts[pts.len() - 1].x, 1050.0);
    for w in pts.windows(2) {
        assert_eq!(w[1].x - w[0].x, 10.0);
    }
    let bound = 100.0 + g.lines[0].relative_y + 120.0 * 1.2 + 15.0;
    assert!(pts.iter().all(|p| p.y <= bound + 1e-9));
}

#[test]
fn sampling_far_in_time_stays_finite() {
    let settings = Settings {
        detail_speed: 2.0,
        ..Settings::default()
    };
    let colors = ColorResolver::default();
    let mut rng = seeded_rng(20);
    let noise = NoiseField::new(rng.as_mut());
    let g = WaveGroup::spawn(0.0, ctx(&settings, &colors), rng.as_mut());
    let clock = SceneClock {
        time: 1.0e7,
        bend_time: 5.0e6,
    };
    let mut pts = Vec::new();
    sample_line(&g, &g.lines[0], clock, ctx(&settings, &colors), &noise, rng.as_mut(), &mut pts)
        .unwrap();
    assert!(pts.iter().all(|p| p.y.is_finite()));
}

#[test]
fn zero_roughness_draws_no_randomness() {
    let settings = Settings::default();
    let colors = ColorResolver::default();
    let mut rng = seeded_rng(21);
    let noise = NoiseField::new(rng.as_mut());
    let g = WaveGroup::spawn(0.0, ctx(&settings, &colors), rng.as_mut());

    let mut a = seeded_rng(99);
    let mut b = seeded_rng(99);
    let mut pts = Vec::new();
    sample_line(&g, &g.lines[0], SceneClock::default(), ctx(&settings, &colors), &noise, a.as_mut(), &mut pts)
        .unwrap();
    assert_eq!(a.next_u64(), b.next_u64());
}
