use super::*;

fn with_ratio(ratio: &str) -> Settings {
    Settings {
        custom_aspect_ratio: Some(ratio.to_owned()),
        ..Settings::default()
    }
}

#[test]
fn initial_size_uses_container() {
    let s = initial_surface_size(800.0, 600.0, &Settings::default());
    assert_eq!(s, SurfaceSize::new(800, 600).unwrap());
}

#[test]
fn initial_size_falls_back_without_container() {
    let s = initial_surface_size(0.0, 0.0, &Settings::default());
    assert_eq!(s, SurfaceSize::new(1000, 563).unwrap());
}

#[test]
fn initial_size_follows_aspect_ratio() {
    let s = initial_surface_size(1200.0, 300.0, &with_ratio("0.5"));
    assert_eq!(s, SurfaceSize::new(1200, 600).unwrap());
    let bad = initial_surface_size(1000.0, 300.0, &with_ratio("tall"));
    assert_eq!(bad, SurfaceSize::new(1000, 563).unwrap());
}

#[test]
fn relay_ignores_small_jitter() {
    let mut relay = ResizeRelay::new(SurfaceSize::new(800, 600).unwrap());
    let settings = Settings::default();
    assert_eq!(relay.observe(&settings, 800.5, 601.0), None);
    assert_eq!(
        relay.observe(&settings, 900.0, 600.0),
        Some(SurfaceSize::new(900, 600).unwrap())
    );
    assert_eq!(relay.observe(&settings, 900.0, 600.0), None);
}

#[test]
fn relay_derives_height_from_ratio() {
    let mut relay = ResizeRelay::new(SurfaceSize::new(800, 400).unwrap());
    let settings = with_ratio("0.75");
    assert_eq!(
        relay.observe(&settings, 1000.0, 10.0),
        Some(SurfaceSize::new(1000, 750).unwrap())
    );
}

#[test]
fn relay_skips_collapsed_containers() {
    let mut relay = ResizeRelay::new(SurfaceSize::new(800, 400).unwrap());
    assert_eq!(relay.observe(&Settings::default(), 0.0, 500.0), None);
    assert_eq!(relay.observe(&Settings::default(), 500.0, 0.0), None);
}
