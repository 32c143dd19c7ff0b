use super::*;
use crate::foundation::rng::seeded_rng;

#[test]
fn particles_stay_inside_band() {
    let settings = Settings {
        sand_density: 2000,
        sand_height: 300.0,
        ..Settings::default()
    };
    let mut rng = seeded_rng(5);
    let sand = SandField::generate(&settings, 1000.0, rng.as_mut());
    assert_eq!(sand.particles().len(), 2000);
    for p in sand.particles() {
        assert!((0.0..1000.0).contains(&p.x));
        assert!(p.y > 700.0 && p.y <= 1000.0, "{}", p.y);
    }
}

#[test]
fn power_concentrates_toward_bottom() {
    let settings = Settings {
        sand_density: 4000,
        sand_power: 6.0,
        ..Settings::default()
    };
    let mut rng = seeded_rng(6);
    let sand = SandField::generate(&settings, 1000.0, rng.as_mut());
    let near = sand.particles().iter().filter(|p| p.y > 950.0).count();
    assert!(near > sand.particles().len() / 2, "{near}");
}

#[test]
fn both_sizes_occur() {
    let settings = Settings {
        sand_density: 200,
        ..Settings::default()
    };
    let mut rng = seeded_rng(7);
    let sand = SandField::generate(&settings, 500.0, rng.as_mut());
    assert!(sand.particles().iter().any(|p| p.size == SpeckSize::Fine));
    assert!(sand.particles().iter().any(|p| p.size == SpeckSize::Coarse));
}

#[test]
fn zero_density_is_empty() {
    let mut rng = seeded_rng(8);
    let sand = SandField::generate(&Settings::default(), 1000.0, rng.as_mut());
    assert!(sand.is_empty());
    assert!(sand.to_path().elements().is_empty());
}

#[test]
fn compound_path_has_one_subpath_per_speck() {
    let settings = Settings {
        sand_density: 10,
        ..Settings::default()
    };
    let mut rng = seeded_rng(9);
    let sand = SandField::generate(&settings, 400.0, rng.as_mut());
    let path = sand.to_path();
    let moves = path
        .elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 10);
}
