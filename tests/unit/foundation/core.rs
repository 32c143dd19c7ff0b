use super::*;

#[test]
fn surface_size_rejects_empty_dimensions() {
    assert!(SurfaceSize::new(0, 10).is_err());
    assert!(SurfaceSize::new(10, 0).is_err());
    assert!(SurfaceSize::new(1, 1).is_ok());
}

#[test]
fn diagonal_is_hypot_over_scale() {
    let s = SurfaceSize::new(1000, 1000).unwrap();
    assert_eq!(s.diagonal(1.0), 1000f64.hypot(1000.0));
    assert!((s.diagonal(2.0) - 1000f64.hypot(1000.0) / 2.0).abs() < 1e-9);
    assert_eq!(s.diagonal(0.0), s.hypot());
}

#[test]
fn premultiply_rounds_to_nearest() {
    let c = Rgba8 {
        r: 255,
        g: 128,
        b: 0,
        a: 128,
    };
    assert_eq!(c.premultiplied(), [128, 64, 0, 128]);
    assert_eq!(Rgba8::WHITE.premultiplied(), [255, 255, 255, 255]);
}

#[test]
fn with_alpha_clamps() {
    assert_eq!(Rgba8::with_alpha(1, 2, 3, 1.5).a, 255);
    assert_eq!(Rgba8::with_alpha(1, 2, 3, -1.0).a, 0);
    assert_eq!(Rgba8::with_alpha(1, 2, 3, 0.8).a, 204);
}
