use super::*;
use crate::render::sink::InMemorySink;

fn surface(w: u32, h: u32) -> PixmapSurface {
    PixmapSurface::new(SurfaceSize::new(w, h).unwrap()).unwrap()
}

#[test]
fn rejects_sizes_beyond_u16() {
    let err = PixmapSurface::new(SurfaceSize::new(70_000, 10).unwrap()).unwrap_err();
    assert!(err.to_string().contains("exceeds u16"));

    let mut s = surface(10, 10);
    assert!(s.resize(SurfaceSize::new(10, 80_000).unwrap()).is_err());
    assert_eq!(s.size(), SurfaceSize::new(10, 10).unwrap());
}

#[test]
fn fills_rect_with_opaque_color() {
    let mut s = surface(8, 8);
    s.begin_frame().unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), RenderColor::opaque(255, 255, 255));
    s.fill_rect(Rect::new(0.0, 0.0, 4.0, 8.0), RenderColor::opaque(0, 0, 0));
    s.end_frame().unwrap();

    let f = s.snapshot();
    assert_eq!(f.pixel(1, 1), Some([0, 0, 0, 255]));
    assert_eq!(f.pixel(6, 6), Some([255, 255, 255, 255]));
    assert!(f.premultiplied);
}

#[test]
fn transform_applies_to_fills() {
    let mut s = surface(8, 8);
    s.begin_frame().unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), RenderColor::opaque(255, 255, 255));
    s.push_transform(Affine::translate((4.0, 0.0)));
    s.fill_rect(Rect::new(0.0, 0.0, 4.0, 8.0), RenderColor::opaque(0, 0, 0));
    s.pop_transform();
    s.end_frame().unwrap();

    let f = s.snapshot();
    assert_eq!(f.pixel(1, 4), Some([255, 255, 255, 255]));
    assert_eq!(f.pixel(6, 4), Some([0, 0, 0, 255]));
}

#[test]
fn strokes_mark_pixels_along_path() {
    let mut s = surface(20, 20);
    s.begin_frame().unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 20.0, 20.0), RenderColor::opaque(255, 255, 255));
    let mut p = BezPath::new();
    p.move_to((2.0, 10.0));
    p.line_to((18.0, 10.0));
    s.stroke_path(&p, 4.0, RenderColor::opaque(0, 0, 0));
    s.end_frame().unwrap();

    let f = s.snapshot();
    assert_eq!(f.pixel(10, 10), Some([0, 0, 0, 255]));
    assert_eq!(f.pixel(10, 2), Some([255, 255, 255, 255]));
}

#[test]
fn sink_receives_every_frame() {
    let mut s = surface(4, 4).with_sink(Box::new(InMemorySink::new()));
    for _ in 0..3 {
        s.begin_frame().unwrap();
        s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), RenderColor::opaque(255, 255, 255));
        s.end_frame().unwrap();
    }
    assert_eq!(s.frames_presented(), 3);
    let sink = s.finish().unwrap();
    assert!(sink.is_some());
    assert!(s.finish().unwrap().is_none());
}

#[test]
fn path_conversion_keeps_elements() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.quad_to((1.0, 1.0), (2.0, 0.0));
    p.curve_to((3.0, 1.0), (4.0, 1.0), (5.0, 0.0));
    p.close_path();
    assert_eq!(bezpath_to_cpu(&p).elements().len(), 4);
}
