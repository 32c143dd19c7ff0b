use super::*;

#[test]
fn pixel_lookup_is_row_major() {
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: (0u8..16).collect(),
        premultiplied: false,
    };
    assert_eq!(frame.pixel(0, 0), Some([0, 1, 2, 3]));
    assert_eq!(frame.pixel(1, 1), Some([12, 13, 14, 15]));
    assert_eq!(frame.pixel(2, 0), None);
}

#[test]
fn transform_stack_composes_and_restores() {
    let mut stack = TransformStack::default();
    stack.push(Affine::translate((10.0, 0.0)));
    stack.push(Affine::scale(2.0));
    let p = stack.current() * kurbo::Point::new(1.0, 1.0);
    assert_eq!(p, kurbo::Point::new(12.0, 2.0));
    assert_eq!(stack.depth(), 2);

    stack.pop();
    assert_eq!(stack.current(), Affine::translate((10.0, 0.0)));
    stack.pop();
    stack.pop();
    assert_eq!(stack.current(), Affine::IDENTITY);
}

#[test]
fn reset_clears_everything() {
    let mut stack = TransformStack::default();
    stack.push(Affine::scale(3.0));
    stack.reset();
    assert_eq!(stack.depth(), 0);
    assert_eq!(stack.current(), Affine::IDENTITY);
}
