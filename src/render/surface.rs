use crate::color::resolve::RenderColor;
use crate::foundation::core::{Affine, BezPath, Rect, SurfaceSize};
use crate::foundation::error::ShorelineResult;

/// One rendered frame as RGBA8 bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// The drawing target the engine paints into.
///
/// Strokes always use round caps and joins. Paths are filled with the non-zero rule.
/// Transforms compose: `push_transform` post-multiplies onto the current transform.
pub trait DrawingSurface: Send {
    /// Current pixel size.
    fn size(&self) -> SurfaceSize;

    /// Change the pixel size. Content is discarded.
    fn resize(&mut self, size: SurfaceSize) -> ShorelineResult<()>;

    /// Hand exclusive drawing rights to another thread.
    ///
    /// Called once by the background strategy before the surface leaves the host thread;
    /// an error makes the host fall back to drawing in the foreground.
    fn transfer_control(&mut self) -> ShorelineResult<()> {
        Ok(())
    }

    /// Start a new frame. Resets the transform stack.
    fn begin_frame(&mut self) -> ShorelineResult<()>;

    /// Fill an axis-aligned rectangle under the current transform.
    fn fill_rect(&mut self, rect: Rect, color: RenderColor);

    /// Fill a closed path under the current transform.
    fn fill_path(&mut self, path: &BezPath, color: RenderColor);

    /// Stroke a path with round caps and joins under the current transform.
    fn stroke_path(&mut self, path: &BezPath, width: f64, color: RenderColor);

    /// Save the current transform and compose `transform` onto it.
    fn push_transform(&mut self, transform: Affine);

    /// Restore the transform saved by the matching `push_transform`.
    fn pop_transform(&mut self);

    /// Finish the frame and present it.
    fn end_frame(&mut self) -> ShorelineResult<()>;
}

/// A transform stack shared by the bundled surfaces.
#[derive(Clone, Debug, Default)]
pub(crate) struct TransformStack {
    saved: Vec<Affine>,
    current: Affine,
}

impl TransformStack {
    pub(crate) fn reset(&mut self) {
        self.saved.clear();
        self.current = Affine::IDENTITY;
    }

    pub(crate) fn push(&mut self, transform: Affine) {
        self.saved.push(self.current);
        self.current *= transform;
    }

    pub(crate) fn pop(&mut self) {
        if let Some(prev) = self.saved.pop() {
            self.current = prev;
        } else {
            tracing::debug!("pop_transform without a matching push");
        }
    }

    pub(crate) fn current(&self) -> Affine {
        self.current
    }

    pub(crate) fn depth(&self) -> usize {
        self.saved.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
