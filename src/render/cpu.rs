use crate::color::resolve::RenderColor;
use crate::foundation::core::{Affine, BezPath, Rect, SurfaceSize};
use crate::foundation::error::{ShorelineError, ShorelineResult};
use crate::render::sink::FrameSink;
use crate::render::surface::{DrawingSurface, FrameRGBA, TransformStack};

/// CPU raster surface backed by `vello_cpu`.
///
/// Every presented frame is kept as a premultiplied RGBA8 pixmap and, when a sink is
/// attached, forwarded to it.
pub struct PixmapSurface {
    size: SurfaceSize,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    transforms: TransformStack,
    sink: Option<Box<dyn FrameSink>>,
    sink_open: bool,
    frame_index: u64,
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("size", &self.size)
            .field("has_sink", &self.sink.is_some())
            .field("frame_index", &self.frame_index)
            .finish()
    }
}

impl PixmapSurface {
    /// Allocate a surface. Both dimensions must fit in `u16`.
    pub fn new(size: SurfaceSize) -> ShorelineResult<Self> {
        let (w, h) = pixel_dims(size)?;
        Ok(Self {
            size,
            ctx: vello_cpu::RenderContext::new(w, h),
            pixmap: vello_cpu::Pixmap::new(w, h),
            transforms: TransformStack::default(),
            sink: None,
            sink_open: false,
            frame_index: 0,
        })
    }

    /// Forward every presented frame to `sink`.
    pub fn with_sink(mut self, sink: Box<dyn FrameSink>) -> Self {
        self.sink = Some(sink);
        self.sink_open = false;
        self
    }

    /// Number of frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frame_index
    }

    /// Copy of the last presented frame.
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.size.width,
            height: self.size.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    /// Close the attached sink, if any, and hand it back.
    pub fn finish(&mut self) -> ShorelineResult<Option<Box<dyn FrameSink>>> {
        let Some(mut sink) = self.sink.take() else {
            return Ok(None);
        };
        if self.sink_open {
            sink.end()?;
            self.sink_open = false;
        }
        Ok(Some(sink))
    }
}

impl DrawingSurface for PixmapSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> ShorelineResult<()> {
        let (w, h) = pixel_dims(size)?;
        if size == self.size {
            return Ok(());
        }
        self.ctx = vello_cpu::RenderContext::new(w, h);
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        self.size = size;
        tracing::debug!(width = size.width, height = size.height, "pixmap surface resized");
        Ok(())
    }

    fn begin_frame(&mut self) -> ShorelineResult<()> {
        self.ctx.reset();
        self.ctx
            .set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.transforms.reset();
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: RenderColor) {
        self.ctx.set_transform(affine_to_cpu(self.transforms.current()));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    fn fill_path(&mut self, path: &BezPath, color: RenderColor) {
        self.ctx.set_transform(affine_to_cpu(self.transforms.current()));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: RenderColor) {
        self.ctx.set_transform(affine_to_cpu(self.transforms.current()));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(width)
                .with_caps(vello_cpu::kurbo::Cap::Round)
                .with_join(vello_cpu::kurbo::Join::Round),
        );
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn push_transform(&mut self, transform: Affine) {
        self.transforms.push(transform);
    }

    fn pop_transform(&mut self) {
        self.transforms.pop();
    }

    fn end_frame(&mut self) -> ShorelineResult<()> {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);

        let idx = self.frame_index;
        self.frame_index += 1;
        if self.sink.is_some() {
            let frame = self.snapshot();
            if let Some(sink) = self.sink.as_mut() {
                if !self.sink_open {
                    sink.begin(self.size)?;
                    self.sink_open = true;
                }
                sink.push_frame(idx, &frame)?;
            }
        }
        Ok(())
    }
}

fn pixel_dims(size: SurfaceSize) -> ShorelineResult<(u16, u16)> {
    let w = u16::try_from(size.width).map_err(|_| {
        ShorelineError::validation(format!("surface width {} exceeds u16", size.width))
    })?;
    let h = u16::try_from(size.height).map_err(|_| {
        ShorelineError::validation(format!("surface height {} exceeds u16", size.height))
    })?;
    Ok((w, h))
}

fn color_to_cpu(c: RenderColor) -> vello_cpu::peniko::Color {
    let px = c.to_rgba8();
    vello_cpu::peniko::Color::from_rgba8(px.r, px.g, px.b, px.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
