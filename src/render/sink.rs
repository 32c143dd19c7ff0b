use std::path::PathBuf;

use anyhow::Context;

use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{ShorelineError, ShorelineResult};
use crate::render::surface::FrameRGBA;

/// Consumer of presented frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices between one
/// `begin` and the matching `end`.
pub trait FrameSink: Send {
    /// Called once before the first frame.
    fn begin(&mut self, size: SurfaceSize) -> ShorelineResult<()>;
    /// Receive one presented frame.
    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> ShorelineResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> ShorelineResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    size: Option<SurfaceSize>,
    frames: Vec<(u64, FrameRGBA)>,
    ended: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Size captured by `begin`, if any.
    pub fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(u64, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` was called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, size: SurfaceSize) -> ShorelineResult<()> {
        self.size = Some(size);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> ShorelineResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> ShorelineResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes each frame as `<dir>/<prefix>_<idx>.png`.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `dir`, which is created on `begin`.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _size: SurfaceSize) -> ShorelineResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame directory '{}'", self.dir.display()))?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, frame: &FrameRGBA) -> ShorelineResult<()> {
        let path = self.dir.join(format!("{}_{idx:05}.png", self.prefix));
        write_png(&path, frame)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> ShorelineResult<()> {
        tracing::info!(frames = self.written.len(), dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

/// Encode a frame as a straight-alpha PNG.
pub fn write_png(path: &std::path::Path, frame: &FrameRGBA) -> ShorelineResult<()> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(ShorelineError::render(format!(
            "frame buffer holds {} bytes, expected {expected}",
            frame.data.len()
        )));
    }
    let data = if frame.premultiplied {
        unpremultiply(&frame.data)
    } else {
        frame.data.clone()
    };
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn unpremultiply(data: &[u8]) -> Vec<u8> {
    data.chunks_exact(4)
        .flat_map(|px| {
            let a = px[3];
            if a == 0 || a == 255 {
                return [px[0], px[1], px[2], a];
            }
            let un = |c: u8| ((u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8;
            [un(px[0]), un(px[1]), un(px[2]), a]
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/sink.rs"]
mod tests;
