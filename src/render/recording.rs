use std::collections::VecDeque;

use crate::color::resolve::RenderColor;
use crate::foundation::core::{Affine, BezPath, Rect, SurfaceSize};
use crate::foundation::error::{ShorelineError, ShorelineResult};
use crate::render::surface::{DrawingSurface, TransformStack};

/// One drawing call with the transform that was active when it was issued.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// `fill_rect`.
    FillRect {
        /// Rectangle in local coordinates.
        rect: Rect,
        /// Paint.
        color: RenderColor,
        /// Active transform.
        transform: Affine,
    },
    /// `fill_path`.
    FillPath {
        /// Path in local coordinates.
        path: BezPath,
        /// Paint.
        color: RenderColor,
        /// Active transform.
        transform: Affine,
    },
    /// `stroke_path`.
    StrokePath {
        /// Path in local coordinates.
        path: BezPath,
        /// Stroke width in local units.
        width: f64,
        /// Paint.
        color: RenderColor,
        /// Active transform.
        transform: Affine,
    },
}

impl DrawCommand {
    /// Paint used by this command.
    pub fn color(&self) -> RenderColor {
        match self {
            Self::FillRect { color, .. }
            | Self::FillPath { color, .. }
            | Self::StrokePath { color, .. } => *color,
        }
    }

    /// Whether this is a stroke.
    pub fn is_stroke(&self) -> bool {
        matches!(self, Self::StrokePath { .. })
    }
}

/// Commands issued between one `begin_frame`/`end_frame` pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedFrame {
    /// Surface size while the frame was drawn.
    pub size: Option<SurfaceSize>,
    /// Commands in issue order.
    pub commands: Vec<DrawCommand>,
}

/// Surface that records drawing calls instead of rasterizing them.
///
/// Used to compare strategies call-for-call and to inspect scene output in tests.
#[derive(Debug)]
pub struct RecordingSurface {
    size: SurfaceSize,
    transforms: TransformStack,
    current: RecordedFrame,
    frames: VecDeque<RecordedFrame>,
    frame_limit: Option<usize>,
    frames_seen: u64,
    refuse_transfer: bool,
    transferred: bool,
}

impl RecordingSurface {
    /// Empty recorder of the given size.
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            transforms: TransformStack::default(),
            current: RecordedFrame::default(),
            frames: VecDeque::new(),
            frame_limit: None,
            frames_seen: 0,
            refuse_transfer: false,
            transferred: false,
        }
    }

    /// Keep only the most recent `limit` frames.
    pub fn with_frame_limit(mut self, limit: usize) -> Self {
        self.frame_limit = Some(limit.max(1));
        self
    }

    /// Make `transfer_control` fail, as a surface that cannot leave its thread would.
    pub fn refusing_transfer(mut self) -> Self {
        self.refuse_transfer = true;
        self
    }

    /// Retained frames, oldest first.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = &RecordedFrame> {
        self.frames.iter()
    }

    /// Most recent completed frame.
    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.back()
    }

    /// Frames completed since construction, including any dropped by the frame limit.
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Whether control was handed to another thread.
    pub fn was_transferred(&self) -> bool {
        self.transferred
    }

    fn record(&mut self, cmd: DrawCommand) {
        self.current.commands.push(cmd);
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> ShorelineResult<()> {
        self.size = size;
        Ok(())
    }

    fn transfer_control(&mut self) -> ShorelineResult<()> {
        if self.refuse_transfer {
            return Err(ShorelineError::initialization(
                "recording surface refuses control transfer",
            ));
        }
        self.transferred = true;
        Ok(())
    }

    fn begin_frame(&mut self) -> ShorelineResult<()> {
        self.transforms.reset();
        self.current = RecordedFrame {
            size: Some(self.size),
            commands: Vec::new(),
        };
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: RenderColor) {
        let transform = self.transforms.current();
        self.record(DrawCommand::FillRect {
            rect,
            color,
            transform,
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: RenderColor) {
        let transform = self.transforms.current();
        self.record(DrawCommand::FillPath {
            path: path.clone(),
            color,
            transform,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: RenderColor) {
        let transform = self.transforms.current();
        self.record(DrawCommand::StrokePath {
            path: path.clone(),
            width,
            color,
            transform,
        });
    }

    fn push_transform(&mut self, transform: Affine) {
        self.transforms.push(transform);
    }

    fn pop_transform(&mut self) {
        self.transforms.pop();
    }

    fn end_frame(&mut self) -> ShorelineResult<()> {
        if self.transforms.depth() != 0 {
            return Err(ShorelineError::render(format!(
                "frame ended with {} unbalanced transform(s)",
                self.transforms.depth()
            )));
        }
        self.frames.push_back(std::mem::take(&mut self.current));
        if let Some(limit) = self.frame_limit {
            while self.frames.len() > limit {
                self.frames.pop_front();
            }
        }
        self.frames_seen += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
