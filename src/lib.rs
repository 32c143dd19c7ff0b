//! Shoreline renders an endless, procedurally generated shoreline: groups of noise-driven
//! contour lines scroll down a rotated, scaled scene, recycling at the bottom, over an
//! optional speckled sand band.
//!
//! The public API is host-oriented:
//!
//! - Build [`Settings`] from JSON (partial configs and legacy flags are accepted)
//! - Pick a [`DrawingSurface`] ([`PixmapSurface`] rasterizes on the CPU)
//! - Start an [`ExecutionHost`] in the foreground or on a render thread
//! - Send [`ControlRequest`]s to update settings, resize or stop
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod color;
mod config;
mod engine;
mod foundation;
mod host;
mod noise;
mod render;
mod scene;

pub use crate::color::names::{ColorNameLookup, CssColorNames};
pub use crate::color::parse::{Color, ColorResolver, ColorSpec, FALLBACK_COLOR, parse_color};
pub use crate::color::resolve::{GradientTarget, RenderColor, resolve};
pub use crate::config::settings::{FillColorMode, Settings};
pub use crate::engine::{Engine, EngineStats};
pub use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8, SurfaceSize, Vec2};
pub use crate::foundation::error::{ShorelineError, ShorelineResult};
pub use crate::foundation::rng::{EngineRng, entropy_rng, seeded_rng};
pub use crate::host::background::{BackgroundHost, StartError};
pub use crate::host::foreground::ForegroundHost;
pub use crate::host::message::{ControlRequest, Launch};
pub use crate::host::resize::{ResizeRelay, initial_surface_size};
pub use crate::host::scheduler::{FrameBudget, FrameScheduler, IntervalScheduler};
pub use crate::host::select::{
    ExecutionHost, HostCapabilities, HostOpts, Strategy, StrategyPreference,
};
pub use crate::noise::field::{NoiseField, NoiseMode};
pub use crate::render::cpu::PixmapSurface;
pub use crate::render::recording::{DrawCommand, RecordedFrame, RecordingSurface};
pub use crate::render::renderer::{FrameInputs, FrameStats, Renderer};
pub use crate::render::sink::{FrameSink, InMemorySink, PngSequenceSink, write_png};
pub use crate::render::surface::{DrawingSurface, FrameRGBA};
pub use crate::scene::group::{Line, SceneClock, WaveGroup};
pub use crate::scene::sand::{SandField, SandParticle, SpeckSize};
pub use crate::scene::simulator::{MIN_GROUP_GAP, SceneSimulator};
