use crate::config::settings::Settings;
use crate::foundation::core::SurfaceSize;

/// Width used when the container reports none.
pub const FALLBACK_WIDTH: f64 = 1000.0;
/// Height/width ratio used when neither the container nor the settings give a height.
pub const FALLBACK_RATIO: f64 = 0.5625;
/// Container changes at or below this many pixels are ignored.
pub const RESIZE_THRESHOLD: f64 = 1.0;

/// Initial surface size for a container of the given size.
///
/// A configured aspect ratio derives the height from the width; an unparsable ratio
/// falls back to 16:9.
pub fn initial_surface_size(
    container_width: f64,
    container_height: f64,
    settings: &Settings,
) -> SurfaceSize {
    let width = positive_or(container_width, FALLBACK_WIDTH);
    let height = if settings.has_aspect_ratio() {
        width * settings.aspect_ratio().unwrap_or(FALLBACK_RATIO)
    } else {
        positive_or(container_height, width * FALLBACK_RATIO)
    };
    to_size(width, height)
}

/// Turns container size observations into surface resizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeRelay {
    width: f64,
    height: f64,
}

impl ResizeRelay {
    /// Relay whose last known size is `initial`.
    pub fn new(initial: SurfaceSize) -> Self {
        Self {
            width: f64::from(initial.width),
            height: f64::from(initial.height),
        }
    }

    /// Surface height for a container: from the aspect ratio when one is configured,
    /// else the container's own height.
    pub fn target_height(settings: &Settings, container_width: f64, container_height: f64) -> f64 {
        match settings.aspect_ratio() {
            Some(ratio) => container_width * ratio,
            None => container_height,
        }
    }

    /// Report a container size. Returns the new surface size when either dimension moved
    /// by more than [`RESIZE_THRESHOLD`].
    pub fn observe(
        &mut self,
        settings: &Settings,
        container_width: f64,
        container_height: f64,
    ) -> Option<SurfaceSize> {
        if positive_or(container_width, 0.0) == 0.0 {
            return None;
        }
        let height = Self::target_height(settings, container_width, container_height);
        if positive_or(height, 0.0) == 0.0 {
            return None;
        }
        let moved = (container_width - self.width).abs() > RESIZE_THRESHOLD
            || (height - self.height).abs() > RESIZE_THRESHOLD;
        if !moved {
            return None;
        }
        self.width = container_width;
        self.height = height;
        Some(to_size(container_width, height))
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value > 0.0 && value.is_finite() {
        value
    } else {
        fallback
    }
}

fn to_size(width: f64, height: f64) -> SurfaceSize {
    let px = |v: f64| (v.round().clamp(1.0, f64::from(u32::MAX))) as u32;
    SurfaceSize {
        width: px(width),
        height: px(height),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/resize.rs"]
mod tests;
