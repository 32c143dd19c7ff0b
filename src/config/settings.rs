use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::parse::ColorSpec;
use crate::color::resolve::GradientTarget;
use crate::foundation::error::{ShorelineError, ShorelineResult};

/// How each wave group picks its fill colour on (re)colouring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FillColorMode {
    /// The configured `fillColor` verbatim.
    #[default]
    Single,
    /// One random HSL colour per group, held until the group recycles.
    Random,
    /// Hue derived from the group's scroll position at (re)colour time.
    Rainbow,
}

/// Full engine configuration.
///
/// Every key is optional on input; omitted keys take their documented default. Numeric
/// values are clamped into their supported ranges by [`Settings::normalized`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Surface width in pixels (runtime, mirrors the surface).
    pub width: u32,
    /// Surface height in pixels (runtime, mirrors the surface).
    pub height: u32,
    /// Height/width ratio as a decimal string; empty or absent means auto height.
    pub custom_aspect_ratio: Option<String>,
    /// Keep apparent stroke thickness constant across surface widths.
    pub consistent_stroke: bool,
    /// Horizontal sampling step for line geometry.
    pub resolution_step: u32,
    /// Zoom applied to the scene; also shrinks the scene diagonal.
    pub wave_scale: f64,
    /// Minimum lines per group.
    pub group_min: u32,
    /// Maximum lines per group.
    pub group_max: u32,
    /// Vertical spread of a group's lines.
    pub group_spread: f64,
    /// Paint translucent white between adjacent lines.
    pub occlusion_mode: bool,
    /// Visit a group's lines back to front.
    pub occlusion_reverse: bool,
    /// Occlusion overlay strength in percent.
    pub occlusion_strength: f64,
    /// Alpha of the last-drawn line in percent.
    pub front_line_opacity: f64,
    /// Global scroll speed multiplier.
    pub wave_speed: f64,
    /// Spacing between groups.
    pub wave_distance: f64,
    /// Per-point vertical jitter.
    pub roughness: f64,
    /// Amplitude of the large-scale bend.
    pub wave_amplitude: f64,
    /// Rate of the large-scale bend.
    pub bend_speed: f64,
    /// Scene rotation in degrees.
    pub direction: f64,
    /// Amplitude of the small-scale detail.
    pub detail_amp: f64,
    /// Rate of the small-scale detail.
    pub detail_speed: f64,
    /// Wavelength of the small-scale detail.
    pub detail_spread: f64,
    /// Number of sand speckles.
    pub sand_density: u32,
    /// Depth of the sand band.
    pub sand_height: f64,
    /// Exponent concentrating sand toward the shore edge.
    pub sand_power: f64,
    /// Sand tint.
    pub sand_color: ColorSpec,
    /// Line stroke width.
    pub stroke_width: f64,
    /// Fill the band between adjacent lines.
    pub fill_enabled: bool,
    /// Fill colour for [`FillColorMode::Single`].
    pub fill_color: ColorSpec,
    /// Fill colour policy.
    pub fill_color_mode: FillColorMode,
    /// What fading fills blend toward.
    pub fill_gradient_type: GradientTarget,
    /// Opacity of the first fill band, in percent.
    pub fill_opacity: f64,
    /// Opacity lost per band, in percent.
    pub fill_opacity_decay: f64,
    /// Skip occlusion overlays while fills are on.
    pub fill_ignore_occlusion: bool,
    /// Legacy alias of `fillColorMode == random`.
    pub fill_random_mode: bool,
    /// Legacy alias of a non-transparent `fillGradientType`.
    pub fill_solid: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            custom_aspect_ratio: None,
            consistent_stroke: false,
            resolution_step: 10,
            wave_scale: 1.0,
            group_min: 3,
            group_max: 6,
            group_spread: 40.0,
            occlusion_mode: true,
            occlusion_reverse: false,
            occlusion_strength: 80.0,
            front_line_opacity: 100.0,
            wave_speed: 0.5,
            wave_distance: 120.0,
            roughness: 0.0,
            wave_amplitude: 120.0,
            bend_speed: 0.1,
            direction: 0.0,
            detail_amp: 15.0,
            detail_speed: 0.2,
            detail_spread: 100.0,
            sand_density: 0,
            sand_height: 300.0,
            sand_power: 3.0,
            sand_color: ColorSpec::from("#111111"),
            stroke_width: 2.0,
            fill_enabled: false,
            fill_color: ColorSpec::from("#3498db"),
            fill_color_mode: FillColorMode::Single,
            fill_gradient_type: GradientTarget::Transparent,
            fill_opacity: 80.0,
            fill_opacity_decay: 15.0,
            fill_ignore_occlusion: false,
            fill_random_mode: false,
            fill_solid: false,
        }
    }
}

impl Settings {
    /// Parse a serialized config, failing on malformed input.
    pub fn from_json_str(json: &str) -> ShorelineResult<Self> {
        let parsed: Self = serde_json::from_str(json)
            .map_err(|e| ShorelineError::config(format!("invalid settings JSON: {e}")))?;
        Ok(parsed.normalized())
    }

    /// Parse a serialized config, substituting the full default config when it is malformed.
    pub fn from_json_str_or_default(json: &str) -> Self {
        Self::from_json_str(json).unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to default settings");
            Self::default()
        })
    }

    /// Clamp every value into its supported range and synchronize the legacy aliases.
    pub fn normalized(mut self) -> Self {
        self.resolution_step = self.resolution_step.clamp(5, 50);
        self.wave_scale = self.wave_scale.clamp(0.5, 3.0);
        self.group_min = self.group_min.clamp(1, 10);
        self.group_max = self.group_max.clamp(self.group_min, 10);
        self.group_spread = self.group_spread.clamp(10.0, 300.0);
        self.occlusion_strength = self.occlusion_strength.clamp(0.0, 100.0);
        self.front_line_opacity = self.front_line_opacity.clamp(0.0, 100.0);
        self.wave_speed = self.wave_speed.clamp(0.0, 3.0);
        self.wave_distance = self.wave_distance.clamp(50.0, 300.0);
        self.roughness = self.roughness.clamp(0.0, 5.0);
        self.wave_amplitude = self.wave_amplitude.clamp(0.0, 300.0);
        self.bend_speed = self.bend_speed.clamp(0.0, 1.0);
        self.direction = self.direction.clamp(0.0, 360.0);
        self.detail_amp = self.detail_amp.clamp(0.0, 50.0);
        self.detail_speed = self.detail_speed.clamp(0.0, 2.0);
        self.detail_spread = self.detail_spread.clamp(20.0, 300.0);
        self.sand_density = self.sand_density.min(5000);
        self.sand_height = self.sand_height.clamp(50.0, 800.0);
        self.sand_power = self.sand_power.clamp(1.0, 10.0);
        self.stroke_width = self.stroke_width.clamp(0.5, 5.0);
        self.fill_opacity = self.fill_opacity.clamp(0.0, 100.0);
        self.fill_opacity_decay = self.fill_opacity_decay.clamp(0.0, 50.0);
        self.sync_legacy_aliases();
        self
    }

    fn sync_legacy_aliases(&mut self) {
        if self.fill_random_mode && self.fill_color_mode == FillColorMode::Single {
            self.fill_color_mode = FillColorMode::Random;
        }
        if self.fill_solid && self.fill_gradient_type == GradientTarget::Transparent {
            self.fill_gradient_type = GradientTarget::FadeToWhite;
        }
        self.fill_random_mode = self.fill_color_mode == FillColorMode::Random;
        self.fill_solid = self.fill_gradient_type != GradientTarget::Transparent;
    }

    /// Apply a partial or full JSON object on top of these settings.
    ///
    /// Unknown keys are ignored. A patch carrying only a legacy flag drives the matching enum.
    pub fn merged(&self, patch: &Value) -> ShorelineResult<Self> {
        let Value::Object(patch) = patch else {
            return Err(ShorelineError::config("settings patch must be a JSON object"));
        };
        let mut base = serde_json::to_value(self)
            .map_err(|e| ShorelineError::config(format!("serialize settings: {e}")))?;
        let Value::Object(fields) = &mut base else {
            return Err(ShorelineError::config("settings did not serialize to an object"));
        };
        for (k, v) in patch {
            fields.insert(k.clone(), v.clone());
        }
        self.apply_legacy_patch(patch, fields);

        let merged: Self = serde_json::from_value(base)
            .map_err(|e| ShorelineError::config(format!("invalid settings patch: {e}")))?;
        Ok(merged.normalized())
    }

    fn apply_legacy_patch(&self, patch: &Map<String, Value>, fields: &mut Map<String, Value>) {
        if let (Some(random), false) = (
            patch.get("fillRandomMode").and_then(Value::as_bool),
            patch.contains_key("fillColorMode"),
        ) {
            let mode = match (random, self.fill_color_mode) {
                (true, _) => FillColorMode::Random,
                (false, FillColorMode::Random) => FillColorMode::Single,
                (false, keep) => keep,
            };
            fields.insert("fillColorMode".to_owned(), serde_json::json!(mode));
        }
        if let (Some(solid), false) = (
            patch.get("fillSolid").and_then(Value::as_bool),
            patch.contains_key("fillGradientType"),
        ) {
            let target = match (solid, self.fill_gradient_type) {
                (true, GradientTarget::Transparent) => GradientTarget::FadeToWhite,
                (true, keep) => keep,
                (false, _) => GradientTarget::Transparent,
            };
            fields.insert("fillGradientType".to_owned(), serde_json::json!(target));
        }

        // An explicit enum overrides the derived flag carried over from `self`.
        if !patch.contains_key("fillRandomMode")
            && let Some(mode) = patch
                .get("fillColorMode")
                .and_then(|v| FillColorMode::deserialize(v).ok())
        {
            fields.insert(
                "fillRandomMode".to_owned(),
                Value::Bool(mode == FillColorMode::Random),
            );
        }
        if !patch.contains_key("fillSolid")
            && let Some(target) = patch
                .get("fillGradientType")
                .and_then(|v| GradientTarget::deserialize(v).ok())
        {
            fields.insert(
                "fillSolid".to_owned(),
                Value::Bool(target != GradientTarget::Transparent),
            );
        }
    }

    /// Whether switching to `next` invalidates the wave pool and sand field.
    pub fn needs_reinit(&self, next: &Self) -> bool {
        self.width != next.width
            || self.height != next.height
            || self.wave_scale != next.wave_scale
            || self.sand_density != next.sand_density
            || self.sand_height != next.sand_height
            || self.sand_power != next.sand_power
            || self.wave_distance != next.wave_distance
            || self.group_min != next.group_min
            || self.group_max != next.group_max
    }

    /// Configured height/width ratio, if any.
    pub fn aspect_ratio(&self) -> Option<f64> {
        let raw = self.custom_aspect_ratio.as_deref()?.trim();
        raw.parse::<f64>().ok().filter(|r| r.is_finite() && *r > 0.0)
    }

    /// Whether an aspect ratio string is configured at all, valid or not.
    pub fn has_aspect_ratio(&self) -> bool {
        self.custom_aspect_ratio
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }

    /// Stroke width in scene units for a surface of `surface_width` pixels.
    pub fn effective_stroke_width(&self, surface_width: f64) -> f64 {
        if !self.consistent_stroke {
            return self.stroke_width;
        }
        let scale = surface_width / 1000.0;
        if scale > 0.0 {
            self.stroke_width / scale
        } else {
            self.stroke_width
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
