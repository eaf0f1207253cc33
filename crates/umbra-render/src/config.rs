//! Renderer configuration.
//!
//! Light intensities and colors for each pass, the volume extrusion
//! factor and debug switches. Loadable from TOML; every field has a
//! default so a partial file is enough.

use std::path::Path;

use serde::{Deserialize, Serialize};
use umbra_types::constants::{
    AMBIENT_PASS_AMBIENT, DEFAULT_EXTRUSION_FACTOR, LIT_PASS_DIFFUSE, LIT_PASS_SPECULAR,
    RECEIVER_OVERLAY_COLOR, WALL_AMBIENT_COLOR, WALL_LIT_COLOR,
};
use umbra_types::{UmbraError, UmbraResult};

/// Debug switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugFlags {
    /// Draw the shadow caster itself. Its volume is still drawn.
    pub draw_object: bool,
    /// After the frame, blend the volume's front faces over the scene.
    pub draw_front_volumes: bool,
    /// After the frame, blend the volume's back faces over the scene.
    pub draw_back_volumes: bool,
}

impl Default for DebugFlags {
    fn default() -> Self {
        Self {
            draw_object: true,
            draw_front_volumes: false,
            draw_back_volumes: false,
        }
    }
}

/// Configuration for [`StencilShadowRenderer`](crate::renderer::StencilShadowRenderer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// How far volumes are pushed away from the light, as a multiple of
    /// the light-to-vertex distance.
    pub extrusion_factor: f32,

    /// Ambient term of the ambient pass.
    pub ambient: [f32; 3],

    /// Diffuse term of the lit pass.
    pub diffuse: [f32; 3],

    /// Specular term of the lit pass.
    pub specular: [f32; 3],

    /// Color of the translucent receiver drawn over the reflection.
    pub receiver_color: [f32; 4],

    /// Wall color in the ambient pass.
    pub wall_ambient_color: [f32; 4],

    /// Wall color in the lit pass.
    pub wall_lit_color: [f32; 4],

    pub debug: DebugFlags,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            extrusion_factor: DEFAULT_EXTRUSION_FACTOR,
            ambient: AMBIENT_PASS_AMBIENT,
            diffuse: LIT_PASS_DIFFUSE,
            specular: LIT_PASS_SPECULAR,
            receiver_color: RECEIVER_OVERLAY_COLOR,
            wall_ambient_color: WALL_AMBIENT_COLOR,
            wall_lit_color: WALL_LIT_COLOR,
            debug: DebugFlags::default(),
        }
    }
}

impl RenderConfig {
    /// Shows both sides of every volume on top of the normal frame.
    pub fn debug_volumes() -> Self {
        Self {
            debug: DebugFlags {
                draw_object: true,
                draw_front_volumes: true,
                draw_back_volumes: true,
            },
            ..Default::default()
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> UmbraResult<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| UmbraError::InvalidConfig(format!("render config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> UmbraResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> UmbraResult<String> {
        toml::to_string(self).map_err(|e| UmbraError::Serialization(e.to_string()))
    }

    /// Checks that the extrusion factor is positive and that every
    /// intensity and color channel lies in `[0, 1]`.
    pub fn validate(&self) -> UmbraResult<()> {
        if !(self.extrusion_factor.is_finite() && self.extrusion_factor > 0.0) {
            return Err(UmbraError::InvalidConfig(format!(
                "extrusion_factor must be positive, got {}",
                self.extrusion_factor
            )));
        }

        let channels: [(&str, &[f32]); 6] = [
            ("ambient", &self.ambient),
            ("diffuse", &self.diffuse),
            ("specular", &self.specular),
            ("receiver_color", &self.receiver_color),
            ("wall_ambient_color", &self.wall_ambient_color),
            ("wall_lit_color", &self.wall_lit_color),
        ];
        for (name, values) in channels {
            if let Some(v) = values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
                return Err(UmbraError::InvalidConfig(format!(
                    "{name} channel {v} is outside [0, 1]"
                )));
            }
        }
        Ok(())
    }
}
