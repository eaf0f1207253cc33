//! Scene configuration.
//!
//! Projection, ground tilt, light orbit and initial camera pose.

use std::path::Path;

use serde::{Deserialize, Serialize};
use umbra_math::Vec3;
use umbra_types::constants::DEFAULT_PLANE_ALPHA_DEG;
use umbra_types::{UmbraError, UmbraResult};

/// Circular light path: `[sin(t·ω + φ)·r, cos(t·ω + φ)·r, h]`.
///
/// The default phase places the light at `[sin(0.1)·0.5, cos(0.1)·0.5, 2]`
/// at `t = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightOrbit {
    pub radius: f32,
    pub height: f32,
    /// Radians per second.
    pub angular_speed: f32,
    /// Angle at `t = 0`, in radians.
    pub phase: f32,
}

impl Default for LightOrbit {
    fn default() -> Self {
        Self {
            radius: 0.5,
            height: 2.0,
            angular_speed: 0.1,
            phase: 0.1,
        }
    }
}

impl LightOrbit {
    /// Light position after `t` seconds.
    pub fn position(&self, t: f32) -> Vec3 {
        let (s, c) = (t * self.angular_speed + self.phase).sin_cos();
        Vec3::new(s * self.radius, c * self.radius, self.height)
    }
}

/// Initial camera pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [2.0, 1.0, 5.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

/// Configuration for a [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
    /// Initial viewport size in pixels.
    pub screen_size: [u32; 2],
    /// Ground plane tilt about Z in degrees.
    pub plane_alpha: f32,
    pub light: LightOrbit,
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            near: 0.1,
            far: 100.0,
            screen_size: [800, 600],
            plane_alpha: DEFAULT_PLANE_ALPHA_DEG,
            light: LightOrbit::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_toml_str(text: &str) -> UmbraResult<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| UmbraError::InvalidConfig(format!("scene config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> UmbraResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> UmbraResult<String> {
        toml::to_string(self).map_err(|e| UmbraError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> UmbraResult<()> {
        if !(self.fovy > 0.0 && self.fovy < 180.0) {
            return Err(UmbraError::InvalidConfig(format!(
                "fovy must be in (0, 180) degrees, got {}",
                self.fovy
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(UmbraError::InvalidConfig(format!(
                "clip planes must satisfy 0 < near < far, got near {} far {}",
                self.near, self.far
            )));
        }
        if self.screen_size.contains(&0) {
            return Err(UmbraError::InvalidConfig("screen size must be non-zero".into()));
        }
        if !(self.light.radius >= 0.0 && self.light.height.is_finite() && self.light.angular_speed.is_finite()
            && self.light.phase.is_finite()) {
            return Err(UmbraError::InvalidConfig(format!(
                "invalid light orbit {:?}",
                self.light
            )));
        }
        let eye = Vec3::from(self.camera.eye);
        let target = Vec3::from(self.camera.target);
        if eye.distance(target) == 0.0 || Vec3::from(self.camera.up).length() == 0.0 {
            return Err(UmbraError::InvalidConfig(
                "camera eye must differ from target and up must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f32 {
        self.screen_size[0] as f32 / self.screen_size[1] as f32
    }
}
