//! Viewport configuration and gesture scripts, loaded from JSON.

use glam::{IVec2, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::camera::{
    Camera, DEFAULT_CLIPPING_PLANES, DEFAULT_FOV, DEFAULT_POSITION, DEFAULT_RESOLUTION,
};
use crate::input::PointerEvent;
use crate::math::Matrix4;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub camera: CameraConfig,
    /// Viewport size in pixels. Defaults to the camera resolution.
    pub viewport: Option<IVec2>,
}

/// Camera lens and placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Aim the camera at this point instead of leaving it unrotated.
    pub look_at: Option<Vec3>,
    /// Full field of view in degrees.
    pub fov: f32,
    pub resolution: IVec2,
    /// Near and far plane distances.
    pub clipping_planes: Vec2,
    pub perspective: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            look_at: None,
            fov: DEFAULT_FOV,
            resolution: DEFAULT_RESOLUTION,
            clipping_planes: DEFAULT_CLIPPING_PLANES,
            perspective: true,
        }
    }
}

impl ViewportConfig {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from a JSON string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ViewportConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.camera.validate()?;
        if let Some(viewport) = self.viewport {
            if viewport.x <= 0 || viewport.y <= 0 {
                return Err(ConfigError::Invalid {
                    field: "viewport",
                    reason: format!("{}x{} must be positive", viewport.x, viewport.y),
                });
            }
        }
        Ok(())
    }

    pub fn viewport(&self) -> IVec2 {
        self.viewport.unwrap_or(self.camera.resolution)
    }

    pub fn build_camera(&self) -> Camera {
        self.camera.build()
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution.x <= 0 || self.resolution.y <= 0 {
            return Err(ConfigError::Invalid {
                field: "resolution",
                reason: format!("{}x{} must be positive", self.resolution.x, self.resolution.y),
            });
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ConfigError::Invalid {
                field: "fov",
                reason: format!("{} is outside (0, 180)", self.fov),
            });
        }
        let planes = self.clipping_planes;
        if !(planes.x > 0.0 && planes.y > planes.x) {
            return Err(ConfigError::Invalid {
                field: "clipping_planes",
                reason: format!("need 0 < near < far, got {} and {}", planes.x, planes.y),
            });
        }
        Ok(())
    }

    pub fn build(&self) -> Camera {
        let transform = match self.look_at {
            Some(target) => Matrix4::look_at(self.position, target, Vec3::Y).inverse(),
            None => Matrix4::from_translation(self.position),
        };
        let mut camera = Camera::with_transform(transform, self.resolution, self.fov);
        camera.set_clipping_planes(self.clipping_planes);
        camera.set_perspective(self.perspective);
        camera
    }
}

/// Load a recorded gesture script: a JSON array of pointer events.
pub fn load_script<P: AsRef<Path>>(path: P) -> Result<Vec<PointerEvent>, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
