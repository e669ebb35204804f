//! Scene configuration with defaults and optional RON overrides
//!
//! Defaults reproduce the stock scene. A RON file only needs the fields it
//! changes; everything else falls back to [`Default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming an optional config file
pub const CONFIG_ENV: &str = "ORRERY_CONFIG";

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
    /// `None` disables damping
    pub damping: Option<f32>,
    /// Radians of orbit per pixel dragged
    pub rotate_speed: f32,
    /// Fraction of the distance panned per pixel dragged
    pub pan_speed: f32,
    /// Fraction of the distance zoomed per wheel line
    pub zoom_speed: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingConfig {
    /// `0xRRGGBB`
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub point_color: u32,
    pub point_intensity: f32,
    pub point_position: [f32; 3],
    /// Distance at which the point light fades out; 0 means no falloff
    pub point_range: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory that texture references like `/img/earth.jpg` resolve against
    pub root: PathBuf,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orrery".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 3000.0,
            position: [0.0, 200.0, 700.0],
            target: [0.0, 0.0, 0.0],
            min_distance: 100.0,
            max_distance: 1500.0,
            damping: Some(0.05),
            rotate_speed: 0.005,
            pan_speed: 0.001,
            zoom_speed: 0.1,
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: 0x888888,
            ambient_intensity: 1.5,
            point_color: 0xFFFFFF,
            point_intensity: 3.0,
            point_position: [0.0, 0.0, 0.0],
            point_range: 2000.0,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
        }
    }
}

impl SceneConfig {
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&source)
    }

    /// Load the file named by `ORRERY_CONFIG`, or the defaults when it is unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("Loading scene config from {}", path.display());
                Self::load(&path)
            }
            None => {
                log::info!("{CONFIG_ENV} not set, using default scene config");
                Ok(Self::default())
            }
        }
    }
}
