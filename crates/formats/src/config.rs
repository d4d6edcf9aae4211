use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use runtime::AnimationConfig;
use scene::components::TextureSlot;
use scene::prefabs::{
    DEFAULT_ROUTE_PALETTE, GlobeStyle, LightingStyle, RouteStyle, StarfieldStyle,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "globe.config.json";

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Image files for the earth material, relative to the asset root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub earth_day: String,
    pub earth_displacement: String,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            earth_day: "earth_uv_map_day.jpg".to_string(),
            earth_displacement: "earth_displacement_map.jpg".to_string(),
        }
    }
}

impl TextureConfig {
    pub fn path(&self, slot: TextureSlot) -> &str {
        match slot {
            TextureSlot::EarthDay => &self.earth_day,
            TextureSlot::EarthDisplacement => &self.earth_displacement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of routes drawn from the head of the route list.
    pub route_count: usize,
    /// `0xRRGGBB` colors assigned to consecutive bands of routes.
    pub route_palette: Vec<u32>,
    pub globe: GlobeStyle,
    pub routes: RouteStyle,
    pub lighting: LightingStyle,
    pub stars: StarfieldStyle,
    pub textures: TextureConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            route_count: 250,
            route_palette: DEFAULT_ROUTE_PALETTE.to_vec(),
            globe: GlobeStyle::default(),
            routes: RouteStyle::default(),
            lighting: LightingStyle::default(),
            stars: StarfieldStyle::default(),
            textures: TextureConfig::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub position: [f64; 3],
    pub target: [f64; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 40.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Everything tunable about the globe. Every field is optional in JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    pub scene: SceneConfig,
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
}

impl GlobeConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(payload).map_err(ConfigError::Parse)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let payload = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&payload)?;
        tracing::debug!(path = %path.display(), "loaded globe config");
        Ok(config)
    }
}
