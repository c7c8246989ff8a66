//! Startup configuration
//!
//! Uses RON (Rusty Object Notation) so the option lists stay hand-editable.
//! Every field has a default; a missing file means "all defaults".

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::capture::SourceConfig;
use crate::controller::ControllerOptions;
use crate::error::{MosaicError, Result};
use crate::rasterizer::{Color, MAX_FRAMEBUFFER_SIDE, RENDER_HEIGHT};

/// Config file looked up when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "trimosaic.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window_width: u32,
    pub window_height: u32,
    /// Framebuffer rows; columns follow the window aspect
    pub render_height: usize,
    pub tile_counts: Vec<u32>,
    pub default_tile_index: usize,
    pub colors: Vec<Color>,
    pub default_color_index: usize,
    /// Mirror the source horizontally (front-facing camera)
    pub mirror_uv: bool,
    pub source: SourceConfig,
    /// Where saved frames go
    pub capture_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 800,
            render_height: RENDER_HEIGHT,
            tile_counts: vec![4, 8, 12, 16, 24, 32, 48, 64, 96, 128],
            default_tile_index: 5,
            colors: vec![
                Color::WHITE,
                Color::from_hex(0x1e90ff), // dodger blue
                Color::from_hex(0xff6347), // tomato
                Color::from_hex(0x7cfc00), // lawn green
                Color::from_hex(0xffd700), // gold
                Color::from_hex(0xda70d6), // orchid
            ],
            default_color_index: 0,
            mirror_uv: true,
            source: SourceConfig::default(),
            capture_dir: PathBuf::from("captures"),
        }
    }
}

impl Config {
    /// Parse from a RON string and validate
    pub fn from_ron(s: &str, origin: &Path) -> Result<Self> {
        let config: Config = ron::from_str(s).map_err(|source| MosaicError::ConfigParse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a RON file; a missing file yields the defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config = Self::from_ron(&contents, path)?;
                tracing::info!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.render_height == 0 {
            return Err(MosaicError::Config("render_height must be positive".into()));
        }
        if self.render_height > MAX_FRAMEBUFFER_SIDE {
            return Err(MosaicError::Config(format!(
                "render_height {} exceeds the maximum of {}",
                self.render_height, MAX_FRAMEBUFFER_SIDE
            )));
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(MosaicError::Config("window size must be positive".into()));
        }
        self.controller_options().validate()
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            tile_counts: self.tile_counts.clone(),
            colors: self.colors.clone(),
            default_tile_index: self.default_tile_index,
            default_color_index: self.default_color_index,
            mirror_uv: self.mirror_uv,
        }
    }
}
