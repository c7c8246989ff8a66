//! Video sources sampled by the mosaic
//!
//! The mosaic only ever references a frame through UVs, so any source that
//! can hand out a [`Texture`] works: a decoded still image, a procedural test
//! pattern, or nothing at all (tiles fall back to a placeholder color).

use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::rasterizer::{Color, Texture};

/// Which source to open at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum SourceConfig {
    /// Animated color bars, no device needed
    #[default]
    TestPattern,
    /// Still image from disk (PNG, JPEG or BMP)
    Image(PathBuf),
    /// No source; tiles render the placeholder color
    None,
}

/// A continuously updating single frame
pub trait CaptureSource {
    /// Advance by `dt` seconds. Returns true when a new frame is available.
    fn poll(&mut self, dt: f32) -> Result<bool>;
    /// Latest frame, if any
    fn frame(&self) -> Option<&Texture>;
    fn describe(&self) -> String;
}

/// Open the configured source. A still image that fails to load is an error;
/// the caller decides whether to fall back.
pub fn open_source(config: &SourceConfig) -> Result<Box<dyn CaptureSource>> {
    let source: Box<dyn CaptureSource> = match config {
        SourceConfig::TestPattern => Box::new(TestPattern::new(TestPattern::WIDTH, TestPattern::HEIGHT)),
        SourceConfig::Image(path) => Box::new(StillImage::open(path)?),
        SourceConfig::None => Box::new(NoSource),
    };
    tracing::info!(source = %source.describe(), "opened capture source");
    Ok(source)
}

/// Frame decoded once from an image file
pub struct StillImage {
    texture: Texture,
    delivered: bool,
}

impl StillImage {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_texture(Texture::from_file(path)?))
    }

    pub fn from_texture(texture: Texture) -> Self {
        Self {
            texture,
            delivered: false,
        }
    }
}

impl CaptureSource for StillImage {
    fn poll(&mut self, _dt: f32) -> Result<bool> {
        // Only the first poll yields a "new" frame
        Ok(!std::mem::replace(&mut self.delivered, true))
    }

    fn frame(&self) -> Option<&Texture> {
        Some(&self.texture)
    }

    fn describe(&self) -> String {
        format!(
            "image {} ({}x{})",
            self.texture.name,
            self.texture.width,
            self.texture.height
        )
    }
}

/// Procedural moving color bars
pub struct TestPattern {
    texture: Texture,
    time: f32,
    last_offset: Option<usize>,
}

impl TestPattern {
    pub const WIDTH: usize = 320;
    pub const HEIGHT: usize = 240;

    /// Bar scroll speed in texels per second
    const SPEED: f32 = 40.0;

    const BARS: [Color; 7] = [
        Color::new(192, 192, 192),
        Color::new(192, 192, 0),
        Color::new(0, 192, 192),
        Color::new(0, 192, 0),
        Color::new(192, 0, 192),
        Color::new(192, 0, 0),
        Color::new(0, 0, 192),
    ];

    pub fn new(width: usize, height: usize) -> Self {
        Self {
            texture: Texture::new(width, height),
            time: 0.0,
            last_offset: None,
        }
    }

    fn paint(&mut self, offset: usize) {
        let tex = &mut self.texture;
        let bar_width = (tex.width / Self::BARS.len()).max(1);
        for y in 0..tex.height {
            // Vertical luminance ramp so rows are distinguishable too
            let shade = 0.35 + 0.65 * (1.0 - y as f32 / tex.height.max(1) as f32);
            let shade = (shade * 255.0) as u8;
            for x in 0..tex.width {
                let bar = ((x + offset) / bar_width) % Self::BARS.len();
                tex.pixels[y * tex.width + x] = Self::BARS[bar].modulate(Color::new(shade, shade, shade));
            }
        }
    }
}

impl CaptureSource for TestPattern {
    fn poll(&mut self, dt: f32) -> Result<bool> {
        self.time += dt;
        let offset = (self.time * Self::SPEED) as usize % self.texture.width.max(1);
        if self.last_offset == Some(offset) {
            return Ok(false);
        }
        self.paint(offset);
        self.last_offset = Some(offset);
        Ok(true)
    }

    fn frame(&self) -> Option<&Texture> {
        self.last_offset.map(|_| &self.texture)
    }

    fn describe(&self) -> String {
        format!("test pattern ({}x{})", self.texture.width, self.texture.height)
    }
}

/// Stand-in when no device or file is available
pub struct NoSource;

impl CaptureSource for NoSource {
    fn poll(&mut self, _dt: f32) -> Result<bool> {
        Ok(false)
    }

    fn frame(&self) -> Option<&Texture> {
        None
    }

    fn describe(&self) -> String {
        "no source".to_string()
    }
}
