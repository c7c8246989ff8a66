//! Frame export
//!
//! Writes the current framebuffer as a timestamped PNG.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Result;
use crate::rasterizer::Framebuffer;

/// File name for a frame saved at `millis` since the Unix epoch
pub fn frame_file_name(millis: u128) -> String {
    format!("mosaic-{}.png", millis)
}

/// Save `fb` into `dir` (created if missing) and return the written path
pub fn save_frame<P: AsRef<Path>>(fb: &Framebuffer, dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let path = dir.join(frame_file_name(millis));

    image::save_buffer(
        &path,
        &fb.pixels,
        fb.width as u32,
        fb.height as u32,
        image::ExtendedColorType::Rgba8,
    )?;

    tracing::info!(path = %path.display(), width = fb.width, height = fb.height, "saved frame");
    Ok(path)
}
