//! Software rasterizer for the triangle mosaic
//!
//! Features:
//! - Flat-shaded triangles (one texture sample per tile)
//! - Nearest-neighbour sampling, clamped at the frame border
//! - Tint modulation
//! - Redraw only when something changed

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;

/// Default framebuffer rows; columns follow the window aspect
pub const RENDER_HEIGHT: usize = 400;

/// Largest framebuffer side; frames are uploaded as textures with `u16` sides
pub const MAX_FRAMEBUFFER_SIDE: usize = 4096;
