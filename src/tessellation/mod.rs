//! Triangle mosaic geometry
//!
//! Pure, allocation-only code: no rendering context needed.
//! - `triangle`: single equilateral triangle in one of two orientations
//! - `mesh`: full-viewport tiling flattened to a position + UV buffer

mod triangle;
mod mesh;

pub use triangle::*;
pub use mesh::*;
