//! trimosaic: live video remapped onto a triangle mosaic
//!
//! The viewport is tiled with equilateral triangles in alternating
//! orientation; each triangle is flat-filled with the source pixel under its
//! centroid. Keyboard controls change tile density and tint, and save the
//! current frame as a PNG.
//!
//! - `tessellation`: pure geometry (triangle primitive, viewport tiling)
//! - `controller`: selection state, command dispatch, mesh ownership
//! - `rasterizer`: CPU renderer the controller drives
//! - `capture`, `export`, `input`, `config`, `app`: collaborators and shell

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod rasterizer;
pub mod tessellation;
pub mod controller;
pub mod capture;
pub mod config;
pub mod export;
pub mod input;
pub mod app;
