//! Interactive controller
//!
//! Owns the tile-density and tint selection, rebuilds the mosaic mesh when
//! either the density or the viewport aspect changes, and forwards geometry
//! and tint to the renderer. The live mesh is shared as an `Arc` and
//! replaced wholesale on every rebuild.

mod command;
mod state;

pub use command::{Command, Effect};
pub use state::{wrap_index, ControllerState};

use std::sync::Arc;

use crate::error::{MosaicError, Result};
use crate::rasterizer::{Color, Renderer};
use crate::tessellation::{MeshBuffer, TessellationParams};

/// Densest selectable option; keeps every mesh well under the builder's
/// triangle limit at common window shapes
pub const MAX_TILE_COUNT: u32 = 1024;

/// Fixed option lists and defaults, set once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    /// Tiles across the viewport height, ascending
    pub tile_counts: Vec<u32>,
    pub colors: Vec<Color>,
    pub default_tile_index: usize,
    pub default_color_index: usize,
    pub mirror_uv: bool,
}

impl ControllerOptions {
    pub fn validate(&self) -> Result<()> {
        if self.tile_counts.is_empty() {
            return Err(MosaicError::Config("tile_counts is empty".into()));
        }
        if self.colors.is_empty() {
            return Err(MosaicError::Config("colors is empty".into()));
        }
        if self.tile_counts.contains(&0) {
            return Err(MosaicError::Config("tile_counts must be positive".into()));
        }
        if let Some(&count) = self.tile_counts.iter().find(|&&n| n > MAX_TILE_COUNT) {
            return Err(MosaicError::Config(format!(
                "tile count {} exceeds the maximum of {}",
                count, MAX_TILE_COUNT
            )));
        }
        if self.default_tile_index >= self.tile_counts.len() {
            return Err(MosaicError::Config(format!(
                "default_tile_index {} out of range (0..{})",
                self.default_tile_index,
                self.tile_counts.len()
            )));
        }
        if self.default_color_index >= self.colors.len() {
            return Err(MosaicError::Config(format!(
                "default_color_index {} out of range (0..{})",
                self.default_color_index,
                self.colors.len()
            )));
        }
        Ok(())
    }

    pub fn default_state(&self) -> ControllerState {
        ControllerState::new(self.default_tile_index, self.default_color_index)
    }
}

pub struct Controller<R: Renderer> {
    options: ControllerOptions,
    state: ControllerState,
    aspect: f32,
    mesh: Arc<MeshBuffer>,
    renderer: R,
}

impl<R: Renderer> Controller<R> {
    /// Validate options, build the default mesh and push it with the default
    /// tint to the renderer
    pub fn new(options: ControllerOptions, aspect: f32, mut renderer: R) -> Result<Self> {
        options.validate()?;
        let state = options.default_state();
        let mesh = Arc::new(Self::build(&options, state.tile_index, aspect)?);

        renderer.upload(Arc::clone(&mesh));
        renderer.set_tint(options.colors[state.color_index]);
        renderer.request_redraw();

        Ok(Self {
            options,
            state,
            aspect,
            mesh,
            renderer,
        })
    }

    fn build(options: &ControllerOptions, tile_index: usize, aspect: f32) -> Result<MeshBuffer> {
        let inner_radius = 2.0 / options.tile_counts[tile_index] as f32;
        let mesh = TessellationParams::new(inner_radius, aspect)
            .with_mirror(options.mirror_uv)
            .build()?;
        tracing::debug!(
            tiles = options.tile_counts[tile_index],
            aspect,
            nx = mesh.nx,
            ny = mesh.ny,
            triangles = mesh.triangle_count(),
            "rebuilt mosaic mesh"
        );
        Ok(mesh)
    }

    fn replace_mesh(&mut self, mesh: MeshBuffer) {
        self.mesh = Arc::new(mesh);
        self.renderer.upload(Arc::clone(&self.mesh));
        self.renderer.request_redraw();
    }

    /// Jump to tile-count option `index`
    pub fn set_tile_count(&mut self, index: usize) -> Result<()> {
        let len = self.options.tile_counts.len();
        if index >= len {
            return Err(MosaicError::IndexOutOfRange { what: "tile count", index, len });
        }
        let mesh = Self::build(&self.options, index, self.aspect)?;
        self.state.tile_index = index;
        self.replace_mesh(mesh);
        Ok(())
    }

    /// Move through the tile-count options with wrap-around
    pub fn step_tile_count(&mut self, delta: isize) -> Result<()> {
        let next = self.state.stepped_tile(delta, self.options.tile_counts.len());
        self.set_tile_count(next.tile_index)
    }

    /// Jump to tint option `index`; no mesh rebuild
    pub fn set_color(&mut self, index: usize) -> Result<()> {
        let len = self.options.colors.len();
        if index >= len {
            return Err(MosaicError::IndexOutOfRange { what: "color", index, len });
        }
        self.state.color_index = index;
        self.renderer.set_tint(self.options.colors[index]);
        self.renderer.request_redraw();
        Ok(())
    }

    /// Move through the tint options with wrap-around. Infallible: only
    /// density changes rebuild the mesh.
    pub fn step_color(&mut self, delta: isize) {
        let next = self.state.stepped_color(delta, self.options.colors.len());
        self.state.color_index = next.color_index;
        self.renderer.set_tint(self.options.colors[next.color_index]);
        self.renderer.request_redraw();
    }

    /// Restore both selections to their configured defaults
    pub fn reset(&mut self) -> Result<()> {
        let defaults = self.options.default_state();
        self.set_tile_count(defaults.tile_index)?;
        self.set_color(defaults.color_index)
    }

    /// Viewport resized: rebuild for the new aspect ratio
    pub fn set_aspect(&mut self, aspect: f32) -> Result<()> {
        if aspect == self.aspect {
            return Ok(());
        }
        let mesh = Self::build(&self.options, self.state.tile_index, aspect)?;
        self.aspect = aspect;
        self.replace_mesh(mesh);
        Ok(())
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn tile_count(&self) -> u32 {
        self.options.tile_counts[self.state.tile_index]
    }

    pub fn tint(&self) -> Color {
        self.options.colors[self.state.color_index]
    }

    /// Snapshot of the live mesh
    pub fn mesh(&self) -> Arc<MeshBuffer> {
        Arc::clone(&self.mesh)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
