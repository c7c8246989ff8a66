//! Core rendering functions
//! Flat-shaded triangle rasterization of the mosaic mesh

use std::sync::Arc;

use super::math::{barycentric, ndc_to_pixel, Vec2};
use super::types::{Color, Texture};
use crate::tessellation::MeshBuffer;

/// Rendering collaborator the controller talks to.
///
/// The controller only hands over geometry and tint; drawing happens when
/// the host loop calls `render_frame`.
pub trait Renderer {
    /// Replace the live mesh
    fn upload(&mut self, mesh: Arc<MeshBuffer>);
    /// Set the flat tint multiplied into every sampled color
    fn set_tint(&mut self, tint: Color);
    /// Mark the current image as stale
    fn request_redraw(&mut self);
    /// Draw the mesh, sampling `source` at each triangle's UV
    fn render_frame(&mut self, source: Option<&Texture>);
}

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&bytes);
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            let p = &self.pixels[idx..idx + 4];
            Color::with_alpha(p[0], p[1], p[2], p[3])
        } else {
            Color::BLACK
        }
    }

    /// Fill every pixel whose center lies inside (or on an edge of) the
    /// triangle. Shared edges get drawn by both neighbours, which is
    /// harmless with flat colors and leaves no seams.
    pub fn fill_triangle(&mut self, v1: Vec2, v2: Vec2, v3: Vec2, color: Color) {
        let min_x = v1.x.min(v2.x).min(v3.x).floor().max(0.0) as usize;
        let max_x = (v1.x.max(v2.x).max(v3.x).ceil()).min(self.width as f32).max(0.0) as usize;
        let min_y = v1.y.min(v2.y).min(v3.y).floor().max(0.0) as usize;
        let max_y = (v1.y.max(v2.y).max(v3.y).ceil()).min(self.height as f32).max(0.0) as usize;

        const ERR: f32 = -0.0001;
        for y in min_y..max_y {
            for x in min_x..max_x {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let (u, v, w) = barycentric(p, v1, v2, v3);
                if u >= ERR && v >= ERR && w >= ERR {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }
}

/// CPU renderer: rasterizes the mosaic into a [`Framebuffer`]
pub struct SoftwareRenderer {
    pub fb: Framebuffer,
    mesh: Option<Arc<MeshBuffer>>,
    tint: Color,
    background: Color,
    dirty: bool,
}

impl SoftwareRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            fb: Framebuffer::new(width, height),
            mesh: None,
            tint: Color::WHITE,
            background: Color::BLACK,
            dirty: true,
        }
    }

    /// Reallocate the framebuffer (window resized); forces a redraw
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.fb.width || height != self.fb.height {
            self.fb = Framebuffer::new(width, height);
            self.dirty = true;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.fb.width as f32 / self.fb.height.max(1) as f32
    }

    pub fn tint(&self) -> Color {
        self.tint
    }

    pub fn mesh(&self) -> Option<&Arc<MeshBuffer>> {
        self.mesh.as_ref()
    }

    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }
}

impl Renderer for SoftwareRenderer {
    fn upload(&mut self, mesh: Arc<MeshBuffer>) {
        self.mesh = Some(mesh);
        self.dirty = true;
    }

    fn set_tint(&mut self, tint: Color) {
        self.tint = tint;
        self.dirty = true;
    }

    fn request_redraw(&mut self) {
        self.dirty = true;
    }

    fn render_frame(&mut self, source: Option<&Texture>) {
        if !self.dirty {
            return;
        }
        self.fb.clear(self.background);

        if let Some(mesh) = &self.mesh {
            let (w, h) = (self.fb.width, self.fb.height);
            for (tri, uv) in mesh.triangles() {
                // Texture rows run top to bottom, V runs bottom to top
                let sampled = source
                    .map(|tex| tex.sample(uv.x, 1.0 - uv.y))
                    .unwrap_or(Color::PLACEHOLDER);
                let color = sampled.modulate(self.tint);

                let [a, b, c] = tri.map(|v| ndc_to_pixel(v, w, h));
                self.fb.fill_triangle(a, b, c, color);
            }
        }

        self.dirty = false;
    }
}
