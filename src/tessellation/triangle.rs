//! Equilateral triangle primitive
//!
//! One triangle of the mosaic: apex on the horizontal axis through its
//! center, opposite edge vertical. The flipped orientation is the normal one
//! rotated 180° about the center, so both share the same winding.

use crate::rasterizer::{barycentric, Vec2};

/// √3, used for the vertical half-extent of the opposite edge
pub const SQRT_3: f32 = 1.732_050_8;

/// Which way the apex points along the horizontal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Apex points right (+X)
    Normal,
    /// Apex points left (-X)
    Flipped,
}

impl Orientation {
    /// Checkerboard orientation for grid cell (i, j)
    pub fn for_cell(i: usize, j: usize) -> Self {
        if (i + j) % 2 != 0 {
            Orientation::Flipped
        } else {
            Orientation::Normal
        }
    }

    pub fn is_flipped(self) -> bool {
        self == Orientation::Flipped
    }

    /// +1 for normal, -1 for flipped
    pub fn sign(self) -> f32 {
        match self {
            Orientation::Normal => 1.0,
            Orientation::Flipped => -1.0,
        }
    }
}

/// Immutable triangle value: three vertices plus the orientation they were built with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// [A (apex), B, C]
    pub vertices: [Vec2; 3],
    pub orientation: Orientation,
}

impl Triangle {
    pub fn centroid(&self) -> Vec2 {
        let [a, b, c] = self.vertices;
        Vec2::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
    }

    /// Positive for counter-clockwise winding
    pub fn signed_area(&self) -> f32 {
        let [a, b, c] = self.vertices;
        0.5 * (b - a).cross(c - a)
    }

    /// Point-in-triangle with a tolerance on every barycentric weight.
    /// Positive `eps` includes points on (or just outside) the edges,
    /// negative `eps` accepts only points strictly inside.
    pub fn contains(&self, p: Vec2, eps: f32) -> bool {
        let [a, b, c] = self.vertices;
        let (u, v, w) = barycentric(p, a, b, c);
        u >= -eps && v >= -eps && w >= -eps
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let [a, b, c] = self.vertices;
        (
            Vec2::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y)),
            Vec2::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y)),
        )
    }
}

/// Build one triangle around `center`.
///
/// `rx` and `ry` scale the two axes independently so the triangle stays
/// equilateral on screen after aspect correction. Outer width is `3·rx`,
/// outer height `6·ry/√3`.
pub fn make_triangle(center: Vec2, rx: f32, ry: f32, orientation: Orientation) -> Triangle {
    let f = orientation.sign();
    let half_edge = 3.0 * ry / SQRT_3;
    Triangle {
        vertices: [
            Vec2::new(center.x + f * 2.0 * rx, center.y),
            Vec2::new(center.x - f * rx, center.y + f * half_edge),
            Vec2::new(center.x - f * rx, center.y - f * half_edge),
        ],
        orientation,
    }
}
