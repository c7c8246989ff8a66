//! 2D vector math for the mosaic plane

use std::ops::{Add, Mul, Sub};
use serde::{Serialize, Deserialize};

/// 2D Vector (positions in NDC, pixel coordinates and texture coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product (twice the signed area of the
    /// parallelogram spanned by the two vectors)
    pub fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn len(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).len()
    }

    pub fn scale(self, s: f32) -> Vec2 {
        Vec2 {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, s: f32) -> Vec2 {
        self.scale(s)
    }
}

/// Calculate barycentric coordinates for point p in triangle (v1, v2, v3)
/// Returns (u, v, w) where u + v + w = 1 if point is inside triangle.
/// Works for either winding.
pub fn barycentric(p: Vec2, v1: Vec2, v2: Vec2, v3: Vec2) -> (f32, f32, f32) {
    let d = (v2.y - v3.y) * (v1.x - v3.x) + (v3.x - v2.x) * (v1.y - v3.y);

    if d.abs() < 1e-12 {
        return (-1.0, -1.0, -1.0); // Degenerate triangle
    }

    let u = ((v2.y - v3.y) * (p.x - v3.x) + (v3.x - v2.x) * (p.y - v3.y)) / d;
    let v = ((v3.y - v1.y) * (p.x - v3.x) + (v1.x - v3.x) * (p.y - v3.y)) / d;
    let w = 1.0 - u - v;

    (u, v, w)
}

/// Map a point from normalized device coordinates ([-1,1], +Y up)
/// to pixel coordinates (+Y down)
pub fn ndc_to_pixel(p: Vec2, width: usize, height: usize) -> Vec2 {
    Vec2 {
        x: (p.x + 1.0) * 0.5 * width as f32,
        y: (1.0 - p.y) * 0.5 * height as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_cross() {
        let a = Vec2::new(1.0, 0.0);
        let b = Vec2::new(0.0, 1.0);
        assert!((a.cross(b) - 1.0).abs() < 0.001);
        assert!((b.cross(a) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_barycentric_inside() {
        let v1 = Vec2::new(0.0, 0.0);
        let v2 = Vec2::new(10.0, 0.0);
        let v3 = Vec2::new(5.0, 10.0);
        let (u, v, w) = barycentric(Vec2::new(5.0, 3.0), v1, v2, v3);
        assert!(u >= 0.0 && v >= 0.0 && w >= 0.0);
    }

    #[test]
    fn test_barycentric_either_winding() {
        let v1 = Vec2::new(0.0, 0.0);
        let v2 = Vec2::new(5.0, 10.0);
        let v3 = Vec2::new(10.0, 0.0);
        let (u, v, w) = barycentric(Vec2::new(5.0, 3.0), v1, v2, v3);
        assert!(u >= 0.0 && v >= 0.0 && w >= 0.0);

        let (u, v, w) = barycentric(Vec2::new(-1.0, 3.0), v1, v2, v3);
        assert!(u < 0.0 || v < 0.0 || w < 0.0);
    }

    #[test]
    fn test_ndc_to_pixel_corners() {
        let tl = ndc_to_pixel(Vec2::new(-1.0, 1.0), 640, 400);
        let br = ndc_to_pixel(Vec2::new(1.0, -1.0), 640, 400);
        assert_eq!(tl, Vec2::new(0.0, 0.0));
        assert_eq!(br, Vec2::new(640.0, 400.0));
    }
}
