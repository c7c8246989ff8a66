//! Tessellation builder
//!
//! Tiles the normalized viewport [-1,1]² with triangles from
//! [`make_triangle`], alternating orientation in a checkerboard, and flattens
//! them into a position + UV buffer ready for a renderer.
//!
//! Layout: column `i` is a vertical strip of width `w = 3·rx`; inside a
//! strip, triangles stack every `h = √3·ry` and alternate orientation, so
//! vertically adjacent cells share a slanted edge and neighbouring strips
//! meet along straight vertical lines.

use super::triangle::{make_triangle, Orientation, Triangle, SQRT_3};
use crate::error::{MosaicError, Result};
use crate::rasterizer::Vec2;

/// Largest mesh the builder will emit (about 60 MB of positions and UVs)
pub const MAX_TRIANGLES: usize = 2_000_000;

/// Position of one triangle in the tiling grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub i: usize,
    pub j: usize,
}

impl TileCoord {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::for_cell(self.i, self.j)
    }
}

/// Input to the builder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationParams {
    /// Half the apex-to-opposite-edge distance (2 / tile count)
    pub inner_radius: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Mirror U so a front-facing camera reads like a mirror
    pub mirror_u: bool,
}

impl TessellationParams {
    pub fn new(inner_radius: f32, aspect: f32) -> Self {
        Self {
            inner_radius,
            aspect,
            mirror_u: true,
        }
    }

    pub fn with_mirror(mut self, mirror_u: bool) -> Self {
        self.mirror_u = mirror_u;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.inner_radius.is_finite() && self.inner_radius > 0.0) {
            return Err(MosaicError::InvalidParameter(format!(
                "inner radius must be finite and positive, got {}",
                self.inner_radius
            )));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(MosaicError::InvalidParameter(format!(
                "aspect ratio must be finite and positive, got {}",
                self.aspect
            )));
        }
        Ok(())
    }

    pub fn grid(&self) -> Result<Grid> {
        self.validate()?;
        Grid::from_params(self.inner_radius, self.aspect)
    }

    pub fn build(&self) -> Result<MeshBuffer> {
        let grid = self.grid()?;
        Ok(grid.build(self.mirror_u))
    }
}

/// Derived grid layout for one (inner radius, aspect) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Columns
    pub nx: usize,
    /// Rows
    pub ny: usize,
    /// Horizontal radius (aspect-corrected)
    pub rx: f32,
    /// Vertical radius
    pub ry: f32,
    /// Column pitch (outer triangle width)
    pub w: f32,
    /// Row pitch
    pub h: f32,
    /// Centering offset X
    pub cx: f32,
    /// Centering offset Y
    pub cy: f32,
}

impl Grid {
    fn from_params(r: f32, aspect: f32) -> Result<Self> {
        let rx = r / aspect;
        let ry = r;
        let w = 3.0 * r / aspect;
        let h = 3.0 * r / SQRT_3;

        // One spare column and row of slack: alternating cells are shifted
        // outward by the checkerboard offset.
        let nx = ((2.0 + r) / w).ceil().max(1.0);
        let ny = ((2.0 / h).ceil() + 1.0).max(1.0);

        // Checked in f64 before any integer cast; tiny radii overflow usize
        let cells = nx as f64 * ny as f64;
        if cells > MAX_TRIANGLES as f64 {
            return Err(MosaicError::InvalidParameter(format!(
                "inner radius {} at aspect {} needs {:.0} triangles (limit {})",
                r, aspect, cells, MAX_TRIANGLES
            )));
        }
        let (nx, ny) = (nx as usize, ny as usize);

        // Bounding box of the tiling: x in [cx - rx, cx - rx + nx·w],
        // y in [cy - h, cy + ny·h]. Center both on the origin.
        let cx = rx - nx as f32 * w / 2.0;
        let cy = -((ny - 1) as f32) * h / 2.0;

        Ok(Self { nx, ny, rx, ry, w, h, cx, cy })
    }

    pub fn triangle_count(&self) -> usize {
        self.nx * self.ny
    }

    /// Geometric center (and centroid) of a cell's triangle
    pub fn cell_center(&self, coord: TileCoord) -> Vec2 {
        let shift = if coord.orientation().is_flipped() { self.rx } else { 0.0 };
        Vec2::new(
            self.w * coord.i as f32 + shift + self.cx,
            self.h * coord.j as f32 + self.cy,
        )
    }

    pub fn triangle(&self, coord: TileCoord) -> Triangle {
        make_triangle(self.cell_center(coord), self.rx, self.ry, coord.orientation())
    }

    /// All cells in buffer order: row-major, j outer, i inner
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        (0..self.ny).flat_map(move |j| (0..self.nx).map(move |i| TileCoord::new(i, j)))
    }

    fn build(&self, mirror_u: bool) -> MeshBuffer {
        let count = self.triangle_count();
        let mut positions = Vec::with_capacity(count * 9);
        let mut uvs = Vec::with_capacity(count * 6);

        for coord in self.coords() {
            let center = self.cell_center(coord);
            let tri = make_triangle(center, self.rx, self.ry, coord.orientation());

            for v in tri.vertices {
                positions.extend_from_slice(&[v.x, v.y, 0.0]);
            }

            let u = (center.x + 1.0) / 2.0;
            let u = if mirror_u { 1.0 - u } else { u };
            let v = (center.y + 1.0) / 2.0;
            for _ in 0..3 {
                uvs.extend_from_slice(&[u, v]);
            }
        }

        MeshBuffer {
            positions,
            uvs,
            nx: self.nx,
            ny: self.ny,
        }
    }
}

/// Flat vertex buffer: 3 floats of position and 2 of UV per vertex,
/// 3 vertices per triangle
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBuffer {
    pub positions: Vec<f32>,
    pub uvs: Vec<f32>,
    pub nx: usize,
    pub ny: usize,
}

impl MeshBuffer {
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 9
    }

    /// Vertex positions of triangle `k` (z dropped)
    pub fn triangle_positions(&self, k: usize) -> [Vec2; 3] {
        let p = &self.positions[k * 9..k * 9 + 9];
        [
            Vec2::new(p[0], p[1]),
            Vec2::new(p[3], p[4]),
            Vec2::new(p[6], p[7]),
        ]
    }

    /// Flat UV shared by the three vertices of triangle `k`
    pub fn triangle_uv(&self, k: usize) -> Vec2 {
        Vec2::new(self.uvs[k * 6], self.uvs[k * 6 + 1])
    }

    /// (positions, uv) for every triangle in buffer order
    pub fn triangles(&self) -> impl Iterator<Item = ([Vec2; 3], Vec2)> + '_ {
        (0..self.triangle_count()).map(move |k| (self.triangle_positions(k), self.triangle_uv(k)))
    }
}

/// Tile the viewport with triangles of the given inner radius (mirrored UVs)
pub fn build_mesh(inner_radius: f32, aspect: f32) -> Result<MeshBuffer> {
    TessellationParams::new(inner_radius, aspect).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASPECTS: [f32; 5] = [0.5, 1.0, 4.0 / 3.0, 16.0 / 9.0, 3.0];
    const RADII: [f32; 6] = [2.0 / 4.0, 2.0 / 7.0, 2.0 / 16.0, 2.0 / 32.0, 0.9, 3.0];

    fn grid(r: f32, aspect: f32) -> Grid {
        TessellationParams::new(r, aspect).grid().unwrap()
    }

    fn triangles(g: &Grid) -> Vec<Triangle> {
        g.coords().map(|c| g.triangle(c)).collect()
    }

    fn shared_vertices(a: &Triangle, b: &Triangle) -> usize {
        a.vertices
            .iter()
            .filter(|va| b.vertices.iter().any(|vb| va.distance(*vb) < 1e-5))
            .count()
    }

    fn interiors_disjoint(a: &Triangle, b: &Triangle) -> bool {
        let strictly_inside = |t: &Triangle, p: Vec2| t.contains(p, -1e-4);
        !a.vertices.iter().any(|v| strictly_inside(b, *v))
            && !b.vertices.iter().any(|v| strictly_inside(a, *v))
            && !b.contains(a.centroid(), 1e-4)
            && !a.contains(b.centroid(), 1e-4)
    }

    #[test]
    fn test_covers_viewport_without_overlap() {
        const SAMPLES: usize = 41;
        for &aspect in &ASPECTS {
            for &r in &RADII {
                let g = grid(r, aspect);
                let tris = triangles(&g);
                for sy in 0..SAMPLES {
                    for sx in 0..SAMPLES {
                        let p = Vec2::new(
                            -1.0 + 2.0 * sx as f32 / (SAMPLES - 1) as f32,
                            -1.0 + 2.0 * sy as f32 / (SAMPLES - 1) as f32,
                        );
                        let touching = tris.iter().filter(|t| t.contains(p, 1e-4)).count();
                        let inside = tris.iter().filter(|t| t.contains(p, -1e-4)).count();
                        assert!(touching >= 1, "gap at {:?} (r={}, aspect={})", p, r, aspect);
                        assert!(inside <= 1, "overlap at {:?} (r={}, aspect={})", p, r, aspect);
                    }
                }
            }
        }
    }

    #[test]
    fn test_neighbours_share_edges() {
        for &aspect in &ASPECTS {
            let g = grid(2.0 / 8.0, aspect);
            for j in 0..g.ny {
                for i in 0..g.nx {
                    let here = TileCoord::new(i, j);
                    let t = g.triangle(here);

                    if j + 1 < g.ny {
                        let above = g.triangle(TileCoord::new(i, j + 1));
                        assert_eq!(shared_vertices(&t, &above), 2);
                        assert!(interiors_disjoint(&t, &above));
                    }

                    if i + 1 < g.nx {
                        let right = g.triangle(TileCoord::new(i + 1, j));
                        // Flipped then normal share the vertical edge;
                        // normal then flipped touch apex to apex.
                        let expected = if here.orientation().is_flipped() { 2 } else { 1 };
                        assert_eq!(shared_vertices(&t, &right), expected);
                        assert!(interiors_disjoint(&t, &right));
                    }
                }
            }
        }
    }

    #[test]
    fn test_buffer_sizes() {
        for &aspect in &ASPECTS {
            for &r in &RADII {
                let g = grid(r, aspect);
                let mesh = build_mesh(r, aspect).unwrap();
                assert_eq!((mesh.nx, mesh.ny), (g.nx, g.ny));
                assert_eq!(mesh.positions.len(), 9 * g.nx * g.ny);
                assert_eq!(mesh.uvs.len(), 6 * g.nx * g.ny);
                assert_eq!(mesh.positions.len() / 9, mesh.uvs.len() / 6);
                assert_eq!(mesh.triangle_count(), g.triangle_count());
            }
        }
    }

    #[test]
    fn test_orientation_alternates() {
        let g = grid(2.0 / 12.0, 16.0 / 9.0);
        let mesh = build_mesh(2.0 / 12.0, 16.0 / 9.0).unwrap();
        for (k, coord) in g.coords().enumerate() {
            let [a, b, _] = mesh.triangle_positions(k);
            let apex_right = a.x > b.x;
            assert_eq!(apex_right, (coord.i + coord.j) % 2 == 0, "cell {:?}", coord);
        }
    }

    #[test]
    fn test_flat_uvs_at_centroid() {
        let g = grid(2.0 / 10.0, 4.0 / 3.0);
        let mesh = build_mesh(2.0 / 10.0, 4.0 / 3.0).unwrap();
        for (k, coord) in g.coords().enumerate() {
            let uv = &mesh.uvs[k * 6..k * 6 + 6];
            assert_eq!(uv[0], uv[2]);
            assert_eq!(uv[0], uv[4]);
            assert_eq!(uv[1], uv[3]);
            assert_eq!(uv[1], uv[5]);

            let c = g.triangle(coord).centroid();
            assert!((uv[0] - (1.0 - (c.x + 1.0) / 2.0)).abs() < 1e-5);
            assert!((uv[1] - (c.y + 1.0) / 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_unmirrored_uvs() {
        let params = TessellationParams::new(0.25, 1.0);
        let mirrored = params.build().unwrap();
        let plain = params.with_mirror(false).build().unwrap();
        for k in 0..mirrored.triangle_count() {
            let m = mirrored.triangle_uv(k);
            let p = plain.triangle_uv(k);
            assert!((m.x + p.x - 1.0).abs() < 1e-6);
            assert_eq!(m.y, p.y);
        }
        assert_eq!(mirrored.positions, plain.positions);
    }

    #[test]
    fn test_deterministic() {
        let a = build_mesh(2.0 / 24.0, 1.6).unwrap();
        let b = build_mesh(2.0 / 24.0, 1.6).unwrap();
        let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a.positions), bits(&b.positions));
        assert_eq!(bits(&a.uvs), bits(&b.uvs));
    }

    #[test]
    fn test_centered_on_viewport() {
        for &aspect in &ASPECTS {
            for &r in &RADII {
                let mesh = build_mesh(r, aspect).unwrap();
                let (mut min, mut max) = (Vec2::new(f32::MAX, f32::MAX), Vec2::new(f32::MIN, f32::MIN));
                for (tri, _) in mesh.triangles() {
                    for v in tri {
                        min = Vec2::new(min.x.min(v.x), min.y.min(v.y));
                        max = Vec2::new(max.x.max(v.x), max.y.max(v.y));
                    }
                }
                let tol = 1e-4 * (1.0 + max.x.abs() + max.y.abs());
                assert!((min.x + max.x).abs() < tol, "x off-center (r={}, aspect={})", r, aspect);
                assert!((min.y + max.y).abs() < tol, "y off-center (r={}, aspect={})", r, aspect);
            }
        }
    }

    #[test]
    fn test_widescreen_scenario() {
        let r = 2.0 / 32.0;
        let aspect = 16.0 / 9.0;
        let g = grid(r, aspect);
        let mesh = build_mesh(r, aspect).unwrap();

        let expected_nx = ((2.0 + r) / (3.0 * r / aspect)).ceil() as usize;
        assert_eq!(g.nx, expected_nx);
        assert_eq!(g.nx, 20);
        assert_eq!(g.ny, 20);
        assert_eq!(mesh.triangle_count(), g.nx * g.ny);

        assert_eq!(TileCoord::new(0, 0).orientation(), Orientation::Normal);
        let [a, _, _] = mesh.triangle_positions(0);
        assert!((a.x - (g.cx + 2.0 * g.rx)).abs() < 1e-6);
        assert!((a.y - g.cy).abs() < 1e-6);
    }

    #[test]
    fn test_huge_radius_still_covers() {
        let mesh = build_mesh(50.0, 1.0).unwrap();
        assert_eq!((mesh.nx, mesh.ny), (1, 2));
        let g = grid(50.0, 1.0);
        let tris = triangles(&g);
        for p in [Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, -1.0)] {
            assert!(tris.iter().any(|t| t.contains(p, 1e-4)));
        }
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        for (r, aspect) in [(0.0, 1.0), (-0.1, 1.0), (0.1, 0.0), (0.1, -2.0), (f32::NAN, 1.0), (0.1, f32::INFINITY)] {
            assert!(matches!(build_mesh(r, aspect), Err(MosaicError::InvalidParameter(_))));
        }
    }

    #[test]
    fn test_rejects_oversized_grids() {
        for (r, aspect) in [(1e-30, 1.0), (1e-4, 1.0), (0.1, 1e30), (f32::MIN_POSITIVE, 1.0)] {
            assert!(
                matches!(build_mesh(r, aspect), Err(MosaicError::InvalidParameter(_))),
                "r={} aspect={} should be rejected",
                r,
                aspect
            );
        }
    }

    #[test]
    fn test_largest_accepted_grid_fits_limit() {
        let g = grid(2.0 / 1024.0, 4.0);
        assert!(g.triangle_count() <= MAX_TRIANGLES);
    }
}
