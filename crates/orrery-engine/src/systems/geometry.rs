//! Triangle geometry: UV spheres, random surface roughening, and the store
//! the renderer uploads vertex buffers from.

use glam::{Vec2, Vec3};
use crate::api::types::GeometryId;
use crate::core::rng::Rng;

/// Sphere enclosing every vertex of a geometry, in local space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Centered on the axis-aligned bounds, radius to the farthest point.
    pub fn from_points(points: &[Vec3]) -> Self {
        if points.is_empty() {
            return Self::default();
        }
        let (min, max) = points.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(lo, hi), &p| (lo.min(p), hi.max(p)),
        );
        let center = (min + max) * 0.5;
        let radius = points
            .iter()
            .map(|p| p.distance_squared(center))
            .fold(0.0f32, f32::max)
            .sqrt();
        Self { center, radius }
    }
}

/// Indexed triangle mesh with per-vertex normals and UVs.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    /// Three indices per triangle, counter-clockwise when seen from outside.
    pub indices: Vec<u32>,
    pub bounds: BoundingSphere,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as vertex position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// Positions as a flat `[x, y, z, ...]` slice for GPU upload.
    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    pub fn uv_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.uvs)
    }

    pub fn recompute_bounds(&mut self) {
        self.bounds = BoundingSphere::from_points(&self.positions);
    }
}

/// Build a UV sphere.
///
/// Rows run pole to pole; each row has `width_segments + 1` vertices so the
/// UV seam can wrap. The top and bottom rows emit one triangle per quad since
/// the other would be degenerate, giving `2·w·h − 2·w` triangles.
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    let w = width_segments.max(3);
    let h = height_segments.max(2);

    let row_len = (w + 1) as usize;
    let vertex_count = row_len * (h + 1) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        // Pole vertices sample the middle of their quad so the texture doesn't pinch.
        let u_offset = if iy == 0 {
            0.5 / w as f32
        } else if iy == h {
            -0.5 / w as f32
        } else {
            0.0
        };
        let theta = v * std::f32::consts::PI;

        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let phi = u * std::f32::consts::TAU;
            let p = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            positions.push(p);
            normals.push(p.normalize_or_zero());
            uvs.push(Vec2::new(u + u_offset, 1.0 - v));
        }
    }

    let at = |ix: u32, iy: u32| iy * (w + 1) + ix;
    let mut indices = Vec::with_capacity((2 * w * h - 2 * w) as usize * 3);
    for iy in 0..h {
        for ix in 0..w {
            let a = at(ix + 1, iy);
            let b = at(ix, iy);
            let c = at(ix, iy + 1);
            let d = at(ix + 1, iy + 1);
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    let bounds = BoundingSphere::from_points(&positions);
    Geometry {
        positions,
        normals,
        uvs,
        indices,
        bounds,
    }
}

/// Displace every vertex by an independent uniform offset in
/// `[-amplitude, amplitude]` on each axis. Indices, normals and UVs are untouched.
pub fn perturb(geometry: &mut Geometry, amplitude: f32, rng: &mut Rng) {
    for p in geometry.positions.iter_mut() {
        *p += Vec3::new(
            rng.range_f32(-amplitude, amplitude),
            rng.range_f32(-amplitude, amplitude),
            rng.range_f32(-amplitude, amplitude),
        );
    }
    geometry.recompute_bounds();
}

/// Owns every geometry for the page lifetime.
#[derive(Debug, Default)]
pub struct GeometryStore {
    geometries: Vec<Geometry>,
}

impl GeometryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, geometry: Geometry) -> GeometryId {
        let id = GeometryId(self.geometries.len() as u32);
        self.geometries.push(geometry);
        id
    }

    pub fn get(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_topology() {
        let g = sphere(1.0, 16, 16);
        assert_eq!(g.vertex_count(), 17 * 17);
        assert_eq!(g.triangle_count(), 2 * 16 * 16 - 2 * 16);
        assert!(g.indices.iter().all(|&i| (i as usize) < g.vertex_count()));
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let g = sphere(1.5, 32, 32);
        for p in &g.positions {
            assert!((p.length() - 1.5).abs() < 1e-5);
        }
        assert!((g.bounds.radius - 1.5).abs() < 1e-4);
        assert!(g.bounds.center.length() < 1e-4);
    }

    #[test]
    fn perturbation_keeps_topology_and_bounds_offsets() {
        let base = sphere(1.0, 16, 16);
        let mut rough = base.clone();
        let mut rng = Rng::new(99);
        perturb(&mut rough, 0.1, &mut rng);

        assert_eq!(rough.indices, base.indices);
        assert_eq!(rough.vertex_count(), base.vertex_count());
        let mut moved = 0;
        for (a, b) in base.positions.iter().zip(&rough.positions) {
            let d = *b - *a;
            assert!(d.x.abs() <= 0.1 && d.y.abs() <= 0.1 && d.z.abs() <= 0.1);
            if d.length() > 0.0 {
                moved += 1;
            }
        }
        assert!(moved > base.vertex_count() / 2);
    }

    #[test]
    fn perturbation_offsets_axes_independently() {
        let mut g = sphere(1.0, 16, 16);
        let before = g.positions.clone();
        perturb(&mut g, 0.1, &mut Rng::new(5));
        let differs = before.iter().zip(&g.positions).any(|(a, b)| {
            let d = *b - *a;
            (d.x - d.y).abs() > 1e-6 || (d.y - d.z).abs() > 1e-6
        });
        assert!(differs);
    }

    #[test]
    fn different_seeds_give_different_shapes() {
        let mut a = sphere(1.0, 16, 16);
        let mut b = a.clone();
        perturb(&mut a, 0.1, &mut Rng::new(1));
        perturb(&mut b, 0.1, &mut Rng::new(2));
        assert_ne!(a.positions, b.positions);
    }

    #[test]
    fn flat_views_match_vertex_count() {
        let g = sphere(1.0, 8, 6);
        assert_eq!(g.position_floats().len(), g.vertex_count() * 3);
        assert_eq!(g.uv_floats().len(), g.vertex_count() * 2);
    }

    #[test]
    fn store_hands_out_sequential_ids() {
        let mut store = GeometryStore::new();
        let a = store.add(sphere(1.0, 8, 8));
        let b = store.add(sphere(2.0, 8, 8));
        assert_eq!(a, GeometryId(0));
        assert_eq!(b, GeometryId(1));
        assert!(store.get(GeometryId(2)).is_none());
    }
}
