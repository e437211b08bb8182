//! Ray picking against mesh entities.
//!
//! A bounding-sphere test rejects most meshes cheaply; survivors are tested
//! triangle by triangle in world space so roughened shapes pick exactly.

use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::scene::Scene;
use crate::systems::geometry::{Geometry, GeometryStore};

const EPSILON: f32 = 1e-6;

/// Half-line from `origin` along unit `dir`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Nearest pick result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub entity: EntityId,
    /// Distance along the ray.
    pub distance: f32,
    pub point: Vec3,
}

/// Smallest non-negative ray parameter where the ray meets the sphere.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let a = ray.dir.dot(ray.dir);
    if a < EPSILON {
        return None;
    }
    let half_b = oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;
    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let near = (-half_b - sqrt_d) / a;
    if near >= 0.0 {
        return Some(near);
    }
    let far = (-half_b + sqrt_d) / a;
    (far >= 0.0).then_some(far)
}

/// Möller–Trumbore ray/triangle test, double-sided.
pub fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.dir.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

/// Distance to the nearest triangle of `geometry` placed by `entity`'s transform.
pub fn raycast_entity(ray: &Ray, entity: &Entity, geometry: &Geometry) -> Option<f32> {
    let model = entity.model_matrix();
    let center = model.transform_point3(geometry.bounds.center);
    let radius = geometry.bounds.radius * entity.scale.abs().max_element();
    intersect_sphere(ray, center, radius)?;

    geometry
        .triangles()
        .filter_map(|[a, b, c]| {
            intersect_triangle(
                ray,
                model.transform_point3(a),
                model.transform_point3(b),
                model.transform_point3(c),
            )
        })
        .min_by(|x, y| x.total_cmp(y))
}

/// Nearest mesh hit among `candidates`. Inactive entities, entities without a
/// mesh and unknown ids are ignored.
pub fn pick<I>(scene: &Scene, geometries: &GeometryStore, ray: &Ray, candidates: I) -> Option<PickHit>
where
    I: IntoIterator<Item = EntityId>,
{
    let mut best: Option<PickHit> = None;
    for id in candidates {
        let Some(entity) = scene.get(id) else { continue };
        if !entity.active {
            continue;
        }
        let Some(mesh) = &entity.mesh else { continue };
        let Some(geometry) = geometries.get(mesh.geometry) else { continue };

        if let Some(t) = raycast_entity(ray, entity, geometry) {
            if best.map_or(true, |b| t < b.distance) {
                best = Some(PickHit {
                    entity: id,
                    distance: t,
                    point: ray.at(t),
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GeometryId;
    use crate::components::mesh::{Material, MeshComponent};
    use crate::systems::geometry::sphere;

    fn ball(scene: &mut Scene, id: u32, geometry: GeometryId, pos: Vec3, scale: f32) {
        scene.spawn(
            Entity::new(EntityId(id))
                .with_pos(pos)
                .with_scale(Vec3::splat(scale))
                .with_mesh(MeshComponent::new(geometry, Material::default())),
        );
    }

    #[test]
    fn sphere_hit_and_miss() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::Z);
        let t = intersect_sphere(&ray, Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
        assert!(intersect_sphere(&ray, Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn sphere_behind_origin_is_missed() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::Z);
        assert!(intersect_sphere(&ray, Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn triangle_hit_inside_and_miss_outside() {
        let ray = Ray::new(Vec3::new(0.2, 0.2, -1.0), Vec3::Z);
        let t = intersect_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).unwrap();
        assert!((t - 1.0).abs() < 1e-6);

        let ray = Ray::new(Vec3::new(0.9, 0.9, -1.0), Vec3::Z);
        assert!(intersect_triangle(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn pick_returns_nearest_candidate() {
        let mut geometries = GeometryStore::new();
        let g = geometries.add(sphere(1.0, 16, 16));
        let mut scene = Scene::new();
        ball(&mut scene, 1, g, Vec3::new(0.0, 0.0, 5.0), 0.5);
        ball(&mut scene, 2, g, Vec3::new(0.0, 0.0, 2.0), 0.5);

        let ray = Ray::new(Vec3::new(0.03, 0.07, 0.0), Vec3::Z);
        let hit = pick(&scene, &geometries, &ray, [EntityId(1), EntityId(2)]).unwrap();
        assert_eq!(hit.entity, EntityId(2));
        assert!((hit.distance - 1.5).abs() < 0.02, "distance = {}", hit.distance);
    }

    #[test]
    fn pick_ignores_non_candidates() {
        let mut geometries = GeometryStore::new();
        let g = geometries.add(sphere(1.0, 16, 16));
        let mut scene = Scene::new();
        ball(&mut scene, 1, g, Vec3::new(0.0, 0.0, 2.0), 1.0);
        ball(&mut scene, 2, g, Vec3::new(0.0, 0.0, 8.0), 1.0);

        let ray = Ray::new(Vec3::new(0.03, 0.07, 0.0), Vec3::Z);
        let hit = pick(&scene, &geometries, &ray, [EntityId(2)]).unwrap();
        assert_eq!(hit.entity, EntityId(2));
    }

    #[test]
    fn pick_miss_is_none() {
        let mut geometries = GeometryStore::new();
        let g = geometries.add(sphere(1.0, 16, 16));
        let mut scene = Scene::new();
        ball(&mut scene, 1, g, Vec3::new(0.0, 0.0, 5.0), 0.5);

        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(pick(&scene, &geometries, &ray, [EntityId(1), EntityId(9)]).is_none());
    }
}
