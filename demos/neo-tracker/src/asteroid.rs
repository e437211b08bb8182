//! Asteroid records and the mapping from feed values to scene values.
//!
//! Orbits are flat circles on the x/z plane around the Sun. Radius and
//! angular speed are fixed at creation; only the angle moves.

use glam::Vec3;
use orrery_engine::EntityId;

use crate::feed::NeoObject;

/// Visual radii are relative to Earth's diameter.
pub const EARTH_DIAMETER_KM: f64 = 12_742.0;
/// Scale from fraction-of-Earth to scene units.
pub const RADIUS_SCALE: f64 = 10.0;
/// Smallest drawn radius, so tiny objects stay clickable.
pub const MIN_VISUAL_RADIUS: f64 = 0.02;
/// Every asteroid orbits outside Earth's orbit.
pub const BASE_ORBIT_RADIUS: f64 = 4.0;
/// Kilometres of miss distance per scene unit of extra orbit radius.
pub const MISS_DISTANCE_PER_UNIT: f64 = 100_000_000.0;
/// Radians per tick per km/s of relative velocity.
pub const SPEED_PER_KM_S: f64 = 0.0001;

pub fn visual_radius(diameter_min_km: f64, diameter_max_km: f64) -> f64 {
    let avg = (diameter_min_km + diameter_max_km) / 2.0;
    (avg / EARTH_DIAMETER_KM * RADIUS_SCALE).max(MIN_VISUAL_RADIUS)
}

pub fn orbit_radius(miss_distance_km: f64) -> f64 {
    BASE_ORBIT_RADIUS + miss_distance_km / MISS_DISTANCE_PER_UNIT
}

pub fn angular_speed(relative_velocity_km_s: f64) -> f64 {
    relative_velocity_km_s * SPEED_PER_KM_S
}

/// Point on a flat orbit of `radius` at `angle`.
pub fn orbit_position(radius: f64, angle: f64) -> Vec3 {
    Vec3::new((radius * angle.cos()) as f32, 0.0, (radius * angle.sin()) as f32)
}

/// One asteroid in the scene: feed data, orbit state, and its two entities.
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidRecord {
    pub data: NeoObject,
    /// Radians; grows without wrapping.
    pub angle: f64,
    pub angular_speed: f64,
    pub visual_radius: f64,
    pub orbit_radius: f64,
    pub mesh: EntityId,
    pub label: EntityId,
}

impl AsteroidRecord {
    pub fn new(data: NeoObject, angle: f64, mesh: EntityId, label: EntityId) -> Self {
        Self {
            angle,
            angular_speed: angular_speed(data.relative_velocity_km_s),
            visual_radius: visual_radius(data.diameter_min_km, data.diameter_max_km),
            orbit_radius: orbit_radius(data.miss_distance_km),
            data,
            mesh,
            label,
        }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn position(&self) -> Vec3 {
        orbit_position(self.orbit_radius, self.angle)
    }

    /// One running tick along the orbit.
    pub fn advance(&mut self) {
        self.angle += self.angular_speed;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn neo(name: &str, min: f64, max: f64, miss: f64, vel: f64, hazardous: bool) -> NeoObject {
        NeoObject {
            name: name.to_string(),
            diameter_min_km: min,
            diameter_max_km: max,
            miss_distance_km: miss,
            miss_distance_text: miss.to_string(),
            relative_velocity_km_s: vel,
            relative_velocity_text: vel.to_string(),
            hazardous,
        }
    }

    #[test]
    fn small_objects_clamp_to_min_radius() {
        assert_eq!(visual_radius(0.0, 0.0), MIN_VISUAL_RADIUS);
        // 0.2 km average is ~1.57e-4 scene units before clamping.
        assert_eq!(visual_radius(0.1, 0.3), MIN_VISUAL_RADIUS);
    }

    #[test]
    fn large_objects_scale_with_earth_diameter() {
        let r = visual_radius(100.0, 154.84);
        assert!((r - 127.42 / 12_742.0 * 10.0).abs() < 1e-12);
        assert!((r - 0.1).abs() < 1e-12);
    }

    #[test]
    fn orbit_radius_never_inside_earth() {
        assert_eq!(orbit_radius(0.0), 4.0);
        assert_eq!(orbit_radius(50_000_000.0), 4.5);
        for d in [1.0, 384_400.0, 7.5e7, 1e9] {
            assert!(orbit_radius(d) >= 4.0);
        }
    }

    #[test]
    fn record_derives_once() {
        let r = AsteroidRecord::new(neo("x", 0.1, 0.3, 5e7, 10.0, true), 0.0, EntityId(1), EntityId(2));
        assert!((r.angular_speed - 0.001).abs() < 1e-15);
        assert_eq!(r.orbit_radius, 4.5);
        assert_eq!(r.visual_radius, 0.02);
        assert_eq!(r.position(), Vec3::new(4.5, 0.0, 0.0));
    }

    #[test]
    fn angle_accumulates_per_tick() {
        let mut r = AsteroidRecord::new(neo("x", 1.0, 1.0, 0.0, 2.5, false), 1.0, EntityId(1), EntityId(2));
        for _ in 0..400 {
            r.advance();
        }
        assert!((r.angle - (1.0 + 400.0 * 0.00025)).abs() < 1e-9);
    }

    #[test]
    fn positions_stay_on_xz_plane() {
        let p = orbit_position(5.0, std::f64::consts::FRAC_PI_2);
        assert!(p.x.abs() < 1e-6);
        assert_eq!(p.y, 0.0);
        assert!((p.z - 5.0).abs() < 1e-6);
    }
}
