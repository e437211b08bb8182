//! Fixed scene bodies: Sun, Earth, lights, camera placement.

use glam::Vec3;

// ── Camera ───────────────────────────────────────────────────────────

pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(-3.0, 3.0, 5.0);

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 1.5;
pub const SUN_SEGMENTS: u32 = 32;
pub const SUN_OPACITY: f32 = 0.8;
pub const SUN_TEXTURE: &str = "sun";

// ── Earth ────────────────────────────────────────────────────────────

pub const EARTH_RADIUS: f32 = 0.2;
pub const EARTH_SEGMENTS: u32 = 32;
pub const EARTH_TEXTURE: &str = "earth";
pub const EARTH_ORBIT_RADIUS: f32 = 4.0;
/// Orbit phase in radians per millisecond of wall time.
pub const EARTH_ORBIT_RATE: f64 = 0.0001;
/// Spin in radians per running tick.
pub const EARTH_SPIN_PER_TICK: f32 = 0.01;
pub const EARTH_TILT_DEG: f32 = 23.5;

/// Earth's position `elapsed_ms` after start.
pub fn earth_position(elapsed_ms: f64) -> Vec3 {
    let t = elapsed_ms * EARTH_ORBIT_RATE;
    Vec3::new(
        EARTH_ORBIT_RADIUS * t.cos() as f32,
        0.0,
        EARTH_ORBIT_RADIUS * t.sin() as f32,
    )
}

// ── Asteroids ────────────────────────────────────────────────────────

pub const ASTEROID_TEXTURES: [&str; 2] = ["asteroid_a", "asteroid_b"];

// ── Lights ───────────────────────────────────────────────────────────

pub const AMBIENT_COLOR: u32 = 0xFFFFFF;
pub const AMBIENT_INTENSITY: f32 = 0.5;

pub const SUN_LIGHT_COLOR: u32 = 0xFFFF00;
pub const SUN_LIGHT_INTENSITY: f32 = 1.5;
pub const SUN_LIGHT_RANGE: f32 = 100.0;

pub const FILL_LIGHT_COLOR: u32 = 0xFFFFFF;
pub const FILL_LIGHT_INTENSITY: f32 = 0.5;
pub const FILL_LIGHT_POSITION: Vec3 = Vec3::new(5.0, 10.0, 5.0);

/// Texture manifest for the page's loader.
pub const MANIFEST_JSON: &str = include_str!("../assets/manifest.json");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_starts_on_positive_x() {
        assert_eq!(earth_position(0.0), Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn earth_stays_on_its_orbit() {
        for ms in [1.0, 15_707.96, 1e6, 3.3e7] {
            let p = earth_position(ms);
            assert!((p.length() - EARTH_ORBIT_RADIUS).abs() < 1e-4, "ms = {ms}");
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn manifest_names_every_texture() {
        let manifest = orrery_engine::AssetManifest::from_json(MANIFEST_JSON).unwrap();
        let names: Vec<_> = manifest.textures.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&SUN_TEXTURE));
        assert!(names.contains(&EARTH_TEXTURE));
        for t in ASTEROID_TEXTURES {
            assert!(names.contains(&t));
        }
    }
}
