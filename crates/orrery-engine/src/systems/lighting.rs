/// Scene lights.
///
/// Lights are persistent — they stay until explicitly removed. Each frame the
/// runner packs them into the light buffer for the renderer's shading pass.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Index of a light inside `LightState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    /// Radiates from `position`, fading to zero at `range` (0 = infinite).
    Point,
    /// Parallel rays shining from `position` toward the origin.
    Directional,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub position: Vec3,
    /// Linear RGB.
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
}

impl Light {
    pub fn point(position: Vec3, color: [f32; 3], intensity: f32, range: f32) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            color,
            intensity,
            range,
        }
    }

    pub fn directional(position: Vec3, color: [f32; 3], intensity: f32) -> Self {
        Self {
            kind: LightKind::Directional,
            position,
            color,
            intensity,
            range: 0.0,
        }
    }
}

/// Wire format for one light: 12 floats / 48 bytes.
/// `[x, y, z, kind, r, g, b, intensity, range, pad, pad, pad]`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LightInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub kind: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    pub range: f32,
    pub _pad: [f32; 3],
}

impl LightInstance {
    pub const FLOATS: usize = 12;
}

impl From<&Light> for LightInstance {
    fn from(light: &Light) -> Self {
        Self {
            x: light.position.x,
            y: light.position.y,
            z: light.position.z,
            kind: match light.kind {
                LightKind::Point => 0.0,
                LightKind::Directional => 1.0,
            },
            r: light.color[0],
            g: light.color[1],
            b: light.color[2],
            intensity: light.intensity,
            range: light.range,
            _pad: [0.0; 3],
        }
    }
}

/// Manages the active lights and the ambient term.
#[derive(Debug, Clone)]
pub struct LightState {
    lights: Vec<Light>,
    ambient: [f32; 3],
    ambient_intensity: f32,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: [1.0, 1.0, 1.0],
            ambient_intensity: 0.0,
        }
    }

    pub fn add(&mut self, light: Light) -> LightId {
        self.lights.push(light);
        LightId(self.lights.len() as u32 - 1)
    }

    pub fn get_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(id.0 as usize)
    }

    pub fn get(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id.0 as usize)
    }

    pub fn set_ambient(&mut self, color: [f32; 3], intensity: f32) {
        self.ambient = color;
        self.ambient_intensity = intensity;
    }

    /// Ambient color pre-multiplied by its intensity.
    pub fn ambient(&self) -> [f32; 3] {
        self.ambient.map(|c| c * self.ambient_intensity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Pack up to `max` lights into `out`, replacing its contents.
    pub fn write_instances(&self, out: &mut Vec<LightInstance>, max: usize) {
        out.clear();
        out.extend(self.lights.iter().take(max).map(LightInstance::from));
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a packed `0xRRGGBB` color into linear-ish float RGB.
pub fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_move_light() {
        let mut lights = LightState::new();
        let id = lights.add(Light::point(Vec3::ONE, hex_rgb(0xFFFF00), 1.5, 100.0));
        lights.get_mut(id).unwrap().position = Vec3::ZERO;
        assert_eq!(lights.get(id).unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(hex_rgb(0xFFFF00), [1.0, 1.0, 0.0]);
        assert_eq!(hex_rgb(0x000000), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn ambient_is_premultiplied() {
        let mut lights = LightState::new();
        lights.set_ambient(hex_rgb(0xFFFFFF), 0.5);
        assert_eq!(lights.ambient(), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn instances_respect_capacity() {
        let mut lights = LightState::new();
        lights.add(Light::point(Vec3::ZERO, [1.0; 3], 1.0, 0.0));
        lights.add(Light::directional(Vec3::new(5.0, 10.0, 5.0), [1.0; 3], 0.5));
        let mut out = Vec::new();
        lights.write_instances(&mut out, 1);
        assert_eq!(out.len(), 1);
        lights.write_instances(&mut out, 8);
        assert_eq!(out[1].kind, 1.0);
        assert_eq!(std::mem::size_of::<LightInstance>(), LightInstance::FLOATS * 4);
    }
}
