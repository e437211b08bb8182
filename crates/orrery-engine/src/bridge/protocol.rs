/// Frame data layout shared with the JS renderer.
/// Must stay in sync with the renderer's `protocol.js`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 20 floats]
/// [Lights: max_lights × 12 floats]
/// [Meshes: max_meshes × 24 floats]
/// [Labels: max_labels × 8 floats]
/// ```
///
/// Capacities are written into the header every frame.
/// The renderer reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::{LabelInstance, MeshInstance};
use crate::systems::lighting::LightInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 14;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_MESHES: usize = 2;
pub const HEADER_MESH_COUNT: usize = 3;
pub const HEADER_TRANSPARENT_START: usize = 4;
pub const HEADER_MAX_LABELS: usize = 5;
pub const HEADER_LABEL_COUNT: usize = 6;
pub const HEADER_MAX_LIGHTS: usize = 7;
pub const HEADER_LIGHT_COUNT: usize = 8;
pub const HEADER_AMBIENT_R: usize = 9;
pub const HEADER_AMBIENT_G: usize = 10;
pub const HEADER_AMBIENT_B: usize = 11;
pub const HEADER_VIEWPORT_WIDTH: usize = 12;
pub const HEADER_VIEWPORT_HEIGHT: usize = 13;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;
pub const LIGHT_FLOATS: usize = LightInstance::FLOATS;
pub const MESH_FLOATS: usize = MeshInstance::FLOATS;
pub const LABEL_FLOATS: usize = LabelInstance::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_lights: usize,
    pub max_meshes: usize,
    pub max_labels: usize,

    pub camera_offset: usize,
    pub lights_offset: usize,
    pub meshes_offset: usize,
    pub labels_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_lights: usize, max_meshes: usize, max_labels: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let lights_offset = camera_offset + CAMERA_FLOATS;
        let meshes_offset = lights_offset + max_lights * LIGHT_FLOATS;
        let labels_offset = meshes_offset + max_meshes * MESH_FLOATS;
        let buffer_total_floats = labels_offset + max_labels * LABEL_FLOATS;

        Self {
            max_lights,
            max_meshes,
            max_labels,
            camera_offset,
            lights_offset,
            meshes_offset,
            labels_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_lights, config.max_meshes, config.max_labels)
    }
}

/// Per-frame counters written into the header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameHeader {
    pub frame: u64,
    pub mesh_count: u32,
    pub transparent_start: u32,
    pub label_count: u32,
    pub light_count: u32,
    pub ambient: [f32; 3],
    pub viewport: (f32, f32),
}

impl FrameHeader {
    /// Fill `out` with this header plus the layout capacities.
    pub fn write(&self, layout: &ProtocolLayout, out: &mut [f32; HEADER_FLOATS]) {
        out[HEADER_FRAME_COUNTER] = self.frame as f32;
        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_MAX_MESHES] = layout.max_meshes as f32;
        out[HEADER_MESH_COUNT] = self.mesh_count as f32;
        out[HEADER_TRANSPARENT_START] = self.transparent_start as f32;
        out[HEADER_MAX_LABELS] = layout.max_labels as f32;
        out[HEADER_LABEL_COUNT] = self.label_count as f32;
        out[HEADER_MAX_LIGHTS] = layout.max_lights as f32;
        out[HEADER_LIGHT_COUNT] = self.light_count as f32;
        out[HEADER_AMBIENT_R] = self.ambient[0];
        out[HEADER_AMBIENT_G] = self.ambient[1];
        out[HEADER_AMBIENT_B] = self.ambient[2];
        out[HEADER_VIEWPORT_WIDTH] = self.viewport.0;
        out[HEADER_VIEWPORT_HEIGHT] = self.viewport.1;
    }
}
