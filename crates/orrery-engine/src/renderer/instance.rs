use bytemuck::{Pod, Zeroable};

/// Per-mesh render data read by the JS renderer.
/// Must match the TypeScript protocol: 24 floats = 96 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshInstance {
    /// Column-major model matrix.
    pub model: [f32; 16],
    /// Index into the geometry store.
    pub geometry: f32,
    /// Manifest texture index, or -1 for untextured.
    pub texture: f32,
    /// 0 = basic, 1 = standard, 2 = phong.
    pub shading: f32,
    pub opacity: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub _pad: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Per-label billboard data: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LabelInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// World-space billboard width.
    pub scale_x: f32,
    /// World-space billboard height.
    pub scale_y: f32,
    /// Index of the rasterized bitmap.
    pub texture: f32,
    /// 1 = depth tested, 0 = always on top.
    pub depth_test: f32,
    pub _pad: f32,
}

impl LabelInstance {
    pub const FLOATS: usize = 8;
}

/// Everything the renderer draws this frame.
pub struct RenderBuffer {
    /// Opaque meshes first, then transparent ones from `transparent_start`.
    pub meshes: Vec<MeshInstance>,
    pub transparent_start: u32,
    pub labels: Vec<LabelInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64, 64)
    }

    pub fn with_capacity(max_meshes: usize, max_labels: usize) -> Self {
        Self {
            meshes: Vec::with_capacity(max_meshes),
            transparent_start: 0,
            labels: Vec::with_capacity(max_labels),
        }
    }

    pub fn clear(&mut self) {
        self.meshes.clear();
        self.labels.clear();
        self.transparent_start = 0;
    }

    pub fn mesh_count(&self) -> u32 {
        self.meshes.len() as u32
    }

    pub fn label_count(&self) -> u32 {
        self.labels.len() as u32
    }

    /// Raw pointer to mesh data for direct memory reads from JS.
    pub fn meshes_ptr(&self) -> *const f32 {
        self.meshes.as_ptr() as *const f32
    }

    pub fn labels_ptr(&self) -> *const f32 {
        self.labels.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
