use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::label::LabelComponent;
use crate::components::mesh::MeshComponent;

/// Fat Entity — a single struct with optional components.
/// A scene object carries at most one mesh and one label; the asteroid's
/// mesh and its billboard are two separate entities.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Euler rotation (XYZ order) in radians.
    pub rotation: Vec3,
    /// Non-uniform scale. Labels use x/y as their billboard size.
    pub scale: Vec3,
    /// Triangle mesh (optional — entities without one are not drawn as meshes).
    pub mesh: Option<MeshComponent>,
    /// Camera-facing text billboard.
    pub label: Option<LabelComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            mesh: None,
            label: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_label(mut self, label: LabelComponent) -> Self {
        self.label = Some(label);
        self
    }

    /// Local-to-world transform: scale, then XYZ rotation, then translation.
    pub fn model_matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(self.scale, rot, self.pos)
    }
}
