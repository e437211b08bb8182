use crate::api::types::{GeometryId, TextureId};

/// Lighting model the renderer applies to a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shading {
    /// Unlit: texture/color only.
    Basic,
    /// Physically based (roughness/metalness defaults).
    #[default]
    Standard,
    /// Blinn-Phong with specular highlight.
    Phong,
}

impl Shading {
    /// Wire code written into the instance buffer.
    pub fn code(self) -> f32 {
        match self {
            Shading::Basic => 0.0,
            Shading::Standard => 1.0,
            Shading::Phong => 2.0,
        }
    }
}

/// Surface description for a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Image texture (from the asset manifest), if any.
    pub texture: Option<TextureId>,
    /// Base color multiplied with the texture.
    pub color: [f32; 3],
    /// 1.0 = opaque. Values below 1 enable blending.
    pub opacity: f32,
    pub shading: Shading,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            texture: None,
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            shading: Shading::Standard,
        }
    }
}

impl Material {
    pub fn textured(texture: TextureId, shading: Shading) -> Self {
        Self {
            texture: Some(texture),
            shading,
            ..Default::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// Component for triangle meshes stored in the `GeometryStore`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub geometry: GeometryId,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(geometry: GeometryId, material: Material) -> Self {
        Self { geometry, material }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_marks_transparency() {
        let m = Material::textured(TextureId(0), Shading::Basic).with_opacity(0.8);
        assert!(m.is_transparent());
        assert!(!Material::default().is_transparent());
    }
}
