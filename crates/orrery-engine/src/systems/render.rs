use crate::components::entity::Entity;
use crate::renderer::instance::{LabelInstance, MeshInstance, RenderBuffer};

/// Build the render buffer from a set of entities.
/// Opaque meshes come first, transparent ones after `transparent_start`, so
/// the renderer can draw them in two passes. Labels without a rasterized
/// bitmap yet are skipped.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut transparent: Vec<MeshInstance> = Vec::new();

    for entity in entities {
        if !entity.active {
            continue;
        }

        if let Some(mesh) = &entity.mesh {
            let m = &mesh.material;
            let instance = MeshInstance {
                model: entity.model_matrix().to_cols_array(),
                geometry: mesh.geometry.0 as f32,
                texture: m.texture.map(|t| t.0 as f32).unwrap_or(-1.0),
                shading: m.shading.code(),
                opacity: m.opacity,
                r: m.color[0],
                g: m.color[1],
                b: m.color[2],
                _pad: 0.0,
            };
            if m.is_transparent() {
                transparent.push(instance);
            } else {
                buffer.meshes.push(instance);
            }
        }

        if let Some(label) = &entity.label {
            let Some(texture) = label.texture else { continue };
            buffer.labels.push(LabelInstance {
                x: entity.pos.x,
                y: entity.pos.y,
                z: entity.pos.z,
                scale_x: entity.scale.x,
                scale_y: entity.scale.y,
                texture: texture.0 as f32,
                depth_test: if label.depth_test { 1.0 } else { 0.0 },
                _pad: 0.0,
            });
        }
    }

    buffer.transparent_start = buffer.meshes.len() as u32;
    buffer.meshes.extend(transparent);
}
