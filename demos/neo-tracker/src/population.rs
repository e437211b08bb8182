//! Turns feed objects into scene entities: one roughened sphere and one
//! name billboard per asteroid.

use glam::Vec3;

use orrery_engine::{
    sphere, perturb, Entity, EngineContext, LabelComponent, Material, MeshComponent, Shading,
    TextureId,
};

use crate::asteroid::AsteroidRecord;
use crate::config::TrackerConfig;
use crate::feed::NeoObject;

pub const ASTEROID_TAG: &str = "asteroid";
pub const ASTEROID_LABEL_TAG: &str = "asteroid_label";

/// Spawn every object of `neos` in feed order and return their records.
///
/// Each asteroid gets its own geometry so the roughening differs per rock.
/// The texture is drawn uniformly from `textures`; with none available the
/// rock is drawn untextured.
pub fn populate(
    ctx: &mut EngineContext,
    textures: &[TextureId],
    config: &TrackerConfig,
    neos: Vec<NeoObject>,
) -> Vec<AsteroidRecord> {
    let segments = config.asteroid_segments.max(3);
    let mut records = Vec::with_capacity(neos.len());

    for neo in neos {
        let mut geometry = sphere(1.0, segments, segments);
        perturb(&mut geometry, config.roughness, &mut ctx.rng);
        let geometry = ctx.geometries.add(geometry);

        let material = match ctx.rng.choose(textures) {
            Some(&texture) => Material::textured(texture, Shading::Phong),
            None => Material {
                shading: Shading::Phong,
                ..Material::default()
            },
        };

        let angle = ctx.rng.angle();
        let mesh_id = ctx.next_id();
        let label_id = ctx.next_id();
        let label = LabelComponent::new(&neo.name, neo.hazardous);
        let record = AsteroidRecord::new(neo, angle, mesh_id, label_id);
        let pos = record.position();

        ctx.scene.spawn(
            Entity::new(mesh_id)
                .with_tag(ASTEROID_TAG)
                .with_pos(pos)
                .with_scale(Vec3::splat(record.visual_radius as f32))
                .with_mesh(MeshComponent::new(geometry, material)),
        );
        ctx.scene.spawn(
            Entity::new(label_id)
                .with_tag(ASTEROID_LABEL_TAG)
                .with_pos(pos)
                .with_scale(Vec3::new(1.0, 0.5, 1.0))
                .with_label(label),
        );

        records.push(record);
    }

    log::info!("populated {} asteroids", records.len());
    records
}
