use glam::Vec2;

use orrery_engine::{
    billboard_scale_from, hex_rgb, sphere, EngineContext, Entity, EntityId, Game, InputEvent,
    InputQueue, Light, LightId, Material, MeshComponent, PerspectiveCamera, Rng, Shading, TextureId,
};

use crate::asteroid::AsteroidRecord;
use crate::bodies::*;
use crate::config::TrackerConfig;
use crate::feed::{FeedError, NeoObject};
use crate::interaction::{details_html, pick_asteroid};
use crate::population::populate;

/// Custom event kinds sent by the page's buttons.
pub const CUSTOM_START: u32 = 1;
pub const CUSTOM_STOP: u32 = 2;

/// A press that travels further than this (in pixels) is a drag, not a click.
pub const CLICK_SLOP_PX: f32 = 5.0;

/// Widest a label billboard gets, in world units.
pub const LABEL_MAX_WIDTH: f32 = 18.0 / 32.0;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch asteroid data. Please try again later.";

#[derive(Debug, Clone, Copy)]
struct Drag {
    start: Vec2,
    last: Vec2,
    moved: bool,
}

pub struct NeoTracker {
    config: TrackerConfig,
    running: bool,
    sun: Option<EntityId>,
    sun_light: Option<LightId>,
    earth: Option<EntityId>,
    asteroid_textures: Vec<TextureId>,
    asteroids: Vec<AsteroidRecord>,
    drag: Option<Drag>,
}

impl NeoTracker {
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            running: config.start_running,
            config,
            sun: None,
            sun_light: None,
            earth: None,
            asteroid_textures: Vec::new(),
            asteroids: Vec::new(),
            drag: None,
        }
    }

    /// Adopt page settings after construction. A pinned seed restarts the RNG.
    pub fn configure(&mut self, ctx: &mut EngineContext, config: TrackerConfig) {
        if let Some(seed) = config.rng_seed {
            ctx.rng = Rng::new(seed);
        }
        self.running = config.start_running;
        self.config = config;
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn asteroids(&self) -> &[AsteroidRecord] {
        &self.asteroids
    }

    /// Hand over the outcome of the feed request. Failure leaves the scene
    /// with the Sun and Earth only and tells the user once.
    pub fn ingest(&mut self, ctx: &mut EngineContext, result: Result<Vec<NeoObject>, FeedError>) {
        match result {
            Ok(neos) => {
                let records = populate(ctx, &self.asteroid_textures, &self.config, neos);
                self.asteroids.extend(records);
            }
            Err(e) => {
                log::error!("asteroid feed unavailable: {}", e);
                ctx.alert(FETCH_FAILED_MESSAGE);
            }
        }
    }

    fn spawn_bodies(&mut self, ctx: &mut EngineContext) {
        let sun_geometry = ctx.geometries.add(sphere(SUN_RADIUS, SUN_SEGMENTS, SUN_SEGMENTS));
        let sun_material = Material {
            texture: ctx.textures.get(SUN_TEXTURE),
            shading: Shading::Basic,
            ..Material::default()
        }
        .with_opacity(SUN_OPACITY);
        let sun = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(sun)
                .with_tag("sun")
                .with_mesh(MeshComponent::new(sun_geometry, sun_material)),
        );

        let earth_geometry = ctx.geometries.add(sphere(EARTH_RADIUS, EARTH_SEGMENTS, EARTH_SEGMENTS));
        let earth_material = Material {
            texture: ctx.textures.get(EARTH_TEXTURE),
            shading: Shading::Standard,
            ..Material::default()
        };
        let earth = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(earth)
                .with_tag("earth")
                .with_pos(earth_position(0.0))
                .with_rotation(glam::Vec3::new(EARTH_TILT_DEG.to_radians(), 0.0, 0.0))
                .with_mesh(MeshComponent::new(earth_geometry, earth_material)),
        );

        self.sun = Some(sun);
        self.earth = Some(earth);
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind: CUSTOM_START, .. } => self.running = true,
                InputEvent::Custom { kind: CUSTOM_STOP, .. } => self.running = false,
                InputEvent::PointerDown { x, y } => {
                    let p = Vec2::new(x, y);
                    self.drag = Some(Drag { start: p, last: p, moved: false });
                }
                InputEvent::PointerMove { x, y } => {
                    let Some(drag) = self.drag.as_mut() else { continue };
                    let p = Vec2::new(x, y);
                    let delta = p - drag.last;
                    ctx.controls.rotate(delta.x, delta.y, ctx.viewport().y);
                    drag.last = p;
                    if p.distance(drag.start) > CLICK_SLOP_PX {
                        drag.moved = true;
                    }
                }
                InputEvent::PointerUp { x, y } => {
                    let dragged = self.drag.take().is_some_and(|d| d.moved);
                    if !dragged {
                        self.click(ctx, x, y);
                    }
                }
                InputEvent::Wheel { delta_y } => ctx.controls.dolly(delta_y),
                _ => {}
            }
        }
    }

    fn click(&self, ctx: &mut EngineContext, x: f32, y: f32) {
        if let Some(i) = pick_asteroid(ctx, &self.asteroids, x, y) {
            let record = &self.asteroids[i];
            log::debug!("picked {}", record.name());
            ctx.set_panel(details_html(record));
        }
    }

    fn advance_orbits(&mut self, ctx: &mut EngineContext) {
        if let Some(earth) = self.earth.and_then(|id| ctx.scene.get_mut(id)) {
            earth.pos = earth_position(ctx.clock.elapsed_ms());
            earth.rotation.y += EARTH_SPIN_PER_TICK;
        }

        let sun_pos = self.sun.and_then(|id| ctx.scene.get(id)).map(|e| e.pos);
        if let (Some(pos), Some(light)) = (sun_pos, self.sun_light.and_then(|id| ctx.lights.get_mut(id))) {
            light.position = pos;
        }

        for record in &mut self.asteroids {
            record.advance();
            let pos = record.position();
            if let Some((mesh, label)) = ctx.scene.get_pair_mut(record.mesh, record.label) {
                mesh.pos = pos;
                label.pos = pos;
            }
        }
    }

    /// Billboards shrink with camera distance. Part of the running step only:
    /// a paused scene keeps its last label sizes even while the camera moves.
    fn scale_labels(&self, ctx: &mut EngineContext) {
        let eye = ctx.controls.eye();
        for record in &self.asteroids {
            let Some(label) = ctx.scene.get_mut(record.label) else { continue };
            let aspect = label.label.as_ref().map_or(2.0, |l| l.style.aspect());
            let s = billboard_scale_from(eye, label.pos, LABEL_MAX_WIDTH, aspect);
            label.scale = s.extend(s.x);
        }
    }
}

impl Default for NeoTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for NeoTracker {
    fn init(&mut self, ctx: &mut EngineContext) {
        if let Err(e) = ctx.load_manifest(MANIFEST_JSON) {
            log::error!("texture manifest unreadable, drawing untextured: {}", e);
        }
        self.asteroid_textures = ASTEROID_TEXTURES
            .iter()
            .filter_map(|name| ctx.textures.get(name))
            .collect();

        let viewport = ctx.viewport();
        ctx.set_camera(
            PerspectiveCamera::new(CAMERA_FOV_DEG, viewport.x / viewport.y, CAMERA_NEAR, CAMERA_FAR)
                .with_position(CAMERA_POSITION),
        );
        ctx.controls.enable_zoom = true;

        ctx.lights.set_ambient(hex_rgb(AMBIENT_COLOR), AMBIENT_INTENSITY);
        self.sun_light = Some(ctx.lights.add(Light::point(
            glam::Vec3::ZERO,
            hex_rgb(SUN_LIGHT_COLOR),
            SUN_LIGHT_INTENSITY,
            SUN_LIGHT_RANGE,
        )));
        ctx.lights.add(Light::directional(
            FILL_LIGHT_POSITION,
            hex_rgb(FILL_LIGHT_COLOR),
            FILL_LIGHT_INTENSITY,
        ));

        self.spawn_bodies(ctx);
        log::info!("scene ready, running = {}", self.running);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.handle_input(ctx, input);
        if self.running {
            self.advance_orbits(ctx);
            self.scale_labels(ctx);
        }
    }
}
