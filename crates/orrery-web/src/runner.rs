use orrery_engine::{
    Game, EngineContext, InputEvent, InputQueue, RenderBuffer,
    ProtocolLayout, FrameHeader, HEADER_FLOATS, CameraUniform, LightInstance,
    LabelRasterizer, GeometryId, LabelTextureId, UiCommand,
};
use orrery_engine::systems::label::rasterize_pending;
use orrery_engine::systems::render::build_render_buffer;

/// Generic runner that wires up the engine loop.
///
/// Each application creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly. See `export_game!`.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    light_buffer: Vec<LightInstance>,
    camera: CameraUniform,
    header: [f32; HEADER_FLOATS],
    layout: ProtocolLayout,
    rasterizer: Box<dyn LabelRasterizer>,
    ui: Vec<UiCommand>,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    /// Browser runner: canvas label rasterizer, RNG seeded from the wall clock
    /// unless the game pins a seed.
    pub fn new(game: G) -> Self {
        let seed = match game.config().rng_seed {
            Some(seed) => seed,
            None => crate::dom::wall_clock_seed(),
        };
        Self::with_parts(game, seed, Box::new(crate::raster::CanvasRasterizer::new()))
    }

    /// Runner with explicit seed and rasterizer (headless hosts, tests).
    pub fn with_parts(game: G, seed: u64, rasterizer: Box<dyn LabelRasterizer>) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);
        let seed = config.rng_seed.unwrap_or(seed);

        Self {
            ctx: EngineContext::with_config(&config, seed),
            game,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_meshes, config.max_labels),
            light_buffer: Vec::with_capacity(config.max_lights),
            camera: bytemuck::Zeroable::zeroed(),
            header: [0.0; HEADER_FLOATS],
            layout,
            rasterizer,
            ui: Vec::new(),
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.ui.extend(self.ctx.take_ui());
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run `f` against the game and its context outside the frame loop
    /// (async completions such as a finished fetch).
    pub fn with_game<R>(&mut self, f: impl FnOnce(&mut G, &mut EngineContext) -> R) -> R {
        let out = f(&mut self.game, &mut self.ctx);
        self.ui.extend(self.ctx.take_ui());
        out
    }

    /// Run one frame: advance the clock, update the game, refresh the camera,
    /// rasterize new labels and rebuild every frame buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clock.advance(dt);

        self.ctx.apply_input(&self.input);
        self.game.update(&mut self.ctx, &self.input);
        self.input.drain();

        self.ctx.controls.update(&mut self.ctx.camera);

        rasterize_pending(&mut self.ctx.scene, &mut self.ctx.labels, self.rasterizer.as_mut());

        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
        self.enforce_capacities();

        self.ctx.lights.write_instances(&mut self.light_buffer, self.layout.max_lights);
        self.camera = self.ctx.camera.uniform();

        let viewport = self.ctx.viewport();
        FrameHeader {
            frame: self.ctx.clock.frames(),
            mesh_count: self.render_buffer.mesh_count(),
            transparent_start: self.render_buffer.transparent_start,
            label_count: self.render_buffer.label_count(),
            light_count: self.light_buffer.len() as u32,
            ambient: self.ctx.lights.ambient(),
            viewport: (viewport.x, viewport.y),
        }
        .write(&self.layout, &mut self.header);

        self.ui.extend(self.ctx.take_ui());
    }

    fn enforce_capacities(&mut self) {
        let max_meshes = self.layout.max_meshes;
        if self.render_buffer.meshes.len() > max_meshes {
            log::warn!(
                "{} meshes exceed capacity {}; extra meshes are not drawn",
                self.render_buffer.meshes.len(),
                max_meshes
            );
            self.render_buffer.meshes.truncate(max_meshes);
            let split = self.render_buffer.transparent_start.min(max_meshes as u32);
            self.render_buffer.transparent_start = split;
        }
        if self.render_buffer.labels.len() > self.layout.max_labels {
            log::warn!(
                "{} labels exceed capacity {}",
                self.render_buffer.labels.len(),
                self.layout.max_labels
            );
            self.render_buffer.labels.truncate(self.layout.max_labels);
        }
    }

    /// DOM commands produced since the last call.
    pub fn take_ui(&mut self) -> Vec<UiCommand> {
        std::mem::take(&mut self.ui)
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera as *const CameraUniform as *const f32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.light_buffer.as_ptr() as *const f32
    }

    pub fn light_count(&self) -> u32 {
        self.light_buffer.len() as u32
    }

    pub fn meshes_ptr(&self) -> *const f32 {
        self.render_buffer.meshes_ptr()
    }

    pub fn mesh_count(&self) -> u32 {
        self.render_buffer.mesh_count()
    }

    pub fn transparent_start(&self) -> u32 {
        self.render_buffer.transparent_start
    }

    pub fn labels_ptr(&self) -> *const f32 {
        self.render_buffer.labels_ptr()
    }

    pub fn label_count(&self) -> u32 {
        self.render_buffer.label_count()
    }

    // ---- Geometry accessors (uploaded once per geometry by the renderer) ----

    pub fn geometry_count(&self) -> u32 {
        self.ctx.geometries.len() as u32
    }

    pub fn geometry_vertex_count(&self, id: u32) -> u32 {
        self.ctx
            .geometries
            .get(GeometryId(id))
            .map_or(0, |g| g.vertex_count() as u32)
    }

    pub fn geometry_positions_ptr(&self, id: u32) -> *const f32 {
        self.ctx
            .geometries
            .get(GeometryId(id))
            .map_or(std::ptr::null(), |g| g.position_floats().as_ptr())
    }

    pub fn geometry_normals_ptr(&self, id: u32) -> *const f32 {
        self.ctx
            .geometries
            .get(GeometryId(id))
            .map_or(std::ptr::null(), |g| g.normal_floats().as_ptr())
    }

    pub fn geometry_uvs_ptr(&self, id: u32) -> *const f32 {
        self.ctx
            .geometries
            .get(GeometryId(id))
            .map_or(std::ptr::null(), |g| g.uv_floats().as_ptr())
    }

    pub fn geometry_indices_ptr(&self, id: u32) -> *const u32 {
        self.ctx
            .geometries
            .get(GeometryId(id))
            .map_or(std::ptr::null(), |g| g.indices.as_ptr())
    }

    pub fn geometry_index_count(&self, id: u32) -> u32 {
        self.ctx
            .geometries
            .get(GeometryId(id))
            .map_or(0, |g| g.indices.len() as u32)
    }

    // ---- Label bitmap accessors ----

    pub fn label_texture_count(&self) -> u32 {
        self.ctx.labels.len() as u32
    }

    pub fn label_bitmap_ptr(&self, id: u32) -> *const u8 {
        self.ctx
            .labels
            .get(LabelTextureId(id))
            .map_or(std::ptr::null(), |b| b.rgba.as_ptr())
    }

    pub fn label_bitmap_width(&self, id: u32) -> u32 {
        self.ctx.labels.get(LabelTextureId(id)).map_or(0, |b| b.width)
    }

    pub fn label_bitmap_height(&self, id: u32) -> u32 {
        self.ctx.labels.get(LabelTextureId(id)).map_or(0, |b| b.height)
    }

    /// Texture manifest for the JS loader, empty when the game declared none.
    pub fn manifest_json(&self) -> String {
        self.ctx
            .manifest
            .as_ref()
            .and_then(|m| match m.to_json() {
                Ok(json) => Some(json),
                Err(e) => {
                    log::error!("manifest serialization failed: {}", e);
                    None
                }
            })
            .unwrap_or_default()
    }

    // ---- Capacity accessors ----

    pub fn max_meshes(&self) -> u32 {
        self.layout.max_meshes as u32
    }

    pub fn max_labels(&self) -> u32 {
        self.layout.max_labels as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    /// Current viewport width, following `Resize` input.
    pub fn viewport_width(&self) -> f32 {
        self.ctx.viewport().x
    }

    pub fn viewport_height(&self) -> f32 {
        self.ctx.viewport().y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_engine::bridge::protocol::{
        HEADER_FRAME_COUNTER, HEADER_LABEL_COUNT, HEADER_MESH_COUNT, HEADER_VIEWPORT_WIDTH,
    };
    use orrery_engine::GameConfig;
    use orrery_engine::{
        Entity, LabelBitmap, LabelComponent, Material, MeshComponent, RasterError, sphere,
    };

    struct Blank;

    impl LabelRasterizer for Blank {
        fn rasterize(&mut self, label: &LabelComponent) -> Result<LabelBitmap, RasterError> {
            Ok(LabelBitmap::blank(label.style.canvas_width, label.style.canvas_height))
        }
    }

    /// Spawns one labelled ball on init and counts updates.
    #[derive(Default)]
    struct Ball {
        updates: u32,
        clicks: u32,
    }

    impl Game for Ball {
        fn config(&self) -> GameConfig {
            GameConfig {
                max_meshes: 1,
                rng_seed: Some(7),
                ..GameConfig::default()
            }
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            let g = ctx.geometries.add(sphere(1.0, 8, 8));
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_pos(Vec3::X)
                    .with_mesh(MeshComponent::new(g, Material::default()))
                    .with_label(LabelComponent::new("ball", false)),
            );
            ctx.set_panel("ready");
        }

        fn update(&mut self, _ctx: &mut EngineContext, input: &InputQueue) {
            self.updates += 1;
            self.clicks += input
                .iter()
                .filter(|e| matches!(e, InputEvent::PointerUp { .. }))
                .count() as u32;
        }
    }

    fn runner() -> GameRunner<Ball> {
        let mut r = GameRunner::with_parts(Ball::default(), 1, Box::new(Blank));
        r.init();
        r
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut r = GameRunner::with_parts(Ball::default(), 1, Box::new(Blank));
        r.tick(0.016);
        assert_eq!(r.game().updates, 0);
        assert!(!r.is_initialized());
    }

    #[test]
    fn tick_builds_buffers_and_header() {
        let mut r = runner();
        r.tick(0.016);
        assert_eq!(r.game().updates, 1);
        assert_eq!(r.mesh_count(), 1);
        assert_eq!(r.label_count(), 1);
        assert_eq!(r.label_texture_count(), 1);
        assert_eq!(r.label_bitmap_width(0), 256);
        assert_eq!(r.header[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(r.header[HEADER_MESH_COUNT], 1.0);
        assert_eq!(r.header[HEADER_LABEL_COUNT], 1.0);
        assert!(r.geometry_vertex_count(0) > 0);
        assert!(r.geometry_positions_ptr(9).is_null());
    }

    #[test]
    fn input_is_seen_once() {
        let mut r = runner();
        r.push_input(InputEvent::PointerUp { x: 1.0, y: 1.0 });
        r.tick(0.016);
        r.tick(0.016);
        assert_eq!(r.game().clicks, 1);
    }

    #[test]
    fn ui_from_init_and_with_game_is_collected() {
        let mut r = runner();
        r.with_game(|_, ctx| ctx.alert("later"));
        let ui = r.take_ui();
        assert_eq!(
            ui,
            vec![UiCommand::SetPanel("ready".into()), UiCommand::Alert("later".into())]
        );
    }

    #[test]
    fn meshes_over_capacity_are_dropped() {
        let mut r = runner();
        r.with_game(|_, ctx| {
            let id = ctx.next_id();
            let g = orrery_engine::GeometryId(0);
            ctx.scene.spawn(Entity::new(id).with_mesh(MeshComponent::new(g, Material::default())));
        });
        r.tick(0.016);
        assert_eq!(r.mesh_count(), 1);
        assert_eq!(r.max_meshes(), 1);
    }

    #[test]
    fn resize_moves_reported_viewport() {
        let mut r = runner();
        assert_eq!(r.viewport_width(), 1280.0);
        r.push_input(InputEvent::Resize { width: 800.0, height: 400.0 });
        r.tick(0.016);
        assert_eq!(r.viewport_width(), 800.0);
        assert_eq!(r.viewport_height(), 400.0);
        assert_eq!(r.header[HEADER_VIEWPORT_WIDTH], 800.0);
        assert_eq!(r.context().camera.aspect, 2.0);
    }

    #[test]
    fn camera_follows_orbit_controls() {
        let mut r = runner();
        r.with_game(|_, ctx| ctx.controls.dolly(-500.0));
        r.tick(0.016);
        assert!(r.context().camera.position.length() < 5.0);
    }
}
