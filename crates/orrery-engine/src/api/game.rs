use glam::Vec2;

use crate::api::types::{EntityId, UiCommand};
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::TextureRegistry;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::core::time::FrameClock;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::{OrbitControls, PerspectiveCamera};
use crate::systems::geometry::GeometryStore;
use crate::systems::label::LabelTextureStore;
use crate::systems::lighting::LightState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Initial viewport width in CSS pixels.
    pub viewport_width: f32,
    /// Initial viewport height in CSS pixels.
    pub viewport_height: f32,
    /// Maximum number of mesh instances (default: 256).
    pub max_meshes: usize,
    /// Maximum number of label billboards (default: 256).
    pub max_labels: usize,
    /// Maximum number of lights (default: 8).
    pub max_lights: usize,
    /// Fixed RNG seed. `None` lets the host pick one (wall clock in the browser).
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            max_meshes: 256,
            max_labels: 256,
            max_lights: 8,
            rng_seed: None,
        }
    }
}

/// The core contract every application must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state: camera, lights, static bodies.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One frame. Runs every display refresh; `ctx.clock` already advanced.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub lights: LightState,
    pub geometries: GeometryStore,
    pub labels: LabelTextureStore,
    pub textures: TextureRegistry,
    pub manifest: Option<AssetManifest>,
    pub clock: FrameClock,
    pub rng: Rng,
    pub ui: Vec<UiCommand>,
    viewport: Vec2,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default(), 42)
    }

    /// Build a context sized for `config`, seeding the RNG with `seed`.
    pub fn with_config(config: &GameConfig, seed: u64) -> Self {
        let mut camera = PerspectiveCamera::default();
        camera.resize(config.viewport_width, config.viewport_height);
        let controls = OrbitControls::from_camera(&camera);
        Self {
            scene: Scene::with_capacity(config.max_meshes + config.max_labels),
            camera,
            controls,
            lights: LightState::new(),
            geometries: GeometryStore::new(),
            labels: LabelTextureStore::new(),
            textures: TextureRegistry::new(),
            manifest: None,
            clock: FrameClock::new(),
            rng: Rng::new(seed),
            ui: Vec::new(),
            viewport: Vec2::new(config.viewport_width, config.viewport_height),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Parse an asset manifest and make its textures addressable by name.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let manifest = AssetManifest::from_json(json)?;
        self.textures = TextureRegistry::from_manifest(&manifest);
        log::info!("asset manifest: {} textures", manifest.textures.len());
        self.manifest = Some(manifest);
        Ok(())
    }

    /// Replace the camera and re-derive the orbit controls from it.
    pub fn set_camera(&mut self, camera: PerspectiveCamera) {
        self.camera = camera;
        self.camera.resize(self.viewport.x, self.viewport.y);
        let enable_zoom = self.controls.enable_zoom;
        self.controls = OrbitControls::from_camera(&self.camera);
        self.controls.enable_zoom = enable_zoom;
    }

    /// Viewport size in CSS pixels.
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Track a new viewport size. Zero sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = Vec2::new(width, height);
        self.camera.resize(width, height);
    }

    /// Apply engine-level input (viewport changes) before the game sees it.
    pub fn apply_input(&mut self, input: &InputQueue) {
        for event in input.iter() {
            if let InputEvent::Resize { width, height } = *event {
                self.resize(width, height);
            }
        }
    }

    /// Queue a blocking user alert.
    pub fn alert(&mut self, message: impl Into<String>) {
        self.ui.push(UiCommand::Alert(message.into()));
    }

    /// Queue a replacement of the info panel contents.
    pub fn set_panel(&mut self, html: impl Into<String>) {
        self.ui.push(UiCommand::SetPanel(html.into()));
    }

    /// Take all queued UI commands.
    pub fn take_ui(&mut self) -> Vec<UiCommand> {
        std::mem::take(&mut self.ui)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        assert!(b > a);
    }

    #[test]
    fn ui_commands_drain_once() {
        let mut ctx = EngineContext::new();
        ctx.alert("oops");
        ctx.set_panel("<h3>Eros</h3>");
        let ui = ctx.take_ui();
        assert_eq!(ui.len(), 2);
        assert_eq!(ui[0], UiCommand::Alert("oops".to_string()));
        assert!(ctx.take_ui().is_empty());
    }

    #[test]
    fn resize_input_updates_camera() {
        let mut ctx = EngineContext::new();
        let mut input = InputQueue::new();
        input.push(InputEvent::Resize { width: 800.0, height: 400.0 });
        input.push(InputEvent::Resize { width: 0.0, height: 400.0 });
        ctx.apply_input(&input);
        assert_eq!(ctx.viewport(), Vec2::new(800.0, 400.0));
        assert_eq!(ctx.camera.aspect, 2.0);
    }

    #[test]
    fn set_camera_rebuilds_orbit() {
        let mut ctx = EngineContext::new();
        ctx.set_camera(PerspectiveCamera::default().with_position(Vec3::new(-3.0, 3.0, 5.0)));
        assert!((ctx.controls.eye() - Vec3::new(-3.0, 3.0, 5.0)).length() < 1e-4);
        assert_eq!(ctx.camera.aspect, 1280.0 / 720.0);
    }

    #[test]
    fn manifest_registers_textures() {
        let mut ctx = EngineContext::new();
        ctx.load_manifest(r#"{"textures":[{"name":"sun","path":"sun.jpg"}]}"#).unwrap();
        assert_eq!(ctx.textures.get("sun"), Some(crate::api::types::TextureId(0)));
        assert!(ctx.load_manifest("not json").is_err());
        assert!(ctx.manifest.is_some());
    }
}
