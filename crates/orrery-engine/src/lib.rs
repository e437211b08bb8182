pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GeometryId, TextureId, LabelTextureId, UiCommand};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, Material, Shading};
pub use components::label::{LabelComponent, LabelStyle, Rgba};
pub use core::scene::Scene;
pub use core::time::FrameClock;
pub use core::rng::Rng;
pub use renderer::instance::{MeshInstance, LabelInstance, RenderBuffer};
pub use renderer::camera::{PerspectiveCamera, OrbitControls, CameraUniform, window_to_ndc};
pub use renderer::traits::{LabelBitmap, LabelRasterizer, RasterError};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::AssetManifest;
pub use assets::registry::TextureRegistry;
pub use bridge::protocol::{ProtocolLayout, FrameHeader, HEADER_FLOATS};
pub use systems::geometry::{Geometry, GeometryStore, BoundingSphere, sphere, perturb};
pub use systems::pick::{Ray, PickHit, pick};
pub use systems::label::{LabelTextureStore, billboard_scale, billboard_scale_from};
pub use systems::lighting::{Light, LightId, LightKind, LightState, LightInstance, hex_rgb};
