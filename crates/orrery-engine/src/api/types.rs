/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Handle to a geometry stored in the engine's `GeometryStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(pub u32);

/// Handle to an image texture declared in the asset manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u32);

/// Handle to a rasterized label bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelTextureId(pub u32);

/// A DOM-facing command produced by game logic.
///
/// The runner drains these after every frame and applies them to the
/// document once its own borrow is released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Show a blocking `window.alert`.
    Alert(String),
    /// Replace the inner HTML of the info panel.
    SetPanel(String),
}
