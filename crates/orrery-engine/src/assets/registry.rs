use std::collections::HashMap;
use crate::api::types::TextureId;
use crate::assets::manifest::AssetManifest;

/// Registry of named textures, built from an AssetManifest.
/// Provides name-based texture lookup for game code.
pub struct TextureRegistry {
    textures: HashMap<String, TextureId>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    /// Build a registry from a parsed AssetManifest. Later duplicates win.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut textures = HashMap::with_capacity(manifest.textures.len());
        for (i, desc) in manifest.textures.iter().enumerate() {
            textures.insert(desc.name.clone(), TextureId(i as u32));
        }
        Self { textures }
    }

    /// Look up a texture by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<TextureId> {
        self.textures.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
