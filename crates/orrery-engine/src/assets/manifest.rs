use serde::{Deserialize, Serialize};

/// Asset manifest describing the image textures an application uses.
/// Loaded from a JSON file at runtime; texture order defines `TextureId`s.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetManifest {
    pub textures: Vec<TextureDescriptor>,
}

/// Describes a single image texture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureDescriptor {
    /// Lookup name used by game code (e.g., "sun").
    pub name: String,
    /// Path relative to the page (e.g., "sun.jpg").
    pub path: String,
    /// Whether the renderer should generate mipmaps (default: true).
    #[serde(default = "default_mipmaps")]
    pub mipmaps: bool,
}

fn default_mipmaps() -> bool {
    true
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize back to JSON for the JS loader.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_manifest() {
        let json = r#"{
            "textures": [
                { "name": "sun", "path": "sun.jpg" },
                { "name": "earth", "path": "eday.jpg", "mipmaps": false }
            ]
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.textures.len(), 2);
        assert_eq!(manifest.textures[0].path, "sun.jpg");
        assert!(manifest.textures[0].mipmaps);
        assert!(!manifest.textures[1].mipmaps);
    }

    #[test]
    fn missing_textures_is_an_error() {
        assert!(AssetManifest::from_json("{}").is_err());
    }
}
