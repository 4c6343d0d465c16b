use std::collections::HashMap;

use crate::api::types::TextureId;
use crate::error::{AssetError, RenderError};
use crate::renderer::mesh::MeshData;

/// Everything that loaded successfully, keyed by manifest name.
/// Failed assets are simply absent.
#[derive(Debug, Default)]
pub struct LoadedAssets {
    texts: HashMap<String, String>,
    json: HashMap<String, serde_json::Value>,
    textures: HashMap<String, TextureId>,
}

impl LoadedAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_text(&mut self, name: impl Into<String>, text: String) {
        self.texts.insert(name.into(), text);
    }

    pub fn insert_json(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.json.insert(name.into(), value);
    }

    pub fn insert_texture(&mut self, name: impl Into<String>, texture: TextureId) {
        self.textures.insert(name.into(), texture);
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }

    pub fn json(&self, name: &str) -> Option<&serde_json::Value> {
        self.json.get(name)
    }

    pub fn texture(&self, name: &str) -> Option<TextureId> {
        self.textures.get(name).copied()
    }

    /// Decode a loaded JSON asset as mesh data.
    pub fn mesh(&self, name: &str) -> Result<MeshData, RenderError> {
        let value = self
            .json
            .get(name)
            .ok_or_else(|| AssetError::Missing(name.to_string()))?;
        Ok(MeshData::from_value(value.clone())?)
    }

    pub fn len(&self) -> usize {
        self.texts.len() + self.json.len() + self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_by_name() {
        let mut assets = LoadedAssets::new();
        assets.insert_text("vs", "void main() {}".to_string());
        assets.insert_texture("earth", TextureId(3));
        assert_eq!(assets.text("vs"), Some("void main() {}"));
        assert_eq!(assets.texture("earth"), Some(TextureId(3)));
        assert_eq!(assets.texture("mars"), None);
        assert_eq!(assets.len(), 2);
    }

    #[test]
    fn mesh_decodes_json_asset() {
        let mut assets = LoadedAssets::new();
        let value = serde_json::json!({
            "meshes": [{ "vertices": [0,0,0, 1,0,0, 0,1,0], "faces": [[0,1,2]] }]
        });
        assets.insert_json("sphere", value);
        assert_eq!(assets.mesh("sphere").unwrap().vertex_count(), 3);
        assert!(assets.mesh("cube").is_err());
    }
}
