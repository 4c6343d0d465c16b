use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// How the host should fetch and decode an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// UTF-8 text (shader source).
    Text,
    /// Structured JSON (mesh data).
    Json,
    /// Image decoded by the host and uploaded as a texture.
    Image,
}

/// One asset to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    /// Key the app uses to look the asset up after loading.
    pub name: String,
    /// Path relative to `AssetManifest::base_path`.
    pub path: String,
    pub kind: AssetKind,
}

impl AssetEntry {
    pub fn new(name: &str, path: &str, kind: AssetKind) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind,
        }
    }
}

/// Every asset an app needs before its scene can be built.
/// Loaded from a JSON file bundled with the app.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Prefix joined onto every entry path (e.g. "./").
    #[serde(default)]
    pub base_path: String,
    pub assets: Vec<AssetEntry>,
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Full fetch URL for an entry.
    pub fn url(&self, entry: &AssetEntry) -> String {
        if self.base_path.is_empty() {
            return entry.path.clone();
        }
        let base = self.base_path.trim_end_matches('/');
        let path = entry.path.trim_start_matches("./").trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    pub fn get(&self, name: &str) -> Option<&AssetEntry> {
        self.assets.iter().find(|a| a.name == name)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn count(&self, kind: AssetKind) -> usize {
        self.assets.iter().filter(|a| a.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest() {
        let json = r#"{
            "base_path": "assets",
            "assets": [
                { "name": "phong_vs", "path": "./shaders/phong.vs.glsl", "kind": "text" },
                { "name": "sphere", "path": "data/sphere.json", "kind": "json" },
                { "name": "earth", "path": "data/earth.jpg", "kind": "image" }
            ]
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.len(), 3);
        assert_eq!(manifest.count(AssetKind::Image), 1);
        let vs = manifest.get("phong_vs").unwrap();
        assert_eq!(vs.kind, AssetKind::Text);
        assert_eq!(manifest.url(vs), "assets/shaders/phong.vs.glsl");
    }

    #[test]
    fn url_without_base_is_path() {
        let json = r#"{ "assets": [ { "name": "moon", "path": "./data/moon.png", "kind": "image" } ] }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.url(&manifest.assets[0]), "./data/moon.png");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let json = r#"{ "assets": [ { "name": "x", "path": "x.wav", "kind": "audio" } ] }"#;
        assert!(matches!(AssetManifest::from_json(json), Err(AssetError::Manifest(_))));
    }
}
