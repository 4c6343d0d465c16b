//! Error types shared by the engine and its host bridges.

use thiserror::Error;

/// Shader compilation and binding failures.
/// A failed program is unusable; geometry that depends on it is skipped.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader '{label}' failed to compile: {log}")]
    CompilationFailed { label: String, log: String },

    #[error("shader program '{label}' failed to link: {log}")]
    LinkFailed { label: String, log: String },

    #[error("source text for shader '{label}' is not loaded")]
    MissingSource { label: String },

    #[error("shader program '{label}' does not expose attribute '{name}'")]
    MissingAttribute { label: String, name: &'static str },

    #[error("device could not create a {what} object")]
    ObjectCreation { what: &'static str },
}

/// Malformed or incompatible mesh data.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to parse mesh JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("mesh file contains no meshes")]
    NoMeshes,

    #[error("mesh has no vertices or no faces")]
    Empty,

    #[error("attribute '{attribute}' has {len} components, expected a multiple of {per_vertex} covering {vertex_count} vertices")]
    ComponentMismatch {
        attribute: &'static str,
        len: usize,
        per_vertex: usize,
        vertex_count: usize,
    },

    #[error("mesh lacks attribute '{attribute}' required by the {program} program")]
    MissingAttribute {
        attribute: &'static str,
        program: &'static str,
    },

    #[error("face index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("mesh has {0} vertices, more than 16-bit indices can address")]
    TooManyVertices(usize),
}

/// Asset fetch and decode failures. Non-fatal while loading.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to fetch '{path}': {reason}")]
    Fetch { path: String, reason: String },

    #[error("'{path}' returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("failed to decode '{path}': {reason}")]
    Decode { path: String, reason: String },

    #[error("asset '{0}' is not loaded")]
    Missing(String),

    #[error("invalid asset manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Errors raised while creating device resources.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("device upload failed: {0}")]
    Upload(String),

    #[error("invalid scene: {0}")]
    InvalidScene(String),
}
