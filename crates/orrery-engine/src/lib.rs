pub mod api;
pub mod assets;
pub mod core;
pub mod error;
pub mod input;
pub mod math;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::app::{App, AppConfig, FrameContext};
pub use api::types::{AttributeLocation, MeshId, ProgramId, TextureId, UniformLocation};
pub use assets::barrier::{AssetBarrier, LoadReport};
pub use assets::loaded::LoadedAssets;
pub use assets::manifest::{AssetEntry, AssetKind, AssetManifest};
pub use crate::core::time::FrameClock;
pub use error::{AssetError, MeshError, RenderError, ShaderError};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{DragState, OrbitCamera};
pub use renderer::device::{BlendMode, GraphicsDevice, VertexAttributes};
pub use renderer::geometry::Geometry;
pub use renderer::mesh::{MeshData, MeshVertex, VertexLayout};
pub use renderer::recording::{DeviceCommand, RecordingDevice};
pub use renderer::shader::{ShaderKind, ShaderProgram, ShaderSet, ShaderSources};
