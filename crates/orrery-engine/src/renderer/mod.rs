pub mod camera;
pub mod device;
pub mod geometry;
pub mod mesh;
pub mod recording;
pub mod shader;

// Re-export key types for convenient access
pub use camera::{DragState, OrbitCamera};
pub use device::{BlendMode, GraphicsDevice, VertexAttributes};
pub use geometry::Geometry;
pub use mesh::{MeshData, MeshVertex, VertexLayout};
pub use recording::{DeviceCommand, RecordingDevice};
pub use shader::{ShaderKind, ShaderProgram, ShaderSet, ShaderSources};
