/// Handle to a linked shader program owned by a `GraphicsDevice`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// Handle to an uploaded mesh (vertex + index buffers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

/// Handle to an uploaded texture.
/// The image behind it is decoded by the host; the engine only passes the handle through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Vertex attribute slot as reported by the shader compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct AttributeLocation(pub u32);

/// Uniform slot handle. Devices map these to their native location objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);
