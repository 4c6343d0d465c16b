//! Graphics device contract.
//!
//! The engine never talks to a graphics API directly. A host bridge (WebGL in
//! the browser) implements `GraphicsDevice`; tests use `RecordingDevice`.
//! Every call mutates global device state, exactly like the underlying API:
//! the bound program and texture persist until the next bind.

use glam::{Mat4, Vec3};

use crate::api::types::{AttributeLocation, MeshId, ProgramId, TextureId, UniformLocation};
use crate::error::{RenderError, ShaderError};
use crate::renderer::mesh::MeshData;

/// Blend equations the scene needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// `src * src_alpha + dst * (1 - src_alpha)`.
    Alpha,
}

/// Attribute slots to feed from an uploaded mesh for one draw.
/// `None` leaves the attribute disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VertexAttributes {
    pub position: Option<AttributeLocation>,
    pub normal: Option<AttributeLocation>,
    pub texcoord: Option<AttributeLocation>,
}

pub trait GraphicsDevice {
    /// Compile and link a program from vertex/fragment source.
    fn compile_program(
        &mut self,
        label: &str,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<ProgramId, ShaderError>;

    /// Look up a vertex attribute by name. `None` if the program has no such attribute.
    fn attribute_location(&self, program: ProgramId, name: &str) -> Option<AttributeLocation>;

    /// Look up a uniform by name. `None` if the program has no such uniform
    /// (including uniforms the compiler optimized out).
    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    /// Upload interleaved vertex and index data once.
    fn upload_mesh(&mut self, mesh: &MeshData) -> Result<MeshId, RenderError>;

    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clear colour and depth.
    fn clear(&mut self, color: [f32; 4]);

    fn use_program(&mut self, program: ProgramId);

    fn set_uniform_mat4(&mut self, location: UniformLocation, value: &Mat4);

    fn set_uniform_vec3(&mut self, location: UniformLocation, value: Vec3);

    fn set_uniform_f32(&mut self, location: UniformLocation, value: f32);

    fn set_uniform_i32(&mut self, location: UniformLocation, value: i32);

    /// Bind a texture to a unit. `None` unbinds (draws sample black).
    fn bind_texture(&mut self, unit: u32, texture: Option<TextureId>);

    /// Draw every index of an uploaded mesh as triangles.
    fn draw_indexed(&mut self, mesh: MeshId, attributes: &VertexAttributes);

    /// Enable blending with the given mode, or disable it with `None`.
    fn set_blend(&mut self, mode: Option<BlendMode>);
}
