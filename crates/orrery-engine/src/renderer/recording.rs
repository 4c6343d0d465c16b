use std::collections::{HashMap, HashSet};

use glam::{Mat4, Vec3};

use crate::api::types::{AttributeLocation, MeshId, ProgramId, TextureId, UniformLocation};
use crate::error::{RenderError, ShaderError};
use crate::renderer::device::{BlendMode, GraphicsDevice, VertexAttributes};
use crate::renderer::mesh::MeshData;

/// One recorded device call.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCommand {
    Viewport { width: u32, height: u32 },
    Clear([f32; 4]),
    UseProgram(ProgramId),
    UniformMat4(UniformLocation, Mat4),
    UniformVec3(UniformLocation, Vec3),
    UniformF32(UniformLocation, f32),
    UniformI32(UniformLocation, i32),
    BindTexture { unit: u32, texture: Option<TextureId> },
    Draw { mesh: MeshId, attributes: VertexAttributes },
    Blend(Option<BlendMode>),
}

/// Headless `GraphicsDevice` that records every call.
///
/// Any attribute or uniform name resolves unless hidden, so programs link
/// without real shader source. Used by tests to assert draw order and
/// uniform traffic.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub commands: Vec<DeviceCommand>,
    programs: Vec<String>,
    uniforms: HashMap<(ProgramId, String), UniformLocation>,
    uniform_names: Vec<String>,
    meshes: Vec<MeshData>,
    hidden_attributes: HashSet<String>,
    hidden_uniforms: HashSet<String>,
    failing_programs: HashSet<String>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `attribute_location` report `name` as absent.
    pub fn hide_attribute(&mut self, name: &str) {
        self.hidden_attributes.insert(name.to_string());
    }

    /// Make `uniform_location` report `name` as absent.
    pub fn hide_uniform(&mut self, name: &str) {
        self.hidden_uniforms.insert(name.to_string());
    }

    /// Make `compile_program` fail for programs with this label.
    pub fn fail_compile(&mut self, label: &str) {
        self.failing_programs.insert(label.to_string());
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn program_label(&self, program: ProgramId) -> Option<&str> {
        self.programs.get(program.0 as usize).map(String::as_str)
    }

    pub fn uniform_name(&self, location: UniformLocation) -> Option<&str> {
        self.uniform_names.get(location.0 as usize).map(String::as_str)
    }

    pub fn mesh(&self, mesh: MeshId) -> Option<&MeshData> {
        self.meshes.get(mesh.0 as usize)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// All draw commands, in order.
    pub fn draws(&self) -> impl Iterator<Item = &DeviceCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DeviceCommand::Draw { .. }))
    }

    /// The last value written to a uniform with this name, across all programs.
    pub fn last_mat4(&self, name: &str) -> Option<Mat4> {
        self.commands.iter().rev().find_map(|c| match c {
            DeviceCommand::UniformMat4(loc, m) if self.uniform_name(*loc) == Some(name) => Some(*m),
            _ => None,
        })
    }
}

impl GraphicsDevice for RecordingDevice {
    fn compile_program(
        &mut self,
        label: &str,
        _vertex_src: &str,
        _fragment_src: &str,
    ) -> Result<ProgramId, ShaderError> {
        if self.failing_programs.contains(label) {
            return Err(ShaderError::CompilationFailed {
                label: label.to_string(),
                log: "rejected by recording device".to_string(),
            });
        }
        let id = ProgramId(self.programs.len() as u32);
        self.programs.push(label.to_string());
        Ok(id)
    }

    fn attribute_location(&self, _program: ProgramId, name: &str) -> Option<AttributeLocation> {
        if self.hidden_attributes.contains(name) {
            return None;
        }
        let slot = match name {
            "aVertexPosition" => 0,
            "aNormal" => 1,
            "aTexcoords" => 2,
            _ => 3,
        };
        Some(AttributeLocation(slot))
    }

    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        if self.hidden_uniforms.contains(name) {
            return None;
        }
        let key = (program, name.to_string());
        if let Some(loc) = self.uniforms.get(&key) {
            return Some(*loc);
        }
        let loc = UniformLocation(self.uniform_names.len() as u32);
        self.uniform_names.push(name.to_string());
        self.uniforms.insert(key, loc);
        Some(loc)
    }

    fn upload_mesh(&mut self, mesh: &MeshData) -> Result<MeshId, RenderError> {
        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(mesh.clone());
        Ok(id)
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.commands.push(DeviceCommand::Viewport { width, height });
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.commands.push(DeviceCommand::Clear(color));
    }

    fn use_program(&mut self, program: ProgramId) {
        self.commands.push(DeviceCommand::UseProgram(program));
    }

    fn set_uniform_mat4(&mut self, location: UniformLocation, value: &Mat4) {
        self.commands.push(DeviceCommand::UniformMat4(location, *value));
    }

    fn set_uniform_vec3(&mut self, location: UniformLocation, value: Vec3) {
        self.commands.push(DeviceCommand::UniformVec3(location, value));
    }

    fn set_uniform_f32(&mut self, location: UniformLocation, value: f32) {
        self.commands.push(DeviceCommand::UniformF32(location, value));
    }

    fn set_uniform_i32(&mut self, location: UniformLocation, value: i32) {
        self.commands.push(DeviceCommand::UniformI32(location, value));
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<TextureId>) {
        self.commands.push(DeviceCommand::BindTexture { unit, texture });
    }

    fn draw_indexed(&mut self, mesh: MeshId, attributes: &VertexAttributes) {
        self.commands.push(DeviceCommand::Draw { mesh, attributes: *attributes });
    }

    fn set_blend(&mut self, mode: Option<BlendMode>) {
        self.commands.push(DeviceCommand::Blend(mode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_locations_are_stable_per_program() {
        let mut device = RecordingDevice::new();
        let a = device.compile_program("a", "", "").unwrap();
        let b = device.compile_program("b", "", "").unwrap();
        let wa = device.uniform_location(a, "uWorldMatrix").unwrap();
        assert_eq!(device.uniform_location(a, "uWorldMatrix"), Some(wa));
        let wb = device.uniform_location(b, "uWorldMatrix").unwrap();
        assert_ne!(wa, wb);
        assert_eq!(device.uniform_name(wb), Some("uWorldMatrix"));
        assert_eq!(device.program_label(b), Some("b"));
    }

    #[test]
    fn records_in_call_order() {
        let mut device = RecordingDevice::new();
        device.clear([0.0, 0.0, 0.0, 1.0]);
        device.set_blend(Some(BlendMode::Alpha));
        device.set_blend(None);
        assert_eq!(device.commands.len(), 3);
        assert_eq!(device.commands[1], DeviceCommand::Blend(Some(BlendMode::Alpha)));
    }
}
