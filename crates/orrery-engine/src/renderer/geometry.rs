use glam::Mat4;

use crate::api::types::{MeshId, TextureId};
use crate::error::RenderError;
use crate::renderer::camera::OrbitCamera;
use crate::renderer::device::{GraphicsDevice, VertexAttributes};
use crate::renderer::mesh::{MeshData, VertexLayout};
use crate::renderer::shader::ShaderProgram;

/// Texture unit every program samples from.
pub const TEXTURE_UNIT: u32 = 0;

/// An uploaded mesh bound to a texture and a default program, placed in the
/// world by `world_matrix`.
#[derive(Debug, Clone)]
pub struct Geometry {
    mesh: MeshId,
    layout: VertexLayout,
    texture: Option<TextureId>,
    program: ShaderProgram,
    /// Local-to-world transform. Rewritten every frame for moving bodies.
    pub world_matrix: Mat4,
    /// Opacity passed to `uAlpha`.
    pub alpha: f32,
}

impl Geometry {
    /// Validate `mesh` for `program` and upload it.
    /// A missing texture is allowed; the draw then samples an unbound unit.
    pub fn create(
        device: &mut dyn GraphicsDevice,
        mesh: &MeshData,
        texture: Option<TextureId>,
        program: ShaderProgram,
    ) -> Result<Self, RenderError> {
        program.kind().check_layout(mesh.layout)?;
        let id = device.upload_mesh(mesh)?;
        Ok(Self {
            mesh: id,
            layout: mesh.layout,
            texture,
            program,
            world_matrix: Mat4::IDENTITY,
            alpha: 1.0,
        })
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    /// Bind a program (the override if given, else the default), set per-draw
    /// uniforms and issue the draw. Leaves that program and texture bound.
    pub fn render(
        &self,
        device: &mut dyn GraphicsDevice,
        camera: &OrbitCamera,
        projection: &Mat4,
        shader_override: Option<&ShaderProgram>,
    ) {
        let program = shader_override.unwrap_or(&self.program);
        let slots = program.draw_slots();

        device.use_program(slots.program);
        if let Some(loc) = slots.transform.world {
            device.set_uniform_mat4(loc, &self.world_matrix);
        }
        if let Some(loc) = slots.transform.view {
            device.set_uniform_mat4(loc, &camera.view_matrix());
        }
        if let Some(loc) = slots.transform.projection {
            device.set_uniform_mat4(loc, projection);
        }
        if let Some(loc) = slots.texture {
            device.set_uniform_i32(loc, TEXTURE_UNIT as i32);
            device.bind_texture(TEXTURE_UNIT, self.texture);
        }
        if let Some(loc) = slots.alpha {
            device.set_uniform_f32(loc, self.alpha);
        }

        // An override may read attributes this mesh never had; leave those disabled.
        let attributes = VertexAttributes {
            position: slots.attributes.position,
            normal: slots.attributes.normal.filter(|_| self.layout.normals),
            texcoord: slots.attributes.texcoord.filter(|_| self.layout.texcoords),
        };
        device.draw_indexed(self.mesh, &attributes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use crate::math::translation;
    use crate::renderer::recording::{DeviceCommand, RecordingDevice};
    use crate::renderer::shader::{compile, ShaderKind};

    fn bare_triangle() -> MeshData {
        MeshData::from_json(r#"{"meshes":[{"vertices":[0,0,0,1,0,0,0,1,0],"faces":[[0,1,2]]}]}"#)
            .unwrap()
    }

    #[test]
    fn create_uploads_once() {
        let mut device = RecordingDevice::new();
        let program = compile(&mut device, ShaderKind::UnlitTextured, "", "").unwrap();
        let geometry = Geometry::create(&mut device, &MeshData::quad(), Some(TextureId(4)), program).unwrap();
        assert_eq!(device.mesh_count(), 1);
        assert_eq!(geometry.alpha, 1.0);
        assert_eq!(geometry.world_matrix, Mat4::IDENTITY);
        assert_eq!(geometry.texture(), Some(TextureId(4)));
    }

    #[test]
    fn create_rejects_mesh_missing_required_attributes() {
        let mut device = RecordingDevice::new();
        let program = compile(&mut device, ShaderKind::Phong, "", "").unwrap();
        let result = Geometry::create(&mut device, &bare_triangle(), None, program);
        assert!(matches!(
            result,
            Err(RenderError::Mesh(MeshError::MissingAttribute { attribute: "normals", .. }))
        ));
        assert_eq!(device.mesh_count(), 0);
    }

    #[test]
    fn render_sets_per_draw_uniforms_then_draws() {
        let mut device = RecordingDevice::new();
        let program = compile(&mut device, ShaderKind::Phong, "", "").unwrap();
        let world = translation(1.0, 2.0, 3.0);
        let mut geometry = Geometry::create(&mut device, &MeshData::quad(), Some(TextureId(1)), program)
            .unwrap()
            .with_alpha(0.5);
        geometry.world_matrix = world;
        let camera = OrbitCamera::new();
        let projection = crate::math::perspective_deg(45.0, 1.5, 0.1, 1000.0);

        geometry.render(&mut device, &camera, &projection, None);

        assert_eq!(device.commands.first(), Some(&DeviceCommand::UseProgram(program.id())));
        assert!(matches!(device.commands.last(), Some(DeviceCommand::Draw { .. })));
        assert_eq!(device.last_mat4("uWorldMatrix"), Some(world));
        assert_eq!(device.last_mat4("uViewMatrix"), Some(camera.view_matrix()));
        assert_eq!(device.last_mat4("uProjectionMatrix"), Some(projection));
        assert!(device.commands.contains(&DeviceCommand::BindTexture {
            unit: TEXTURE_UNIT,
            texture: Some(TextureId(1)),
        }));
        assert!(device.commands.iter().any(|c| matches!(c, DeviceCommand::UniformF32(_, a) if *a == 0.5)));
    }

    #[test]
    fn override_program_is_bound_instead() {
        let mut device = RecordingDevice::new();
        let phong = compile(&mut device, ShaderKind::Phong, "", "").unwrap();
        let flat = compile(&mut device, ShaderKind::FlatColor, "", "").unwrap();
        let geometry = Geometry::create(&mut device, &MeshData::quad(), None, phong).unwrap();

        geometry.render(&mut device, &OrbitCamera::new(), &Mat4::IDENTITY, Some(&flat));

        assert_eq!(device.commands[0], DeviceCommand::UseProgram(flat.id()));
        assert!(!device.commands.iter().any(|c| matches!(c, DeviceCommand::BindTexture { .. })));
        match device.draws().next() {
            Some(DeviceCommand::Draw { attributes, .. }) => {
                assert!(attributes.position.is_some());
                assert!(attributes.normal.is_none());
                assert!(attributes.texcoord.is_none());
            }
            other => panic!("expected a draw, got {:?}", other),
        };
    }

    #[test]
    fn override_skips_attributes_the_mesh_lacks() {
        let mut device = RecordingDevice::new();
        let flat = compile(&mut device, ShaderKind::FlatColor, "", "").unwrap();
        let unlit = compile(&mut device, ShaderKind::UnlitTextured, "", "").unwrap();
        let geometry = Geometry::create(&mut device, &bare_triangle(), None, flat).unwrap();

        geometry.render(&mut device, &OrbitCamera::new(), &Mat4::IDENTITY, Some(&unlit));

        match device.draws().next() {
            Some(DeviceCommand::Draw { attributes, .. }) => assert!(attributes.texcoord.is_none()),
            other => panic!("expected a draw, got {:?}", other),
        };
    }
}
