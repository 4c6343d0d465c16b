//! `GraphicsDevice` backed by a WebGL 1 context.

use std::collections::HashMap;

use glam::{Mat4, Vec3};
use log::debug;
use orrery_engine::{
    AttributeLocation, BlendMode, GraphicsDevice, MeshData, MeshId, MeshVertex, ProgramId,
    RenderError, ShaderError, TextureId, UniformLocation, VertexAttributes,
};
use web_sys::{
    HtmlImageElement, WebGlBuffer, WebGlProgram, WebGlRenderingContext as GL, WebGlShader,
    WebGlTexture, WebGlUniformLocation,
};

struct GpuMesh {
    vertices: WebGlBuffer,
    indices: WebGlBuffer,
    index_count: i32,
}

/// Owns every GL object it creates. Engine handles index into these tables.
pub struct WebGlDevice {
    gl: GL,
    programs: Vec<WebGlProgram>,
    uniforms: Vec<WebGlUniformLocation>,
    uniform_cache: HashMap<(ProgramId, String), UniformLocation>,
    meshes: Vec<GpuMesh>,
    textures: Vec<WebGlTexture>,
    enabled_attributes: Vec<u32>,
}

impl WebGlDevice {
    pub fn new(gl: GL) -> Self {
        Self {
            gl,
            programs: Vec::new(),
            uniforms: Vec::new(),
            uniform_cache: HashMap::new(),
            meshes: Vec::new(),
            textures: Vec::new(),
            enabled_attributes: Vec::new(),
        }
    }

    /// Upload a decoded image as a 2D texture (flipped to GL's bottom-left origin).
    pub fn upload_image(&mut self, image: &HtmlImageElement) -> Result<TextureId, RenderError> {
        let gl = &self.gl;
        let texture = gl
            .create_texture()
            .ok_or_else(|| RenderError::Upload("could not create texture".into()))?;
        gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
        gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
        gl.tex_image_2d_with_u32_and_u32_and_image(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            image,
        )
        .map_err(|e| RenderError::Upload(format!("texImage2D: {:?}", e)))?;
        // Planet textures are not power-of-two sized, so no mipmaps and no repeat.
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
        gl.bind_texture(GL::TEXTURE_2D, None);

        let id = TextureId(self.textures.len() as u32);
        self.textures.push(texture);
        Ok(id)
    }

    fn compile_stage(&self, label: &str, kind: u32, source: &str) -> Result<WebGlShader, ShaderError> {
        let gl = &self.gl;
        let shader = gl
            .create_shader(kind)
            .ok_or(ShaderError::ObjectCreation { what: "shader" })?;
        gl.shader_source(&shader, source);
        gl.compile_shader(&shader);
        let ok = gl
            .get_shader_parameter(&shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if ok {
            return Ok(shader);
        }
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        let stage = if kind == GL::VERTEX_SHADER { "vs" } else { "fs" };
        Err(ShaderError::CompilationFailed {
            label: format!("{}.{}", label, stage),
            log,
        })
    }

    fn bind_attribute(&mut self, location: Option<AttributeLocation>, size: i32, offset: usize) {
        let Some(AttributeLocation(index)) = location else {
            return;
        };
        self.gl.vertex_attrib_pointer_with_i32(
            index,
            size,
            GL::FLOAT,
            false,
            MeshVertex::STRIDE_BYTES as i32,
            offset as i32,
        );
        self.gl.enable_vertex_attrib_array(index);
        self.enabled_attributes.push(index);
    }

    fn uniform(&self, location: UniformLocation) -> Option<&WebGlUniformLocation> {
        self.uniforms.get(location.0 as usize)
    }
}

impl GraphicsDevice for WebGlDevice {
    fn compile_program(
        &mut self,
        label: &str,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<ProgramId, ShaderError> {
        let vs = self.compile_stage(label, GL::VERTEX_SHADER, vertex_src)?;
        let fs = self.compile_stage(label, GL::FRAGMENT_SHADER, fragment_src)?;

        let gl = &self.gl;
        let program = gl
            .create_program()
            .ok_or(ShaderError::ObjectCreation { what: "program" })?;
        gl.attach_shader(&program, &vs);
        gl.attach_shader(&program, &fs);
        gl.link_program(&program);
        gl.delete_shader(Some(&vs));
        gl.delete_shader(Some(&fs));

        let linked = gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !linked {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            gl.delete_program(Some(&program));
            return Err(ShaderError::LinkFailed {
                label: label.to_string(),
                log,
            });
        }

        let id = ProgramId(self.programs.len() as u32);
        self.programs.push(program);
        debug!("program '{}' linked as {:?}", label, id);
        Ok(id)
    }

    fn attribute_location(&self, program: ProgramId, name: &str) -> Option<AttributeLocation> {
        let program = self.programs.get(program.0 as usize)?;
        let location = self.gl.get_attrib_location(program, name);
        (location >= 0).then(|| AttributeLocation(location as u32))
    }

    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let key = (program, name.to_string());
        if let Some(&location) = self.uniform_cache.get(&key) {
            return Some(location);
        }
        let gl_program = self.programs.get(program.0 as usize)?;
        let gl_location = self.gl.get_uniform_location(gl_program, name)?;
        let location = UniformLocation(self.uniforms.len() as u32);
        self.uniforms.push(gl_location);
        self.uniform_cache.insert(key, location);
        Some(location)
    }

    fn upload_mesh(&mut self, mesh: &MeshData) -> Result<MeshId, RenderError> {
        let gl = &self.gl;
        let vertices = gl
            .create_buffer()
            .ok_or_else(|| RenderError::Upload("could not create vertex buffer".into()))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertices));
        gl.buffer_data_with_u8_array(
            GL::ARRAY_BUFFER,
            bytemuck::cast_slice(&mesh.vertices),
            GL::STATIC_DRAW,
        );

        let indices = gl
            .create_buffer()
            .ok_or_else(|| RenderError::Upload("could not create index buffer".into()))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
        gl.buffer_data_with_u8_array(
            GL::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(&mesh.indices),
            GL::STATIC_DRAW,
        );

        let id = MeshId(self.meshes.len() as u32);
        self.meshes.push(GpuMesh {
            vertices,
            indices,
            index_count: mesh.index_count() as i32,
        });
        Ok(id)
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    fn clear(&mut self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        self.gl.clear_color(r, g, b, a);
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
    }

    fn use_program(&mut self, program: ProgramId) {
        self.gl.use_program(self.programs.get(program.0 as usize));
    }

    fn set_uniform_mat4(&mut self, location: UniformLocation, value: &Mat4) {
        self.gl
            .uniform_matrix4fv_with_f32_array(self.uniform(location), false, &value.to_cols_array());
    }

    fn set_uniform_vec3(&mut self, location: UniformLocation, value: Vec3) {
        self.gl.uniform3f(self.uniform(location), value.x, value.y, value.z);
    }

    fn set_uniform_f32(&mut self, location: UniformLocation, value: f32) {
        self.gl.uniform1f(self.uniform(location), value);
    }

    fn set_uniform_i32(&mut self, location: UniformLocation, value: i32) {
        self.gl.uniform1i(self.uniform(location), value);
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<TextureId>) {
        let texture = texture.and_then(|t| self.textures.get(t.0 as usize));
        self.gl.active_texture(GL::TEXTURE0 + unit);
        self.gl.bind_texture(GL::TEXTURE_2D, texture);
    }

    fn draw_indexed(&mut self, mesh: MeshId, attributes: &VertexAttributes) {
        let Some(gpu) = self.meshes.get(mesh.0 as usize) else {
            return;
        };
        let index_count = gpu.index_count;
        self.gl.bind_buffer(GL::ARRAY_BUFFER, Some(&gpu.vertices));
        self.gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&gpu.indices));

        for index in self.enabled_attributes.drain(..) {
            self.gl.disable_vertex_attrib_array(index);
        }
        self.bind_attribute(attributes.position, 3, MeshVertex::POSITION_OFFSET);
        self.bind_attribute(attributes.normal, 3, MeshVertex::NORMAL_OFFSET);
        self.bind_attribute(attributes.texcoord, 2, MeshVertex::TEXCOORD_OFFSET);

        self.gl
            .draw_elements_with_i32(GL::TRIANGLES, index_count, GL::UNSIGNED_SHORT, 0);
    }

    fn set_blend(&mut self, mode: Option<BlendMode>) {
        match mode {
            Some(BlendMode::Alpha) => {
                self.gl.enable(GL::BLEND);
                self.gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);
            }
            None => self.gl.disable(GL::BLEND),
        }
    }
}
