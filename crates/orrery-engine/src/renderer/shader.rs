//! Shader programs with their attribute and uniform slots resolved once at link time.

use log::{debug, warn};

use crate::api::types::{AttributeLocation, ProgramId, UniformLocation};
use crate::error::{MeshError, ShaderError};
use crate::renderer::device::{GraphicsDevice, VertexAttributes};
use crate::renderer::mesh::VertexLayout;

/// The three shading techniques.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    /// Point-lit Phong with a diffuse texture.
    Phong,
    /// Single flat colour, positions only.
    FlatColor,
    /// Texture without lighting.
    UnlitTextured,
}

impl ShaderKind {
    pub fn label(self) -> &'static str {
        match self {
            ShaderKind::Phong => "phong",
            ShaderKind::FlatColor => "flat-color",
            ShaderKind::UnlitTextured => "unlit-textured",
        }
    }

    /// Vertex attributes a mesh must provide for this program.
    pub fn required_layout(self) -> VertexLayout {
        match self {
            ShaderKind::Phong => VertexLayout { normals: true, texcoords: true },
            ShaderKind::FlatColor => VertexLayout { normals: false, texcoords: false },
            ShaderKind::UnlitTextured => VertexLayout { normals: false, texcoords: true },
        }
    }

    /// Check that a mesh layout carries every attribute this program reads.
    pub fn check_layout(self, layout: VertexLayout) -> Result<(), MeshError> {
        let required = self.required_layout();
        if required.normals && !layout.normals {
            return Err(MeshError::MissingAttribute { attribute: "normals", program: self.label() });
        }
        if required.texcoords && !layout.texcoords {
            return Err(MeshError::MissingAttribute { attribute: "texcoords", program: self.label() });
        }
        Ok(())
    }
}

pub const A_VERTEX_POSITION: &str = "aVertexPosition";
pub const A_NORMAL: &str = "aNormal";
pub const A_TEXCOORDS: &str = "aTexcoords";

pub const U_WORLD_MATRIX: &str = "uWorldMatrix";
pub const U_VIEW_MATRIX: &str = "uViewMatrix";
pub const U_PROJECTION_MATRIX: &str = "uProjectionMatrix";
pub const U_LIGHT_POSITION: &str = "uLightPosition";
pub const U_CAMERA_POSITION: &str = "uCameraPosition";
pub const U_TEXTURE: &str = "uTexture";
pub const U_ALPHA: &str = "uAlpha";

/// Matrices every program takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformUniforms {
    pub world: Option<UniformLocation>,
    pub view: Option<UniformLocation>,
    pub projection: Option<UniformLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhongAttributes {
    pub position: AttributeLocation,
    pub normal: AttributeLocation,
    pub texcoords: AttributeLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhongUniforms {
    pub transform: TransformUniforms,
    pub light_position: Option<UniformLocation>,
    pub camera_position: Option<UniformLocation>,
    pub texture: Option<UniformLocation>,
    pub alpha: Option<UniformLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhongProgram {
    pub program: ProgramId,
    pub attributes: PhongAttributes,
    pub uniforms: PhongUniforms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatColorAttributes {
    pub position: AttributeLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatColorProgram {
    pub program: ProgramId,
    pub attributes: FlatColorAttributes,
    pub uniforms: TransformUniforms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlitAttributes {
    pub position: AttributeLocation,
    pub texcoords: AttributeLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlitUniforms {
    pub transform: TransformUniforms,
    pub texture: Option<UniformLocation>,
    pub alpha: Option<UniformLocation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlitProgram {
    pub program: ProgramId,
    pub attributes: UnlitAttributes,
    pub uniforms: UnlitUniforms,
}

/// A linked program of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderProgram {
    Phong(PhongProgram),
    FlatColor(FlatColorProgram),
    UnlitTextured(UnlitProgram),
}

/// Per-draw slots common to all kinds, with the kind-specific ones left `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawSlots {
    pub program: ProgramId,
    pub attributes: VertexAttributes,
    pub transform: TransformUniforms,
    pub texture: Option<UniformLocation>,
    pub alpha: Option<UniformLocation>,
}

impl ShaderProgram {
    pub fn kind(&self) -> ShaderKind {
        match self {
            ShaderProgram::Phong(_) => ShaderKind::Phong,
            ShaderProgram::FlatColor(_) => ShaderKind::FlatColor,
            ShaderProgram::UnlitTextured(_) => ShaderKind::UnlitTextured,
        }
    }

    pub fn id(&self) -> ProgramId {
        match self {
            ShaderProgram::Phong(p) => p.program,
            ShaderProgram::FlatColor(p) => p.program,
            ShaderProgram::UnlitTextured(p) => p.program,
        }
    }

    pub fn draw_slots(&self) -> DrawSlots {
        match self {
            ShaderProgram::Phong(p) => DrawSlots {
                program: p.program,
                attributes: VertexAttributes {
                    position: Some(p.attributes.position),
                    normal: Some(p.attributes.normal),
                    texcoord: Some(p.attributes.texcoords),
                },
                transform: p.uniforms.transform,
                texture: p.uniforms.texture,
                alpha: p.uniforms.alpha,
            },
            ShaderProgram::FlatColor(p) => DrawSlots {
                program: p.program,
                attributes: VertexAttributes {
                    position: Some(p.attributes.position),
                    normal: None,
                    texcoord: None,
                },
                transform: p.uniforms,
                texture: None,
                alpha: None,
            },
            ShaderProgram::UnlitTextured(p) => DrawSlots {
                program: p.program,
                attributes: VertexAttributes {
                    position: Some(p.attributes.position),
                    normal: None,
                    texcoord: Some(p.attributes.texcoords),
                },
                transform: p.uniforms.transform,
                texture: p.uniforms.texture,
                alpha: p.uniforms.alpha,
            },
        }
    }
}

/// Resolves names against one linked program.
struct Resolver<'a> {
    device: &'a mut dyn GraphicsDevice,
    program: ProgramId,
    label: &'static str,
}

impl Resolver<'_> {
    fn attribute(&mut self, name: &'static str) -> Result<AttributeLocation, ShaderError> {
        self.device
            .attribute_location(self.program, name)
            .ok_or(ShaderError::MissingAttribute { label: self.label.to_string(), name })
    }

    fn uniform(&mut self, name: &'static str) -> Option<UniformLocation> {
        let location = self.device.uniform_location(self.program, name);
        if location.is_none() {
            debug!("{}: uniform '{}' not active", self.label, name);
        }
        location
    }

    fn transform(&mut self) -> TransformUniforms {
        TransformUniforms {
            world: self.uniform(U_WORLD_MATRIX),
            view: self.uniform(U_VIEW_MATRIX),
            projection: self.uniform(U_PROJECTION_MATRIX),
        }
    }
}

/// Compile a program of the given kind and resolve its slots.
pub fn compile(
    device: &mut dyn GraphicsDevice,
    kind: ShaderKind,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<ShaderProgram, ShaderError> {
    let label = kind.label();
    let program = device.compile_program(label, vertex_src, fragment_src)?;
    let mut r = Resolver { device, program, label };

    let linked = match kind {
        ShaderKind::Phong => ShaderProgram::Phong(PhongProgram {
            program,
            attributes: PhongAttributes {
                position: r.attribute(A_VERTEX_POSITION)?,
                normal: r.attribute(A_NORMAL)?,
                texcoords: r.attribute(A_TEXCOORDS)?,
            },
            uniforms: PhongUniforms {
                transform: r.transform(),
                light_position: r.uniform(U_LIGHT_POSITION),
                camera_position: r.uniform(U_CAMERA_POSITION),
                texture: r.uniform(U_TEXTURE),
                alpha: r.uniform(U_ALPHA),
            },
        }),
        ShaderKind::FlatColor => ShaderProgram::FlatColor(FlatColorProgram {
            program,
            attributes: FlatColorAttributes {
                position: r.attribute(A_VERTEX_POSITION)?,
            },
            uniforms: r.transform(),
        }),
        ShaderKind::UnlitTextured => ShaderProgram::UnlitTextured(UnlitProgram {
            program,
            attributes: UnlitAttributes {
                position: r.attribute(A_VERTEX_POSITION)?,
                texcoords: r.attribute(A_TEXCOORDS)?,
            },
            uniforms: UnlitUniforms {
                transform: r.transform(),
                texture: r.uniform(U_TEXTURE),
                alpha: r.uniform(U_ALPHA),
            },
        }),
    };
    debug!("{}: program linked", label);
    Ok(linked)
}

/// All programs the scene can draw with. A program that failed to build is `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShaderSet {
    pub phong: Option<PhongProgram>,
    /// Compiled and resolved, though no draw in the default scene uses it.
    pub flat_color: Option<FlatColorProgram>,
    pub unlit: Option<UnlitProgram>,
}

/// Vertex/fragment source text for one program. `None` when the asset failed to load.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShaderSources<'a> {
    pub vertex: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

impl ShaderSet {
    /// Build every program. Failures are logged and leave that slot empty.
    pub fn build(
        device: &mut dyn GraphicsDevice,
        phong: ShaderSources<'_>,
        flat_color: ShaderSources<'_>,
        unlit: ShaderSources<'_>,
    ) -> Self {
        let mut set = ShaderSet::default();
        match build_one(device, ShaderKind::Phong, phong) {
            Ok(ShaderProgram::Phong(p)) => set.phong = Some(p),
            Ok(_) => {}
            Err(e) => warn!("{}", e),
        }
        match build_one(device, ShaderKind::FlatColor, flat_color) {
            Ok(ShaderProgram::FlatColor(p)) => set.flat_color = Some(p),
            Ok(_) => {}
            Err(e) => warn!("{}", e),
        }
        match build_one(device, ShaderKind::UnlitTextured, unlit) {
            Ok(ShaderProgram::UnlitTextured(p)) => set.unlit = Some(p),
            Ok(_) => {}
            Err(e) => warn!("{}", e),
        }
        set
    }

    pub fn get(&self, kind: ShaderKind) -> Option<ShaderProgram> {
        match kind {
            ShaderKind::Phong => self.phong.map(ShaderProgram::Phong),
            ShaderKind::FlatColor => self.flat_color.map(ShaderProgram::FlatColor),
            ShaderKind::UnlitTextured => self.unlit.map(ShaderProgram::UnlitTextured),
        }
    }
}

fn build_one(
    device: &mut dyn GraphicsDevice,
    kind: ShaderKind,
    sources: ShaderSources<'_>,
) -> Result<ShaderProgram, ShaderError> {
    let missing = || ShaderError::MissingSource { label: kind.label().to_string() };
    let vertex = sources.vertex.ok_or_else(missing)?;
    let fragment = sources.fragment.ok_or_else(missing)?;
    compile(device, kind, vertex, fragment)
}
