use bytemuck::{Pod, Zeroable};
use serde::Deserialize;

use crate::error::MeshError;

/// Interleaved vertex as uploaded to the GPU.
/// 8 floats = 32 bytes stride: position (3), normal (3), texcoord (2).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
}

impl MeshVertex {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    pub const POSITION_OFFSET: usize = 0;
    pub const NORMAL_OFFSET: usize = 12;
    pub const TEXCOORD_OFFSET: usize = 24;
}

/// Which optional attributes the source data actually provided.
/// Absent attributes are zero-filled in the interleaved buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VertexLayout {
    pub normals: bool,
    pub texcoords: bool,
}

/// Triangle mesh ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
    pub layout: VertexLayout,
}

/// Mesh JSON as exported by assimp2json: flat component arrays plus faces.
#[derive(Debug, Deserialize)]
struct MeshFile {
    meshes: Vec<RawMesh>,
}

#[derive(Debug, Deserialize)]
struct RawMesh {
    vertices: Vec<f32>,
    #[serde(default)]
    normals: Vec<f32>,
    #[serde(default)]
    texturecoords: Vec<Vec<f32>>,
    faces: Vec<Vec<u32>>,
}

impl MeshData {
    /// Parse the first mesh of an assimp-style JSON document.
    pub fn from_json(json: &str) -> Result<Self, MeshError> {
        let file: MeshFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Same as `from_json`, starting from an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, MeshError> {
        let file: MeshFile = serde_json::from_value(value)?;
        Self::from_file(file)
    }

    fn from_file(file: MeshFile) -> Result<Self, MeshError> {
        let raw = file.meshes.into_iter().next().ok_or(MeshError::NoMeshes)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawMesh) -> Result<Self, MeshError> {
        if raw.vertices.is_empty() || raw.faces.is_empty() {
            return Err(MeshError::Empty);
        }
        if raw.vertices.len() % 3 != 0 {
            return Err(MeshError::ComponentMismatch {
                attribute: "vertices",
                len: raw.vertices.len(),
                per_vertex: 3,
                vertex_count: raw.vertices.len() / 3,
            });
        }
        let vertex_count = raw.vertices.len() / 3;
        if vertex_count > u16::MAX as usize + 1 {
            return Err(MeshError::TooManyVertices(vertex_count));
        }

        let has_normals = !raw.normals.is_empty();
        if has_normals && raw.normals.len() != vertex_count * 3 {
            return Err(MeshError::ComponentMismatch {
                attribute: "normals",
                len: raw.normals.len(),
                per_vertex: 3,
                vertex_count,
            });
        }

        // assimp may emit 2- or 3-component UVs; only (u, v) is kept.
        let uvs = raw.texturecoords.into_iter().next().unwrap_or_default();
        let uv_stride = if uvs.is_empty() {
            0
        } else if uvs.len() == vertex_count * 2 {
            2
        } else if uvs.len() == vertex_count * 3 {
            3
        } else {
            return Err(MeshError::ComponentMismatch {
                attribute: "texturecoords",
                len: uvs.len(),
                per_vertex: 2,
                vertex_count,
            });
        };

        let vertices = (0..vertex_count)
            .map(|i| {
                let p = &raw.vertices[i * 3..i * 3 + 3];
                let mut v = MeshVertex {
                    position: [p[0], p[1], p[2]],
                    ..MeshVertex::default()
                };
                if has_normals {
                    let n = &raw.normals[i * 3..i * 3 + 3];
                    v.normal = [n[0], n[1], n[2]];
                }
                if uv_stride > 0 {
                    v.texcoord = [uvs[i * uv_stride], uvs[i * uv_stride + 1]];
                }
                v
            })
            .collect();

        let mut indices = Vec::with_capacity(raw.faces.len() * 3);
        for face in &raw.faces {
            for &index in face {
                if index as usize >= vertex_count {
                    return Err(MeshError::IndexOutOfRange { index, vertex_count });
                }
            }
            // Fan-triangulate anything larger than a triangle; degenerate faces are dropped.
            for k in 1..face.len().saturating_sub(1) {
                indices.extend_from_slice(&[face[0] as u16, face[k] as u16, face[k + 1] as u16]);
            }
        }
        if indices.is_empty() {
            return Err(MeshError::Empty);
        }

        Ok(Self {
            vertices,
            indices,
            layout: VertexLayout {
                normals: has_normals,
                texcoords: uv_stride > 0,
            },
        })
    }

    /// Unit quad in the XY plane (±0.5), facing +Z, counter-clockwise.
    pub fn quad() -> Self {
        let corners = [
            ([-0.5, -0.5, 0.0], [0.0, 0.0]),
            ([0.5, -0.5, 0.0], [1.0, 0.0]),
            ([0.5, 0.5, 0.0], [1.0, 1.0]),
            ([-0.5, 0.5, 0.0], [0.0, 1.0]),
        ];
        let vertices = corners
            .iter()
            .map(|&(position, texcoord)| MeshVertex {
                position,
                normal: [0.0, 0.0, 1.0],
                texcoord,
            })
            .collect();
        Self {
            vertices,
            indices: vec![0, 1, 2, 0, 2, 3],
            layout: VertexLayout {
                normals: true,
                texcoords: true,
            },
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Interleaved vertex data as a flat float slice.
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = r#"{
        "meshes": [{
            "vertices": [0,0,0, 1,0,0, 0,1,0],
            "normals": [0,0,1, 0,0,1, 0,0,1],
            "texturecoords": [[0,0, 1,0, 0,1]],
            "faces": [[0,1,2]]
        }]
    }"#;

    #[test]
    fn mesh_vertex_is_8_floats() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), MeshVertex::STRIDE_BYTES);
    }

    #[test]
    fn parses_assimp_json() {
        let mesh = MeshData::from_json(TRIANGLE).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert!(mesh.layout.normals && mesh.layout.texcoords);
        assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(mesh.vertices[2].texcoord, [0.0, 1.0]);
        assert_eq!(mesh.vertex_floats().len(), 3 * MeshVertex::FLOATS);
    }

    #[test]
    fn missing_optional_attributes_are_recorded() {
        let json = r#"{"meshes":[{"vertices":[0,0,0,1,0,0,0,1,0],"faces":[[0,1,2]]}]}"#;
        let mesh = MeshData::from_json(json).unwrap();
        assert_eq!(mesh.layout, VertexLayout::default());
    }

    #[test]
    fn three_component_uvs_are_truncated() {
        let json = r#"{"meshes":[{
            "vertices":[0,0,0,1,0,0,0,1,0],
            "texturecoords":[[0.1,0.2,0, 0.3,0.4,0, 0.5,0.6,0]],
            "faces":[[0,1,2]]}]}"#;
        let mesh = MeshData::from_json(json).unwrap();
        assert_eq!(mesh.vertices[1].texcoord, [0.3, 0.4]);
    }

    #[test]
    fn quads_are_fan_triangulated() {
        let json = r#"{"meshes":[{"vertices":[0,0,0,1,0,0,1,1,0,0,1,0],"faces":[[0,1,2,3]]}]}"#;
        let mesh = MeshData::from_json(json).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn rejects_malformed_meshes() {
        assert!(matches!(MeshData::from_json(r#"{"meshes":[]}"#), Err(MeshError::NoMeshes)));
        assert!(matches!(MeshData::from_json("not json"), Err(MeshError::Parse(_))));

        let bad_index = r#"{"meshes":[{"vertices":[0,0,0,1,0,0,0,1,0],"faces":[[0,1,7]]}]}"#;
        assert!(matches!(
            MeshData::from_json(bad_index),
            Err(MeshError::IndexOutOfRange { index: 7, vertex_count: 3 })
        ));

        let bad_normals = r#"{"meshes":[{"vertices":[0,0,0,1,0,0,0,1,0],"normals":[0,0,1],"faces":[[0,1,2]]}]}"#;
        assert!(matches!(
            MeshData::from_json(bad_normals),
            Err(MeshError::ComponentMismatch { attribute: "normals", .. })
        ));

        let ragged = r#"{"meshes":[{"vertices":[0,0,0,1],"faces":[[0,0,0]]}]}"#;
        assert!(matches!(
            MeshData::from_json(ragged),
            Err(MeshError::ComponentMismatch { attribute: "vertices", .. })
        ));
    }

    #[test]
    fn quad_faces_plus_z() {
        let quad = MeshData::quad();
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(quad.index_count(), 6);
        assert!(quad.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    }
}
