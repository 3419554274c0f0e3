//! Mesh geometry in the fixed engine vertex layout

/// Per-vertex skinning data.
///
/// Weights and joint indices only exist together, so a mesh either carries
/// both streams or neither.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkinWeights {
    /// Four blend weights per vertex
    pub weights: Vec<[f32; 4]>,
    /// Four joint indices per vertex (compact joint index space)
    pub joints: Vec<[u32; 4]>,
}

/// One mesh (the first primitive of a source mesh)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshRecord {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    /// Tangent direction; the handedness sign of the source is dropped
    pub tangents: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub skin: Option<SkinWeights>,
}

impl MeshRecord {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn has_weights(&self) -> bool {
        self.skin.is_some()
    }

    /// True when every vertex stream has exactly `vertex_count` entries.
    pub fn is_consistent(&self) -> bool {
        let n = self.vertex_count();
        let base = self.normals.len() == n && self.tangents.len() == n && self.uvs.len() == n;
        let skin = self
            .skin
            .as_ref()
            .is_none_or(|s| s.weights.len() == n && s.joints.len() == n);
        base && skin
    }
}
