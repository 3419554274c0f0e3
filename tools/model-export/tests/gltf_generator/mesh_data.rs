//! Geometry, skeleton and animation data for the test scenes.

/// Bone count for the test skeleton
pub const BONE_COUNT: usize = 3;
/// Distance between bones along +Y
pub(crate) const SEGMENT_HEIGHT: f32 = 1.0;

/// One primitive's vertex streams
pub(crate) struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tangents: Vec<[f32; 4]>,
    pub uvs: Vec<[f32; 2]>,
    pub joints: Vec<[u8; 4]>,
    pub weights: Vec<[f32; 4]>,
    pub indices: Vec<u16>,
}

/// One quad per bone, stacked along +Y, each quad fully weighted to its bone
pub(crate) fn create_skinned_strip() -> MeshData {
    let mut mesh = MeshData {
        positions: Vec::new(),
        normals: Vec::new(),
        tangents: Vec::new(),
        uvs: Vec::new(),
        joints: Vec::new(),
        weights: Vec::new(),
        indices: Vec::new(),
    };

    for bone in 0..BONE_COUNT {
        let y = bone as f32 * SEGMENT_HEIGHT;
        let base = (bone * 4) as u16;
        mesh.positions.extend_from_slice(&[
            [-0.5, y, 0.0],
            [0.5, y, 0.0],
            [0.5, y + SEGMENT_HEIGHT, 0.0],
            [-0.5, y + SEGMENT_HEIGHT, 0.0],
        ]);
        mesh.normals.extend_from_slice(&[[0.0, 0.0, 1.0]; 4]);
        mesh.tangents.extend_from_slice(&[[1.0, 0.0, 0.0, 1.0]; 4]);
        mesh.uvs
            .extend_from_slice(&[[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]);
        mesh.joints.extend_from_slice(&[[bone as u8, 0, 0, 0]; 4]);
        mesh.weights.extend_from_slice(&[[1.0, 0.0, 0.0, 0.0]; 4]);
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

/// A single unskinned quad with tangents (handedness -1)
pub(crate) fn create_quad() -> MeshData {
    MeshData {
        positions: vec![
            [-1.0, -1.0, 0.0],
            [1.0, -1.0, 0.0],
            [1.0, 1.0, 0.0],
            [-1.0, 1.0, 0.0],
        ],
        normals: vec![[0.0, 0.0, 1.0]; 4],
        tangents: vec![[1.0, 0.0, 0.0, -1.0]; 4],
        uvs: vec![[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
        joints: Vec::new(),
        weights: Vec::new(),
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Column-major inverse bind matrix of `bone` (undoes its rest height)
pub fn inverse_bind_matrix(bone: usize) -> [f32; 16] {
    let mut m = [0.0f32; 16];
    m[0] = 1.0;
    m[5] = 1.0;
    m[10] = 1.0;
    m[15] = 1.0;
    m[13] = -(bone as f32) * SEGMENT_HEIGHT;
    m
}

/// Keyframes of one sampler
pub(crate) struct Track<const N: usize> {
    pub times: Vec<f32>,
    pub values: Vec<[f32; N]>,
}

/// Root bone: two STEP translation keys
pub(crate) fn root_step_translation() -> Track<3> {
    Track {
        times: vec![0.0, 1.0],
        values: vec![[0.0, 0.0, 0.0], [0.0, 0.5, 0.0]],
    }
}

/// Head bone: three LINEAR rotation keys, the last at t = 2.0
pub(crate) fn head_rotation() -> Track<4> {
    let s = std::f32::consts::FRAC_1_SQRT_2;
    Track {
        times: vec![0.0, 0.5, 2.0],
        values: vec![[0.0, 0.0, 0.0, 1.0], [0.0, 0.0, s, s], [0.0, 0.0, 1.0, 0.0]],
    }
}

/// Spine bone: CUBICSPLINE translation, (in-tangent, value, out-tangent) per key
pub(crate) fn spine_cubic_translation() -> Track<3> {
    Track {
        times: vec![0.0, 1.5],
        values: vec![
            [0.0; 3],
            [0.0, 1.0, 0.0],
            [0.0; 3],
            [0.0; 3],
            [0.0, 2.0, 0.0],
            [0.0; 3],
        ],
    }
}

/// Min/max of a position stream (required by glTF for POSITION)
pub(crate) fn compute_bounds(positions: &[[f32; 3]]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for p in positions {
        for i in 0..3 {
            min[i] = min[i].min(p[i]);
            max[i] = max[i].max(p[i]);
        }
    }
    (min, max)
}
