//! Mesh extraction (source meshes -> [`MeshRecord`])
//!
//! Only the first primitive of each mesh is used. POSITION, NORMAL,
//! TEXCOORD_0 and the index buffer are required; a mesh missing any of them
//! is dropped and the remaining meshes are still built.

use model_common::asset::SkinWeights;
use model_common::MeshRecord;

use crate::accessor::{fetch, fetch_attribute, fetch_optional};
use crate::error::{ExportError, ExportResult};
use crate::source::{SourceMesh, SourceScene};

/// Build every mesh of the scene, skipping (and logging) the ones that fail.
pub fn build_meshes(scene: &SourceScene) -> Vec<MeshRecord> {
    scene
        .meshes
        .iter()
        .enumerate()
        .filter_map(|(index, mesh)| match build_mesh(scene, index, mesh) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    "Skipping mesh {} ({}): {}",
                    index,
                    mesh.name.as_deref().unwrap_or("unnamed"),
                    e
                );
                None
            }
        })
        .collect()
}

/// Build one mesh from its first primitive.
pub fn build_mesh(
    scene: &SourceScene,
    index: usize,
    mesh: &SourceMesh,
) -> ExportResult<MeshRecord> {
    let name = mesh
        .name
        .clone()
        .unwrap_or_else(|| format!("mesh_{}", index));

    let primitive = mesh
        .primitives
        .first()
        .ok_or_else(|| ExportError::missing("primitive"))?;
    if mesh.primitives.len() > 1 {
        tracing::debug!(
            "Mesh '{}' has {} primitives; only the first is exported",
            name,
            mesh.primitives.len()
        );
    }

    let positions: Vec<[f32; 3]> = fetch_attribute(scene, primitive, "POSITION")?;
    let vertex_count = positions.len();

    let normals: Vec<[f32; 3]> = fetch_attribute(scene, primitive, "NORMAL")?;
    check_count("NORMAL", normals.len(), vertex_count)?;

    let uvs: Vec<[f32; 2]> = fetch_attribute(scene, primitive, "TEXCOORD_0")?;
    check_count("TEXCOORD_0", uvs.len(), vertex_count)?;

    let index_accessor = primitive
        .indices
        .ok_or_else(|| ExportError::missing("indices"))?;
    let indices: Vec<u32> = fetch(scene, index_accessor)?;

    // Handedness (w) is dropped
    let tangents = match fetch_optional::<[f32; 4]>(scene, primitive, "TANGENT")? {
        Some(t) if t.len() == vertex_count => {
            t.into_iter().map(|[x, y, z, _]| [x, y, z]).collect()
        }
        Some(t) => {
            tracing::warn!(
                "Mesh '{}': TANGENT has {} entries for {} vertices, using zero tangents",
                name,
                t.len(),
                vertex_count
            );
            vec![[0.0; 3]; vertex_count]
        }
        None => vec![[0.0; 3]; vertex_count],
    };

    let weights = fetch_optional::<[f32; 4]>(scene, primitive, "WEIGHTS_0")?;
    let joints = fetch_optional::<[u32; 4]>(scene, primitive, "JOINTS_0")?;
    let skin = match (weights, joints) {
        (Some(weights), Some(joints))
            if weights.len() == vertex_count && joints.len() == vertex_count =>
        {
            Some(SkinWeights { weights, joints })
        }
        (None, None) => None,
        (weights, joints) => {
            tracing::warn!(
                "Mesh '{}': incomplete WEIGHTS_0/JOINTS_0 ({:?}/{:?} for {} vertices), no skin",
                name,
                weights.map(|w| w.len()),
                joints.map(|j| j.len()),
                vertex_count
            );
            None
        }
    };

    Ok(MeshRecord {
        name,
        positions,
        normals,
        tangents,
        uvs,
        indices,
        skin,
    })
}

fn check_count(what: &'static str, got: usize, vertex_count: usize) -> ExportResult<()> {
    if got != vertex_count {
        return Err(ExportError::out_of_range(what, got, vertex_count));
    }
    Ok(())
}
