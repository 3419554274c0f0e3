//! Programmatic GLB generation for integration tests.
//!
//! - `generate_skinned_glb`: 3-joint chain, skinned strip, a mesh without
//!   normals, two clips (STEP/LINEAR and CUBICSPLINE)
//! - `generate_static_glb`: one unnamed quad with tangents

mod binary_packing;
mod glb_assembly;
mod gltf_json;
mod mesh_data;

#[allow(unused_imports)]
pub use mesh_data::{inverse_bind_matrix, BONE_COUNT};

/// Generate the skinned test scene as GLB bytes
#[allow(dead_code)]
pub fn generate_skinned_glb() -> Vec<u8> {
    let (root, buffer) = gltf_json::build_skinned_scene();
    glb_assembly::assemble_glb(root, &buffer)
}

/// Generate the static test scene as GLB bytes
#[allow(dead_code)]
pub fn generate_static_glb() -> Vec<u8> {
    let (root, buffer) = gltf_json::build_static_scene();
    glb_assembly::assemble_glb(root, &buffer)
}
