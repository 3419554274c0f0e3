//! GLB container assembly.

use gltf_json as json;

const GLB_MAGIC: &[u8; 4] = b"glTF";
const CHUNK_JSON: u32 = 0x4E4F534A;
const CHUNK_BIN: u32 = 0x004E4942;

/// Append one chunk, padded to 4 bytes with `pad`
fn push_chunk(glb: &mut Vec<u8>, kind: u32, data: &[u8], pad: u8) {
    let padded = data.len().next_multiple_of(4);
    glb.extend_from_slice(&(padded as u32).to_le_bytes());
    glb.extend_from_slice(&kind.to_le_bytes());
    glb.extend_from_slice(data);
    glb.resize(glb.len() + padded - data.len(), pad);
}

/// Wrap a document and its binary buffer into a GLB file
pub(crate) fn assemble_glb(mut root: json::Root, buffer: &[u8]) -> Vec<u8> {
    root.buffers[0].byte_length = buffer.len().into();
    let json_text = json::serialize::to_string(&root).expect("Failed to serialize JSON");

    let mut glb = Vec::new();
    glb.extend_from_slice(GLB_MAGIC);
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&0u32.to_le_bytes()); // total length, patched below

    push_chunk(&mut glb, CHUNK_JSON, json_text.as_bytes(), b' ');
    push_chunk(&mut glb, CHUNK_BIN, buffer, 0);

    let total = glb.len() as u32;
    glb[8..12].copy_from_slice(&total.to_le_bytes());
    glb
}
