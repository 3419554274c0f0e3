//! `.shmodel` writer
//!
//! Re-exports the format definitions from model-common and serializes a
//! [`ModelAsset`] as: headers, mesh payloads, animation payloads, rig.
//! Writes are sequential; nothing is patched after the fact.

pub use model_common::formats::*;

use std::io::{self, Write};

use model_common::asset::{Keyframe, LocalTransform};
use model_common::{AnimationTrack, MeshRecord, ModelAsset, RigData};

/// Write a complete `.shmodel` file.
///
/// A rig whose links do not form one tree is rejected with
/// [`io::ErrorKind::InvalidData`] before any byte is written.
pub fn write_model<W: Write>(w: &mut W, asset: &ModelAsset) -> io::Result<()> {
    if let Some(rig) = asset.rig() {
        rig.validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{:#}", e)))?;
    }

    w.write_all(&asset.header().to_bytes())?;
    for header in asset.mesh_headers() {
        w.write_all(&header.to_bytes())?;
    }
    for track in asset.track_headers() {
        w.write_all(&track.header.to_bytes())?;
        for channel in &track.channels {
            w.write_all(&channel.to_bytes())?;
        }
    }

    for mesh in asset.meshes() {
        write_mesh(w, mesh)?;
    }
    for track in asset.animations() {
        write_animation(w, track)?;
    }
    if let Some(rig) = asset.rig() {
        write_rig(w, rig)?;
    }

    Ok(())
}

/// Serialize a model into memory
pub fn model_to_bytes(asset: &ModelAsset) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_model(&mut bytes, asset)?;
    Ok(bytes)
}

fn write_f32s<W: Write>(w: &mut W, values: &[f32]) -> io::Result<()> {
    if cfg!(target_endian = "little") {
        w.write_all(bytemuck::cast_slice(values))
    } else {
        values.iter().try_for_each(|v| w.write_all(&v.to_le_bytes()))
    }
}

fn write_u32s<W: Write>(w: &mut W, values: &[u32]) -> io::Result<()> {
    if cfg!(target_endian = "little") {
        w.write_all(bytemuck::cast_slice(values))
    } else {
        values.iter().try_for_each(|v| w.write_all(&v.to_le_bytes()))
    }
}

fn write_f64s<W: Write>(w: &mut W, values: &[f64]) -> io::Result<()> {
    values.iter().try_for_each(|v| w.write_all(&v.to_le_bytes()))
}

fn write_mesh<W: Write>(w: &mut W, mesh: &MeshRecord) -> io::Result<()> {
    w.write_all(mesh.name.as_bytes())?;
    write_f32s(w, bytemuck::cast_slice(&mesh.positions))?;
    write_f32s(w, bytemuck::cast_slice(&mesh.tangents))?;
    write_f32s(w, bytemuck::cast_slice(&mesh.normals))?;
    write_f32s(w, bytemuck::cast_slice(&mesh.uvs))?;
    write_u32s(w, &mesh.indices)?;
    if let Some(skin) = &mesh.skin {
        write_f32s(w, bytemuck::cast_slice(&skin.weights))?;
        write_u32s(w, bytemuck::cast_slice(&skin.joints))?;
    }
    Ok(())
}

fn write_keys<W: Write, const N: usize>(w: &mut W, keys: &[Keyframe<N>]) -> io::Result<()> {
    for key in keys {
        w.write_all(&key.time.to_le_bytes())?;
        write_f32s(w, &key.value)?;
    }
    Ok(())
}

fn write_animation<W: Write>(w: &mut W, track: &AnimationTrack) -> io::Result<()> {
    w.write_all(track.name.as_bytes())?;
    w.write_all(&track.duration.to_le_bytes())?;
    w.write_all(&track.ticks_per_second.to_le_bytes())?;
    for channel in &track.channels {
        w.write_all(&[channel.interpolation.to_byte()])?;
        write_keys(w, &channel.position_keys)?;
        write_keys(w, &channel.rotation_keys)?;
        write_keys(w, &channel.scale_keys)?;
    }
    Ok(())
}

fn write_transform<W: Write>(w: &mut W, transform: &LocalTransform) -> io::Result<()> {
    w.write_all(&[transform.flags()])?;
    match transform {
        LocalTransform::Matrix(m) => write_f64s(w, m),
        LocalTransform::Components {
            rotation,
            scale,
            translation,
        } => {
            // Bit order: rotation, scale, translation
            if let Some(r) = rotation {
                write_f64s(w, r)?;
            }
            if let Some(s) = scale {
                write_f64s(w, s)?;
            }
            if let Some(t) = translation {
                write_f64s(w, t)?;
            }
            Ok(())
        }
    }
}

/// Rig header and name lengths, node data in joint order, then the
/// breadth-first structure table
fn write_rig<W: Write>(w: &mut W, rig: &RigData) -> io::Result<()> {
    let header = RigHeader::new(rig.node_count() as u32, rig.start_node);
    w.write_all(&header.to_bytes())?;
    for node in &rig.nodes {
        w.write_all(&(node.name.len() as u32).to_le_bytes())?;
    }

    for node in &rig.nodes {
        w.write_all(node.name.as_bytes())?;
        write_f32s(w, &node.inverse_bind_matrix)?;
        write_transform(w, &node.transform)?;
    }

    for (index, child_count) in rig.breadth_first() {
        w.write_all(&index.to_le_bytes())?;
        w.write_all(&child_count.to_le_bytes())?;
    }

    Ok(())
}
