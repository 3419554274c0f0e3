//! `.shmodel` reader
//!
//! Used by tooling and tests to load a compiled model back into memory.
//! The whole file must be consumed; trailing bytes are an error.

use anyhow::{Context, Result, bail, ensure};

use crate::asset::{
    AnimationTrack, Interpolation, JointChannel, Keyframe, LocalTransform, MeshRecord, ModelAsset,
    NodeAsset, RigData, SkinWeights,
};

use super::{
    AnimationHeader, ChannelHeader, MeshHeader, ModelHeader, NODE_FLAG_MATRIX, NODE_FLAG_ROTATION,
    NODE_FLAG_SCALE, NODE_FLAG_TRANSLATION, RigHeader,
};

/// Little-endian byte cursor over a borrowed buffer
struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if self.remaining() < len {
            bail!(
                "Truncated {}: need {} bytes at offset {}, {} left",
                what,
                len,
                self.pos,
                self.remaining()
            );
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    fn u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn u32(&mut self, what: &str) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array(what)?))
    }

    fn f32(&mut self, what: &str) -> Result<f32> {
        Ok(f32::from_le_bytes(self.array(what)?))
    }

    fn f64(&mut self, what: &str) -> Result<f64> {
        Ok(f64::from_le_bytes(self.array(what)?))
    }

    fn f32s<const N: usize>(&mut self, what: &str) -> Result<[f32; N]> {
        let mut out = [0f32; N];
        for v in &mut out {
            *v = self.f32(what)?;
        }
        Ok(out)
    }

    fn f64s<const N: usize>(&mut self, what: &str) -> Result<[f64; N]> {
        let mut out = [0f64; N];
        for v in &mut out {
            *v = self.f64(what)?;
        }
        Ok(out)
    }

    fn u32s<const N: usize>(&mut self, what: &str) -> Result<[u32; N]> {
        let mut out = [0u32; N];
        for v in &mut out {
            *v = self.u32(what)?;
        }
        Ok(out)
    }

    fn string(&mut self, len: u32, what: &str) -> Result<String> {
        let bytes = self.take(len as usize, what)?;
        String::from_utf8(bytes.to_vec()).with_context(|| format!("{} is not valid UTF-8", what))
    }

    fn vec<T>(
        &mut self,
        count: u32,
        mut read: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        // Cap the preallocation so a corrupt count cannot request gigabytes
        let mut out = Vec::with_capacity((count as usize).min(self.remaining()));
        for _ in 0..count {
            out.push(read(self)?);
        }
        Ok(out)
    }
}

/// Parse a complete `.shmodel` file.
pub fn read_model(bytes: &[u8]) -> Result<ModelAsset> {
    let mut cur = ByteCursor::new(bytes);

    let header = ModelHeader::from_bytes(cur.take(ModelHeader::SIZE, "model header")?)
        .context("Invalid model header")?;
    ensure!(
        &header.magic == super::MODEL_MAGIC,
        "Bad magic {:?}, expected {:?}",
        header.magic,
        super::MODEL_MAGIC
    );
    ensure!(
        header.version == super::MODEL_VERSION,
        "Unsupported model version {} (expected {})",
        header.version,
        super::MODEL_VERSION
    );

    let mesh_headers = cur.vec(header.mesh_count, |c| {
        MeshHeader::from_bytes(c.take(MeshHeader::SIZE, "mesh header")?)
            .context("Invalid mesh header")
    })?;

    let mut track_headers = Vec::new();
    for _ in 0..header.anim_count {
        let anim = AnimationHeader::from_bytes(cur.take(AnimationHeader::SIZE, "animation header")?)
            .context("Invalid animation header")?;
        let channels = cur.vec(anim.channel_count, |c| {
            ChannelHeader::from_bytes(c.take(ChannelHeader::SIZE, "channel header")?)
                .context("Invalid channel header")
        })?;
        track_headers.push((anim, channels));
    }

    let meshes = mesh_headers
        .iter()
        .map(|h| read_mesh(&mut cur, h))
        .collect::<Result<Vec<_>>>()?;

    let animations = track_headers
        .iter()
        .map(|(h, channels)| read_animation(&mut cur, h, channels))
        .collect::<Result<Vec<_>>>()?;

    let rig = if header.has_rig() {
        Some(read_rig(&mut cur)?)
    } else {
        None
    };

    ensure!(
        cur.remaining() == 0,
        "{} trailing bytes after model payload",
        cur.remaining()
    );

    let asset = ModelAsset::assemble(meshes, animations, rig);

    // Header tables are recomputed from the payload; they must agree with the file
    ensure!(
        asset.header() == &header,
        "Model header does not match payload"
    );
    ensure!(
        asset.mesh_headers() == mesh_headers.as_slice(),
        "Mesh headers do not match payload"
    );
    for (computed, (anim, channels)) in asset.track_headers().iter().zip(&track_headers) {
        ensure!(
            computed.header == *anim && &computed.channels == channels,
            "Animation header does not match payload"
        );
    }

    Ok(asset)
}

fn read_mesh(cur: &mut ByteCursor<'_>, header: &MeshHeader) -> Result<MeshRecord> {
    let n = header.vertex_count;
    let name = cur.string(header.name_len, "mesh name")?;
    let positions = cur.vec(n, |c| c.f32s::<3>("positions"))?;
    let tangents = cur.vec(n, |c| c.f32s::<3>("tangents"))?;
    let normals = cur.vec(n, |c| c.f32s::<3>("normals"))?;
    let uvs = cur.vec(n, |c| c.f32s::<2>("uvs"))?;
    let indices = cur.vec(header.index_count, |c| c.u32("indices"))?;

    let skin = if header.has_weights() {
        let weights = cur.vec(n, |c| c.f32s::<4>("weights"))?;
        let joints = cur.vec(n, |c| c.u32s::<4>("joints"))?;
        Some(SkinWeights { weights, joints })
    } else {
        None
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

fn read_keys<const N: usize>(
    cur: &mut ByteCursor<'_>,
    count: u32,
    what: &str,
) -> Result<Vec<Keyframe<N>>> {
    cur.vec(count, |c| {
        let time = c.f32(what)?;
        let value = c.f32s::<N>(what)?;
        Ok(Keyframe::new(time, value))
    })
}

fn read_animation(
    cur: &mut ByteCursor<'_>,
    header: &AnimationHeader,
    channels: &[ChannelHeader],
) -> Result<AnimationTrack> {
    let name = cur.string(header.name_len, "animation name")?;
    let duration = cur.f64("animation duration")?;
    let ticks_per_second = cur.f64("ticks per second")?;

    let channels = channels
        .iter()
        .map(|ch| -> Result<JointChannel> {
            let byte = cur.u8("interpolation")?;
            let interpolation = Interpolation::from_byte(byte)
                .with_context(|| format!("Unknown interpolation byte {}", byte))?;
            Ok(JointChannel {
                interpolation,
                position_keys: read_keys(cur, ch.position_keys, "position keys")?,
                rotation_keys: read_keys(cur, ch.rotation_keys, "rotation keys")?,
                scale_keys: read_keys(cur, ch.scale_keys, "scale keys")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AnimationTrack {
        name,
        duration,
        ticks_per_second,
        channels,
    })
}

fn read_transform(cur: &mut ByteCursor<'_>) -> Result<LocalTransform> {
    let flags = cur.u8("node flags")?;
    let known = NODE_FLAG_ROTATION | NODE_FLAG_SCALE | NODE_FLAG_TRANSLATION | NODE_FLAG_MATRIX;
    ensure!(flags & !known == 0, "Unknown node flags {:#04x}", flags);

    if flags & NODE_FLAG_MATRIX != 0 {
        ensure!(
            flags == NODE_FLAG_MATRIX,
            "Node mixes a matrix with decomposed channels"
        );
        return Ok(LocalTransform::Matrix(cur.f64s::<16>("node matrix")?));
    }

    let rotation = if flags & NODE_FLAG_ROTATION != 0 {
        Some(cur.f64s::<4>("node rotation")?)
    } else {
        None
    };
    let scale = if flags & NODE_FLAG_SCALE != 0 {
        Some(cur.f64s::<3>("node scale")?)
    } else {
        None
    };
    let translation = if flags & NODE_FLAG_TRANSLATION != 0 {
        Some(cur.f64s::<3>("node translation")?)
    } else {
        None
    };

    Ok(LocalTransform::Components {
        rotation,
        scale,
        translation,
    })
}

fn read_rig(cur: &mut ByteCursor<'_>) -> Result<RigData> {
    let header = RigHeader::from_bytes(cur.take(RigHeader::SIZE, "rig header")?)
        .context("Invalid rig header")?;
    let count = header.node_count;

    let name_lens = cur.vec(count, |c| c.u32("node name length"))?;

    let mut nodes = Vec::with_capacity(name_lens.len());
    for &len in &name_lens {
        let name = cur.string(len, "node name")?;
        let inverse_bind_matrix = cur.f32s::<16>("inverse bind matrix")?;
        let transform = read_transform(cur)?;
        nodes.push(NodeAsset {
            name,
            inverse_bind_matrix,
            transform,
            children: Vec::new(),
        });
    }

    let pairs = cur.vec(count, |c| Ok((c.u32("node index")?, c.u32("child count")?)))?;

    // Breadth-first: the children of each entry are the next unclaimed entries
    let mut seen = vec![false; nodes.len()];
    let mut next_child = 1usize;
    for (k, &(index, child_count)) in pairs.iter().enumerate() {
        let end = next_child + child_count as usize;
        ensure!(
            end <= pairs.len(),
            "Structure entry {} claims {} children past the end of the table",
            k,
            child_count
        );
        let slot = seen
            .get_mut(index as usize)
            .with_context(|| format!("Node index {} out of range ({} nodes)", index, count))?;
        ensure!(!*slot, "Node {} appears twice in structure", index);
        *slot = true;

        nodes[index as usize].children = pairs[next_child..end].iter().map(|&(i, _)| i).collect();
        next_child = end;
    }

    if let Some(&(first, _)) = pairs.first() {
        ensure!(
            first == header.start_node,
            "Structure starts at node {}, header says {}",
            first,
            header.start_node
        );
    }

    let rig = RigData {
        start_node: header.start_node,
        nodes,
    };
    rig.validate().context("Rig structure is not a tree")?;
    Ok(rig)
}
