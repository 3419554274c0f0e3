//! Aggregate model asset and its header tables

use crate::formats::{
    AnimationHeader, ChannelHeader, MODEL_FLAG_RIG, MeshHeader, ModelHeader, RigHeader,
};

use super::{AnimationTrack, MeshRecord, RigData};

/// Header of one animation plus the key counts of each of its channels
#[derive(Debug, Clone, PartialEq)]
pub struct TrackHeader {
    pub header: AnimationHeader,
    pub channels: Vec<ChannelHeader>,
}

impl TrackHeader {
    pub fn for_track(track: &AnimationTrack) -> Self {
        let channels = track
            .channels
            .iter()
            .map(|c| {
                ChannelHeader::new(
                    c.position_keys.len() as u32,
                    c.rotation_keys.len() as u32,
                    c.scale_keys.len() as u32,
                )
            })
            .collect::<Vec<_>>();
        Self {
            header: AnimationHeader::new(
                track.name.len() as u32,
                channels.len() as u32,
                track.frame_count() as u32,
            ),
            channels,
        }
    }
}

/// Everything written to one `.shmodel` file.
///
/// Headers are derived from the payload in [`ModelAsset::assemble`] and the
/// value is immutable afterwards, so the counts committed to the header tables
/// always match the payload that follows them.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    header: ModelHeader,
    mesh_headers: Vec<MeshHeader>,
    track_headers: Vec<TrackHeader>,
    meshes: Vec<MeshRecord>,
    animations: Vec<AnimationTrack>,
    rig: Option<RigData>,
}

impl ModelAsset {
    /// Compute every header table for the given payload.
    pub fn assemble(
        meshes: Vec<MeshRecord>,
        animations: Vec<AnimationTrack>,
        rig: Option<RigData>,
    ) -> Self {
        let mesh_headers = meshes
            .iter()
            .map(|m| {
                MeshHeader::new(
                    m.vertex_count() as u32,
                    m.index_count() as u32,
                    m.name.len() as u32,
                    m.has_weights(),
                )
            })
            .collect();

        let track_headers = animations.iter().map(TrackHeader::for_track).collect();

        let flags = if rig.is_some() { MODEL_FLAG_RIG } else { 0 };
        let header = ModelHeader::new(meshes.len() as u32, animations.len() as u32, flags);

        Self {
            header,
            mesh_headers,
            track_headers,
            meshes,
            animations,
            rig,
        }
    }

    /// An asset with no meshes, animations or rig
    pub fn empty() -> Self {
        Self::assemble(Vec::new(), Vec::new(), None)
    }

    pub fn header(&self) -> &ModelHeader {
        &self.header
    }

    pub fn mesh_headers(&self) -> &[MeshHeader] {
        &self.mesh_headers
    }

    pub fn track_headers(&self) -> &[TrackHeader] {
        &self.track_headers
    }

    pub fn meshes(&self) -> &[MeshRecord] {
        &self.meshes
    }

    pub fn animations(&self) -> &[AnimationTrack] {
        &self.animations
    }

    pub fn rig(&self) -> Option<&RigData> {
        self.rig.as_ref()
    }

    /// Rig header (node count + start node), if a rig exists
    pub fn rig_header(&self) -> Option<RigHeader> {
        self.rig
            .as_ref()
            .map(|r| RigHeader::new(r.node_count() as u32, r.start_node))
    }
}
