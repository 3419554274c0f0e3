//! In-memory asset model
//!
//! A [`ModelAsset`] is built once per source file by the export pipeline,
//! handed to the binary writer and then dropped. Loaders reconstruct the same
//! value with [`crate::read_model`].

mod animation;
mod mesh;
mod model;
mod rig;

pub use animation::{
    AnimationTrack, Interpolation, JointChannel, Keyframe, PositionKey, RotationKey, ScaleKey,
};
pub use mesh::{MeshRecord, SkinWeights};
pub use model::{ModelAsset, TrackHeader};
pub use rig::{IDENTITY_MATRIX, LocalTransform, NodeAsset, RigData};
