//! Shared types for the `.shmodel` engine asset format
//!
//! This crate is shared between:
//! - `model-export` (asset pipeline, writes `.shmodel`)
//! - engine-side loaders (read `.shmodel`)
//!
//! # Modules
//!
//! - [`asset`] - In-memory model: meshes, rig nodes, animation tracks
//! - [`formats`] - Fixed-size binary headers, format constants and the reader

pub mod asset;
pub mod formats;

// Re-export the in-memory model
pub use asset::{
    AnimationTrack, Interpolation, JointChannel, LocalTransform, MeshRecord, ModelAsset,
    NodeAsset, PositionKey, RigData, RotationKey, ScaleKey,
};

// Re-export commonly used format items
pub use formats::{
    AnimationHeader, BinarySerializable, ChannelHeader, MODEL_EXT, MODEL_MAGIC, MODEL_VERSION,
    MeshHeader, ModelHeader, RigHeader, read_model,
};
