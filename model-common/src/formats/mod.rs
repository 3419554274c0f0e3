//! `.shmodel` binary format
//!
//! One file holds every mesh, animation clip and the rig extracted from a
//! single source scene. All integers and floats are little-endian.
//!
//! # Layout
//! ```text
//! ModelHeader                          16 bytes
//! MeshHeader × mesh_count              16 bytes each
//! per animation:
//!   AnimationHeader                    12 bytes
//!   ChannelHeader × channel_count      12 bytes each
//! per mesh payload:
//!   name, positions, tangents, normals, uvs, indices
//!   [weights, joints]                  if has_weights
//! per animation payload:
//!   name, duration f64, ticks_per_second f64
//!   per channel: interpolation u8, position keys, rotation keys, scale keys
//! rig payload (if MODEL_FLAG_RIG):
//!   RigHeader, name lengths (u32 × node_count)
//!   node data in joint order: name, inverse bind matrix, flags u8, channel arrays (f64)
//!   structure: (node index u32, child count u32) × node_count, breadth-first
//! ```
//!
//! Payload lengths are never repeated inline: readers replay the header
//! tables to know how many bytes follow.
//!
//! All format headers implement the [`BinarySerializable`] trait for consistent
//! serialization/deserialization.

pub mod animation;
pub mod mesh;
pub mod model;
mod reader;
pub mod rig;
mod serialization;

pub use animation::*;
pub use mesh::*;
pub use model::*;
pub use reader::read_model;
pub use rig::*;
pub use serialization::BinarySerializable;

/// Output file extension (without dot)
pub const MODEL_EXT: &str = "shmodel";

/// Magic bytes at the start of every model file
pub const MODEL_MAGIC: &[u8; 4] = b"SHMD";

/// Current layout version. Bump on any layout change.
pub const MODEL_VERSION: u16 = 1;

/// Header flag: a rig payload follows the animation payloads
pub const MODEL_FLAG_RIG: u16 = 0x1;
