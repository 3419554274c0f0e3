//! Rig (joint hierarchy) header
//!
//! # Layout
//! ```text
//! 0x00: node_count u32
//! 0x04: start_node u32 (compact index of the root joint)
//! ```
//!
//! Followed by `node_count` u32 name lengths, then the node data, both in
//! compact joint order:
//!
//! ```text
//! name bytes
//! inverse bind matrix: 16 × f32, column-major (64 bytes)
//! flags u8 (NODE_FLAG_*)
//! rotation    4 × f64  if NODE_FLAG_ROTATION
//! scale       3 × f64  if NODE_FLAG_SCALE
//! translation 3 × f64  if NODE_FLAG_TRANSLATION
//! matrix     16 × f64  if NODE_FLAG_MATRIX
//! ```
//!
//! and finally the structure table: `(node index u32, child count u32)` per
//! node in breadth-first order from `start_node`. The children of each entry
//! are the next `child count` entries not yet claimed by an earlier node.

/// Node carries a rotation quaternion
pub const NODE_FLAG_ROTATION: u8 = 0x1;
/// Node carries a scale vector
pub const NODE_FLAG_SCALE: u8 = 0x2;
/// Node carries a translation vector
pub const NODE_FLAG_TRANSLATION: u8 = 0x4;
/// Node carries a full local matrix (exclusive with the three above)
pub const NODE_FLAG_MATRIX: u8 = 0x8;

/// Serialized structure entry (index + child count)
pub const TREE_ENTRY_SIZE: usize = 8;

/// Rig header (8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct RigHeader {
    pub node_count: u32,
    pub start_node: u32,
}

impl RigHeader {
    pub const SIZE: usize = 8;

    pub fn new(node_count: u32, start_node: u32) -> Self {
        Self {
            node_count,
            start_node,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.node_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.start_node.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            node_count: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            start_node: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        })
    }
}
