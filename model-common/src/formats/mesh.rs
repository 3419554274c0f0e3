//! Per-mesh header
//!
//! # Layout
//! ```text
//! 0x00: vertex_count u32
//! 0x04: index_count u32
//! 0x08: name_len u32
//! 0x0C: has_weights u8
//! 0x0D: padding (3 bytes)
//! ```
//!
//! The matching payload is `name_len` name bytes, then `vertex_count` of each
//! of positions (12 B), tangents (12 B), normals (12 B) and uvs (8 B), then
//! `index_count` u32 indices, then weights (16 B) and joints (16 B) per vertex
//! when `has_weights` is set.

/// Bytes per vertex for the always-present streams (pos + tan + nrm + uv)
pub const BASE_VERTEX_SIZE: usize = 12 + 12 + 12 + 8;

/// Bytes per vertex for the optional weight + joint streams
pub const SKIN_VERTEX_SIZE: usize = 16 + 16;

/// Mesh header (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct MeshHeader {
    pub vertex_count: u32,
    pub index_count: u32,
    pub name_len: u32,
    pub has_weights: u8,
    pub _padding: [u8; 3],
}

impl MeshHeader {
    pub const SIZE: usize = 16;

    pub fn new(vertex_count: u32, index_count: u32, name_len: u32, has_weights: bool) -> Self {
        Self {
            vertex_count,
            index_count,
            name_len,
            has_weights: has_weights as u8,
            _padding: [0; 3],
        }
    }

    pub fn has_weights(&self) -> bool {
        self.has_weights != 0
    }

    /// Size of the payload this header describes
    pub fn payload_size(&self) -> usize {
        let per_vertex = if self.has_weights() {
            BASE_VERTEX_SIZE + SKIN_VERTEX_SIZE
        } else {
            BASE_VERTEX_SIZE
        };
        self.name_len as usize
            + self.vertex_count as usize * per_vertex
            + self.index_count as usize * 4
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.vertex_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.index_count.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.name_len.to_le_bytes());
        bytes[12] = self.has_weights;
        // padding bytes stay 0
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            vertex_count: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            index_count: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            name_len: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            has_weights: bytes[12],
            _padding: [0; 3],
        })
    }
}
