//! Aggregate model header
//!
//! # Layout
//! ```text
//! 0x00: magic [u8; 4] ("SHMD")
//! 0x04: version u16
//! 0x06: flags u16 (bit 0: rig present)
//! 0x08: mesh_count u32
//! 0x0C: anim_count u32
//! ```

use super::{MODEL_FLAG_RIG, MODEL_MAGIC, MODEL_VERSION};

/// Model file header (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ModelHeader {
    pub magic: [u8; 4],
    pub version: u16,
    pub flags: u16,
    pub mesh_count: u32,
    pub anim_count: u32,
}

impl ModelHeader {
    pub const SIZE: usize = 16;

    pub fn new(mesh_count: u32, anim_count: u32, flags: u16) -> Self {
        Self {
            magic: *MODEL_MAGIC,
            version: MODEL_VERSION,
            flags,
            mesh_count,
            anim_count,
        }
    }

    pub fn has_rig(&self) -> bool {
        self.flags & MODEL_FLAG_RIG != 0
    }

    /// Magic and version match what this crate writes
    pub fn validate(&self) -> bool {
        &self.magic == MODEL_MAGIC && self.version == MODEL_VERSION
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.flags.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.mesh_count.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.anim_count.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u16::from_le_bytes([bytes[4], bytes[5]]),
            flags: u16::from_le_bytes([bytes[6], bytes[7]]),
            mesh_count: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            anim_count: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        })
    }
}
