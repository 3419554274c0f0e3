//! Animation clip headers
//!
//! # Layout
//! ```text
//! AnimationHeader (12 bytes)
//! 0x00: name_len u32
//! 0x04: channel_count u32
//! 0x08: frame_count u32 (largest key count of any sequence)
//!
//! ChannelHeader (12 bytes), channel_count of them, one per joint
//! 0x00: position_keys u32
//! 0x04: rotation_keys u32
//! 0x08: scale_keys u32
//! ```
//!
//! The clip payload is the name, `duration` f64, `ticks_per_second` f64 and
//! then for each channel an interpolation byte followed by its keys:
//! position and scale keys are 16 bytes (time + xyz), rotation keys are
//! 20 bytes (time + xyzw).

/// Serialized position or scale key (time + 3 floats)
pub const VEC3_KEY_SIZE: usize = 16;

/// Serialized rotation key (time + 4 floats)
pub const QUAT_KEY_SIZE: usize = 20;

/// Animation header (12 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct AnimationHeader {
    pub name_len: u32,
    pub channel_count: u32,
    pub frame_count: u32,
}

impl AnimationHeader {
    pub const SIZE: usize = 12;

    pub fn new(name_len: u32, channel_count: u32, frame_count: u32) -> Self {
        Self {
            name_len,
            channel_count,
            frame_count,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.name_len.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.channel_count.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.frame_count.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            name_len: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            channel_count: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            frame_count: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        })
    }
}

/// Key counts of one joint channel (12 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(C)]
pub struct ChannelHeader {
    pub position_keys: u32,
    pub rotation_keys: u32,
    pub scale_keys: u32,
}

impl ChannelHeader {
    pub const SIZE: usize = 12;

    pub fn new(position_keys: u32, rotation_keys: u32, scale_keys: u32) -> Self {
        Self {
            position_keys,
            rotation_keys,
            scale_keys,
        }
    }

    /// Size of this channel's payload, including the interpolation byte
    pub fn payload_size(&self) -> usize {
        1 + self.position_keys as usize * VEC3_KEY_SIZE
            + self.rotation_keys as usize * QUAT_KEY_SIZE
            + self.scale_keys as usize * VEC3_KEY_SIZE
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.position_keys.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.rotation_keys.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.scale_keys.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            position_keys: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            rotation_keys: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            scale_keys: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        })
    }
}
