//! Keyframe animation tracks

/// Interpolation mode of a joint channel, stored as one byte on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Interpolation {
    #[default]
    Default = 0,
    Linear = 1,
    Step = 2,
    CubicSpline = 3,
}

impl Interpolation {
    /// Map a glTF sampler interpolation name. Unknown names fall back to `Default`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "LINEAR" => Self::Linear,
            "STEP" => Self::Step,
            "CUBICSPLINE" => Self::CubicSpline,
            _ => Self::Default,
        }
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Default),
            1 => Some(Self::Linear),
            2 => Some(Self::Step),
            3 => Some(Self::CubicSpline),
            _ => None,
        }
    }
}

/// A timestamped value with `N` float components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<const N: usize> {
    /// Seconds from the start of the clip
    pub time: f32,
    pub value: [f32; N],
}

impl<const N: usize> Keyframe<N> {
    /// Serialized size: time + N components
    pub const SIZE: usize = 4 + N * 4;

    pub fn new(time: f32, value: [f32; N]) -> Self {
        Self { time, value }
    }
}

/// Translation key (xyz)
pub type PositionKey = Keyframe<3>;
/// Rotation key (quaternion xyzw)
pub type RotationKey = Keyframe<4>;
/// Scale key (xyz)
pub type ScaleKey = Keyframe<3>;

/// All keyframes targeting one joint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointChannel {
    pub interpolation: Interpolation,
    pub position_keys: Vec<PositionKey>,
    pub rotation_keys: Vec<RotationKey>,
    pub scale_keys: Vec<ScaleKey>,
}

impl JointChannel {
    /// Largest key count of the three sequences
    pub fn key_count(&self) -> usize {
        self.position_keys
            .len()
            .max(self.rotation_keys.len())
            .max(self.scale_keys.len())
    }

    /// Latest timestamp of any key, if the channel has keys at all
    pub fn last_time(&self) -> Option<f32> {
        self.position_keys
            .iter()
            .map(|k| k.time)
            .chain(self.rotation_keys.iter().map(|k| k.time))
            .chain(self.scale_keys.iter().map(|k| k.time))
            .reduce(f32::max)
    }
}

/// One animation clip. `channels[i]` animates joint `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationTrack {
    pub name: String,
    /// Clip length in seconds
    pub duration: f64,
    pub ticks_per_second: f64,
    pub channels: Vec<JointChannel>,
}

impl AnimationTrack {
    /// Largest keyframe count of any sequence in the clip
    pub fn frame_count(&self) -> usize {
        self.channels
            .iter()
            .map(JointChannel::key_count)
            .max()
            .unwrap_or(0)
    }
}
