//! Source scene boundary
//!
//! The builders never see the glTF crate directly. A document is first
//! flattened into a [`SourceScene`]: one contiguous byte buffer plus index
//! tables for views, accessors, meshes, skins, animations and nodes. The
//! scene is passed by reference through every extraction call, so nothing
//! about the current document lives in shared state.

mod gltf;
#[cfg(test)]
pub(crate) mod testing;

pub use self::gltf::{load_scene, load_scene_from_slice};

use model_common::LocalTransform;

/// Component type of an accessor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    I8,
    U8,
    I16,
    U16,
    U32,
    F32,
}

impl ComponentType {
    /// Size of one component in bytes
    pub fn size(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::U32 | Self::F32 => 4,
        }
    }

    /// Decode one little-endian component as f64.
    ///
    /// `bytes` must hold at least [`ComponentType::size`] bytes.
    pub fn read(self, bytes: &[u8], normalized: bool) -> f64 {
        match self {
            Self::I8 => {
                let v = bytes[0] as i8;
                if normalized {
                    (v as f64 / 127.0).max(-1.0)
                } else {
                    v as f64
                }
            }
            Self::U8 => {
                let v = bytes[0];
                if normalized {
                    v as f64 / 255.0
                } else {
                    v as f64
                }
            }
            Self::I16 => {
                let v = i16::from_le_bytes([bytes[0], bytes[1]]);
                if normalized {
                    (v as f64 / 32767.0).max(-1.0)
                } else {
                    v as f64
                }
            }
            Self::U16 => {
                let v = u16::from_le_bytes([bytes[0], bytes[1]]);
                if normalized {
                    v as f64 / 65535.0
                } else {
                    v as f64
                }
            }
            Self::U32 => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64,
            Self::F32 => f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64,
        }
    }
}

/// Element shape of an accessor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementShape {
    Scalar,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl ElementShape {
    pub fn component_count(self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 | Self::Mat2 => 4,
            Self::Mat3 => 9,
            Self::Mat4 => 16,
        }
    }
}

/// Byte range of the flat buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferView {
    /// Offset into [`SourceScene::buffer`]
    pub offset: usize,
    pub length: usize,
    /// Distance between elements; `None` means tightly packed
    pub stride: Option<usize>,
}

/// Typed view over a buffer view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessorDesc {
    pub component_type: ComponentType,
    pub shape: ElementShape,
    pub count: usize,
    /// Integer components map to [0, 1] or [-1, 1] when read as floats
    pub normalized: bool,
    /// `None` means every element is zero
    pub view: Option<usize>,
    /// Offset within the view
    pub offset: usize,
}

impl AccessorDesc {
    /// Natural size of one element
    pub fn element_size(&self) -> usize {
        self.component_type.size() * self.shape.component_count()
    }
}

/// One primitive of a mesh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshPrimitive {
    /// Semantic name (`POSITION`, `TEXCOORD_0`, ...) to accessor id
    pub attributes: Vec<(String, usize)>,
    pub indices: Option<usize>,
}

impl MeshPrimitive {
    /// Accessor bound to `name`, if the primitive has it
    pub fn attribute(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .find(|(semantic, _)| semantic == name)
            .map(|&(_, accessor)| accessor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMesh {
    pub name: Option<String>,
    pub primitives: Vec<MeshPrimitive>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSkin {
    /// Joint node ids; position in this list is the compact joint index
    pub joints: Vec<usize>,
    pub inverse_bind_matrices: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceChannel {
    pub target_node: usize,
    /// `translation`, `rotation`, `scale` or `weights`
    pub path: String,
    pub sampler: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSampler {
    pub input: usize,
    pub output: usize,
    /// `LINEAR`, `STEP` or `CUBICSPLINE`
    pub interpolation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceAnimation {
    pub name: Option<String>,
    pub channels: Vec<SourceChannel>,
    pub samplers: Vec<SourceSampler>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceNode {
    pub name: Option<String>,
    pub transform: LocalTransform,
    pub children: Vec<usize>,
}

/// A parsed source document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceScene {
    pub buffer: Vec<u8>,
    pub views: Vec<BufferView>,
    pub accessors: Vec<AccessorDesc>,
    pub meshes: Vec<SourceMesh>,
    pub skins: Vec<SourceSkin>,
    pub animations: Vec<SourceAnimation>,
    pub nodes: Vec<SourceNode>,
}
