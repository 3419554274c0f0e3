//! Binary buffer packing: every stream gets its own view and accessor.

use super::mesh_data::compute_bounds;
use gltf_json as json;
use json::accessor::{ComponentType, Type};
use json::buffer::Target;
use json::validation::Checked::Valid;

/// Accumulates the BIN chunk plus the views and accessors that describe it
#[derive(Default)]
pub(crate) struct BufferPacker {
    pub buffer: Vec<u8>,
    pub views: Vec<json::buffer::View>,
    pub accessors: Vec<json::Accessor>,
}

impl BufferPacker {
    fn push(
        &mut self,
        bytes: &[u8],
        component_type: ComponentType,
        type_: Type,
        count: usize,
        target: Option<Target>,
        bounds: Option<(Vec<f32>, Vec<f32>)>,
    ) -> u32 {
        // 4-byte alignment for every view
        while !self.buffer.len().is_multiple_of(4) {
            self.buffer.push(0);
        }
        let offset = self.buffer.len();
        self.buffer.extend_from_slice(bytes);

        self.views.push(json::buffer::View {
            buffer: json::Index::new(0),
            byte_length: bytes.len().into(),
            byte_offset: Some(offset.into()),
            byte_stride: None,
            extensions: Default::default(),
            extras: Default::default(),
            name: None,
            target: target.map(Valid),
        });

        let (min, max) = bounds.unzip();
        self.accessors.push(json::Accessor {
            buffer_view: Some(json::Index::new(self.views.len() as u32 - 1)),
            byte_offset: Some(0u64.into()),
            count: count.into(),
            component_type: Valid(json::accessor::GenericComponentType(component_type)),
            extensions: Default::default(),
            extras: Default::default(),
            type_: Valid(type_),
            min: min.map(json_array),
            max: max.map(json_array),
            name: None,
            normalized: false,
            sparse: None,
        });
        self.accessors.len() as u32 - 1
    }

    pub fn positions(&mut self, data: &[[f32; 3]]) -> u32 {
        let (min, max) = compute_bounds(data);
        self.push(
            bytemuck::cast_slice(data),
            ComponentType::F32,
            Type::Vec3,
            data.len(),
            Some(Target::ArrayBuffer),
            Some((min.to_vec(), max.to_vec())),
        )
    }

    pub fn floats<const N: usize>(&mut self, data: &[[f32; N]], type_: Type) -> u32 {
        let target = match type_ {
            Type::Mat4 | Type::Scalar => None,
            _ => Some(Target::ArrayBuffer),
        };
        let bytes: Vec<u8> = data.iter().flatten().flat_map(|v| v.to_le_bytes()).collect();
        self.push(&bytes, ComponentType::F32, type_, data.len(), target, None)
    }

    /// Keyframe times; glTF requires bounds on sampler inputs
    pub fn scalars(&mut self, data: &[f32]) -> u32 {
        let min = data.iter().copied().fold(f32::MAX, f32::min);
        let max = data.iter().copied().fold(f32::MIN, f32::max);
        self.push(
            bytemuck::cast_slice(data),
            ComponentType::F32,
            Type::Scalar,
            data.len(),
            None,
            Some((vec![min], vec![max])),
        )
    }

    pub fn joints(&mut self, data: &[[u8; 4]]) -> u32 {
        self.push(
            bytemuck::cast_slice(data),
            ComponentType::U8,
            Type::Vec4,
            data.len(),
            Some(Target::ArrayBuffer),
            None,
        )
    }

    pub fn indices(&mut self, data: &[u16]) -> u32 {
        self.push(
            bytemuck::cast_slice(data),
            ComponentType::U16,
            Type::Scalar,
            data.len(),
            Some(Target::ElementArrayBuffer),
            None,
        )
    }
}

fn json_array(values: Vec<f32>) -> json::Value {
    json::Value::Array(values.into_iter().map(json::Value::from).collect())
}
