//! Hand-built scenes for unit tests

use super::{AccessorDesc, BufferView, ComponentType, ElementShape, SourceScene};

#[derive(Default)]
pub(crate) struct SceneBuilder {
    pub scene: SourceScene,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes as a new view + accessor, returning the accessor id
    pub fn push_raw(
        &mut self,
        bytes: &[u8],
        component_type: ComponentType,
        shape: ElementShape,
        count: usize,
        normalized: bool,
        stride: Option<usize>,
    ) -> usize {
        while self.scene.buffer.len() % 4 != 0 {
            self.scene.buffer.push(0);
        }
        let offset = self.scene.buffer.len();
        self.scene.buffer.extend_from_slice(bytes);
        self.scene.views.push(BufferView {
            offset,
            length: bytes.len(),
            stride,
        });
        self.scene.accessors.push(AccessorDesc {
            component_type,
            shape,
            count,
            normalized,
            view: Some(self.scene.views.len() - 1),
            offset: 0,
        });
        self.scene.accessors.len() - 1
    }

    /// Tightly packed float elements; N selects the shape (1, 2, 3, 4 or 16)
    pub fn push_f32<const N: usize>(&mut self, data: &[[f32; N]]) -> usize {
        let shape = match N {
            1 => ElementShape::Scalar,
            2 => ElementShape::Vec2,
            3 => ElementShape::Vec3,
            4 => ElementShape::Vec4,
            16 => ElementShape::Mat4,
            _ => panic!("unsupported float element width {}", N),
        };
        let bytes: Vec<u8> = data
            .iter()
            .flat_map(|e| e.iter().flat_map(|v| v.to_le_bytes()))
            .collect();
        self.push_raw(&bytes, ComponentType::F32, shape, data.len(), false, None)
    }

    pub fn push_scalars(&mut self, data: &[f32]) -> usize {
        let elements: Vec<[f32; 1]> = data.iter().map(|&v| [v]).collect();
        self.push_f32(&elements)
    }

    pub fn push_u16_indices(&mut self, data: &[u16]) -> usize {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.push_raw(
            &bytes,
            ComponentType::U16,
            ElementShape::Scalar,
            data.len(),
            false,
            None,
        )
    }

    pub fn finish(self) -> SourceScene {
        self.scene
    }
}
