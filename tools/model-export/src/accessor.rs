//! Typed extraction of accessor data
//!
//! [`fetch`] reads one accessor of a [`SourceScene`] into a `Vec<T>` of a
//! fixed engine element type. Sources whose layout is bit-identical to `T`
//! are copied in one block; everything else is converted element by element
//! (stride, component type, normalization and component count).

use bytemuck::Pod;

use crate::error::{ExportError, ExportResult};
use crate::source::{AccessorDesc, ComponentType, MeshPrimitive, SourceScene};

/// Destination element of an accessor fetch
pub trait Element: Pod + Default {
    /// Component type of `Self` as it would appear in a source buffer
    const COMPONENT: ComponentType;
    /// Number of components in `Self`
    const COMPONENTS: usize;

    /// Build from `COMPONENTS` values; missing source components are zero
    fn from_components(values: &[f64]) -> Self;
}

impl Element for f32 {
    const COMPONENT: ComponentType = ComponentType::F32;
    const COMPONENTS: usize = 1;

    fn from_components(values: &[f64]) -> Self {
        values[0] as f32
    }
}

impl Element for u32 {
    const COMPONENT: ComponentType = ComponentType::U32;
    const COMPONENTS: usize = 1;

    fn from_components(values: &[f64]) -> Self {
        values[0] as u32
    }
}

macro_rules! impl_array_element {
    ($scalar:ty, $component:expr, $($n:literal),*) => {
        $(
            impl Element for [$scalar; $n] {
                const COMPONENT: ComponentType = $component;
                const COMPONENTS: usize = $n;

                fn from_components(values: &[f64]) -> Self {
                    let mut out = [<$scalar>::default(); $n];
                    for (dst, src) in out.iter_mut().zip(values) {
                        *dst = *src as $scalar;
                    }
                    out
                }
            }
        )*
    };
}

impl_array_element!(f32, ComponentType::F32, 2, 3, 4, 16);
impl_array_element!(u32, ComponentType::U32, 4);

/// Fetch accessor `id` as a sequence of `T`.
///
/// The result always has the accessor's element count.
pub fn fetch<T: Element>(scene: &SourceScene, id: usize) -> ExportResult<Vec<T>> {
    let desc = scene
        .accessors
        .get(id)
        .ok_or_else(|| ExportError::out_of_range("accessor", id, scene.accessors.len()))?;

    match resolve(scene, desc)? {
        None => Ok(vec![T::default(); desc.count]),
        Some(region) if is_bit_compatible::<T>(desc, region.stride) => {
            Ok(copy_bulk(region.bytes, desc.count))
        }
        Some(region) => Ok(convert_elements(desc, &region)),
    }
}

/// Fetch the accessor bound to a named primitive attribute.
///
/// An absent attribute is [`ExportError::AttributeMissing`].
pub fn fetch_attribute<T: Element>(
    scene: &SourceScene,
    primitive: &MeshPrimitive,
    name: &str,
) -> ExportResult<Vec<T>> {
    let id = primitive
        .attribute(name)
        .ok_or_else(|| ExportError::missing(name))?;
    fetch(scene, id)
}

/// Fetch an optional attribute; `Ok(None)` when the primitive lacks it
pub fn fetch_optional<T: Element>(
    scene: &SourceScene,
    primitive: &MeshPrimitive,
    name: &str,
) -> ExportResult<Option<Vec<T>>> {
    match fetch_attribute(scene, primitive, name) {
        Ok(data) => Ok(Some(data)),
        Err(ExportError::AttributeMissing { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Bounds-checked bytes an accessor reads from
pub(crate) struct Region<'a> {
    /// From the first element's first byte to the last element's last byte
    bytes: &'a [u8],
    stride: usize,
}

fn resolve<'a>(scene: &'a SourceScene, desc: &AccessorDesc) -> ExportResult<Option<Region<'a>>> {
    let Some(view_id) = desc.view else {
        return Ok(None);
    };
    let view = scene
        .views
        .get(view_id)
        .ok_or_else(|| ExportError::out_of_range("buffer view", view_id, scene.views.len()))?;

    let view_end = view.offset.checked_add(view.length).unwrap_or(usize::MAX);
    if view_end > scene.buffer.len() {
        return Err(ExportError::out_of_range(
            "buffer view end",
            view_end,
            scene.buffer.len(),
        ));
    }
    let view_bytes = &scene.buffer[view.offset..view_end];

    let element_size = desc.element_size();
    let stride = view.stride.unwrap_or(element_size);
    if desc.count == 0 {
        return Ok(Some(Region { bytes: &[], stride }));
    }

    let end = (desc.count - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(element_size))
        .and_then(|n| n.checked_add(desc.offset))
        .unwrap_or(usize::MAX);
    if end > view_bytes.len() {
        return Err(ExportError::out_of_range(
            "accessor byte range",
            end,
            view_bytes.len(),
        ));
    }

    Ok(Some(Region {
        bytes: &view_bytes[desc.offset..end],
        stride,
    }))
}

/// Same component type, same component count, tightly packed
fn is_bit_compatible<T: Element>(desc: &AccessorDesc, stride: usize) -> bool {
    desc.component_type == T::COMPONENT
        && desc.shape.component_count() == T::COMPONENTS
        && stride == std::mem::size_of::<T>()
}

/// Single block copy; `bytes` must be exactly `count` packed `T`s
pub(crate) fn copy_bulk<T: Element>(bytes: &[u8], count: usize) -> Vec<T> {
    let mut out = vec![T::zeroed(); count];
    bytemuck::cast_slice_mut::<T, u8>(&mut out).copy_from_slice(bytes);
    out
}

/// Read each element through its stride, converting component by component
pub(crate) fn convert_elements<T: Element>(desc: &AccessorDesc, region: &Region<'_>) -> Vec<T> {
    let size = desc.component_type.size();
    let copied = desc.shape.component_count().min(T::COMPONENTS);
    let normalized = desc.normalized && T::COMPONENT == ComponentType::F32;

    let mut values = vec![0f64; T::COMPONENTS];
    (0..desc.count)
        .map(|i| {
            let element = &region.bytes[i * region.stride..];
            for (c, value) in values.iter_mut().enumerate().take(copied) {
                *value = desc.component_type.read(&element[c * size..], normalized);
            }
            T::from_components(&values)
        })
        .collect()
}
