//! glTF / GLB import into a [`SourceScene`]

use std::path::{Path, PathBuf};

use ::gltf::accessor::{DataType, Dimensions};
use ::gltf::animation::{Interpolation, Property};
use ::gltf::json;
use ::gltf::{Document, Semantic};
use model_common::LocalTransform;

use super::{
    AccessorDesc, BufferView, ComponentType, ElementShape, MeshPrimitive, SourceAnimation,
    SourceChannel, SourceMesh, SourceNode, SourceSampler, SourceScene, SourceSkin,
};
use crate::error::{ExportError, ExportResult};

/// Load a `.gltf` or `.glb` file.
///
/// External buffers are resolved relative to the file. Images are never
/// decoded.
pub fn load_scene(path: &Path) -> ExportResult<SourceScene> {
    let parse_failure = |source| ExportError::ParseFailure {
        path: path.to_path_buf(),
        source,
    };

    let ::gltf::Gltf { document, blob } = ::gltf::Gltf::open(path).map_err(parse_failure)?;
    let buffers = ::gltf::import_buffers(&document, path.parent(), blob)
        .map_err(parse_failure)?;

    Ok(convert_document(&document, &buffers))
}

/// Load a GLB (or self-contained glTF) held in memory
pub fn load_scene_from_slice(bytes: &[u8]) -> ExportResult<SourceScene> {
    let parse_failure = |source| ExportError::ParseFailure {
        path: PathBuf::from("<memory>"),
        source,
    };

    let ::gltf::Gltf { document, blob } = ::gltf::Gltf::from_slice(bytes).map_err(parse_failure)?;
    let buffers = ::gltf::import_buffers(&document, None, blob)
        .map_err(parse_failure)?;

    Ok(convert_document(&document, &buffers))
}

fn convert_document(document: &Document, buffers: &[::gltf::buffer::Data]) -> SourceScene {
    // Concatenate every buffer; views are rebased onto the flat buffer
    let mut buffer = Vec::new();
    let mut bases = Vec::with_capacity(buffers.len());
    for data in buffers {
        bases.push(buffer.len());
        buffer.extend_from_slice(&data.0);
    }

    let views = document
        .views()
        .map(|view| {
            let base = bases.get(view.buffer().index()).copied().unwrap_or(0);
            BufferView {
                offset: base + view.offset(),
                length: view.length(),
                stride: view.stride(),
            }
        })
        .collect();

    let accessors = document
        .accessors()
        .map(|accessor| {
            if accessor.sparse().is_some() {
                tracing::debug!(
                    "Accessor {} is sparse; only its dense base is read",
                    accessor.index()
                );
            }
            AccessorDesc {
                component_type: component_type(accessor.data_type()),
                shape: element_shape(accessor.dimensions()),
                count: accessor.count(),
                normalized: accessor.normalized(),
                view: accessor.view().map(|v| v.index()),
                offset: accessor.offset(),
            }
        })
        .collect();

    let meshes = document
        .meshes()
        .map(|mesh| SourceMesh {
            name: mesh.name().map(str::to_string),
            primitives: mesh
                .primitives()
                .map(|prim| MeshPrimitive {
                    attributes: prim
                        .attributes()
                        .filter_map(|(semantic, accessor)| {
                            semantic_name(&semantic).map(|name| (name, accessor.index()))
                        })
                        .collect(),
                    indices: prim.indices().map(|a| a.index()),
                })
                .collect(),
        })
        .collect();

    let skins = document
        .skins()
        .map(|skin| SourceSkin {
            joints: skin.joints().map(|node| node.index()).collect(),
            inverse_bind_matrices: skin.inverse_bind_matrices().map(|a| a.index()),
        })
        .collect();

    // One sampler per channel keeps channel.sampler a plain index
    let animations = document
        .animations()
        .map(|anim| {
            let mut channels = Vec::new();
            let mut samplers = Vec::new();
            for channel in anim.channels() {
                let sampler = channel.sampler();
                samplers.push(SourceSampler {
                    input: sampler.input().index(),
                    output: sampler.output().index(),
                    interpolation: interpolation_name(sampler.interpolation()).to_string(),
                });
                channels.push(SourceChannel {
                    target_node: channel.target().node().index(),
                    path: property_name(channel.target().property()).to_string(),
                    sampler: samplers.len() - 1,
                });
            }
            SourceAnimation {
                name: anim.name().map(str::to_string),
                channels,
                samplers,
            }
        })
        .collect();

    let nodes = document
        .nodes()
        .zip(&document.as_json().nodes)
        .map(|(node, raw)| SourceNode {
            name: node.name().map(str::to_string),
            transform: local_transform(raw),
            children: node.children().map(|c| c.index()).collect(),
        })
        .collect();

    SourceScene {
        buffer,
        views,
        accessors,
        meshes,
        skins,
        animations,
        nodes,
    }
}

fn component_type(data_type: DataType) -> ComponentType {
    match data_type {
        DataType::I8 => ComponentType::I8,
        DataType::U8 => ComponentType::U8,
        DataType::I16 => ComponentType::I16,
        DataType::U16 => ComponentType::U16,
        DataType::U32 => ComponentType::U32,
        DataType::F32 => ComponentType::F32,
    }
}

fn element_shape(dimensions: Dimensions) -> ElementShape {
    match dimensions {
        Dimensions::Scalar => ElementShape::Scalar,
        Dimensions::Vec2 => ElementShape::Vec2,
        Dimensions::Vec3 => ElementShape::Vec3,
        Dimensions::Vec4 => ElementShape::Vec4,
        Dimensions::Mat2 => ElementShape::Mat2,
        Dimensions::Mat3 => ElementShape::Mat3,
        Dimensions::Mat4 => ElementShape::Mat4,
    }
}

fn semantic_name(semantic: &Semantic) -> Option<String> {
    let name = match semantic {
        Semantic::Positions => "POSITION".to_string(),
        Semantic::Normals => "NORMAL".to_string(),
        Semantic::Tangents => "TANGENT".to_string(),
        Semantic::Colors(n) => format!("COLOR_{}", n),
        Semantic::TexCoords(n) => format!("TEXCOORD_{}", n),
        Semantic::Joints(n) => format!("JOINTS_{}", n),
        Semantic::Weights(n) => format!("WEIGHTS_{}", n),
        #[allow(unreachable_patterns)]
        _ => return None,
    };
    Some(name)
}

fn property_name(property: Property) -> &'static str {
    match property {
        Property::Translation => "translation",
        Property::Rotation => "rotation",
        Property::Scale => "scale",
        Property::MorphTargetWeights => "weights",
    }
}

fn interpolation_name(interpolation: Interpolation) -> &'static str {
    match interpolation {
        Interpolation::Linear => "LINEAR",
        Interpolation::Step => "STEP",
        Interpolation::CubicSpline => "CUBICSPLINE",
    }
}

/// Record the matrix as-is, or each decomposed component the node authors.
///
/// Presence follows the source fields, so an explicitly authored default
/// (identity rotation, unit scale) still sets its flag.
fn local_transform(node: &json::Node) -> LocalTransform {
    match node.matrix {
        Some(matrix) => LocalTransform::Matrix(matrix.map(f64::from)),
        None => LocalTransform::Components {
            rotation: node.rotation.map(|q| q.0.map(f64::from)),
            scale: node.scale.map(|s| s.map(f64::from)),
            translation: node.translation.map(|t| t.map(f64::from)),
        },
    }
}
