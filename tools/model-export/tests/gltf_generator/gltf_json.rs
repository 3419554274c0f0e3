//! GLTF JSON structure building.

use std::collections::BTreeMap;

use super::binary_packing::BufferPacker;
use super::mesh_data::{self, MeshData, BONE_COUNT, SEGMENT_HEIGHT};
use gltf_json as json;
use json::accessor::Type;
use json::animation::{Interpolation, Property};
use json::mesh::Semantic;
use json::validation::Checked::Valid;

// Node indices of the skinned scene
pub(crate) const ROOT_NODE: u32 = 0;
pub(crate) const SPINE_NODE: u32 = 1;
pub(crate) const HEAD_NODE: u32 = 2;
pub(crate) const SOCKET_NODE: u32 = 3;
pub(crate) const MESH_NODE: u32 = 4;

fn node(name: &str, children: &[u32], translation: Option<[f32; 3]>) -> json::Node {
    json::Node {
        camera: None,
        children: (!children.is_empty())
            .then(|| children.iter().map(|&c| json::Index::new(c)).collect()),
        extensions: Default::default(),
        extras: Default::default(),
        matrix: None,
        mesh: None,
        name: Some(name.to_string()),
        rotation: None,
        scale: None,
        translation,
        skin: None,
        weights: None,
    }
}

/// Pack a primitive; tangents and skin streams are written when present
fn primitive(packer: &mut BufferPacker, mesh: &MeshData, normals: bool) -> json::mesh::Primitive {
    let mut attributes = BTreeMap::new();
    attributes.insert(
        Valid(Semantic::Positions),
        json::Index::new(packer.positions(&mesh.positions)),
    );
    if normals {
        attributes.insert(
            Valid(Semantic::Normals),
            json::Index::new(packer.floats(&mesh.normals, Type::Vec3)),
        );
    }
    if !mesh.tangents.is_empty() {
        attributes.insert(
            Valid(Semantic::Tangents),
            json::Index::new(packer.floats(&mesh.tangents, Type::Vec4)),
        );
    }
    attributes.insert(
        Valid(Semantic::TexCoords(0)),
        json::Index::new(packer.floats(&mesh.uvs, Type::Vec2)),
    );
    if !mesh.joints.is_empty() {
        attributes.insert(
            Valid(Semantic::Joints(0)),
            json::Index::new(packer.joints(&mesh.joints)),
        );
        attributes.insert(
            Valid(Semantic::Weights(0)),
            json::Index::new(packer.floats(&mesh.weights, Type::Vec4)),
        );
    }

    json::mesh::Primitive {
        attributes,
        extensions: Default::default(),
        extras: Default::default(),
        indices: Some(json::Index::new(packer.indices(&mesh.indices))),
        material: None,
        mode: Valid(json::mesh::Mode::Triangles),
        targets: None,
    }
}

fn mesh(name: Option<&str>, primitive: json::mesh::Primitive) -> json::Mesh {
    json::Mesh {
        extensions: Default::default(),
        extras: Default::default(),
        name: name.map(str::to_string),
        primitives: vec![primitive],
        weights: None,
    }
}

/// Channels + samplers of one clip, one sampler per channel
#[derive(Default)]
struct ClipBuilder {
    channels: Vec<json::animation::Channel>,
    samplers: Vec<json::animation::Sampler>,
}

impl ClipBuilder {
    fn channel(&mut self, node: u32, path: Property, input: u32, output: u32, mode: Interpolation) {
        self.samplers.push(json::animation::Sampler {
            input: json::Index::new(input),
            interpolation: Valid(mode),
            output: json::Index::new(output),
            extensions: Default::default(),
            extras: Default::default(),
        });
        self.channels.push(json::animation::Channel {
            sampler: json::Index::new(self.samplers.len() as u32 - 1),
            target: json::animation::Target {
                node: json::Index::new(node),
                path: Valid(path),
                extensions: Default::default(),
                extras: Default::default(),
            },
            extensions: Default::default(),
            extras: Default::default(),
        });
    }

    fn finish(self, name: Option<&str>) -> json::Animation {
        json::Animation {
            channels: self.channels,
            extensions: Default::default(),
            extras: Default::default(),
            name: name.map(str::to_string),
            samplers: self.samplers,
        }
    }
}

fn root(
    packer: BufferPacker,
    nodes: Vec<json::Node>,
    meshes: Vec<json::Mesh>,
    skins: Vec<json::Skin>,
    animations: Vec<json::Animation>,
    scene_nodes: Vec<u32>,
) -> (json::Root, Vec<u8>) {
    let scenes = vec![json::Scene {
        extensions: Default::default(),
        extras: Default::default(),
        name: Some("TestScene".to_string()),
        nodes: scene_nodes.into_iter().map(json::Index::new).collect(),
    }];

    // Byte length is set by assemble_glb
    let buffers = vec![json::Buffer {
        byte_length: 0u64.into(),
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        uri: None,
    }];

    let root = json::Root {
        accessors: packer.accessors,
        animations,
        asset: json::Asset {
            copyright: None,
            extensions: Default::default(),
            extras: Default::default(),
            generator: Some("model-export-test".to_string()),
            min_version: None,
            version: "2.0".to_string(),
        },
        buffers,
        buffer_views: packer.views,
        cameras: Vec::new(),
        extensions: Default::default(),
        extras: Default::default(),
        extensions_required: Vec::new(),
        extensions_used: Vec::new(),
        images: Vec::new(),
        materials: Vec::new(),
        meshes,
        nodes,
        samplers: Vec::new(),
        scene: Some(json::Index::new(0)),
        scenes,
        skins,
        textures: Vec::new(),
    };
    (root, packer.buffer)
}

/// Skinned scene:
/// - nodes Root -> Spine -> Head -> Socket (Socket is not a joint), plus a mesh node
/// - mesh "Body" (skinned strip) and mesh "Broken" (no NORMAL)
/// - clip "Wave": STEP translation on Root, LINEAR rotation on Head, scale on Socket
/// - unnamed clip: CUBICSPLINE translation on Spine
pub(crate) fn build_skinned_scene() -> (json::Root, Vec<u8>) {
    let mut packer = BufferPacker::default();

    let strip = mesh_data::create_skinned_strip();
    let body = primitive(&mut packer, &strip, true);
    let broken = primitive(&mut packer, &mesh_data::create_quad(), false);

    let ibms: Vec<[f32; 16]> = (0..BONE_COUNT).map(mesh_data::inverse_bind_matrix).collect();
    let ibm_accessor = packer.floats(&ibms, Type::Mat4);

    let mut wave = ClipBuilder::default();
    let root_track = mesh_data::root_step_translation();
    let input = packer.scalars(&root_track.times);
    let output = packer.floats(&root_track.values, Type::Vec3);
    wave.channel(
        ROOT_NODE,
        Property::Translation,
        input,
        output,
        Interpolation::Step,
    );

    let head_track = mesh_data::head_rotation();
    let input = packer.scalars(&head_track.times);
    let output = packer.floats(&head_track.values, Type::Vec4);
    wave.channel(
        HEAD_NODE,
        Property::Rotation,
        input,
        output,
        Interpolation::Linear,
    );

    let output = packer.floats(&[[2.0f32; 3]; 3], Type::Vec3);
    wave.channel(
        SOCKET_NODE,
        Property::Scale,
        input,
        output,
        Interpolation::Linear,
    );

    let mut cubic = ClipBuilder::default();
    let spine_track = mesh_data::spine_cubic_translation();
    let input = packer.scalars(&spine_track.times);
    let output = packer.floats(&spine_track.values, Type::Vec3);
    cubic.channel(
        SPINE_NODE,
        Property::Translation,
        input,
        output,
        Interpolation::CubicSpline,
    );

    let mut mesh_node = node("SkinnedMesh", &[], None);
    mesh_node.mesh = Some(json::Index::new(0));
    mesh_node.skin = Some(json::Index::new(0));

    let nodes = vec![
        node("Root", &[SPINE_NODE], None),
        node("Spine", &[HEAD_NODE], Some([0.0, SEGMENT_HEIGHT, 0.0])),
        node("Head", &[SOCKET_NODE], Some([0.0, SEGMENT_HEIGHT, 0.0])),
        node("Socket", &[], Some([0.0, 0.25, 0.0])),
        mesh_node,
    ];

    let skins = vec![json::Skin {
        extensions: Default::default(),
        extras: Default::default(),
        inverse_bind_matrices: Some(json::Index::new(ibm_accessor)),
        joints: vec![
            json::Index::new(ROOT_NODE),
            json::Index::new(SPINE_NODE),
            json::Index::new(HEAD_NODE),
        ],
        name: Some("TestSkeleton".to_string()),
        skeleton: Some(json::Index::new(ROOT_NODE)),
    }];

    root(
        packer,
        nodes,
        vec![mesh(Some("Body"), body), mesh(Some("Broken"), broken)],
        skins,
        vec![wave.finish(Some("Wave")), cubic.finish(None)],
        vec![ROOT_NODE, MESH_NODE],
    )
}

/// Static scene: one unnamed quad with tangents, no skin, no animation
pub(crate) fn build_static_scene() -> (json::Root, Vec<u8>) {
    let mut packer = BufferPacker::default();
    let quad = primitive(&mut packer, &mesh_data::create_quad(), true);

    let mut quad_node = node("Quad", &[], None);
    quad_node.mesh = Some(json::Index::new(0));

    root(
        packer,
        vec![quad_node],
        vec![mesh(None, quad)],
        Vec::new(),
        Vec::new(),
        vec![0],
    )
}
