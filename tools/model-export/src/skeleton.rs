//! Rig extraction (first skin -> [`RigData`])
//!
//! The skin's joint list defines the compact joint index space: joint `i`
//! of the skin becomes `nodes[i]` of the rig. Child links are remapped
//! through the same [`JointMap`]; children that are not joints of the skin
//! are left out.

use hashbrown::HashMap;
use model_common::asset::IDENTITY_MATRIX;
use model_common::{NodeAsset, RigData};

use crate::accessor::fetch;
use crate::error::{ExportError, ExportResult};
use crate::source::{SourceScene, SourceSkin};

/// Source node id -> compact joint index
pub type JointMap = HashMap<usize, u32>;

/// Result of rig extraction
#[derive(Debug, Default)]
pub struct SkeletonBuild {
    /// Present whenever the scene has a skin, even if the rig itself failed
    pub joint_map: Option<JointMap>,
    pub rig: Option<RigData>,
}

/// Build the rig of the first skin.
///
/// A scene without skins yields neither map nor rig. A malformed rig is
/// logged and dropped; its joint map is still returned so animations keep
/// targeting compact indices.
pub fn build_skeleton(scene: &SourceScene) -> SkeletonBuild {
    let Some(skin) = scene.skins.first() else {
        return SkeletonBuild::default();
    };
    if scene.skins.len() > 1 {
        tracing::debug!(
            "Scene has {} skins; only the first is exported",
            scene.skins.len()
        );
    }

    let joint_map = build_joint_map(skin);
    let rig = match build_rig(scene, skin, &joint_map) {
        Ok(rig) => Some(rig),
        Err(e) => {
            tracing::warn!("Dropping rig: {}", e);
            None
        }
    };

    SkeletonBuild {
        joint_map: Some(joint_map),
        rig,
    }
}

/// Map each joint's node id to its position in the joint list.
///
/// A node listed twice keeps its first position.
pub fn build_joint_map(skin: &SourceSkin) -> JointMap {
    let mut map = JointMap::with_capacity(skin.joints.len());
    for (index, &node) in skin.joints.iter().enumerate() {
        map.entry(node).or_insert(index as u32);
    }
    map
}

/// Build and validate the joint hierarchy of `skin`.
///
/// The root is the joint no other joint lists as a child. When several
/// joints qualify and they all hang under the same non-joint node (an
/// armature), that node is appended after the joints as the rig root;
/// compact joint indices are unchanged.
pub fn build_rig(
    scene: &SourceScene,
    skin: &SourceSkin,
    joint_map: &JointMap,
) -> ExportResult<RigData> {
    if skin.joints.is_empty() {
        return Err(ExportError::MalformedRig("skin has no joints".to_string()));
    }
    if joint_map.len() != skin.joints.len() {
        return Err(ExportError::MalformedRig(format!(
            "skin lists {} joints but only {} distinct nodes",
            skin.joints.len(),
            joint_map.len()
        )));
    }

    let inverse_bind_matrices: Vec<[f32; 16]> = match skin.inverse_bind_matrices {
        Some(accessor) => fetch(scene, accessor)?,
        None => vec![IDENTITY_MATRIX; skin.joints.len()],
    };
    if inverse_bind_matrices.len() < skin.joints.len() {
        return Err(ExportError::MalformedRig(format!(
            "{} inverse bind matrices for {} joints",
            inverse_bind_matrices.len(),
            skin.joints.len()
        )));
    }

    let mut nodes = Vec::with_capacity(skin.joints.len() + 1);
    for (index, (&node_id, ibm)) in skin.joints.iter().zip(&inverse_bind_matrices).enumerate() {
        let source = scene
            .nodes
            .get(node_id)
            .ok_or_else(|| ExportError::out_of_range("node", node_id, scene.nodes.len()))?;

        let children = source
            .children
            .iter()
            .filter_map(|child| joint_map.get(child).copied())
            .collect();

        nodes.push(NodeAsset {
            name: source
                .name
                .clone()
                .unwrap_or_else(|| format!("joint_{}", index)),
            inverse_bind_matrix: *ibm,
            transform: source.transform.clone(),
            children,
        });
    }

    let roots = root_joints(&nodes);
    let start_node = match roots.as_slice() {
        [] => {
            let reason = "every joint has a parent (cycle)".to_string();
            return Err(ExportError::MalformedRig(reason));
        }
        [root] => *root,
        _ => adopt_common_parent(scene, skin, &mut nodes, roots)?,
    };

    let rig = RigData { start_node, nodes };
    rig.validate()
        .map_err(|e| ExportError::MalformedRig(e.to_string()))?;
    Ok(rig)
}

/// Joints no other joint lists as a child, in joint order
fn root_joints(nodes: &[NodeAsset]) -> Vec<u32> {
    let mut has_parent = vec![false; nodes.len()];
    for node in nodes {
        for &child in &node.children {
            if let Some(flag) = has_parent.get_mut(child as usize) {
                *flag = true;
            }
        }
    }

    has_parent
        .iter()
        .enumerate()
        .filter(|(_, &p)| !p)
        .map(|(i, _)| i as u32)
        .collect()
}

/// Append the source node shared by every root joint as their parent.
///
/// Returns the index of the appended node.
fn adopt_common_parent(
    scene: &SourceScene,
    skin: &SourceSkin,
    nodes: &mut Vec<NodeAsset>,
    roots: Vec<u32>,
) -> ExportResult<u32> {
    let parent_of = |joint: u32| {
        let node_id = skin.joints[joint as usize];
        scene
            .nodes
            .iter()
            .position(|node| node.children.contains(&node_id))
    };

    let mut parents = roots.iter().map(|&root| parent_of(root));
    let common = match parents.next().flatten() {
        Some(parent) if parents.all(|p| p == Some(parent)) => parent,
        _ => {
            let reason = format!("joints {} and {} are both roots", roots[0], roots[1]);
            return Err(ExportError::MalformedRig(reason));
        }
    };

    let index = nodes.len() as u32;
    let source = &scene.nodes[common];
    tracing::debug!(
        "Joints {:?} share non-joint parent node {}; it becomes the rig root",
        roots,
        common
    );
    nodes.push(NodeAsset {
        name: source
            .name
            .clone()
            .unwrap_or_else(|| format!("joint_{}", index)),
        inverse_bind_matrix: IDENTITY_MATRIX,
        transform: source.transform.clone(),
        children: roots,
    });
    Ok(index)
}
