//! Skeleton (rig) stored as an arena of joint nodes
//!
//! Nodes live in one flat vector in compact joint order. Parent/child links
//! are indices into that vector, so the tree can be walked, validated and
//! serialized without owning pointers.

use std::collections::VecDeque;

use anyhow::{Result, bail};

use crate::formats::{NODE_FLAG_MATRIX, NODE_FLAG_ROTATION, NODE_FLAG_SCALE, NODE_FLAG_TRANSLATION};

/// Column-major 4x4 identity
pub const IDENTITY_MATRIX: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Local transform of a joint.
///
/// A node carries either a full matrix or any subset of rotation, scale and
/// translation; never both forms.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalTransform {
    /// Column-major 4x4 matrix
    Matrix([f64; 16]),
    Components {
        /// Quaternion xyzw
        rotation: Option<[f64; 4]>,
        scale: Option<[f64; 3]>,
        translation: Option<[f64; 3]>,
    },
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self::Components {
            rotation: None,
            scale: None,
            translation: None,
        }
    }
}

impl LocalTransform {
    /// Presence bitmask written in front of the channel arrays
    pub fn flags(&self) -> u8 {
        match self {
            Self::Matrix(_) => NODE_FLAG_MATRIX,
            Self::Components {
                rotation,
                scale,
                translation,
            } => {
                let mut flags = 0;
                if rotation.is_some() {
                    flags |= NODE_FLAG_ROTATION;
                }
                if scale.is_some() {
                    flags |= NODE_FLAG_SCALE;
                }
                if translation.is_some() {
                    flags |= NODE_FLAG_TRANSLATION;
                }
                flags
            }
        }
    }
}

/// One joint of the rig
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAsset {
    pub name: String,
    /// Column-major inverse bind matrix
    pub inverse_bind_matrix: [f32; 16],
    pub transform: LocalTransform,
    /// Compact indices of child joints
    pub children: Vec<u32>,
}

impl Default for NodeAsset {
    fn default() -> Self {
        Self {
            name: String::new(),
            inverse_bind_matrix: IDENTITY_MATRIX,
            transform: LocalTransform::default(),
            children: Vec::new(),
        }
    }
}

/// Joint hierarchy of the first skin
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RigData {
    /// Index of the root joint; the breadth-first walk starts here
    pub start_node: u32,
    pub nodes: Vec<NodeAsset>,
}

impl RigData {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Breadth-first `(node index, child count)` pairs starting at `start_node`.
    ///
    /// Each node is emitted at most once, even if the links contain a cycle.
    pub fn breadth_first(&self) -> Vec<(u32, u32)> {
        let mut pairs = Vec::with_capacity(self.nodes.len());
        let mut visited = vec![false; self.nodes.len()];
        let mut queue = VecDeque::new();

        if (self.start_node as usize) < self.nodes.len() {
            visited[self.start_node as usize] = true;
            queue.push_back(self.start_node);
        }

        while let Some(index) = queue.pop_front() {
            let node = &self.nodes[index as usize];
            pairs.push((index, node.children.len() as u32));
            for &child in &node.children {
                let Some(seen) = visited.get_mut(child as usize) else {
                    continue;
                };
                if !*seen {
                    *seen = true;
                    queue.push_back(child);
                }
            }
        }

        pairs
    }

    /// Check that the links form one tree rooted at `start_node`.
    pub fn validate(&self) -> Result<()> {
        let count = self.nodes.len();
        if count == 0 {
            bail!("Rig has no nodes");
        }
        if self.start_node as usize >= count {
            bail!(
                "Start node {} out of range ({} nodes)",
                self.start_node,
                count
            );
        }

        let mut parent: Vec<Option<u32>> = vec![None; count];
        for (index, node) in self.nodes.iter().enumerate() {
            for &child in &node.children {
                if child as usize >= count {
                    bail!(
                        "Node {} references child {} out of range ({} nodes)",
                        index,
                        child,
                        count
                    );
                }
                if let Some(existing) = parent[child as usize] {
                    bail!(
                        "Node {} has two parents ({} and {})",
                        child,
                        existing,
                        index
                    );
                }
                parent[child as usize] = Some(index as u32);
            }
        }

        if let Some(p) = parent[self.start_node as usize] {
            bail!("Start node {} has parent {}", self.start_node, p);
        }

        let reached = self.breadth_first().len();
        if reached != count {
            bail!(
                "Only {} of {} nodes are reachable from start node {}",
                reached,
                count,
                self.start_node
            );
        }

        Ok(())
    }
}
