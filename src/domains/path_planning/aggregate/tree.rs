use super::geometry::{distance, Position2D};
use crate::common::{PlanningError, PlanningResult};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Index of a node in insertion order. The root is always `NodeId::ROOT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    Root,
    Goal,
    Interior,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerNode {
    pub id: NodeId,
    pub position: Position2D,
    pub cost: f64,
    pub parent: Option<NodeId>,
    pub role: NodeRole,
}

/// Insert-only tree of planner nodes. Nodes are never removed; only their
/// parent, cost and role change after insertion.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<PlannerNode>,
}

impl Tree {
    pub fn new(root: Position2D) -> Self {
        Self {
            nodes: vec![PlannerNode {
                id: NodeId::ROOT,
                position: root,
                cost: 0.0,
                parent: None,
                role: NodeRole::Root,
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn root(&self) -> &PlannerNode {
        &self.nodes[0]
    }

    pub fn get(&self, id: NodeId) -> Option<&PlannerNode> {
        self.nodes.get(id.0)
    }

    pub fn node(&self, id: NodeId) -> PlanningResult<&PlannerNode> {
        self.get(id).ok_or(PlanningError::UnknownNode { id: id.0 })
    }

    pub fn nodes(&self) -> &[PlannerNode] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlannerNode> {
        self.nodes.iter()
    }

    /// Closest node to `p`; ties go to the earliest inserted node.
    pub fn nearest(&self, p: Position2D) -> &PlannerNode {
        self.nodes
            .iter()
            .min_by_key(|n| OrderedFloat(distance(n.position, p)))
            .unwrap_or_else(|| self.root())
    }

    /// All nodes within `radius` of `p`, boundary included, in insertion order.
    pub fn near(&self, p: Position2D, radius: f64) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| distance(n.position, p) <= radius)
            .map(|n| n.id)
            .collect()
    }

    pub fn insert(
        &mut self,
        position: Position2D,
        parent: NodeId,
        cost: f64,
    ) -> PlanningResult<NodeId> {
        self.node(parent)?;

        let id = NodeId(self.nodes.len());
        self.nodes.push(PlannerNode {
            id,
            position,
            cost,
            parent: Some(parent),
            role: NodeRole::Interior,
        });
        Ok(id)
    }

    /// Re-parents `node` under `new_parent` with a strictly lower cost.
    ///
    /// Costs of `node`'s descendants are left as they were.
    pub fn rewire(
        &mut self,
        node: NodeId,
        new_parent: NodeId,
        new_cost: f64,
    ) -> PlanningResult<()> {
        let current = self.node(node)?;
        self.node(new_parent)?;

        if current.parent.is_none() {
            return Err(PlanningError::InvalidRewire {
                id: node.0,
                reason: "the root never changes parent".to_string(),
            });
        }
        // also rejects NaN
        if !(new_cost < current.cost) {
            return Err(PlanningError::InvalidRewire {
                id: node.0,
                reason: format!("cost {} does not improve on {}", new_cost, current.cost),
            });
        }
        if new_parent == node || self.is_ancestor(node, new_parent) {
            return Err(PlanningError::InvalidRewire {
                id: node.0,
                reason: format!("node {} lies in its own subtree", new_parent),
            });
        }

        let entry = &mut self.nodes[node.0];
        entry.parent = Some(new_parent);
        entry.cost = new_cost;
        Ok(())
    }

    /// True when `ancestor` appears on the parent chain above `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.get(node).and_then(|n| n.parent);
        for _ in 0..self.nodes.len() {
            match current {
                Some(id) if id == ancestor => return true,
                Some(id) => current = self.get(id).and_then(|n| n.parent),
                None => return false,
            }
        }
        false
    }

    pub fn set_role(&mut self, id: NodeId, role: NodeRole) -> PlanningResult<()> {
        let idx = self.node(id)?.id.0;
        if self.nodes[idx].role != NodeRole::Root {
            self.nodes[idx].role = role;
        }
        Ok(())
    }

    /// `(parent, child)` position pairs for every non-root node.
    pub fn edges(&self) -> Vec<(Position2D, Position2D)> {
        edges_of(&self.nodes)
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            nodes: Arc::from(self.nodes.clone()),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_raw_nodes(nodes: Vec<PlannerNode>) -> Self {
        Self { nodes }
    }
}

fn edges_of(nodes: &[PlannerNode]) -> Vec<(Position2D, Position2D)> {
    nodes
        .iter()
        .filter_map(|n| {
            n.parent
                .and_then(|p| nodes.get(p.0))
                .map(|parent| (parent.position, n.position))
        })
        .collect()
}

/// Immutable copy of the tree that can be handed to a reader on another thread.
#[derive(Debug, Clone)]
pub struct TreeSnapshot {
    nodes: Arc<[PlannerNode]>,
}

impl TreeSnapshot {
    pub fn nodes(&self) -> &[PlannerNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edges(&self) -> Vec<(Position2D, Position2D)> {
        edges_of(&self.nodes)
    }
}
