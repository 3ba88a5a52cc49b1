use super::geometry::{distance, Position2D};
use super::tree::{NodeId, Tree};
use crate::common::{PlanningError, PlanningResult};

/// Ordered waypoints from the root to a goal-connected node.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    waypoints: Vec<Position2D>,
    node_cost: f64,
}

impl Path {
    pub fn waypoints(&self) -> &[Position2D] {
        &self.waypoints
    }

    pub fn into_waypoints(self) -> Vec<Position2D> {
        self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn start(&self) -> Option<Position2D> {
        self.waypoints.first().copied()
    }

    pub fn end(&self) -> Option<Position2D> {
        self.waypoints.last().copied()
    }

    /// Accumulated cost recorded on the final tree node.
    pub fn node_cost(&self) -> f64 {
        self.node_cost
    }

    /// Sum of segment lengths along the waypoints.
    pub fn cost(&self) -> f64 {
        self.waypoints
            .windows(2)
            .map(|w| distance(w[0], w[1]))
            .sum()
    }

    /// Extends the path with the goal position itself.
    pub fn with_goal(mut self, goal: Position2D) -> Self {
        if self.end() != Some(goal) {
            self.node_cost += self.end().map(|end| distance(end, goal)).unwrap_or(0.0);
            self.waypoints.push(goal);
        }
        self
    }
}

pub struct PathExtractor;

impl PathExtractor {
    /// Walks parent links from `node` up to the root and returns the
    /// root-to-node sequence.
    pub fn extract(tree: &Tree, node: NodeId) -> PlanningResult<Path> {
        let last = tree.node(node)?;
        let node_cost = last.cost;

        let mut waypoints = vec![last.position];
        let mut current = last.parent;
        let mut steps = 0;

        while let Some(id) = current {
            steps += 1;
            if steps >= tree.len() {
                return Err(PlanningError::BrokenChain {
                    id: node.index(),
                    steps,
                });
            }
            let parent = tree.get(id).ok_or(PlanningError::BrokenChain {
                id: node.index(),
                steps,
            })?;
            waypoints.push(parent.position);
            current = parent.parent;
        }

        waypoints.reverse();
        Ok(Path {
            waypoints,
            node_cost,
        })
    }
}
