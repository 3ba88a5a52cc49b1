use super::aggregate::{NodeId, Obstacle, Position2D, WorkspaceBounds};
use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Changes a reader (e.g. a renderer) can replay to mirror the planner's tree
/// without re-reading it in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanningEvent {
    WorkspaceConfigured {
        session_id: String,
        bounds: WorkspaceBounds,
        obstacles: Vec<Obstacle>,
        timestamp: DateTime<Utc>,
    },
    StartSet {
        session_id: String,
        position: Position2D,
        timestamp: DateTime<Utc>,
    },
    GoalSet {
        session_id: String,
        position: Position2D,
        radius: f64,
        timestamp: DateTime<Utc>,
    },
    NodeInserted {
        session_id: String,
        node: NodeId,
        parent: NodeId,
        position: Position2D,
        cost: f64,
        timestamp: DateTime<Utc>,
    },
    NodeRewired {
        session_id: String,
        node: NodeId,
        old_parent: Option<NodeId>,
        new_parent: NodeId,
        old_cost: f64,
        new_cost: f64,
        timestamp: DateTime<Utc>,
    },
    GoalConnected {
        session_id: String,
        node: NodeId,
        cost: f64,
        timestamp: DateTime<Utc>,
    },
    StepCompleted {
        session_id: String,
        nodes_added: usize,
        attempts: usize,
        goal_connected: bool,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for PlanningEvent {
    fn event_type(&self) -> &'static str {
        match self {
            PlanningEvent::WorkspaceConfigured { .. } => "WorkspaceConfigured",
            PlanningEvent::StartSet { .. } => "StartSet",
            PlanningEvent::GoalSet { .. } => "GoalSet",
            PlanningEvent::NodeInserted { .. } => "NodeInserted",
            PlanningEvent::NodeRewired { .. } => "NodeRewired",
            PlanningEvent::GoalConnected { .. } => "GoalConnected",
            PlanningEvent::StepCompleted { .. } => "StepCompleted",
        }
    }

    fn session_id(&self) -> &str {
        match self {
            PlanningEvent::WorkspaceConfigured { session_id, .. } => session_id,
            PlanningEvent::StartSet { session_id, .. } => session_id,
            PlanningEvent::GoalSet { session_id, .. } => session_id,
            PlanningEvent::NodeInserted { session_id, .. } => session_id,
            PlanningEvent::NodeRewired { session_id, .. } => session_id,
            PlanningEvent::GoalConnected { session_id, .. } => session_id,
            PlanningEvent::StepCompleted { session_id, .. } => session_id,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            PlanningEvent::WorkspaceConfigured { timestamp, .. } => *timestamp,
            PlanningEvent::StartSet { timestamp, .. } => *timestamp,
            PlanningEvent::GoalSet { timestamp, .. } => *timestamp,
            PlanningEvent::NodeInserted { timestamp, .. } => *timestamp,
            PlanningEvent::NodeRewired { timestamp, .. } => *timestamp,
            PlanningEvent::GoalConnected { timestamp, .. } => *timestamp,
            PlanningEvent::StepCompleted { timestamp, .. } => *timestamp,
        }
    }
}
