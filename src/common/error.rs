use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("Growth step gave up after {attempts} attempts with {nodes_added} nodes added")]
    AttemptsExhausted { attempts: usize, nodes_added: usize },

    #[error("Cannot steer from ({x}, {y}) toward itself")]
    DegenerateSample { x: f64, y: f64 },

    #[error("Node {id} is not part of the tree")]
    UnknownNode { id: usize },

    #[error("Invalid rewire of node {id}: {reason}")]
    InvalidRewire { id: usize, reason: String },

    #[error("Parent chain from node {id} did not reach the root within {steps} steps")]
    BrokenChain { id: usize, steps: usize },
}

impl PlanningError {
    pub fn configuration(reason: impl Into<String>) -> Self {
        PlanningError::Configuration {
            reason: reason.into(),
        }
    }
}

pub type PlanningResult<T> = Result<T, PlanningError>;
