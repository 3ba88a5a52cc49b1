use crate::domains::path_planning::aggregate::{Position2D, WorkspaceBounds};

/// Port for the planner's only source of randomness.
/// Implementations must return points inside the given bounds.
pub trait SampleSource: Send {
    fn sample(&mut self, bounds: &WorkspaceBounds) -> Position2D;
}
