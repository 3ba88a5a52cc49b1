use super::geometry::{point_in_rect, segment_intersects_rect, Obstacle, Position2D};
use crate::common::{PlanningError, PlanningResult};
use crate::domains::path_planning::ports::SampleSource;
use serde::{Deserialize, Serialize};

/// Half-open sampling domain `[min_x, max_x) x [min_y, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl WorkspaceBounds {
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            min_x: 0.0,
            max_x: width,
            min_y: 0.0,
            max_y: height,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, p: Position2D) -> bool {
        p.x >= self.min_x && p.x < self.max_x && p.y >= self.min_y && p.y < self.max_y
    }

    fn validate(&self) -> PlanningResult<()> {
        let finite = [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(PlanningError::configuration(
                "Workspace bounds must be finite",
            ));
        }
        if self.max_x <= self.min_x || self.max_y <= self.min_y {
            return Err(PlanningError::configuration(format!(
                "Workspace bounds are empty: x [{}, {}), y [{}, {})",
                self.min_x, self.max_x, self.min_y, self.max_y
            )));
        }
        if !(self.width().is_finite() && self.height().is_finite()) {
            return Err(PlanningError::configuration(format!(
                "Workspace span overflows: width {}, height {}",
                self.width(),
                self.height()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    bounds: WorkspaceBounds,
    obstacles: Vec<Obstacle>,
}

impl Workspace {
    pub fn new(bounds: WorkspaceBounds, obstacles: Vec<Obstacle>) -> PlanningResult<Self> {
        bounds.validate()?;
        if let Some((index, _)) = obstacles.iter().enumerate().find(|(_, o)| !o.is_finite()) {
            return Err(PlanningError::configuration(format!(
                "Obstacle {} has non-finite coordinates",
                index
            )));
        }
        Ok(Self { bounds, obstacles })
    }

    pub fn bounds(&self) -> &WorkspaceBounds {
        &self.bounds
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn contains(&self, p: Position2D) -> bool {
        self.bounds.contains(p)
    }

    pub fn is_point_free(&self, p: Position2D) -> bool {
        !self.obstacles.iter().any(|o| point_in_rect(o, p))
    }

    pub fn is_segment_free(&self, p: Position2D, q: Position2D) -> bool {
        !self
            .obstacles
            .iter()
            .any(|o| segment_intersects_rect(o, p, q))
    }

    pub fn sample_uniform(&self, sampler: &mut dyn SampleSource) -> Position2D {
        sampler.sample(&self.bounds)
    }
}
