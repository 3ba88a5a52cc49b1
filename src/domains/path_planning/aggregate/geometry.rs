use crate::common::{PlanningError, PlanningResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Truncates both coordinates toward zero, landing on the integer grid.
    pub fn truncated(&self) -> Self {
        Self {
            x: self.x.trunc(),
            y: self.y.trunc(),
        }
    }
}

/// Axis-aligned rectangle given by two opposite corners in any order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Obstacle {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.y1.is_finite() && self.x2.is_finite() && self.y2.is_finite()
    }

    pub fn min_x(&self) -> f64 {
        self.x1.min(self.x2)
    }

    pub fn max_x(&self) -> f64 {
        self.x1.max(self.x2)
    }

    pub fn min_y(&self) -> f64 {
        self.y1.min(self.y2)
    }

    pub fn max_y(&self) -> f64 {
        self.y1.max(self.y2)
    }
}

pub fn distance(p: Position2D, q: Position2D) -> f64 {
    (p.x - q.x).hypot(p.y - q.y)
}

/// Closed containment test: points on the boundary count as inside.
pub fn point_in_rect(rect: &Obstacle, p: Position2D) -> bool {
    p.x >= rect.min_x() && p.x <= rect.max_x() && p.y >= rect.min_y() && p.y <= rect.max_y()
}

/// Liang-Barsky clip of the closed segment `p`-`q` against the closed rectangle.
///
/// A non-empty clipped interval means the segment touches the boundary or the
/// interior, which includes segments lying entirely inside the rectangle and
/// degenerate (single point) segments on or inside it.
pub fn segment_intersects_rect(rect: &Obstacle, p: Position2D, q: Position2D) -> bool {
    let dx = q.x - p.x;
    let dy = q.y - p.y;

    let edges = [
        (-dx, p.x - rect.min_x()),
        (dx, rect.max_x() - p.x),
        (-dy, p.y - rect.min_y()),
        (dy, rect.max_y() - p.y),
    ];

    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;

    for (denom, numer) in edges {
        if denom == 0.0 {
            // parallel to this edge and on its outer side
            if numer < 0.0 {
                return false;
            }
            continue;
        }

        let t = numer / denom;
        if denom < 0.0 {
            if t > t_exit {
                return false;
            }
            t_enter = t_enter.max(t);
        } else {
            if t < t_enter {
                return false;
            }
            t_exit = t_exit.min(t);
        }
    }

    t_enter <= t_exit
}

/// Moves exactly `step_length` from `from` toward `toward`.
///
/// The step is not clamped to the target, so it may overshoot when the target
/// is closer than `step_length`.
pub fn step_toward(
    from: Position2D,
    toward: Position2D,
    step_length: f64,
) -> PlanningResult<Position2D> {
    let magnitude = distance(from, toward);
    if magnitude == 0.0 {
        return Err(PlanningError::DegenerateSample {
            x: from.x,
            y: from.y,
        });
    }

    // unit direction first so subnormal gaps stay finite
    let next = Position2D {
        x: from.x + (toward.x - from.x) / magnitude * step_length,
        y: from.y + (toward.y - from.y) / magnitude * step_length,
    };
    if !next.is_finite() {
        return Err(PlanningError::DegenerateSample {
            x: from.x,
            y: from.y,
        });
    }
    Ok(next)
}
