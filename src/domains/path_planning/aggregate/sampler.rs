use super::geometry::Position2D;
use super::workspace::WorkspaceBounds;
use crate::domains::path_planning::ports::SampleSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform sampler over the workspace bounds backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct UniformSampler {
    rng: StdRng,
}

impl UniformSampler {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl SampleSource for UniformSampler {
    fn sample(&mut self, bounds: &WorkspaceBounds) -> Position2D {
        Position2D {
            x: self.rng.gen_range(bounds.min_x..bounds.max_x),
            y: self.rng.gen_range(bounds.min_y..bounds.max_y),
        }
    }
}
