pub mod geometry;
pub mod path;
pub mod planner;
pub mod sampler;
pub mod tree;
pub mod workspace;

// Re-export all public types for convenience
pub use geometry::*;
pub use path::*;
pub use planner::*;
pub use sampler::*;
pub use tree::*;
pub use workspace::*;
