pub mod planning_session;

pub use planning_session::*;
