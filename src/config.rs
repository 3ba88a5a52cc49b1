use crate::common::{PlanningError, PlanningResult};
use crate::domains::path_planning::aggregate::{Obstacle, Position2D};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub planner: PlannerConfig,
    pub scenario: ScenarioConfig,
    pub logging: LoggingConfig,
}

/// Which goal-connected node the planner reports when several qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalPolicy {
    /// Every qualifying insertion replaces the previous record.
    #[default]
    MostRecent,
    /// A qualifying insertion replaces the record only when it is cheaper.
    LowestCost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Distance moved from the nearest node toward each sample.
    pub rrt_radius: f64,
    /// Neighbourhood used for parent selection and rewiring.
    pub search_radius: f64,
    /// Default capture radius for goals set from a scenario.
    pub goal_radius: f64,
    /// Drawing radius for nodes; the planner itself ignores it.
    pub node_radius: f64,
    pub nodes_per_step: usize,
    /// Sampling attempts allowed per growth step; `None` never gives up.
    pub max_attempts_per_step: Option<usize>,
    pub goal_policy: GoalPolicy,
    pub snap_to_grid: bool,
    pub seed: Option<u64>,
}

impl PlannerConfig {
    pub fn validate(&self) -> PlanningResult<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(PlanningError::configuration(format!(
                    "{} must be positive and finite, got {}",
                    name, v
                )))
            }
        };
        positive("rrt_radius", self.rrt_radius)?;
        positive("search_radius", self.search_radius)?;
        positive("node_radius", self.node_radius)?;

        if !(self.goal_radius.is_finite() && self.goal_radius >= 0.0) {
            return Err(PlanningError::configuration(format!(
                "goal_radius must be non-negative and finite, got {}",
                self.goal_radius
            )));
        }
        if self.nodes_per_step == 0 {
            return Err(PlanningError::configuration("nodes_per_step must be at least 1"));
        }
        if self.max_attempts_per_step == Some(0) {
            return Err(PlanningError::configuration(
                "max_attempts_per_step must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            rrt_radius: 20.0,
            search_radius: 30.0,
            goal_radius: 20.0,
            node_radius: 4.0,
            nodes_per_step: 20,
            max_attempts_per_step: Some(100_000),
            goal_policy: GoalPolicy::MostRecent,
            snap_to_grid: false,
            seed: None,
        }
    }
}

/// Workspace, endpoints and run length for the headless driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub width: f64,
    pub height: f64,
    pub obstacles: Vec<Obstacle>,
    pub start: Position2D,
    pub goal: Position2D,
    /// Overrides `planner.goal_radius` when set.
    pub goal_radius: Option<f64>,
    pub max_steps: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            obstacles: Vec::new(),
            start: Position2D { x: 100.0, y: 100.0 },
            goal: Position2D { x: 700.0, y: 700.0 },
            goal_radius: None,
            max_steps: 500,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// When set, domain log lines are also written to this file.
    pub file: Option<String>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.planner.validate()?;
        Ok(config)
    }
}
