use crate::common::{PlanningError, PlanningResult};
use crate::config::Config;
use crate::domains::path_planning::{
    Path, PlanningEvent, RrtStarPlanner, SampleSource, WorkspaceBounds,
};
use crate::domains::DynLogger;

/// Drives growth steps headlessly until the goal is reached or the step budget runs out.
pub struct PlanningSession {
    planner: RrtStarPlanner,
    max_steps: usize,
    logger: DynLogger,
}

#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub steps: usize,
    pub tree_size: usize,
    pub rewires: usize,
    /// Root-to-goal path, ending at the goal position itself.
    pub path: Option<Path>,
}

impl PlanningSession {
    pub fn from_config(config: &Config, logger: DynLogger) -> PlanningResult<Self> {
        let planner = RrtStarPlanner::new(config.planner.clone())?;
        Self::with_planner(planner, config, logger)
    }

    pub fn with_sampler(
        config: &Config,
        sampler: Box<dyn SampleSource>,
        logger: DynLogger,
    ) -> PlanningResult<Self> {
        let planner = RrtStarPlanner::with_sampler(config.planner.clone(), sampler)?;
        Self::with_planner(planner, config, logger)
    }

    fn with_planner(
        mut planner: RrtStarPlanner,
        config: &Config,
        logger: DynLogger,
    ) -> PlanningResult<Self> {
        let scenario = &config.scenario;
        planner.configure(
            WorkspaceBounds::from_size(scenario.width, scenario.height),
            scenario.obstacles.clone(),
        )?;
        planner.set_start(scenario.start)?;
        planner.set_goal(
            scenario.goal,
            scenario.goal_radius.unwrap_or(config.planner.goal_radius),
        )?;

        logger.info(&format!(
            "Session {} ready: {}x{} workspace, {} obstacles, start ({:.1}, {:.1}), goal ({:.1}, {:.1})",
            planner.id(),
            scenario.width,
            scenario.height,
            scenario.obstacles.len(),
            scenario.start.x,
            scenario.start.y,
            scenario.goal.x,
            scenario.goal.y
        ));

        Ok(Self {
            planner,
            max_steps: scenario.max_steps,
            logger,
        })
    }

    pub fn planner(&self) -> &RrtStarPlanner {
        &self.planner
    }

    /// Runs growth steps until one reports a goal connection.
    pub fn run(&mut self) -> PlanningResult<SessionOutcome> {
        let mut steps = 0;
        let mut rewires = 0;

        while steps < self.max_steps {
            let result = match self.planner.growth_step() {
                Ok(result) => result,
                Err(e) => {
                    self.logger.error(&format!("Growth step {} failed: {}", steps + 1, e));
                    return Err(e);
                }
            };
            steps += 1;
            rewires += self
                .planner
                .uncommitted_events()
                .iter()
                .filter(|e| matches!(e, PlanningEvent::NodeRewired { .. }))
                .count();
            self.planner.mark_events_as_committed();

            if result.goal_connected {
                break;
            }
        }

        let tree_size = self.planner.current_tree().map(|t| t.len()).unwrap_or(0);
        let goal = self
            .planner
            .goal()
            .ok_or_else(|| PlanningError::configuration("Goal has not been set"))?;
        let path = self
            .planner
            .current_path()?
            .map(|path| path.with_goal(goal.position));

        match &path {
            Some(path) => self.logger.info(&format!(
                "Goal reached after {} steps: {} waypoints, length {:.2}, {} nodes, {} rewires",
                steps,
                path.len(),
                path.cost(),
                tree_size,
                rewires
            )),
            None => self.logger.warn(&format!(
                "No path after {} steps ({} nodes, {} rewires)",
                steps, tree_size, rewires
            )),
        }

        Ok(SessionOutcome {
            steps,
            tree_size,
            rewires,
            path,
        })
    }
}
