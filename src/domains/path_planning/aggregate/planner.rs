use super::geometry::{distance, step_toward, Obstacle, Position2D};
use super::path::{Path, PathExtractor};
use super::sampler::UniformSampler;
use super::tree::{NodeId, NodeRole, Tree, TreeSnapshot};
use super::workspace::{Workspace, WorkspaceBounds};
use crate::common::{PlanningError, PlanningResult};
use crate::config::{GoalPolicy, PlannerConfig};
use crate::domains::path_planning::events::PlanningEvent;
use crate::domains::path_planning::ports::SampleSource;
use chrono::Utc;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalRegion {
    pub position: Position2D,
    pub radius: f64,
}

impl GoalRegion {
    pub fn contains(&self, p: Position2D) -> bool {
        distance(self.position, p) <= self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub nodes_added: usize,
    pub goal_connected: bool,
    /// Samples drawn, including discarded ones.
    pub attempts: usize,
}

/// Why a sample did not produce a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Discard {
    CoincidentSample,
    OutsideBounds,
    PointBlocked,
    EdgeBlocked,
}

enum Attempt {
    Inserted(NodeId),
    Discarded(Discard),
}

/// Incremental RRT* planner over a 2D workspace with rectangular obstacles.
///
/// Setup is `configure`, `set_start`, `set_goal`; afterwards each
/// `growth_step` adds up to `nodes_per_step` nodes. Readers inspect the tree
/// and path between steps, or drain `uncommitted_events`.
///
/// Every insertion and rewire appends an event, and nothing is dropped until
/// `mark_events_as_committed` is called. Callers that drive steps directly
/// must drain the queue themselves or it grows with the tree.
pub struct RrtStarPlanner {
    id: String,
    config: PlannerConfig,
    workspace: Option<Workspace>,
    start: Option<Position2D>,
    goal: Option<GoalRegion>,
    tree: Option<Tree>,
    goal_node: Option<NodeId>,
    sampler: Box<dyn SampleSource>,
    uncommitted_events: Vec<PlanningEvent>,
}

impl RrtStarPlanner {
    pub fn new(config: PlannerConfig) -> PlanningResult<Self> {
        let sampler = UniformSampler::from_seed(config.seed);
        Self::with_sampler(config, Box::new(sampler))
    }

    pub fn with_sampler(
        config: PlannerConfig,
        sampler: Box<dyn SampleSource>,
    ) -> PlanningResult<Self> {
        config.validate()?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            config,
            workspace: None,
            start: None,
            goal: None,
            tree: None,
            goal_node: None,
            sampler,
            uncommitted_events: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn workspace(&self) -> Option<&Workspace> {
        self.workspace.as_ref()
    }

    pub fn start(&self) -> Option<Position2D> {
        self.start
    }

    pub fn goal(&self) -> Option<GoalRegion> {
        self.goal
    }

    pub fn uncommitted_events(&self) -> &[PlanningEvent] {
        &self.uncommitted_events
    }

    pub fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn add_event(&mut self, event: PlanningEvent) {
        self.uncommitted_events.push(event);
    }

    /// Installs the workspace. Calling it again starts over from the root.
    pub fn configure(
        &mut self,
        bounds: WorkspaceBounds,
        obstacles: Vec<Obstacle>,
    ) -> PlanningResult<()> {
        let workspace = Workspace::new(bounds, obstacles)?;
        self.add_event(PlanningEvent::WorkspaceConfigured {
            session_id: self.id.clone(),
            bounds,
            obstacles: workspace.obstacles().to_vec(),
            timestamp: Utc::now(),
        });
        info!(
            session = %self.id,
            obstacles = workspace.obstacles().len(),
            "workspace configured"
        );
        self.workspace = Some(workspace);
        self.reset();
        Ok(())
    }

    pub fn set_start(&mut self, position: Position2D) -> PlanningResult<()> {
        if !position.is_finite() {
            return Err(PlanningError::configuration("Start position must be finite"));
        }
        self.start = Some(position);
        self.add_event(PlanningEvent::StartSet {
            session_id: self.id.clone(),
            position,
            timestamp: Utc::now(),
        });
        self.reset();
        Ok(())
    }

    pub fn set_goal(&mut self, position: Position2D, radius: f64) -> PlanningResult<()> {
        if !position.is_finite() {
            return Err(PlanningError::configuration("Goal position must be finite"));
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(PlanningError::configuration(format!(
                "Goal radius must be non-negative and finite, got {}",
                radius
            )));
        }
        self.goal = Some(GoalRegion { position, radius });
        self.goal_node = None;
        if let Some(tree) = self.tree.as_mut() {
            for id in (0..tree.len()).map(NodeId) {
                tree.set_role(id, NodeRole::Interior)?;
            }
        }
        self.add_event(PlanningEvent::GoalSet {
            session_id: self.id.clone(),
            position,
            radius,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Drops every node except the root and forgets the goal connection.
    pub fn reset(&mut self) {
        self.tree = self.start.map(Tree::new);
        self.goal_node = None;
    }

    pub fn current_tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    pub fn snapshot(&self) -> Option<TreeSnapshot> {
        self.tree.as_ref().map(Tree::snapshot)
    }

    pub fn goal_connected(&self) -> bool {
        self.goal_node.is_some()
    }

    pub fn goal_node(&self) -> Option<NodeId> {
        self.goal_node
    }

    pub fn current_path(&self) -> PlanningResult<Option<Path>> {
        match (self.tree.as_ref(), self.goal_node) {
            (Some(tree), Some(node)) => PathExtractor::extract(tree, node).map(Some),
            _ => Ok(None),
        }
    }

    fn check_ready(&self) -> PlanningResult<()> {
        let workspace = self
            .workspace
            .as_ref()
            .ok_or_else(|| PlanningError::configuration("Workspace has not been configured"))?;
        let start = self
            .start
            .ok_or_else(|| PlanningError::configuration("Start position has not been set"))?;
        if self.goal.is_none() {
            return Err(PlanningError::configuration("Goal has not been set"));
        }
        if !workspace.contains(start) {
            return Err(PlanningError::configuration(format!(
                "Start ({}, {}) lies outside the workspace",
                start.x, start.y
            )));
        }
        if !workspace.is_point_free(start) {
            return Err(PlanningError::configuration(format!(
                "Start ({}, {}) lies inside an obstacle",
                start.x, start.y
            )));
        }
        Ok(())
    }

    /// Adds up to `nodes_per_step` nodes, resampling on every discard.
    pub fn growth_step(&mut self) -> PlanningResult<StepResult> {
        self.check_ready()?;
        if self.tree.is_none() {
            self.reset();
        }

        let target = self.config.nodes_per_step;
        let mut nodes_added = 0;
        let mut attempts = 0;

        while nodes_added < target {
            if let Some(max) = self.config.max_attempts_per_step {
                if attempts >= max {
                    warn!(
                        session = %self.id,
                        attempts,
                        nodes_added,
                        "growth step exhausted its sampling attempts"
                    );
                    return Err(PlanningError::AttemptsExhausted {
                        attempts,
                        nodes_added,
                    });
                }
            }
            attempts += 1;

            match self.attempt()? {
                Attempt::Inserted(node) => {
                    nodes_added += 1;
                    self.rewire_around(node)?;
                    self.check_goal(node)?;
                }
                Attempt::Discarded(reason) => {
                    trace!(?reason, attempts, "sample discarded");
                }
            }
        }

        let result = StepResult {
            nodes_added,
            goal_connected: self.goal_connected(),
            attempts,
        };
        self.add_event(PlanningEvent::StepCompleted {
            session_id: self.id.clone(),
            nodes_added,
            attempts,
            goal_connected: result.goal_connected,
            timestamp: Utc::now(),
        });
        info!(
            session = %self.id,
            nodes_added,
            attempts,
            tree_size = self.tree.as_ref().map(Tree::len).unwrap_or(0),
            goal_connected = result.goal_connected,
            "growth step finished"
        );
        Ok(result)
    }

    /// One sample: nearest, steer, validate, choose the cheapest parent, insert.
    fn attempt(&mut self) -> PlanningResult<Attempt> {
        let (workspace, tree) = match (self.workspace.as_ref(), self.tree.as_mut()) {
            (Some(workspace), Some(tree)) => (workspace, tree),
            _ => return Err(PlanningError::configuration("Planner is not ready")),
        };

        let sample = workspace.sample_uniform(self.sampler.as_mut());
        let closest = tree.nearest(sample);
        if distance(closest.position, sample) == 0.0 {
            return Ok(Attempt::Discarded(Discard::CoincidentSample));
        }
        let closest_id = closest.id;

        let mut new_pos = match step_toward(closest.position, sample, self.config.rrt_radius) {
            Ok(p) => p,
            Err(PlanningError::DegenerateSample { .. }) => {
                return Ok(Attempt::Discarded(Discard::CoincidentSample))
            }
            Err(e) => return Err(e),
        };
        if self.config.snap_to_grid {
            new_pos = new_pos.truncated();
        }

        if !workspace.contains(new_pos) {
            return Ok(Attempt::Discarded(Discard::OutsideBounds));
        }
        if !workspace.is_point_free(new_pos) {
            return Ok(Attempt::Discarded(Discard::PointBlocked));
        }

        let cheapest_id = tree
            .near(new_pos, self.config.search_radius)
            .into_iter()
            .filter_map(|id| tree.get(id))
            .min_by(|a, b| a.cost.total_cmp(&b.cost))
            .map(|n| n.id)
            .unwrap_or(closest_id);
        let cheapest = tree.node(cheapest_id)?;

        if !workspace.is_segment_free(cheapest.position, new_pos) {
            return Ok(Attempt::Discarded(Discard::EdgeBlocked));
        }

        let cost = cheapest.cost + distance(cheapest.position, new_pos);
        let node = tree.insert(new_pos, cheapest_id, cost)?;
        debug!(node = %node, parent = %cheapest_id, cost, "node inserted");

        self.add_event(PlanningEvent::NodeInserted {
            session_id: self.id.clone(),
            node,
            parent: cheapest_id,
            position: new_pos,
            cost,
            timestamp: Utc::now(),
        });
        Ok(Attempt::Inserted(node))
    }

    /// Re-parents neighbours of `new_node` that reach the root more cheaply
    /// through it. The new edges are not collision checked.
    fn rewire_around(&mut self, new_node: NodeId) -> PlanningResult<()> {
        let Some(tree) = self.tree.as_mut() else {
            return Ok(());
        };
        let (position, cost) = {
            let n = tree.node(new_node)?;
            (n.position, n.cost)
        };

        let mut rewired = Vec::new();
        for id in tree.near(position, self.config.search_radius) {
            if id == new_node {
                continue;
            }
            let neighbour = tree.node(id)?;
            let candidate = cost + distance(position, neighbour.position);
            if candidate < neighbour.cost && !tree.is_ancestor(id, new_node) {
                let (old_parent, old_cost) = (neighbour.parent, neighbour.cost);
                tree.rewire(id, new_node, candidate)?;
                debug!(
                    node = %id,
                    new_parent = %new_node,
                    old_cost,
                    new_cost = candidate,
                    "node rewired"
                );
                rewired.push((id, old_parent, old_cost, candidate));
            }
        }

        for (node, old_parent, old_cost, new_cost) in rewired {
            self.add_event(PlanningEvent::NodeRewired {
                session_id: self.id.clone(),
                node,
                old_parent,
                new_parent: new_node,
                old_cost,
                new_cost,
                timestamp: Utc::now(),
            });
        }
        Ok(())
    }

    fn check_goal(&mut self, node: NodeId) -> PlanningResult<()> {
        let (Some(goal), Some(tree)) = (self.goal, self.tree.as_mut()) else {
            return Ok(());
        };
        let candidate = tree.node(node)?;
        if !goal.contains(candidate.position) {
            return Ok(());
        }
        let cost = candidate.cost;

        let replace = match (self.config.goal_policy, self.goal_node) {
            (_, None) => true,
            (GoalPolicy::MostRecent, Some(_)) => true,
            (GoalPolicy::LowestCost, Some(current)) => cost < tree.node(current)?.cost,
        };
        if !replace {
            return Ok(());
        }

        let first = self.goal_node.is_none();
        if let Some(previous) = self.goal_node {
            tree.set_role(previous, NodeRole::Interior)?;
        }
        tree.set_role(node, NodeRole::Goal)?;
        self.goal_node = Some(node);

        if first {
            info!(session = %self.id, node = %node, cost, "goal connected");
        } else {
            debug!(node = %node, cost, "goal connection updated");
        }
        self.add_event(PlanningEvent::GoalConnected {
            session_id: self.id.clone(),
            node,
            cost,
            timestamp: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::DomainEvent;
    use std::collections::VecDeque;

    /// Replays a fixed list of samples, then repeats the last one.
    struct ScriptedSampler {
        samples: VecDeque<Position2D>,
        last: Position2D,
    }

    impl ScriptedSampler {
        fn new(samples: Vec<Position2D>) -> Self {
            let last = *samples.last().unwrap();
            Self {
                samples: samples.into(),
                last,
            }
        }
    }

    impl SampleSource for ScriptedSampler {
        fn sample(&mut self, _bounds: &WorkspaceBounds) -> Position2D {
            self.samples.pop_front().unwrap_or(self.last)
        }
    }

    fn p(x: f64, y: f64) -> Position2D {
        Position2D::new(x, y)
    }

    fn scripted(config: PlannerConfig, samples: Vec<Position2D>) -> RrtStarPlanner {
        let mut planner =
            RrtStarPlanner::with_sampler(config, Box::new(ScriptedSampler::new(samples))).unwrap();
        planner
            .configure(WorkspaceBounds::from_size(200.0, 200.0), Vec::new())
            .unwrap();
        planner.set_start(p(0.0, 0.0)).unwrap();
        planner.set_goal(p(100.0, 0.0), 20.0).unwrap();
        planner
    }

    fn one_per_step() -> PlannerConfig {
        PlannerConfig {
            nodes_per_step: 1,
            max_attempts_per_step: Some(10),
            ..Default::default()
        }
    }

    #[test]
    fn test_growth_step_before_setup_is_configuration_error() {
        let mut planner = RrtStarPlanner::new(PlannerConfig::default()).unwrap();
        assert!(matches!(
            planner.growth_step(),
            Err(PlanningError::Configuration { .. })
        ));

        planner
            .configure(WorkspaceBounds::from_size(10.0, 10.0), Vec::new())
            .unwrap();
        planner.set_start(p(1.0, 1.0)).unwrap();
        match planner.growth_step() {
            Err(PlanningError::Configuration { reason }) => assert!(reason.contains("Goal")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_steered_node_and_cost() {
        let mut planner = scripted(one_per_step(), vec![p(100.0, 0.0)]);
        let result = planner.growth_step().unwrap();
        assert_eq!(result.nodes_added, 1);
        assert_eq!(result.attempts, 1);

        let tree = planner.current_tree().unwrap();
        let node = &tree.nodes()[1];
        assert_eq!(node.position, p(20.0, 0.0));
        assert_eq!(node.parent, Some(NodeId::ROOT));
        assert_eq!(node.cost, 20.0);
    }

    #[test]
    fn test_coincident_sample_is_resampled() {
        // the first sample sits on the root
        let mut planner = scripted(one_per_step(), vec![p(0.0, 0.0), p(0.0, 50.0)]);
        let result = planner.growth_step().unwrap();
        assert_eq!(result.attempts, 2);
        assert_eq!(planner.current_tree().unwrap().nodes()[1].position, p(0.0, 20.0));
    }

    #[test]
    fn test_out_of_bounds_step_is_discarded() {
        // the fixed-length step toward (199, 100) overshoots the right edge
        let sampler = ScriptedSampler::new(vec![p(199.0, 100.0), p(150.0, 150.0)]);
        let mut planner = RrtStarPlanner::with_sampler(one_per_step(), Box::new(sampler)).unwrap();
        planner
            .configure(WorkspaceBounds::from_size(200.0, 200.0), Vec::new())
            .unwrap();
        planner.set_start(p(190.0, 100.0)).unwrap();
        planner.set_goal(p(10.0, 10.0), 5.0).unwrap();

        let result = planner.growth_step().unwrap();
        assert_eq!(result.attempts, 2);
        let workspace = planner.workspace().unwrap();
        assert!(planner
            .current_tree()
            .unwrap()
            .iter()
            .all(|n| workspace.contains(n.position)));
    }

    #[test]
    fn test_blocked_edge_is_discarded() {
        let mut planner = RrtStarPlanner::with_sampler(
            one_per_step(),
            Box::new(ScriptedSampler::new(vec![p(100.0, 0.0), p(0.0, 100.0)])),
        )
        .unwrap();
        // thin wall between x = 5 and x = 6; the step lands beyond it
        planner
            .configure(
                WorkspaceBounds::from_size(200.0, 200.0),
                vec![Obstacle::new(5.0, 0.0, 6.0, 10.0)],
            )
            .unwrap();
        planner.set_start(p(0.0, 0.0)).unwrap();
        planner.set_goal(p(100.0, 100.0), 5.0).unwrap();

        let result = planner.growth_step().unwrap();
        assert_eq!(result.attempts, 2);
        assert_eq!(planner.current_tree().unwrap().nodes()[1].position, p(0.0, 20.0));
    }

    #[test]
    fn test_cheapest_parent_is_chosen_over_nearest() {
        let config = PlannerConfig {
            nodes_per_step: 3,
            rrt_radius: 10.0,
            search_radius: 15.0,
            max_attempts_per_step: Some(10),
            ..Default::default()
        };
        // root (0,0) -> a (10,0) -> b (20,0); then a sample pulling from b
        // toward (20, 100) lands at (20, 10), which is within 15 of a
        let mut planner = scripted(
            config,
            vec![p(100.0, 0.0), p(100.0, 0.0), p(20.0, 100.0)],
        );
        planner.growth_step().unwrap();

        let tree = planner.current_tree().unwrap();
        let c = &tree.nodes()[3];
        assert_eq!(c.position, p(20.0, 10.0));
        // root is at distance sqrt(500) > 15, so a (cost 10) beats b (cost 20)
        assert_eq!(c.parent, Some(NodeId(1)));
        assert!((c.cost - (10.0 + 200.0_f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn test_rewire_skips_costlier_routes() {
        let config = PlannerConfig {
            nodes_per_step: 1,
            rrt_radius: 10.0,
            search_radius: 15.0,
            max_attempts_per_step: Some(10),
            ..Default::default()
        };
        let mut planner = scripted(config, vec![p(100.0, 0.0)]);
        // detour: root -> (0,10) -> (10,10) -> (10,0)
        {
            let tree = planner.tree.as_mut().unwrap();
            let up = tree.insert(p(0.0, 10.0), NodeId::ROOT, 10.0).unwrap();
            let over = tree.insert(p(10.0, 10.0), up, 20.0).unwrap();
            tree.insert(p(10.0, 0.0), over, 30.0).unwrap();
        }
        planner.growth_step().unwrap();

        // steered from (10,0) to (20,0); (10,10) at cost 20 is the cheapest neighbour
        let tree = planner.current_tree().unwrap();
        let new_node = &tree.nodes()[4];
        assert_eq!(new_node.position, p(20.0, 0.0));
        assert_eq!(new_node.parent, Some(NodeId(2)));

        // going through the new node would cost more for both neighbours
        assert_eq!(tree.nodes()[3].parent, Some(NodeId(2)));
        assert_eq!(tree.nodes()[3].cost, 30.0);
        assert!(planner
            .uncommitted_events()
            .iter()
            .all(|e| !matches!(e, PlanningEvent::NodeRewired { .. })));
    }

    #[test]
    fn test_rewire_lowers_neighbour_cost() {
        let config = PlannerConfig {
            nodes_per_step: 1,
            rrt_radius: 10.0,
            search_radius: 15.0,
            max_attempts_per_step: Some(10),
            ..Default::default()
        };
        let mut planner = scripted(config, vec![p(0.0, 100.0)]);
        // overpriced node behind the root, outside the sample's pull
        planner
            .tree
            .as_mut()
            .unwrap()
            .insert(p(5.0, -3.0), NodeId::ROOT, 400.0)
            .unwrap();
        planner.growth_step().unwrap();

        let tree = planner.current_tree().unwrap();
        let new_id = NodeId(2);
        assert_eq!(tree.nodes()[2].position, p(0.0, 10.0));
        assert_eq!(tree.nodes()[2].parent, Some(NodeId::ROOT));

        let rewired = &tree.nodes()[1];
        assert_eq!(rewired.parent, Some(new_id));
        let expected = 10.0 + distance(p(0.0, 10.0), p(5.0, -3.0));
        assert!((rewired.cost - expected).abs() < 1e-9);
        assert_eq!(tree.root().parent, None);

        let rewire_events: Vec<_> = planner
            .uncommitted_events()
            .iter()
            .filter_map(|e| match e {
                PlanningEvent::NodeRewired {
                    node,
                    old_cost,
                    new_cost,
                    ..
                } => Some((*node, *old_cost, *new_cost)),
                _ => None,
            })
            .collect();
        assert_eq!(rewire_events, vec![(NodeId(1), 400.0, expected)]);
    }

    #[test]
    fn test_goal_connection_and_path() {
        let config = PlannerConfig {
            nodes_per_step: 5,
            max_attempts_per_step: Some(50),
            ..Default::default()
        };
        let mut planner = scripted(config, vec![p(199.0, 0.0)]);
        let result = planner.growth_step().unwrap();
        assert!(result.goal_connected);

        let path = planner.current_path().unwrap().unwrap();
        assert_eq!(path.start(), Some(p(0.0, 0.0)));
        let end = path.end().unwrap();
        assert!(distance(end, p(100.0, 0.0)) <= 20.0);

        let goal = planner.goal_node().unwrap();
        assert_eq!(
            planner.current_tree().unwrap().node(goal).unwrap().role,
            NodeRole::Goal
        );
    }

    #[test]
    fn test_most_recent_goal_policy_overwrites() {
        let config = PlannerConfig {
            nodes_per_step: 6,
            max_attempts_per_step: Some(50),
            ..Default::default()
        };
        // chain along the x axis at roughly 20, 40, ..., 120
        let mut planner = scripted(config, vec![p(199.0, 0.0)]);
        planner.set_goal(p(100.0, 0.0), 25.0).unwrap();
        planner.growth_step().unwrap();

        let tree = planner.current_tree().unwrap();
        let goal = planner.goal_node().unwrap();
        assert!(distance(tree.node(goal).unwrap().position, p(120.0, 0.0)) < 1e-9);
        let goal_roles = tree.iter().filter(|n| n.role == NodeRole::Goal).count();
        assert_eq!(goal_roles, 1);
    }

    #[test]
    fn test_lowest_cost_goal_policy_keeps_cheapest() {
        let config = PlannerConfig {
            nodes_per_step: 6,
            max_attempts_per_step: Some(50),
            goal_policy: GoalPolicy::LowestCost,
            ..Default::default()
        };
        let mut planner = scripted(config, vec![p(199.0, 0.0)]);
        planner.set_goal(p(100.0, 0.0), 25.0).unwrap();
        planner.growth_step().unwrap();

        let tree = planner.current_tree().unwrap();
        let goal = planner.goal_node().unwrap();
        assert!(distance(tree.node(goal).unwrap().position, p(80.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_attempt_ceiling() {
        // every sample coincides with the root
        let mut planner = scripted(one_per_step(), vec![p(0.0, 0.0)]);
        match planner.growth_step() {
            Err(PlanningError::AttemptsExhausted {
                attempts,
                nodes_added,
            }) => {
                assert_eq!(attempts, 10);
                assert_eq!(nodes_added, 0);
            }
            other => panic!("Expected AttemptsExhausted, got {:?}", other),
        }
        assert_eq!(planner.current_tree().unwrap().len(), 1);
    }

    #[test]
    fn test_snap_to_grid_truncates() {
        let config = PlannerConfig {
            snap_to_grid: true,
            ..one_per_step()
        };
        let mut planner = scripted(config, vec![p(50.0, 50.0)]);
        planner.growth_step().unwrap();
        let node = &planner.current_tree().unwrap().nodes()[1];
        // 20 / sqrt(2) = 14.14...
        assert_eq!(node.position, p(14.0, 14.0));
        assert!((node.cost - distance(p(0.0, 0.0), p(14.0, 14.0))).abs() < 1e-9);
    }

    #[test]
    fn test_start_inside_obstacle_is_rejected() {
        let mut planner = RrtStarPlanner::new(one_per_step()).unwrap();
        planner
            .configure(
                WorkspaceBounds::from_size(100.0, 100.0),
                vec![Obstacle::new(0.0, 0.0, 10.0, 10.0)],
            )
            .unwrap();
        planner.set_start(p(5.0, 5.0)).unwrap();
        planner.set_goal(p(90.0, 90.0), 5.0).unwrap();
        assert!(matches!(
            planner.growth_step(),
            Err(PlanningError::Configuration { .. })
        ));
    }

    #[test]
    fn test_reset_keeps_root_only() {
        let mut planner = scripted(one_per_step(), vec![p(100.0, 0.0)]);
        planner.growth_step().unwrap();
        planner.reset();
        assert_eq!(planner.current_tree().unwrap().len(), 1);
        assert!(!planner.goal_connected());
        assert!(planner.current_path().unwrap().is_none());
    }

    #[test]
    fn test_events_are_drained_on_commit() {
        let mut planner = scripted(one_per_step(), vec![p(100.0, 0.0)]);
        planner.growth_step().unwrap();
        let types: Vec<_> = planner
            .uncommitted_events()
            .iter()
            .map(|e| e.event_type())
            .collect();
        assert_eq!(
            types,
            vec!["WorkspaceConfigured", "StartSet", "GoalSet", "NodeInserted", "StepCompleted"]
        );
        planner.mark_events_as_committed();
        assert!(planner.uncommitted_events().is_empty());
    }

    #[test]
    fn test_events_accumulate_until_committed() {
        let mut planner = scripted(one_per_step(), vec![p(0.0, 100.0)]);
        let inserted = |planner: &RrtStarPlanner| {
            planner
                .uncommitted_events()
                .iter()
                .filter(|e| matches!(e, PlanningEvent::NodeInserted { .. }))
                .count()
        };

        planner.growth_step().unwrap();
        planner.growth_step().unwrap();
        assert_eq!(inserted(&planner), 2);

        planner.mark_events_as_committed();
        planner.growth_step().unwrap();
        assert_eq!(inserted(&planner), 1);
        assert_eq!(planner.uncommitted_events().len(), 2);
    }
}
