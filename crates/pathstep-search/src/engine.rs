//! The step engine: one search, advanced one expansion at a time.
//!
//! A [`StepEngine`] owns the node arena and the frontier of a single run.
//! Each call to [`StepEngine::step`] performs exactly one state transition
//! and leaves the grid's visualization marks consistent with the open and
//! closed sets, so the host can repaint between calls.

use std::fmt;
use std::time::Duration;

use pathstep_core::{Grid, Mark, Point, ResetHandle};

use crate::error::SearchError;
use crate::frontier::{Frontier, Slot};
use crate::node::{NodeArena, NodeId};
use crate::route::{self, Route};
use crate::traits::Host;

/// Which open-set member is expanded next.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Lowest `path_length + W * heuristic` first.
    BestFirst,
    /// Earliest discovered first. Explores breadth-first rather than by
    /// cost.
    InsertionOrder,
}

impl Algorithm {
    pub fn label(self) -> &'static str {
        match self {
            Self::BestFirst => "best-first",
            Self::InsertionOrder => "insertion-order",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle of a run.
///
/// `Succeeded`, `Failed` and `Cancelled` are terminal until the next run
/// request. `Failed` never carries [`SearchError::Cancelled`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Succeeded { route_length: usize },
    Failed(SearchError),
    Cancelled,
}

impl RunState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Idle | Self::Running)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Running => f.write_str("running"),
            Self::Succeeded { route_length } => write!(f, "route found ({route_length} steps)"),
            Self::Failed(e) => write!(f, "failed: {e}"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Result of one [`StepEngine::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// `node` was moved to the closed set and its neighbors admitted.
    /// `receding` is set when `node` is farther from the goal than its
    /// parent.
    Expanded { node: NodeId, receding: bool },
    /// The goal was selected.
    Succeeded { goal: NodeId },
    /// The open set ran dry.
    Failed(SearchError),
    /// A reset was requested; sets and marks have been cleared.
    Cancelled,
}

/// One search run over a grid.
pub struct StepEngine {
    algorithm: Algorithm,
    arena: NodeArena,
    frontier: Frontier,
    goal: Point,
    goal_cell: usize,
    state: RunState,
    reset: ResetHandle,
    found: Option<NodeId>,
    steps: usize,
}

impl StepEngine {
    /// Build the root node at `start` and seed the open set from it.
    ///
    /// The root is placed in the closed set and expanded once. When
    /// `start == goal` the engine starts out `Succeeded` with a route of
    /// length zero and nothing is expanded.
    pub fn new(
        grid: &mut Grid,
        start: Point,
        goal: Point,
        algorithm: Algorithm,
        weight: i64,
        reset: ResetHandle,
    ) -> Result<Self, SearchError> {
        let start_cell = grid.idx(start).ok_or(SearchError::OutOfGrid(start))?;
        let goal_cell = grid.idx(goal).ok_or(SearchError::OutOfGrid(goal))?;

        let mut arena = NodeArena::new();
        let mut frontier = Frontier::new(algorithm, grid.len(), weight);
        let root = arena.push(None, start_cell, start, goal, weight);

        let (state, found) = if start_cell == goal_cell {
            (RunState::Succeeded { route_length: 0 }, Some(root))
        } else {
            frontier.close(start_cell, root);
            frontier.expand(&mut arena, grid, root, goal);
            (RunState::Running, None)
        };

        let mut engine = Self {
            algorithm,
            arena,
            frontier,
            goal,
            goal_cell,
            state,
            reset,
            found,
            steps: 0,
        };
        engine.sync_marks(grid);
        Ok(engine)
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Number of expansions performed so far (the seeding expansion of the
    /// root is not counted).
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn relaxations(&self) -> usize {
        self.frontier.relaxations()
    }

    #[inline]
    pub fn open_len(&self) -> usize {
        self.frontier.open_len()
    }

    #[inline]
    pub fn closed_len(&self) -> usize {
        self.frontier.closed_len()
    }

    #[inline]
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// The goal node once the run has succeeded.
    #[inline]
    pub fn goal_node(&self) -> Option<NodeId> {
        self.found
    }

    /// Perform one transition.
    ///
    /// Calling `step` on a finished engine reports the terminal state again
    /// without doing anything.
    pub fn step(&mut self, grid: &mut Grid) -> Step {
        match self.state {
            RunState::Running => {}
            RunState::Succeeded { .. } => {
                return self
                    .found
                    .map_or(Step::Cancelled, |goal| Step::Succeeded { goal });
            }
            RunState::Failed(e) => return Step::Failed(e),
            RunState::Cancelled | RunState::Idle => return Step::Cancelled,
        }

        if self.reset.is_requested() {
            self.cancel(grid);
            return Step::Cancelled;
        }

        let Some(current) = self.frontier.select() else {
            log::debug!("open set exhausted after {} steps", self.steps);
            self.state = RunState::Failed(SearchError::NoRouteExists);
            return Step::Failed(SearchError::NoRouteExists);
        };

        let node = self.arena.get(current);
        if node.cell == self.goal_cell {
            let route_length = self.arena.path_length(current) as usize;
            self.state = RunState::Succeeded { route_length };
            self.found = Some(current);
            return Step::Succeeded { goal: current };
        }

        let cell = node.cell;
        let receding = node
            .parent
            .is_some_and(|p| self.arena.get(p).heuristic < node.heuristic);

        self.frontier.close(cell, current);
        self.frontier.expand(&mut self.arena, grid, current, self.goal);
        self.sync_marks(grid);
        self.steps += 1;

        log::trace!(
            "step {}: expanded {} at {} (open {}, closed {})",
            self.steps,
            current,
            grid.point(cell),
            self.frontier.open_len(),
            self.frontier.closed_len()
        );

        Step::Expanded {
            node: current,
            receding,
        }
    }

    /// Abandon the run: empty both sets and clear every visualization mark.
    pub fn cancel(&mut self, grid: &mut Grid) {
        self.frontier.clear();
        self.arena.clear();
        self.found = None;
        grid.clear_marks();
        self.state = RunState::Cancelled;
        log::debug!("run cancelled after {} steps", self.steps);
    }

    /// Trace the route of a successful run and mark it on the grid.
    ///
    /// Returns `None` unless the engine has succeeded.
    pub fn reconstruct<H: Host + ?Sized>(
        &self,
        grid: &mut Grid,
        host: &mut H,
        delay: Duration,
    ) -> Option<Route> {
        let goal = self.found?;
        Some(route::reconstruct(&self.arena, goal, grid, host, delay))
    }

    /// Copy set membership of every changed cell onto the grid marks.
    fn sync_marks(&mut self, grid: &mut Grid) {
        for cell in self.frontier.take_changed() {
            let mark = match self.frontier.slot(cell) {
                Slot::Open(_) => Some(Mark::Open),
                Slot::Closed(_) => Some(Mark::Closed),
                Slot::Unseen => None,
            };
            grid.set_mark(cell, mark);
        }
    }
}
