//! The run controller: owns the grid between and during runs.
//!
//! [`RunController::run_search`] validates the endpoints, drives a
//! [`StepEngine`] to a terminal state with the host repainting and pausing
//! between steps, then either marks the route or shows the failure flash.
//! Everything happens on the caller's thread; the only way in while a run
//! is active is the [`ResetHandle`], which the engine polls at each step
//! boundary.

use std::time::Duration;

use pathstep_core::{Grid, Point, ResetHandle, Role};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SearchConfig;
use crate::engine::{Algorithm, RunState, Step, StepEngine};
use crate::error::SearchError;
use crate::route::Route;
use crate::traits::Host;

const ONE_MS: Duration = Duration::from_millis(1);

/// What a successful run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub route: Route,
    /// Expansions performed before the goal was selected.
    pub steps: usize,
    /// Times a recorded path was replaced by a shorter one.
    pub relaxations: usize,
}

impl RunReport {
    #[inline]
    pub fn route_length(&self) -> usize {
        self.route.length()
    }
}

/// Owner of the grid and of the run lifecycle.
pub struct RunController {
    grid: Grid,
    config: SearchConfig,
    weight: i64,
    reset: ResetHandle,
    state: RunState,
    rng: StdRng,
    engine: Option<StepEngine>,
}

impl RunController {
    pub fn new(grid: Grid, config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            grid,
            weight: config.effective_weight(),
            config,
            reset: ResetHandle::new(),
            state: RunState::Idle,
            rng,
            engine: None,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access for edits between runs.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// A handle the host can use to cancel a run from inside its callbacks.
    pub fn reset_handle(&self) -> ResetHandle {
        self.reset.clone()
    }

    /// Sizes of the open and closed sets left by the last run.
    pub fn frontier_sizes(&self) -> (usize, usize) {
        self.engine
            .as_ref()
            .map_or((0, 0), |e| (e.open_len(), e.closed_len()))
    }

    /// Toggle `role` on the cell at `p`, clearing its other roles.
    pub fn set_cell_role(&mut self, p: Point, role: Role) {
        self.grid.set_role(p, role);
    }

    /// Replace the grid with a fresh `size × size` one.
    pub fn rebuild_grid(&mut self, size: i32) {
        self.grid = Grid::new(size);
        self.clear_run();
    }

    /// Clear the frontier and every visualization mark; state becomes
    /// `Idle`. Calling it repeatedly has the same effect as calling it once.
    ///
    /// To cancel a run that is in flight, use [`reset_handle`] from inside
    /// the host instead.
    ///
    /// [`reset_handle`]: Self::reset_handle
    pub fn request_reset(&mut self) {
        // No run can be in flight while we hold `&mut self`.
        self.reset.take();
        self.clear_run();
    }

    /// Run `algorithm` to completion, repainting through `host`.
    ///
    /// Returns the route on success. On [`SearchError::InvalidEndpoints`]
    /// or [`SearchError::NoRouteExists`] the failure flash is shown. On
    /// [`SearchError::Cancelled`] the grid is left without marks and the
    /// state stays `Cancelled`. A reset requested during route marking or
    /// the flash is honored before returning.
    pub fn run_search<H: Host + ?Sized>(
        &mut self,
        algorithm: Algorithm,
        host: &mut H,
    ) -> Result<RunReport, SearchError> {
        self.reset.take();
        self.clear_run();

        let result = self.drive(algorithm, host);

        match &result {
            Ok(report) => log::info!(
                "{algorithm}: route of {} found after {} steps",
                report.route_length(),
                report.steps
            ),
            Err(e) => log::info!("{algorithm}: {e}"),
        }

        if self.reset.take() {
            self.clear_run();
            host.notify_changed(&self.grid);
        }
        result
    }

    fn drive<H: Host + ?Sized>(
        &mut self,
        algorithm: Algorithm,
        host: &mut H,
    ) -> Result<RunReport, SearchError> {
        let (start, goal) = match self.endpoints() {
            Ok(endpoints) => endpoints,
            Err(e) => {
                log::warn!("run rejected: {e}");
                self.state = RunState::Failed(e);
                self.show_failure(host);
                return Err(e);
            }
        };

        log::debug!("{algorithm}: searching from {start} to {goal}");
        let mut engine = StepEngine::new(
            &mut self.grid,
            start,
            goal,
            algorithm,
            self.weight,
            self.reset.clone(),
        )?;
        self.state = RunState::Running;
        host.notify_changed(&self.grid);

        let mut delay = self.config.step_delay();
        let chance = self.config.decay_chance();

        let outcome = loop {
            match engine.step(&mut self.grid) {
                Step::Expanded { receding, .. } => {
                    if receding && !delay.is_zero() && self.rng.random_bool(chance) {
                        delay = delay.saturating_sub(ONE_MS);
                    }
                    host.notify_changed(&self.grid);
                    host.pause(delay);
                }
                done => break done,
            }
        };

        self.state = engine.state();
        let result = match outcome {
            Step::Succeeded { .. } => {
                let route = engine
                    .reconstruct(&mut self.grid, host, self.config.route_delay())
                    .ok_or(SearchError::NoRouteExists)?;
                Ok(RunReport {
                    algorithm,
                    route,
                    steps: engine.steps(),
                    relaxations: engine.relaxations(),
                })
            }
            Step::Failed(e) => {
                self.show_failure(host);
                Err(e)
            }
            Step::Cancelled | Step::Expanded { .. } => {
                // The request is spent on this cancellation.
                self.reset.take();
                host.notify_changed(&self.grid);
                Err(SearchError::Cancelled)
            }
        };
        self.engine = Some(engine);
        result
    }

    /// Exactly one start and one end, or `InvalidEndpoints`.
    fn endpoints(&self) -> Result<(Point, Point), SearchError> {
        let starts = self.grid.cells_with_role(Role::Start);
        let ends = self.grid.cells_with_role(Role::End);
        match (starts.as_slice(), ends.as_slice()) {
            ([start], [end]) => Ok((*start, *end)),
            _ => Err(SearchError::InvalidEndpoints {
                starts: starts.len(),
                ends: ends.len(),
            }),
        }
    }

    /// Blink the whole grid. A reset requested during the blink cuts it
    /// short and leaves the flash off.
    fn show_failure<H: Host + ?Sized>(&mut self, host: &mut H) {
        let phase = self.config.flash_delay();
        for _ in 0..self.config.flash_count {
            for on in [true, false] {
                if self.reset.is_requested() {
                    log::debug!("failure flash cut short by reset");
                    self.grid.set_flashing(false);
                    return;
                }
                self.grid.set_flashing(on);
                host.notify_changed(&self.grid);
                host.pause(phase);
            }
        }
    }

    fn clear_run(&mut self) {
        self.engine = None;
        self.grid.clear_marks();
        self.state = RunState::Idle;
    }
}
