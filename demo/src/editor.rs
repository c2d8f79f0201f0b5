//! Editor state between runs: cursor, brush and the status line.

use pathstep_core::{Grid, Point, ResetHandle, Role};
use pathstep_search::{Algorithm, Host, RunController, SearchError};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::input::Action;

const KEY_HELP: &str =
    "[a] best-first [b] insertion-order [r] reset [g] walls [c] clear [q] quit";

/// What the main loop should do after an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Run(Algorithm),
    Quit,
}

pub struct Editor {
    ctl: RunController,
    cursor: Point,
    brush: Role,
    wall_density: f64,
    rng: StdRng,
    status: String,
}

impl Editor {
    pub fn new(ctl: RunController, wall_density: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut ed = Self {
            ctl,
            cursor: Point::ZERO,
            brush: Role::Wall,
            wall_density,
            rng,
            status: String::new(),
        };
        ed.refresh_status();
        ed
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        self.ctl.grid()
    }

    #[inline]
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    #[inline]
    pub fn brush(&self) -> Role {
        self.brush
    }

    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn reset_handle(&self) -> ResetHandle {
        self.ctl.reset_handle()
    }

    /// Fill the grid with random walls, start in the top-left corner and
    /// end in the bottom-right one.
    pub fn randomize(&mut self) {
        self.ctl.request_reset();
        self.ctl
            .grid_mut()
            .randomize_walls(&mut self.rng, self.wall_density);
        self.refresh_status();
    }

    /// Apply an editing action. Runs are handed back to the caller, which
    /// owns the host.
    pub fn handle(&mut self, action: Action) -> Flow {
        match action {
            Action::Move { dx, dy } => {
                let next = self.cursor.shift(dx, dy);
                if self.grid().contains(next) {
                    self.cursor = next;
                }
            }
            Action::Paint => self.ctl.set_cell_role(self.cursor, self.brush),
            Action::Brush(role) => self.brush = role,
            Action::Run(algorithm) => return Flow::Run(algorithm),
            Action::Reset => self.ctl.request_reset(),
            Action::RandomWalls => self.randomize(),
            Action::Clear => {
                let size = self.grid().width();
                self.ctl.rebuild_grid(size);
            }
            Action::Quit => return Flow::Quit,
        }
        self.refresh_status();
        Flow::Continue
    }

    /// Run `algorithm` through `host` and summarize the outcome.
    pub fn run<H: Host + ?Sized>(&mut self, algorithm: Algorithm, host: &mut H) {
        self.status = match self.ctl.run_search(algorithm, host) {
            Ok(report) => format!(
                "{algorithm}: route of {} in {} steps ({} relaxed)",
                report.route_length(),
                report.steps,
                report.relaxations
            ),
            Err(SearchError::Cancelled) => format!("{algorithm}: cancelled"),
            Err(e) => format!("{algorithm}: {e}"),
        };
    }

    /// Status text shown while `algorithm` runs.
    pub fn running_status(algorithm: Algorithm) -> String {
        format!("{algorithm}: running  [r] cancel  [q] quit")
    }

    fn refresh_status(&mut self) {
        let brush = match self.brush {
            Role::Wall => "wall",
            Role::Start => "start",
            Role::End => "end",
        };
        self.status = format!("{} | brush: {brush} | {KEY_HELP}", self.ctl.state());
    }
}
