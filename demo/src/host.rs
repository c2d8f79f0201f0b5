//! The terminal [`Host`]: repaints on every change and keeps reading keys
//! while the search pauses, so a run can be cancelled mid-flight.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event;
use pathstep_core::{Grid, Point, ResetHandle};
use pathstep_search::Host;

use crate::input::{Action, to_action};
use crate::render::Screen;

pub struct TerminalHost<'a> {
    screen: &'a mut Screen,
    reset: ResetHandle,
    cursor: Point,
    status: String,
    quit: bool,
    error: Option<io::Error>,
}

impl<'a> TerminalHost<'a> {
    pub fn new(screen: &'a mut Screen, reset: ResetHandle, cursor: Point, status: String) -> Self {
        Self {
            screen,
            reset,
            cursor,
            status,
            quit: false,
            error: None,
        }
    }

    /// Whether the user asked to quit during the run.
    #[inline]
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// The first terminal error seen during the run, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    // A broken terminal ends the run; the error surfaces afterwards.
    fn fail(&mut self, e: io::Error) {
        log::error!("terminal error during run: {e}");
        self.reset.request();
        self.error.get_or_insert(e);
    }

    fn on_event(&mut self, ev: &event::Event) {
        match to_action(ev) {
            Some(Action::Reset) => {
                log::debug!("reset requested mid-run");
                self.reset.request();
            }
            Some(Action::Quit) => {
                self.reset.request();
                self.quit = true;
            }
            _ => {}
        }
    }
}

impl Host for TerminalHost<'_> {
    fn notify_changed(&mut self, grid: &Grid) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.screen.draw(grid, Some(self.cursor), &self.status) {
            self.fail(e);
        }
    }

    fn pause(&mut self, delay: Duration) {
        let deadline = Instant::now() + delay;
        while self.error.is_none() {
            let left = deadline.saturating_duration_since(Instant::now());
            match event::poll(left) {
                Ok(true) => match event::read() {
                    Ok(ev) => self.on_event(&ev),
                    Err(e) => self.fail(e),
                },
                Ok(false) => return,
                Err(e) => self.fail(e),
            }
        }
    }
}
