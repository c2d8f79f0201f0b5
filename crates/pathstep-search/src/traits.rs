use std::time::Duration;

use pathstep_core::Grid;

/// The collaborator that displays a run.
///
/// The search calls [`notify_changed`](Host::notify_changed) after every
/// mutation of the grid's marks and [`pause`](Host::pause) for pacing. Both
/// run on the search's own thread; a host that wants to cancel keeps a
/// [`ResetHandle`](pathstep_core::ResetHandle) and requests a reset from
/// inside either callback.
pub trait Host {
    /// The grid changed; redraw it.
    fn notify_changed(&mut self, grid: &Grid);

    /// Wait `delay` before the next step. Defaults to sleeping the thread.
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// A host that draws nothing and never waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Host for Headless {
    fn notify_changed(&mut self, _grid: &Grid) {}

    fn pause(&mut self, _delay: Duration) {}
}
