use pathstep_core::Point;
use thiserror::Error;

/// Why a run did not produce a route. Every variant is recoverable: the
/// controller accepts a new run right away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The grid does not hold exactly one start and one end.
    #[error("expected exactly one start and one end, found {starts} start(s) and {ends} end(s)")]
    InvalidEndpoints { starts: usize, ends: usize },

    /// An endpoint handed directly to the engine lies outside the grid.
    #[error("point {0} is outside the grid")]
    OutOfGrid(Point),

    /// The open set was exhausted before the goal was reached.
    #[error("no route exists")]
    NoRouteExists,

    /// A reset was requested while the run was in flight.
    #[error("search cancelled")]
    Cancelled,
}
