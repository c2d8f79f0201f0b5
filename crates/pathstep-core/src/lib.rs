//! **pathstep-core**: grid model for a stepwise shortest-path visualizer.
//!
//! This crate provides the data the search engine and its renderer share:
//! geometry primitives, cells with their role and visualization flags, the
//! grid that owns them, and the cooperative reset signal.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod signal;

pub use cell::{Cell, Mark, Role};
pub use geom::{Point, Range};
pub use grid::{DEFAULT_WALL_DENSITY, Grid};
pub use signal::ResetHandle;
