//! Terminal front end for pathstep.
//!
//! | Module     | Role                                          |
//! |------------|-----------------------------------------------|
//! | [`input`]  | key events to editor [`Action`]s              |
//! | [`render`] | crossterm painting of the grid and status     |
//! | [`editor`] | cursor, brush and the run controller          |
//! | [`host`]   | the [`pathstep_search::Host`] used during runs |

pub mod editor;
pub mod host;
pub mod input;
pub mod render;

pub use editor::{Editor, Flow};
pub use host::TerminalHost;
pub use input::{Action, to_action};
pub use render::Screen;
