//! Stepwise shortest-path search on 4-connected grids.
//!
//! A run is advanced one expansion at a time so a host can repaint the
//! grid between steps and cancel cooperatively:
//!
//! - **Best-first** search ordered by `path_length + W * heuristic`
//!   ([`Algorithm::BestFirst`])
//! - **Insertion-order** search, expanding in discovery order
//!   ([`Algorithm::InsertionOrder`])
//!
//! [`RunController`] is the usual entry point; [`StepEngine`] can be
//! driven directly when the caller wants to own the loop.
//!
//! # Module map
//!
//! | Module | Role |
//! |---|---|
//! | [`cost`] | heuristic and priority functions |
//! | [`node`] | search nodes and their per-run arena |
//! | [`frontier`] | open/closed sets and neighbor admission |
//! | [`engine`] | the per-step state machine |
//! | [`route`] | route reconstruction |
//! | [`controller`] | validation, pacing, failure flash, reset |

pub mod config;
pub mod controller;
pub mod cost;
pub mod engine;
mod error;
pub mod frontier;
mod neighbors;
pub mod node;
pub mod route;
mod traits;

pub use config::SearchConfig;
pub use controller::{RunController, RunReport};
pub use cost::{heuristic_distance, manhattan, priority};
pub use engine::{Algorithm, RunState, Step, StepEngine};
pub use error::SearchError;
pub use neighbors::Neighbors;
pub use node::{NodeArena, NodeId, SearchNode};
pub use route::Route;
pub use traits::{Headless, Host};
