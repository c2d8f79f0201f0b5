//! Route reconstruction from the goal node back to the root.

use std::time::Duration;

use pathstep_core::{Grid, Mark, Point};

use crate::node::{NodeArena, NodeId};
use crate::traits::Host;

/// A reconstructed route, start first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    points: Vec<Point>,
}

impl Route {
    /// Follow parent links from `goal` to the root without touching the
    /// grid.
    pub fn trace(arena: &NodeArena, goal: NodeId) -> Self {
        let mut points: Vec<Point> = arena.ancestors(goal).map(|id| arena.get(id).pos).collect();
        points.reverse();
        Self { points }
    }

    /// Number of edges from start to goal.
    #[inline]
    pub fn length(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Every cell on the route, start and goal included.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    #[inline]
    pub fn goal(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Whether each consecutive pair of points is one cardinal step apart.
    pub fn is_contiguous(&self) -> bool {
        self.points.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }
}

/// Walk parent links from `goal`, marking every node that has a parent as
/// part of the route and notifying `host` after each one.
///
/// The root (start) cell keeps its existing mark.
pub fn reconstruct<H: Host + ?Sized>(
    arena: &NodeArena,
    goal: NodeId,
    grid: &mut Grid,
    host: &mut H,
    delay: Duration,
) -> Route {
    for id in arena.ancestors(goal) {
        let node = arena.get(id);
        if node.parent.is_none() {
            break;
        }
        grid.set_mark(node.cell, Some(Mark::Route));
        host.notify_changed(grid);
        host.pause(delay);
    }
    let route = Route::trace(arena, goal);
    log::debug!("route reconstructed: {} steps", route.length());
    route
}
