//! Search nodes and the per-run arena that owns them.
//!
//! Parent links are stored as [`NodeId`] indices into the arena, so the
//! search tree has no reference cycles and re-parenting is an index write.
//! The arena is append-only for the lifetime of a run: relaxation creates
//! a fresh node instead of mutating the old one, which means descendants
//! of a relaxed node keep pointing at its previous incarnation.

use std::fmt;

use pathstep_core::Point;

use crate::cost;

/// Index of a [`SearchNode`] in a [`NodeArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Search-time wrapper around a grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    /// Node this one was reached from; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Flat index of the wrapped cell.
    pub cell: usize,
    /// Coordinate of the wrapped cell.
    pub pos: Point,
    /// Squared distance to the goal, fixed at creation.
    pub heuristic: i64,
    /// Ordering cost, fixed at creation.
    pub priority: i64,
}

/// Append-only storage for the nodes of one run.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node for `cell` at `pos`, hanging off `parent`.
    ///
    /// The heuristic is measured against `goal` and the priority uses the
    /// path length of the new node as it stands now.
    pub fn push(
        &mut self,
        parent: Option<NodeId>,
        cell: usize,
        pos: Point,
        goal: Point,
        weight: i64,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let heuristic = cost::heuristic_distance(goal, pos);
        let path_length = parent.map_or(0, |p| self.path_length(p) + 1);
        self.nodes.push(SearchNode {
            parent,
            cell,
            pos,
            heuristic,
            priority: cost::priority(path_length, heuristic, weight),
        });
        id
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Number of parent links from `id` up to the root.
    ///
    /// Walks the chain every time so the answer always reflects the
    /// node's current parent.
    pub fn path_length(&self, id: NodeId) -> u32 {
        let mut len = 0;
        let mut cur = id;
        while let Some(p) = self.parent(cur) {
            len += 1;
            cur = p;
        }
        len
    }

    /// Iterate from `id` up to and including the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: Some(id),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

/// Iterator over a node and its ancestors, see [`NodeArena::ancestors`].
pub struct Ancestors<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let cur = self.next?;
        self.next = self.arena.parent(cur);
        Some(cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(arena: &mut NodeArena, len: i32, goal: Point) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut parent = None;
        for x in 0..len {
            let id = arena.push(parent, x as usize, Point::new(x, 0), goal, 2);
            ids.push(id);
            parent = Some(id);
        }
        ids
    }

    #[test]
    fn root_has_zero_length() {
        let mut arena = NodeArena::new();
        let root = arena.push(None, 0, Point::ZERO, Point::new(3, 4), 2);
        assert_eq!(arena.path_length(root), 0);
        assert_eq!(arena.get(root).heuristic, 25);
        assert_eq!(arena.get(root).priority, 50);
    }

    #[test]
    fn path_length_counts_links() {
        let mut arena = NodeArena::new();
        let goal = Point::new(9, 0);
        let ids = chain(&mut arena, 5, goal);
        assert_eq!(arena.path_length(ids[4]), 4);
        // priority = 4 + 2 * (5^2)
        assert_eq!(arena.get(ids[4]).priority, 54);
        assert_eq!(arena.ancestors(ids[4]).count(), 5);
        assert_eq!(arena.ancestors(ids[4]).last(), Some(ids[0]));
    }

    #[test]
    fn relaxed_node_does_not_touch_descendants() {
        let mut arena = NodeArena::new();
        let goal = Point::new(9, 9);
        let ids = chain(&mut arena, 4, goal);
        let child = arena.push(Some(ids[3]), 10, Point::new(3, 1), goal, 2);
        // Re-create ids[3]'s cell directly under the root.
        let relaxed = arena.push(Some(ids[0]), 3, Point::new(3, 0), goal, 2);
        assert_eq!(arena.path_length(relaxed), 1);
        assert_eq!(arena.path_length(child), 4);
    }
}
