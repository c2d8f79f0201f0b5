//! Open/closed set bookkeeping and neighbor admission.
//!
//! Every grid cell has a [`Slot`] saying whether it is unseen, in the open
//! set, or in the closed set, and which node currently represents it. The
//! open set additionally keeps an ordering structure for selection: a
//! min-heap on `(priority, seq)` for best-first search, or a FIFO on `seq`
//! for insertion-order search. Entries that were superseded by relaxation
//! stay in the ordering structure and are skipped when popped.

use std::collections::{BinaryHeap, VecDeque};

use pathstep_core::{Grid, Point};

use crate::engine::Algorithm;
use crate::neighbors::Neighbors;
use crate::node::{NodeArena, NodeId};

/// Membership of one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Slot {
    #[default]
    Unseen,
    Open(NodeId),
    Closed(NodeId),
}

/// Open-set entry, ordered so `BinaryHeap` (a max-heap) pops the lowest
/// priority first and, among equal priorities, the earliest inserted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Entry {
    priority: i64,
    seq: u64,
    cell: usize,
    node: NodeId,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

enum OpenOrder {
    Priority(BinaryHeap<Entry>),
    Insertion(VecDeque<Entry>),
}

impl OpenOrder {
    fn push(&mut self, e: Entry) {
        match self {
            Self::Priority(heap) => heap.push(e),
            Self::Insertion(queue) => queue.push_back(e),
        }
    }

    fn pop(&mut self) -> Option<Entry> {
        match self {
            Self::Priority(heap) => heap.pop(),
            Self::Insertion(queue) => queue.pop_front(),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Priority(heap) => heap.clear(),
            Self::Insertion(queue) => queue.clear(),
        }
    }
}

/// The open and closed sets of one run.
pub struct Frontier {
    slots: Vec<Slot>,
    order: OpenOrder,
    seq: u64,
    weight: i64,
    open_len: usize,
    closed_len: usize,
    relaxations: usize,
    // cells whose slot changed since the last `take_changed`
    changed: Vec<usize>,
    nbuf: Neighbors,
}

impl Frontier {
    /// Empty sets for a grid of `cells` cells.
    pub fn new(algorithm: Algorithm, cells: usize, weight: i64) -> Self {
        let order = match algorithm {
            Algorithm::BestFirst => OpenOrder::Priority(BinaryHeap::new()),
            Algorithm::InsertionOrder => OpenOrder::Insertion(VecDeque::new()),
        };
        Self {
            slots: vec![Slot::Unseen; cells],
            order,
            seq: 0,
            weight,
            open_len: 0,
            closed_len: 0,
            relaxations: 0,
            changed: Vec::new(),
            nbuf: Neighbors::new(),
        }
    }

    #[inline]
    pub fn slot(&self, cell: usize) -> Slot {
        self.slots[cell]
    }

    #[inline]
    pub fn open_len(&self) -> usize {
        self.open_len
    }

    #[inline]
    pub fn closed_len(&self) -> usize {
        self.closed_len
    }

    /// Number of times a cheaper path replaced a recorded one.
    #[inline]
    pub fn relaxations(&self) -> usize {
        self.relaxations
    }

    /// Put `node` into the open set as the representative of `cell`,
    /// replacing any previous open entry for that cell. The entry is
    /// ordered behind everything already in the set.
    pub fn open(&mut self, arena: &NodeArena, cell: usize, node: NodeId) {
        match self.slots[cell] {
            Slot::Open(_) => {}
            Slot::Closed(_) => {
                self.closed_len -= 1;
                self.open_len += 1;
            }
            Slot::Unseen => self.open_len += 1,
        }
        self.slots[cell] = Slot::Open(node);
        let seq = self.seq;
        self.seq += 1;
        self.order.push(Entry {
            priority: arena.get(node).priority,
            seq,
            cell,
            node,
        });
        self.changed.push(cell);
    }

    /// Put `node` into the closed set as the representative of `cell`.
    pub fn close(&mut self, cell: usize, node: NodeId) {
        match self.slots[cell] {
            Slot::Closed(_) => {}
            Slot::Open(_) => {
                self.open_len -= 1;
                self.closed_len += 1;
            }
            Slot::Unseen => self.closed_len += 1,
        }
        self.slots[cell] = Slot::Closed(node);
        self.changed.push(cell);
    }

    /// Pick the next open node without removing it from the open set.
    ///
    /// Best-first returns the lowest priority (earliest inserted on ties);
    /// insertion-order returns the earliest inserted. Returns `None` when
    /// the open set is empty.
    pub fn select(&mut self) -> Option<NodeId> {
        while let Some(e) = self.order.pop() {
            if self.slots[e.cell] == Slot::Open(e.node) {
                return Some(e.node);
            }
            // Superseded by relaxation or already closed.
        }
        None
    }

    /// Admit the passable cardinal neighbors of `current`.
    ///
    /// - a closed neighbor whose recorded path is longer than going
    ///   through `current` is re-settled in the closed set under `current`;
    /// - an open neighbor in the same situation gets a replacement entry;
    /// - an unseen neighbor is opened under `current`;
    /// - anything else is left alone.
    pub fn expand(&mut self, arena: &mut NodeArena, grid: &Grid, current: NodeId, goal: Point) {
        let through_current = arena.path_length(current) + 1;
        let pos = arena.get(current).pos;

        let mut nbuf = std::mem::take(&mut self.nbuf);

        for &ni in nbuf.passable(grid, pos) {
            match self.slots[ni] {
                Slot::Closed(old) if arena.path_length(old) > through_current => {
                    let node = arena.push(Some(current), ni, grid.point(ni), goal, self.weight);
                    self.close(ni, node);
                    self.relaxations += 1;
                }
                Slot::Open(old) if arena.path_length(old) > through_current => {
                    let node = arena.push(Some(current), ni, grid.point(ni), goal, self.weight);
                    self.open(arena, ni, node);
                    self.relaxations += 1;
                }
                Slot::Unseen => {
                    let node = arena.push(Some(current), ni, grid.point(ni), goal, self.weight);
                    self.open(arena, ni, node);
                }
                Slot::Open(_) | Slot::Closed(_) => {}
            }
        }

        self.nbuf = nbuf;
    }

    /// Cells whose membership changed since the previous call.
    pub fn take_changed(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.changed)
    }

    /// Forget every node.
    pub fn clear(&mut self) {
        for s in self.slots.iter_mut() {
            *s = Slot::Unseen;
        }
        self.order.clear();
        self.changed.clear();
        self.open_len = 0;
        self.closed_len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathstep_core::Role;

    const W: i64 = 2;

    fn node_at(
        arena: &mut NodeArena,
        g: &Grid,
        parent: Option<NodeId>,
        p: Point,
        goal: Point,
    ) -> NodeId {
        arena.push(parent, g.idx(p).unwrap(), p, goal, W)
    }

    #[test]
    fn expand_opens_unseen_neighbors() {
        let g = Grid::new(3);
        let goal = Point::new(2, 2);
        let mut arena = NodeArena::new();
        let mut f = Frontier::new(Algorithm::InsertionOrder, g.len(), W);
        let root = node_at(&mut arena, &g, None, Point::new(1, 1), goal);
        f.close(g.idx(Point::new(1, 1)).unwrap(), root);
        f.expand(&mut arena, &g, root, goal);
        assert_eq!(f.open_len(), 4);
        assert_eq!(f.closed_len(), 1);
        // Insertion order follows neighbor order: up, right, down, left.
        let first = f.select().unwrap();
        assert_eq!(arena.get(first).pos, Point::new(1, 0));
        assert_eq!(arena.parent(first), Some(root));
    }

    #[test]
    fn expand_skips_walls_and_edges() {
        let mut g = Grid::new(3);
        g.set_role(Point::new(1, 0), Role::Wall);
        let goal = Point::new(2, 2);
        let mut arena = NodeArena::new();
        let mut f = Frontier::new(Algorithm::BestFirst, g.len(), W);
        let root = node_at(&mut arena, &g, None, Point::ZERO, goal);
        f.close(0, root);
        f.expand(&mut arena, &g, root, goal);
        assert_eq!(f.open_len(), 1);
        assert!(matches!(f.slot(g.idx(Point::new(0, 1)).unwrap()), Slot::Open(_)));
    }

    #[test]
    fn best_first_selects_lowest_priority_then_earliest() {
        let g = Grid::new(5);
        let goal = Point::new(4, 4);
        let mut arena = NodeArena::new();
        let mut f = Frontier::new(Algorithm::BestFirst, g.len(), W);
        let root = node_at(&mut arena, &g, None, Point::ZERO, goal);
        f.close(0, root);
        f.expand(&mut arena, &g, root, goal);
        // (1, 0) and (0, 1) tie; (1, 0) was discovered first.
        let n = f.select().unwrap();
        assert_eq!(arena.get(n).pos, Point::new(1, 0));
    }

    #[test]
    fn closed_neighbor_is_resettled_only_through_a_shorter_path() {
        let g = Grid::new(3);
        let goal = Point::new(2, 2);
        let mut arena = NodeArena::new();
        let mut f = Frontier::new(Algorithm::BestFirst, g.len(), W);

        // Long chain around the top-right: (0,0) -> (1,0) -> (2,0) -> (2,1) -> (1,1).
        let root = node_at(&mut arena, &g, None, Point::new(0, 0), goal);
        let a = node_at(&mut arena, &g, Some(root), Point::new(1, 0), goal);
        let b = node_at(&mut arena, &g, Some(a), Point::new(2, 0), goal);
        let c = node_at(&mut arena, &g, Some(b), Point::new(2, 1), goal);
        let d = node_at(&mut arena, &g, Some(c), Point::new(1, 1), goal);
        for id in [root, a, b, c, d] {
            f.close(arena.get(id).cell, id);
        }
        let mid = g.idx(Point::new(1, 1)).unwrap();
        assert_eq!(arena.path_length(d), 4);

        // (0,1) reaches (1,1) in two steps instead of four.
        let e = node_at(&mut arena, &g, Some(root), Point::new(0, 1), goal);
        f.close(arena.get(e).cell, e);
        f.expand(&mut arena, &g, e, goal);

        let Slot::Closed(relaxed) = f.slot(mid) else {
            panic!("(1,1) should stay closed");
        };
        assert_ne!(relaxed, d);
        assert_eq!(arena.parent(relaxed), Some(e));
        assert_eq!(arena.path_length(relaxed), 2);
        assert_eq!(f.relaxations(), 1);
        assert_eq!(f.closed_len(), 6);

        // Going through c again (length 3) is not shorter: untouched.
        f.expand(&mut arena, &g, c, goal);
        assert_eq!(f.slot(mid), Slot::Closed(relaxed));
        assert_eq!(f.relaxations(), 1);
    }

    #[test]
    fn open_neighbor_replacement_moves_to_back_of_queue() {
        let g = Grid::new(3);
        let goal = Point::new(2, 2);
        let mut arena = NodeArena::new();
        let mut f = Frontier::new(Algorithm::InsertionOrder, g.len(), W);

        let root = node_at(&mut arena, &g, None, Point::new(0, 0), goal);
        let a = node_at(&mut arena, &g, Some(root), Point::new(1, 0), goal);
        let b = node_at(&mut arena, &g, Some(a), Point::new(2, 0), goal);
        let far = node_at(&mut arena, &g, Some(b), Point::new(2, 1), goal);
        let target = g.idx(Point::new(2, 1)).unwrap();
        f.open(&arena, target, far);
        let other = node_at(&mut arena, &g, Some(root), Point::new(0, 1), goal);
        f.open(&arena, arena.get(other).cell, other);
        assert_eq!(f.open_len(), 2);

        // A length-1 node next to (2,1) gives it length 2 < 3.
        let near = node_at(&mut arena, &g, Some(root), Point::new(1, 1), goal);
        f.expand(&mut arena, &g, near, goal);

        let Slot::Open(replaced) = f.slot(target) else {
            panic!("(2,1) should stay open");
        };
        assert_eq!(arena.parent(replaced), Some(near));
        assert_eq!(f.relaxations(), 1);
        // (0,1) is not longer through `near`, so it keeps its entry and now
        // comes before the replacement; the stale entry is skipped.
        assert_eq!(f.select(), Some(other));
    }

    #[test]
    fn equal_length_open_neighbor_is_kept() {
        let g = Grid::new(3);
        let goal = Point::new(2, 2);
        let mut arena = NodeArena::new();
        let mut f = Frontier::new(Algorithm::InsertionOrder, g.len(), W);
        let root = node_at(&mut arena, &g, None, Point::new(1, 1), goal);
        let up = node_at(&mut arena, &g, Some(root), Point::new(1, 0), goal);
        let corner = node_at(&mut arena, &g, Some(up), Point::new(0, 0), goal);
        f.open(&arena, 0, corner);
        let left = node_at(&mut arena, &g, Some(root), Point::new(0, 1), goal);
        f.expand(&mut arena, &g, left, goal);
        assert_eq!(f.slot(0), Slot::Open(corner));
        assert_eq!(f.relaxations(), 0);
    }

    #[test]
    fn clear_empties_both_sets() {
        let g = Grid::new(3);
        let goal = Point::new(2, 2);
        let mut arena = NodeArena::new();
        let mut f = Frontier::new(Algorithm::BestFirst, g.len(), W);
        let root = node_at(&mut arena, &g, None, Point::ZERO, goal);
        f.close(0, root);
        f.expand(&mut arena, &g, root, goal);
        f.clear();
        assert_eq!((f.open_len(), f.closed_len()), (0, 0));
        assert_eq!(f.select(), None);
        assert!(f.take_changed().is_empty());
    }
}
