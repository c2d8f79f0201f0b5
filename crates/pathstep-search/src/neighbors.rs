use pathstep_core::{Grid, Point};

/// Cached neighbor computation helper.
///
/// Enumerates the cardinal (4-way) neighbors of a cell that lie inside the
/// grid and are not walls, as flat cell indices. The order is up, right,
/// down, left.
pub struct Neighbors {
    buf: Vec<usize>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the passable cardinal neighbors of `p`.
    pub fn passable(&mut self, grid: &Grid, p: Point) -> &[usize] {
        self.buf.clear();
        for n in p.neighbors_4() {
            if let Some(i) = grid.idx(n) {
                if !grid.cell(i).is_wall() {
                    self.buf.push(i);
                }
            }
        }
        &self.buf
    }
}
