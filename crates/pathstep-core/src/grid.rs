//! The [`Grid`] type: a fixed-size 2D array of search [`Cell`]s.
//!
//! A grid is created once per size and never resized in place; clearing or
//! resizing builds a fresh one. Cells are addressed either by [`Point`] or
//! by their flat row-major index, which is what search code uses as cell
//! identity.

use rand::Rng;

use crate::cell::{Cell, Mark, Role};
use crate::geom::{Point, Range};

/// Wall probability used by the "random walls" layout.
pub const DEFAULT_WALL_DENSITY: f64 = 0.35;

/// A 2D grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
    flashing: bool,
}

impl Grid {
    /// Create a `size × size` grid with default flags.
    pub fn new(size: i32) -> Self {
        Self::with_dims(size, size)
    }

    /// Create a `width × height` grid with default flags.
    pub fn with_dims(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        Self {
            cells: bounds.iter().map(Cell::new).collect(),
            bounds,
            flashing: false,
        }
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.width() as usize + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.cells[idx].pos()
    }

    // -----------------------------------------------------------------------
    // Cell access
    // -----------------------------------------------------------------------

    /// The cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// The cell at flat index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width().max(1) as usize)
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.at(p).is_some_and(|c| !c.is_wall())
    }

    // -----------------------------------------------------------------------
    // Roles
    // -----------------------------------------------------------------------

    /// Toggle `role` on the cell at `p`, clearing the other two roles.
    /// No-op if `p` is outside the grid.
    pub fn set_role(&mut self, p: Point, role: Role) {
        if let Some(i) = self.idx(p) {
            self.cells[i].toggle_role(role);
        }
    }

    /// Remove any role from the cell at `p`.
    pub fn clear_role(&mut self, p: Point) {
        if let Some(i) = self.idx(p) {
            self.cells[i].set_role(None);
        }
    }

    /// Positions of every cell holding `role`, row-major.
    pub fn cells_with_role(&self, role: Role) -> Vec<Point> {
        self.cells
            .iter()
            .filter(|c| c.role() == Some(role))
            .map(Cell::pos)
            .collect()
    }

    /// Replace the layout with random walls.
    ///
    /// Every cell becomes a wall with probability `density`; then the
    /// top-left corner becomes the start and the bottom-right corner the
    /// end. Existing roles are discarded first so the grid always ends up
    /// with exactly one start and one end.
    pub fn randomize_walls<R: Rng>(&mut self, rng: &mut R, density: f64) {
        let density = density.clamp(0.0, 1.0);
        for c in &mut self.cells {
            c.set_mark(None);
            let role = rng.random_bool(density).then_some(Role::Wall);
            c.set_role(role);
        }
        if self.cells.is_empty() {
            return;
        }
        let first = 0;
        let last = self.cells.len() - 1;
        self.cells[first].set_role(Some(Role::Start));
        if last != first {
            self.cells[last].set_role(Some(Role::End));
        }
    }

    // -----------------------------------------------------------------------
    // Marks
    // -----------------------------------------------------------------------

    /// Set the visualization mark of the cell at flat index `idx`.
    #[inline]
    pub fn set_mark(&mut self, idx: usize, mark: Option<Mark>) {
        self.cells[idx].set_mark(mark);
    }

    /// Clear every visualization mark and the failure flash.
    pub fn clear_marks(&mut self) {
        for c in &mut self.cells {
            c.set_mark(None);
        }
        self.flashing = false;
    }

    /// Number of cells currently carrying `mark`.
    pub fn count_marked(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| c.mark() == Some(mark)).count()
    }

    /// Whether the failure flash is currently lit. While lit, renderers
    /// draw every non-end cell as if it were an end cell.
    #[inline]
    pub fn is_flashing(&self) -> bool {
        self.flashing
    }

    #[inline]
    pub fn set_flashing(&mut self, on: bool) {
        self.flashing = on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn grid_new_and_at() {
        let g = Grid::new(4);
        assert_eq!(g.len(), 16);
        assert_eq!(g.width(), 4);
        assert_eq!(g.at(Point::new(3, 2)).map(Cell::pos), Some(Point::new(3, 2)));
        assert!(g.at(Point::new(4, 0)).is_none());
        assert!(g.at(Point::new(-1, 0)).is_none());
    }

    #[test]
    fn idx_and_point_round_trip() {
        let g = Grid::with_dims(5, 3);
        for p in g.bounds() {
            let i = g.idx(p).unwrap();
            assert_eq!(g.point(i), p);
        }
        assert_eq!(g.idx(Point::new(1, 2)), Some(11));
    }

    #[test]
    fn set_role_toggles_and_is_exclusive() {
        let mut g = Grid::new(3);
        let p = Point::new(1, 1);
        g.set_role(p, Role::Wall);
        assert!(g.at(p).unwrap().is_wall());
        g.set_role(p, Role::End);
        let c = g.at(p).unwrap();
        assert!(c.is_end() && !c.is_wall());
        g.set_role(p, Role::End);
        assert_eq!(g.at(p).unwrap().role(), None);
        // Outside the grid: ignored.
        g.set_role(Point::new(9, 9), Role::Wall);
        assert!(g.cells_with_role(Role::Wall).is_empty());
    }

    #[test]
    fn clear_marks_resets_visualization_only() {
        let mut g = Grid::new(2);
        g.set_role(Point::ZERO, Role::Start);
        g.set_mark(1, Some(Mark::Open));
        g.set_mark(2, Some(Mark::Route));
        g.set_flashing(true);
        g.clear_marks();
        assert_eq!(g.count_marked(Mark::Open), 0);
        assert_eq!(g.count_marked(Mark::Route), 0);
        assert!(!g.is_flashing());
        assert!(g.at(Point::ZERO).unwrap().is_start());
    }

    #[test]
    fn randomize_walls_places_single_endpoints() {
        let mut g = Grid::new(10);
        g.set_role(Point::new(5, 5), Role::Start);
        g.set_role(Point::new(6, 6), Role::End);
        let mut rng = StdRng::seed_from_u64(7);
        g.randomize_walls(&mut rng, DEFAULT_WALL_DENSITY);
        assert_eq!(g.cells_with_role(Role::Start), vec![Point::new(0, 0)]);
        assert_eq!(g.cells_with_role(Role::End), vec![Point::new(9, 9)]);
        let walls = g.cells_with_role(Role::Wall).len();
        assert!(walls > 0 && walls < 98);
    }

    #[test]
    fn randomize_walls_full_density_walls_everything_else() {
        let mut g = Grid::new(4);
        let mut rng = StdRng::seed_from_u64(1);
        g.randomize_walls(&mut rng, 1.0);
        assert_eq!(g.cells_with_role(Role::Wall).len(), 14);
    }

    #[test]
    fn rows_are_row_major() {
        let g = Grid::with_dims(3, 2);
        let rows: Vec<_> = g.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0].pos(), Point::new(0, 1));
    }
}
