//! The [`Cell`] type: one grid position with its role and search mark.

use crate::geom::Point;

/// What the user painted onto a cell. At most one role per cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Wall,
    Start,
    End,
}

/// Search-time visualization state. At most one mark per cell; every mark
/// is cleared at the start of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mark {
    /// Discovered, waiting in the open set.
    Open,
    /// Settled in the closed set.
    Closed,
    /// Part of the reconstructed route.
    Route,
}

/// One grid position.
///
/// The six boolean flags a renderer needs are derived from two optional
/// enums, so the wall/start/end triple and the open/closed/route triple
/// are each mutually exclusive by construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Point,
    role: Option<Role>,
    mark: Option<Mark>,
}

impl Cell {
    /// A cell at `pos` with no role and no mark.
    #[inline]
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            role: None,
            mark: None,
        }
    }

    #[inline]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub const fn role(&self) -> Option<Role> {
        self.role
    }

    #[inline]
    pub const fn mark(&self) -> Option<Mark> {
        self.mark
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.role == Some(Role::Wall)
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.role == Some(Role::Start)
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.role == Some(Role::End)
    }

    #[inline]
    pub fn is_part_of_open_list(&self) -> bool {
        self.mark == Some(Mark::Open)
    }

    #[inline]
    pub fn is_part_of_closed_list(&self) -> bool {
        self.mark == Some(Mark::Closed)
    }

    #[inline]
    pub fn is_part_of_route(&self) -> bool {
        self.mark == Some(Mark::Route)
    }

    /// Toggle `role`: set it if the cell holds a different role (or none),
    /// clear it if the cell already holds it.
    pub fn toggle_role(&mut self, role: Role) {
        self.role = if self.role == Some(role) {
            None
        } else {
            Some(role)
        };
    }

    /// Replace the role unconditionally.
    #[inline]
    pub fn set_role(&mut self, role: Option<Role>) {
        self.role = role;
    }

    /// Replace the visualization mark.
    #[inline]
    pub fn set_mark(&mut self, mark: Option<Mark>) {
        self.mark = mark;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_has_no_flags() {
        let c = Cell::new(Point::new(3, 4));
        assert_eq!(c.pos(), Point::new(3, 4));
        assert!(!c.is_wall() && !c.is_start() && !c.is_end());
        assert!(!c.is_part_of_open_list() && !c.is_part_of_closed_list() && !c.is_part_of_route());
    }

    #[test]
    fn toggle_role_clears_other_roles() {
        let mut c = Cell::new(Point::ZERO);
        c.toggle_role(Role::Wall);
        assert!(c.is_wall());
        c.toggle_role(Role::Start);
        assert!(c.is_start());
        assert!(!c.is_wall());
        c.toggle_role(Role::Start);
        assert_eq!(c.role(), None);
    }

    #[test]
    fn marks_are_exclusive() {
        let mut c = Cell::new(Point::ZERO);
        c.set_mark(Some(Mark::Open));
        c.set_mark(Some(Mark::Closed));
        assert!(c.is_part_of_closed_list());
        assert!(!c.is_part_of_open_list());
        c.set_mark(None);
        assert_eq!(c.mark(), None);
    }
}
