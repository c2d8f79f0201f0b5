//! Terminal painting with crossterm.
//!
//! Every grid cell is two columns wide so the board looks square in most
//! fonts. The status line sits one row below the board.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{self, ClearType},
};
use pathstep_core::{Cell, Grid, Mark, Point, Role};

/// How one cell is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub text: &'static str,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    const fn new(text: &'static str, fg: Color, bg: Color) -> Self {
        Self { text, fg, bg }
    }
}

const WALL: Glyph = Glyph::new("  ", Color::Reset, Color::Grey);
const START: Glyph = Glyph::new("S ", Color::Black, Color::Green);
const END: Glyph = Glyph::new("E ", Color::Black, Color::Magenta);
const ROUTE: Glyph = Glyph::new("**", Color::Black, Color::Yellow);
const CLOSED: Glyph = Glyph::new("··", Color::DarkGrey, Color::DarkBlue);
const OPEN: Glyph = Glyph::new("oo", Color::Cyan, Color::Reset);
const BLANK: Glyph = Glyph::new("  ", Color::Reset, Color::Reset);

/// Pick the glyph for `cell`. Roles win over marks; during the failure
/// flash every cell is drawn as an end cell.
pub fn glyph(cell: &Cell, flashing: bool) -> Glyph {
    if flashing {
        return END;
    }
    match (cell.role(), cell.mark()) {
        (Some(Role::Wall), _) => WALL,
        (Some(Role::Start), _) => START,
        (Some(Role::End), _) => END,
        (None, Some(Mark::Route)) => ROUTE,
        (None, Some(Mark::Closed)) => CLOSED,
        (None, Some(Mark::Open)) => OPEN,
        (None, None) => BLANK,
    }
}

/// Owns the terminal between [`Screen::init`] and drop.
pub struct Screen {
    out: Stdout,
}

impl Screen {
    /// Enter raw mode and the alternate screen.
    pub fn init() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        log::debug!("terminal initialised");
        Ok(Self { out })
    }

    /// Largest square grid that fits the terminal with room for the
    /// status line.
    pub fn max_grid_size() -> io::Result<i32> {
        let (cols, rows) = terminal::size()?;
        Ok(i32::from(cols / 2).min(i32::from(rows) - 2).max(1))
    }

    /// Repaint the whole board, the cursor and the status line.
    pub fn draw(&mut self, grid: &Grid, cursor_at: Option<Point>, status: &str) -> io::Result<()> {
        let flashing = grid.is_flashing();
        for (y, row) in grid.rows().enumerate() {
            queue!(self.out, cursor::MoveTo(0, y as u16))?;
            for cell in row {
                let g = glyph(cell, flashing);
                let here = cursor_at == Some(cell.pos());
                if here {
                    queue!(self.out, SetAttribute(Attribute::Reverse))?;
                }
                queue!(
                    self.out,
                    SetForegroundColor(g.fg),
                    SetBackgroundColor(g.bg),
                    Print(g.text)
                )?;
                if here {
                    queue!(self.out, SetAttribute(Attribute::NoReverse))?;
                }
            }
            queue!(self.out, ResetColor)?;
        }
        queue!(
            self.out,
            cursor::MoveTo(0, grid.height() as u16 + 1),
            terminal::Clear(ClearType::CurrentLine),
            Print(status)
        )?;
        self.out.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(role: Option<Role>, mark: Option<Mark>) -> Cell {
        let mut c = Cell::new(Point::ZERO);
        c.set_role(role);
        c.set_mark(mark);
        c
    }

    #[test]
    fn roles_win_over_marks() {
        assert_eq!(glyph(&cell(Some(Role::Start), Some(Mark::Closed)), false), START);
        assert_eq!(glyph(&cell(Some(Role::End), Some(Mark::Open)), false), END);
        assert_eq!(glyph(&cell(Some(Role::Wall), None), false), WALL);
    }

    #[test]
    fn marks_pick_their_glyph() {
        assert_eq!(glyph(&cell(None, Some(Mark::Route)), false), ROUTE);
        assert_eq!(glyph(&cell(None, Some(Mark::Closed)), false), CLOSED);
        assert_eq!(glyph(&cell(None, Some(Mark::Open)), false), OPEN);
        assert_eq!(glyph(&cell(None, None), false), BLANK);
    }

    #[test]
    fn flash_draws_everything_as_end() {
        assert_eq!(glyph(&cell(None, None), true), END);
        assert_eq!(glyph(&cell(Some(Role::Wall), None), true), END);
        assert_eq!(glyph(&cell(None, Some(Mark::Closed)), true), END);
    }
}
