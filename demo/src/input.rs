//! Keyboard mapping for the editor.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pathstep_core::Role;
use pathstep_search::Algorithm;

/// Something the user asked for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Move { dx: i32, dy: i32 },
    /// Toggle the current brush on the cursor cell.
    Paint,
    Brush(Role),
    Run(Algorithm),
    /// Clear the search marks, or cancel a run in flight.
    Reset,
    RandomWalls,
    /// Rebuild an empty grid of the same size.
    Clear,
    Quit,
}

/// Map a terminal event to an [`Action`]. Key releases and unbound keys
/// map to `None`.
pub fn to_action(ev: &Event) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = ev
    else {
        return None;
    };
    if *kind == KeyEventKind::Release {
        return None;
    }
    if modifiers.contains(KeyModifiers::CONTROL) && *code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    let action = match code {
        KeyCode::Up | KeyCode::Char('k') => Action::Move { dx: 0, dy: -1 },
        KeyCode::Down | KeyCode::Char('j') => Action::Move { dx: 0, dy: 1 },
        KeyCode::Left | KeyCode::Char('h') => Action::Move { dx: -1, dy: 0 },
        KeyCode::Right | KeyCode::Char('l') => Action::Move { dx: 1, dy: 0 },
        KeyCode::Char(' ') | KeyCode::Enter => Action::Paint,
        KeyCode::Char('w') => Action::Brush(Role::Wall),
        KeyCode::Char('s') => Action::Brush(Role::Start),
        KeyCode::Char('e') => Action::Brush(Role::End),
        KeyCode::Char('a') => Action::Run(Algorithm::BestFirst),
        KeyCode::Char('b') => Action::Run(Algorithm::InsertionOrder),
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('g') => Action::RandomWalls,
        KeyCode::Char('c') => Action::Clear,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn run_keys_pick_algorithms() {
        assert_eq!(
            to_action(&key(KeyCode::Char('a'))),
            Some(Action::Run(Algorithm::BestFirst))
        );
        assert_eq!(
            to_action(&key(KeyCode::Char('b'))),
            Some(Action::Run(Algorithm::InsertionOrder))
        );
    }

    #[test]
    fn arrows_and_vi_keys_move() {
        assert_eq!(to_action(&key(KeyCode::Up)), to_action(&key(KeyCode::Char('k'))));
        assert_eq!(
            to_action(&key(KeyCode::Right)),
            Some(Action::Move { dx: 1, dy: 0 })
        );
    }

    #[test]
    fn ctrl_c_quits_and_plain_c_clears() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(to_action(&ctrl_c), Some(Action::Quit));
        assert_eq!(to_action(&key(KeyCode::Char('c'))), Some(Action::Clear));
    }

    #[test]
    fn releases_and_unbound_keys_are_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(to_action(&Event::Key(release)), None);
        assert_eq!(to_action(&key(KeyCode::Char('z'))), None);
        assert_eq!(to_action(&Event::FocusGained), None);
    }
}
