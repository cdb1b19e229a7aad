// Keyboard input handling.
//
// Translates crossterm key events into UserCommand messages for the event
// loop, or into local ViewState mutations (focus, selection, scroll).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Focus, UserCommand, ViewState, MAX_POSITION, MIN_POSITION};

const PAGE_SIZE: u16 = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the loop must act (compare or quit).
/// Returns `None` when the key was handled by mutating `ViewState`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm emits Press and Release on Windows; act on Press only.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UserCommand::Quit),
        KeyCode::Enter => Some(UserCommand::Compare),

        KeyCode::Tab => {
            view_state.focus = view_state.focus.next();
            None
        }
        KeyCode::BackTab => {
            view_state.focus = view_state.focus.prev();
            None
        }

        KeyCode::Left | KeyCode::Char('h') => {
            step_focused(view_state, false);
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            step_focused(view_state, true);
            None
        }

        KeyCode::Char('+') | KeyCode::Char('=') => {
            step_position(view_state, true);
            None
        }
        KeyCode::Char('-') => {
            step_position(view_state, false);
            None
        }

        // Report scrolling
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.report_scroll = view_state.report_scroll.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.report_scroll = view_state.report_scroll.saturating_add(1);
            None
        }
        KeyCode::PageUp => {
            view_state.report_scroll = view_state.report_scroll.saturating_sub(PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            view_state.report_scroll = view_state.report_scroll.saturating_add(PAGE_SIZE);
            None
        }

        _ => None,
    }
}

/// Move the focused selector one step, wrapping player lists.
fn step_focused(view_state: &mut ViewState, forward: bool) {
    let len = view_state.players.len();
    match view_state.focus {
        Focus::Player1 => view_state.player1_idx = wrap_step(view_state.player1_idx, len, forward),
        Focus::Player2 => view_state.player2_idx = wrap_step(view_state.player2_idx, len, forward),
        Focus::Position => step_position(view_state, forward),
    }
}

/// Positions stop at 1 and 11 rather than wrapping.
fn step_position(view_state: &mut ViewState, up: bool) {
    view_state.position = if up {
        view_state.position.saturating_add(1).min(MAX_POSITION)
    } else {
        view_state.position.saturating_sub(1).max(MIN_POSITION)
    };
}

fn wrap_step(idx: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
