// TUI widget modules for each dashboard panel.

pub mod report;
pub mod selector;
pub mod shares;
pub mod status_bar;

use ratatui::style::{Color, Modifier, Style};

/// Border style for a panel, highlighted when it holds keyboard focus.
pub fn focused_border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
