// Selector row: the two batsman pickers and the batting-position picker.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::focused_border_style;
use crate::tui::layout::AppLayout;
use crate::tui::{Focus, ViewState};

/// Render all three selectors into their layout slots.
pub fn render(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    render_box(
        frame,
        layout.player1,
        "Player 1",
        state.player1().unwrap_or("(no players)"),
        state.focus == Focus::Player1,
    );
    render_box(
        frame,
        layout.player2,
        "Player 2",
        state.player2().unwrap_or("(no players)"),
        state.focus == Focus::Player2,
    );
    render_box(
        frame,
        layout.position,
        "Position",
        &state.position.to_string(),
        state.focus == Focus::Position,
    );
}

fn render_box(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let paragraph = Paragraph::new(selector_line(value, focused))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(focused_border_style(focused)),
        );
    frame.render_widget(paragraph, area);
}

/// `‹ value ›` with arrows shown only on the focused selector.
pub fn selector_line(value: &str, focused: bool) -> Line<'static> {
    let value_style = if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let arrow = |s: &'static str| {
        if focused {
            Span::styled(s, Style::default().fg(Color::Cyan))
        } else {
            Span::raw("  ")
        }
    };
    Line::from(vec![
        arrow("‹ "),
        Span::styled(value.to_string(), value_style),
        arrow(" ›"),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
