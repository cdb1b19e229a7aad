// Report widget: the comparison report, or the rejection message.
//
// Markdown from `ComparisonOutcome::to_markdown` is styled line by line:
// `###` headings cyan, `####` player headings yellow, `**x**` bold.

use crickstat_core::ComparisonOutcome;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::ViewState;

const PLACEHOLDER: &str = "Press Enter to compare.";

/// Render the report panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (lines, border) = match &state.outcome {
        None => (
            vec![Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))],
            Style::default(),
        ),
        Some(ComparisonOutcome::Rejected(rejection)) => (
            vec![Line::from(Span::styled(
                rejection.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))],
            Style::default().fg(Color::Yellow),
        ),
        Some(outcome @ ComparisonOutcome::Compared(_)) => {
            (markdown_lines(&outcome.to_markdown()), Style::default())
        }
    };

    let max_scroll = lines.len().saturating_sub(1) as u16;
    let scroll = state.report_scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Report")
                .border_style(border),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Style report markdown into terminal lines.
pub fn markdown_lines(markdown: &str) -> Vec<Line<'static>> {
    markdown
        .lines()
        .map(|line| {
            if let Some(rest) = line.strip_prefix("#### ") {
                emphasised(rest, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else if let Some(rest) = line.strip_prefix("### ") {
                emphasised(rest, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            } else {
                emphasised(line, Style::default())
            }
        })
        .collect()
}

/// Split on `**` markers, alternating between `base` and bold.
fn emphasised(text: &str, base: Style) -> Line<'static> {
    let spans: Vec<Span<'static>> = text
        .split("**")
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| {
            let style = if i % 2 == 1 {
                base.add_modifier(Modifier::BOLD)
            } else {
                base
            };
            Span::styled(part.to_string(), style)
        })
        .collect();
    Line::from(spans)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
