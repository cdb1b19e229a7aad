// Metric shares widget: one gauge per metric splitting the pair total.
//
// The filled part is player 1's share, the remainder player 2's.

use crickstat_core::charts::{chart_shares, MetricShare};
use crickstat_core::ComparisonOutcome;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

const PLAYER1_COLOR: Color = Color::Cyan;
const PLAYER2_COLOR: Color = Color::Magenta;
const GAUGE_HEIGHT: u16 = 3;

/// Render the shares panel into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Metric Shares");

    let result = match &state.outcome {
        Some(ComparisonOutcome::Compared(result)) => result,
        Some(ComparisonOutcome::Rejected(_)) => {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                "No innings available for these players at this position.",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }
        None => {
            frame.render_widget(block, area);
            return;
        }
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let shares = chart_shares(result);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            shares
                .iter()
                .map(|_| Constraint::Length(GAUGE_HEIGHT))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(inner);

    for (share, row) in shares.iter().zip(rows.iter()) {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(share.metric.title()),
            )
            .gauge_style(Style::default().fg(PLAYER1_COLOR).bg(PLAYER2_COLOR))
            .ratio(share.player1_ratio())
            .label(share_label(&result.player1.name, &result.player2.name, share));
        frame.render_widget(gauge, *row);
    }
}

/// `"{p1} 58.5% | {p2} 41.5%"`
pub fn share_label(player1: &str, player2: &str, share: &MetricShare) -> String {
    format!(
        "{player1} {:.1}% | {player2} {:.1}%",
        share.player1_share, share.player2_share
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::{buffer_text, dataset};
    use crickstat_core::charts::Metric;
    use crickstat_core::{CompareSettings, Rejection};

    fn compared_state() -> ViewState {
        let ds = dataset();
        let mut state = ViewState::from_dataset(&ds, 3);
        state.player2_idx = 2;
        state.run_comparison(&ds, &CompareSettings::default());
        state
    }

    #[test]
    fn label_format() {
        let share = MetricShare {
            metric: Metric::AverageRuns,
            player1_value: 20.0,
            player2_value: 25.0,
            player1_share: 44.444,
            player2_share: 55.556,
        };
        assert_eq!(share_label("Amy", "Zed", &share), "Amy 44.4% | Zed 55.6%");
    }

    #[test]
    fn render_gauges_for_every_metric() {
        let backend = ratatui::backend::TestBackend::new(50, 16);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = compared_state();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Average Runs"));
        assert!(text.contains("Strike Rate"));
        assert!(text.contains("30+ Consistency"));
        assert!(text.contains("Boundary %"));
        // Amy 20 vs Zed 25 average runs.
        assert!(text.contains("Amy 44.4% | Zed 55.6%"));
    }

    #[test]
    fn render_rejection_placeholder() {
        let backend = ratatui::backend::TestBackend::new(80, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::from_dataset(&dataset(), 3);
        state.outcome = Some(ComparisonOutcome::Rejected(Rejection::NeitherHasInnings {
            position: 9,
        }));
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        assert!(buffer_text(&terminal).contains("No innings available"));
    }

    #[test]
    fn render_small_area_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(10, 4);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = compared_state();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
