// Status bar widget: dataset summary and the comparison state.

use crickstat_core::ComparisonOutcome;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [app name] [dataset summary] | [outcome indicator]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (label, color) = outcome_indicator(state.outcome.as_ref());
    let spans = vec![
        Span::styled(
            " crickstat ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", state.dataset_summary),
            Style::default().fg(Color::White),
        ),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(label, Style::default().fg(color)),
    ];

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Short label and color describing the last comparison.
pub fn outcome_indicator(outcome: Option<&ComparisonOutcome>) -> (&'static str, Color) {
    match outcome {
        None => ("no comparison yet", Color::DarkGray),
        Some(ComparisonOutcome::Rejected(_)) => ("invalid selection", Color::Yellow),
        Some(ComparisonOutcome::Compared(result)) => match result.test {
            None => ("compared (small sample)", Color::Yellow),
            Some(_) if result.is_significant() => ("compared (significant)", Color::Green),
            Some(_) => ("compared", Color::Cyan),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::{buffer_text, dataset};
    use crickstat_core::{compare, CompareSettings, ComparisonRequest, Rejection};

    #[test]
    fn indicator_without_outcome() {
        assert_eq!(outcome_indicator(None), ("no comparison yet", Color::DarkGray));
    }

    #[test]
    fn indicator_for_rejection() {
        let outcome = ComparisonOutcome::Rejected(Rejection::SamePlayer);
        assert_eq!(outcome_indicator(Some(&outcome)).0, "invalid selection");
    }

    #[test]
    fn indicator_for_small_sample() {
        let ds = dataset();
        let mut settings = CompareSettings::default();
        settings.significance.min_sample = 4;
        let outcome = compare(&ds, &ComparisonRequest::new("Amy", "Zed", 3), &settings);
        assert_eq!(outcome_indicator(Some(&outcome)).0, "compared (small sample)");
    }

    #[test]
    fn indicator_for_tested_result() {
        let ds = dataset();
        let outcome = compare(
            &ds,
            &ComparisonRequest::new("Amy", "Zed", 3),
            &CompareSettings::default(),
        );
        // p = 0.7 for these samples.
        assert_eq!(outcome_indicator(Some(&outcome)), ("compared", Color::Cyan));
    }

    #[test]
    fn render_shows_summary() {
        let backend = ratatui::backend::TestBackend::new(80, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::from_dataset(&dataset(), 3);
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("7 innings, 3 batsmen"));
        assert!(text.contains("no comparison yet"));
    }
}
