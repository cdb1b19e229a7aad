// TUI dashboard: player/position selectors, comparison report, share gauges.
//
// The dashboard owns a `ViewState` and re-renders it after every input
// event. Comparisons run synchronously on Enter against the loaded dataset.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crickstat_core::{compare, CompareSettings, ComparisonOutcome, ComparisonRequest, Dataset};
use crossterm::event::{self, Event};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{DefaultTerminal, Frame};
use tracing::info;

use layout::{build_layout, AppLayout};

/// Lowest and highest selectable batting positions.
pub const MIN_POSITION: u8 = 1;
pub const MAX_POSITION: u8 = 11;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which selector receives ←/→.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Player1,
    Player2,
    Position,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Player1 => Focus::Player2,
            Focus::Player2 => Focus::Position,
            Focus::Position => Focus::Player1,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Player1 => Focus::Position,
            Focus::Player2 => Focus::Player1,
            Focus::Position => Focus::Player2,
        }
    }
}

/// Actions the input handler asks the event loop to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Compare,
    Quit,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Sorted batsman names offered by both selectors.
    pub players: Vec<String>,
    pub player1_idx: usize,
    pub player2_idx: usize,
    pub position: u8,
    pub focus: Focus,
    /// Last comparison run, if any.
    pub outcome: Option<ComparisonOutcome>,
    pub report_scroll: u16,
    /// One-line dataset description for the status bar.
    pub dataset_summary: String,
}

impl ViewState {
    pub fn new(players: Vec<String>, position: u8, dataset_summary: String) -> Self {
        let player2_idx = if players.len() > 1 { 1 } else { 0 };
        ViewState {
            players,
            player1_idx: 0,
            player2_idx,
            position: position.clamp(MIN_POSITION, MAX_POSITION),
            focus: Focus::Player1,
            outcome: None,
            report_scroll: 0,
            dataset_summary,
        }
    }

    pub fn from_dataset(dataset: &Dataset, position: u8) -> Self {
        let players = dataset.players();
        let summary = format!("{} innings, {} batsmen", dataset.len(), players.len());
        Self::new(players, position, summary)
    }

    pub fn player1(&self) -> Option<&str> {
        self.players.get(self.player1_idx).map(String::as_str)
    }

    pub fn player2(&self) -> Option<&str> {
        self.players.get(self.player2_idx).map(String::as_str)
    }

    /// The request the selectors currently describe.
    pub fn request(&self) -> Option<ComparisonRequest> {
        Some(ComparisonRequest::new(
            self.player1()?,
            self.player2()?,
            self.position,
        ))
    }

    /// Run the comparison for the current selection and keep the outcome.
    pub fn run_comparison(&mut self, dataset: &Dataset, settings: &CompareSettings) {
        let Some(request) = self.request() else {
            return;
        };
        let outcome = compare(dataset, &request, settings);
        info!(
            "dashboard compare {} vs {} at {}: {}",
            request.player1,
            request.player2,
            request.position,
            match &outcome {
                ComparisonOutcome::Compared(_) => "completed".to_string(),
                ComparisonOutcome::Rejected(r) => r.to_string(),
            }
        );
        self.outcome = Some(outcome);
        self.report_scroll = 0;
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::selector::render(frame, &layout, state);
    widgets::report::render(frame, layout.report, state);
    widgets::shares::render(frame, layout.shares, state);
    render_help_bar(frame, &layout);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout) {
    let text = " q:Quit | Tab:Focus | ←/→:Change | +/-:Position | ↑/↓:Scroll | Enter:Compare";
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the dashboard until the user quits.
///
/// Enters raw mode and the alternate screen, installs a panic hook that
/// restores the terminal, and restores it again on exit.
pub fn run(
    dataset: &Dataset,
    settings: CompareSettings,
    default_position: u8,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut state = ViewState::from_dataset(dataset, default_position);
    let result = event_loop(&mut terminal, &mut state, dataset, &settings);

    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    state: &mut ViewState,
    dataset: &Dataset,
    settings: &CompareSettings,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| render_frame(frame, state))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let Event::Key(key_event) = event::read()? {
            match input::handle_key(key_event, state) {
                Some(UserCommand::Quit) => break,
                Some(UserCommand::Compare) => state.run_comparison(dataset, settings),
                None => {}
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod test_support {
    use crickstat_core::InningsRecord;

    use super::*;

    pub fn record(batsman: &str, position: u8, runs: f64) -> InningsRecord {
        InningsRecord {
            batsman: batsman.into(),
            batting_position: position,
            runs_scored: runs,
            strike_rate: runs * 1.5,
            is_30_plus: runs >= 30.0,
            boundary_pct: Some(runs / 3.0),
        }
    }

    /// Three batsmen; Amy and Zed have three innings each at 3.
    pub fn dataset() -> Dataset {
        let mut records = Vec::new();
        for runs in [10.0, 20.0, 30.0] {
            records.push(record("Amy", 3, runs));
        }
        for runs in [15.0, 25.0, 35.0] {
            records.push(record("Zed", 3, runs));
        }
        records.push(record("Bob", 7, 4.0));
        Dataset::new(records, true)
    }

    /// Flatten a test backend buffer into one string.
    pub fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{buffer_text, dataset};
    use super::*;

    #[test]
    fn view_state_from_dataset() {
        let state = ViewState::from_dataset(&dataset(), 3);
        assert_eq!(state.players, vec!["Amy", "Bob", "Zed"]);
        assert_eq!(state.player1(), Some("Amy"));
        assert_eq!(state.player2(), Some("Bob"));
        assert_eq!(state.position, 3);
        assert_eq!(state.focus, Focus::Player1);
        assert!(state.outcome.is_none());
        assert_eq!(state.dataset_summary, "7 innings, 3 batsmen");
    }

    #[test]
    fn single_player_dataset_selects_same_player_twice() {
        let state = ViewState::new(vec!["Solo".into()], 4, String::new());
        assert_eq!(state.player1(), Some("Solo"));
        assert_eq!(state.player2(), Some("Solo"));
    }

    #[test]
    fn empty_player_list_has_no_request() {
        let mut state = ViewState::new(Vec::new(), 3, String::new());
        assert!(state.request().is_none());
        state.run_comparison(&Dataset::default(), &CompareSettings::default());
        assert!(state.outcome.is_none());
    }

    #[test]
    fn position_clamped_into_range() {
        assert_eq!(ViewState::new(Vec::new(), 0, String::new()).position, 1);
        assert_eq!(ViewState::new(Vec::new(), 40, String::new()).position, 11);
    }

    #[test]
    fn focus_cycles_both_ways() {
        assert_eq!(Focus::Player1.next(), Focus::Player2);
        assert_eq!(Focus::Position.next(), Focus::Player1);
        assert_eq!(Focus::Player1.prev(), Focus::Position);
        assert_eq!(Focus::Player2.prev(), Focus::Player1);
    }

    #[test]
    fn run_comparison_stores_outcome_and_resets_scroll() {
        let ds = dataset();
        let mut state = ViewState::from_dataset(&ds, 3);
        state.player2_idx = 2;
        state.report_scroll = 9;
        state.run_comparison(&ds, &CompareSettings::default());

        let outcome = state.outcome.as_ref().unwrap();
        let result = outcome.result().expect("Amy and Zed both bat at 3");
        assert_eq!(result.player1.name, "Amy");
        assert_eq!(result.player2.name, "Zed");
        assert_eq!(state.report_scroll, 0);
    }

    #[test]
    fn render_frame_before_any_comparison() {
        let backend = ratatui::backend::TestBackend::new(120, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::from_dataset(&dataset(), 3);
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Player 1"));
        assert!(text.contains("Amy"));
        assert!(text.contains("Press Enter to compare"));
        assert!(text.contains("Enter:Compare"));
    }

    #[test]
    fn render_frame_with_result() {
        let ds = dataset();
        let mut state = ViewState::from_dataset(&ds, 3);
        state.player2_idx = 2;
        state.run_comparison(&ds, &CompareSettings::default());

        let backend = ratatui::backend::TestBackend::new(120, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Comparison at batting position"));
        assert!(text.contains("Average Runs"));
    }

    #[test]
    fn render_frame_tiny_terminal_does_not_panic() {
        let ds = dataset();
        let mut state = ViewState::from_dataset(&ds, 3);
        state.player2_idx = 2;
        state.run_comparison(&ds, &CompareSettings::default());

        let backend = ratatui::backend::TestBackend::new(20, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }
}
