// End-to-end checks of the command writers and dashboard state against
// the core crate's CSV fixtures.

use std::path::{Path, PathBuf};

use crickstat::cli::{write_comparison, write_players};
use crickstat::tui::{input::handle_key, UserCommand, ViewState};
use crickstat_core::{CompareSettings, ComparisonRequest, Dataset};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../crickstat-core/tests/fixtures")
        .join(name)
}

fn dataset() -> Dataset {
    Dataset::load(&fixture("innings.csv"), 30).expect("fixture should load")
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

#[test]
fn compare_command_prints_report() {
    let mut out = Vec::new();
    write_comparison(
        &mut out,
        &dataset(),
        &ComparisonRequest::new("V Kohli", "SK Raina", 3),
        &CompareSettings::default(),
        false,
    )
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("### Comparison at batting position **3**"));
    assert!(text.contains("- p-value: **0.7302**"));
    assert!(text.ends_with("not the sole decision-maker.\n"));
}

#[test]
fn compare_command_json_has_aggregates() {
    let mut out = Vec::new();
    write_comparison(
        &mut out,
        &dataset(),
        &ComparisonRequest::new("V Kohli", "SK Raina", 3),
        &CompareSettings::default(),
        true,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["status"], "compared");
    assert_eq!(value["detail"]["player1"]["innings"], 4);
    assert_eq!(value["detail"]["winner"], "player1");
}

#[test]
fn players_command_filters_by_position() {
    let mut out = Vec::new();
    write_players(&mut out, &dataset(), Some(6)).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "MS Dhoni\n");
}

#[test]
fn dashboard_selection_drives_comparison() {
    let ds = dataset();
    // Players: MS Dhoni, RG Sharma, SK Raina, V Kohli.
    let mut state = ViewState::from_dataset(&ds, 3);

    // Player 1 -> V Kohli (wrap backwards), player 2 -> SK Raina.
    handle_key(key(KeyCode::Left), &mut state);
    handle_key(key(KeyCode::Tab), &mut state);
    handle_key(key(KeyCode::Right), &mut state);
    assert_eq!(state.player1(), Some("V Kohli"));
    assert_eq!(state.player2(), Some("SK Raina"));

    assert_eq!(handle_key(key(KeyCode::Enter), &mut state), Some(UserCommand::Compare));
    state.run_comparison(&ds, &CompareSettings::default());
    let result = state.outcome.as_ref().and_then(|o| o.result()).unwrap();
    assert_eq!(result.player1.innings, 4);

    // Position 6: neither batted there.
    for _ in 0..3 {
        handle_key(key(KeyCode::Char('+')), &mut state);
    }
    state.run_comparison(&ds, &CompareSettings::default());
    assert_eq!(
        state.outcome.as_ref().unwrap().to_markdown(),
        "Neither player has any innings at position 6."
    );
}
