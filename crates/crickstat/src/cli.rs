// Command-line surface: argument parsing and the non-interactive commands.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use crickstat_core::{compare, CompareSettings, ComparisonRequest, Dataset};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compare two batsmen at a batting position"
)]
pub struct Cli {
    /// Directory holding config/ and defaults/ (defaults to the current directory)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Innings CSV, overriding data.innings_csv from the config
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the comparison report for two batsmen
    Compare {
        player1: String,
        player2: String,

        /// Batting position (1-11)
        #[arg(long, short, value_parser = clap::value_parser!(u8).range(1..=11))]
        position: u8,

        /// Emit the full outcome as JSON instead of markdown
        #[arg(long)]
        json: bool,
    },

    /// List batsmen in the dataset, optionally only those who batted at a position
    Players {
        #[arg(long, short, value_parser = clap::value_parser!(u8).range(1..=11))]
        position: Option<u8>,
    },

    /// Interactive terminal dashboard (the default)
    Dashboard,
}

/// Run one comparison and write the report (or JSON) to `out`.
pub fn write_comparison<W: Write>(
    out: &mut W,
    dataset: &Dataset,
    request: &ComparisonRequest,
    settings: &CompareSettings,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = compare(dataset, request, settings);
    info!(
        "compared {} vs {} at position {}: {}",
        request.player1,
        request.player2,
        request.position,
        if outcome.result().is_some() { "completed" } else { "rejected" }
    );

    let text = if json {
        outcome.to_json().context("failed to serialize comparison")?
    } else {
        outcome.to_markdown()
    };
    writeln!(out, "{text}").context("failed to write report")?;
    Ok(())
}

/// Write batsman names, one per line.
pub fn write_players<W: Write>(
    out: &mut W,
    dataset: &Dataset,
    position: Option<u8>,
) -> anyhow::Result<()> {
    let players = match position {
        Some(pos) => dataset.players_at(pos),
        None => dataset.players(),
    };
    for name in players {
        writeln!(out, "{name}").context("failed to write player list")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crickstat_core::InningsRecord;

    fn record(batsman: &str, position: u8, runs: f64) -> InningsRecord {
        InningsRecord {
            batsman: batsman.into(),
            batting_position: position,
            runs_scored: runs,
            strike_rate: 100.0,
            is_30_plus: runs >= 30.0,
            boundary_pct: None,
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                record("Zed", 3, 40.0),
                record("Amy", 3, 10.0),
                record("Amy", 5, 70.0),
            ],
            false,
        )
    }

    #[test]
    fn parse_compare_command() {
        let cli = Cli::try_parse_from([
            "crickstat",
            "compare",
            "V Kohli",
            "SK Raina",
            "--position",
            "3",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Compare {
                player1: "V Kohli".into(),
                player2: "SK Raina".into(),
                position: 3,
                json: false,
            })
        );
    }

    #[test]
    fn position_out_of_range_rejected_by_parser() {
        for bad in ["0", "12", "-1"] {
            let parsed = Cli::try_parse_from(["crickstat", "compare", "A", "B", "-p", bad]);
            assert!(parsed.is_err(), "position {bad} should be rejected");
        }
    }

    #[test]
    fn no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["crickstat", "--base-dir", "/tmp/x"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.base_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn global_data_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["crickstat", "players", "--data", "x.csv"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("x.csv")));
        assert_eq!(cli.command, Some(Command::Players { position: None }));
    }

    #[test]
    fn write_comparison_markdown() {
        let mut out = Vec::new();
        write_comparison(
            &mut out,
            &dataset(),
            &ComparisonRequest::new("Zed", "Amy", 3),
            &CompareSettings::default(),
            false,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("### Comparison at batting position **3**"));
        assert!(text.contains("**Note:** Sample size at this position is small."));
        assert!(text.contains("**Zed** appears stronger"));
    }

    #[test]
    fn write_comparison_rejection() {
        let mut out = Vec::new();
        write_comparison(
            &mut out,
            &dataset(),
            &ComparisonRequest::new("Zed", "Amy", 5),
            &CompareSettings::default(),
            false,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Zed has no innings at position 5.\n"
        );
    }

    #[test]
    fn write_comparison_json() {
        let mut out = Vec::new();
        write_comparison(
            &mut out,
            &dataset(),
            &ComparisonRequest::new("Zed", "Zed", 3),
            &CompareSettings::default(),
            true,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "rejected");
        assert_eq!(value["detail"]["reason"], "same_player");
    }

    #[test]
    fn write_players_all_and_by_position() {
        let mut out = Vec::new();
        write_players(&mut out, &dataset(), None).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Amy\nZed\n");

        let mut out = Vec::new();
        write_players(&mut out, &dataset(), Some(5)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Amy\n");
    }
}
