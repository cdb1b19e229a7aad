// Head-to-head comparison of two batsmen at one batting position.
//
// Pipeline: filter -> aggregate -> rank test -> practical score. The
// comparator never fails: invalid requests come back as a `Rejection`
// that renders to a message just like a completed comparison does.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::config::{CompareSettings, ScoringConfig};
use crate::dataset::{Dataset, InningsRecord};
use crate::stats::{self, MannWhitney};

// ---------------------------------------------------------------------------
// Request / outcome types
// ---------------------------------------------------------------------------

/// Two batsmen and the batting position to compare them at. The position is
/// expected to be in 1..=11; range checking is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRequest {
    pub player1: String,
    pub player2: String,
    pub position: u8,
}

impl ComparisonRequest {
    pub fn new(player1: impl Into<String>, player2: impl Into<String>, position: u8) -> Self {
        ComparisonRequest {
            player1: player1.into(),
            player2: player2.into(),
            position,
        }
    }
}

/// Why a request could not be compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    SamePlayer,
    NeitherHasInnings { position: u8 },
    NoInnings { player: String, position: u8 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::SamePlayer => write!(f, "Please select two different players."),
            Rejection::NeitherHasInnings { position } => {
                write!(f, "Neither player has any innings at position {position}.")
            }
            Rejection::NoInnings { player, position } => {
                write!(f, "{player} has no innings at position {position}.")
            }
        }
    }
}

/// Aggregates for one batsman at the requested position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    pub innings: usize,
    pub mean_runs: f64,
    pub mean_strike_rate: f64,
    /// Percentage of innings flagged `is_30_plus`.
    pub consistency_pct: f64,
    /// Undefined when the dataset has no boundary column or no values.
    pub mean_boundary_pct: Option<f64>,
    pub practical_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Player1,
    Player2,
    Tie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub position: u8,
    pub player1: PlayerSummary,
    pub player2: PlayerSummary,
    /// Present only when both players reach the minimum sample size.
    pub test: Option<MannWhitney>,
    pub winner: Winner,
    /// Threshold the test p-value is judged against.
    pub alpha: f64,
}

impl ComparisonResult {
    /// The practical winner's summary, or `None` on a tie.
    pub fn winner_summary(&self) -> Option<&PlayerSummary> {
        match self.winner {
            Winner::Player1 => Some(&self.player1),
            Winner::Player2 => Some(&self.player2),
            Winner::Tie => None,
        }
    }

    /// The other player's summary when there is a winner.
    pub fn runner_up_summary(&self) -> Option<&PlayerSummary> {
        match self.winner {
            Winner::Player1 => Some(&self.player2),
            Winner::Player2 => Some(&self.player1),
            Winner::Tie => None,
        }
    }

    /// Whether the rank test ran and came in under `alpha`.
    pub fn is_significant(&self) -> bool {
        self.test.is_some_and(|t| t.p_value < self.alpha)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    Rejected(Rejection),
    Compared(Box<ComparisonResult>),
}

impl ComparisonOutcome {
    pub fn result(&self) -> Option<&ComparisonResult> {
        match self {
            ComparisonOutcome::Compared(result) => Some(result),
            ComparisonOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ComparisonOutcome::Rejected(rejection) => Some(rejection),
            ComparisonOutcome::Compared(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Comparator
// ---------------------------------------------------------------------------

/// Compare `request.player1` against `request.player2` at `request.position`.
pub fn compare(
    dataset: &Dataset,
    request: &ComparisonRequest,
    settings: &CompareSettings,
) -> ComparisonOutcome {
    let pos = request.position;

    let mut p1_innings: Vec<&InningsRecord> = Vec::new();
    let mut p2_innings: Vec<&InningsRecord> = Vec::new();
    for record in dataset.at_position(pos) {
        if record.batsman == request.player1 {
            p1_innings.push(record);
        } else if record.batsman == request.player2 {
            p2_innings.push(record);
        }
    }
    debug!(
        position = pos,
        n1 = p1_innings.len(),
        n2 = p2_innings.len(),
        "filtered innings for {} vs {}",
        request.player1,
        request.player2
    );

    if request.player1 == request.player2 {
        return ComparisonOutcome::Rejected(Rejection::SamePlayer);
    }

    match (p1_innings.is_empty(), p2_innings.is_empty()) {
        (true, true) => {
            return ComparisonOutcome::Rejected(Rejection::NeitherHasInnings { position: pos });
        }
        (true, false) => {
            return ComparisonOutcome::Rejected(Rejection::NoInnings {
                player: request.player1.clone(),
                position: pos,
            });
        }
        (false, true) => {
            return ComparisonOutcome::Rejected(Rejection::NoInnings {
                player: request.player2.clone(),
                position: pos,
            });
        }
        (false, false) => {}
    }

    let with_boundary = dataset.has_boundary_pct();
    let player1 = summarize(&request.player1, &p1_innings, with_boundary, &settings.scoring);
    let player2 = summarize(&request.player2, &p2_innings, with_boundary, &settings.scoring);

    let min_sample = settings.significance.min_sample.max(2);
    let test = if p1_innings.len() >= min_sample && p2_innings.len() >= min_sample {
        stats::mann_whitney_u(&runs(&p1_innings), &runs(&p2_innings))
    } else {
        None
    };
    if let Some(t) = &test {
        debug!(u = t.u_statistic, p = t.p_value, method = ?t.method, "rank test");
    } else {
        debug!(min_sample, "rank test skipped: sample too small");
    }

    let winner = if player1.practical_score > player2.practical_score {
        Winner::Player1
    } else if player2.practical_score > player1.practical_score {
        Winner::Player2
    } else {
        Winner::Tie
    };
    debug!(
        score1 = player1.practical_score,
        score2 = player2.practical_score,
        ?winner,
        "practical scores"
    );

    ComparisonOutcome::Compared(Box::new(ComparisonResult {
        position: pos,
        player1,
        player2,
        test,
        winner,
        alpha: settings.significance.alpha,
    }))
}

fn runs(innings: &[&InningsRecord]) -> Vec<f64> {
    innings.iter().map(|r| r.runs_scored).collect()
}

/// Aggregate a non-empty set of innings.
fn summarize(
    name: &str,
    innings: &[&InningsRecord],
    with_boundary: bool,
    scoring: &ScoringConfig,
) -> PlayerSummary {
    let strike_rates: Vec<f64> = innings.iter().map(|r| r.strike_rate).collect();
    let mean_runs = stats::mean(&runs(innings)).unwrap_or(0.0);
    let mean_strike_rate = stats::mean(&strike_rates).unwrap_or(0.0);
    let consistency_pct = stats::percent_true(innings.iter().map(|r| r.is_30_plus)).unwrap_or(0.0);

    let mean_boundary_pct = if with_boundary {
        let values: Vec<f64> = innings.iter().filter_map(|r| r.boundary_pct).collect();
        stats::mean(&values)
    } else {
        None
    };

    PlayerSummary {
        name: name.to_string(),
        innings: innings.len(),
        mean_runs,
        mean_strike_rate,
        consistency_pct,
        mean_boundary_pct,
        practical_score: scoring.score(mean_runs, consistency_pct),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
