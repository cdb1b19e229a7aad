// Two-slice share data for the dashboard charts, derived from a result's
// aggregates.

use serde::Serialize;

use crate::compare::ComparisonResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    AverageRuns,
    StrikeRate,
    Consistency,
    BoundaryPct,
}

impl Metric {
    pub fn title(self) -> &'static str {
        match self {
            Metric::AverageRuns => "Average Runs",
            Metric::StrikeRate => "Strike Rate",
            Metric::Consistency => "30+ Consistency",
            Metric::BoundaryPct => "Boundary %",
        }
    }
}

/// One metric split between the two players.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricShare {
    pub metric: Metric,
    pub player1_value: f64,
    pub player2_value: f64,
    /// Percent of the pair total; both are 0 when the total is 0.
    pub player1_share: f64,
    pub player2_share: f64,
}

impl MetricShare {
    fn new(metric: Metric, player1_value: f64, player2_value: f64) -> Self {
        let total = player1_value + player2_value;
        let (player1_share, player2_share) = if total > 0.0 {
            (
                player1_value / total * 100.0,
                player2_value / total * 100.0,
            )
        } else {
            (0.0, 0.0)
        };
        MetricShare {
            metric,
            player1_value,
            player2_value,
            player1_share,
            player2_share,
        }
    }

    /// Player1's fraction in 0..=1, for gauge-style widgets.
    pub fn player1_ratio(&self) -> f64 {
        (self.player1_share / 100.0).clamp(0.0, 1.0)
    }
}

/// Shares for every metric defined on both players, in display order.
pub fn chart_shares(result: &ComparisonResult) -> Vec<MetricShare> {
    let (p1, p2) = (&result.player1, &result.player2);
    let mut shares = vec![
        MetricShare::new(Metric::AverageRuns, p1.mean_runs, p2.mean_runs),
        MetricShare::new(Metric::StrikeRate, p1.mean_strike_rate, p2.mean_strike_rate),
        MetricShare::new(Metric::Consistency, p1.consistency_pct, p2.consistency_pct),
    ];
    if let (Some(b1), Some(b2)) = (p1.mean_boundary_pct, p2.mean_boundary_pct) {
        shares.push(MetricShare::new(Metric::BoundaryPct, b1, b2));
    }
    shares
}
