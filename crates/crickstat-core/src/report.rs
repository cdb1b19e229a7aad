// Markdown rendering of comparison outcomes.

use crate::compare::{ComparisonOutcome, ComparisonResult, PlayerSummary};

const SIGNIFICANT: &str = "Interpretation: The p-value is below {alpha}, indicating a \
statistically significant difference in performance between the two players.";

const NOT_SIGNIFICANT: &str = "Interpretation: The p-value is greater than {alpha}, meaning \
the difference between the two players is not statistically significant. Cricket data has \
high variance and limited samples, so practical metrics like average runs, strike rate and \
consistency must also be considered.";

const SMALL_SAMPLE_NOTE: &str =
    "**Note:** Sample size at this position is small. Statistical confidence is limited.\n";

const NO_CLEAR_WINNER: &str = "Both players display similar performance at this position. \
Based on statistical and practical indicators, no clear winner can be identified.";

const METHODOLOGY: &str = "This conclusion is based on average runs and 30+ consistency \
(with strike rate and boundary percentage as supporting indicators). The p-value is used as \
additional context, not the sole decision-maker.";

impl ComparisonOutcome {
    /// Render as markdown. Rejections render to their message alone.
    pub fn to_markdown(&self) -> String {
        match self {
            ComparisonOutcome::Rejected(rejection) => rejection.to_string(),
            ComparisonOutcome::Compared(result) => result.to_markdown(),
        }
    }

    /// Pretty JSON of the whole outcome, aggregates included.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl ComparisonResult {
    pub fn to_markdown(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!(
            "### Comparison at batting position **{}**\n",
            self.position
        ));

        push_player_block(&mut lines, &self.player1);
        push_player_block(&mut lines, &self.player2);

        match &self.test {
            None => lines.push(SMALL_SAMPLE_NOTE.to_string()),
            Some(test) => {
                lines.push("### Mann–Whitney U Test".to_string());
                lines.push(format!("- U-statistic: **{:.2}**", test.u_statistic));
                lines.push(format!("- p-value: **{:.4}**", test.p_value));
                let template = if self.is_significant() {
                    SIGNIFICANT
                } else {
                    NOT_SIGNIFICANT
                };
                lines.push(template.replace("{alpha}", &format_alpha(self.alpha)));
                lines.push(String::new());
            }
        }

        lines.push("### Final Interpretation (simple):".to_string());
        match (self.winner_summary(), self.runner_up_summary()) {
            (Some(winner), Some(other)) => {
                lines.push(format!(
                    "Based on overall historical performance, **{}** appears stronger \
                     at batting position **{}** compared to **{}**.",
                    winner.name, self.position, other.name
                ));
                lines.push(METHODOLOGY.to_string());
            }
            _ => lines.push(NO_CLEAR_WINNER.to_string()),
        }

        lines.join("\n")
    }
}

fn push_player_block(lines: &mut Vec<String>, player: &PlayerSummary) {
    lines.push(format!("#### {}", player.name));
    lines.push(format!("- Innings: **{}**", player.innings));
    lines.push(format!("- Average runs: **{:.2}**", player.mean_runs));
    lines.push(format!("- Strike rate: **{:.1}**", player.mean_strike_rate));
    lines.push(format!("- 30+ consistency: **{:.1}%**", player.consistency_pct));
    if let Some(boundary) = player.mean_boundary_pct {
        lines.push(format!("- Boundary %: **{boundary:.2}%**"));
    }
    lines.push(String::new());
}

/// `0.05` stays `0.05`; trailing zeros beyond two decimals are dropped.
fn format_alpha(alpha: f64) -> String {
    let s = format!("{alpha:.4}");
    let trimmed = s.trim_end_matches('0');
    if trimmed.len() < s.len() - 2 {
        format!("{alpha:.2}")
    } else {
        trimmed.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
