// Innings dataset loading.
//
// Reads the processed per-innings CSV (one row per batsman per match). The
// optional `boundary_pct` column is detected once from the header row and
// carried as a schema flag on the `Dataset`.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One batsman's innings in one match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InningsRecord {
    pub batsman: String,
    pub batting_position: u8,
    pub runs_scored: f64,
    pub strike_rate: f64,
    pub is_30_plus: bool,
    /// `None` when the column is absent or the cell is empty.
    pub boundary_pct: Option<f64>,
}

/// Immutable collection of innings plus the schema facts resolved at load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<InningsRecord>,
    has_boundary_pct: bool,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

/// Positions are read as floats because exported frames sometimes write
/// integer columns as `3.0`. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
struct RawInnings {
    batsman: String,
    batting_position: f64,
    runs_scored: f64,
    strike_rate: f64,
    #[serde(default, deserialize_with = "deserialize_flag")]
    is_30_plus: Option<bool>,
    #[serde(default)]
    boundary_pct: Option<f64>,
}

/// Accepts `1`/`0`, `1.0`/`0.0` and `true`/`false` in any case.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "1" | "1.0" | "true" => Ok(Some(true)),
        "0" | "0.0" | "false" => Ok(Some(false)),
        other => Err(serde::de::Error::custom(format!(
            "invalid is_30_plus value '{other}'"
        ))),
    }
}

fn position_from(raw: f64) -> Option<u8> {
    if raw.fract() != 0.0 || raw < 1.0 || raw > f64::from(u8::MAX) {
        return None;
    }
    Some(raw as u8)
}

impl RawInnings {
    /// Validate and convert a raw row, or explain why it was rejected.
    fn into_record(self, milestone_runs: u32) -> Result<InningsRecord, String> {
        let batsman = self.batsman.trim().to_string();
        if batsman.is_empty() {
            return Err("empty batsman name".into());
        }
        let Some(batting_position) = position_from(self.batting_position) else {
            return Err(format!(
                "'{batsman}': invalid batting_position {}",
                self.batting_position
            ));
        };
        if !self.runs_scored.is_finite() || self.runs_scored < 0.0 {
            return Err(format!("'{batsman}': invalid runs_scored {}", self.runs_scored));
        }
        if !self.strike_rate.is_finite() || self.strike_rate < 0.0 {
            return Err(format!("'{batsman}': invalid strike_rate {}", self.strike_rate));
        }
        let boundary_pct = match self.boundary_pct {
            Some(v) if !v.is_finite() => {
                return Err(format!("'{batsman}': non-finite boundary_pct"));
            }
            other => other,
        };
        let is_30_plus = self
            .is_30_plus
            .unwrap_or(self.runs_scored >= f64::from(milestone_runs));

        Ok(InningsRecord {
            batsman,
            batting_position,
            runs_scored: self.runs_scored,
            strike_rate: self.strike_rate,
            is_30_plus,
            boundary_pct,
        })
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

impl Dataset {
    pub fn new(records: Vec<InningsRecord>, has_boundary_pct: bool) -> Self {
        Dataset {
            records,
            has_boundary_pct,
        }
    }

    pub fn records(&self) -> &[InningsRecord] {
        &self.records
    }

    /// Whether the source carried a `boundary_pct` column at all.
    pub fn has_boundary_pct(&self) -> bool {
        self.has_boundary_pct
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Innings played at the given batting position, in dataset order.
    pub fn at_position(&self, position: u8) -> impl Iterator<Item = &InningsRecord> {
        self.records
            .iter()
            .filter(move |r| r.batting_position == position)
    }

    /// Sorted, de-duplicated batsman names.
    pub fn players(&self) -> Vec<String> {
        collect_names(self.records.iter())
    }

    /// Sorted batsman names with at least one innings at `position`.
    pub fn players_at(&self, position: u8) -> Vec<String> {
        collect_names(self.at_position(position))
    }

    /// Parse a CSV stream. Malformed or out-of-range rows are skipped with a
    /// warning; only structural CSV failures (e.g. unreadable header) are errors.
    pub fn from_reader<R: Read>(rdr: R, milestone_runs: u32) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);
        let has_boundary_pct = reader.headers()?.iter().any(|h| h == "boundary_pct");

        let mut records = Vec::new();
        for (idx, result) in reader.deserialize::<RawInnings>().enumerate() {
            match result {
                Ok(raw) => match raw.into_record(milestone_runs) {
                    Ok(record) => records.push(record),
                    Err(reason) => warn!("skipping innings row {}: {}", idx + 1, reason),
                },
                Err(e) => warn!("skipping malformed innings row {}: {}", idx + 1, e),
            }
        }

        Ok(Dataset {
            records,
            has_boundary_pct,
        })
    }

    /// Load the innings CSV at `path`. An empty result is a validation error.
    pub fn load(path: &Path, milestone_runs: u32) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let dataset = Self::from_reader(file, milestone_runs).map_err(|e| DatasetError::Csv {
            path: path.display().to_string(),
            source: e,
        })?;

        if dataset.is_empty() {
            return Err(DatasetError::Validation(format!(
                "{} produced zero valid innings rows",
                path.display()
            )));
        }

        info!(
            "Loaded {} innings for {} batsmen from {} (boundary_pct: {})",
            dataset.len(),
            dataset.players().len(),
            path.display(),
            if dataset.has_boundary_pct { "present" } else { "absent" }
        );
        Ok(dataset)
    }
}

fn collect_names<'a>(records: impl Iterator<Item = &'a InningsRecord>) -> Vec<String> {
    records
        .map(|r| r.batsman.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
