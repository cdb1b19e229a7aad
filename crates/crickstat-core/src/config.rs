// Configuration loading and parsing (crickstat.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the single config file under `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "crickstat.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Fully assembled configuration. Every section falls back to its defaults
/// when omitted from the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub significance: SignificanceConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Processed per-innings CSV, relative to the base directory.
    pub innings_csv: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            innings_csv: "data/player_match_df.csv".into(),
        }
    }
}

/// Weights of the practical score:
/// `mean_runs * runs_weight + (consistency_pct / consistency_scale) * consistency_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub runs_weight: f64,
    pub consistency_weight: f64,
    pub consistency_scale: f64,
    /// Runs needed for an innings to count towards consistency. Only used
    /// when the dataset has no `is_30_plus` column of its own.
    pub milestone_runs: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            runs_weight: 0.7,
            consistency_weight: 0.3,
            consistency_scale: 10.0,
            milestone_runs: 30,
        }
    }
}

impl ScoringConfig {
    /// Practical score for one player's aggregates.
    pub fn score(&self, mean_runs: f64, consistency_pct: f64) -> f64 {
        mean_runs * self.runs_weight
            + (consistency_pct / self.consistency_scale) * self.consistency_weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SignificanceConfig {
    /// p-values strictly below this are reported as significant.
    pub alpha: f64,
    /// Minimum innings per player before the rank test is run.
    pub min_sample: usize,
}

impl Default for SignificanceConfig {
    fn default() -> Self {
        SignificanceConfig {
            alpha: 0.05,
            min_sample: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub default_position: u8,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            default_position: 3,
        }
    }
}

/// The subset of configuration the comparator needs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompareSettings {
    pub scoring: ScoringConfig,
    pub significance: SignificanceConfig,
}

impl Config {
    pub fn compare_settings(&self) -> CompareSettings {
        CompareSettings {
            scoring: self.scoring,
            significance: self.significance,
        }
    }

    /// Resolve the innings CSV path against `base_dir` unless it is absolute.
    pub fn innings_path(&self, base_dir: &Path) -> PathBuf {
        let path = Path::new(&self.data.innings_csv);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate configuration from TOML text.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load and validate `config/crickstat.toml` relative to `base_dir`.
///
/// This does not copy defaults; prefer `load_config()` for normal startup.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&text, &path)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or pass --base-dir",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Copy missing defaults into `config/`, then load from `base_dir`.
pub fn load_config(base_dir: &Path) -> Result<Config, ConfigError> {
    ensure_config_files(base_dir)?;
    load_config_from(base_dir)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message,
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let s = &config.scoring;
    let weight_fields: &[(&str, f64)] = &[
        ("scoring.runs_weight", s.runs_weight),
        ("scoring.consistency_weight", s.consistency_weight),
    ];
    for (name, val) in weight_fields {
        if !val.is_finite() || *val < 0.0 {
            return Err(invalid(name, format!("must be a finite value >= 0, got {val}")));
        }
    }

    if !s.consistency_scale.is_finite() || s.consistency_scale <= 0.0 {
        return Err(invalid(
            "scoring.consistency_scale",
            format!("must be > 0, got {}", s.consistency_scale),
        ));
    }

    let alpha = config.significance.alpha;
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(invalid(
            "significance.alpha",
            format!("must be strictly between 0.0 and 1.0, got {alpha}"),
        ));
    }

    // The rank test needs at least two observations per side.
    if config.significance.min_sample < 2 {
        return Err(invalid(
            "significance.min_sample",
            format!("must be >= 2, got {}", config.significance.min_sample),
        ));
    }

    let pos = config.dashboard.default_position;
    if !(1..=11).contains(&pos) {
        return Err(invalid(
            "dashboard.default_position",
            format!("must be between 1 and 11, got {pos}"),
        ));
    }

    if config.data.innings_csv.trim().is_empty() {
        return Err(invalid("data.innings_csv", "must not be empty".into()));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
