// crickstat: compare two batsmen at a batting position.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crickstat::cli::{self, Cli, Command};
use crickstat::tui;
use crickstat_core::{config, ComparisonRequest, Dataset};

fn main() -> anyhow::Result<()> {
    // 1. Parse arguments
    let cli = Cli::parse();

    // 2. Resolve the base directory holding config/, defaults/ and logs/
    let base_dir = match cli.base_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to read current directory")?,
    };

    // 3. Initialize tracing (log to file, not terminal)
    init_tracing(&base_dir)?;
    info!("crickstat starting up in {}", base_dir.display());

    // 4. Load config
    let config = config::load_config(&base_dir).context("failed to load configuration")?;
    let settings = config.compare_settings();
    info!(
        "Config loaded: weights {}/{}, alpha {}, min sample {}",
        settings.scoring.runs_weight,
        settings.scoring.consistency_weight,
        settings.significance.alpha,
        settings.significance.min_sample
    );

    // 5. Load the innings dataset
    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| config.innings_path(&base_dir));
    let dataset = Dataset::load(&data_path, config.scoring.milestone_runs)
        .with_context(|| format!("failed to load innings from {}", data_path.display()))?;
    info!(
        "Loaded {} innings for {} batsmen",
        dataset.len(),
        dataset.players().len()
    );

    // 6. Dispatch
    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Compare {
            player1,
            player2,
            position,
            json,
        } => {
            let request = ComparisonRequest::new(player1, player2, position);
            let mut out = std::io::stdout().lock();
            cli::write_comparison(&mut out, &dataset, &request, &settings, json)?;
            out.flush().context("failed to flush stdout")?;
        }
        Command::Players { position } => {
            let mut out = std::io::stdout().lock();
            cli::write_players(&mut out, &dataset, position)?;
            out.flush().context("failed to flush stdout")?;
        }
        Command::Dashboard => {
            tui::run(&dataset, settings, config.dashboard.default_position)?;
        }
    }

    info!("crickstat shut down cleanly");
    Ok(())
}

/// Log to `<base_dir>/logs/crickstat.log`; the terminal belongs to the
/// report or the dashboard.
fn init_tracing(base_dir: &Path) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = base_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("crickstat.log"))
        .context("failed to create log file")?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crickstat=info,crickstat_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
