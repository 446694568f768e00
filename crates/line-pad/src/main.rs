mod menu;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use line_pad_config::AppConfig;
use line_pad_core::{HistoryConfig, LineEditor};

use crate::menu::Session;

/// Log filter used when `RUST_LOG` is unset. Logs share the terminal with
/// the menu, so only warnings and errors are shown.
const DEFAULT_LOG_FILTER: &str = "warn";

/// A line-oriented console text editor with undo/redo.
#[derive(Parser, Debug)]
#[command(name = "line-pad", version, about)]
struct Cli {
    /// Text file to load on startup.
    file: Option<PathBuf>,

    /// Path to the configuration file (defaults to `line-pad.json` next to the executable).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the welcome banner.
    #[arg(long)]
    no_banner: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout belongs to the menu
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting line-pad");

    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_or_create(&config_path);
    let banner_setting = config.show_welcome_banner;
    if cli.no_banner {
        config.show_welcome_banner = false;
    }

    let history_config = HistoryConfig::from(&config);
    let editor = match &cli.file {
        Some(path) => LineEditor::open(path, history_config)?,
        None => LineEditor::with_config(history_config),
    };

    let mut session = Session::new(editor, config);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    session.run(stdin.lock(), stdout.lock())?;

    session.config.show_welcome_banner = banner_setting;
    if let Err(e) = session.config.save(&config_path) {
        tracing::warn!("Failed to save config: {e:#}");
    }
    Ok(())
}
