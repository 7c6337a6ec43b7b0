//! Telly TUI - PIN-locked terminal front-end for the Telly TV series browser
//!
//! Losing terminal focus locks the session, the way backgrounding the app
//! does on a phone.

use std::fs::{self, File};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use telly_guard::{FileStore, GuardConfig, MemoryStore, SharedStore};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use telly_tui::App;

#[derive(Parser, Debug)]
#[command(name = "telly-tui")]
#[command(about = "Browse TV series behind a PIN lock")]
#[command(version)]
struct Args {
    /// Config file (defaults to $TELLY_CONFIG or the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep the key-value store in memory; config and log files are still used
    #[arg(long)]
    ephemeral: bool,

    /// Log file (defaults to telly-tui.log next to the store)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GuardConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GuardConfig::load_or_default(),
    };

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| default_log_path(&config.store_path));
    init_logging(&log_path)?;

    // Set up panic hook to restore terminal on crash
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableFocusChange);
        original_hook(panic_info);
    }));

    let store: SharedStore = if args.ephemeral {
        tracing::info!("Running with an in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!("Using store at {:?}", config.store_path);
        Arc::new(FileStore::new(config.store_path.clone()))
    };

    let result = run_app(config, store).await;

    if let Err(e) = &result {
        tracing::error!("Application error: {:#}", e);
    }

    result
}

/// Terminal setup, main loop, and teardown
async fn run_app(config: GuardConfig, store: SharedStore) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, store).await;
    let result = app.run(&mut terminal).await;
    app.shutdown().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn default_log_path(store_path: &Path) -> PathBuf {
    store_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("telly-tui.log")
}

/// Log to a file; stdout belongs to the terminal UI
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive("telly_tui=info".parse()?)
                .add_directive("telly_guard=info".parse()?),
        )
        .init();

    Ok(())
}
