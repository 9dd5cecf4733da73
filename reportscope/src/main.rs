//! reportscope - terminal browser for published report buckets
//!
//! Loads the report index once at startup, then lets the user walk the
//! project/date/report cascade and shows where the selected report lives.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use reportscope_core::{Config, IndexClient, OriginMode};

use crate::app::App;

#[derive(Parser)]
#[command(name = "reportscope")]
#[command(about = "Browse published reports by project and date")]
#[command(version)]
struct Args {
    /// Path to a config file (default: ~/.config/reportscope/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the index document URL
    #[arg(long)]
    index_url: Option<String>,

    /// Resolve report content under the local path instead of the remote origin
    #[arg(long)]
    local: bool,

    /// Override the remote content origin base URL
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration, then fold in CLI overrides
    let mut config = match &args.config {
        Some(path) => Config::load_from(path).context("failed to load configuration")?,
        None => Config::load().context("failed to load configuration")?,
    };
    if let Some(url) = args.index_url {
        config.index.url = url;
    }
    if let Some(base_url) = args.base_url {
        config.origin.base_url = base_url;
    }
    if args.local {
        config.origin.mode = OriginMode::Local;
    }

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        reportscope_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("reportscope TUI starting up");

    // Fetch the index exactly once. There is no retry; a failure is carried
    // into the UI as a persistent banner with every selector disabled.
    let client = IndexClient::new(config.index.clone()).context("failed to create index client")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create async runtime")?;
    let load_result = runtime.block_on(client.fetch_index());

    if let Err(e) = &load_result {
        tracing::error!(error = %e, "Index load failed");
    }

    let mut app = App::new(load_result, config.origin.clone(), config.index.url.clone());

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!("reportscope TUI shutting down");

    result
}

/// Run the main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Render
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
