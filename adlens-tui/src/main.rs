//! adlens TUI: keyword analytics across account, campaign and ad group.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use adlens_core::api::{DashboardApi, HttpApi};
use adlens_core::config::DashboardConfig;
use adlens_core::logging;

use adlens_tui::app::AppState;
use adlens_tui::worker::{self, WorkerCommand};
use adlens_tui::{input, persistence, ui};

#[derive(Parser, Debug)]
#[command(name = "adlens-tui", version, about = "Keyword analytics dashboard")]
struct Args {
    /// Path to adlens.toml (defaults to ./adlens.toml, then the config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Selection state file (defaults to <config_dir>/adlens/state.json)
    #[arg(long)]
    state: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = DashboardConfig::load(args.config.as_deref())
        .context("failed to load dashboard configuration")?;

    // The guard flushes the log file on drop; keep it for the whole run.
    let (_log_guard, log_path) =
        logging::init_file(&config.logging).context("failed to open log file")?;
    info!(
        base_url = %config.api.base_url,
        config = ?config.source,
        log = %log_path.display(),
        "adlens-tui starting"
    );

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let state_path = args.state.unwrap_or_else(persistence::state_path);
    let persisted = persistence::load(&state_path);

    let api: Arc<dyn DashboardApi> =
        Arc::new(HttpApi::new(config.api.clone()).context("failed to build API client")?);

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle =
        worker::spawn_worker(api, cmd_rx, resp_tx).context("failed to start fetch worker")?;

    let today = chrono::Local::now().date_naive();
    let mut app = AppState::new(config.layout, today, cmd_tx.clone(), resp_rx);
    persistence::apply(&mut app, persisted);
    app.sync(true);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&state_path, &persisted) {
        warn!(error = %e, path = %state_path.display(), "failed to save selection state");
    }

    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("adlens-tui stopped");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        app.drain_responses();

        // 3. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key, Instant::now());
            }
        }

        // 4. Debounced search
        app.tick(Instant::now());

        if !app.running {
            break;
        }
    }
    Ok(())
}
