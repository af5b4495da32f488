//! Watchboard: live watch-list dashboard in the terminal.
//!
//! Configuration is read from `$WATCHBOARD_CONFIG`, falling back to
//! `<config dir>/watchboard/config.toml`; a missing file means defaults.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use watchboard_core::{
    CircuitBreaker, Scheduler, SchedulerConfig, StatePublisher, WatchConfig, YahooQuoteSource,
};
use watchboard_tui::{handle_key, logging, ui, AppState, InputAction};

/// How long to wait for a key before checking for published changes.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    // Fetch threads catch their own panics, so only a main-thread panic
    // tears the UI down.
    std::panic::set_hook(Box::new(move |info| {
        if std::thread::current().name() == Some("main") {
            let _ = disable_raw_mode();
            let _ = execute!(io::stderr(), LeaveAlternateScreen);
            default_hook(info);
        } else {
            log::error!("panic on worker thread: {info}");
        }
    }));

    let log_path = logging::default_log_path();
    if let Err(e) = logging::init(&log_path) {
        eprintln!("warning: logging disabled: {e:#}");
    }

    let config_path = config_path();
    let config = WatchConfig::load_or_default(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    log::info!(
        "loaded config from {}: {} symbols",
        config_path.display(),
        config.watchlist.len()
    );

    let breaker = Arc::new(CircuitBreaker::new(config.breaker_cooldown()));
    let source = Arc::new(
        YahooQuoteSource::new(&config.provider, breaker).context("building quote client")?,
    );
    let publisher = Arc::new(StatePublisher::new());

    // Ctrl-C and SIGTERM both land here; raw mode swallows Ctrl-C as a key.
    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = Arc::clone(&interrupted);
        ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst))
            .context("installing signal handler")?;
    }

    let mut scheduler = Scheduler::start(
        SchedulerConfig::from_watch_config(&config),
        source,
        Arc::clone(&publisher),
    )
    .context("starting scheduler")?;

    let mut app = AppState::new(
        publisher,
        config.watchlist.len(),
        config.refresh_interval_secs,
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app, &scheduler, &interrupted);

    scheduler.stop();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("exiting");
    result
}

fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("WATCHBOARD_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("watchboard")
        .join("config.toml")
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    scheduler: &Scheduler,
    interrupted: &AtomicBool,
) -> Result<()> {
    let mut dirty = true;
    loop {
        // 1. Pick up anything the pipeline published
        dirty |= app.sync();

        // 2. Render only when something changed
        if dirty {
            terminal.draw(|f| ui::draw(f, app))?;
            dirty = false;
        }

        // 3. Poll for input events
        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) => match handle_key(app, key) {
                    InputAction::Refresh => scheduler.refresh_now(),
                    InputAction::Quit | InputAction::None => {}
                },
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        // 4. Check quit
        if !app.running || interrupted.load(Ordering::SeqCst) {
            break;
        }
    }
    Ok(())
}
