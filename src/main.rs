//! Digitalflix - movie catalog in your terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! digitalflix
//!
//! # CLI mode (for automation)
//! digitalflix list --featured --json
//! digitalflix get 3
//! digitalflix watch "id=3&title=Cyberpunk%20Future"
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use digitalflix::app::{self, App, AppEvent};
use digitalflix::cli::{Cli, Command, ExitCode, Output};
use digitalflix::models::WatchParams;
use digitalflix::{commands, logging, ui, CatalogClient};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        logging::init_cli(cli.quiet);
        let exit_code = run_cli(cli).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: launch interactive interface
        run_tui(cli).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);
    let config = commands::load_config(cli.config.as_deref());
    let client = commands::client_for(&config, cli.api_url.as_deref());

    match cli.command {
        Some(Command::List(cmd)) => commands::list_cmd(cmd, &client, &output).await,

        Some(Command::Get(cmd)) => commands::get_cmd(cmd, &client, &output).await,

        Some(Command::Create(cmd)) => commands::create_cmd(cmd, &client, &output).await,

        Some(Command::Update(cmd)) => commands::update_cmd(cmd, &client, &output).await,

        Some(Command::Delete(cmd)) => commands::delete_cmd(cmd, &client, &output).await,

        Some(Command::Embed(cmd)) => commands::embed_cmd(cmd, &output),

        // Watch and no-subcommand run the TUI (handled by is_cli_mode check)
        Some(Command::Watch(_)) | None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(cli: Cli) -> Result<()> {
    // Logging must not write to the terminal the UI owns
    if let Err(e) = logging::init_tui() {
        eprintln!("Warning: file logging disabled: {:#}", e);
    }

    let config = commands::load_config(cli.config.as_deref());
    let client = commands::client_for(&config, cli.api_url.as_deref());
    info!(base_url = client.base_url(), "starting TUI");

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut app = App::with_config(&config);
    app.set_event_sender(events_tx.clone());

    // `watch <query>` skips sign-in and opens the player directly
    if let Some(Command::Watch(cmd)) = &cli.command {
        let params = WatchParams::from_query(&cmd.query)
            .with_context(|| format!("Invalid watch query: {}", cmd.query))?;
        app.go_home();
        app.open_watch(params);
    }

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, &client, &events_tx, &mut events_rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        error!("TUI exited with error: {:#}", e);
    }
    result
}

/// Main event loop - handles input, applies async results, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    client: &CatalogClient,
    events_tx: &mpsc::UnboundedSender<AppEvent>,
    events_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        // Hand queued requests to background tasks
        for request in app.take_requests() {
            let client = client.clone();
            let events = events_tx.clone();
            tokio::spawn(async move {
                let event = app::execute(&client, request).await;
                if events.send(event).is_err() {
                    warn!("UI loop gone, dropping result");
                }
            });
        }

        // Apply finished requests and timer ticks
        while let Ok(event) = events_rx.try_recv() {
            app.handle_event(event);
        }

        // Render current state
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for input with timeout so async results keep flowing
        if event::poll(TICK_RATE)? {
            match event::read()? {
                // Only handle key press events (ignore releases on Windows)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => {
                    app.handle_mouse(mouse);
                }
                _ => {}
            }
        }
    }

    Ok(())
}
