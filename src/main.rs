//! BitVision Login - Bitstamp credential modal
//!
//! A terminal dashboard that collects exchange credentials through a
//! validated login form.

use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app;
mod input;
mod login;
mod ui;

use app::{App, AppConfig};
use ui::ColorScheme;
use ui::components::MessageType;

fn main() -> anyhow::Result<()> {
    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let config = AppConfig::from_args(&args);

    init_logging(&config);
    info!("starting bitvision-login");

    let (scheme, theme_error) = match config.color_scheme() {
        Ok(scheme) => (scheme, None),
        Err(e) => {
            warn!("falling back to default theme: {}", e);
            (ColorScheme::default(), Some(e))
        }
    };

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(config, scheme);
    if let Some(e) = theme_error {
        app.set_message(&format!("Theme not loaded: {}", e), MessageType::Error);
    }

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("exiting, logged in: {}", app.credentials.is_some());
    result
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging(config: &AppConfig) {
    let file = config
        .log_path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|_| File::create(&config.log_path));

    let writer: Box<dyn Write + Send> = match file {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(io::sink()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(writer))
        .with_ansi(false)
        .init();
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> anyhow::Result<()> {
    loop {
        if app.needs_redraw() {
            terminal.draw(|frame| {
                app.render(frame);
            })?;
        }

        if event::poll(app.config.poll_interval)? {
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(_, _) => app.mark_dirty(),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
