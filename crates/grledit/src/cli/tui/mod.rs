//! Terminal User Interface for the GRL editor
//!
//! Three panels (GRL, Context, Result), one visible at a time. Submissions run
//! on the tokio runtime and are collected on each tick.

pub mod app;
pub mod components;
pub mod event;
pub mod keymap;
pub mod nav;
pub mod ui;

use std::io::stdout;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use grledit::{EditorSession, Submitter};
use ratatui::{backend::CrosstermBackend, prelude::*, Terminal};
use tracing::info;

use crate::cli::{read_contexts, read_input, Settings};
use app::App;
use event::{Event, EventHandler};

/// TUI command arguments
#[derive(Debug, Default, Args)]
pub struct TuiArgs {
    /// Preload the rule panel from a file
    #[arg(long)]
    pub grl: Option<PathBuf>,

    /// Preload a context block from a file; repeat for more, in order
    #[arg(long = "context")]
    pub contexts: Vec<PathBuf>,

    /// Evaluation service base URL
    #[arg(long)]
    pub endpoint: Option<String>,
}

/// Build the app from arguments and settings, reading any preload files.
pub fn build_app(args: &TuiArgs, settings: &Settings) -> Result<App> {
    let rule = match &args.grl {
        Some(path) => read_input(path)?,
        None => String::new(),
    };
    let contexts = read_contexts(&args.contexts)?;
    let session = EditorSession::with_contents(rule, contexts, settings.config.block_placement);

    let transport = settings.transport()?;
    let submitter = Submitter::new(Arc::new(transport), settings.config.request_shape);
    Ok(App::new(session, submitter, settings.endpoint.clone()))
}

/// Run the TUI
pub async fn run(args: TuiArgs) -> Result<()> {
    let settings = Settings::load(args.endpoint.as_deref())?;
    let mut app = build_app(&args, &settings)?;
    info!(
        endpoint = %settings.endpoint,
        placement = settings.config.block_placement.as_str(),
        shape = settings.config.request_shape.as_str(),
        "editor started"
    );

    enable_raw_mode().context("Failed to enable raw terminal mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to enter the alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to initialize terminal")?;

    let mut events = EventHandler::new(std::time::Duration::from_millis(100));
    let result = run_app(&mut terminal, &mut app, &mut events).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        match events.next().await {
            Event::Key(key) => app.handle_key(key),
            Event::Paste(text) => app.handle_paste(&text),
            Event::Tick => {}
            Event::Resize(_, _) => {} // Ratatui handles resize
        }
        // Results can land between key presses; poll every iteration
        app.tick();
    }

    Ok(())
}
