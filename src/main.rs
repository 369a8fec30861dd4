// irview: LLVM optimization-pipeline viewer with source line linking

use std::io;
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use irview::config::Settings;
use irview::fixture::CompileFixture;
use irview::pane::PersistedState;
use irview::session::Session;
use irview::ui::App;

/// Browse the optimization-pipeline IR of a recorded compilation
#[derive(Parser, Debug)]
#[command(name = "irview")]
#[command(version)]
struct Args {
    /// Compile fixture (JSON) with compiler metadata and pipeline output
    #[arg(value_name = "FIXTURE")]
    fixture: PathBuf,

    /// Settings file (JSON)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Saved pane state (JSON) to restore the selection from
    #[arg(long, value_name = "PATH")]
    state: Option<PathBuf>,

    /// Path to log file for diagnostics
    #[arg(long, value_name = "PATH", default_value = "/tmp/irview.log")]
    log_file: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Log to a file so output does not interfere with the terminal UI
    if let Ok(log_file) = std::fs::File::create(&args.log_file) {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::sync::Arc::new(log_file)))
            .with(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
            .init();
    }

    let fixture = CompileFixture::load(&args.fixture)?;
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let state = match &args.state {
        Some(path) => PersistedState::from_json(&std::fs::read_to_string(path)?)?,
        None => PersistedState {
            editor_id: Some(fixture.editor_id),
            tree_id: fixture.tree_id,
            ..PersistedState::for_compiler(fixture.compiler_id)
        },
    };
    let source = fixture.read_source().unwrap_or_else(|e| {
        tracing::warn!("Failed to read source: {}", e);
        String::new()
    });

    let mut session = Session::new(
        state,
        fixture.editor_id,
        fixture.source_name(),
        source,
        settings,
    );
    // Deliver the pane's opening requests before any compiler output.
    session.pump()?;
    fixture.replay(&mut session)?;
    tracing::info!(title = %session.pane().title(), "viewer ready");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let state = app
        .session
        .saved_state()
        .unwrap_or_else(|| app.session.pane().current_state());
    if let Ok(json) = state.to_json() {
        eprintln!("Pane state: {}", json);
    }

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}
