use clap::{Parser, ValueEnum};
use color_eyre::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::error;
use trackdash::services::HttpAnalysisClient;
use trackdash::tui::{App, KeyBindings, ThemePreference};

/// Terminal dashboard for the track analysis server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dataset file to upload on startup (.csv, .xlsx, .xls)
    dataset: Option<PathBuf>,

    /// Base URL of the analysis server
    #[arg(long = "server", value_name = "URL", default_value = "http://127.0.0.1:5000")]
    server: String,

    /// Enable file logging at the given level (overrides RUST_LOG)
    #[arg(long = "logging", value_enum)]
    logging: Option<LogLevel>,

    /// Path to a keybindings file (JSON)
    #[arg(long = "keys", value_name = "PATH")]
    keys: Option<PathBuf>,

    /// Path to the theme preference file (overrides default discovery)
    #[arg(long = "theme-file", value_name = "PATH")]
    theme_file: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    trackdash::logging::init_with(None, args.logging.map(Into::into))?;

    let api = HttpAnalysisClient::new(&args.server)?;
    let theme_pref = ThemePreference::resolve(args.theme_file.clone());
    let export_dir = std::env::current_dir()?;
    let mut app = App::new(api, theme_pref, export_dir);

    if let Some(path) = &args.keys {
        match KeyBindings::load_from_file(path) {
            Ok(bindings) => app.set_keybindings(bindings),
            Err(e) => error!("failed to load keybindings from {}: {e}", path.display()),
        }
    }

    if let Some(dataset) = &args.dataset {
        app.upload(dataset);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    if let Err(e) = res {
        error!("Error: {e}");
        return Err(e);
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<HttpAnalysisClient>,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(Duration::from_millis(100))? {
            if let CEvent::Key(key_event) = event::read()? {
                app.handle_key_event(key_event)?;
            }
        }

        app.update();
        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
