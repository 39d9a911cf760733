use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use connect_four::config::{missing_file_warning, AppConfig, LoggingConfig};
use connect_four::ui::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

/// Play Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    /// Override number of rows
    #[arg(long)]
    height: Option<usize>,

    /// Override number of columns
    #[arg(long)]
    width: Option<usize>,

    /// Override the first player's identity (a colour name works best)
    #[arg(long)]
    first: Option<String>,

    /// Override the second player's identity
    #[arg(long)]
    second: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let loaded = AppConfig::load_optional(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    // Printed before the UI takes over the screen, so it stays visible on exit
    let missing_config = loaded.is_none();
    if missing_config {
        eprintln!("Warning: {}", missing_file_warning(&cli.config));
    }
    let mut config = loaded.unwrap_or_default();

    // Apply CLI overrides
    if let Some(height) = cli.height {
        config.game.height = height;
    }
    if let Some(width) = cli.width {
        config.game.width = width;
    }
    if let Some(first) = cli.first {
        config.game.first_player = first;
    }
    if let Some(second) = cli.second {
        config.game.second_player = second;
    }
    if let Some(log_file) = cli.log_file {
        config.logging.file = Some(log_file);
    }
    config.validate().context("invalid settings")?;

    init_logging(&config.logging)?;
    if missing_config {
        tracing::warn!(path = %cli.config.display(), "config file not found, using defaults");
    }

    let game_state = config.game.new_game().context("starting game")?;
    play(App::new(game_state)).context("running terminal UI")
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let Some(path) = &logging.file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.to_ascii_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn play(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
