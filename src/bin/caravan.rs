use caravan_rs::config::GameConfig;
use caravan_rs::tui::{app::AppState, controller};
use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use std::fs::File;
use std::io::{self, IsTerminal, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "caravan-rs")]
#[command(about = "Play Caravan against a bot in the terminal", version)]
struct Args {
    /// Seed for deck shuffling; a random one is used when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Write engine logs to this file (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_tracing(path)?;
    }
    if !io::stdout().is_terminal() {
        println!(
            "caravan-rs TUI requires a real terminal (TTY).\nRun in Terminal and type EXIT to quit. Version: {}",
            caravan_rs::VERSION
        );
        return Ok(());
    }

    let mut config = GameConfig::default();
    config.seed = args.seed;
    let mut app = AppState::new(config).map_err(io::Error::other)?;

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(200);
    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
