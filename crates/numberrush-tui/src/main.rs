mod app;
mod render;
mod storage;
mod theme;

use app::{App, AppAction, TICK_RATE};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use numberrush_core::GameSession;
use std::io::{self, Write};
use std::time::Instant;
use storage::Progress;
use theme::ThemeSettings;

#[derive(Parser)]
#[command(name = "numberrush", about = "Terminal number-chain puzzle")]
struct Args {
    /// Start at this level (clamped to your unlocked progress)
    #[arg(long)]
    level: Option<u32>,
    /// Seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,
    /// Theme preset to start from instead of saved settings: light or dark
    #[arg(long)]
    theme: Option<String>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let mut session = match args.seed {
        Some(seed) => GameSession::with_seed(seed),
        None => GameSession::new(),
    };
    let progress: Progress = storage::load_record(storage::PROGRESS_KEY);
    session.restore_progress(progress.max_unlocked_level);
    if let Some(level) = args.level {
        session.load_level(level.min(session.max_unlocked_level()));
    }

    let settings = match args.theme.as_deref() {
        Some("dark") => ThemeSettings::dark(),
        Some(_) => ThemeSettings::default(),
        None => storage::load_record(storage::SETTINGS_KEY),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(&mut stdout, App::new(session, settings));

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, mut app: App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        render::render(stdout, &app)?;
        stdout.flush()?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    AppAction::Continue => {}
                    AppAction::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
