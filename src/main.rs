//! Main entry point for the podcast-catalog CLI application.

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, info, warn};
use podcast_catalog::config::Config;
use podcast_catalog::data::Dataset;
use podcast_catalog::error::Result;
use podcast_catalog::plain;
use podcast_catalog::tui::{Action, App, draw, finish_session, poll_event};
use podcast_catalog::types::{GenreFilter, PodcastId, Selection, SortOrder};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::time::Duration;

/// Command-line arguments for the podcast-catalog application.
#[derive(Parser, Debug)]
#[command(
    name = "podcast-catalog",
    version,
    about = "Browse a podcast catalog in the terminal",
    long_about = "Filter podcasts by genre, sort them by update date, and inspect their seasons."
)]
struct Args {
    /// Genre filter: "all" or a genre id (overrides config)
    #[arg(short, long)]
    genre: Option<String>,

    /// Sort order: "most-recent" or "oldest" (overrides config)
    #[arg(short, long)]
    sort: Option<String>,

    /// Log verbosity level: 0=error, 1=warn, 2=info, 3=debug, 4=trace
    #[arg(short, long, default_value_t = 1)]
    log: u8,

    /// Print the podcast list to stdout instead of starting the TUI
    #[arg(short, long)]
    plain: bool,

    /// With --plain, print the details of one podcast
    #[arg(long, requires = "plain")]
    show: Option<String>,

    /// Write a default config file if none exists and print its path
    #[arg(long)]
    init_config: bool,
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.log {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    debug!("Log level set to {:?}", log_level);

    if args.init_config {
        let path = Config::create_default_if_missing()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config: {}. Using defaults.", e);
        Config::new()
    });

    // Merge config with CLI args
    let genre = match &args.genre {
        Some(g) => g.parse::<GenreFilter>()?,
        None => config.genre,
    };
    let sort = match &args.sort {
        Some(s) => s.parse::<SortOrder>()?,
        None => config.sort,
    };
    let selection = Selection::new(genre, sort);

    let dataset = Dataset::builtin()?;
    for problem in dataset.validate() {
        warn!("Catalog inconsistency: {}", problem);
    }
    info!(
        "Loaded {} podcasts, {} genres",
        dataset.podcasts.len(),
        dataset.genres.len()
    );

    if args.plain {
        let mut out = io::stdout().lock();
        return match &args.show {
            Some(id) => plain::write_detail(&mut out, &dataset, &PodcastId::new(id.trim())),
            None => plain::write_cards(&mut out, &dataset, &selection),
        };
    }

    let mut app = App::new(dataset, selection, config.keybindings)?;

    let mut terminal = init_terminal()?;
    let result = run_app(&mut terminal, &mut app);
    let restored = restore_terminal();

    finish_session(result, restored)
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        let action = match poll_event(Duration::from_millis(100))? {
            Some(Event::Key(key)) if key.kind == KeyEventKind::Press => app.handle_input(key),
            Some(Event::Mouse(mouse)) => app.handle_mouse(mouse),
            _ => Action::None,
        };

        match action {
            Action::Quit => break,
            Action::None => {}
            other => {
                debug!("Applying {:?}", other);
                app.apply(other)?;
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
