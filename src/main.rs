mod app;
mod config;
mod domain;
mod input;
mod persistence;
mod store;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::{load_config, ResolvedConfig, DEFAULT_CONFIG_TEMPLATE};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::ItemId;
use persistence::{
    atomic_write, config_file, ensure_data_dir, init_local_data_dir, log_file, FileStorage,
    PersistenceAdapter,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use store::ListStore;

#[derive(Parser)]
#[command(name = "ticklist")]
#[command(about = "A small terminal to-do list that remembers itself between sessions", long_about = None)]
struct Cli {
    /// Use this data directory instead of the nearest .ticklist
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .ticklist directory in the current directory
    Init,
    /// Print every item
    List,
    /// Add an item
    Add {
        /// Title words, joined with spaces
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Flip an item between done and not done
    Toggle {
        /// Item id as shown by `list`
        id: ItemId,
    },
    /// Remove an item
    Delete {
        /// Item id as shown by `list`
        id: ItemId,
    },
    /// Verify that the stored list can be read
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let data_dir = init_local_data_dir()?;
        atomic_write(config_file(&data_dir), DEFAULT_CONFIG_TEMPLATE)?;
        println!("Initialized ticklist directory: {}", data_dir.display());
        println!();
        println!("ticklist will now keep this directory's list separate.");
        println!("Run 'ticklist' to start.");
        return Ok(());
    }

    let data_dir = ensure_data_dir(cli.data_dir.as_deref())?;
    let settings = load_settings(&data_dir);

    let storage = FileStorage::new(&data_dir).with_quota(settings.max_bytes);
    log::debug!("Slot file: {}", storage.slot_path(&settings.slot).display());
    let adapter = PersistenceAdapter::new(Box::new(storage), settings.slot.clone());

    match cli.command {
        None => run_tui(ListStore::open(adapter), &settings, &data_dir),
        Some(Commands::Check) => {
            let collection = adapter
                .try_load()
                .with_context(|| format!("Slot '{}' cannot be read", adapter.slot()))?;
            println!(
                "Slot '{}' is healthy: {} items, {} done",
                adapter.slot(),
                collection.len(),
                collection.done_count()
            );
            Ok(())
        }
        Some(command) => run_command(ListStore::open(adapter), command, settings.use_unicode),
    }
}

/// Read config.toml, start the file logger, and report config problems to it
fn load_settings(data_dir: &Path) -> ResolvedConfig {
    let (settings, mut warnings) = match load_config(&config_file(data_dir)) {
        Ok(config) => config.resolve(),
        Err(e) => (ResolvedConfig::default(), vec![format!("{}; using defaults", e)]),
    };

    init_logging(data_dir, settings.log_level);
    log::info!("ticklist starting in {}", data_dir.display());
    for warning in warnings.drain(..) {
        log::warn!("{}", warning);
    }

    settings
}

/// Initialize file logger - the terminal belongs to the UI
fn init_logging(data_dir: &Path, level: LevelFilter) {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file(data_dir))
    {
        let _ = WriteLogger::init(level, log_config, file);
    }
}

/// One-shot subcommands that mutate or print the list
fn run_command(mut store: ListStore, command: Commands, use_unicode: bool) -> Result<()> {
    match command {
        Commands::List => {
            if store.collection().is_empty() {
                println!("No items.");
            }
            for item in store.collection() {
                let mark = match (item.is_done, use_unicode) {
                    (true, true) => "✔",
                    (false, true) => "·",
                    (true, false) => "x",
                    (false, false) => " ",
                };
                println!("[{}] {:>13}  {}", mark, item.id, item.title);
            }
            return Ok(());
        }
        Commands::Add { title } => match store.add(&title.join(" ")) {
            Some(id) => println!("Added {}", id),
            None => println!("Nothing added: the title is blank."),
        },
        Commands::Toggle { id } => {
            if store.toggle(id) {
                let done = store.collection().get(id).map(|item| item.is_done).unwrap_or(false);
                println!("{} marked {}", id, if done { "done" } else { "not done" });
            } else {
                println!("No item with id {}", id);
            }
        }
        Commands::Delete { id } => {
            if store.delete(id) {
                println!("Deleted {}", id);
            } else {
                println!("No item with id {}", id);
            }
        }
        Commands::Init | Commands::Check => {}
    }

    if let Some(e) = store.last_save_error() {
        anyhow::bail!("The change was not saved: {}", e);
    }
    Ok(())
}

fn run_tui(store: ListStore, settings: &ResolvedConfig, data_dir: &Path) -> Result<()> {
    eprintln!("Using ticklist directory: {}", data_dir.display());

    let mut app = AppState::new(store, settings.use_unicode);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let store = app.into_store();
    if let Some(e) = store.last_save_error() {
        eprintln!("Warning: your latest changes were not saved: {}", e);
        log::error!("Exiting with unsaved changes: {}", e);
    }

    if let Err(err) = &result {
        log::error!("UI loop failed: {}", err);
    }
    log::info!("ticklist exiting");

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        if app.take_redraw() {
            terminal.draw(|f| ui::render(f, app))?;
        }

        // Nothing changes between key presses, so block on the next event
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let should_quit = input::handle_key(app, key);
                if should_quit {
                    return Ok(());
                }
                app.request_redraw();
            }
            Event::Resize(_, _) => app.request_redraw(),
            _ => {}
        }
    }
}
