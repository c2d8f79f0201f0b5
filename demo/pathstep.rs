//! Interactive pathfinding visualizer.
//!
//! Paint walls, a start and an end, then press `a` (best-first) or `b`
//! (insertion-order) to watch the search expand cell by cell.
//!
//! Run: `cargo run --bin pathstep -- --size 25 --walls 0.3 --log run.log`

use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use crossterm::event;
use pathstep_core::{DEFAULT_WALL_DENSITY, Grid};
use pathstep_demo::{Editor, Flow, Screen, TerminalHost, to_action};
use pathstep_search::{RunController, SearchConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pathstep", version, about = "Step-by-step grid pathfinding in the terminal")]
struct Cli {
    /// Grid side length; shrunk to fit the terminal.
    #[arg(long, default_value_t = 30)]
    size: i32,

    /// Pause after each expansion, in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Start with random walls at this density (0.0 to 1.0).
    #[arg(long)]
    walls: Option<f64>,

    /// Seed for wall generation and pacing jitter.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with run settings; flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long)]
    log: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| e as Box<dyn Error>)?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<SearchConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => SearchConfig::default(),
    };
    if let Some(ms) = cli.delay_ms {
        config.step_delay_ms = ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log {
        init_logging(path)?;
    }
    let config = load_config(&cli)?;

    let mut screen = Screen::init()?;
    let fit = Screen::max_grid_size()?;
    let size = cli.size.clamp(1, fit);
    if size != cli.size {
        log::warn!("grid size {} does not fit the terminal, using {size}", cli.size);
    }
    log::info!("starting with a {size}x{size} grid");

    let ctl = RunController::new(Grid::new(size), config);
    let density = cli.walls.unwrap_or(DEFAULT_WALL_DENSITY);
    let mut editor = Editor::new(ctl, density, cli.seed);
    if cli.walls.is_some() {
        editor.randomize();
    }

    loop {
        screen.draw(editor.grid(), Some(editor.cursor()), editor.status())?;
        let Some(action) = to_action(&event::read()?) else {
            continue;
        };
        match editor.handle(action) {
            Flow::Continue => {}
            Flow::Quit => break,
            Flow::Run(algorithm) => {
                let mut host = TerminalHost::new(
                    &mut screen,
                    editor.reset_handle(),
                    editor.cursor(),
                    Editor::running_status(algorithm),
                );
                editor.run(algorithm, &mut host);
                if let Some(e) = host.take_error() {
                    return Err(e.into());
                }
                if host.quit_requested() {
                    break;
                }
            }
        }
    }
    log::info!("bye");
    Ok(())
}
