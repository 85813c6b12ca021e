use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{
    DEFAULT_TICK_INTERVAL_MS, FRAME_INTERVAL_MS, GameConfig, clamp_tick_interval_ms,
};
use grid_snake::game::{EndReport, GameSession};
use grid_snake::input::{Direction, GameInput, InputHandler};
use grid_snake::renderer::{self, Overlay};
use grid_snake::settings::{Settings, load_settings_from_path, settings_path};
use grid_snake::terminal_runtime::{GameTerminal, install_panic_hook};
use simplelog::{Config, LevelFilter, WriteLogger};

const LOG_FILE_NAME: &str = "grid-snake.log";

#[derive(Debug, Parser)]
#[command(version, about = "Snake on a bounded grid in your terminal")]
struct Cli {
    /// Settings file to read instead of the per-user one.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Board width including the wall border (5-40).
    #[arg(long)]
    width: Option<i64>,

    /// Board height including the wall border (5-40).
    #[arg(long)]
    height: Option<i64>,

    /// Starting head column.
    #[arg(long = "start-x", allow_negative_numbers = true)]
    start_x: Option<i64>,

    /// Starting head row, counted upward from the bottom wall.
    #[arg(long = "start-y", allow_negative_numbers = true)]
    start_y: Option<i64>,

    /// Hitting a wall ends the game.
    #[arg(long = "solid-walls", conflicts_with = "teleport_walls")]
    solid_walls: bool,

    /// Crossing a wall wraps to the opposite edge.
    #[arg(long = "teleport-walls")]
    teleport_walls: bool,

    /// Milliseconds per game tick.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// Seed the fruit spawner for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Phase {
    Start,
    Playing,
    Shrinking,
    Ended,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let config = resolve_config(&cli);
    let tick_interval = Duration::from_millis(clamp_tick_interval_ms(cli.tick_ms));

    install_panic_hook();
    let mut terminal = GameTerminal::enter()?;
    run(&mut terminal, config, tick_interval, cli.seed)
}

fn run(
    terminal: &mut GameTerminal,
    config: GameConfig,
    tick_interval: Duration,
    seed: Option<u64>,
) -> io::Result<()> {
    let mut input = InputHandler::new();
    let mut session = new_session(config, seed);
    let mut phase = Phase::Start;
    let mut end_report: Option<EndReport> = None;
    let mut pending: Option<Direction> = None;
    let mut last_tick = Instant::now();

    loop {
        let overlay = match (phase, &end_report) {
            (Phase::Start, _) => Overlay::Start,
            (Phase::Ended, Some(report)) => Overlay::End(report.clone()),
            _ => Overlay::None,
        };
        terminal.draw(|frame| renderer::render(frame, &session, &overlay))?;

        while let Some(game_input) = input.poll_input()? {
            match game_input {
                GameInput::Quit => {
                    log::info!("quit requested");
                    return Ok(());
                }
                GameInput::Confirm if phase == Phase::Start => {
                    phase = Phase::Playing;
                    last_tick = Instant::now();
                }
                GameInput::Confirm if phase == Phase::Ended => {
                    session = new_session(config, seed);
                    end_report = None;
                    pending = None;
                    phase = Phase::Playing;
                    last_tick = Instant::now();
                }
                GameInput::Direction(direction) if phase == Phase::Playing => {
                    pending = Some(direction);
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_interval {
            last_tick = Instant::now();
            match phase {
                Phase::Playing => {
                    session.tick(pending.take());
                    if session.is_over() {
                        end_report = session.end_report();
                        phase = Phase::Shrinking;
                    }
                }
                Phase::Shrinking => {
                    if session.shrink_step().is_none() {
                        phase = Phase::Ended;
                    }
                }
                Phase::Start | Phase::Ended => {}
            }
        }

        thread::sleep(Duration::from_millis(FRAME_INTERVAL_MS));
    }
}

fn new_session(config: GameConfig, seed: Option<u64>) -> GameSession {
    match seed {
        Some(seed) => GameSession::new_with_seed(config, seed),
        None => GameSession::new(config),
    }
}

/// Reads the settings file, then applies command-line overrides and clamps.
fn resolve_config(cli: &Cli) -> GameConfig {
    let path = cli.settings.clone().unwrap_or_else(settings_path);
    let mut settings = match load_settings_from_path(&path) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("Warning: {error}; using default settings");
            log::warn!("{error}; using default settings");
            Settings::default()
        }
    };

    if let Some(width) = cli.width {
        settings.width = width;
    }
    if let Some(height) = cli.height {
        settings.height = height;
    }
    if let Some(start_x) = cli.start_x {
        settings.start_x = start_x;
    }
    if let Some(start_y) = cli.start_y {
        settings.start_y = start_y;
    }
    if cli.solid_walls {
        settings.teleport_walls = false;
    } else if cli.teleport_walls {
        settings.teleport_walls = true;
    }

    settings.to_config()
}

fn init_logging(cli: &Cli) {
    let path = cli.log_file.clone().unwrap_or_else(default_log_path);
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    match create_log_file(&path) {
        Ok(file) => {
            if let Err(error) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("Failed to initialize logger: {error}");
            }
        }
        Err(error) => {
            eprintln!("Failed to open log file {}: {error}", path.display());
        }
    }
}

fn create_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    File::create(path)
}

fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push("grid-snake");
    base.push(LOG_FILE_NAME);
    base
}
