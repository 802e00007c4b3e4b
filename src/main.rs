use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use monster_battle::core::config::{data_dir, BattleConfig};
use monster_battle::core::constants::{INPUT_POLL_MS, LOG_DIR_NAME, LOG_FILE_NAME};
use monster_battle::core::error::Result;
use monster_battle::display::{surface_channel, SurfaceState, SurfaceUpdate};
use monster_battle::ui::draw_battle_ui;
use monster_battle::{BattleEngine, BattleOutcome};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type BattleTerminal = Terminal<CrosstermBackend<io::Stdout>>;

#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<PathBuf>,
    seed: Option<u64>,
}

fn print_help() {
    println!("Monster Battle - Terminal Turn-Based Battle\n");
    println!("Usage: monster-battle [options]\n");
    println!("Options:");
    println!("  --config <path>  Load settings from a JSON file");
    println!("  --seed <n>       Seed the battle RNG for a repeatable fight");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'monster-battle --help' for usage.");
    std::process::exit(1);
}

fn parse_args() -> CliArgs {
    let mut parsed = CliArgs::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("monster-battle {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--config" => match args.next() {
                Some(path) => parsed.config_path = Some(PathBuf::from(path)),
                None => usage_error("--config needs a path"),
            },
            "--seed" => match args.next().map(|s| s.parse::<u64>()) {
                Some(Ok(seed)) => parsed.seed = Some(seed),
                Some(Err(_)) => usage_error("--seed needs an unsigned integer"),
                None => usage_error("--seed needs a value"),
            },
            other => usage_error(&format!("Unknown option: {}", other)),
        }
    }

    parsed
}

/// File-only logging so nothing is written over the alternate screen.
/// `RUST_LOG` overrides the default `info` level.
fn setup_logging() -> Result<WorkerGuard> {
    let log_dir = data_dir()?.join(LOG_DIR_NAME);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}", log_dir.join(LOG_FILE_NAME).display());
    Ok(guard)
}

fn main() -> Result<()> {
    let args = parse_args();
    let _log_guard = setup_logging()?;

    let config_path = match args.config_path {
        Some(path) => path,
        None => BattleConfig::default_path()?,
    };
    let mut config = BattleConfig::load(&config_path)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let rng = match config.seed {
        Some(seed) => {
            tracing::info!("Seeded battle: {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (handle, updates) = surface_channel();
    let engine_thread = thread::Builder::new()
        .name("battle-engine".to_string())
        .spawn(move || BattleEngine::new(handle, config, rng).run())?;

    let ui_result = run_foreground(&mut terminal, &updates);

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let mut state = match ui_result {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Terminal loop failed: {}", e);
            SurfaceState::new()
        }
    };
    let outcome = shutdown_engine(&mut state, &updates, engine_thread)?;

    match outcome {
        BattleOutcome::Victory => println!("Victory! All monsters defeated."),
        BattleOutcome::Defeat => println!("Defeat. Better luck next time."),
        BattleOutcome::Aborted => println!("Battle abandoned."),
    }
    Ok(())
}

/// Draws and handles keys until the player quits or leaves the final screen.
fn run_foreground(
    terminal: &mut BattleTerminal,
    updates: &Receiver<SurfaceUpdate>,
) -> io::Result<SurfaceState> {
    let mut state = SurfaceState::new();

    loop {
        // The engine hangs up once the battle is over.
        let finished = !state.drain(updates);

        terminal.draw(|frame| draw_battle_ui(frame, &state, finished))?;

        if !event::poll(Duration::from_millis(INPUT_POLL_MS))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if finished {
            return Ok(state);
        }

        match key.code {
            KeyCode::Char(c @ '1'..='4') => {
                state.select_action(c as usize - '1' as usize);
            }
            KeyCode::Left => state.move_cursor(-1),
            KeyCode::Right => state.move_cursor(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                state.select_cursor();
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                tracing::info!("Player quit the battle");
                state.cancel();
                return Ok(state);
            }
            _ => {}
        }
    }
}

/// Keeps cancelling requests until the engine thread has returned. The
/// engine may be mid-pause when the player quits and ask again later.
fn shutdown_engine(
    state: &mut SurfaceState,
    updates: &Receiver<SurfaceUpdate>,
    engine_thread: JoinHandle<Result<BattleOutcome>>,
) -> Result<BattleOutcome> {
    while !engine_thread.is_finished() {
        state.drain(updates);
        state.cancel();
        thread::sleep(Duration::from_millis(INPUT_POLL_MS));
    }

    match engine_thread.join() {
        Ok(result) => {
            let outcome = result?;
            tracing::info!("Battle finished: {:?}", outcome);
            Ok(outcome)
        }
        Err(_) => {
            tracing::error!("Battle engine thread panicked");
            eprintln!("The battle engine crashed. See the log for details.");
            std::process::exit(1);
        }
    }
}
