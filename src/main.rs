mod calculator;
mod config;
mod items;
mod keymap;
mod storage;
mod ui;

use anyhow::{Context, Result};
use calculator::{AngleMode, Calculator, detect_clipboard};
use clap::Parser;
use config::{Config, default_config_path};
use keymap::Keymap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use storage::{DEGREES_KEY, SESSION_KEY, Session, Store};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Keyboard-driven RPN calculator.
#[derive(Parser, Debug)]
#[command(name = "ralc", version, about)]
struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/ralc/config.toml).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// State file, overriding the config.
    #[arg(long, value_name = "PATH")]
    state: Option<PathBuf>,

    /// Do not restore or save the buffer and stack.
    #[arg(long)]
    no_persist: bool,

    /// Start in degree mode.
    #[arg(long, conflicts_with = "radians")]
    degrees: bool,

    /// Start in radian mode.
    #[arg(long)]
    radians: bool,

    /// Log file, overriding the config.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the effective key bindings and exit.
    #[arg(long)]
    keys: bool,
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn print_keys(keymap: &Keymap) {
    for (action, shortcuts) in keymap.entries() {
        let keys: Vec<String> = shortcuts.iter().map(|s| s.to_string()).collect();
        println!("{:<16} {}", action.to_string(), keys.join(", "));
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let Some(path) = args.config.clone().or_else(default_config_path) else {
        return Ok(Config::default());
    };
    Ok(Config::load(&path)?)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    let keymap = config.keymap()?;

    if args.keys {
        print_keys(&keymap);
        return Ok(());
    }

    if let Some(path) = args.log_file.clone().or_else(|| config.log_path())
        && let Err(e) = init_logging(&path)
    {
        eprintln!("ralc: logging disabled: {:#}", e);
    }

    let mut store = match args.state.clone().or_else(|| config.state_path()) {
        Some(path) => Store::open(path),
        None => {
            warn!("No data directory; state will not be saved");
            Store::in_memory()
        }
    };
    info!(state = ?store.path(), "starting");

    let mut angle_mode = AngleMode::from_degrees_flag(store.get(DEGREES_KEY, false));
    if args.degrees || args.radians {
        angle_mode = AngleMode::from_degrees_flag(args.degrees);
        store.set(DEGREES_KEY, &angle_mode.is_degrees());
    }

    let persist_session = config.persist_session && !args.no_persist;
    let saved: Option<Session> = if persist_session {
        store.get(SESSION_KEY, None)
    } else {
        None
    };
    let calculator = match saved {
        Some(session) => session.restore(angle_mode),
        None => Calculator::new(angle_mode),
    };

    let app = ui::App::new(
        calculator,
        keymap,
        store,
        detect_clipboard(),
        persist_session,
    );
    ui::run(app)
}
