//! HAL Terminal
//!
//! Line-oriented spacecraft terminal hosting the HAL agent. Plain lines are
//! spoken to the agent; lines starting with `/` are commands (`/quit`,
//! `/relocate <place>`). Oxygen runs down in the background.
//!
//! Usage:
//!   cargo run -p hal-terminal
//!   cargo run -p hal-terminal -- --seed 42 --width 100
//!   RUST_LOG=debug cargo run -p hal-terminal

mod console;
mod input;

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use clap::Parser;
use hal_logic::config::AgentConfig;
use hal_logic::reflections::Reflections;
use hal_logic::responder::ResponseEngine;
use hal_logic::rules::RuleSet;
use hal_logic::session::{Flow, Session, TerminalEvent};

use crate::console::Console;
use crate::input::{spawn_reader, InputMessage};

#[derive(Debug, Parser)]
#[command(name = "hal-terminal", about = "Talk to HAL from the ship's terminal")]
struct Args {
    /// Agent configuration (JSON). Missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Conversation rules (JSON array of {pattern, responses}).
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Seed for response selection.
    #[arg(long)]
    seed: Option<u64>,

    /// Terminal width used for alignment.
    #[arg(long, default_value_t = 80)]
    width: usize,

    /// Disable ANSI colours.
    #[arg(long)]
    no_color: bool,

    /// Speak the next rotating greeting before every reply.
    #[arg(long)]
    greet: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut session = match build_session(&args) {
        Ok(session) => session,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    };

    let mut console = Console::stdout(args.width, !args.no_color);
    session.start(&mut console);
    run(&mut session, &mut console);
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

fn build_session(args: &Args) -> Result<Session, String> {
    let mut config = match &args.config {
        Some(path) => AgentConfig::from_json(&read_file(path)?)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?,
        None => AgentConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.greet {
        config.greet_before_reply = true;
    }

    let rules = match &args.rules {
        Some(path) => RuleSet::from_json(&read_file(path)?),
        None => RuleSet::builtin(),
    }
    .map_err(|e| format!("Failed to load rules: {}", e))?;
    log::info!("{} conversation rules loaded", rules.len());

    let engine = ResponseEngine::new(rules, Reflections::default());
    Session::new(&config, engine).map_err(|errors| {
        let list: Vec<String> = errors.iter().map(|e| format!("  - {}", e)).collect();
        format!("Invalid configuration:\n{}", list.join("\n"))
    })
}

/// Cooperative loop: one consumer for input, ticks driven by elapsed time.
fn run(session: &mut Session, console: &mut Console<std::io::Stdout>) {
    let (tx, rx) = mpsc::channel();
    let _reader = spawn_reader(std::io::BufReader::new(std::io::stdin()), tx);

    let mut last = Instant::now();
    loop {
        let wait = Duration::from_secs_f64(session.until_next_tick());
        let message = rx.recv_timeout(wait);

        let now = Instant::now();
        session.advance(now.duration_since(last).as_secs_f64(), console);
        last = now;

        match message {
            Ok(InputMessage::Event(event)) => {
                if session.handle(event, console) == Flow::Quit {
                    break;
                }
            }
            Ok(InputMessage::Closed) | Err(RecvTimeoutError::Disconnected) => {
                session.handle(TerminalEvent::Command("quit".into()), console);
                break;
            }
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
    log::info!("Terminal closed");
}
