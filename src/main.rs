//! Tamagotchi terminal front end.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                   │
//! │                                                              │
//! │  ConsoleSink + LogEventSink   FileSaveStore   JsonConfigFile │
//! │  (EventSink)                  (SaveStore)     (ConfigPort)   │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │          PetService (pure logic, single writer)        │  │
//! │  │  Phase machine · Clock · Sickness · Sleep              │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                                                              │
//! │  runtime (edge-executor timers) ◀── COMMANDS ◀── input thread│
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use core::sync::atomic::{AtomicBool, Ordering};
use std::io::{self, BufRead, Stdout, Write};
use std::thread;

use anyhow::{Context, Result};
use futures_lite::future;
use log::{info, warn};

use tamagotchi::adapters::config_file::JsonConfigFile;
use tamagotchi::adapters::console::ConsoleSink;
use tamagotchi::adapters::file_store::FileSaveStore;
use tamagotchi::adapters::log_sink::LogEventSink;
use tamagotchi::app::commands::UserAction;
use tamagotchi::app::events::PetNotification;
use tamagotchi::app::ports::{ConfigPort, EventSink, SaveStore};
use tamagotchi::app::service::PetService;
use tamagotchi::config::PetConfig;
use tamagotchi::error::Error;
use tamagotchi::events::{
    CommandChannel, MenuChannel, MenuInput, SessionCommand, drain_commands, push_command,
};
use tamagotchi::minigame::Direction;
use tamagotchi::pet::{DEFAULT_STYLE, PetName, THEMES};
use tamagotchi::runtime::run_session;

/// Input thread → running session.
static COMMANDS: CommandChannel = CommandChannel::new();

/// Input thread → menu loop.
static MENU: MenuChannel = MenuChannel::new();

/// Routes input lines to the session while one is running.
static IN_SESSION: AtomicBool = AtomicBool::new(false);

const CONFIG_ENV: &str = "TAMAGOTCHI_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "tamagotchi.json";

const MENU_HELP: &str = "\
commands: new <name> [style] | load <name> | saves | themes | help | quit";
const SESSION_HELP: &str = "\
commands: feed | play | left | right | giveup | medicate | discipline | clean | sleep | save | status | menu";

// ── Presentation ──────────────────────────────────────────────

/// Console output plus a structured log line per notification.
struct TerminalSink {
    console: ConsoleSink<Stdout>,
    log: LogEventSink,
}

impl TerminalSink {
    fn new(name: &PetName) -> Self {
        Self {
            console: ConsoleSink::new(io::stdout(), name.display_name()),
            log: LogEventSink::new(),
        }
    }
}

impl EventSink for TerminalSink {
    fn emit(&mut self, event: &PetNotification) {
        self.log.emit(event);
        self.console.emit(event);
    }
}

// ── Input thread ──────────────────────────────────────────────

fn parse_session_command(line: &str) -> Option<SessionCommand> {
    let command = match line {
        "feed" => SessionCommand::Act(UserAction::Feed),
        "play" => SessionCommand::Act(UserAction::Play),
        "giveup" => SessionCommand::Abandon,
        "medicate" => SessionCommand::Act(UserAction::Medicate),
        "discipline" => SessionCommand::Act(UserAction::Discipline),
        "clean" => SessionCommand::Act(UserAction::Clean),
        "sleep" | "wake" => SessionCommand::Act(UserAction::ToggleSleep),
        "save" => SessionCommand::Save,
        "status" => SessionCommand::Snapshot,
        "menu" => SessionCommand::Menu,
        other => SessionCommand::Guess(other.parse::<Direction>().ok()?),
    };
    Some(command)
}

/// Read stdin forever.  Session lines go to [`COMMANDS`] without blocking;
/// menu lines go to [`MENU`].  End of input ends any session, then tells the
/// menu loop.
fn spawn_input_thread() -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("input".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line.trim().to_string(),
                    Err(e) => {
                        warn!("Input: read failed: {}", e);
                        break;
                    }
                };
                if line.is_empty() {
                    continue;
                }
                if IN_SESSION.load(Ordering::Acquire) {
                    match parse_session_command(&line) {
                        Some(command) => {
                            push_command(&COMMANDS, command);
                        }
                        None if line == "help" => println!("{}", SESSION_HELP),
                        None => println!("unknown command {:?}; try 'help'", line),
                    }
                } else {
                    future::block_on(MENU.send(MenuInput::Line(line)));
                }
            }
            info!("Input: end of input");
            if IN_SESSION.load(Ordering::Acquire) {
                push_command(&COMMANDS, SessionCommand::Menu);
            }
            future::block_on(MENU.send(MenuInput::EndOfInput));
        })
}

// ── Session ───────────────────────────────────────────────────

fn play_session(service: PetService, store: &mut FileSaveStore, mut sink: TerminalSink) {
    drain_commands(&COMMANDS);
    IN_SESSION.store(true, Ordering::Release);
    println!("{}", SESSION_HELP);

    let end = run_session(service, &COMMANDS, &mut sink, store, &mut rand::thread_rng());

    IN_SESSION.store(false, Ordering::Release);
    let state = if end.pet.is_alive() { "left" } else { "is gone" };
    println!(
        "{} {} after {} ticks.  Back at the menu.",
        end.pet.name.display_name(),
        state,
        end.ticks
    );
}

fn new_pet(args: &str, config: &PetConfig, store: &mut FileSaveStore) -> Result<()> {
    let (name, style) = match args.split_once(' ') {
        Some((name, style)) => (name, style.trim()),
        None => (args, DEFAULT_STYLE),
    };
    let mut service = PetService::new_pet(config.clone(), name, style)?;
    if store.exists(&service.pet().name) {
        println!("note: saving will overwrite the existing {:?}", name);
    }
    let mut sink = TerminalSink::new(&service.pet().name);
    service.start(&mut sink, store);
    play_session(service, store, sink);
    Ok(())
}

fn load_pet(name: &str, config: &PetConfig, store: &mut FileSaveStore) -> Result<()> {
    let name = PetName::new(name).map_err(Error::from)?;
    let mut sink = TerminalSink::new(&name);
    let service = PetService::load(config.clone(), &name, store, &mut sink)
        .with_context(|| format!("cannot load {:?}", name.as_str()))?;
    play_session(service, store, sink);
    Ok(())
}

fn list_saves(store: &FileSaveStore) -> Result<()> {
    let names = store.list().map_err(Error::from)?;
    if names.is_empty() {
        println!("no saves in {}", store.dir().display());
    }
    for name in names {
        println!("  {}", name);
    }
    Ok(())
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config_path =
        std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config_file = JsonConfigFile::new(config_path);
    let config = config_file
        .load()
        .map_err(Error::from)
        .with_context(|| format!("reading {}", config_file.path().display()))?;
    info!(
        "Tamagotchi v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config_file.path().display()
    );

    let mut store = FileSaveStore::from_config(&config);
    let _input = spawn_input_thread()?;

    println!("Tamagotchi v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", MENU_HELP);

    loop {
        print!("> ");
        io::stdout().flush()?;
        let MenuInput::Line(line) = future::block_on(MENU.receive()) else {
            break;
        };
        let (command, args) = line
            .split_once(' ')
            .map_or((line.as_str(), ""), |(c, a)| (c, a.trim()));

        let result = match command {
            "new" if !args.is_empty() => new_pet(args, &config, &mut store),
            "load" if !args.is_empty() => load_pet(args, &config, &mut store),
            "saves" => list_saves(&store),
            "themes" => {
                for theme in THEMES {
                    println!("  {}", theme);
                }
                Ok(())
            }
            "help" => {
                println!("{}", MENU_HELP);
                Ok(())
            }
            "quit" | "exit" => break,
            _ => {
                println!("{}", MENU_HELP);
                Ok(())
            }
        };
        if let Err(e) = result {
            println!("error: {:#}", e);
        }
    }

    info!("Goodbye");
    Ok(())
}
