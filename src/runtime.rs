//! Async session driver.
//!
//! Runs one pet session on an `edge-executor` executor: up to three timer
//! tasks publish [`Pulse`]s, and a single controller future consumes both
//! the pulse channel and the command channel, feeding the
//! [`PetService`] one input at a time.
//!
//! ```text
//!  ┌──────────────────────────────────────────────────────────────┐
//!  │  futures_lite::future::block_on                              │
//!  │  ┌────────────────────────────────────────────────────────┐  │
//!  │  │  edge_executor::LocalExecutor                          │  │
//!  │  │                                                        │  │
//!  │  │  ┌─────────┐  ┌──────────┐  ┌─────────┐                │  │
//!  │  │  │ Clock   │  │ Sickness │  │ Sleep   │ ──▶ pulses      │  │
//!  │  │  │ 100ms ⏱ │  │ 1s ⏱     │  │ 100ms ⏱ │                │  │
//!  │  │  └─────────┘  └──────────┘  └─────────┘                │  │
//!  │  │                                                        │  │
//!  │  │  controller: pulses | commands ──▶ PetService          │  │
//!  │  └────────────────────────────────────────────────────────┘  │
//!  └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Timer tasks are owned through their [`Task`] handles.  After every input
//! the controller reconciles the handles against the service: a process the
//! service no longer runs has its handle dropped, which cancels the timer.

use core::time::Duration;

use async_io_mini::Timer;
use edge_executor::{LocalExecutor, Task};
use futures_lite::future;
use log::{debug, info, warn};
use rand::Rng;

use crate::app::commands::{MinigameOutcome, UserAction};
use crate::app::events::PetNotification;
use crate::app::ports::{EventSink, SaveStore};
use crate::app::service::PetService;
use crate::events::{CommandChannel, Pulse, PulseChannel, SessionCommand};
use crate::minigame::GuessingGame;
use crate::pet::Pet;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEnd {
    /// The pet as it was when the session closed.
    pub pet: Pet,
    /// Master clock ticks evaluated during the session.
    pub ticks: u32,
}

// ── Timer tasks ──────────────────────────────────────────────

/// Master clock: one pulse per interval, forever.
async fn clock_task(pulses: &PulseChannel, interval: Duration) {
    loop {
        Timer::after(interval).await;
        pulses.send(Pulse::Clock).await;
    }
}

/// Sickness loop: pulses at onset, then once per interval.
async fn sickness_task(pulses: &PulseChannel, interval: Duration, generation: u32) {
    loop {
        pulses.send(Pulse::Sickness(generation)).await;
        Timer::after(interval).await;
    }
}

/// Sleep loop: a fixed number of periods, then the task ends.
async fn sleep_task(pulses: &PulseChannel, interval: Duration, generation: u32, periods: u32) {
    for _ in 0..periods {
        Timer::after(interval).await;
        pulses.send(Pulse::Sleep(generation)).await;
    }
    debug!("Sleep timer {} finished", generation);
}

// ── Timer handles ────────────────────────────────────────────

#[derive(Default)]
struct Timers {
    clock: Option<Task<()>>,
    sickness: Option<(u32, Task<()>)>,
    sleep: Option<(u32, Task<()>)>,
}

impl Timers {
    /// Start or cancel timer tasks so they match what the service runs.
    fn reconcile<'a>(
        &mut self,
        executor: &LocalExecutor<'a, 8>,
        pulses: &'a PulseChannel,
        service: &PetService,
    ) {
        let config = service.config();

        if service.clock_running() {
            if self.clock.is_none() {
                let interval = Duration::from_millis(u64::from(config.tick_interval_ms));
                self.clock = Some(executor.spawn(clock_task(pulses, interval)));
                info!("Clock timer started ({:?})", interval);
            }
        } else if self.clock.take().is_some() {
            info!("Clock timer cancelled");
        }

        let wanted = service.sickness_generation();
        if self.sickness.as_ref().map(|(g, _)| *g) != wanted {
            self.sickness = wanted.map(|generation| {
                let interval = Duration::from_millis(u64::from(config.sickness_interval_ms));
                debug!("Sickness timer {} started", generation);
                (generation, executor.spawn(sickness_task(pulses, interval, generation)))
            });
        }

        let wanted = service.sleep_generation();
        if self.sleep.as_ref().map(|(g, _)| *g) != wanted {
            self.sleep = wanted.map(|generation| {
                let interval = Duration::from_millis(u64::from(config.sleep_interval_ms));
                debug!("Sleep timer {} started", generation);
                let task = sleep_task(pulses, interval, generation, config.sleep_periods);
                (generation, executor.spawn(task))
            });
        }
    }
}

// ── Controller ───────────────────────────────────────────────

enum Input {
    Pulse(Pulse),
    Command(SessionCommand),
}

/// The single writer.  Owns the service until the session ends.
async fn controller<'a, R: Rng + ?Sized>(
    executor: &LocalExecutor<'a, 8>,
    pulses: &'a PulseChannel,
    commands: &CommandChannel,
    mut service: PetService,
    sink: &mut impl EventSink,
    store: &mut impl SaveStore,
    rng: &mut R,
) -> SessionEnd {
    let mut timers = Timers::default();
    let mut game: Option<GuessingGame> = None;

    loop {
        timers.reconcile(executor, pulses, &service);

        let input = future::or(
            async { Input::Pulse(pulses.receive().await) },
            async { Input::Command(commands.receive().await) },
        )
        .await;

        let command = match input {
            Input::Pulse(pulse) => {
                service.handle_pulse(pulse, sink, store);
                continue;
            }
            Input::Command(command) => command,
        };

        match command {
            SessionCommand::Act(UserAction::Play) => {
                if service.start_minigame(sink, store).is_applied() {
                    let round = GuessingGame::new(rng);
                    debug!("Minigame started, hidden={}", round.hidden());
                    game = Some(round);
                }
            }
            SessionCommand::Act(UserAction::FinishMinigame(outcome)) => {
                game = None;
                service.finish_minigame(outcome, sink, store);
            }
            SessionCommand::Act(action) => {
                service.handle_action(action, sink, store);
            }
            SessionCommand::Guess(direction) => match game.take() {
                Some(round) => {
                    let outcome = round.guess(direction);
                    info!("Guessed {}, pet looked {}: {:?}", direction, round.hidden(), outcome);
                    service.finish_minigame(outcome, sink, store);
                }
                None => debug!("Guess {} ignored: no game in progress", direction),
            },
            SessionCommand::Abandon => {
                if game.take().is_some() {
                    service.finish_minigame(MinigameOutcome::Lose, sink, store);
                }
            }
            SessionCommand::Save => {
                if let Err(e) = service.save(sink, store) {
                    warn!("Save failed: {}", e);
                    sink.emit(&PetNotification::StatusMessage(format!("Save failed: {}", e)));
                }
            }
            SessionCommand::Snapshot => service.publish_snapshot(sink),
            SessionCommand::Menu => {
                drop(timers);
                let ticks = service.clock_tick().saturating_sub(1);
                let pet = service.return_to_menu();
                return SessionEnd { pet, ticks };
            }
        }
    }
}

// ── Entry point ──────────────────────────────────────────────

/// Drive a started session until a [`SessionCommand::Menu`] arrives on
/// `commands`.  Blocks the calling thread.
pub fn run_session<R: Rng + ?Sized>(
    service: PetService,
    commands: &CommandChannel,
    sink: &mut impl EventSink,
    store: &mut impl SaveStore,
    rng: &mut R,
) -> SessionEnd {
    let pulses = PulseChannel::new();
    let executor: LocalExecutor<'_, 8> = LocalExecutor::new();

    info!(
        "Session runtime started for {:?}",
        service.pet().name.as_str()
    );
    let end = future::block_on(executor.run(controller(
        &executor, &pulses, commands, service, sink, store, rng,
    )));
    info!("Session runtime stopped after {} ticks", end.ticks);
    end
}
