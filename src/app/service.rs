//! Application service, the hexagonal core.
//!
//! [`PetService`] owns the phase machine, the master clock and the two
//! sub-process cycles.  It is the single writer of all pet state: timer
//! pulses and user actions both funnel through it, one at a time.  All I/O
//! flows through port traits injected at call sites, so the whole service
//! is testable with mock adapters.
//!
//! ```text
//!   Pulse ──────▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       PetService       │
//! UserAction ───▶ │ Machine · Clock · Cycles│ ──▶ SaveStore
//!                 └────────────────────────┘
//! ```

use heapless::Vec as HVec;
use log::{debug, info, warn};

use crate::config::PetConfig;
use crate::error::{RecordError, Result};
use crate::events::Pulse;
use crate::fsm::context::{Directive, PetContext};
use crate::fsm::states::build_phase_table;
use crate::fsm::{PetEvent, PetMachine, Phase};
use crate::pet::{FIRST_STAGE, Pet, PetName, Stat};
use crate::record::SaveRecord;
use crate::scheduler::{Clock, PERIOD_TABLE_LEN, SicknessCycle, SleepCycle};

use super::commands::{ActionOutcome, MinigameOutcome, Rejection, UserAction};
use super::events::{Controls, PetNotification};
use super::ports::{ClockEvent, EventSink, MinigamePort, SaveStore, SchedulerDelegate};

/// Transient status shown after a successful save.
pub const SAVED_MESSAGE: &str = "File has been saved!";

// ───────────────────────────────────────────────────────────────
// Clock delegate
// ───────────────────────────────────────────────────────────────

/// Collects the events fired on one tick so they can be dispatched after
/// the clock borrow ends.
#[derive(Default)]
struct FiredEvents {
    events: HVec<ClockEvent, PERIOD_TABLE_LEN>,
}

impl SchedulerDelegate for FiredEvents {
    fn on_fired(&mut self, event: ClockEvent) {
        if self.events.push(event).is_err() {
            warn!("Clock fired more events than table entries, dropping {:?}", event);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// PetService
// ───────────────────────────────────────────────────────────────

/// One live pet session.
pub struct PetService {
    machine: PetMachine,
    ctx: PetContext,
    clock: Clock,
    sickness: Option<SicknessCycle>,
    sleep: Option<SleepCycle>,
    next_generation: u32,
    started: bool,
}

impl PetService {
    /// Construct a session around an existing pet.
    ///
    /// Does **not** start the machine; call [`start`](Self::start) next.
    pub fn new(pet: Pet, config: PetConfig) -> Self {
        let clock = Clock::new(&config);
        let ctx = PetContext::new(pet, config);
        let machine = PetMachine::new(build_phase_table(), Phase::Awake);
        Self {
            machine,
            ctx,
            clock,
            sickness: None,
            sleep: None,
            next_generation: 1,
            started: false,
        }
    }

    /// Hatch a brand-new pet with full stats at stage 1.
    pub fn new_pet(config: PetConfig, name: &str, style: &str) -> Result<Self> {
        config.validate()?;
        let name = PetName::new(name)?;
        if style.contains(['\n', '\r']) {
            return Err(RecordError::InvalidStyle.into());
        }
        info!("Hatching new pet {:?} ({})", name.as_str(), style);
        Ok(Self::new(Pet::hatch(name, style), config))
    }

    /// Rebuild a session from a decoded save record.
    pub fn from_record(config: PetConfig, record: &SaveRecord) -> Result<Self> {
        config.validate()?;
        if !(FIRST_STAGE..=config.max_age_stage).contains(&record.age_stage) {
            return Err(RecordError::OutOfRange("age stage").into());
        }
        info!("Restoring pet {:?} at stage {}", record.name.as_str(), record.age_stage);
        Ok(Self::new(record.to_pet(), config))
    }

    /// Load `name` from `store` and start the session.
    ///
    /// A corrupt record, or one naming another pet, aborts the load with no
    /// state applied.
    pub fn load(
        config: PetConfig,
        name: &PetName,
        store: &mut impl SaveStore,
        sink: &mut impl EventSink,
    ) -> Result<Self> {
        let record = store.load(name)?;
        if record.name != *name {
            warn!(
                "Save for {:?} holds pet {:?}",
                name.as_str(),
                record.name.as_str()
            );
            return Err(RecordError::NameMismatch.into());
        }
        let mut service = Self::from_record(config, &record)?;
        service.start(sink, store);
        Ok(service)
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Publish the initial pet state and run the machine's first entry.
    ///
    /// A restored pet with zero health dies here, which deletes its save.
    pub fn start(&mut self, sink: &mut impl EventSink, store: &mut impl SaveStore) {
        if self.started {
            debug!("PetService already started");
            return;
        }
        self.started = true;
        self.emit_stats(sink);
        self.machine.start(&mut self.ctx);
        self.flush(sink, store);
        info!(
            "Session started for {:?} in {}",
            self.ctx.pet.name.as_str(),
            self.machine.current_name()
        );
    }

    /// End the session: stop every scheduled process and hand the pet back.
    pub fn return_to_menu(mut self) -> Pet {
        self.shutdown();
        info!(
            "Session for {:?} ended after {} ticks",
            self.ctx.pet.name.as_str(),
            self.clock.tick()
        );
        self.ctx.pet
    }

    /// Stop the clock and drop both sub-process cycles.
    pub fn shutdown(&mut self) {
        self.clock.halt();
        self.sickness = None;
        self.sleep = None;
    }

    // ── Pulses ────────────────────────────────────────────────

    /// Apply one elapsed timer interval.  Pulses from a cycle that has
    /// since been stopped or replaced are dropped.
    pub fn handle_pulse(
        &mut self,
        pulse: Pulse,
        sink: &mut impl EventSink,
        store: &mut impl SaveStore,
    ) {
        match pulse {
            Pulse::Clock => {
                let mut fired = FiredEvents::default();
                self.clock.advance(&mut fired);
                for event in fired.events {
                    self.dispatch(PetEvent::Clock(event), sink, store);
                }
            }
            Pulse::Sickness(generation) => {
                let Some(cycle) = self
                    .sickness
                    .as_mut()
                    .filter(|c| c.generation() == generation)
                else {
                    debug!("Dropping stale sickness pulse (generation {})", generation);
                    return;
                };
                cycle.pulse();
                self.dispatch(PetEvent::SicknessPulse, sink, store);
            }
            Pulse::Sleep(generation) => {
                let step = self
                    .sleep
                    .as_mut()
                    .filter(|c| c.generation() == generation)
                    .and_then(SleepCycle::advance);
                match step {
                    Some(step) => {
                        self.dispatch(PetEvent::SleepPulse(step), sink, store);
                    }
                    None => debug!("Dropping stale sleep pulse (generation {})", generation),
                }
            }
        }
    }

    // ── User actions ──────────────────────────────────────────

    /// Apply one user action.  Illegal actions are ignored, never errors.
    pub fn handle_action(
        &mut self,
        action: UserAction,
        sink: &mut impl EventSink,
        store: &mut impl SaveStore,
    ) -> ActionOutcome {
        let event = match action {
            UserAction::Feed => PetEvent::Feed,
            UserAction::Play => PetEvent::StartMinigame,
            UserAction::FinishMinigame(outcome) => PetEvent::FinishMinigame(outcome),
            UserAction::Medicate => PetEvent::Medicate,
            UserAction::Discipline => PetEvent::Discipline,
            UserAction::Clean => PetEvent::Clean,
            UserAction::ToggleSleep => PetEvent::ToggleSleep,
        };
        let outcome = self.dispatch(event, sink, store);
        if let ActionOutcome::Ignored(why) = outcome {
            debug!("{:?} ignored: {}", action, why);
        }
        outcome
    }

    pub fn feed(&mut self, sink: &mut impl EventSink, store: &mut impl SaveStore) -> ActionOutcome {
        self.handle_action(UserAction::Feed, sink, store)
    }

    /// Put the pet in minigame mode.  Finish with
    /// [`finish_minigame`](Self::finish_minigame).
    pub fn start_minigame(
        &mut self,
        sink: &mut impl EventSink,
        store: &mut impl SaveStore,
    ) -> ActionOutcome {
        self.handle_action(UserAction::Play, sink, store)
    }

    pub fn finish_minigame(
        &mut self,
        outcome: MinigameOutcome,
        sink: &mut impl EventSink,
        store: &mut impl SaveStore,
    ) -> ActionOutcome {
        self.handle_action(UserAction::FinishMinigame(outcome), sink, store)
    }

    /// Play a whole round against a blocking minigame collaborator.
    pub fn play(
        &mut self,
        game: &mut impl MinigamePort,
        sink: &mut impl EventSink,
        store: &mut impl SaveStore,
    ) -> core::result::Result<MinigameOutcome, Rejection> {
        if let ActionOutcome::Ignored(why) = self.start_minigame(sink, store) {
            return Err(why);
        }
        let outcome = game.play(self.ctx.pet.age_stage);
        info!("Minigame finished: {:?}", outcome);
        match self.finish_minigame(outcome, sink, store) {
            ActionOutcome::Applied => Ok(outcome),
            ActionOutcome::Ignored(why) => Err(why),
        }
    }

    pub fn medicate(
        &mut self,
        sink: &mut impl EventSink,
        store: &mut impl SaveStore,
    ) -> ActionOutcome {
        self.handle_action(UserAction::Medicate, sink, store)
    }

    pub fn discipline(
        &mut self,
        sink: &mut impl EventSink,
        store: &mut impl SaveStore,
    ) -> ActionOutcome {
        self.handle_action(UserAction::Discipline, sink, store)
    }

    pub fn clean(&mut self, sink: &mut impl EventSink, store: &mut impl SaveStore) -> ActionOutcome {
        self.handle_action(UserAction::Clean, sink, store)
    }

    pub fn toggle_sleep(
        &mut self,
        sink: &mut impl EventSink,
        store: &mut impl SaveStore,
    ) -> ActionOutcome {
        self.handle_action(UserAction::ToggleSleep, sink, store)
    }

    /// Persist the pet.  Returns `Ok(None)` without touching the store when
    /// the pet is dead.
    pub fn save(
        &mut self,
        sink: &mut impl EventSink,
        store: &mut impl SaveStore,
    ) -> Result<Option<SaveRecord>> {
        if !self.ctx.pet.is_alive() {
            debug!("Save ignored: {}", Rejection::Dead);
            return Ok(None);
        }
        let record = SaveRecord::from_pet(&self.ctx.pet);
        store.save(&record)?;
        info!("Saved {:?}", record.name.as_str());
        self.ctx.show_transient_status(SAVED_MESSAGE);
        self.flush(sink, store);
        Ok(Some(record))
    }

    /// Re-emit the full presentation state: every stat, the stage, the
    /// status line and the controls.
    pub fn publish_snapshot(&self, sink: &mut impl EventSink) {
        self.emit_stats(sink);
        sink.emit(&PetNotification::StatusMessage(self.ctx.status()));
        sink.emit(&PetNotification::ControlsEnabled(self.ctx.controls()));
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn pet(&self) -> &Pet {
        &self.ctx.pet
    }

    pub fn config(&self) -> &PetConfig {
        &self.ctx.config
    }

    pub fn phase(&self) -> Phase {
        self.machine.current_phase()
    }

    /// Controls as last published.
    pub fn controls(&self) -> Controls {
        self.ctx.controls()
    }

    /// Status line as last published.
    pub fn status(&self) -> String {
        self.ctx.status()
    }

    /// The tick the master clock will evaluate next.
    pub fn clock_tick(&self) -> u32 {
        self.clock.tick()
    }

    pub fn clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Generation of the running sickness cycle, if any.
    pub fn sickness_generation(&self) -> Option<u32> {
        self.sickness.as_ref().map(SicknessCycle::generation)
    }

    /// Generation of the running sleep cycle, if any.
    pub fn sleep_generation(&self) -> Option<u32> {
        self.sleep.as_ref().map(SleepCycle::generation)
    }

    // ── Internal ──────────────────────────────────────────────

    fn dispatch(
        &mut self,
        event: PetEvent,
        sink: &mut impl EventSink,
        store: &mut impl SaveStore,
    ) -> ActionOutcome {
        self.machine.handle(&event, &mut self.ctx);
        let outcome = self.ctx.outcome();
        self.flush(sink, store);
        outcome
    }

    /// Forward queued notifications, then carry out queued directives.
    fn flush(&mut self, sink: &mut impl EventSink, store: &mut impl SaveStore) {
        for notification in self.ctx.take_notifications() {
            sink.emit(&notification);
        }
        for directive in self.ctx.take_directives() {
            self.apply(directive, store);
        }
    }

    fn apply(&mut self, directive: Directive, store: &mut impl SaveStore) {
        match directive {
            Directive::StartSickness => {
                let generation = self.fresh_generation();
                self.sickness = Some(SicknessCycle::new(generation));
                info!("Sickness cycle started (generation {})", generation);
            }
            Directive::StopSickness => {
                if let Some(cycle) = self.sickness.take() {
                    info!(
                        "Sickness cycle stopped after {} pulses (generation {})",
                        cycle.pulses(),
                        cycle.generation()
                    );
                }
            }
            Directive::StartSleep => {
                let generation = self.fresh_generation();
                self.sleep = Some(SleepCycle::new(generation, &self.ctx.config));
                info!("Sleep cycle started (generation {})", generation);
            }
            Directive::StopSleep => {
                if let Some(cycle) = self.sleep.take() {
                    info!(
                        "Sleep cycle stopped at period {} (generation {})",
                        cycle.period(),
                        cycle.generation()
                    );
                }
            }
            Directive::HaltClock => {
                self.clock.halt();
                info!("Clock halted at tick {}", self.clock.tick());
            }
            Directive::DeleteSave => {
                let name = &self.ctx.pet.name;
                match store.delete(name) {
                    Ok(()) => info!("Deleted save for {:?}", name.as_str()),
                    Err(e) => warn!("Could not delete save for {:?}: {}", name.as_str(), e),
                }
            }
        }
    }

    fn fresh_generation(&mut self) -> u32 {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        generation
    }

    fn emit_stats(&self, sink: &mut impl EventSink) {
        for stat in Stat::ALL {
            sink.emit(&PetNotification::StatChanged {
                stat,
                value: self.ctx.pet.stat(stat),
            });
        }
        sink.emit(&PetNotification::StageChanged(self.ctx.pet.age_stage));
    }
}
