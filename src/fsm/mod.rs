//! Function-pointer phase machine for the pet life cycle.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  PhaseTable                                               │
//! │  ┌──────────┬───────────┬──────────┬───────────────────┐  │
//! │  │ Phase    │ on_enter  │ on_exit  │ on_event          │  │
//! │  ├──────────┼───────────┼──────────┼───────────────────┤  │
//! │  │ Awake    │ -         │ -        │ fn(ctx,ev)->Opt<> │  │
//! │  │ Sick     │ fn(ctx)   │ fn(ctx)  │ fn(ctx,ev)->Opt<> │  │
//! │  │ Sleeping │ fn(ctx)   │ fn(ctx)  │ fn(ctx,ev)->Opt<> │  │
//! │  │ Dead     │ fn(ctx)   │ -        │ fn(ctx,ev)->Opt<> │  │
//! │  └──────────┴───────────┴──────────┴───────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Every [`PetEvent`] is handed to `on_event` of the **current** phase.  If
//! it returns `Some(next)`, the engine runs `on_exit` for the current phase,
//! then `on_enter` for the next.  After every event the engine enforces the
//! death rule (health at the floor means dead) and republishes the derived
//! controls and status line.
//!
//! Need flags and the minigame flag are orthogonal to the phase and live in
//! [`LifeFlags`](crate::pet::LifeFlags).

pub mod context;
pub mod states;

use context::PetContext;
use log::{debug, info};

use crate::app::commands::MinigameOutcome;
use crate::app::ports::ClockEvent;
use crate::pet::Stat;
use crate::scheduler::SleepStep;

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

/// Mutually exclusive life phases.
/// Must stay in sync with the table built in [`states::build_phase_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Phase {
    Awake = 0,
    Sick = 1,
    Sleeping = 2,
    Dead = 3,
}

impl Phase {
    /// Total number of phases, sizes the table array.
    pub const COUNT: usize = 4;

    /// Convert an index back to `Phase`.  Panics on out-of-range in debug
    /// builds; returns `Dead` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Awake,
            1 => Self::Sick,
            2 => Self::Sleeping,
            3 => Self::Dead,
            _ => {
                debug_assert!(false, "invalid phase index: {idx}");
                Self::Dead
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Everything the machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetEvent {
    /// A master clock table entry fired.
    Clock(ClockEvent),
    /// One sickness period elapsed.
    SicknessPulse,
    /// One sleep period elapsed.
    SleepPulse(SleepStep),
    Feed,
    StartMinigame,
    FinishMinigame(MinigameOutcome),
    Medicate,
    Discipline,
    Clean,
    ToggleSleep,
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each phase transition.
pub type PhaseActionFn = fn(&mut PetContext);

/// Signature for the event handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type PhaseEventFn = fn(&mut PetContext, &PetEvent) -> Option<Phase>;

// ---------------------------------------------------------------------------
// Phase descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single phase.
pub struct PhaseDescriptor {
    pub id: Phase,
    pub name: &'static str,
    pub on_enter: Option<PhaseActionFn>,
    pub on_exit: Option<PhaseActionFn>,
    pub on_event: PhaseEventFn,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The phase machine engine.
///
/// Owns the phase table (array of [`PhaseDescriptor`]); the mutable
/// [`PetContext`] is threaded through every handler call by the caller.
pub struct PetMachine {
    /// Fixed-size table indexed by `Phase as usize`.
    table: [PhaseDescriptor; Phase::COUNT],
    /// Index of the current phase.
    current: usize,
    /// Events handled since construction.
    events_handled: u64,
    /// Event count at which the current phase was entered.
    phase_entry: u64,
}

impl PetMachine {
    /// Construct a machine with the given table, starting in `initial`.
    pub fn new(table: [PhaseDescriptor; Phase::COUNT], initial: Phase) -> Self {
        Self {
            table,
            current: initial as usize,
            events_handled: 0,
            phase_entry: 0,
        }
    }

    /// Run the initial `on_enter` and publish the first controls and status.
    /// Call once after construction, before the first `handle()`.
    pub fn start(&mut self, ctx: &mut PetContext) {
        info!("Phase machine starting in: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
        self.settle(ctx);
    }

    /// Handle one event.
    ///
    /// 1. Call `on_event` for the current phase.
    /// 2. If it returns `Some(next)`, transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    /// 3. Enforce the death rule and republish derived state.
    pub fn handle(&mut self, event: &PetEvent, ctx: &mut PetContext) {
        self.events_handled += 1;
        ctx.begin_event();

        let next = (self.table[self.current].on_event)(ctx, event);
        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
        self.settle(ctx);
    }

    /// Force an immediate transition regardless of the current handler.
    pub fn force_transition(&mut self, next: Phase, ctx: &mut PetContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
            self.settle(ctx);
        }
    }

    /// The current phase.
    pub fn current_phase(&self) -> Phase {
        Phase::from_index(self.current)
    }

    /// Name of the current phase, for logs.
    pub fn current_name(&self) -> &'static str {
        self.table[self.current].name
    }

    /// How many events were handled while in the current phase.
    pub fn events_in_current_phase(&self) -> u64 {
        self.events_handled - self.phase_entry
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn settle(&mut self, ctx: &mut PetContext) {
        if self.current != Phase::Dead as usize && ctx.pet.stats.is_depleted(Stat::Health) {
            debug!("Phase machine: health depleted, forcing Dead");
            self.transition(Phase::Dead, ctx);
        }
        ctx.refresh_status(false);
        ctx.refresh_controls();
    }

    fn transition(&mut self, next: Phase, ctx: &mut PetContext) {
        let next_idx = next as usize;

        info!(
            "Phase transition: {} -> {} (after {} events)",
            self.table[self.current].name,
            self.table[next_idx].name,
            self.events_in_current_phase()
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.phase_entry = self.events_handled;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
