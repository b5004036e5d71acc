//! Clock and sub-process cycle engines.
//!
//! Pure counters with no notion of wall-clock time: the async
//! [`runtime`](crate::runtime) owns the timers and turns each elapsed interval
//! into a [`Pulse`](crate::events::Pulse).  The service then advances the
//! matching engine here.
//!
//! ```text
//!   master clock (100 ms) ──▶ Clock::advance ──▶ SchedulerDelegate
//!   sickness loop (1 s)   ──▶ SicknessCycle::pulse
//!   sleep loop (100 ms)   ──▶ SleepCycle::advance ──▶ SleepStep
//!                                   │
//!                                   ▼
//!                      PetService::handle_pulse()
//! ```

use crate::app::ports::{ClockEvent, SchedulerDelegate};
use crate::config::PetConfig;
use crate::pet::Stat;
use log::{debug, info};

// ═══════════════════════════════════════════════════════════════
//  Master clock
// ═══════════════════════════════════════════════════════════════

/// One row of the clock's period table.
#[derive(Debug, Clone, Copy)]
struct PeriodEntry {
    every: u32,
    event: ClockEvent,
}

/// Number of rows in the period table.
pub const PERIOD_TABLE_LEN: usize = 6;

/// The master clock.
///
/// Keeps a monotonically increasing `tick` counter that starts at 1.  Each
/// call to [`advance`](Self::advance) evaluates the period table against the
/// current tick, hands every match to the [`SchedulerDelegate`] in table
/// order, then increments the counter.
pub struct Clock {
    table: [PeriodEntry; PERIOD_TABLE_LEN],
    tick: u32,
    running: bool,
}

impl Clock {
    pub fn new(config: &PetConfig) -> Self {
        Self {
            table: [
                PeriodEntry {
                    every: config.hunger_decay_every,
                    event: ClockEvent::Decay(Stat::Hunger),
                },
                PeriodEntry {
                    every: config.happiness_decay_every,
                    event: ClockEvent::Decay(Stat::Happiness),
                },
                PeriodEntry {
                    every: config.health_decay_every,
                    event: ClockEvent::Decay(Stat::Health),
                },
                PeriodEntry {
                    every: config.discipline_every,
                    event: ClockEvent::DisciplineNeeded,
                },
                PeriodEntry {
                    every: config.cleaning_every,
                    event: ClockEvent::CleaningNeeded,
                },
                PeriodEntry {
                    every: config.age_up_every,
                    event: ClockEvent::AgeUp,
                },
            ],
            tick: 1,
            running: true,
        }
    }

    /// Evaluate the current tick and move to the next one.
    ///
    /// Returns the number of events handed to `delegate`.  A halted clock
    /// fires nothing and does not advance.
    pub fn advance(&mut self, delegate: &mut dyn SchedulerDelegate) -> usize {
        if !self.running {
            return 0;
        }

        let mut fired = 0;
        for entry in &self.table {
            // A zero period never fires.
            if entry.every != 0 && self.tick % entry.every == 0 {
                debug!("Clock: tick {} fired {:?}", self.tick, entry.event);
                delegate.on_fired(entry.event);
                fired += 1;
            }
        }
        self.tick = self.tick.wrapping_add(1);
        fired
    }

    /// Stop permanently.  Only a fresh clock starts again.
    pub fn halt(&mut self) {
        if self.running {
            info!("Clock: halted at tick {}", self.tick);
        }
        self.running = false;
    }

    /// The tick that the next [`advance`](Self::advance) evaluates.
    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

// ═══════════════════════════════════════════════════════════════
//  Sickness cycle
// ═══════════════════════════════════════════════════════════════

/// Bookkeeping for one run of the sickness loop.
///
/// The loop itself carries no state beyond its generation: every pulse
/// applies the same losses.  The generation lets the service discard pulses
/// from a loop that has already been stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SicknessCycle {
    generation: u32,
    pulses: u32,
}

impl SicknessCycle {
    pub fn new(generation: u32) -> Self {
        info!("Sickness: cycle {} started", generation);
        Self {
            generation,
            pulses: 0,
        }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Record one elapsed period.
    pub fn pulse(&mut self) {
        self.pulses += 1;
        debug!("Sickness: cycle {} pulse {}", self.generation, self.pulses);
    }

    pub fn pulses(&self) -> u32 {
        self.pulses
    }
}

// ═══════════════════════════════════════════════════════════════
//  Sleep cycle
// ═══════════════════════════════════════════════════════════════

/// What one sleep period does to the pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepStep {
    /// 1-based period number.
    pub period: u32,
    pub health_gain: u8,
    pub happiness_gain: u8,
    /// The nap is over after this step.
    pub finished: bool,
}

/// A fixed-length nap: `sleep_periods` periods, recovering health on every
/// `sleep_health_every`th and happiness on every `sleep_happiness_every`th.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SleepCycle {
    generation: u32,
    period: u32,
    periods: u32,
    health_every: u32,
    health_gain: u8,
    happiness_every: u32,
    happiness_gain: u8,
}

impl SleepCycle {
    pub fn new(generation: u32, config: &PetConfig) -> Self {
        info!(
            "Sleep: cycle {} started ({} periods)",
            generation, config.sleep_periods
        );
        Self {
            generation,
            period: 0,
            periods: config.sleep_periods,
            health_every: config.sleep_health_every,
            health_gain: config.sleep_health_gain,
            happiness_every: config.sleep_happiness_every,
            happiness_gain: config.sleep_happiness_gain,
        }
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Periods completed so far.
    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn is_finished(&self) -> bool {
        self.period >= self.periods
    }

    /// Complete the next period.  Returns `None` once the nap is over, so
    /// the finishing step is produced exactly once.
    pub fn advance(&mut self) -> Option<SleepStep> {
        if self.is_finished() {
            return None;
        }
        self.period += 1;

        let on = |every: u32, gain: u8| {
            if every != 0 && self.period % every == 0 {
                gain
            } else {
                0
            }
        };
        Some(SleepStep {
            period: self.period,
            health_gain: on(self.health_every, self.health_gain),
            happiness_gain: on(self.happiness_every, self.happiness_gain),
            finished: self.period >= self.periods,
        })
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
