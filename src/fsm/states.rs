//! Concrete phase handler functions and table builder.
//!
//! Each phase is defined by plain `fn` pointers, no closures and no dynamic
//! dispatch.
//!
//! ```text
//!            [hunger|happiness == 0]
//!  AWAKE ─────────────────────────────▶ SICK
//!    │ ▲  ◀──────────[medicate]─────────┘ │
//!    │ │                                  │
//!  [sleep] [sleep | nap over]             │
//!    ▼ │                                  │
//!  SLEEPING                               │
//!                                         │
//!  Any phase ──[health == 0 | too old]──▶ DEAD (terminal)
//! ```

use super::context::{Directive, PetContext};
use super::{Phase, PetEvent, PhaseDescriptor};
use crate::app::commands::{MinigameOutcome, Rejection};
use crate::app::events::PetNotification;
use crate::app::ports::ClockEvent;
use crate::pet::stats::STAT_MIN;
use crate::pet::{LifeFlag, Stat};
use log::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static phase table.  Called once per session.
pub fn build_phase_table() -> [PhaseDescriptor; Phase::COUNT] {
    [
        // Index 0: Awake
        PhaseDescriptor {
            id: Phase::Awake,
            name: "Awake",
            on_enter: None,
            on_exit: None,
            on_event: awake_event,
        },
        // Index 1: Sick
        PhaseDescriptor {
            id: Phase::Sick,
            name: "Sick",
            on_enter: Some(sick_enter),
            on_exit: Some(sick_exit),
            on_event: sick_event,
        },
        // Index 2: Sleeping
        PhaseDescriptor {
            id: Phase::Sleeping,
            name: "Sleeping",
            on_enter: Some(sleeping_enter),
            on_exit: Some(sleeping_exit),
            on_event: sleeping_event,
        },
        // Index 3: Dead
        PhaseDescriptor {
            id: Phase::Dead,
            name: "Dead",
            on_enter: Some(dead_enter),
            on_exit: None,
            on_event: dead_event,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared rules (apply in every living phase)
// ═══════════════════════════════════════════════════════════════════════════

/// Apply one master clock event.
fn apply_clock(ctx: &mut PetContext, event: ClockEvent) -> Option<Phase> {
    match event {
        ClockEvent::Decay(stat) => {
            let value = ctx.adjust(stat, -i32::from(ctx.config.decay_amount));
            if value > STAT_MIN {
                return None;
            }
            match stat {
                Stat::Health => Some(Phase::Dead),
                Stat::Hunger | Stat::Happiness => sickness_onset(ctx, stat),
            }
        }

        ClockEvent::DisciplineNeeded => {
            if ctx.pet.flags.is_sick {
                debug!("Discipline need suppressed: pet is sick");
            } else {
                raise_need(ctx, LifeFlag::NeedsDiscipline);
            }
            None
        }

        ClockEvent::CleaningNeeded => {
            let f = ctx.pet.flags;
            if f.is_sick || f.is_sleeping {
                debug!("Cleaning need suppressed: pet is sick or asleep");
            } else {
                raise_need(ctx, LifeFlag::NeedsCleaning);
            }
            None
        }

        ClockEvent::AgeUp => {
            if ctx.pet.age_stage >= ctx.config.max_age_stage {
                info!("Pet aged past stage {}", ctx.pet.age_stage);
                return Some(Phase::Dead);
            }
            ctx.pet.age_stage += 1;
            info!("Pet reached age stage {}", ctx.pet.age_stage);
            ctx.notify(PetNotification::StageChanged(ctx.pet.age_stage));
            None
        }
    }
}

/// A hunger or happiness stat hit the floor.
fn sickness_onset(ctx: &mut PetContext, cause: Stat) -> Option<Phase> {
    let f = ctx.pet.flags;
    if f.is_sick {
        None
    } else if f.is_sleeping {
        // Re-checked on the next decay after waking.
        debug!("Sickness onset ({cause} at 0) deferred: pet is asleep");
        None
    } else {
        info!("Sickness onset: {cause} at 0");
        Some(Phase::Sick)
    }
}

fn raise_need(ctx: &mut PetContext, flag: LifeFlag) {
    if ctx.set_flag(flag, true) {
        info!("Need raised: {flag}");
    }
}

fn clear_need(ctx: &mut PetContext, flag: LifeFlag) -> Option<Phase> {
    if !ctx.pet.flags.get(flag) {
        ctx.reject(Rejection::NoPendingNeed);
        return None;
    }
    ctx.set_flag(flag, false);
    info!("Need cleared: {flag}");
    // The remaining need (if any) must stay visible.
    ctx.refresh_status(true);
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  AWAKE phase
// ═══════════════════════════════════════════════════════════════════════════

/// Feed, play and sleep need an idle, unblocked pet.
fn awake_gate(ctx: &PetContext) -> Result<(), Rejection> {
    let f = &ctx.pet.flags;
    if f.is_playing_minigame {
        Err(Rejection::PlayingMinigame)
    } else if f.has_pending_need() {
        Err(Rejection::ControlDisabled)
    } else {
        Ok(())
    }
}

fn awake_event(ctx: &mut PetContext, event: &PetEvent) -> Option<Phase> {
    match *event {
        PetEvent::Clock(clock) => {
            if ctx.pet.flags.is_playing_minigame {
                debug!("AWAKE: {clock:?} dropped during minigame");
                return None;
            }
            apply_clock(ctx, clock)
        }

        PetEvent::SicknessPulse | PetEvent::SleepPulse(_) => None,

        PetEvent::Feed => {
            if let Err(why) = awake_gate(ctx) {
                ctx.reject(why);
                return None;
            }
            ctx.adjust(Stat::Hunger, i32::from(ctx.config.feed_gain));
            None
        }

        PetEvent::StartMinigame => {
            if let Err(why) = awake_gate(ctx) {
                ctx.reject(why);
                return None;
            }
            ctx.set_flag(LifeFlag::PlayingMinigame, true);
            info!("AWAKE: minigame started");
            None
        }

        PetEvent::FinishMinigame(outcome) => {
            if !ctx.pet.flags.is_playing_minigame {
                ctx.reject(Rejection::NoMinigame);
                return None;
            }
            ctx.set_flag(LifeFlag::PlayingMinigame, false);
            info!("AWAKE: minigame finished ({outcome:?})");
            if outcome == MinigameOutcome::Win {
                ctx.adjust(Stat::Happiness, i32::from(ctx.config.minigame_win_gain));
            }
            None
        }

        PetEvent::Medicate => {
            ctx.reject(Rejection::NotSick);
            None
        }

        PetEvent::Discipline => clear_need(ctx, LifeFlag::NeedsDiscipline),
        PetEvent::Clean => clear_need(ctx, LifeFlag::NeedsCleaning),

        PetEvent::ToggleSleep => {
            if let Err(why) = awake_gate(ctx) {
                ctx.reject(why);
                return None;
            }
            Some(Phase::Sleeping)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SICK phase: sickness loop running, only medicine helps
// ═══════════════════════════════════════════════════════════════════════════

fn sick_enter(ctx: &mut PetContext) {
    ctx.set_flag(LifeFlag::Sick, true);
    ctx.direct(Directive::StartSickness);
    info!(
        "SICK: losing {} health and {} happiness per period",
        ctx.config.sickness_health_loss, ctx.config.sickness_happiness_loss
    );
}

fn sick_exit(ctx: &mut PetContext) {
    ctx.direct(Directive::StopSickness);
}

fn sick_event(ctx: &mut PetContext, event: &PetEvent) -> Option<Phase> {
    match *event {
        PetEvent::Clock(clock) => apply_clock(ctx, clock),

        PetEvent::SicknessPulse => {
            ctx.adjust(Stat::Health, -i32::from(ctx.config.sickness_health_loss));
            ctx.adjust(
                Stat::Happiness,
                -i32::from(ctx.config.sickness_happiness_loss),
            );
            if ctx.pet.stats.is_depleted(Stat::Health) {
                return Some(Phase::Dead);
            }
            None
        }

        PetEvent::SleepPulse(_) => None,

        PetEvent::Feed | PetEvent::StartMinigame | PetEvent::ToggleSleep => {
            ctx.reject(Rejection::Sick);
            None
        }

        PetEvent::FinishMinigame(_) => {
            ctx.reject(Rejection::NoMinigame);
            None
        }

        PetEvent::Medicate => {
            ctx.pet.medicine_administered = true;
            ctx.set_flag(LifeFlag::Sick, false);
            let gain = i32::from(ctx.config.medicine_gain);
            ctx.adjust(Stat::Hunger, gain);
            ctx.adjust(Stat::Happiness, gain);
            ctx.pet.medicine_administered = false;
            ctx.notify(PetNotification::SicknessResolved);
            info!("SICK: cured by medicine");
            Some(Phase::Awake)
        }

        PetEvent::Discipline => clear_need(ctx, LifeFlag::NeedsDiscipline),
        PetEvent::Clean => clear_need(ctx, LifeFlag::NeedsCleaning),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SLEEPING phase: fixed-length nap
// ═══════════════════════════════════════════════════════════════════════════

fn sleeping_enter(ctx: &mut PetContext) {
    ctx.set_flag(LifeFlag::Sleeping, true);
    ctx.direct(Directive::StartSleep);
    info!("SLEEPING: nap of {} periods", ctx.config.sleep_periods);
}

fn sleeping_exit(ctx: &mut PetContext) {
    ctx.set_flag(LifeFlag::Sleeping, false);
    ctx.direct(Directive::StopSleep);
}

fn wake_up(ctx: &mut PetContext) -> Option<Phase> {
    info!("SLEEPING: woke up");
    ctx.notify(PetNotification::WokeUp);
    Some(Phase::Awake)
}

fn sleeping_event(ctx: &mut PetContext, event: &PetEvent) -> Option<Phase> {
    match *event {
        PetEvent::Clock(clock) => apply_clock(ctx, clock),

        PetEvent::SleepPulse(step) => {
            if step.health_gain > 0 {
                ctx.adjust(Stat::Health, i32::from(step.health_gain));
            }
            if step.happiness_gain > 0 {
                ctx.adjust(Stat::Happiness, i32::from(step.happiness_gain));
            }
            if step.finished { wake_up(ctx) } else { None }
        }

        PetEvent::SicknessPulse => None,

        // A pending need locks the sleep button; only the nap's own end wakes.
        PetEvent::ToggleSleep if ctx.pet.flags.has_pending_need() => {
            ctx.reject(Rejection::ControlDisabled);
            None
        }
        PetEvent::ToggleSleep => wake_up(ctx),

        PetEvent::Feed | PetEvent::StartMinigame => {
            ctx.reject(Rejection::Sleeping);
            None
        }

        PetEvent::FinishMinigame(_) => {
            ctx.reject(Rejection::NoMinigame);
            None
        }

        PetEvent::Medicate => {
            ctx.reject(Rejection::NotSick);
            None
        }

        PetEvent::Discipline => clear_need(ctx, LifeFlag::NeedsDiscipline),
        PetEvent::Clean => clear_need(ctx, LifeFlag::NeedsCleaning),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  DEAD phase: terminal
// ═══════════════════════════════════════════════════════════════════════════

fn dead_enter(ctx: &mut PetContext) {
    ctx.set_flag(LifeFlag::Dead, true);
    ctx.set_flag(LifeFlag::PlayingMinigame, false);
    ctx.notify(PetNotification::Died);
    for directive in [
        Directive::HaltClock,
        Directive::StopSickness,
        Directive::StopSleep,
        Directive::DeleteSave,
    ] {
        ctx.direct(directive);
    }
    warn!(
        "DEAD: {} died at age stage {}",
        ctx.pet.name.display_name(),
        ctx.pet.age_stage
    );
}

fn dead_event(ctx: &mut PetContext, event: &PetEvent) -> Option<Phase> {
    match event {
        PetEvent::Clock(_) | PetEvent::SicknessPulse | PetEvent::SleepPulse(_) => {}
        _ => ctx.reject(Rejection::Dead),
    }
    None
}
