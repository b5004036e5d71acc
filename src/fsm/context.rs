//! Shared mutable context threaded through every phase handler.
//!
//! `PetContext` is the blackboard that handlers read from and write to.  It
//! holds the pet itself and the configuration, plus three outputs that the
//! [`PetService`](crate::app::service::PetService) drains after each event:
//! queued notifications, sub-process directives and the outcome of the user
//! action being handled.

use crate::app::commands::{ActionOutcome, Rejection};
use crate::app::events::{Controls, PetNotification};
use crate::config::PetConfig;
use crate::pet::{LifeFlag, Pet, Stat};

// ---------------------------------------------------------------------------
// Directives (written by handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Side effects a handler asks the owning service to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    StartSickness,
    StopSickness,
    StartSleep,
    StopSleep,
    /// Stop the master clock for good.
    HaltClock,
    /// Remove this pet's save record.
    DeleteSave,
}

// ---------------------------------------------------------------------------
// Status text
// ---------------------------------------------------------------------------

/// Status line derived from the pet's flags.
///
/// Precedence: dead, sick, discipline, cleaning, nothing.
pub fn derive_status(pet: &Pet) -> String {
    let name = pet.name.display_name();
    let f = &pet.flags;
    if f.is_dead {
        format!("{name} has died")
    } else if f.is_sick {
        format!("{name} needs medicine.")
    } else if f.needs_discipline {
        format!("{name} needs Disciplining")
    } else if f.needs_cleaning {
        format!("{name} needs Cleaning")
    } else {
        String::new()
    }
}

// ---------------------------------------------------------------------------
// PetContext
// ---------------------------------------------------------------------------

/// The shared context passed to every phase handler function.
pub struct PetContext {
    // -- State --
    pub pet: Pet,
    pub config: PetConfig,

    // -- Last published presentation state --
    controls: Option<Controls>,
    status: Option<String>,

    // -- Outputs --
    outbox: Vec<PetNotification>,
    directives: Vec<Directive>,
    outcome: ActionOutcome,
}

impl PetContext {
    pub fn new(pet: Pet, config: PetConfig) -> Self {
        Self {
            pet,
            config,
            controls: None,
            status: None,
            outbox: Vec::new(),
            directives: Vec::new(),
            outcome: ActionOutcome::Applied,
        }
    }

    // -- Mutation helpers --

    /// Adjust a stat through the Stat Store and notify if it moved.
    pub fn adjust(&mut self, stat: Stat, delta: i32) -> u8 {
        let before = self.pet.stat(stat);
        let value = self.pet.stats.adjust(stat, delta);
        if value != before {
            self.notify(PetNotification::StatChanged { stat, value });
        }
        value
    }

    /// Set a life flag and notify if it flipped.
    pub fn set_flag(&mut self, flag: LifeFlag, value: bool) -> bool {
        let changed = self.pet.flags.set(flag, value);
        if changed {
            self.notify(PetNotification::StateChanged { flag, value });
        }
        changed
    }

    pub fn notify(&mut self, notification: PetNotification) {
        self.outbox.push(notification);
    }

    pub fn direct(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    /// Mark the action being handled as ignored.
    pub fn reject(&mut self, why: Rejection) {
        self.outcome = ActionOutcome::Ignored(why);
    }

    // -- Derived presentation state --

    /// Recompute the controls and notify if they changed.
    pub fn refresh_controls(&mut self) {
        let controls = Controls::derive(&self.pet);
        if self.controls != Some(controls) {
            self.controls = Some(controls);
            self.notify(PetNotification::ControlsEnabled(controls));
        }
    }

    /// Recompute the status line.  Notifies when it changed, or always
    /// when `force` is set.
    pub fn refresh_status(&mut self, force: bool) {
        let status = derive_status(&self.pet);
        if force || self.status.as_deref() != Some(status.as_str()) {
            self.status = Some(status.clone());
            self.notify(PetNotification::StatusMessage(status));
        }
    }

    /// Publish a one-off status line.  The next event's refresh replaces it
    /// with the derived status.
    pub fn show_transient_status(&mut self, message: &str) {
        self.status = Some(message.to_string());
        self.notify(PetNotification::StatusMessage(message.to_string()));
    }

    pub fn controls(&self) -> Controls {
        self.controls
            .unwrap_or_else(|| Controls::derive(&self.pet))
    }

    pub fn status(&self) -> String {
        self.status
            .clone()
            .unwrap_or_else(|| derive_status(&self.pet))
    }

    // -- Draining --

    pub fn begin_event(&mut self) {
        self.outcome = ActionOutcome::Applied;
    }

    pub fn outcome(&self) -> ActionOutcome {
        self.outcome
    }

    pub fn take_notifications(&mut self) -> Vec<PetNotification> {
        core::mem::take(&mut self.outbox)
    }

    pub fn take_directives(&mut self) -> Vec<Directive> {
        core::mem::take(&mut self.directives)
    }
}
