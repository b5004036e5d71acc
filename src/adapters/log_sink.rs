//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every pet notification as one
//! structured line through the `log` facade.  The host binary installs
//! `env_logger`; tests can leave the facade unset.

use log::info;

use crate::app::events::PetNotification;
use crate::app::ports::EventSink;

/// Adapter that logs every [`PetNotification`].
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications logged so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &PetNotification) {
        self.emitted += 1;
        match event {
            PetNotification::StatChanged { stat, value } => {
                info!("STAT | {}={}", stat, value);
            }
            PetNotification::StageChanged(stage) => {
                info!("STAGE | {}", stage);
            }
            PetNotification::StateChanged { flag, value } => {
                info!("STATE | {}={}", flag, value);
            }
            PetNotification::StatusMessage(text) => {
                info!("STATUS | {:?}", text);
            }
            PetNotification::ControlsEnabled(controls) => {
                info!("CONTROLS | {}", controls);
            }
            PetNotification::Died => info!("LIFE | died"),
            PetNotification::WokeUp => info!("LIFE | woke up"),
            PetNotification::SicknessResolved => info!("LIFE | sickness resolved"),
        }
    }
}
