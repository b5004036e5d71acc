//! Mock port adapters for integration tests.
//!
//! Records every notification so tests can assert on the full history
//! without a terminal.

use tamagotchi::app::commands::MinigameOutcome;
use tamagotchi::app::events::{Controls, PetNotification};
use tamagotchi::app::ports::{EventSink, MinigamePort, SaveStore, StoreError};
use tamagotchi::pet::{LifeFlag, PetName, Stat};
use tamagotchi::record::SaveRecord;

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<PetNotification>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn count(&self, wanted: &PetNotification) -> usize {
        self.events.iter().filter(|e| *e == wanted).count()
    }

    pub fn last_status(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            PetNotification::StatusMessage(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_controls(&self) -> Option<Controls> {
        self.events.iter().rev().find_map(|e| match e {
            PetNotification::ControlsEnabled(c) => Some(*c),
            _ => None,
        })
    }

    pub fn stat_updates(&self, stat: Stat) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PetNotification::StatChanged { stat: s, value } if *s == stat => Some(*value),
                _ => None,
            })
            .collect()
    }

    pub fn flag_changes(&self, flag: LifeFlag) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PetNotification::StateChanged { flag: f, value } if *f == flag => Some(*value),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &PetNotification) {
        self.events.push(event.clone());
    }
}

// ── BrokenStore ───────────────────────────────────────────────

/// A store whose disk is gone: every write fails.
pub struct BrokenStore;

impl SaveStore for BrokenStore {
    fn load(&self, _name: &PetName) -> Result<SaveRecord, StoreError> {
        Err(StoreError::NotFound)
    }

    fn save(&mut self, _record: &SaveRecord) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::ErrorKind::PermissionDenied))
    }

    fn delete(&mut self, _name: &PetName) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::ErrorKind::PermissionDenied))
    }

    fn exists(&self, _name: &PetName) -> bool {
        false
    }

    fn list(&self) -> Result<Vec<PetName>, StoreError> {
        Ok(Vec::new())
    }
}

// ── ScriptedMinigame ──────────────────────────────────────────

/// Returns a fixed outcome and remembers the stage it was shown.
pub struct ScriptedMinigame {
    pub outcome: MinigameOutcome,
    pub stages_seen: Vec<u8>,
}

#[allow(dead_code)]
impl ScriptedMinigame {
    pub fn new(outcome: MinigameOutcome) -> Self {
        Self {
            outcome,
            stages_seen: Vec::new(),
        }
    }
}

impl MinigamePort for ScriptedMinigame {
    fn play(&mut self, stage: u8) -> MinigameOutcome {
        self.stages_seen.push(stage);
        self.outcome
    }
}
