//! Port traits, the hexagonal boundary between the pet core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PetService (domain)
//! ```
//!
//! Driven adapters (presentation, save files, config, the minigame) implement
//! these traits.  The [`PetService`](super::service::PetService) takes them as
//! call-site parameters, so the domain core never touches a terminal or a
//! filesystem directly.

use crate::config::PetConfig;
use crate::error::RecordError;
use crate::pet::{PetName, Stat};
use crate::record::SaveRecord;

use super::commands::MinigameOutcome;
use super::events::PetNotification;

// ───────────────────────────────────────────────────────────────
// Event sink port (Presentation Adapter)
// ───────────────────────────────────────────────────────────────

/// The domain emits [`PetNotification`]s through this port, in the order
/// the underlying state changes happened.  Adapters decide where they go
/// (log lines, a terminal, a GUI).
pub trait EventSink {
    fn emit(&mut self, event: &PetNotification);
}

// ───────────────────────────────────────────────────────────────
// Save store port (Persistence Adapter)
// ───────────────────────────────────────────────────────────────

/// Named save records, one per pet name.
pub trait SaveStore {
    /// Read and decode the record stored under `name`.
    fn load(&self, name: &PetName) -> Result<SaveRecord, StoreError>;

    /// Write `record` under its own name, replacing any previous one.
    fn save(&mut self, record: &SaveRecord) -> Result<(), StoreError>;

    /// Remove the record for `name`.  Returns `Ok(())` even if it didn't exist.
    fn delete(&mut self, name: &PetName) -> Result<(), StoreError>;

    /// Check whether a record exists without reading it.
    fn exists(&self, name: &PetName) -> bool;

    /// Names of every stored record, sorted.
    fn list(&self) -> Result<Vec<PetName>, StoreError>;
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads and persists [`PetConfig`].
///
/// Implementations MUST validate before persisting.  Invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Load configuration.  Returns [`PetConfig::default()`] if nothing is stored.
    fn load(&self) -> Result<PetConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &PetConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Minigame port
// ───────────────────────────────────────────────────────────────

/// A blocking minigame collaborator.  `stage` is the pet's current age
/// stage, which frontends use to pick the matching sprite.
pub trait MinigamePort {
    fn play(&mut self, stage: u8) -> MinigameOutcome;
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples the clock from the phase machine)
// ───────────────────────────────────────────────────────────────

/// Event raised by the master clock's period table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// Subtract the configured decay amount from a stat.
    Decay(Stat),
    DisciplineNeeded,
    CleaningNeeded,
    AgeUp,
}

/// Callback trait that the [`Clock`](crate::scheduler::Clock) invokes for
/// every table entry that fires on a tick.  The clock knows nothing about
/// pets or phases.
pub trait SchedulerDelegate {
    fn on_fired(&mut self, event: ClockEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`SaveStore`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// No record is stored under the requested name.
    NotFound,
    /// The backend failed.
    Io(std::io::ErrorKind),
    /// A stored record exists but does not decode.
    Record(RecordError),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "save not found"),
            Self::Io(kind) => write!(f, "I/O error: {}", kind),
            Self::Record(e) => write!(f, "corrupt save: {}", e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound,
            kind => Self::Io(kind),
        }
    }
}

impl From<RecordError> for StoreError {
    fn from(e: RecordError) -> Self {
        Self::Record(e)
    }
}
