//! Unified error types for the pet engine.
//!
//! A single `Error` enum that every fallible subsystem converts into, so the
//! host binary and tests handle failures uniformly.  All variants are `Copy`.
//!
//! Illegal user actions are deliberately absent: they are not failures and
//! are reported as [`ActionOutcome`](crate::app::commands::ActionOutcome).

use core::fmt;

use crate::app::ports::{ConfigError, StoreError};
use crate::pet::NameError;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A save record could not be decoded.
    Record(RecordError),
    /// A pet name was rejected.
    Name(NameError),
    /// The save store failed.
    Store(StoreError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(e) => write!(f, "save record: {e}"),
            Self::Name(e) => write!(f, "pet name: {e}"),
            Self::Store(e) => write!(f, "save store: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<NameError> for Error {
    fn from(e: NameError) -> Self {
        Self::Name(e)
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Record(r) => Self::Record(r),
            other => Self::Store(other),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Save-record errors
// ---------------------------------------------------------------------------

/// Why a save record was rejected.  Loading aborts; no partial state is
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    /// The record did not have exactly six fields.
    WrongFieldCount(usize),
    /// The named numeric field is not an integer.
    InvalidNumber(&'static str),
    /// The named numeric field is outside its legal range.
    OutOfRange(&'static str),
    /// The name field is not a valid pet name.
    InvalidName(NameError),
    /// The style field contains a line break.
    InvalidStyle,
    /// The record names a different pet than the one it was stored under.
    NameMismatch,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongFieldCount(n) => write!(f, "expected 6 fields, found {n}"),
            Self::InvalidNumber(field) => write!(f, "{field} is not a number"),
            Self::OutOfRange(field) => write!(f, "{field} out of range"),
            Self::InvalidName(e) => write!(f, "invalid name: {e}"),
            Self::InvalidStyle => write!(f, "style contains a line break"),
            Self::NameMismatch => write!(f, "record belongs to another pet"),
        }
    }
}

impl From<RecordError> for Error {
    fn from(e: RecordError) -> Self {
        Self::Record(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
