//! Validated pet names.
//!
//! The name doubles as the persistence key (one save file per name), so it
//! must be usable as a file stem and must not break the line-oriented
//! save-record format.

use core::fmt;

/// Maximum pet name length in bytes.
pub const MAX_NAME_LEN: usize = 32;

/// Why a candidate name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    /// Empty, or whitespace only.
    Empty,
    /// Longer than [`MAX_NAME_LEN`] bytes.
    TooLong,
    /// Contains a line break, a path separator, or is a relative path
    /// component (`.` / `..`).
    InvalidCharacter(char),
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name is empty"),
            Self::TooLong => write!(f, "name longer than {MAX_NAME_LEN} bytes"),
            Self::InvalidCharacter(c) => write!(f, "name contains invalid character {c:?}"),
        }
    }
}

/// A non-empty pet name that is safe to use as a save-file key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PetName(heapless::String<MAX_NAME_LEN>);

impl PetName {
    pub fn new(raw: &str) -> Result<Self, NameError> {
        if raw.trim().is_empty() {
            return Err(NameError::Empty);
        }
        if raw == "." || raw == ".." {
            return Err(NameError::InvalidCharacter('.'));
        }
        if let Some(c) = raw
            .chars()
            .find(|c| matches!(c, '\n' | '\r' | '/' | '\\' | '\0'))
        {
            return Err(NameError::InvalidCharacter(c));
        }

        let mut s = heapless::String::new();
        s.push_str(raw).map_err(|()| NameError::TooLong)?;
        Ok(Self(s))
    }

    /// The name exactly as entered (the save key).
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The name with surrounding whitespace removed, for status text.
    pub fn display_name(&self) -> &str {
        self.0.trim()
    }
}

impl fmt::Display for PetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
