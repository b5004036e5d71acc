//! Save-record codec.
//!
//! A record is six newline-separated fields in a fixed order:
//!
//! ```text
//! name
//! health
//! hunger
//! happiness
//! style
//! age stage
//! ```
//!
//! Decoding is all-or-nothing: any malformed field rejects the whole record.

use crate::error::RecordError;
use crate::pet::stats::STAT_MAX;
use crate::pet::{FIRST_STAGE, Pet, PetName, Stats};

/// Number of fields in a record.
pub const FIELD_COUNT: usize = 6;

/// The persisted subset of a [`Pet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRecord {
    pub name: PetName,
    pub health: u8,
    pub hunger: u8,
    pub happiness: u8,
    pub style: String,
    pub age_stage: u8,
}

impl SaveRecord {
    /// Snapshot the persisted fields of `pet`.
    pub fn from_pet(pet: &Pet) -> Self {
        use crate::pet::Stat;
        Self {
            name: pet.name.clone(),
            health: pet.stat(Stat::Health),
            hunger: pet.stat(Stat::Hunger),
            happiness: pet.stat(Stat::Happiness),
            style: pet.style.clone(),
            age_stage: pet.age_stage,
        }
    }

    /// Rebuild a pet; every life flag starts cleared.
    pub fn to_pet(&self) -> Pet {
        Pet::restore(
            self.name.clone(),
            Stats::new(self.health, self.hunger, self.happiness),
            self.age_stage,
            self.style.clone(),
        )
    }

    /// Decode a record, accepting age stages up to `max_age_stage`.
    pub fn parse(text: &str, max_age_stage: u8) -> Result<Self, RecordError> {
        let body = text
            .strip_suffix("\r\n")
            .or_else(|| text.strip_suffix('\n'))
            .unwrap_or(text);
        let fields: Vec<&str> = body.split('\n').map(|f| f.trim_end_matches('\r')).collect();
        if fields.len() != FIELD_COUNT {
            return Err(RecordError::WrongFieldCount(fields.len()));
        }

        let name = PetName::new(fields[0]).map_err(RecordError::InvalidName)?;
        let health = parse_stat(fields[1], "health")?;
        let hunger = parse_stat(fields[2], "hunger")?;
        let happiness = parse_stat(fields[3], "happiness")?;
        if fields[4].contains('\r') {
            return Err(RecordError::InvalidStyle);
        }
        let style = fields[4].to_string();
        let age_stage = parse_number(fields[5], "age stage")?;
        if !(FIRST_STAGE..=max_age_stage).contains(&age_stage) {
            return Err(RecordError::OutOfRange("age stage"));
        }

        Ok(Self {
            name,
            health,
            hunger,
            happiness,
            style,
            age_stage,
        })
    }

    /// Encode as six newline-joined fields (no trailing newline).
    pub fn to_text(&self) -> Result<String, RecordError> {
        if self.style.contains(['\n', '\r']) {
            return Err(RecordError::InvalidStyle);
        }
        Ok([
            self.name.as_str().to_string(),
            self.health.to_string(),
            self.hunger.to_string(),
            self.happiness.to_string(),
            self.style.clone(),
            self.age_stage.to_string(),
        ]
        .join("\n"))
    }
}

fn parse_number(field: &str, what: &'static str) -> Result<u8, RecordError> {
    let trimmed = field.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecordError::InvalidNumber(what));
    }
    trimmed.parse().map_err(|_| RecordError::OutOfRange(what))
}

fn parse_stat(field: &str, what: &'static str) -> Result<u8, RecordError> {
    let value = parse_number(field, what)?;
    if value > STAT_MAX {
        return Err(RecordError::OutOfRange(what));
    }
    Ok(value)
}
