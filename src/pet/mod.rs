//! Pet data model.
//!
//! A [`Pet`] is plain data: name, stats, age stage, life flags and the
//! cosmetic style.  It is owned by the phase machine's context and is only
//! ever mutated through the [`PetService`](crate::app::service::PetService).

pub mod name;
pub mod stats;

use core::fmt;

pub use name::{NameError, PetName};
pub use stats::{Stat, Stats};

/// Style names offered by the menu.  Any line-free string is accepted.
pub const THEMES: [&str; 3] = ["Dark Theme", "Light Theme", "Pink Theme"];

/// Style applied to a new pet when none is chosen.
pub const DEFAULT_STYLE: &str = "Light Theme";

/// First life stage of a newly hatched pet.
pub const FIRST_STAGE: u8 = 1;

// ---------------------------------------------------------------------------
// Life flags
// ---------------------------------------------------------------------------

/// Names of the boolean life flags, used in `StateChanged` notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifeFlag {
    Dead,
    Sick,
    Sleeping,
    NeedsDiscipline,
    NeedsCleaning,
    PlayingMinigame,
}

impl LifeFlag {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dead => "dead",
            Self::Sick => "sick",
            Self::Sleeping => "sleeping",
            Self::NeedsDiscipline => "needs_discipline",
            Self::NeedsCleaning => "needs_cleaning",
            Self::PlayingMinigame => "playing_minigame",
        }
    }
}

impl fmt::Display for LifeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Independent booleans describing the pet's condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifeFlags {
    pub is_dead: bool,
    pub is_sick: bool,
    pub is_sleeping: bool,
    pub needs_discipline: bool,
    pub needs_cleaning: bool,
    pub is_playing_minigame: bool,
}

impl LifeFlags {
    pub fn get(&self, flag: LifeFlag) -> bool {
        match flag {
            LifeFlag::Dead => self.is_dead,
            LifeFlag::Sick => self.is_sick,
            LifeFlag::Sleeping => self.is_sleeping,
            LifeFlag::NeedsDiscipline => self.needs_discipline,
            LifeFlag::NeedsCleaning => self.needs_cleaning,
            LifeFlag::PlayingMinigame => self.is_playing_minigame,
        }
    }

    /// Set `flag` and report whether the value actually changed.
    pub fn set(&mut self, flag: LifeFlag, value: bool) -> bool {
        let slot = match flag {
            LifeFlag::Dead => &mut self.is_dead,
            LifeFlag::Sick => &mut self.is_sick,
            LifeFlag::Sleeping => &mut self.is_sleeping,
            LifeFlag::NeedsDiscipline => &mut self.needs_discipline,
            LifeFlag::NeedsCleaning => &mut self.needs_cleaning,
            LifeFlag::PlayingMinigame => &mut self.is_playing_minigame,
        };
        let changed = *slot != value;
        *slot = value;
        changed
    }

    /// True while either maintenance need is outstanding.
    pub fn has_pending_need(&self) -> bool {
        self.needs_discipline || self.needs_cleaning
    }
}

// ---------------------------------------------------------------------------
// Pet
// ---------------------------------------------------------------------------

/// The single live pet of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pet {
    pub name: PetName,
    pub stats: Stats,
    /// Life stage, `FIRST_STAGE..=max_age_stage`.
    pub age_stage: u8,
    pub flags: LifeFlags,
    /// Set only for the instant a treatment cures sickness.
    pub medicine_administered: bool,
    pub style: String,
}

impl Pet {
    /// A newly hatched pet with full stats.
    pub fn hatch(name: PetName, style: impl Into<String>) -> Self {
        Self::restore(name, Stats::full(), FIRST_STAGE, style)
    }

    /// A pet restored from saved values; all flags start cleared.
    pub fn restore(name: PetName, stats: Stats, age_stage: u8, style: impl Into<String>) -> Self {
        Self {
            name,
            stats,
            age_stage,
            flags: LifeFlags::default(),
            medicine_administered: false,
            style: style.into(),
        }
    }

    pub fn stat(&self, stat: Stat) -> u8 {
        self.stats.get(stat)
    }

    pub fn is_alive(&self) -> bool {
        !self.flags.is_dead
    }
}
