//! Stat store: the three bounded vital statistics.
//!
//! Every mutation goes through [`Stats::adjust`], which clamps the result
//! into `[STAT_MIN, STAT_MAX]`.  Stats are addressed through the typed
//! [`Stat`] enumeration and stored in a fixed-size array.

use core::fmt;

/// Upper bound for every stat.
pub const STAT_MAX: u8 = 100;

/// Lower bound for every stat.  Health at this value means death.
pub const STAT_MIN: u8 = 0;

/// The three vital statistics of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Stat {
    Health = 0,
    Hunger = 1,
    Happiness = 2,
}

impl Stat {
    /// Total number of stats, sizes the backing array.
    pub const COUNT: usize = 3;

    /// All stats in storage order.
    pub const ALL: [Stat; Stat::COUNT] = [Stat::Health, Stat::Hunger, Stat::Happiness];

    /// Lower-case name used in logs and notifications.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Hunger => "hunger",
            Self::Happiness => "happiness",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bounded stat values, indexed by [`Stat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    values: [u8; Stat::COUNT],
}

impl Default for Stats {
    fn default() -> Self {
        Self::full()
    }
}

impl Stats {
    /// A freshly hatched pet: every stat at the ceiling.
    pub const fn full() -> Self {
        Self {
            values: [STAT_MAX; Stat::COUNT],
        }
    }

    /// Build from explicit values, clamping each to the ceiling.
    pub fn new(health: u8, hunger: u8, happiness: u8) -> Self {
        Self {
            values: [
                health.min(STAT_MAX),
                hunger.min(STAT_MAX),
                happiness.min(STAT_MAX),
            ],
        }
    }

    /// Current value of `stat`.
    pub fn get(&self, stat: Stat) -> u8 {
        self.values[stat as usize]
    }

    /// Apply `delta` to `stat` and return the settled value.
    ///
    /// The result is clamped to `STAT_MAX` above and `STAT_MIN` below, so
    /// `adjust(Health, 50)` twice from 80 yields 100, and a health drop past
    /// zero settles at zero.
    pub fn adjust(&mut self, stat: Stat, delta: i32) -> u8 {
        let slot = &mut self.values[stat as usize];
        let next = (i32::from(*slot) + delta).clamp(i32::from(STAT_MIN), i32::from(STAT_MAX));
        *slot = next as u8;
        *slot
    }

    /// True once `stat` has reached the floor.
    pub fn is_depleted(&self, stat: Stat) -> bool {
        self.get(stat) == STAT_MIN
    }
}
