//! Left/right guessing minigame.
//!
//! The pet looks one way; the player wins by guessing which.  The hidden
//! direction is drawn once per game from any [`rand::Rng`], so tests can
//! pass a seeded generator.

use core::fmt;
use core::str::FromStr;

use rand::Rng;

use crate::app::commands::MinigameOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            _ => Err(()),
        }
    }
}

/// One round of the guessing game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessingGame {
    hidden: Direction,
}

impl GuessingGame {
    /// Start a round with a uniformly random hidden direction.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let hidden = if rng.gen_bool(0.5) {
            Direction::Left
        } else {
            Direction::Right
        };
        Self { hidden }
    }

    /// Start a round with a known hidden direction.
    pub fn with_hidden(hidden: Direction) -> Self {
        Self { hidden }
    }

    /// Settle the round.
    pub fn guess(self, direction: Direction) -> MinigameOutcome {
        if direction == self.hidden {
            MinigameOutcome::Win
        } else {
            MinigameOutcome::Lose
        }
    }

    pub fn hidden(&self) -> Direction {
        self.hidden
    }
}
