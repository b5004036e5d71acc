//! Inbound user actions and their outcomes.
//!
//! These represent actions requested by the outside world (a terminal, a
//! GUI, a test) that the [`PetService`](super::service::PetService)
//! interprets and acts upon.

use core::fmt;

/// Result of the external minigame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinigameOutcome {
    Win,
    Lose,
}

/// Actions a user can take on a live pet.
///
/// Saving and leaving the session are service calls of their own
/// ([`PetService::save`](super::service::PetService::save),
/// [`PetService::return_to_menu`](super::service::PetService::return_to_menu)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// Restore hunger.
    Feed,
    /// Start the minigame.  The pet stays in minigame mode until
    /// [`FinishMinigame`](Self::FinishMinigame) arrives.
    Play,
    /// Report the minigame result.
    FinishMinigame(MinigameOutcome),
    /// Cure sickness.
    Medicate,
    /// Clear the discipline need.
    Discipline,
    /// Clear the cleaning need.
    Clean,
    /// Fall asleep, or wake up early.
    ToggleSleep,
}

/// Why an action was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The pet has died.
    Dead,
    /// Not possible while sick.
    Sick,
    /// Medicine only works on a sick pet.
    NotSick,
    /// Not possible while asleep.
    Sleeping,
    /// Not possible during the minigame.
    PlayingMinigame,
    /// No minigame is in progress.
    NoMinigame,
    /// A pending discipline or cleaning need blocks the action.
    ControlDisabled,
    /// The matching need flag is not set.
    NoPendingNeed,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dead => write!(f, "the pet has died"),
            Self::Sick => write!(f, "the pet is sick"),
            Self::NotSick => write!(f, "the pet is not sick"),
            Self::Sleeping => write!(f, "the pet is asleep"),
            Self::PlayingMinigame => write!(f, "the pet is playing"),
            Self::NoMinigame => write!(f, "no game in progress"),
            Self::ControlDisabled => write!(f, "the pet needs attention first"),
            Self::NoPendingNeed => write!(f, "nothing to do"),
        }
    }
}

/// What happened to an action.  Illegal actions are never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Ignored(Rejection),
}

impl ActionOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}
