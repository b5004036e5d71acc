//! Outbound pet notifications.
//!
//! The [`PetService`](super::service::PetService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them: log them, print them, redraw a window.

use core::fmt;

use crate::pet::{LifeFlag, Pet, Stat};

/// Structured notifications emitted by the pet core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetNotification {
    /// A stat settled at a new value.
    StatChanged { stat: Stat, value: u8 },

    /// The pet reached a new age stage.
    StageChanged(u8),

    /// A life flag flipped.
    StateChanged { flag: LifeFlag, value: bool },

    /// Status line text (empty string clears it).
    StatusMessage(String),

    /// The set of legal actions changed.
    ControlsEnabled(Controls),

    /// The pet died.  Emitted once.
    Died,

    /// The pet woke up, naturally or early.
    WokeUp,

    /// Medicine cured the pet.
    SicknessResolved,
}

/// An action the presentation layer can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Feed,
    Play,
    Medicate,
    Sleep,
    Discipline,
    Clean,
    Save,
    Menu,
}

impl Control {
    pub const ALL: [Control; 8] = [
        Control::Feed,
        Control::Play,
        Control::Medicate,
        Control::Sleep,
        Control::Discipline,
        Control::Clean,
        Control::Save,
        Control::Menu,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Medicate => "medicate",
            Self::Sleep => "sleep",
            Self::Discipline => "discipline",
            Self::Clean => "clean",
            Self::Save => "save",
            Self::Menu => "menu",
        }
    }
}

/// The action → enabled map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub feed: bool,
    pub play: bool,
    pub medicate: bool,
    pub sleep: bool,
    pub discipline: bool,
    pub clean: bool,
    pub save: bool,
    pub menu: bool,
}

impl Controls {
    /// Compute the legal actions for `pet`.
    pub fn derive(pet: &Pet) -> Self {
        let f = &pet.flags;
        let alive = !f.is_dead;
        let free = alive && !f.is_sick && !f.is_playing_minigame && !f.has_pending_need();
        Self {
            feed: free && !f.is_sleeping,
            play: free && !f.is_sleeping,
            medicate: alive && f.is_sick,
            sleep: free,
            discipline: alive && f.needs_discipline,
            clean: alive && f.needs_cleaning,
            save: alive,
            menu: true,
        }
    }

    pub fn get(&self, control: Control) -> bool {
        match control {
            Control::Feed => self.feed,
            Control::Play => self.play,
            Control::Medicate => self.medicate,
            Control::Sleep => self.sleep,
            Control::Discipline => self.discipline,
            Control::Clean => self.clean,
            Control::Save => self.save,
            Control::Menu => self.menu,
        }
    }
}

impl fmt::Display for Controls {
    /// Space-separated list of the enabled actions.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for control in Control::ALL.into_iter().filter(|c| self.get(*c)) {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(control.name())?;
            first = false;
        }
        Ok(())
    }
}
