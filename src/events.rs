//! Session event queues.
//!
//! Two bounded `embassy-sync` channels feed the session controller:
//!
//! ```text
//! ┌──────────────┐  Pulse           ┌──────────────┐
//! │ Timer tasks  │─────────────────▶│              │
//! │ (async)      │                  │  Controller  │──▶ PetService
//! ├──────────────┤  SessionCommand  │  (async)     │
//! │ Input thread │─────────────────▶│              │
//! └──────────────┘                  └──────────────┘
//! ```
//!
//! The controller is the only consumer of both, so every state mutation
//! is serialised through it.  Between sessions, input lines travel on a
//! third channel, [`MenuChannel`], to the host's menu loop.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::app::commands::UserAction;
use crate::minigame::Direction;

/// One elapsed timer interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    /// Master clock tick.
    Clock,
    /// Sickness period of the given generation.
    Sickness(u32),
    /// Sleep period of the given generation.
    Sleep(u32),
}

/// Commands accepted by a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// A user action on the pet.
    Act(UserAction),
    /// A guess in the running minigame.
    Guess(Direction),
    /// Leave the minigame without guessing (counts as a loss).
    Abandon,
    /// Persist the pet.
    Save,
    /// Re-publish the full pet state to the sink.
    Snapshot,
    /// End the session and return to the menu.
    Menu,
}

/// Input for the top-level menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuInput {
    /// One trimmed, non-empty line.
    Line(String),
    /// Stdin closed.
    EndOfInput,
}

/// Pulse channel depth.  Timers block on a full channel.
pub const PULSE_DEPTH: usize = 16;

/// Command channel depth.  Producers drop commands on a full channel.
pub const COMMAND_DEPTH: usize = 8;

/// Menu channel depth.  The input thread waits on a full channel.
pub const MENU_DEPTH: usize = 4;

/// Timer tasks → controller.
pub type PulseChannel = Channel<CriticalSectionRawMutex, Pulse, PULSE_DEPTH>;

/// Input → controller.  `Sync`, so an input thread can feed it.
pub type CommandChannel = Channel<CriticalSectionRawMutex, SessionCommand, COMMAND_DEPTH>;

/// Input thread → menu loop.
pub type MenuChannel = Channel<CriticalSectionRawMutex, MenuInput, MENU_DEPTH>;

/// Queue a command without blocking.  Returns `false` if it was dropped.
pub fn push_command(channel: &CommandChannel, command: SessionCommand) -> bool {
    if channel.try_send(command).is_err() {
        warn!("Session: command channel full, dropping {:?}", command);
        return false;
    }
    true
}

/// Discard everything queued on `channel`.
pub fn drain_commands(channel: &CommandChannel) -> usize {
    let mut dropped = 0;
    while channel.try_receive().is_ok() {
        dropped += 1;
    }
    dropped
}
