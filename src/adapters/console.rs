//! Terminal presentation adapter.
//!
//! Renders notifications as short human-readable lines on any
//! [`std::io::Write`].  Write failures are logged and otherwise ignored:
//! losing a line of output must never stall the pet.

use std::io::Write;

use log::warn;

use crate::app::events::PetNotification;
use crate::app::ports::EventSink;

pub struct ConsoleSink<W: Write> {
    out: W,
    /// Name shown in front of life events.
    name: String,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, name: impl Into<String>) -> Self {
        Self {
            out,
            name: name.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: core::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!("ConsoleSink: write failed: {}", e);
        }
    }
}

impl<W: Write> EventSink for ConsoleSink<W> {
    fn emit(&mut self, event: &PetNotification) {
        match event {
            PetNotification::StatChanged { stat, value } => {
                self.line(format_args!("  {:<9} {:>3}", stat.name(), value));
            }
            PetNotification::StageChanged(stage) => {
                self.line(format_args!("  stage     {:>3}", stage));
            }
            PetNotification::StateChanged { flag, value } => {
                self.line(format_args!("  [{} {}]", if *value { "+" } else { "-" }, flag));
            }
            PetNotification::StatusMessage(text) if text.is_empty() => {}
            PetNotification::StatusMessage(text) => {
                self.line(format_args!(">> {}", text));
            }
            PetNotification::ControlsEnabled(controls) => {
                self.line(format_args!("  actions: {}", controls));
            }
            PetNotification::Died => {
                let name = self.name.clone();
                self.line(format_args!("** {} has passed away. Type 'menu'.", name));
            }
            PetNotification::WokeUp => {
                let name = self.name.clone();
                self.line(format_args!("** {} woke up", name));
            }
            PetNotification::SicknessResolved => {
                let name = self.name.clone();
                self.line(format_args!("** {} feels better", name));
            }
        }
    }
}
