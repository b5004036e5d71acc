//! Virtual pet life-cycle engine.
//!
//! Exposes the pure-logic core (pet model, phase machine, clock and
//! sub-process cycles), the [`PetService`](app::service::PetService) that
//! owns them, the async session [`runtime`], and the adapters the host
//! binary wires together.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod fsm;
pub mod minigame;
pub mod pet;
pub mod record;
pub mod runtime;
pub mod scheduler;
