//! Application core: pure domain orchestration, zero I/O.
//!
//! This module holds the pet service and the vocabulary it speaks: inbound
//! user actions, outbound notifications, and the **port traits** through
//! which every terminal, save file and config document is reached.  The
//! layer is fully testable with in-memory adapters.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
