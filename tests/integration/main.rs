//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters.  Everything runs on the host with no terminal
//! and, apart from the persistence tests' temp dirs, no filesystem.

mod mock_ports;
mod persistence_tests;
mod service_tests;
