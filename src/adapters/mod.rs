//! Adapters, concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements  | Connects to                  |
//! |----------------|-------------|------------------------------|
//! | `console`      | EventSink   | Any `std::io::Write`         |
//! | `log_sink`     | EventSink   | `log` facade                 |
//! | `file_store`   | SaveStore   | `<dir>/<name>.<ext>` files   |
//! | `memory_store` | SaveStore   | In-process map (tests, demos)|
//! | `config_file`  | ConfigPort  | JSON document on disk        |

pub mod config_file;
pub mod console;
pub mod file_store;
pub mod log_sink;
pub mod memory_store;
