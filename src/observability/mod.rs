//! Observability subsystem
//!
//! Logging goes through the `tracing` macros everywhere in the crate:
//!
//! ```ignore
//! tracing::info!(event = "ROOMS_RESERVED", reservation_id = 7, rooms = 2);
//! ```
//!
//! This module only installs the subscriber that formats them.

mod logger;

pub use logger::{init, LogConfig, LEVELS};
