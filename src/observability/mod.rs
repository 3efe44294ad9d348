//! Structured logging setup.
//!
//! The engine emits `tracing` spans and events everywhere; this module decides
//! where they go.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → stderr | RotatingLog (10 MiB × 3)
//! ```
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Filter resolution and subscriber installation
//! - [`file_writer`]: Size-rotated log file writer

pub mod file_writer;
pub mod init;

pub use file_writer::RotatingLog;
pub use init::{build_filter, init_tracing, DEFAULT_TRACE_LEVEL};
