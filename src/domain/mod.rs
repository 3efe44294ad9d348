//! Domain layer for planboard.
//!
//! Core types shared by every other layer, independent of rendering, export or
//! configuration concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`value`]: Dynamically-typed cell values with text conversion and ordering
//! - [`record`]: The [`Record`] trait the table engine is generic over
//!
//! # Examples
//!
//! ```
//! use planboard::domain::{Record, Result, Value};
//!
//! fn progress(row: &serde_json::Value) -> Result<Value> {
//!     Ok(row.value("progresso"))
//! }
//!
//! let row = serde_json::json!({"progresso": 78});
//! assert_eq!(progress(&row).unwrap(), Value::Number(78.0));
//! ```

pub mod error;
pub mod record;
pub mod value;

pub use error::{PlanboardError, Result};
pub use record::Record;
pub use value::Value;
