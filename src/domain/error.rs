//! Error types for planboard.
//!
//! This module defines the centralized error type [`PlanboardError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. The table engine
//! itself never fails: out-of-range navigation is ignored and empty results are a
//! displayable state. Errors only surface at the edges, when configuration, table
//! schemas or row data are loaded and when processed rows are exported.

use thiserror::Error;

/// The main error type for planboard operations.
///
/// Most variants wrap underlying errors from external crates using `#[from]` for
/// automatic conversion.
///
/// # Examples
///
/// ```
/// use planboard::PlanboardError;
///
/// fn validate_page_size(size: usize) -> Result<(), PlanboardError> {
///     if size == 0 {
///         return Err(PlanboardError::Config("page_size must be at least 1".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_page_size(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum PlanboardError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Row data or an export document could not be (de)serialized as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration or schema file is not valid TOML for the expected shape.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration is invalid.
    ///
    /// The string describes the specific configuration problem, for example a
    /// zero page size.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An export was requested for an empty row set.
    #[error("Não há dados para exportar")]
    NoData,

    /// An export format other than CSV or JSON was requested.
    #[error("Formato {0} não suportado")]
    UnsupportedFormat(String),
}

/// A specialized `Result` type for planboard operations.
///
/// This is a type alias for `std::result::Result<T, PlanboardError>`.
pub type Result<T> = std::result::Result<T, PlanboardError>;
