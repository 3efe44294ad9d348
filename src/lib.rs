//! Planboard: a client-side data-table engine for strategic planning dashboards.
//!
//! Planboard turns an in-memory collection of rows into a browsable table:
//! - Case-insensitive free-text search across every field, debounced while typing
//! - Per-column equality filters with an "all" option
//! - Single-column sorting that toggles ascending/descending on repeated requests
//! - Pagination with derived counters and a "showing X to Y of Z" summary
//! - Row actions (view/edit/delete) and CSV/JSON export of the processed rows
//! - pt-BR formatters and validators for currency, dates, CPF/CNPJ and phones
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Command line (main.rs)                             │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Table Engine (table/)                              │  ← State machine
//! │  - Event handling                                   │
//! │  - Search → filter → sort → paginate                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Export        │   │ Formatting    │
//! │ (ui/)         │   │ (export/)     │   │ (formatting/) │
//! │ - View models │   │ - CSV / JSON  │   │ - pt-BR text  │
//! │ - Text render │   │ - Atomic write│   │ - Validators  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/)                                   │
//! │  - Value and Record abstraction                     │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing-subscriber with rotating log file        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Row values, the [`Record`] trait and errors
//! - [`table`]: The [`DataTable`] engine and its event model
//! - [`ui`]: View models and a plain-text renderer
//! - [`export`]: CSV and JSON export
//! - [`formatting`]: pt-BR formatters and field validators
//! - [`observability`]: Logging setup
//!
//! # Configuration
//!
//! Engine settings are read from TOML:
//!
//! ```toml
//! page_size = 10
//! debounce_ms = 300
//! reset_page_on_change = true
//! trace_level = "info"
//! log_file = "/var/log/planboard.log"
//! ```
//!
//! # Example
//!
//! ```rust
//! use planboard::{handle_event, initialize, ColumnDef, Config, TableEvent, TableSchema};
//! use serde_json::json;
//! use std::time::Instant;
//!
//! let rows: Vec<_> = (1..=25)
//!     .map(|i| json!({"id": i, "nome": format!("Tarefa {i}")}))
//!     .collect();
//! let schema = TableSchema::new(vec![
//!     ColumnDef::new("id", "ID").sortable(),
//!     ColumnDef::new("nome", "Nome"),
//! ]);
//!
//! let mut table = initialize(&Config::default(), schema, rows);
//! let (changed, _) = handle_event(&mut table, TableEvent::LastPage, Instant::now());
//! assert!(changed);
//!
//! let view = table.view();
//! assert_eq!(view.rows.len(), 5);
//! assert_eq!(
//!     view.footer.map(|f| f.summary).as_deref(),
//!     Some("Mostrando 21 a 25 de 25 resultados")
//! );
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod domain;
pub mod export;
pub mod formatting;
pub mod observability;
pub mod table;
pub mod ui;

pub use domain::{PlanboardError, Record, Result, Value};
pub use export::{ExportFormat, ExportOptions, ExportReport};
pub use formatting::{CellFormat, FieldRules};
pub use table::{
    handle_event, run_query, ColumnDef, DataTable, Debouncer, FilterDef, FilterOption, PageInfo,
    Pagination, Query, SortDirection, SortState, TableAction, TableEvent, TableSchema,
    TableSettings,
};
pub use ui::TableView;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Rows per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Search debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Engine configuration.
///
/// Every field is optional in TOML and falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rows per page. Must be at least 1. Default: 10
    pub page_size: usize,

    /// Quiet period before typed search text is applied. Default: 300
    pub debounce_ms: u64,

    /// Whether search and filter changes return to page 1. Default: `true`
    pub reset_page_on_change: bool,

    /// Tracing filter directive, e.g. `debug` or `planboard=trace`.
    ///
    /// Overridden by `RUST_LOG`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Log to this file (rotated at 10 MiB) instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            reset_page_on_change: true,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this shape or if
    /// `page_size` is zero.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails [`Config::from_toml`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading configuration");
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Builds configuration from string key/value pairs, e.g. environment or
    /// host-provided settings.
    ///
    /// # Parsing Rules
    ///
    /// - `page_size`: positive integer (falls back to 10 on parse error or zero)
    /// - `debounce_ms`: integer (falls back to 300 on parse error)
    /// - `reset_page_on_change`: `true`/`false` (falls back to `true`)
    /// - `trace_level`, `log_file`: taken verbatim
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use planboard::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_size, 25);
    /// assert_eq!(config.debounce_ms, 300);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let page_size = map
            .get("page_size")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&size| size > 0)
            .unwrap_or(defaults.page_size);

        let debounce_ms = map
            .get("debounce_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(defaults.debounce_ms);

        let reset_page_on_change = map
            .get("reset_page_on_change")
            .and_then(|s| s.trim().parse::<bool>().ok())
            .unwrap_or(defaults.reset_page_on_change);

        Self {
            page_size,
            debounce_ms,
            reset_page_on_change,
            trace_level: map.get("trace_level").cloned(),
            log_file: map.get("log_file").map(PathBuf::from),
        }
    }

    /// Checks invariants that the TOML shape cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`PlanboardError::Config`] if `page_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(PlanboardError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&Config> for TableSettings {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size.max(1),
            debounce: Duration::from_millis(config.debounce_ms),
            reset_page_on_change: config.reset_page_on_change,
        }
    }
}

/// Creates a table over `rows` with settings taken from `config`.
///
/// The table starts on page 1 with no search, filters or sort.
pub fn initialize<R: Record>(config: &Config, schema: TableSchema, rows: Vec<R>) -> DataTable<R> {
    tracing::debug!(
        rows = rows.len(),
        columns = schema.columns.len(),
        page_size = config.page_size,
        "initializing table"
    );
    DataTable::new(rows, schema, TableSettings::from(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_defaults_and_overrides() {
        let config = Config::from_toml("page_size = 20\nlog_file = \"/tmp/p.log\"").unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert!(config.reset_page_on_change);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/p.log")));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = Config::from_toml("page_size = 0").unwrap_err();
        assert!(matches!(err, PlanboardError::Config(_)));

        let map = BTreeMap::from([("page_size".to_string(), "0".to_string())]);
        assert_eq!(Config::from_map(&map).page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn settings_from_config() {
        let config = Config {
            debounce_ms: 0,
            reset_page_on_change: false,
            ..Config::default()
        };
        let settings = TableSettings::from(&config);
        assert_eq!(settings.debounce, Duration::ZERO);
        assert!(!settings.reset_page_on_change);
        assert_eq!(settings.page_size, 10);
    }
}
