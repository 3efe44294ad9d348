//! Export of processed rows to CSV or JSON documents.
//!
//! # Architecture
//!
//! ```text
//! rows + ExportOptions → export_rows → document text
//!                              │
//!                              ▼
//!                        write_export → <dir>/<filename>.<ext> (atomic)
//!                              │
//!                              ▼
//!                         export_data → ExportReport { success, message }
//! ```
//!
//! # Modules
//!
//! - [`csv`]: Semicolon-separated rendering
//! - [`json`]: Pretty JSON document with metadata
//! - [`writer`]: Temp-file-and-rename output
//!
//! # Example
//!
//! ```
//! use planboard::export::{export_rows, ExportFormat, ExportOptions};
//! use serde_json::json;
//!
//! let rows = vec![json!({"nome": "Eficiência", "valor": 85})];
//! let options = ExportOptions {
//!     title: Some("Indicadores".to_string()),
//!     ..ExportOptions::default()
//! };
//!
//! let csv = export_rows(&rows, &options)?;
//! assert_eq!(csv, "Indicadores\n\nnome;valor\nEficiência;85\n");
//!
//! assert!("xlsx".parse::<ExportFormat>().is_err());
//! # Ok::<(), planboard::PlanboardError>(())
//! ```

pub mod csv;
pub mod json;
pub mod writer;

use crate::domain::error::{PlanboardError, Result};
use crate::domain::Record;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default file stem for exported documents.
pub const DEFAULT_FILENAME: &str = "export";

/// Supported export document formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = PlanboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(PlanboardError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// How an export is rendered and named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// File stem, without extension.
    pub filename: String,
    pub format: ExportFormat,
    /// CSV title line, or the JSON document title.
    pub title: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            format: ExportFormat::default(),
            title: None,
        }
    }
}

impl ExportOptions {
    /// The file name this export is written to, e.g. `export.csv`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.filename, self.format.extension())
    }
}

/// Outcome of [`export_data`], suitable for showing to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub success: bool,
    pub message: String,
    /// Where the document was written, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Renders rows into an export document.
///
/// # Errors
///
/// Returns [`PlanboardError::NoData`] for a CSV export of no rows, or a JSON
/// error if serialization fails.
pub fn export_rows<R: Record>(rows: &[R], options: &ExportOptions) -> Result<String> {
    let title = options.title.as_deref();
    match options.format {
        ExportFormat::Csv => csv::render(rows, title),
        ExportFormat::Json => json::render(rows, title, chrono::Utc::now()),
    }
}

/// Renders rows and writes the document to `dir`.
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written.
pub fn write_export<R: Record>(dir: &Path, rows: &[R], options: &ExportOptions) -> Result<PathBuf> {
    let _span = tracing::debug_span!(
        "write_export",
        format = %options.format,
        rows = rows.len()
    )
    .entered();

    let document = export_rows(rows, options)?;
    let path = dir.join(options.file_name());
    writer::write_atomic(&path, &document)?;

    tracing::info!(path = ?path, bytes = document.len(), "export written");
    Ok(path)
}

/// Writes an export and reports the outcome instead of failing.
#[must_use]
pub fn export_data<R: Record>(dir: &Path, rows: &[R], options: &ExportOptions) -> ExportReport {
    match write_export(dir, rows, options) {
        Ok(path) => ExportReport {
            success: true,
            message: format!(
                "Dados exportados com sucesso em formato {}",
                options.format.extension().to_uppercase()
            ),
            path: Some(path),
        },
        Err(error) => {
            tracing::warn!(error = %error, "export failed");
            ExportReport {
                success: false,
                message: error.to_string(),
                path: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_names() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(" json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        let err = "xlsx".parse::<ExportFormat>().unwrap_err();
        assert_eq!(err.to_string(), "Formato xlsx não suportado");
    }

    #[test]
    fn report_on_success_and_failure() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![json!({"id": 1})];
        let options = ExportOptions {
            filename: "indicadores".into(),
            format: ExportFormat::Json,
            title: None,
        };

        let report = export_data(dir.path(), &rows, &options);
        assert!(report.success);
        assert_eq!(report.message, "Dados exportados com sucesso em formato JSON");
        assert_eq!(report.path, Some(dir.path().join("indicadores.json")));

        let empty: Vec<serde_json::Value> = Vec::new();
        let report = export_data(dir.path(), &empty, &ExportOptions::default());
        assert!(!report.success);
        assert_eq!(report.message, "Não há dados para exportar");
        assert!(!dir.path().join("export.csv").exists());
    }
}
