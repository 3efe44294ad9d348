//! Column, filter and table schema descriptors.
//!
//! A [`TableSchema`] describes how rows are displayed: which columns exist, which
//! of them can be sorted, how their values are rendered, and which per-column
//! equality filters are offered. Schemas are usually loaded from TOML:
//!
//! ```toml
//! title = "Indicadores"
//!
//! [[columns]]
//! key = "nome"
//! header = "Indicador"
//! sortable = true
//!
//! [[columns]]
//! key = "valorAtual"
//! header = "Atual"
//! sortable = true
//! render = "number"
//!
//! [[filters]]
//! key = "status"
//! label = "Status"
//! options = [
//!     { value = "no-prazo", label = "No prazo" },
//!     { value = "atrasado", label = "Atrasado" },
//! ]
//! ```
//!
//! Rendering only affects display. Search, filters and sorting always read the
//! raw row value.

use crate::domain::error::Result;
use crate::domain::Value;
use crate::formatting::{CellFormat, FieldRules};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Caller-supplied display transform for a column.
#[derive(Clone)]
pub struct CustomRender(Arc<dyn Fn(&Value) -> String + Send + Sync>);

impl CustomRender {
    pub fn new(render: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(render))
    }
}

impl fmt::Debug for CustomRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRender(..)")
    }
}

/// Describes one displayed column.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnDef {
    /// Row field the column reads.
    pub key: String,
    /// Header label.
    pub header: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub filterable: bool,
    /// Named display formatter.
    #[serde(default)]
    pub render: Option<CellFormat>,
    /// Display width hint, passed through to renderers untouched.
    #[serde(default)]
    pub width: Option<String>,
    /// Validation rules checked by [`DataTable::validate_rows`](crate::DataTable::validate_rows).
    #[serde(default)]
    pub rules: Option<FieldRules>,
    /// Display closure; takes precedence over `render`.
    #[serde(skip)]
    pub custom_render: Option<CustomRender>,
}

impl ColumnDef {
    /// Creates a plain, non-sortable, non-filterable column.
    #[must_use]
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: false,
            filterable: false,
            render: None,
            width: None,
            rules: None,
            custom_render: None,
        }
    }

    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: CellFormat) -> Self {
        self.render = Some(format);
        self
    }

    #[must_use]
    pub fn with_render(mut self, render: impl Fn(&Value) -> String + Send + Sync + 'static) -> Self {
        self.custom_render = Some(CustomRender::new(render));
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: FieldRules) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Renders a raw value for display.
    ///
    /// Uses the custom closure if set, then the named format, and falls back to
    /// the value's text.
    #[must_use]
    pub fn display(&self, value: &Value) -> String {
        if let Some(CustomRender(render)) = &self.custom_render {
            return render(value);
        }
        self.render
            .as_ref()
            .map_or_else(|| value.to_text(), |format| format.apply(value))
    }
}

/// One selectable value of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Describes an equality filter offered for one row field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterDef {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub options: Vec<FilterOption>,
}

impl FilterDef {
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            options,
        }
    }
}

fn default_search_placeholder() -> String {
    "Buscar...".to_string()
}

/// Complete display description of a table.
#[derive(Debug, Clone, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_search_placeholder")]
    pub search_placeholder: String,
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub filters: Vec<FilterDef>,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            title: None,
            search_placeholder: default_search_placeholder(),
            columns: Vec::new(),
            filters: Vec::new(),
        }
    }
}

impl TableSchema {
    #[must_use]
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_filters(mut self, filters: Vec<FilterDef>) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn column(&self, key: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.key == key)
    }

    /// Parses a schema from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`PlanboardError::Toml`](crate::PlanboardError::Toml) if the text
    /// does not describe a schema.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a schema from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a TOML error if it
    /// cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let _span = tracing::debug_span!("load_schema", path = ?path.as_ref()).entered();
        let contents = std::fs::read_to_string(path)?;
        let schema = Self::from_toml(&contents)?;
        tracing::debug!(
            columns = schema.columns.len(),
            filters = schema.filters.len(),
            "schema loaded"
        );
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
title = "Tarefas"

[[columns]]
key = "titulo"
header = "Tarefa"
sortable = true

[[columns]]
key = "progresso"
header = "Progresso"
sortable = true
render = "percentage"
width = "w-24"

[[columns]]
key = "cpf"
header = "CPF"
render = "cpf"
rules = { cpf = true }

[[filters]]
key = "prioridade"
label = "Prioridade"
options = [
    { value = "alta", label = "Alta" },
    { value = "baixa", label = "Baixa" },
]
"#;

    #[test]
    fn parses_schema_from_toml() {
        let schema = TableSchema::from_toml(SCHEMA).unwrap();
        assert_eq!(schema.title.as_deref(), Some("Tarefas"));
        assert_eq!(schema.search_placeholder, "Buscar...");
        assert_eq!(schema.columns.len(), 3);
        assert!(schema.column("titulo").unwrap().sortable);
        assert!(!schema.column("cpf").unwrap().sortable);
        assert_eq!(schema.filters[0].options[1].value, "baixa");
        assert!(schema.column("cpf").unwrap().rules.as_ref().unwrap().cpf);
    }

    #[test]
    fn rejects_unknown_format() {
        let text = r#"
[[columns]]
key = "x"
header = "X"
render = "sparkline"
"#;
        assert!(TableSchema::from_toml(text).is_err());
    }

    #[test]
    fn display_prefers_custom_render() {
        let column = ColumnDef::new("status", "Status")
            .with_format(CellFormat::Uppercase)
            .with_render(|value| format!("<{value}>"));
        assert_eq!(column.display(&Value::from("ativo")), "<ativo>");

        let plain = ColumnDef::new("progresso", "Progresso");
        assert_eq!(plain.display(&Value::Number(45.0)), "45");

        let formatted = ColumnDef::new("progresso", "Progresso").with_format(CellFormat::Percentage);
        assert_eq!(formatted.display(&Value::Number(45.0)), "45.0%");
    }
}
