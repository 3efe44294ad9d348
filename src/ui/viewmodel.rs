//! View model types representing a renderable table page.
//!
//! View models are computed by [`DataTable::view`](crate::DataTable::view) and
//! consumed by renderers. They contain no business logic, only display-ready
//! data: rendered cell text, sort indicators, pagination labels and the empty
//! state. They serialize to JSON so that non-Rust front ends can draw them.

use crate::table::{FilterOption, PageInfo};
use serde::Serialize;

/// Complete view of one table page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub title: Option<String>,
    pub search_bar: SearchBarInfo,
    pub filters: Vec<FilterInfo>,
    pub header: Vec<HeaderCell>,
    /// Rows of the current page, already rendered.
    pub rows: Vec<DisplayRow>,
    /// Present only when there is more than one page.
    pub footer: Option<FooterInfo>,
    /// Present only when search and filters left no rows.
    pub empty_state: Option<EmptyState>,
    pub page: PageInfo,
}

/// One column header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell {
    pub key: String,
    pub header: String,
    pub sortable: bool,
    /// `↑` or `↓` on the sorted column.
    pub sort_indicator: Option<&'static str>,
    pub width: Option<String>,
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    /// Position of the row in the source collection, for row actions.
    pub source_index: usize,
    /// Rendered text per column, in column order.
    pub cells: Vec<String>,
}

/// Pagination labels and button availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterInfo {
    /// e.g. "Mostrando 11 a 20 de 47 resultados".
    pub summary: String,
    /// e.g. "Página 2 de 5".
    pub page_label: String,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub message: String,
}

/// Search input state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBarInfo {
    pub placeholder: String,
    /// Text as typed.
    pub query: String,
    /// Typed text not applied yet.
    pub pending: bool,
}

/// One filter selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterInfo {
    pub key: String,
    pub label: String,
    /// Selected value, `None` for "Todos".
    pub selected: Option<String>,
    pub options: Vec<FilterOption>,
}
