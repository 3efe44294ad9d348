//! Table instance state and view model computation.
//!
//! [`DataTable`] is the single owner of everything one rendered table needs: the
//! row collection, its schema, the raw and applied search text, the search
//! debouncer, active filters, sort state and pagination. It is the Rust
//! counterpart of a table component instance; two tables never share state.
//!
//! # Architecture
//!
//! Core data (rows, schema) is kept apart from derived data (the processed index
//! list). Every mutation runs the query pipeline again synchronously and feeds the
//! new result count into [`Pagination`], which re-clamps the current page.
//!
//! ```text
//! rows ──► run_query(search, filters, sort) ──► processed indices ──► Pagination ──► page
//! ```
//!
//! # Page Reset
//!
//! When `reset_page_on_change` is set (the default), changing the applied search
//! term or any filter returns the table to page 1. Sorting keeps the current page.
//!
//! # Example
//!
//! ```
//! use planboard::{ColumnDef, DataTable, TableSchema, TableSettings};
//! use serde_json::json;
//!
//! let rows: Vec<_> = (1..=25).map(|n| json!({"id": n, "nome": format!("Tarefa {n}")})).collect();
//! let schema = TableSchema::new(vec![
//!     ColumnDef::new("id", "ID").sortable(),
//!     ColumnDef::new("nome", "Nome"),
//! ]);
//!
//! let mut table = DataTable::new(rows, schema, TableSettings::default());
//! assert_eq!(table.page_info().total_pages, 3);
//!
//! table.sort_by("id");
//! table.sort_by("id");
//! assert_eq!(table.page_rows()[0]["id"], 25);
//! ```

use super::column::TableSchema;
use super::debounce::Debouncer;
use super::pagination::{PageInfo, Pagination};
use super::query::{run_query, Query};
use super::sort::SortState;
use crate::domain::Record;
use crate::formatting::{validate_record, FieldRules};
use crate::ui::viewmodel::{
    DisplayRow, EmptyState, FilterInfo, FooterInfo, HeaderCell, SearchBarInfo, TableView,
};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Behavior knobs of a table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSettings {
    /// Rows per page; zero is treated as one.
    pub page_size: usize,
    /// Quiet period before typed search text is applied. Zero applies immediately.
    pub debounce: Duration,
    /// Return to page 1 when the search term or a filter changes.
    pub reset_page_on_change: bool,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            page_size: crate::DEFAULT_PAGE_SIZE,
            debounce: Duration::from_millis(crate::DEFAULT_DEBOUNCE_MS),
            reset_page_on_change: true,
        }
    }
}

/// Validation failures of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssues {
    /// Position of the row in the source collection.
    pub row: usize,
    /// Messages per failing field.
    pub errors: BTreeMap<String, Vec<String>>,
}

/// One table instance: rows plus search, filter, sort and page state.
#[derive(Debug, Clone)]
pub struct DataTable<R> {
    rows: Vec<R>,
    schema: TableSchema,
    settings: TableSettings,
    /// Text as typed, possibly not yet applied.
    search_input: String,
    query: Query,
    debouncer: Debouncer<String>,
    /// Source indices after search, filters and sort, in display order.
    processed: Vec<usize>,
    pagination: Pagination,
}

impl<R: Record> DataTable<R> {
    /// Creates a table on page 1 with no search, filters or sort.
    #[must_use]
    pub fn new(rows: Vec<R>, schema: TableSchema, settings: TableSettings) -> Self {
        let mut table = Self {
            rows,
            schema,
            settings,
            search_input: String::new(),
            query: Query::default(),
            debouncer: Debouncer::new(settings.debounce),
            processed: Vec::new(),
            pagination: Pagination::new(0, settings.page_size, 1),
        };
        table.recompute();
        table
    }

    /// Replaces the row collection, keeping search, filters, sort and page.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        tracing::debug!(rows = rows.len(), "replacing table rows");
        self.rows = rows;
        self.recompute();
    }

    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, source_index: usize) -> Option<&R> {
        self.rows.get(source_index)
    }

    #[must_use]
    pub const fn schema(&self) -> &TableSchema {
        &self.schema
    }

    #[must_use]
    pub const fn settings(&self) -> &TableSettings {
        &self.settings
    }

    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    /// Search text as typed.
    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Search term currently applied to the rows.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.query.search
    }

    #[must_use]
    pub const fn sort(&self) -> Option<&SortState> {
        self.query.sort.as_ref()
    }

    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        self.pagination.info()
    }

    /// Whether search and filters left no rows.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.processed.is_empty()
    }

    /// Whether typed search text is waiting for the debounce to fire.
    #[must_use]
    pub const fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Instant at which pending search text will be applied.
    #[must_use]
    pub fn search_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Records typed search text and schedules it to be applied.
    ///
    /// With a zero debounce the text is applied at once. Returns whether the
    /// visible rows changed.
    pub fn type_search(&mut self, text: impl Into<String>, now: Instant) -> bool {
        let text = text.into();
        self.search_input.clone_from(&text);

        if self.settings.debounce.is_zero() {
            self.debouncer.cancel();
            return self.set_search_term(text);
        }

        self.debouncer.schedule(text, now);
        false
    }

    /// Applies pending search text if its quiet period has elapsed.
    ///
    /// Returns whether the visible rows changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.debouncer
            .poll(now)
            .is_some_and(|term| self.set_search_term(term))
    }

    /// Applies a search term immediately, cancelling any pending typed text.
    pub fn apply_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        self.debouncer.cancel();
        self.search_input.clone_from(&term);
        self.set_search_term(term)
    }

    fn set_search_term(&mut self, term: String) -> bool {
        if term == self.query.search {
            return false;
        }
        tracing::debug!(term_len = term.len(), "applying search term");
        self.query.search = term;
        self.after_query_change();
        true
    }

    /// Selects `value` for the filter on `key`; an empty value clears it.
    ///
    /// Returns whether the filter selection changed.
    pub fn set_filter(&mut self, key: &str, value: &str) -> bool {
        let current = self.query.filters.get(key).map_or("", String::as_str);
        if current == value {
            return false;
        }
        tracing::debug!(key, value, "filter changed");
        self.query.set_filter(key, value);
        self.after_query_change();
        true
    }

    /// Clears every active filter.
    pub fn clear_filters(&mut self) -> bool {
        if self.query.filters.is_empty() {
            return false;
        }
        self.query.filters.clear();
        self.after_query_change();
        true
    }

    #[must_use]
    pub fn filter_value(&self, key: &str) -> Option<&str> {
        self.query.filters.get(key).map(String::as_str)
    }

    /// Sorts by `key`, flipping the direction if it is already the sort column.
    ///
    /// Requests for unknown or non-sortable columns are ignored. Returns whether
    /// the sort state changed.
    pub fn sort_by(&mut self, key: &str) -> bool {
        if !self.schema.column(key).is_some_and(|column| column.sortable) {
            tracing::debug!(key, "ignoring sort on non-sortable column");
            return false;
        }
        let sort = SortState::toggle(self.query.sort.as_ref(), key);
        tracing::debug!(column = %sort.column, direction = ?sort.direction, "sort changed");
        self.query.sort = Some(sort);
        self.recompute();
        true
    }

    /// Removes the sort, restoring input order.
    pub fn clear_sort(&mut self) -> bool {
        if self.query.sort.take().is_none() {
            return false;
        }
        self.recompute();
        true
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.navigate(|p| p.go_to_page(page))
    }

    pub fn next_page(&mut self) -> bool {
        self.navigate(Pagination::go_to_next_page)
    }

    pub fn previous_page(&mut self) -> bool {
        self.navigate(Pagination::go_to_previous_page)
    }

    pub fn first_page(&mut self) -> bool {
        self.navigate(Pagination::go_to_first_page)
    }

    pub fn last_page(&mut self) -> bool {
        self.navigate(Pagination::go_to_last_page)
    }

    /// Changes the page size; zero is treated as one.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let before = self.pagination.clone();
        self.settings.page_size = page_size.max(1);
        self.pagination.set_items_per_page(page_size);
        before != self.pagination
    }

    fn navigate(&mut self, step: impl FnOnce(&mut Pagination)) -> bool {
        let before = self.pagination.current_page();
        step(&mut self.pagination);
        let after = self.pagination.current_page();
        tracing::trace!(before, after, "navigation");
        before != after
    }

    fn after_query_change(&mut self) {
        if self.settings.reset_page_on_change {
            self.pagination.go_to_first_page();
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.processed = run_query(&self.rows, &self.query);
        self.pagination.set_total_items(self.processed.len());
    }

    /// Source indices of every row that passed search and filters, in display order.
    #[must_use]
    pub fn processed_indices(&self) -> &[usize] {
        &self.processed
    }

    /// Source indices of the rows on the current page.
    #[must_use]
    pub fn page_indices(&self) -> &[usize] {
        self.pagination.slice(&self.processed)
    }

    /// Every row that passed search and filters, in display order.
    #[must_use]
    pub fn processed_rows(&self) -> Vec<&R> {
        self.processed.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Rows on the current page, in display order.
    #[must_use]
    pub fn page_rows(&self) -> Vec<&R> {
        self.page_indices().iter().map(|&i| &self.rows[i]).collect()
    }

    /// Checks every row against the validation rules of the schema's columns.
    ///
    /// Returns only rows with at least one failing field.
    #[must_use]
    pub fn validate_rows(&self) -> Vec<RowIssues> {
        let rules: BTreeMap<String, FieldRules> = self
            .schema
            .columns
            .iter()
            .filter_map(|column| column.rules.clone().map(|r| (column.key.clone(), r)))
            .collect();

        if rules.is_empty() {
            return Vec::new();
        }

        let issues: Vec<RowIssues> = self
            .rows
            .iter()
            .enumerate()
            .filter_map(|(row, record)| {
                let result = validate_record(record, &rules);
                (!result.is_valid()).then(|| RowIssues {
                    row,
                    errors: result.errors,
                })
            })
            .collect();

        tracing::debug!(invalid_rows = issues.len(), "rows validated");
        issues
    }

    /// Computes a renderable view of the current page.
    ///
    /// Cells are rendered through each column's formatter; the footer is only
    /// present when there is more than one page, and the empty state only when
    /// search and filters left no rows.
    #[must_use]
    pub fn view(&self) -> TableView {
        let info = self.page_info();

        let header = self
            .schema
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                header: column.header.clone(),
                sortable: column.sortable,
                sort_indicator: self
                    .query
                    .sort
                    .as_ref()
                    .filter(|sort| column.sortable && sort.column == column.key)
                    .map(|sort| sort.direction.indicator()),
                width: column.width.clone(),
            })
            .collect();

        let rows = self
            .page_indices()
            .iter()
            .map(|&source_index| {
                let record = &self.rows[source_index];
                DisplayRow {
                    source_index,
                    cells: self
                        .schema
                        .columns
                        .iter()
                        .map(|column| column.display(&record.value(&column.key)))
                        .collect(),
                }
            })
            .collect();

        let footer = (info.total_pages > 1).then(|| FooterInfo {
            summary: format!(
                "Mostrando {} a {} de {} resultados",
                info.first_item, info.last_item, info.total_items
            ),
            page_label: format!("Página {} de {}", info.current_page, info.total_pages),
            can_go_previous: info.has_previous_page,
            can_go_next: info.has_next_page,
        });

        let empty_state = self.is_empty_result().then(|| EmptyState {
            message: "Nenhum resultado encontrado".to_string(),
        });

        let filters = self
            .schema
            .filters
            .iter()
            .map(|filter| FilterInfo {
                key: filter.key.clone(),
                label: filter.label.clone(),
                selected: self.filter_value(&filter.key).map(str::to_string),
                options: filter.options.clone(),
            })
            .collect();

        TableView {
            title: self.schema.title.clone(),
            search_bar: SearchBarInfo {
                placeholder: self.schema.search_placeholder.clone(),
                query: self.search_input.clone(),
                pending: self.search_pending(),
            },
            filters,
            header,
            rows,
            footer,
            empty_state,
            page: info,
        }
    }
}
