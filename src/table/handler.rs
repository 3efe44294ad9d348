//! Event handling and state transition logic.
//!
//! This module turns discrete input events (a keystroke in the search box, a
//! filter selection, a header click, a pagination button, a row button) into
//! [`DataTable`] mutations and outward [`TableAction`]s.
//!
//! # Architecture
//!
//! ```text
//! Input → TableEvent → handle_event → DataTable mutations → (needs_render, actions)
//!                                                                    ↓
//!                                                          host executes actions
//! ```
//!
//! Everything runs synchronously on the caller's thread. The only deferred work
//! is typed search text, which is applied by a later [`TableEvent::Tick`] once
//! the debounce window has passed.
//!
//! # Example
//!
//! ```
//! use planboard::{handle_event, ColumnDef, DataTable, TableAction, TableEvent, TableSchema, TableSettings};
//! use serde_json::json;
//! use std::time::Instant;
//!
//! let rows = vec![json!({"nome": "PAA 2024"}), json!({"nome": "PAA 2025"})];
//! let schema = TableSchema::new(vec![ColumnDef::new("nome", "Nome").sortable()]);
//! let mut table = DataTable::new(rows, schema, TableSettings::default());
//!
//! let now = Instant::now();
//! handle_event(&mut table, TableEvent::Sort("nome".into()), now);
//! handle_event(&mut table, TableEvent::Sort("nome".into()), now);
//!
//! let (_, actions) = handle_event(&mut table, TableEvent::View(0), now);
//! assert_eq!(actions, vec![TableAction::View { row: 1 }]);
//! ```

use super::actions::TableAction;
use super::state::DataTable;
use crate::domain::Record;
use crate::export::ExportFormat;
use std::time::Instant;

/// Input events a table reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// The search box now contains this text.
    SearchInput(String),
    /// Time has passed; apply pending search text if it is due.
    Tick,
    /// A filter selector changed. An empty value means "all".
    SetFilter {
        key: String,
        value: String,
    },
    /// Every filter was reset.
    ClearFilters,
    /// A column header was clicked.
    Sort(String),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    GoToPage(usize),
    SetPageSize(usize),
    /// View button on the row at this position of the current page.
    View(usize),
    /// Edit button on the row at this position of the current page.
    Edit(usize),
    /// Delete button on the row at this position of the current page.
    Delete(usize),
    /// Export button.
    Export(ExportFormat),
}

/// Processes an event, mutates the table and returns actions for the host.
///
/// # Returns
///
/// A tuple of:
/// - `bool`: whether the visible view changed and should be re-rendered
/// - `Vec<TableAction>`: row or export requests for the host (often empty)
///
/// Row events refer to a position within the current page; positions past the
/// end of the page are ignored.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event.
pub fn handle_event<R: Record>(
    table: &mut DataTable<R>,
    event: TableEvent,
    now: Instant,
) -> (bool, Vec<TableAction>) {
    let _span = tracing::debug_span!("handle_event", event = ?event).entered();

    match event {
        TableEvent::SearchInput(text) => {
            table.type_search(text, now);
            // The search box itself changed even if rows did not.
            (true, vec![])
        }
        TableEvent::Tick => (table.tick(now), vec![]),
        TableEvent::SetFilter { key, value } => (table.set_filter(&key, &value), vec![]),
        TableEvent::ClearFilters => (table.clear_filters(), vec![]),
        TableEvent::Sort(key) => (table.sort_by(&key), vec![]),
        TableEvent::NextPage => (table.next_page(), vec![]),
        TableEvent::PreviousPage => (table.previous_page(), vec![]),
        TableEvent::FirstPage => (table.first_page(), vec![]),
        TableEvent::LastPage => (table.last_page(), vec![]),
        TableEvent::GoToPage(page) => (table.go_to_page(page), vec![]),
        TableEvent::SetPageSize(size) => (table.set_page_size(size), vec![]),
        TableEvent::View(position) => row_action(table, position, |row| TableAction::View { row }),
        TableEvent::Edit(position) => row_action(table, position, |row| TableAction::Edit { row }),
        TableEvent::Delete(position) => {
            row_action(table, position, |row| TableAction::Delete { row })
        }
        TableEvent::Export(format) => {
            let rows = table.processed_indices().to_vec();
            tracing::debug!(format = ?format, rows = rows.len(), "export requested");
            (false, vec![TableAction::Export { format, rows }])
        }
    }
}

fn row_action<R: Record>(
    table: &DataTable<R>,
    position: usize,
    action: impl FnOnce(usize) -> TableAction,
) -> (bool, Vec<TableAction>) {
    let Some(&row) = table.page_indices().get(position) else {
        tracing::debug!(position, "row action outside the current page");
        return (false, vec![]);
    };
    (false, vec![action(row)])
}
