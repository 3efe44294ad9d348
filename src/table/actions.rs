//! Actions representing row-level requests to be carried out by the host.
//!
//! The table engine does not know what viewing, editing, deleting or exporting a
//! row means for the application embedding it. [`handle_event`](super::handle_event)
//! translates row events into [`TableAction`]s carrying source indices, and the
//! host executes them.
//!
//! # Example
//!
//! ```
//! use planboard::{ExportFormat, TableAction};
//!
//! let actions = vec![
//!     TableAction::View { row: 4 },
//!     TableAction::Export { format: ExportFormat::Csv, rows: vec![4, 1, 7] },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::export::ExportFormat;

/// Commands for the host, produced by row and export events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// Show the row identified by its source index.
    View {
        row: usize,
    },

    /// Open the row for editing.
    Edit {
        row: usize,
    },

    /// Delete the row. The engine does not remove it; the host calls
    /// [`DataTable::set_rows`](crate::DataTable::set_rows) afterwards.
    Delete {
        row: usize,
    },

    /// Export every processed row, in display order.
    Export {
        format: ExportFormat,
        rows: Vec<usize>,
    },
}
