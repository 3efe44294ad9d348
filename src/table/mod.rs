//! Client-side data-table engine.
//!
//! Search, filter, sort and paginate any collection of [`Record`](crate::Record)s.
//!
//! # Architecture
//!
//! ```text
//! TableEvent → handle_event → DataTable ──► run_query (search → filter → sort)
//!                                  │                 │
//!                                  │                 ▼
//!                                  │            Pagination (slice bounds)
//!                                  ▼
//!                            TableAction (view/edit/delete/export)
//! ```
//!
//! # Modules
//!
//! - [`pagination`]: Page state machine with derived slice bounds
//! - [`query`]: Pure search/filter/sort pipeline over source indices
//! - [`sort`]: Sort column and direction with toggle semantics
//! - [`debounce`]: Cancellable delayed single-shot action for search input
//! - [`column`]: Column, filter and schema descriptors
//! - [`state`]: The per-instance [`DataTable`] and its view model
//! - [`handler`]: Event processing
//! - [`actions`]: Row and export requests for the host

pub mod actions;
pub mod column;
pub mod debounce;
pub mod handler;
pub mod pagination;
pub mod query;
pub mod sort;
pub mod state;

pub use actions::TableAction;
pub use column::{ColumnDef, CustomRender, FilterDef, FilterOption, TableSchema};
pub use debounce::Debouncer;
pub use handler::{handle_event, TableEvent};
pub use pagination::{PageInfo, Pagination};
pub use query::{matches_filters, matches_search, run_query, sort_indices, Query};
pub use sort::{SortDirection, SortState};
pub use state::{DataTable, RowIssues, TableSettings};
