//! Sort state for a table.
//!
//! A table is sorted by at most one column at a time. Requesting a sort on the
//! column already sorted flips its direction; requesting a different column
//! starts that column in ascending order.
//!
//! # Example
//!
//! ```
//! use planboard::{SortDirection, SortState};
//!
//! let sort = SortState::toggle(None, "progresso");
//! assert_eq!(sort.direction, SortDirection::Ascending);
//!
//! let sort = SortState::toggle(Some(&sort), "progresso");
//! assert_eq!(sort.direction, SortDirection::Descending);
//!
//! let sort = SortState::toggle(Some(&sort), "nome");
//! assert_eq!(sort.direction, SortDirection::Ascending);
//! ```

use serde::Serialize;

/// Order in which the sort column is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Arrow shown next to the sorted column's header.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

/// Active sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    #[must_use]
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Computes the sort state after a sort request on `column`.
    #[must_use]
    pub fn toggle(current: Option<&Self>, column: &str) -> Self {
        match current {
            Some(sort) if sort.column == column => Self {
                column: sort.column.clone(),
                direction: sort.direction.flipped(),
            },
            _ => Self::ascending(column),
        }
    }
}
