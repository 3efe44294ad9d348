//! Search, filter and sort pipeline.
//!
//! These are pure functions over a row slice. They never touch the rows
//! themselves; the result of a run is the list of source indices that survive
//! search and filters, in display order.
//!
//! # Pipeline
//!
//! ```text
//! rows → search (OR across fields, case-insensitive substring)
//!      → filters (AND across active filters, exact text equality)
//!      → sort (stable, by raw value of one column)
//!      → paginate (done by the caller with `Pagination`)
//! ```
//!
//! # Example
//!
//! ```
//! use planboard::{run_query, Query, SortState};
//! use serde_json::json;
//!
//! let rows = vec![
//!     json!({"nome": "Carlos Lima", "dept": "TI"}),
//!     json!({"nome": "Ana Costa", "dept": "TI"}),
//!     json!({"nome": "Bruno Reis", "dept": "RH"}),
//! ];
//!
//! let mut query = Query::default();
//! query.set_filter("dept", "TI");
//! query.sort = Some(SortState::ascending("nome"));
//!
//! assert_eq!(run_query(&rows, &query), vec![1, 0]);
//! ```

use super::sort::{SortDirection, SortState};
use crate::domain::Record;
use std::collections::BTreeMap;

/// Explicit search/filter/sort state handed to the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Applied search term. Empty matches every row.
    pub search: String,
    /// Selected filter value per field key. Empty values are inactive.
    pub filters: BTreeMap<String, String>,
    pub sort: Option<SortState>,
}

impl Query {
    /// Selects `value` for the filter on `key`; an empty value deactivates it.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value);
        }
    }

    /// Filters that currently constrain the result.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// Returns whether any field of `row` contains `term`, ignoring case.
///
/// An empty term matches every row.
pub fn matches_search<R: Record>(row: &R, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    row.field_names()
        .iter()
        .any(|name| row.value(name).to_text().to_lowercase().contains(&needle))
}

/// Returns whether every active filter equals the text of its field exactly.
pub fn matches_filters<R: Record>(row: &R, query: &Query) -> bool {
    query
        .active_filters()
        .all(|(key, value)| row.value(key).to_text() == value)
}

/// Stable-sorts `indices` by the raw value of the sort column.
///
/// With no sort the order is left untouched. Ties keep their relative order in
/// both directions.
pub fn sort_indices<R: Record>(rows: &[R], indices: &mut [usize], sort: Option<&SortState>) {
    let Some(sort) = sort else {
        return;
    };

    let keys: Vec<_> = indices.iter().map(|&i| rows[i].value(&sort.column)).collect();
    let mut order: Vec<usize> = (0..indices.len()).collect();
    order.sort_by(|&a, &b| {
        let ord = keys[a].compare(&keys[b]);
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    let sorted: Vec<usize> = order.into_iter().map(|pos| indices[pos]).collect();
    indices.copy_from_slice(&sorted);
}

/// Runs search, filters and sort over `rows`.
///
/// Returns the indices of matching rows in display order.
pub fn run_query<R: Record>(rows: &[R], query: &Query) -> Vec<usize> {
    let _span = tracing::debug_span!("run_query",
        total_rows = rows.len(),
        search_len = query.search.len(),
        active_filters = query.active_filters().count(),
        sort = ?query.sort
    )
    .entered();

    let mut indices: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| matches_search(*row, &query.search) && matches_filters(*row, query))
        .map(|(index, _)| index)
        .collect();

    sort_indices(rows, &mut indices, query.sort.as_ref());

    tracing::debug!(matched = indices.len(), "query applied");
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as Json};

    fn people() -> Vec<Json> {
        vec![
            json!({"name": "Ana Costa", "status": "ativo", "dept": "TI", "score": 7}),
            json!({"name": "Carlos Lima", "status": "ativo", "dept": "RH", "score": 3}),
            json!({"name": "Mariana Souza", "status": "inativo", "dept": "TI", "score": 7}),
            json!({"name": "João Ana", "status": "ativo", "dept": "TI", "score": 1}),
        ]
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let rows = vec![json!({"name": "Ana Costa"}), json!({"name": "Carlos Lima"})];
        let query = Query {
            search: "ana".into(),
            ..Query::default()
        };
        assert_eq!(run_query(&rows, &query), vec![0]);

        let query = Query::default();
        assert_eq!(run_query(&rows, &query), vec![0, 1]);
    }

    #[test]
    fn search_matches_any_field() {
        let query = Query {
            search: "RH".into(),
            ..Query::default()
        };
        assert_eq!(run_query(&people(), &query), vec![1]);

        let query = Query {
            search: "ANA".into(),
            ..Query::default()
        };
        assert_eq!(run_query(&people(), &query), vec![0, 2, 3]);
    }

    #[test]
    fn filters_are_exact_and_combined() {
        let mut query = Query::default();
        query.set_filter("status", "ativo");
        query.set_filter("dept", "TI");
        assert_eq!(run_query(&people(), &query), vec![0, 3]);

        query.set_filter("status", "ativ");
        assert!(run_query(&people(), &query).is_empty());

        query.set_filter("status", "");
        assert_eq!(run_query(&people(), &query), vec![0, 2, 3]);
    }

    #[test]
    fn numeric_filter_compares_text() {
        let mut query = Query::default();
        query.set_filter("score", "7");
        assert_eq!(run_query(&people(), &query), vec![0, 2]);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let rows = people();
        let mut query = Query {
            sort: Some(SortState::ascending("score")),
            ..Query::default()
        };
        assert_eq!(run_query(&rows, &query), vec![3, 1, 0, 2]);

        query.sort = Some(SortState::toggle(query.sort.as_ref(), "score"));
        assert_eq!(run_query(&rows, &query), vec![0, 2, 1, 3]);
    }

    #[test]
    fn no_sort_keeps_input_order() {
        let rows = people();
        assert_eq!(run_query(&rows, &Query::default()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn sort_uses_raw_numbers_not_text() {
        let rows = vec![json!({"n": 10}), json!({"n": 9}), json!({"n": 100})];
        let query = Query {
            sort: Some(SortState::ascending("n")),
            ..Query::default()
        };
        assert_eq!(run_query(&rows, &query), vec![1, 0, 2]);
    }

    #[test]
    fn missing_fields_sort_first_ascending() {
        let rows = vec![json!({"n": 2}), json!({}), json!({"n": 1})];
        let query = Query {
            sort: Some(SortState::ascending("n")),
            ..Query::default()
        };
        assert_eq!(run_query(&rows, &query), vec![1, 2, 0]);
    }
}
