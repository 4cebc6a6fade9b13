// src/locations/search_index.rs
use std::collections::HashSet;

use super::definitions::{ColumnKey, FlatRow, RowId};

/// Rows matching a query, plus their ids for highlight lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    /// Matching rows in input order, each at most once.
    pub matches: Vec<FlatRow>,
    pub matched_ids: HashSet<RowId>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// True if any searchable text field of `row` contains `query` (case-sensitive).
pub fn row_matches(row: &FlatRow, query: &str) -> bool {
    ColumnKey::ALL
        .iter()
        .filter(|key| key.is_searchable())
        .filter_map(|&key| row.text(key))
        .any(|value| value.contains(query))
}

/// Computes the matching subset of `rows` from scratch.
/// An empty query means "no filter" and yields no matches.
pub fn filter(rows: &[FlatRow], query: &str) -> SearchResult {
    if query.is_empty() {
        return SearchResult::default();
    }

    let mut result = SearchResult::default();
    for row in rows {
        if row_matches(row, query) && result.matched_ids.insert(row.id) {
            result.matches.push(row.clone());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(city: &str, country: &str, street_number: i64) -> FlatRow {
        let mut row = FlatRow::empty(RowId::new_random());
        row.city = Some(city.to_string());
        row.country = Some(country.to_string());
        row.street_number = Some(street_number);
        row
    }

    #[test]
    fn empty_query_matches_nothing() {
        let rows = vec![row("Lima", "Peru", 1), row("", "", 2)];
        let result = filter(&rows, "");
        assert!(result.is_empty());
        assert!(result.matched_ids.is_empty());
    }

    #[test]
    fn lim_matches_only_lima() {
        let rows = vec![row("Lima", "Peru", 1), row("Rome", "Italy", 2)];
        let result = filter(&rows, "Lim");
        assert_eq!(result.matches, vec![rows[0].clone()]);
        assert_eq!(result.matched_ids, HashSet::from([rows[0].id]));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let rows = vec![row("Lima", "Peru", 1)];
        assert!(filter(&rows, "lima").is_empty());
        assert_eq!(filter(&rows, "ima").matches.len(), 1);
    }

    #[test]
    fn street_number_is_never_searched() {
        let rows = vec![row("Lima", "Peru", 1234)];
        assert!(filter(&rows, "123").is_empty());
    }

    #[test]
    fn multi_field_match_is_included_once() {
        let mut lima = row("Lima", "Lima", 1);
        lima.state = Some("Lima".into());
        let rows = vec![lima, row("Rome", "Italy", 2)];
        let result = filter(&rows, "Lima");
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matched_ids.len(), 1);
    }

    #[test]
    fn matches_keep_input_order() {
        let rows = vec![
            row("Rome", "Italy", 1),
            row("Lima", "Peru", 2),
            row("Roma", "Italy", 3),
        ];
        let result = filter(&rows, "Ital");
        let ids: Vec<_> = result.matches.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![rows[0].id, rows[2].id]);
    }
}
