// src/locations/view_state.rs
use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definitions::{ColumnKey, FlatRow, RawLocation, RowId};
use super::normalizer::normalize;
use super::search_index::{filter, SearchResult};
use super::sort_engine::{handle_header_click, SortStateMap};

/// How a non-empty query with at least one match affects the displayed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Show every working row; highlight the matches.
    #[default]
    Highlight,
    /// Show only the matching rows (in working order), highlighted.
    MatchesOnly,
}

impl DisplayMode {
    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Highlight => "Highlight matches",
            DisplayMode::MatchesOnly => "Show matches only",
        }
    }
}

/// Where the current query left the displayed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Empty query.
    Inactive,
    /// Query matched this many rows.
    Matched(usize),
    /// Query matched nothing; all working rows are shown unhighlighted.
    NoMatches,
}

/// Everything the render layer needs for one frame.
#[derive(Debug, Clone)]
pub struct TableSnapshot<'a> {
    pub rows: Vec<&'a FlatRow>,
    pub sort_states: SortStateMap,
    pub query: &'a str,
    pub outcome: FilterOutcome,
    highlighted: &'a HashSet<RowId>,
}

impl TableSnapshot<'_> {
    pub fn is_highlighted(&self, id: RowId) -> bool {
        self.highlighted.contains(&id)
    }
}

/// Table state for one fetched batch.
///
/// Transitions never mutate the receiver; they return the next state.
/// `working_rows` is always a permutation of `default_rows`.
#[derive(Debug, Clone)]
pub struct ViewState {
    default_rows: Arc<[FlatRow]>,
    working_rows: Vec<FlatRow>,
    sort_states: SortStateMap,
    query: String,
    search: SearchResult,
}

impl ViewState {
    /// Fresh state: fetch order, every column unsorted, empty query.
    pub fn new(rows: Vec<FlatRow>) -> Self {
        Self {
            default_rows: Arc::from(rows.clone()),
            working_rows: rows,
            sort_states: SortStateMap::default(),
            query: String::new(),
            search: SearchResult::default(),
        }
    }

    pub fn from_batch(raw: &[RawLocation]) -> Self {
        Self::new(normalize(raw))
    }

    pub fn default_rows(&self) -> &[FlatRow] {
        &self.default_rows
    }

    pub fn working_rows(&self) -> &[FlatRow] {
        &self.working_rows
    }

    pub fn sort_states(&self) -> &SortStateMap {
        &self.sort_states
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Ids of rows matching the current query.
    pub fn highlight_set(&self) -> &HashSet<RowId> {
        &self.search.matched_ids
    }

    pub fn is_empty(&self) -> bool {
        self.default_rows.is_empty()
    }

    /// Header click: cycle the column's sort state, then re-apply the query
    /// to the new order.
    pub fn with_header_clicked(&self, key: ColumnKey) -> ViewState {
        let outcome =
            handle_header_click(&self.working_rows, &self.default_rows, &self.sort_states, key);
        let search = filter(&outcome.rows, &self.query);
        ViewState {
            default_rows: Arc::clone(&self.default_rows),
            working_rows: outcome.rows,
            sort_states: outcome.states,
            query: self.query.clone(),
            search,
        }
    }

    /// Query change: recompute matches against the current working order.
    pub fn with_query(&self, query: impl Into<String>) -> ViewState {
        let query = query.into();
        let search = filter(&self.working_rows, &query);
        ViewState {
            default_rows: Arc::clone(&self.default_rows),
            working_rows: self.working_rows.clone(),
            sort_states: self.sort_states,
            query,
            search,
        }
    }

    pub fn snapshot(&self, mode: DisplayMode) -> TableSnapshot<'_> {
        let outcome = if self.query.is_empty() {
            FilterOutcome::Inactive
        } else if self.search.is_empty() {
            FilterOutcome::NoMatches
        } else {
            FilterOutcome::Matched(self.search.matches.len())
        };

        let rows = match (outcome, mode) {
            (FilterOutcome::Matched(_), DisplayMode::MatchesOnly) => self
                .working_rows
                .iter()
                .filter(|row| self.search.matched_ids.contains(&row.id))
                .collect(),
            _ => self.working_rows.iter().collect(),
        };

        TableSnapshot {
            rows,
            sort_states: self.sort_states,
            query: &self.query,
            outcome,
            highlighted: &self.search.matched_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::sort_engine::SortState;

    fn row(city: &str, country: &str) -> FlatRow {
        let mut row = FlatRow::empty(RowId::new_random());
        row.city = Some(city.to_string());
        row.country = Some(country.to_string());
        row
    }

    fn sample() -> ViewState {
        ViewState::new(vec![
            row("Rome", "Italy"),
            row("Lima", "Peru"),
            row("Milan", "Italy"),
        ])
    }

    fn ids<'a>(rows: impl IntoIterator<Item = &'a FlatRow>) -> Vec<RowId> {
        rows.into_iter().map(|r| r.id).collect()
    }

    fn assert_permutation(view: &ViewState) {
        let mut working = ids(view.working_rows());
        let mut defaults = ids(view.default_rows());
        working.sort();
        defaults.sort();
        assert_eq!(working, defaults);
    }

    #[test]
    fn starts_in_fetch_order_unsorted() {
        let view = sample();
        assert_eq!(ids(view.working_rows()), ids(view.default_rows()));
        assert!(view.sort_states().iter().all(|(_, s)| s == SortState::Unsorted));
        assert_eq!(view.query(), "");
        assert!(view.highlight_set().is_empty());
    }

    #[test]
    fn transitions_leave_the_receiver_untouched() {
        let view = sample();
        let before = ids(view.working_rows());
        let _sorted = view.with_header_clicked(ColumnKey::City);
        let _queried = view.with_query("Lima");
        assert_eq!(ids(view.working_rows()), before);
        assert_eq!(view.query(), "");
    }

    #[test]
    fn tri_state_cycle_restores_defaults() {
        let view = sample();
        let asc = view.with_header_clicked(ColumnKey::City);
        assert_permutation(&asc);
        let cities: Vec<_> = asc.working_rows().iter().map(|r| r.display_value(ColumnKey::City)).collect();
        assert_eq!(cities, vec!["Lima", "Milan", "Rome"]);

        let desc = asc.with_header_clicked(ColumnKey::City);
        assert_permutation(&desc);
        let restored = desc.with_header_clicked(ColumnKey::City);
        assert_eq!(ids(restored.working_rows()), ids(view.default_rows()));
        assert_eq!(restored.sort_states().active(), None);
    }

    #[test]
    fn empty_query_shows_working_rows_without_highlight() {
        let view = sample().with_header_clicked(ColumnKey::City);
        for mode in [DisplayMode::Highlight, DisplayMode::MatchesOnly] {
            let snap = view.snapshot(mode);
            assert_eq!(snap.outcome, FilterOutcome::Inactive);
            assert_eq!(ids(snap.rows.iter().copied()), ids(view.working_rows()));
            assert!(view.working_rows().iter().all(|r| !snap.is_highlighted(r.id)));
        }
    }

    #[test]
    fn highlight_mode_keeps_every_row() {
        let view = sample().with_query("Italy");
        let snap = view.snapshot(DisplayMode::Highlight);
        assert_eq!(snap.outcome, FilterOutcome::Matched(2));
        assert_eq!(snap.rows.len(), 3);
        let flags: Vec<_> = snap.rows.iter().map(|r| snap.is_highlighted(r.id)).collect();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn matches_only_mode_restricts_to_matches_in_working_order() {
        let view = sample().with_header_clicked(ColumnKey::City).with_query("Italy");
        let snap = view.snapshot(DisplayMode::MatchesOnly);
        let cities: Vec<_> = snap.rows.iter().map(|r| r.display_value(ColumnKey::City)).collect();
        assert_eq!(cities, vec!["Milan", "Rome"]);
        assert!(snap.rows.iter().all(|r| snap.is_highlighted(r.id)));
    }

    #[test]
    fn no_matches_falls_back_to_all_rows() {
        let view = sample().with_query("Tokyo");
        let snap = view.snapshot(DisplayMode::MatchesOnly);
        assert_eq!(snap.outcome, FilterOutcome::NoMatches);
        assert_eq!(snap.rows.len(), 3);
        assert!(view.highlight_set().is_empty());
    }

    #[test]
    fn switching_columns_sorts_from_the_current_order() {
        let view = sample();
        let (rome, lima, milan) = (
            view.default_rows()[0].id,
            view.default_rows()[1].id,
            view.default_rows()[2].id,
        );

        let by_city = view.with_header_clicked(ColumnKey::City);
        assert_eq!(ids(by_city.working_rows()), vec![lima, milan, rome]);

        let by_country = by_city.with_header_clicked(ColumnKey::Country);
        assert_eq!(ids(by_country.working_rows()), vec![milan, rome, lima]);
        assert_eq!(by_country.sort_states().get(ColumnKey::City), SortState::Unsorted);

        let descending = by_country.with_header_clicked(ColumnKey::Country);
        assert_eq!(ids(descending.working_rows()), vec![lima, milan, rome]);
        assert_permutation(&descending);
    }

    #[test]
    fn query_survives_header_clicks() {
        let view = sample().with_query("Italy").with_header_clicked(ColumnKey::City);
        assert_eq!(view.query(), "Italy");
        assert_eq!(view.highlight_set().len(), 2);

        let snap = view.snapshot(DisplayMode::MatchesOnly);
        let cities: Vec<_> = snap.rows.iter().map(|r| r.display_value(ColumnKey::City)).collect();
        assert_eq!(cities, vec!["Milan", "Rome"]);
    }

    #[test]
    fn highlight_set_is_subset_of_defaults() {
        let view = sample().with_query("i");
        let defaults: HashSet<_> = view.default_rows().iter().map(|r| r.id).collect();
        assert!(view.highlight_set().is_subset(&defaults));
    }

    #[test]
    fn empty_batch_is_a_normal_state() {
        let view = ViewState::from_batch(&[]).with_header_clicked(ColumnKey::State).with_query("x");
        assert!(view.is_empty());
        assert!(view.snapshot(DisplayMode::Highlight).rows.is_empty());
    }
}
