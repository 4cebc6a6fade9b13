// src/locations/sort_engine.rs
use super::definitions::{ColumnKey, FlatRow};

/// Direction of an active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Per-column sort state. Header clicks cycle Unsorted -> Ascending -> Descending -> Unsorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortState {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl SortState {
    /// State after one more click on the same column.
    pub fn next(self) -> SortState {
        match self {
            SortState::Unsorted => SortState::Ascending,
            SortState::Ascending => SortState::Descending,
            SortState::Descending => SortState::Unsorted,
        }
    }

    pub fn direction(self) -> Option<SortDirection> {
        match self {
            SortState::Unsorted => None,
            SortState::Ascending => Some(SortDirection::Ascending),
            SortState::Descending => Some(SortDirection::Descending),
        }
    }

    /// Indicator drawn next to a header label.
    pub fn indicator(self) -> &'static str {
        match self {
            SortState::Unsorted => "",
            SortState::Ascending => "▲",
            SortState::Descending => "▼",
        }
    }
}

/// Sort state of every column. Total over `ColumnKey` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortStateMap([SortState; ColumnKey::COUNT]);

impl SortStateMap {
    pub fn get(&self, key: ColumnKey) -> SortState {
        self.0[key.index()]
    }

    /// Map where `key` has `state` and every other column is unsorted.
    pub fn only(key: ColumnKey, state: SortState) -> Self {
        let mut map = Self::default();
        map.0[key.index()] = state;
        map
    }

    /// The column currently driving the order, if any.
    pub fn active(&self) -> Option<(ColumnKey, SortDirection)> {
        ColumnKey::ALL
            .iter()
            .find_map(|&key| self.get(key).direction().map(|dir| (key, dir)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColumnKey, SortState)> + '_ {
        ColumnKey::ALL.iter().map(move |&key| (key, self.get(key)))
    }
}

/// Returns `rows` stably sorted by `field`. The input is left untouched.
pub fn sort(rows: &[FlatRow], field: ColumnKey, direction: SortDirection) -> Vec<FlatRow> {
    let mut sorted = rows.to_vec();
    match direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| a.compare_by(b, field)),
        SortDirection::Descending => sorted.sort_by(|a, b| b.compare_by(a, field)),
    }
    sorted
}

/// Outcome of a header click: the new working order and sort states.
#[derive(Debug, Clone)]
pub struct HeaderClickOutcome {
    pub rows: Vec<FlatRow>,
    pub states: SortStateMap,
}

/// Applies one header click.
///
/// Ascending and descending re-sort the current `working` rows; leaving
/// descending restores a fresh copy of `default_rows` without comparing.
/// Every column other than `field` ends up unsorted.
pub fn handle_header_click(
    working: &[FlatRow],
    default_rows: &[FlatRow],
    states: &SortStateMap,
    field: ColumnKey,
) -> HeaderClickOutcome {
    let next_state = states.get(field).next();
    let rows = match next_state.direction() {
        Some(direction) => sort(working, field, direction),
        None => default_rows.to_vec(),
    };
    HeaderClickOutcome {
        rows,
        states: SortStateMap::only(field, next_state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::definitions::RowId;

    fn row(city: &str, street_number: Option<i64>) -> FlatRow {
        let mut row = FlatRow::empty(RowId::new_random());
        row.city = Some(city.to_string());
        row.street_number = street_number;
        row
    }

    fn ids(rows: &[FlatRow]) -> Vec<RowId> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let rows = vec![row("Rome", None), row("Lima", None)];
        let before = rows.clone();
        let _ = sort(&rows, ColumnKey::City, SortDirection::Ascending);
        assert_eq!(rows, before);
    }

    #[test]
    fn lima_rome_scenario() {
        let rows = vec![row("Lima", None), row("Rome", None)];
        let (lima, rome) = (rows[0].id, rows[1].id);

        let asc = sort(&rows, ColumnKey::City, SortDirection::Ascending);
        assert_eq!(ids(&asc), vec![lima, rome]);
        let desc = sort(&asc, ColumnKey::City, SortDirection::Descending);
        assert_eq!(ids(&desc), vec![rome, lima]);
    }

    #[test]
    fn sort_is_stable_and_idempotent() {
        let rows = vec![
            row("Oslo", Some(3)),
            row("Lima", Some(1)),
            row("Oslo", Some(2)),
            row("Lima", Some(4)),
        ];
        let asc = sort(&rows, ColumnKey::City, SortDirection::Ascending);
        assert_eq!(ids(&asc), vec![rows[1].id, rows[3].id, rows[0].id, rows[2].id]);

        let again = sort(&asc, ColumnKey::City, SortDirection::Ascending);
        assert_eq!(ids(&again), ids(&asc));

        let desc = sort(&rows, ColumnKey::City, SortDirection::Descending);
        assert_eq!(ids(&desc), vec![rows[0].id, rows[2].id, rows[1].id, rows[3].id]);
    }

    #[test]
    fn street_number_sorts_numerically() {
        let rows = vec![row("a", Some(10)), row("b", Some(9)), row("c", None)];
        let asc = sort(&rows, ColumnKey::StreetNumber, SortDirection::Ascending);
        assert_eq!(ids(&asc), vec![rows[2].id, rows[1].id, rows[0].id]);
    }

    #[test]
    fn three_clicks_restore_default_order() {
        let defaults = vec![row("Rome", None), row("Lima", None), row("Oslo", None)];
        let mut working = defaults.clone();
        let mut states = SortStateMap::default();

        let expected = [SortState::Ascending, SortState::Descending, SortState::Unsorted];
        for expected_state in expected {
            let outcome = handle_header_click(&working, &defaults, &states, ColumnKey::City);
            working = outcome.rows;
            states = outcome.states;
            assert_eq!(states.get(ColumnKey::City), expected_state);
        }
        assert_eq!(ids(&working), ids(&defaults));
        assert_eq!(states.active(), None);
    }

    #[test]
    fn new_column_sorts_the_present_order() {
        let defaults = vec![
            row("Oslo", Some(1)),
            row("Lima", Some(2)),
            row("Oslo", Some(3)),
            row("Lima", Some(4)),
        ];
        let d = ids(&defaults);
        let mut working = defaults.clone();
        let mut states = SortStateMap::default();
        let mut click = |key| {
            let outcome = handle_header_click(&working, &defaults, &states, key);
            working = outcome.rows;
            states = outcome.states;
            ids(&working)
        };

        click(ColumnKey::StreetNumber);
        assert_eq!(click(ColumnKey::StreetNumber), vec![d[3], d[2], d[1], d[0]]);

        // Ties on city keep the street-number descending order.
        assert_eq!(click(ColumnKey::City), vec![d[3], d[1], d[2], d[0]]);
        assert_eq!(click(ColumnKey::City), vec![d[2], d[0], d[3], d[1]]);
        assert_eq!(click(ColumnKey::City), d);
    }

    #[test]
    fn clicking_another_column_resets_the_previous_one() {
        let defaults = vec![row("Rome", Some(1)), row("Lima", Some(2))];
        let first = handle_header_click(&defaults, &defaults, &SortStateMap::default(), ColumnKey::City);
        assert_eq!(first.states.get(ColumnKey::City), SortState::Ascending);

        let second = handle_header_click(&first.rows, &defaults, &first.states, ColumnKey::StreetNumber);
        assert_eq!(second.states.get(ColumnKey::City), SortState::Unsorted);
        assert_eq!(second.states.get(ColumnKey::StreetNumber), SortState::Ascending);
        assert_eq!(
            second.states.active(),
            Some((ColumnKey::StreetNumber, SortDirection::Ascending))
        );
        let sorted_count = second
            .states
            .iter()
            .filter(|(_, s)| *s != SortState::Unsorted)
            .count();
        assert_eq!(sorted_count, 1);
    }
}
