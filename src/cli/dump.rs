// src/cli/dump.rs
use std::fmt::Write as _;

use super::DumpArgs;
use crate::locations::fetch::{fetch_batch_blocking, load_batch_from_file, FetchError, FetchRequest};
use crate::locations::view_state::{FilterOutcome, TableSnapshot};
use crate::locations::{ColumnKey, DisplayMode, ViewState};

/// Fetches (or loads) a batch, replays clicks and the query, and prints the table.
pub fn run(args: &DumpArgs, request: &FetchRequest) -> Result<(), FetchError> {
    let batch = match &args.file {
        Some(path) => {
            eprintln!("Reading payload from {}", path.display());
            load_batch_from_file(path)?
        }
        None => {
            eprintln!("Fetching {} location(s) from {}", request.batch_size, request.endpoint);
            fetch_batch_blocking(request)?
        }
    };

    let view = build_view(&ViewState::from_batch(&batch), args);
    let mode = if args.matches_only {
        DisplayMode::MatchesOnly
    } else {
        DisplayMode::Highlight
    };
    print!("{}", render_text_table(&view.snapshot(mode)));
    Ok(())
}

/// Applies the header clicks in order, then the query.
pub fn build_view(initial: &ViewState, args: &DumpArgs) -> ViewState {
    let sorted = args
        .clicks
        .iter()
        .fold(initial.clone(), |view, &key| view.with_header_clicked(key));
    sorted.with_query(args.query.as_str())
}

/// Plain-text rendering of a snapshot. Highlighted rows start with `*`.
pub fn render_text_table(snapshot: &TableSnapshot<'_>) -> String {
    if snapshot.rows.is_empty() {
        return "No location fetched\n".to_string();
    }

    let headers: Vec<String> = snapshot
        .sort_states
        .iter()
        .map(|(key, state)| {
            format!("{} {}", key.wire_name(), state.indicator())
                .trim_end()
                .to_string()
        })
        .collect();
    let cells: Vec<Vec<String>> = snapshot
        .rows
        .iter()
        .map(|row| ColumnKey::ALL.iter().map(|&key| row.display_value(key)).collect())
        .collect();

    let widths: Vec<usize> = (0..ColumnKey::COUNT)
        .map(|c| {
            cells
                .iter()
                .map(|r| r[c].chars().count())
                .chain(std::iter::once(headers[c].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    if !snapshot.query.is_empty() {
        let _ = writeln!(out, "Searching for: {}", snapshot.query);
        if snapshot.outcome == FilterOutcome::NoMatches {
            let _ = writeln!(out, "(no matches, showing all rows)");
        }
    }
    let _ = writeln!(out, "  {}", join_padded(&headers, &widths));
    let _ = writeln!(out, "  {}", widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    for (row, row_cells) in snapshot.rows.iter().zip(&cells) {
        let marker = if snapshot.is_highlighted(row.id) { '*' } else { ' ' };
        let _ = writeln!(out, "{} {}", marker, join_padded(row_cells, &widths));
    }
    out
}

fn join_padded(values: &[String], widths: &[usize]) -> String {
    values
        .iter()
        .zip(widths)
        .map(|(value, width)| {
            let pad = width.saturating_sub(value.chars().count());
            format!("{}{}", value, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
