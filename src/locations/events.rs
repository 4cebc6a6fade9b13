// src/locations/events.rs
use bevy::prelude::Event;

use super::definitions::ColumnKey;
use super::fetch::FetchOutcome;
use super::view_state::DisplayMode;

/// Event sent at startup and when the user clicks "Reload".
/// Handled by `systems::handle_fetch_request`.
#[derive(Event, Debug, Clone)]
pub struct RequestFetchLocations;

/// Event carrying the outcome of a background fetch back to the main thread.
#[derive(Event, Debug, Clone)]
pub struct LocationsFetched {
    /// Generation handed out when the fetch was started. Outdated results are dropped.
    pub generation: u64,
    pub outcome: FetchOutcome,
}

/// User input on the table. Both kinds share one event so they are applied
/// in the order they were dispatched.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum TableInput {
    HeaderClicked(ColumnKey),
    QueryChanged(String),
}

/// Event sent when the user switches between highlighting and showing matches only.
#[derive(Event, Debug, Clone, Copy)]
pub struct RequestSetDisplayMode(pub DisplayMode);

/// Status message for the feedback line.
#[derive(Event, Debug, Clone)]
pub struct LocationsFeedback {
    pub message: String,
    pub is_error: bool,
}
