// src/locations/resources.rs
use bevy::prelude::*;
use chrono::{DateTime, Local};

use super::events::TableInput;
use super::fetch::{FetchError, FetchOutcome, FetchRequest};
use super::view_state::{DisplayMode, ViewState};

/// Endpoint and batch size used by every fetch of this session.
#[derive(Resource, Debug, Clone, Default)]
pub struct FetchConfig(pub FetchRequest);

/// Shared HTTP client for background fetches.
#[derive(Resource, Debug, Clone, Default)]
pub struct UpstreamClient(pub reqwest::Client);

/// Lifecycle of the table contents.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready {
        view: ViewState,
        fetched_at: DateTime<Local>,
    },
    Failed(FetchError),
}

/// What happened to a fetch outcome handed to `LocationsTable::apply_fetch_outcome`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchApplied {
    /// A newer fetch was started after this one; the outcome was dropped.
    Stale,
    Loaded(usize),
    Failed(FetchError),
}

/// Main resource: the current batch and its view state.
#[derive(Resource, Debug, Default)]
pub struct LocationsTable {
    pub load: LoadState,
    pub display_mode: DisplayMode,
    next_generation: u64,
    pending_generation: Option<u64>,
}

impl LocationsTable {
    pub fn view(&self) -> Option<&ViewState> {
        match &self.load {
            LoadState::Ready { view, .. } => Some(view),
            _ => None,
        }
    }

    /// True while a fetch is in flight, including a reload over a loaded batch.
    pub fn is_loading(&self) -> bool {
        self.pending_generation.is_some()
    }

    /// Marks a new fetch as pending and returns its generation.
    /// Any earlier pending fetch becomes stale.
    pub fn begin_fetch(&mut self) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.pending_generation = Some(generation);
        // Keep showing the previous batch while a reload is in flight.
        if !matches!(self.load, LoadState::Ready { .. }) {
            self.load = LoadState::Loading;
        }
        generation
    }

    /// Replaces the table wholesale with a fetched batch, or records the failure.
    pub fn apply_fetch_outcome(
        &mut self,
        generation: u64,
        outcome: FetchOutcome,
        fetched_at: DateTime<Local>,
    ) -> FetchApplied {
        if self.pending_generation != Some(generation) {
            return FetchApplied::Stale;
        }
        self.pending_generation = None;

        match outcome {
            Ok(batch) => {
                let view = ViewState::from_batch(&batch);
                let count = view.default_rows().len();
                self.load = LoadState::Ready { view, fetched_at };
                FetchApplied::Loaded(count)
            }
            Err(err) => {
                self.load = LoadState::Failed(err.clone());
                FetchApplied::Failed(err)
            }
        }
    }

    /// Applies one user input. Returns false if no batch is loaded.
    pub fn apply_input(&mut self, input: &TableInput) -> bool {
        let LoadState::Ready { view, .. } = &mut self.load else {
            return false;
        };
        *view = match input {
            TableInput::HeaderClicked(key) => view.with_header_clicked(*key),
            TableInput::QueryChanged(query) => view.with_query(query.as_str()),
        };
        true
    }
}
