// src/locations/plugin.rs
use bevy::prelude::*;

use super::events::{
    LocationsFeedback, LocationsFetched, RequestFetchLocations, RequestSetDisplayMode, TableInput,
};
use super::resources::{FetchConfig, LocationsTable, UpstreamClient};
use super::systems;
use crate::settings::AppSettings;
use crate::ui::systems::forward_events;

// Define system sets for ordering
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
enum LocationsSystemSet {
    Fetch,      // Starting fetches and receiving their outcomes
    UserInput,  // Header clicks, query edits, display mode
}

/// Plugin owning the location table: fetching, normalizing, sorting and searching.
pub struct LocationsPlugin;

impl Plugin for LocationsPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                LocationsSystemSet::Fetch,
                LocationsSystemSet::UserInput.after(LocationsSystemSet::Fetch),
            ),
        );

        // --- Resource Initialization ---
        app.init_resource::<FetchConfig>()
            .init_resource::<UpstreamClient>()
            .init_resource::<AppSettings>()
            .init_resource::<LocationsTable>();

        // --- Event Registration ---
        app.add_event::<RequestFetchLocations>()
            .add_event::<LocationsFetched>()
            .add_event::<TableInput>()
            .add_event::<RequestSetDisplayMode>()
            .add_event::<LocationsFeedback>();

        app.add_systems(
            Startup,
            (apply_display_mode_from_settings, systems::request_initial_fetch).chain(),
        );

        app.add_systems(
            Update,
            (
                systems::handle_fetch_request,
                forward_events::<LocationsFetched>,
                systems::handle_fetch_results,
            )
                .chain()
                .in_set(LocationsSystemSet::Fetch),
        );
        app.add_systems(
            Update,
            (
                systems::apply_table_input,
                systems::handle_display_mode_change,
            )
                .chain()
                .in_set(LocationsSystemSet::UserInput),
        );

        info!("LocationsPlugin initialized.");
    }
}

fn apply_display_mode_from_settings(
    settings: Res<AppSettings>,
    mut table: ResMut<LocationsTable>,
) {
    table.display_mode = settings.display_mode;
    debug!("Locations: Initial display mode {:?}.", table.display_mode);
}
