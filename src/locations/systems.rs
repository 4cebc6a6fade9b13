// src/locations/systems.rs
use bevy::prelude::*;
use bevy_tokio_tasks::TokioTasksRuntime;
use chrono::Local;

use super::events::{
    LocationsFeedback, LocationsFetched, RequestFetchLocations, RequestSetDisplayMode, TableInput,
};
use super::fetch::fetch_batch;
use super::resources::{FetchApplied, FetchConfig, LocationsTable, UpstreamClient};
use crate::settings::{io::save_settings_to_file, AppSettings};
use crate::ui::systems::SendEvent;

/// Startup: load the first batch.
pub(crate) fn request_initial_fetch(mut writer: EventWriter<RequestFetchLocations>) {
    writer.write(RequestFetchLocations);
}

/// Starts a background fetch. Several requests in one frame start a single fetch.
pub(crate) fn handle_fetch_request(
    mut events: EventReader<RequestFetchLocations>,
    mut table: ResMut<LocationsTable>,
    config: Res<FetchConfig>,
    client: Res<UpstreamClient>,
    runtime: Res<TokioTasksRuntime>,
) {
    if events.read().count() == 0 {
        return;
    }

    let generation = table.begin_fetch();
    let request = config.0.clone();
    let client = client.0.clone();
    info!(
        "Locations: Fetching {} location(s) from {} (generation {}).",
        request.batch_size, request.endpoint, generation
    );

    runtime.spawn_background_task(move |mut ctx| async move {
        let outcome = fetch_batch(&client, &request).await;
        ctx.run_on_main_thread(move |world_ctx| {
            world_ctx.world.spawn(SendEvent::<LocationsFetched> {
                event: LocationsFetched { generation, outcome },
            });
        })
        .await;
    });
}

/// Consumes fetch outcomes and rebuilds the table from scratch.
pub(crate) fn handle_fetch_results(
    mut events: EventReader<LocationsFetched>,
    mut table: ResMut<LocationsTable>,
    mut feedback_writer: EventWriter<LocationsFeedback>,
) {
    for event in events.read() {
        let now = Local::now();
        match table.apply_fetch_outcome(event.generation, event.outcome.clone(), now) {
            FetchApplied::Stale => {
                debug!(
                    "Locations: Dropping outcome of superseded fetch (generation {}).",
                    event.generation
                );
            }
            FetchApplied::Loaded(count) => {
                info!("Locations: Loaded {} row(s).", count);
                feedback_writer.write(LocationsFeedback {
                    message: format!("Fetched {} location(s) at {}", count, now.format("%H:%M:%S")),
                    is_error: false,
                });
            }
            FetchApplied::Failed(err) => {
                error!("Locations: Fetch failed: {}", err);
                feedback_writer.write(LocationsFeedback {
                    message: format!("No location fetched: {}", err),
                    is_error: true,
                });
            }
        }
    }
}

/// Applies header clicks and query edits in dispatch order.
pub(crate) fn apply_table_input(
    mut events: EventReader<TableInput>,
    mut table: ResMut<LocationsTable>,
) {
    for input in events.read() {
        if !table.apply_input(input) {
            trace!("Locations: Ignoring {:?}, no batch loaded.", input);
            continue;
        }
        let Some(view) = table.view() else {
            continue;
        };
        match input {
            TableInput::HeaderClicked(key) => match view.sort_states().active() {
                Some((active, direction)) => {
                    debug!("Locations: Sorted by '{}' {:?}.", active, direction)
                }
                None => debug!("Locations: Column '{}' reset to fetch order.", key),
            },
            TableInput::QueryChanged(query) => debug!(
                "Locations: Query {:?} matches {} row(s).",
                query,
                view.highlight_set().len()
            ),
        }
    }
}

/// Switches the display mode and persists it right away.
pub(crate) fn handle_display_mode_change(
    mut events: EventReader<RequestSetDisplayMode>,
    mut table: ResMut<LocationsTable>,
    mut settings: ResMut<AppSettings>,
    mut feedback_writer: EventWriter<LocationsFeedback>,
) {
    let Some(RequestSetDisplayMode(mode)) = events.read().last().copied() else {
        return;
    };
    if table.display_mode == mode {
        return;
    }
    table.display_mode = mode;
    settings.display_mode = mode;
    info!("Locations: Display mode set to {:?}.", mode);

    if let Err(e) = save_settings_to_file(&*settings) {
        feedback_writer.write(LocationsFeedback {
            message: format!("Could not save settings: {}", e),
            is_error: true,
        });
    }
}
