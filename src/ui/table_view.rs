// src/ui/table_view.rs
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use egui_extras::{Column, TableBody, TableBuilder};

use super::UiFeedbackState;
use crate::locations::events::{RequestFetchLocations, RequestSetDisplayMode, TableInput};
use crate::locations::resources::LoadState;
use crate::locations::view_state::{FilterOutcome, TableSnapshot};
use crate::locations::{ColumnKey, DisplayMode, LocationsTable};

const NO_DATA_TEXT: &str = "No location fetched";

/// Draws the whole viewer: search bar, controls, feedback line and the table.
pub fn location_table_ui(
    mut contexts: EguiContexts,
    table: Res<LocationsTable>,
    ui_feedback: Res<UiFeedbackState>,
    mut input_writer: EventWriter<TableInput>,
    mut fetch_writer: EventWriter<RequestFetchLocations>,
    mut mode_writer: EventWriter<RequestSetDisplayMode>,
) {
    let ctx = contexts.ctx_mut();

    egui::TopBottomPanel::top("location_filter_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let mut query = table.view().map(|v| v.query().to_string()).unwrap_or_default();
            let search = ui.add_enabled(
                table.view().is_some(),
                egui::TextEdit::singleline(&mut query).hint_text("Search"),
            );
            if search.changed() {
                input_writer.write(TableInput::QueryChanged(query.clone()));
            }
            ui.label(format!("Searching for: {}", query));

            ui.separator();
            let current_mode = table.display_mode;
            for mode in [DisplayMode::Highlight, DisplayMode::MatchesOnly] {
                if ui.selectable_label(current_mode == mode, mode.label()).clicked() {
                    mode_writer.write(RequestSetDisplayMode(mode));
                }
            }

            ui.separator();
            if ui
                .add_enabled(!table.is_loading(), egui::Button::new("⟳ Reload"))
                .on_hover_text("Fetch a new batch; sort and search are reset")
                .clicked()
            {
                fetch_writer.write(RequestFetchLocations);
            }
        });

        if !ui_feedback.last_message.is_empty() {
            let color = if ui_feedback.is_error {
                egui::Color32::LIGHT_RED
            } else {
                ui.visuals().weak_text_color()
            };
            ui.colored_label(color, &ui_feedback.last_message);
        }
    });

    egui::CentralPanel::default().show(ctx, |ui| match &table.load {
        LoadState::Idle | LoadState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading locations...");
            });
        }
        LoadState::Failed(err) => {
            ui.label(NO_DATA_TEXT);
            ui.weak(err.to_string());
        }
        LoadState::Ready { view, .. } if view.is_empty() => {
            ui.label(NO_DATA_TEXT);
        }
        LoadState::Ready { view, fetched_at } => {
            let snapshot = view.snapshot(table.display_mode);
            ui.horizontal(|ui| {
                ui.weak(format!(
                    "Showing {} of {} row(s), fetched {}",
                    snapshot.rows.len(),
                    view.working_rows().len(),
                    fetched_at.format("%H:%M:%S")
                ));
                match snapshot.outcome {
                    FilterOutcome::Inactive => {}
                    FilterOutcome::Matched(n) => {
                        ui.label(format!("{} matching row(s)", n));
                    }
                    FilterOutcome::NoMatches => {
                        ui.weak(format!("No matches for \"{}\"; showing all rows", snapshot.query));
                    }
                }
            });
            if let Some(key) = render_table(ui, &snapshot) {
                input_writer.write(TableInput::HeaderClicked(key));
            }
        }
    });
}

/// Renders the snapshot. Returns the header clicked this frame, if any.
fn render_table(ui: &mut egui::Ui, snapshot: &TableSnapshot<'_>) -> Option<ColumnKey> {
    let row_height = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
    let mut clicked = None;

    egui::ScrollArea::horizontal()
        .id_salt("location_table_scroll_area")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            let mut builder = TableBuilder::new(ui)
                .striped(true)
                .sense(egui::Sense::hover())
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .min_scrolled_height(0.0);
            for _ in ColumnKey::ALL {
                builder = builder.column(Column::auto().at_least(80.0).resizable(true));
            }

            builder
                .header(row_height, |mut header| {
                    for key in ColumnKey::ALL {
                        header.col(|ui| {
                            let state = snapshot.sort_states.get(key);
                            let text = format!("{} {}", key.label(), state.indicator());
                            let button = egui::Button::new(egui::RichText::new(text.trim_end()).strong())
                                .frame(false);
                            if ui.add(button).on_hover_text("Click to cycle sort").clicked() {
                                clicked = Some(key);
                            }
                        });
                    }
                })
                .body(|body: TableBody| {
                    body.rows(row_height, snapshot.rows.len(), |mut row| {
                        let Some(flat) = snapshot.rows.get(row.index()) else {
                            return;
                        };
                        row.set_selected(snapshot.is_highlighted(flat.id));
                        for key in ColumnKey::ALL {
                            row.col(|ui| {
                                ui.label(flat.display_value(key));
                            });
                        }
                    });
                });
        });

    clicked
}
