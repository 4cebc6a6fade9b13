// src/ui/mod.rs
use bevy::prelude::*;
use bevy_egui::EguiContextPass;

pub mod systems;
pub mod table_view;

use systems::handle_ui_feedback;
use table_view::location_table_ui;

#[derive(Resource, Default, Debug, Clone)]
pub struct UiFeedbackState {
    pub last_message: String,
    pub is_error: bool,
}

/// Plugin for the location table viewer UI.
pub struct TableUiPlugin;

impl Plugin for TableUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiFeedbackState>()
            .add_systems(Update, handle_ui_feedback)
            .add_systems(EguiContextPass, location_table_ui);

        info!("TableUiPlugin initialized.");
    }
}
