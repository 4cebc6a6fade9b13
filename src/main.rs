// src/main.rs

use bevy::{
    log::LogPlugin,
    prelude::*,
    window::WindowPlugin,
    winit::{UpdateMode, WinitSettings},
};
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

use bevy_egui::EguiPlugin;
use bevy_tokio_tasks::TokioTasksPlugin;

mod cli;
mod locations;
mod settings;
mod ui;

use cli::{Cli, Commands};
use locations::{resources::FetchConfig, LocationsPlugin};
use settings::io::load_settings_or_default;
use ui::TableUiPlugin;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = load_settings_or_default();
    let request = settings.fetch_request(cli.endpoint.as_deref(), cli.results.map(usize::from));

    if let Some(Commands::Dump(args)) = &cli.command {
        return match cli::dump::run(args, &request) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("No location fetched: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let exit = App::new()
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::Continuous,
            unfocused_mode: UpdateMode::reactive_low_power(Duration::from_secs_f32(1.0 / 5.0)),
        })
        .insert_resource(settings)
        .insert_resource(FetchConfig(request))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Location Table".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "wgpu=error,naga=warn,bevy_tokio_tasks=warn,reqwest=warn,hyper=warn"
                        .to_string(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        })
        .add_plugins(TokioTasksPlugin::default())
        .add_plugins(LocationsPlugin)
        .add_plugins(TableUiPlugin)
        .run();

    if exit.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
