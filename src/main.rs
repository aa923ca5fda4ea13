use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::{ExitCondition, WindowResolution},
};
use clap::Parser;
use conway_gol_trail::{camera::CamPlugin, cli::CliArgs, life::LifePlugin, state::GameState};

fn main() -> anyhow::Result<()> {
    let config = CliArgs::parse().into_config()?;
    let (width, height) = config.canvas_size();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest())
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Game of Life".into(),
                        resizable: false,
                        focused: true,
                        present_mode: bevy::window::PresentMode::AutoNoVsync,
                        mode: bevy::window::WindowMode::Windowed,
                        resolution: WindowResolution::new(width as f32, height as f32)
                            .with_scale_factor_override(1.0),
                        ..default()
                    }),
                    // closing the window is handled by the simulation loop
                    exit_condition: ExitCondition::DontExit,
                    close_when_requested: false,
                    ..default()
                }),
        )
        .add_plugins((FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin::default()))
        .insert_resource(config)
        .init_state::<GameState>()
        .add_plugins((CamPlugin, LifePlugin))
        .run();

    Ok(())
}
