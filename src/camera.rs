use bevy::{prelude::*, render::camera::ScalingMode};
use bevy_pancam::{PanCam, PanCamPlugin};

use crate::{prelude::BG_COLOR, state::GameState};

/// Key that snaps the view back onto the whole canvas.
pub const RESET_VIEW_KEY: KeyCode = KeyCode::Home;

/// A 2D camera over the canvas: scroll zooms in, `Home` resets.
pub struct CamPlugin;

impl Plugin for CamPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanCamPlugin)
            .insert_resource(ClearColor(BG_COLOR))
            .add_systems(OnEnter(GameState::Load), spawn_cam)
            .add_systems(Update, reset_view);
    }
}

fn canvas_projection() -> OrthographicProjection {
    // one world unit per logical pixel, so the canvas sprite fills the window exactly
    OrthographicProjection {
        scaling_mode: ScalingMode::WindowSize,
        scale: 1.0,
        near: -1000.0,
        far: 1000.0,
        ..OrthographicProjection::default_2d()
    }
}

fn spawn_cam(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        PanCam {
            grab_buttons: vec![],
            ..default()
        },
        canvas_projection(),
        Msaa::Off,
    ));
}

fn reset_view(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut cameras: Query<(&mut Transform, &mut OrthographicProjection), With<Camera2d>>,
) {
    if !keyboard_input.just_pressed(RESET_VIEW_KEY) {
        return;
    }
    for (mut transform, mut projection) in cameras.iter_mut() {
        transform.translation.x = 0.0;
        transform.translation.y = 0.0;
        projection.scale = 1.0;
    }
}
