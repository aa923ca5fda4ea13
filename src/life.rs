use bevy::{
    input::common_conditions::input_just_pressed,
    prelude::*,
    render::{
        render_asset::RenderAssetUsages,
        render_resource::{Extent3d, TextureDimension, TextureFormat},
    },
    window::{PrimaryWindow, WindowCloseRequested},
};

use crate::{
    canvas::FrameBuffer,
    config::{SeedSource, SimConfig},
    sim::{HostEvent, LoopState, Simulation},
    state::GameState,
};

/// Key that pauses and resumes the simulation.
pub const PAUSE_KEY: KeyCode = KeyCode::Space;

/// Runs the simulation once per frame and shows it on a single canvas sprite.
///
/// `Space` pauses; while paused the left mouse button paints live cells and the right one
/// kills them. Expects a [`SimConfig`] resource.
pub struct LifePlugin;

impl Plugin for LifePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PaintCell>()
            .add_systems(OnEnter(GameState::Load), load_simulation)
            .add_systems(
                Update,
                (
                    toggle_pause.run_if(
                        input_just_pressed(PAUSE_KEY)
                            .and(in_state(GameState::Running).or(in_state(GameState::Paused))),
                    ),
                    (pick_cells, apply_paint)
                        .chain()
                        .run_if(in_state(GameState::Paused)),
                    run_tick.run_if(in_state(GameState::Running).or(in_state(GameState::Paused))),
                )
                    .chain(),
            )
            .add_systems(OnEnter(GameState::Stopped), exit_app);
    }
}

// ——> EVENTS

/// Force one cell alive or dead; `cell` is in bordered grid coordinates.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintCell {
    pub cell: UVec2,
    pub alive: bool,
}

// ——> SYSTEMS

/// seed the grid and spawn the canvas it is drawn on
fn load_simulation(
    mut commands: Commands,
    config: Res<SimConfig>,
    mut images: ResMut<Assets<Image>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if let SeedSource::File { description, .. } = &config.seed_source {
        for line in description.iter().filter(|line| !line.is_empty()) {
            info!("{line}");
        }
    }
    let seed = config.build_seed();
    info!(
        "seeded {}x{} grid from {}: {} cells alive",
        seed.width(),
        seed.height(),
        config.describe_source(),
        seed.population()
    );

    let (width, height) = config.canvas_size();
    let frame = FrameBuffer::new(width, height);
    let image = Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        frame.pixels().to_vec(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    let image = images.add(image);
    info!("canvas is {width}x{height} px");

    commands.spawn((CanvasSprite, Sprite::from_image(image.clone())));
    commands.insert_resource(Canvas { image, frame });
    commands.insert_resource(Simulation::new(&seed, config.cell_pixel_size));
    next_state.set(GameState::Running);
}

fn toggle_pause(state: Res<State<GameState>>, mut next_state: ResMut<NextState<GameState>>) {
    match state.get() {
        GameState::Running => next_state.set(GameState::Paused),
        GameState::Paused => next_state.set(GameState::Running),
        _ => (),
    }
}

/// turn mouse buttons held over the canvas into paint events
fn pick_cells(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    sprites: Query<&GlobalTransform, With<CanvasSprite>>,
    config: Res<SimConfig>,
    simulation: Res<Simulation>,
    mut paint: EventWriter<PaintCell>,
) {
    let alive = if buttons.pressed(MouseButton::Left) {
        true
    } else if buttons.pressed(MouseButton::Right) {
        false
    } else {
        return;
    };
    let (Ok(window), Ok((camera, camera_transform)), Ok(sprite)) =
        (windows.get_single(), cameras.get_single(), sprites.get_single())
    else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok(world) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };

    let (width, height) = config.canvas_size();
    let pixel = canvas_pixel(
        world,
        sprite.translation().truncate(),
        Vec2::new(width as f32, height as f32),
    );
    if let Some(cell) = simulation.grid().cell_at_pixel(pixel) {
        paint.send(PaintCell { cell, alive });
    }
}

fn apply_paint(mut paint: EventReader<PaintCell>, mut simulation: ResMut<Simulation>) {
    for event in paint.read() {
        simulation.paint(event.cell, event.alive);
    }
}

/// World position to canvas pixel, `(0, 0)` at the top-left of a sprite centred on `center`.
fn canvas_pixel(world: Vec2, center: Vec2, canvas_size: Vec2) -> Vec2 {
    let offset = world - center;
    Vec2::new(offset.x + canvas_size.x / 2.0, canvas_size.y / 2.0 - offset.y)
}

fn run_tick(
    state: Res<State<GameState>>,
    mut close_requests: EventReader<WindowCloseRequested>,
    mut simulation: ResMut<Simulation>,
    mut canvas: ResMut<Canvas>,
    mut images: ResMut<Assets<Image>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    simulation.set_paused(*state.get() == GameState::Paused);
    let events = close_requests.read().map(|_| HostEvent::Quit);
    let canvas = &mut *canvas;
    let loop_state = simulation.tick(events, &mut canvas.frame);

    if canvas.frame.take_presented() {
        // `get_mut` flags the asset as changed, which re-uploads the texture
        if let Some(image) = images.get_mut(&canvas.image) {
            image.data.copy_from_slice(canvas.frame.pixels());
        }
    }

    if loop_state == LoopState::Stopped {
        next_state.set(GameState::Stopped);
    }
}

fn exit_app(mut exit: EventWriter<AppExit>) {
    info!("window closed, exiting");
    exit.send(AppExit::Success);
}

// ——> COMPONENTS

/// the sprite showing the canvas texture, used to place the cursor on it
#[derive(Component)]
struct CanvasSprite;

// ——> RESOURCES

/// the frame buffer and the texture it is uploaded to
#[derive(Resource)]
struct Canvas {
    image: Handle<Image>,
    frame: FrameBuffer,
}
