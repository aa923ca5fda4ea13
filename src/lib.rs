pub mod camera;
pub mod canvas;
pub mod cell;
pub mod cli;
pub mod config;
pub mod grid;
pub mod life;
pub mod pattern;
pub mod prompt;
pub mod seed;
pub mod sim;
pub mod state;

pub mod prelude {
    use bevy::color::Color;

    pub const BG_COLOR: Color = Color::srgb(0.0, 0.0, 0.0);
    pub const CELL_ALIVE_RGB: [u8; 3] = [255, 255, 255];
    pub const CELL_DEAD_RGB: [u8; 3] = [0, 0, 0];

    /// ticks a dead cell keeps flashing before it settles to black
    pub const FADE_TICKS: u32 = 10;
    /// animation clock step per tick (radians)
    pub const TIME_STEP: f32 = 0.1;

    pub const DEFAULT_CELL_SIZE_PX: u32 = 8;
    pub const DEFAULT_GRID_WIDTH: u32 = 100;
    pub const DEFAULT_GRID_HEIGHT: u32 = 100;
    /// dead cells padded around a loaded pattern on every side
    pub const PATTERN_MARGIN: u32 = 20;
    /// largest texture edge we are willing to allocate for the canvas
    pub const MAX_CANVAS_PX: u32 = 16384;
}
