use bevy::prelude::*;

#[derive(States, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// canvas and simulation are being created
    #[default]
    Load,
    Running,
    /// drawing continues, generations do not; cells can be painted
    Paused,
    /// the window asked to close; terminal
    Stopped,
}
