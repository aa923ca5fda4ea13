use bevy::{
    log::{debug, info},
    math::UVec2,
    prelude::Resource,
};

use crate::{
    grid::{SimGrid, Surface},
    seed::Seed,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// What the host window reported since the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Quit,
}

/// The main loop: render, advance the clock, count, transition.
#[derive(Resource, Debug)]
pub struct Simulation {
    grid: SimGrid,
    state: LoopState,
    /// keep drawing, stop stepping
    paused: bool,
    generation: u64,
}

impl Simulation {
    pub fn new(seed: &Seed, pixel_size: u32) -> Self {
        Self {
            grid: SimGrid::new(seed, pixel_size),
            state: LoopState::Running,
            paused: false,
            generation: 0,
        }
    }

    #[inline]
    pub fn grid(&self) -> &SimGrid {
        &self.grid
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            info!(
                "{} at generation {}",
                if paused { "paused" } else { "resumed" },
                self.generation
            );
        }
        self.paused = paused;
    }

    /// Sets an interior cell by hand. Returns `false` for border or out-of-range coordinates.
    pub fn paint(&mut self, coord: UVec2, alive: bool) -> bool {
        let painted = self.grid.set_alive(coord, alive);
        if painted {
            debug!("painted {coord} {}", if alive { "alive" } else { "dead" });
        }
        painted
    }

    /// Runs one tick and returns the state afterwards.
    ///
    /// All `events` are drained first; a quit among them stops the loop before anything is
    /// drawn. The frame shows the state from before this tick's transition. A paused
    /// simulation only draws.
    pub fn tick<S: Surface>(
        &mut self,
        events: impl IntoIterator<Item = HostEvent>,
        surface: &mut S,
    ) -> LoopState {
        if self.state == LoopState::Stopped {
            return self.state;
        }

        let quit = events
            .into_iter()
            .fold(false, |quit, event| quit | (event == HostEvent::Quit));
        if quit {
            info!(
                "quit requested after {} generations, {} cells alive",
                self.generation,
                self.grid.population()
            );
            self.state = LoopState::Stopped;
            return self.state;
        }

        self.grid.render(surface);
        if self.paused {
            return self.state;
        }
        self.grid.step();
        self.generation += 1;
        debug!(
            "generation {}: {} cells alive",
            self.generation,
            self.grid.population()
        );

        self.state
    }
}
