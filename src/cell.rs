use std::f32::consts::PI;

use bevy::math::{ivec2, IVec2, UVec2};

use crate::prelude::*;

/// Phase offsets of the red, green and blue channels of the death flash.
const CHANNEL_PHASES: [f32; 3] = [0.0, 2.0 * PI / 3.0, 4.0 * PI / 3.0];

/// A single automaton cell at a fixed grid position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    alive: bool,
    /// ticks since the cell last died, only used for the fade animation
    age_since_death: u32,
    position: UVec2,
    pixel_size: u32,
}

/// A solid `size × size` block of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellBlock {
    pub rgb: [u8; 3],
    pub size: u32,
}

impl Cell {
    /// Dead cells start fully faded so the seed frame has no trail.
    pub fn new(alive: bool, position: UVec2, pixel_size: u32) -> Self {
        Self {
            alive,
            age_since_death: FADE_TICKS,
            position,
            pixel_size,
        }
    }

    #[inline]
    pub fn mark_alive(&mut self) {
        self.alive = true;
    }

    /// Kills a live cell and starts its fade, or ages an already dead one.
    #[inline]
    pub fn mark_dead(&mut self) {
        if self.alive {
            self.alive = false;
            self.age_since_death = 0;
        } else {
            self.age_since_death = self.age_since_death.saturating_add(1);
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn age_since_death(&self) -> u32 {
        self.age_since_death
    }

    #[inline]
    pub fn position(&self) -> UVec2 {
        self.position
    }

    /// top-left corner on the canvas; the border ring lands at negative or past-the-edge offsets
    #[inline]
    pub fn pixel_origin(&self) -> IVec2 {
        let size = self.pixel_size as i32;
        ivec2(
            size * (self.position.x as i32 - 1),
            size * (self.position.y as i32 - 1),
        )
    }

    pub fn render(&self, animation_time: f32) -> CellBlock {
        let rgb = if self.alive {
            CELL_ALIVE_RGB
        } else if self.age_since_death < FADE_TICKS {
            let strength = (FADE_TICKS - self.age_since_death) as f32 / (2 * FADE_TICKS) as f32;
            CHANNEL_PHASES.map(|phase| (strength * amplitude(animation_time, phase).abs()) as u8)
        } else {
            CELL_DEAD_RGB
        };

        CellBlock {
            rgb,
            size: self.pixel_size,
        }
    }
}

#[inline]
fn amplitude(time: f32, phase: f32) -> f32 {
    255.0 * (time + phase).sin()
}
