use bevy::math::{ivec2, uvec2, IVec2, UVec2, Vec2};

use crate::{
    cell::{Cell, CellBlock},
    prelude::*,
    seed::Seed,
};

/// Offsets of the Moore neighbourhood.
const NEIGHBOUR_OFFSETS: [IVec2; 8] = [
    ivec2(-1, -1),
    ivec2(0, -1),
    ivec2(1, -1),
    ivec2(-1, 0),
    ivec2(1, 0),
    ivec2(-1, 1),
    ivec2(0, 1),
    ivec2(1, 1),
];

/// Anything a rendered frame can be drawn onto.
pub trait Surface {
    /// Draws `block` with its top-left corner at `origin`; pixels off the surface are dropped.
    fn blit(&mut self, origin: IVec2, block: &CellBlock);
    /// Shows the frame drawn so far.
    fn present(&mut self);
}

/// The bordered cell grid.
///
/// The interior spans `1..=width` × `1..=height`. Row `0`, row `height + 1`, column `0` and
/// column `width + 1` form a ring of cells that are always dead, so neighbour lookups never
/// leave the array.
#[derive(Debug, Clone)]
pub struct SimGrid {
    /// row-major over the bordered size
    cells: Vec<Cell>,
    /// interior size
    width: u32,
    height: u32,
    pixel_size: u32,
    animation_time: f32,
    /// positions of every alive cell
    living: Vec<UVec2>,
}

impl SimGrid {
    pub fn new(seed: &Seed, pixel_size: u32) -> Self {
        let (width, height) = (seed.width(), seed.height());
        let total = uvec2(width + 2, height + 2);

        let cells: Vec<Cell> = (0..total.y)
            .flat_map(|y| (0..total.x).map(move |x| uvec2(x, y)))
            .map(|coord| {
                let interior = coord.x >= 1 && coord.x <= width && coord.y >= 1 && coord.y <= height;
                let alive = interior && seed.is_alive(coord - UVec2::ONE);
                Cell::new(alive, coord, pixel_size)
            })
            .collect();

        let mut grid = Self {
            cells,
            width,
            height,
            pixel_size,
            animation_time: 0.0,
            living: Vec::new(),
        };
        grid.rebuild_living();
        grid
    }

    /// interior width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// interior height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// width and height including the border ring
    #[inline]
    pub fn total_size(&self) -> UVec2 {
        uvec2(self.width + 2, self.height + 2)
    }

    #[inline]
    pub fn animation_time(&self) -> f32 {
        self.animation_time
    }

    #[inline]
    pub fn living(&self) -> &[UVec2] {
        &self.living
    }

    #[inline]
    pub fn population(&self) -> usize {
        self.living.len()
    }

    /// `coord` is in bordered coordinates.
    #[inline]
    pub fn cell(&self, coord: UVec2) -> &Cell {
        &self.cells[self.cell_coord_to_idx(coord)]
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    #[inline]
    pub fn is_border(&self, coord: UVec2) -> bool {
        coord.x == 0 || coord.y == 0 || coord.x == self.width + 1 || coord.y == self.height + 1
    }

    /// Bordered coordinate of the interior cell under a canvas pixel, `(0, 0)` being the
    /// canvas' top-left corner.
    pub fn cell_at_pixel(&self, pixel: Vec2) -> Option<UVec2> {
        if pixel.x < 0.0 || pixel.y < 0.0 {
            return None;
        }
        let coord = (pixel / self.pixel_size as f32).floor().as_uvec2() + UVec2::ONE;
        (coord.x <= self.width && coord.y <= self.height).then_some(coord)
    }

    /// Forces an interior cell alive or dead and refreshes the living cache.
    ///
    /// Killing a live cell starts its fade like a normal death. Border and out-of-range
    /// coordinates are left alone and return `false`.
    pub fn set_alive(&mut self, coord: UVec2, alive: bool) -> bool {
        if coord.x > self.width + 1 || coord.y > self.height + 1 || self.is_border(coord) {
            return false;
        }
        let idx = self.cell_coord_to_idx(coord);
        let cell = &mut self.cells[idx];
        match (alive, cell.is_alive()) {
            (true, false) => cell.mark_alive(),
            (false, true) => cell.mark_dead(),
            _ => return true,
        }
        self.rebuild_living();
        true
    }

    #[inline]
    fn cell_coord_to_idx(&self, coord: UVec2) -> usize {
        (coord.y * (self.width + 2) + coord.x) as usize
    }

    /// Draws every cell, border included, then presents the frame once.
    pub fn render<S: Surface>(&self, surface: &mut S) {
        for cell in &self.cells {
            surface.blit(cell.pixel_origin(), &cell.render(self.animation_time));
        }
        surface.present();
    }

    #[inline]
    pub fn advance_clock(&mut self) {
        self.animation_time += TIME_STEP;
    }

    /// Counts live neighbours of every cell by scattering from the living cells.
    ///
    /// The result is row-major over the bordered size. Border cells pick up counts too but
    /// nothing ever reads them.
    pub fn neighbour_counts(&self) -> Vec<u8> {
        let mut counts = vec![0u8; self.cells.len()];
        for &coord in &self.living {
            for offset in NEIGHBOUR_OFFSETS {
                // living cells are interior, so every neighbour is inside the bordered array
                let neighbour = (coord.as_ivec2() + offset).as_uvec2();
                counts[self.cell_coord_to_idx(neighbour)] += 1;
            }
        }
        counts
    }

    /// Applies the life rule to every interior cell and rebuilds the living cache.
    pub fn transition(&mut self, counts: &[u8]) {
        debug_assert_eq!(self.cells.len(), counts.len());
        for y in 1..=self.height {
            for x in 1..=self.width {
                let idx = self.cell_coord_to_idx(uvec2(x, y));
                let cell = &mut self.cells[idx];
                match (cell.is_alive(), counts[idx]) {
                    (true, 2 | 3) => (),
                    (false, 3) => cell.mark_alive(),
                    _ => cell.mark_dead(),
                }
            }
        }
        self.rebuild_living();
    }

    /// One generation without drawing anything.
    pub fn step(&mut self) {
        self.advance_clock();
        let counts = self.neighbour_counts();
        self.transition(&counts);
    }

    fn rebuild_living(&mut self) {
        self.living.clear();
        self.living.extend(
            self.cells
                .iter()
                .filter(|cell| cell.is_alive())
                .map(Cell::position),
        );
    }
}
