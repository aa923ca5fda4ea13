use bevy::math::{uvec2, UVec2};

/// The initial alive/dead state of every interior cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    width: u32,
    height: u32,
    /// row-major, `width * height` entries
    alive: Vec<bool>,
}

impl Seed {
    pub fn dead(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alive: vec![false; (width * height) as usize],
        }
    }

    /// Uniform 0/1 per cell.
    pub fn random(width: u32, height: u32, rng: &mut fastrand::Rng) -> Self {
        let alive = (0..width * height).map(|_| rng.bool()).collect();
        Self {
            width,
            height,
            alive,
        }
    }

    /// Builds a seed from hand-typed `0`/`1` rows.
    ///
    /// Each row goes through [`parse_manual_row`]; rows past `height` are ignored and
    /// missing rows stay dead.
    pub fn from_manual_rows<S: AsRef<str>>(width: u32, height: u32, rows: &[S]) -> Self {
        let mut seed = Self::dead(width, height);
        for (y, row) in rows.iter().take(height as usize).enumerate() {
            for (x, alive) in parse_manual_row(row.as_ref(), width).into_iter().enumerate() {
                seed.set(uvec2(x as u32, y as u32), alive);
            }
        }
        seed
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `false` outside the seed.
    #[inline]
    pub fn is_alive(&self, coord: UVec2) -> bool {
        coord.x < self.width && coord.y < self.height && self.alive[self.idx(coord)]
    }

    #[inline]
    pub fn set(&mut self, coord: UVec2, alive: bool) {
        let idx = self.idx(coord);
        self.alive[idx] = alive;
    }

    pub fn population(&self) -> usize {
        self.alive.iter().filter(|alive| **alive).count()
    }

    #[inline]
    fn idx(&self, coord: UVec2) -> usize {
        (coord.y * self.width + coord.x) as usize
    }
}

/// Parses one manually entered row into exactly `width` cells.
///
/// Anything other than a string of `0` and `1` degrades to an all-dead row. Short rows are
/// centred by padding left, then right, alternately; long rows are cut at `width`.
pub fn parse_manual_row(text: &str, width: u32) -> Vec<bool> {
    let width = width as usize;
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c == '0' || c == '1') {
        return vec![false; width];
    }

    let cells: Vec<bool> = text.chars().map(|c| c == '1').collect();
    let padding = width.saturating_sub(cells.len());
    // the left side gets the odd cell out
    let left = padding - padding / 2;

    let mut row = vec![false; left];
    row.extend(cells);
    row.resize(width, false);
    row
}
