use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use bevy::prelude::Resource;

use crate::{pattern::Pattern, prelude::*, seed::Seed};

/// Where the interior cells get their initial state from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// uniform random fill, reproducible when `seed` is set
    Random { seed: Option<u64> },
    /// hand-typed `0`/`1` rows
    Manual(Vec<String>),
    /// a plaintext pattern file, already parsed and padded
    File {
        path: PathBuf,
        /// text of the file's `!` comment lines
        description: Vec<String>,
        seed: Seed,
    },
}

/// Everything the simulation needs, fixed before the window opens.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub cell_pixel_size: u32,
    /// interior cells per row
    pub interior_width: u32,
    /// interior rows
    pub interior_height: u32,
    pub seed_source: SeedSource,
}

impl SimConfig {
    pub fn new(
        cell_pixel_size: u32,
        interior_width: u32,
        interior_height: u32,
        seed_source: SeedSource,
    ) -> Result<Self> {
        let config = Self {
            cell_pixel_size,
            interior_width,
            interior_height,
            seed_source,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` and sizes the grid to fit it plus `margin` on every side.
    pub fn from_pattern_file(path: PathBuf, cell_pixel_size: u32, margin: u32) -> Result<Self> {
        let pattern = Pattern::load(&path)?;
        let (width, height) = pattern.padded_size(margin).with_context(|| {
            format!(
                "a margin of {margin} cells around {} does not fit in a grid",
                path.display()
            )
        })?;
        // validated before the padded seed is allocated
        let mut config = Self::new(
            cell_pixel_size,
            width,
            height,
            SeedSource::Random { seed: None },
        )?;
        config.seed_source = SeedSource::File {
            seed: pattern.to_seed(margin)?,
            description: pattern.description,
            path,
        };
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.cell_pixel_size > 0, "cell size must be at least 1 pixel");
        ensure!(
            self.interior_width > 0 && self.interior_height > 0,
            "grid must be at least 1x1 cells, got {}x{}",
            self.interior_width,
            self.interior_height
        );
        let (width_px, height_px) = (
            self.interior_width.checked_mul(self.cell_pixel_size),
            self.interior_height.checked_mul(self.cell_pixel_size),
        );
        ensure!(
            matches!((width_px, height_px), (Some(w), Some(h)) if w <= MAX_CANVAS_PX && h <= MAX_CANVAS_PX),
            "canvas of {}x{} cells at {} px per cell exceeds {MAX_CANVAS_PX} px",
            self.interior_width,
            self.interior_height,
            self.cell_pixel_size
        );
        Ok(())
    }

    /// Window size in pixels; the border ring is never visible.
    #[inline]
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.interior_width * self.cell_pixel_size,
            self.interior_height * self.cell_pixel_size,
        )
    }

    /// Produces the interior state, rolling the dice for random fills.
    pub fn build_seed(&self) -> Seed {
        match &self.seed_source {
            SeedSource::Random { seed } => {
                let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
                Seed::random(self.interior_width, self.interior_height, &mut rng)
            }
            SeedSource::Manual(rows) => {
                Seed::from_manual_rows(self.interior_width, self.interior_height, rows.as_slice())
            }
            SeedSource::File { seed, .. } => seed.clone(),
        }
    }

    pub fn describe_source(&self) -> String {
        match &self.seed_source {
            SeedSource::Random { seed: Some(seed) } => format!("random (seed {seed})"),
            SeedSource::Random { seed: None } => "random".to_owned(),
            SeedSource::Manual(rows) => format!("{} manual rows", rows.len()),
            SeedSource::File { path, .. } => format!("pattern {}", path.display()),
        }
    }
}

#[cfg(test)]
mod test {
    use std::{env, fs, process};

    use bevy::math::uvec2;

    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        let random = SeedSource::Random { seed: None };
        assert!(SimConfig::new(0, 10, 10, random.clone()).is_err());
        assert!(SimConfig::new(8, 0, 10, random.clone()).is_err());
        assert!(SimConfig::new(8, 10, 0, random.clone()).is_err());
        assert!(SimConfig::new(8, 10, 10, random).is_ok());
    }

    #[test]
    fn rejects_oversized_canvas() {
        let random = SeedSource::Random { seed: None };
        assert!(SimConfig::new(2, MAX_CANVAS_PX, 10, random.clone()).is_err());
        assert!(SimConfig::new(u32::MAX, 2, 2, random.clone()).is_err());
        assert!(SimConfig::new(1, MAX_CANVAS_PX, 10, random).is_ok());
    }

    #[test]
    fn canvas_excludes_border() {
        let config = SimConfig::new(8, 100, 50, SeedSource::Random { seed: Some(1) }).unwrap();
        assert_eq!((800, 400), config.canvas_size());
    }

    #[test]
    fn seeds_match_dimensions() {
        let config = SimConfig::new(4, 12, 7, SeedSource::Random { seed: Some(9) }).unwrap();
        let seed = config.build_seed();
        assert_eq!((12, 7), (seed.width(), seed.height()));
        assert_eq!(seed, config.build_seed());

        let config = SimConfig::new(4, 4, 2, SeedSource::Manual(vec!["11".into()])).unwrap();
        let seed = config.build_seed();
        assert_eq!((4, 2), (seed.width(), seed.height()));
        assert!(seed.is_alive(uvec2(1, 0)));
        assert!(seed.is_alive(uvec2(2, 0)));
        assert_eq!(2, seed.population());
    }

    #[test]
    fn pattern_file_sizes_the_grid() {
        let path = env::temp_dir().join(format!("gol-trail-{}-single.cells", process::id()));
        fs::write(&path, "!Name: dot\n...\n.O.\n...\n").unwrap();
        let config = SimConfig::from_pattern_file(path.clone(), 8, 20).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(43, config.interior_width);
        assert_eq!(43, config.interior_height);
        let seed = config.build_seed();
        assert_eq!(1, seed.population());
        assert!(seed.is_alive(uvec2(21, 21)));
    }

    #[test]
    fn huge_margin_is_a_config_error() {
        let path = env::temp_dir().join(format!("gol-trail-{}-margin.cells", process::id()));
        fs::write(&path, ".O.\n").unwrap();
        let overflow = SimConfig::from_pattern_file(path.clone(), 8, 3_000_000_000);
        let oversized = SimConfig::from_pattern_file(path.clone(), 8, MAX_CANVAS_PX);
        fs::remove_file(&path).unwrap();

        let message = format!("{:#}", overflow.unwrap_err());
        assert!(message.contains("margin of 3000000000"), "{message}");
        let message = format!("{:#}", oversized.unwrap_err());
        assert!(message.contains("exceeds"), "{message}");
    }

    #[test]
    fn bad_pattern_file_is_a_config_error() {
        let path = env::temp_dir().join(format!("gol-trail-{}-bad.cells", process::id()));
        fs::write(&path, ".O.\n.o.\n").unwrap();
        let err = SimConfig::from_pattern_file(path.clone(), 8, 20).unwrap_err();
        fs::remove_file(&path).unwrap();

        let message = format!("{err:#}");
        assert!(message.contains("'o'"), "{message}");
        assert!(message.contains("line 2"), "{message}");
    }
}
