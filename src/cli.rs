use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;

use crate::{config::SimConfig, prelude::*, prompt::Prompter};

/// Conway's Game of Life with a fading trail behind dying cells.
///
/// Without a pattern file the grid is set up through interactive prompts.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Plaintext (.cells) pattern to load instead of prompting.
    #[arg(value_name = "PATTERN")]
    pub pattern: Option<PathBuf>,
    /// Edge length of each cell in pixels.
    #[arg(long, value_name = "PIXELS", value_parser = clap::value_parser!(u32).range(1..))]
    pub cell_size: Option<u32>,
    /// Dead cells padded around a loaded pattern on every side.
    #[arg(
        long,
        value_name = "CELLS",
        default_value_t = PATTERN_MARGIN,
        value_parser = clap::value_parser!(u32).range(..=MAX_CANVAS_PX as i64)
    )]
    pub margin: u32,
    /// Seed for the random fill, for reproducible runs.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

impl CliArgs {
    /// Builds the configuration, prompting on stdin when no pattern was given.
    pub fn into_config(self) -> Result<SimConfig> {
        let stdin = io::stdin();
        self.resolve(stdin.lock(), io::stdout())
    }

    pub fn resolve<R: BufRead, W: Write>(self, input: R, output: W) -> Result<SimConfig> {
        match self.pattern {
            Some(path) => SimConfig::from_pattern_file(
                path,
                self.cell_size.unwrap_or(DEFAULT_CELL_SIZE_PX),
                self.margin,
            ),
            None => Prompter::new(input, output).configure(self.cell_size, self.seed),
        }
    }
}
