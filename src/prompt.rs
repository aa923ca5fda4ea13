//! Interactive setup on the terminal.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::{
    config::{SeedSource, SimConfig},
    prelude::*,
};

const YES: [&str; 3] = ["yes", "y", "yup"];
/// ends manual entry early
const DONE: &str = "go";
/// abandons manual entry for a random fill
const RANDOM: &str = "random";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks everything needed for a random or hand-typed grid.
    ///
    /// `cell_size` skips the cell-size question when already known; `seed` feeds random fills.
    pub fn configure(&mut self, cell_size: Option<u32>, seed: Option<u64>) -> Result<SimConfig> {
        let cell_size = match cell_size {
            Some(size) => size,
            None => self.ask_number(
                "What is the size of each cell? (pixels: default = 8)",
                DEFAULT_CELL_SIZE_PX,
            )?,
        };
        let height = self.ask_number("How many cells tall? (default = 100)", DEFAULT_GRID_HEIGHT)?;
        let width = self.ask_number("How many cells wide? (default = 100)", DEFAULT_GRID_WIDTH)?;

        let manual = self.ask("Would you like to specify a shape? yes/no (default = no)")?;
        let seed_source = if YES.contains(&manual.to_lowercase().as_str()) {
            self.read_shape(width, height)?
                .map_or(SeedSource::Random { seed }, SeedSource::Manual)
        } else {
            SeedSource::Random { seed }
        };

        SimConfig::new(cell_size, width, height, seed_source)
    }

    /// `None` when the user asked for a random fill instead.
    fn read_shape(&mut self, width: u32, height: u32) -> Result<Option<Vec<String>>> {
        writeln!(
            self.output,
            "Enter up to {width} characters for each line, with 0 being a dead cell, 1 being an alive cell.\n\
             Type {DONE} once you are done entering lines, or {RANDOM} for a random grid.\n\
             Note: input will be centred left-to-right, but not top-to-bottom."
        )?;

        let mut rows = Vec::new();
        for line in 1..=height {
            write!(self.output, "Line{line:3}:")?;
            self.output.flush()?;
            let Some(text) = self.read_line()? else {
                break;
            };
            match text.as_str() {
                DONE => break,
                RANDOM => return Ok(None),
                _ => rows.push(text),
            }
        }
        Ok(Some(rows))
    }

    fn ask_number(&mut self, question: &str, default: u32) -> Result<u32> {
        let answer = self.ask(question)?;
        if answer.is_empty() {
            return Ok(default);
        }
        answer
            .parse()
            .with_context(|| format!("expected a whole number, got {answer:?}"))
    }

    /// An empty string on end of input, so every question falls back to its default.
    fn ask(&mut self, question: &str) -> Result<String> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn configure(input: &str) -> Result<SimConfig> {
        Prompter::new(input.as_bytes(), Vec::new()).configure(None, Some(5))
    }

    #[test]
    fn defaults() {
        let config = configure("\n\n\n\n").unwrap();
        assert_eq!(
            SimConfig::new(8, 100, 100, SeedSource::Random { seed: Some(5) }).unwrap(),
            config
        );
        // end of input behaves like pressing enter
        assert_eq!(config, configure("").unwrap());
    }

    #[test]
    fn explicit_answers() {
        let config = configure("4\n30\n40\nno\n").unwrap();
        assert_eq!(4, config.cell_pixel_size);
        assert_eq!(30, config.interior_height);
        assert_eq!(40, config.interior_width);
    }

    #[test]
    fn manual_shape() {
        let config = configure("\n3\n5\nYes\n111\nhello\ngo\nnever read\n").unwrap();
        assert_eq!(
            SeedSource::Manual(vec!["111".into(), "hello".into()]),
            config.seed_source
        );
    }

    #[test]
    fn manual_entry_stops_at_height() {
        let config = configure("\n2\n2\ny\n1\n1\n1\n").unwrap();
        assert_eq!(
            SeedSource::Manual(vec!["1".into(), "1".into()]),
            config.seed_source
        );
    }

    #[test]
    fn random_abandons_manual_entry() {
        let config = configure("\n3\n3\nyup\n010\nrandom\n").unwrap();
        assert_eq!(SeedSource::Random { seed: Some(5) }, config.seed_source);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(configure("eight\n").is_err());
        assert!(configure("\n-3\n").is_err());
        assert!(configure("\n0\n10\n\n").is_err());
    }

    #[test]
    fn known_cell_size_is_not_asked() {
        let mut output = Vec::new();
        let config = Prompter::new("12\n\n\n".as_bytes(), &mut output)
            .configure(Some(3), None)
            .unwrap();
        assert_eq!(3, config.cell_pixel_size);
        assert_eq!(12, config.interior_height);
        let transcript = String::from_utf8(output).unwrap();
        assert!(!transcript.contains("size of each cell"));
    }
}
