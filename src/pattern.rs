//! Plaintext (`.cells`) pattern files.
//!
//! ```text
//! !Name: Glider
//! .O.
//! ..O
//! OOO
//! ```

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use bevy::math::uvec2;

use crate::seed::Seed;

const COMMENT: char = '!';
const DEAD: char = '.';
const ALIVE: char = 'O';

/// A parsed pattern, before any margin is added.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    /// text of the `!` comment lines, marker stripped
    pub description: Vec<String>,
    /// one entry per non-comment line, unpadded
    pub rows: Vec<Vec<bool>>,
}

impl Pattern {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read pattern file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid pattern file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut pattern = Self::default();
        for (line_idx, line) in text.lines().enumerate() {
            if let Some(comment) = line.strip_prefix(COMMENT) {
                pattern.description.push(comment.trim().to_owned());
                continue;
            }

            let row = line
                .trim()
                .chars()
                .enumerate()
                .map(|(col_idx, symbol)| match symbol {
                    DEAD => Ok(false),
                    ALIVE => Ok(true),
                    other => bail!(
                        "unrecognized symbol {other:?} at line {}, column {} (expected '{DEAD}' or '{ALIVE}')",
                        line_idx + 1,
                        col_idx + 1
                    ),
                })
                .collect::<Result<Vec<_>>>()?;
            pattern.rows.push(row);
        }
        Ok(pattern)
    }

    /// widest row
    pub fn width(&self) -> u32 {
        self.rows.iter().map(Vec::len).max().unwrap_or(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Interior size once `margin` dead cells are added on every side, `None` on overflow.
    pub fn padded_size(&self, margin: u32) -> Option<(u32, u32)> {
        let pad = margin.checked_mul(2)?;
        Some((self.width().checked_add(pad)?, self.height().checked_add(pad)?))
    }

    /// Pads the pattern with `margin` dead cells on every side; short rows are filled on the right.
    pub fn to_seed(&self, margin: u32) -> Result<Seed> {
        let (width, height) = self.padded_size(margin).with_context(|| {
            format!(
                "margin of {margin} cells does not fit around a {}x{} pattern",
                self.width(),
                self.height()
            )
        })?;
        let mut seed = Seed::dead(width, height);
        for (y, row) in self.rows.iter().enumerate() {
            for (x, alive) in row.iter().enumerate() {
                if *alive {
                    seed.set(uvec2(margin + x as u32, margin + y as u32), true);
                }
            }
        }
        Ok(seed)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::PATTERN_MARGIN;

    const GLIDER: &str = "!Name: Glider\n!\n.O.\n..O\r\nOOO\n";

    #[test]
    fn parses_comments_and_rows() {
        let pattern = Pattern::parse(GLIDER).unwrap();
        assert_eq!(vec!["Name: Glider".to_owned(), String::new()], pattern.description);
        assert_eq!(3, pattern.width());
        assert_eq!(3, pattern.height());
        assert_eq!(vec![false, true, false], pattern.rows[0]);
        assert_eq!(vec![true, true, true], pattern.rows[2]);
    }

    #[test]
    fn single_cell_lands_at_padded_offset() {
        let pattern = Pattern::parse("...\n.O.\n...").unwrap();
        let seed = pattern.to_seed(20).unwrap();
        assert_eq!(43, seed.width());
        assert_eq!(43, seed.height());
        assert_eq!(1, seed.population());
        assert!(seed.is_alive(uvec2(21, 21)));
    }

    #[test]
    fn ragged_rows_are_right_padded() {
        let pattern = Pattern::parse("O\n\n..O.O").unwrap();
        assert_eq!(5, pattern.width());
        assert_eq!(3, pattern.height());
        assert!(pattern.rows[1].is_empty());

        let seed = pattern.to_seed(1).unwrap();
        assert_eq!(7, seed.width());
        assert_eq!(5, seed.height());
        assert_eq!(3, seed.population());
        assert!(seed.is_alive(uvec2(1, 1)));
        assert!(seed.is_alive(uvec2(3, 3)));
        assert!(seed.is_alive(uvec2(5, 3)));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let pattern = Pattern::parse("  .O.\t\n\tO.O  \r\n").unwrap();
        assert_eq!(3, pattern.width());
        assert_eq!(vec![false, true, false], pattern.rows[0]);
        assert_eq!(vec![true, false, true], pattern.rows[1]);
    }

    #[test]
    fn oversized_margin_is_an_error() {
        let pattern = Pattern::parse(".O.").unwrap();
        assert_eq!(None, pattern.padded_size(3_000_000_000));
        let err = pattern.to_seed(u32::MAX).unwrap_err();
        assert!(err.to_string().contains("margin"), "{err}");
        assert_eq!(Some((5, 3)), pattern.padded_size(1));
    }

    #[test]
    fn unknown_symbol_names_its_position() {
        let err = Pattern::parse("!comment\n.O.\n.X.").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'X'"), "{message}");
        assert!(message.contains("line 3"), "{message}");
        assert!(message.contains("column 2"), "{message}");
    }

    #[test]
    fn bundled_patterns_parse() {
        let gun = Pattern::parse(include_str!("../patterns/gosper_glider_gun.cells")).unwrap();
        assert_eq!((36, 9), (gun.width(), gun.height()));
        assert_eq!(36, gun.to_seed(0).unwrap().population());

        let glider = Pattern::parse(include_str!("../patterns/glider.cells")).unwrap();
        assert_eq!(5, glider.to_seed(PATTERN_MARGIN).unwrap().population());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Pattern::load(Path::new("/definitely/not/here.cells")).unwrap_err();
        assert!(format!("{err:#}").contains("here.cells"));
    }
}
