//! Resolved run configuration.
//!
//! A [`Config`] is built once from parsed command-line input and then passed
//! by reference into every core call. It is immutable after construction and
//! guarantees non-zero cell dimensions, so grid planning can never loop on a
//! zero step.

use serde::Serialize;

use crate::error::TilecutError;

/// Cell width and height used when no size flag is given.
pub const DEFAULT_CELL_SIZE: u32 = 16;

/// Options for splitting images into tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Config {
    cell_width: u32,
    cell_height: u32,
    quiet: bool,
    interactive_input: bool,
}

impl Config {
    /// Creates a configuration with the given cell size.
    ///
    /// Returns [`TilecutError::InvalidCellSize`] if either dimension is zero.
    pub fn new(cell_width: u32, cell_height: u32) -> Result<Self, TilecutError> {
        if cell_width == 0 || cell_height == 0 {
            return Err(TilecutError::InvalidCellSize {
                width: cell_width,
                height: cell_height,
            });
        }

        Ok(Self {
            cell_width,
            cell_height,
            quiet: false,
            interactive_input: false,
        })
    }

    /// Suppress per-tile output lines; only summaries are printed.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Prompt for additional arguments before processing.
    pub fn with_interactive_input(mut self, interactive_input: bool) -> Self {
        self.interactive_input = interactive_input;
        self
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn interactive_input(&self) -> bool {
        self.interactive_input
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_SIZE,
            cell_height: DEFAULT_CELL_SIZE,
            quiet: false,
            interactive_input: false,
        }
    }
}
