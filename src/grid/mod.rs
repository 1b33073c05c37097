//! Grid planning over image dimensions.
//!
//! The usable area of an image is the top-left sub-rectangle whose width and
//! height are exact multiples of the cell size. Trailing partial rows and
//! columns are discarded entirely: they are never clipped, padded, or
//! visited.
//!
//! # Example
//!
//! ```
//! use tilecut::grid::GridPlan;
//!
//! let plan = GridPlan::new(20, 20, 16, 16).unwrap();
//! assert_eq!((plan.usable_width(), plan.usable_height()), (16, 16));
//! assert_eq!(plan.origins().count(), 1);
//! ```

use serde::Serialize;

use crate::config::Config;
use crate::error::TilecutError;

/// The top-left corner of one grid cell, with its grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CellOrigin {
    pub x: u32,
    pub y: u32,
    pub row: u32,
    pub col: u32,
}

/// A planned grid over one image.
///
/// Pure function of its inputs: iterating [`GridPlan::origins`] twice yields
/// the same sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GridPlan {
    image_width: u32,
    image_height: u32,
    cell_width: u32,
    cell_height: u32,
    columns: u32,
    rows: u32,
}

/// Plan the grid for an image of the given size using the configured cells.
pub fn plan(image_width: u32, image_height: u32, config: &Config) -> GridPlan {
    GridPlan::from_nonzero(
        image_width,
        image_height,
        config.cell_width(),
        config.cell_height(),
    )
}

impl GridPlan {
    /// Plans a grid, rejecting zero cell dimensions.
    pub fn new(
        image_width: u32,
        image_height: u32,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<Self, TilecutError> {
        if cell_width == 0 || cell_height == 0 {
            return Err(TilecutError::InvalidCellSize {
                width: cell_width,
                height: cell_height,
            });
        }
        Ok(Self::from_nonzero(
            image_width,
            image_height,
            cell_width,
            cell_height,
        ))
    }

    fn from_nonzero(image_width: u32, image_height: u32, cell_width: u32, cell_height: u32) -> Self {
        debug_assert!(cell_width > 0 && cell_height > 0);
        Self {
            image_width,
            image_height,
            cell_width,
            cell_height,
            columns: image_width / cell_width,
            rows: image_height / cell_height,
        }
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Number of whole cells per row.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of whole cell rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Width of the visited area, `floor(width / cell_width) * cell_width`.
    pub fn usable_width(&self) -> u32 {
        self.columns * self.cell_width
    }

    /// Height of the visited area, `floor(height / cell_height) * cell_height`.
    pub fn usable_height(&self) -> u32 {
        self.rows * self.cell_height
    }

    /// Total number of cells that will be visited.
    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Returns true if the image is smaller than one cell on either axis.
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }

    /// Iterate over cell origins in row-major order.
    pub fn origins(&self) -> CellOrigins {
        CellOrigins {
            plan: *self,
            next: 0,
        }
    }
}

/// Row-major iterator over the cells of a [`GridPlan`].
#[derive(Clone, Debug)]
pub struct CellOrigins {
    plan: GridPlan,
    next: usize,
}

impl Iterator for CellOrigins {
    type Item = CellOrigin;

    fn next(&mut self) -> Option<CellOrigin> {
        if self.next >= self.plan.cell_count() {
            return None;
        }
        let columns = self.plan.columns as usize;
        let row = (self.next / columns) as u32;
        let col = (self.next % columns) as u32;
        self.next += 1;

        Some(CellOrigin {
            x: col * self.plan.cell_width,
            y: row * self.plan.cell_height,
            row,
            col,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.cell_count() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellOrigins {}
