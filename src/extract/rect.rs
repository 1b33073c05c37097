//! Integer pixel rectangles in XYXY form.

use std::fmt;

use serde::Serialize;

/// An axis-aligned pixel rectangle `[left, right) x [top, bottom)`.
///
/// Uses the same exclusive right/bottom convention as crop boxes, so
/// `width() == right - left`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TileRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl TileRect {
    /// Creates a rectangle from explicit edges.
    #[inline]
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The cell at `(x, y)` clipped so it never extends past the image.
    pub fn clipped(
        x: u32,
        y: u32,
        cell_width: u32,
        cell_height: u32,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        let right = x.saturating_add(cell_width).min(image_width);
        let bottom = y.saturating_add(cell_height).min(image_height);
        Self {
            left: x,
            top: y,
            right: right.max(x),
            bottom: bottom.max(y),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Returns true if the rectangle covers no pixels.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Grows the rectangle to include pixel `(x, y)`.
    pub(crate) fn include(&mut self, x: u32, y: u32) {
        self.left = self.left.min(x);
        self.top = self.top.min(y);
        self.right = self.right.max(x + 1);
        self.bottom = self.bottom.max(y + 1);
    }
}

impl fmt::Display for TileRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clipped_inside_image_is_full_cell() {
        let rect = TileRect::clipped(16, 0, 16, 16, 64, 64);
        assert_eq!(rect, TileRect::new(16, 0, 32, 16));
        assert_eq!((rect.width(), rect.height()), (16, 16));
    }

    #[test]
    fn clipped_at_edges() {
        let rect = TileRect::clipped(16, 16, 16, 16, 20, 18);
        assert_eq!(rect, TileRect::new(16, 16, 20, 18));
    }

    #[test]
    fn origin_past_image_is_degenerate() {
        let rect = TileRect::clipped(40, 0, 16, 16, 32, 32);
        assert!(rect.is_degenerate());
    }

    #[test]
    fn include_grows_bounds() {
        let mut rect = TileRect::new(3, 3, 4, 4);
        rect.include(1, 5);
        assert_eq!(rect, TileRect::new(1, 3, 4, 6));
    }
}
