//! Tile extraction and emptiness classification.
//!
//! A tile is empty when its content bounding box is undefined. The default
//! [`BoundingBoxClassifier`] uses "non-zero content" semantics:
//!
//! - images with an alpha channel: a pixel is content iff its alpha is
//!   non-zero, whatever its color;
//! - images without alpha: a pixel is content iff any color channel is
//!   non-zero, so pure black is background and any other solid color is not.
//!
//! Pixels are sampled as 8-bit RGBA, so 16-bit or float samples that round
//! to zero count as background.

mod rect;

pub use rect::TileRect;

use image::{DynamicImage, GenericImageView, Rgba};

use crate::grid::CellOrigin;

/// Decides whether a cropped tile has visible content.
pub trait ContentClassifier {
    /// Bounding box of the tile's content in tile-local coordinates, or
    /// `None` if there is nothing to bound.
    fn content_bounds(&self, tile: &DynamicImage) -> Option<TileRect>;

    /// Returns true if the tile has no content.
    fn is_empty(&self, tile: &DynamicImage) -> bool {
        self.content_bounds(tile).is_none()
    }
}

/// Classifier backed by [`bounding_box`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundingBoxClassifier;

impl ContentClassifier for BoundingBoxClassifier {
    fn content_bounds(&self, tile: &DynamicImage) -> Option<TileRect> {
        bounding_box(tile)
    }
}

/// Compute the bounding box of non-zero content in an image.
pub fn bounding_box(image: &DynamicImage) -> Option<TileRect> {
    let has_alpha = image.color().has_alpha();
    let mut bounds: Option<TileRect> = None;

    for (x, y, Rgba(px)) in image.pixels() {
        let visible = if has_alpha {
            px[3] != 0
        } else {
            px[..3].iter().any(|&c| c != 0)
        };
        if !visible {
            continue;
        }
        match bounds.as_mut() {
            Some(rect) => rect.include(x, y),
            None => bounds = Some(TileRect::new(x, y, x + 1, y + 1)),
        }
    }

    bounds
}

/// A cropped cell together with its classification.
#[derive(Clone, Debug)]
pub struct ExtractedTile {
    pub origin: CellOrigin,
    pub rect: TileRect,
    pub content: DynamicImage,
    pub is_empty: bool,
}

/// Crop the cell at `origin` and classify it.
///
/// The cell is clipped to the image bounds. With origins from
/// [`GridPlan::origins`](crate::grid::GridPlan::origins) the clip never
/// changes the rectangle.
pub fn extract<C>(
    image: &DynamicImage,
    origin: CellOrigin,
    cell_width: u32,
    cell_height: u32,
    classifier: &C,
) -> ExtractedTile
where
    C: ContentClassifier + ?Sized,
{
    let (image_width, image_height) = image.dimensions();
    let rect = TileRect::clipped(
        origin.x,
        origin.y,
        cell_width,
        cell_height,
        image_width,
        image_height,
    );
    let content = image.crop_imm(rect.left, rect.top, rect.width(), rect.height());
    let is_empty = rect.is_degenerate() || classifier.is_empty(&content);

    ExtractedTile {
        origin,
        rect,
        content,
        is_empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage, RgbaImage};

    fn origin(x: u32, y: u32) -> CellOrigin {
        CellOrigin {
            x,
            y,
            row: 0,
            col: 0,
        }
    }

    #[test]
    fn transparent_rgba_is_empty() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 0])));
        assert_eq!(bounding_box(&img), None);
    }

    #[test]
    fn single_opaque_pixel_bounds() {
        let mut buf = RgbaImage::new(8, 8);
        buf.put_pixel(5, 2, Rgba([0, 0, 0, 1]));
        let img = DynamicImage::ImageRgba8(buf);
        assert_eq!(bounding_box(&img), Some(TileRect::new(5, 2, 6, 3)));
    }

    #[test]
    fn black_rgb_is_empty_but_white_is_not() {
        let black = DynamicImage::ImageRgb8(RgbImage::new(4, 4));
        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([255, 255, 255])));
        assert!(BoundingBoxClassifier.is_empty(&black));
        assert_eq!(
            BoundingBoxClassifier.content_bounds(&white),
            Some(TileRect::new(0, 0, 4, 4))
        );
    }

    #[test]
    fn grayscale_uses_luma() {
        let mut buf = image::GrayImage::new(4, 4);
        buf.put_pixel(1, 3, Luma([7]));
        let img = DynamicImage::ImageLuma8(buf);
        assert_eq!(bounding_box(&img), Some(TileRect::new(1, 3, 2, 4)));
    }

    #[test]
    fn extract_crops_and_classifies() {
        let mut buf = RgbaImage::new(32, 16);
        for y in 0..16 {
            for x in 16..32 {
                buf.put_pixel(x, y, Rgba([10, 20, 30, 255]));
            }
        }
        let img = DynamicImage::ImageRgba8(buf);

        let left = extract(&img, origin(0, 0), 16, 16, &BoundingBoxClassifier);
        assert!(left.is_empty);
        assert_eq!(left.rect, TileRect::new(0, 0, 16, 16));

        let right = extract(&img, origin(16, 0), 16, 16, &BoundingBoxClassifier);
        assert!(!right.is_empty);
        assert_eq!(right.content.dimensions(), (16, 16));
    }

    #[test]
    fn extract_clips_cells_past_the_edge() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(20, 20, Rgba([1, 1, 1, 255])));
        let tile = extract(&img, origin(16, 16), 16, 16, &BoundingBoxClassifier);
        assert_eq!(tile.rect, TileRect::new(16, 16, 20, 20));
        assert_eq!(tile.content.dimensions(), (4, 4));
    }

    #[test]
    fn custom_classifier_is_honored() {
        struct Never;
        impl ContentClassifier for Never {
            fn content_bounds(&self, _tile: &DynamicImage) -> Option<TileRect> {
                None
            }
        }

        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255])));
        let tile = extract(&img, origin(0, 0), 4, 4, &Never);
        assert!(tile.is_empty);
    }
}
