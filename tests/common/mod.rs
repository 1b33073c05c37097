#![allow(dead_code)]

use std::fs;
use std::path::Path;

use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Opaque image whose pixels all differ from their neighbours.
pub fn gradient_rgba(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 13 % 256) as u8, (y * 29 % 256) as u8, 200, 255])
    })
}

/// Transparent image with opaque content only in the cells listed, given as
/// `(col, row)` positions on a `cell x cell` grid.
pub fn sparse_rgba(width: u32, height: u32, cell: u32, filled: &[(u32, u32)]) -> RgbaImage {
    let mut img = RgbaImage::new(width, height);
    for &(col, row) in filled {
        for y in row * cell..(row + 1) * cell {
            for x in col * cell..(col + 1) * cell {
                img.put_pixel(x, y, Rgba([40, 90, (x + y) as u8, 255]));
            }
        }
    }
    img
}

pub fn write_png(path: &Path, img: &RgbaImage) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    img.save(path).expect("write png file");
}

pub fn write_rgb_png(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    RgbImage::from_pixel(width, height, Rgb(color))
        .save(path)
        .expect("write png file");
}

/// Sorted file names inside `dir`.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("read export dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
