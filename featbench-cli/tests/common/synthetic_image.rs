use image::{GrayImage, Luma};
use std::path::Path;

/// High-contrast checkerboard with `cell`-pixel squares
pub fn checkerboard(width: u32, height: u32, cell: u32) -> GrayImage {
    assert!(cell > 0, "cell size must be positive");
    GrayImage::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Luma([32u8])
        } else {
            Luma([220u8])
        }
    })
}

pub fn uniform(width: u32, height: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(width, height, Luma([value]))
}

/// Save `image` as PNG regardless of the extension of `path`
pub fn write_png(image: &GrayImage, path: &Path) {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap_or_else(|e| panic!("write {}: {}", path.display(), e));
}
