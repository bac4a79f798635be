//! Keypoint visualization.
//!
//! Rich keypoint mode: a circle whose radius is half the keypoint size and,
//! when the detector estimated one, a radial line along the orientation.

use featbench_core::{GrayImage, Keypoint};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{BenchError, BenchResult};

/// Radius used for keypoints that carry no usable size
const MARKER_RADIUS: i32 = 3;

/// Bounds the midpoint-circle loop for absurd sizes
const MAX_RADIUS: i32 = 1 << 14;

/// Fixed palette cycled per keypoint so reruns draw identical images
const PALETTE: [Rgb<u8>; 8] = [
    Rgb([255, 0, 0]),
    Rgb([0, 255, 0]),
    Rgb([0, 0, 255]),
    Rgb([255, 255, 0]),
    Rgb([255, 0, 255]),
    Rgb([0, 255, 255]),
    Rgb([255, 128, 0]),
    Rgb([128, 0, 255]),
];

/// Draw `keypoints` over a colour copy of `image`
pub fn draw_rich_keypoints(image: &GrayImage, keypoints: &[Keypoint]) -> RgbImage {
    let mut canvas = DynamicImage::ImageLuma8(image.clone()).into_rgb8();

    for (i, kp) in keypoints.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let radius = keypoint_radius(kp);
        let center = (kp.x.round() as i32, kp.y.round() as i32);

        draw_hollow_circle_mut(&mut canvas, center, radius, color);

        if kp.has_angle() {
            let (sin, cos) = kp.angle.to_radians().sin_cos();
            let r = radius as f32;
            draw_line_segment_mut(
                &mut canvas,
                (kp.x, kp.y),
                (kp.x + cos * r, kp.y + sin * r),
                color,
            );
        }
    }

    canvas
}

fn keypoint_radius(kp: &Keypoint) -> i32 {
    let radius = (kp.size / 2.0).round();
    if radius.is_finite() && radius >= 1.0 {
        (radius as i32).min(MAX_RADIUS)
    } else {
        MARKER_RADIUS
    }
}

/// Encode `canvas` as JPEG at `path`
pub fn save_jpeg(canvas: &RgbImage, path: &Path, quality: u8) -> BenchResult<()> {
    let file = File::create(path).map_err(|e| BenchError::output(path, e))?;
    let mut out = BufWriter::new(file);
    canvas
        .write_with_encoder(JpegEncoder::new_with_quality(&mut out, quality))
        .map_err(|e| BenchError::Render {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    out.flush().map_err(|e| BenchError::output(path, e))
}
