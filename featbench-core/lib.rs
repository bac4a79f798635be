pub mod error;
pub mod format;
pub mod stats;

pub use error::{DetectError, DetectResult};
pub use format::{format_general, GeneralFloat};
pub use stats::ResponseStats;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Single-channel 8-bit image every detector runs on
pub type GrayImage = image::GrayImage;

/// Angle value detectors report when they do not estimate orientation
pub const ANGLE_UNSET: f32 = -1.0;

/// Key-point as reported by a detector, passed through to CSV unchanged
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    /// Diameter of the meaningful neighbourhood
    pub size: f32,
    /// Degrees in [0, 360), or `ANGLE_UNSET`
    pub angle: f32,
    pub response: f32,
    /// Pyramid level the keypoint was found on
    pub octave: i32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            x,
            y,
            size,
            angle: ANGLE_UNSET,
            response: 0.0,
            octave: 0,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_response(mut self, response: f32) -> Self {
        self.response = response;
        self
    }

    pub fn with_octave(mut self, octave: i32) -> Self {
        self.octave = octave;
        self
    }

    pub fn has_angle(&self) -> bool {
        self.angle != ANGLE_UNSET
    }
}

/// Row-major descriptor matrix, one row per keypoint.
///
/// Binary descriptors (ORB, BRISK, AKAZE) store one byte per element,
/// SIFT stores native-endian `f32`s, so `row_bytes` is the row stride in bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Descriptors {
    rows: usize,
    row_bytes: usize,
    data: Vec<u8>,
}

impl Descriptors {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `None` when `data` is not exactly `rows * row_bytes` long
    pub fn from_raw(rows: usize, row_bytes: usize, data: Vec<u8>) -> Option<Self> {
        if rows.checked_mul(row_bytes)? != data.len() {
            return None;
        }
        Some(Self { rows, row_bytes, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn row(&self, index: usize) -> Option<&[u8]> {
        if index >= self.rows {
            return None;
        }
        let start = index * self.row_bytes;
        Some(&self.data[start..start + self.row_bytes])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// Output of a single detector run on one image
#[derive(Debug, Clone, Default)]
pub struct Detection {
    pub keypoints: Vec<Keypoint>,
    pub descriptors: Descriptors,
}

impl Detection {
    pub fn keypoints_only(keypoints: Vec<Keypoint>) -> Self {
        Self {
            keypoints,
            descriptors: Descriptors::empty(),
        }
    }

    pub fn stats(&self) -> ResponseStats {
        ResponseStats::from_keypoints(&self.keypoints)
    }
}

/// Uniform interface over every detector the pipeline can run.
///
/// Implementations are built once and reused for every image. `run` takes
/// `&mut self` because native detectors keep scratch state between calls,
/// but it must leave `image` untouched and give independent results per call.
pub trait FeatureDetector {
    /// Display name used in stats rows and output file names
    fn name(&self) -> &str;

    /// Whether `run` fills `Detection::descriptors`
    fn computes_descriptors(&self) -> bool;

    fn run(&mut self, image: &GrayImage) -> DetectResult<Detection>;
}

impl<D: FeatureDetector + ?Sized> FeatureDetector for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn computes_descriptors(&self) -> bool {
        (**self).computes_descriptors()
    }

    fn run(&mut self, image: &GrayImage) -> DetectResult<Detection> {
        (**self).run(image)
    }
}
