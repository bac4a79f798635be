//! OpenCV-backed implementation of `FeatureDetector`.
//!
//! A single adapter type covers all nine detectors. The only behavioural
//! difference between them is whether the native call is `detectAndCompute`
//! or plain `detect`, captured by `Mode`.

use featbench_core::{
    DetectError, DetectResult, Descriptors, Detection, FeatureDetector, GrayImage, Keypoint,
};
use log::debug;
use opencv::core::{no_array, KeyPoint, Mat, Ptr, Vector};
use opencv::features2d::{self, Feature2D, ORB_ScoreType};
use opencv::prelude::*;

use crate::config::{DetectorConfig, NameSource};
use crate::kind::{display_name_from_native, DetectorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Keypoints and descriptors from one native call
    DetectAndCompute,
    /// Keypoints only; descriptors stay empty
    DetectOnly,
}

impl Mode {
    pub fn for_kind(kind: DetectorKind) -> Self {
        if kind.computes_descriptors() {
            Mode::DetectAndCompute
        } else {
            Mode::DetectOnly
        }
    }
}

pub struct OpenCvDetector {
    kind: DetectorKind,
    mode: Mode,
    name: String,
    native: Ptr<Feature2D>,
}

impl OpenCvDetector {
    /// Create the native detector with library defaults (ORB excepted, see
    /// `DetectorConfig::orb_max_features`)
    pub fn new(kind: DetectorKind, config: &DetectorConfig) -> DetectResult<Self> {
        let native =
            create_native(kind, config).map_err(|e| DetectError::construct(kind.display_name(), e))?;

        let name = match config.name_source {
            NameSource::Native => {
                let native_name = native
                    .get_default_name()
                    .map_err(|e| DetectError::construct(kind.display_name(), e))?;
                display_name_from_native(&native_name).to_string()
            }
            NameSource::Table => kind.display_name().to_string(),
        };

        let mode = Mode::for_kind(kind);
        debug!("Created {} detector ({:?})", name, mode);

        Ok(Self {
            kind,
            mode,
            name,
            native,
        })
    }

    pub fn kind(&self) -> DetectorKind {
        self.kind
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl FeatureDetector for OpenCvDetector {
    fn name(&self) -> &str {
        &self.name
    }

    fn computes_descriptors(&self) -> bool {
        self.mode == Mode::DetectAndCompute
    }

    fn run(&mut self, image: &GrayImage) -> DetectResult<Detection> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(DetectError::InvalidImage { width, height });
        }

        let name = &self.name;
        let native_err = |e: opencv::Error| DetectError::native(name.as_str(), e);

        let mat = Mat::new_rows_cols_with_data(height as i32, width as i32, image.as_raw())
            .map_err(native_err)?;

        let mut native_kps = Vector::<KeyPoint>::new();
        let descriptors = match self.mode {
            Mode::DetectAndCompute => {
                let mut desc = Mat::default();
                self.native
                    .detect_and_compute(&*mat, &no_array(), &mut native_kps, &mut desc, false)
                    .map_err(native_err)?;
                descriptors_from_mat(&desc)
                    .map_err(native_err)?
                    .ok_or_else(|| DetectError::native(name.as_str(), "descriptor matrix has unexpected shape"))?
            }
            Mode::DetectOnly => {
                self.native
                    .detect(&*mat, &mut native_kps, &no_array())
                    .map_err(native_err)?;
                Descriptors::empty()
            }
        };

        let keypoints: Vec<Keypoint> = native_kps.iter().map(|kp| convert_keypoint(&kp)).collect();
        debug!(
            "{}: {} keypoints, {} descriptor rows",
            name,
            keypoints.len(),
            descriptors.rows()
        );

        Ok(Detection {
            keypoints,
            descriptors,
        })
    }
}

fn create_native(kind: DetectorKind, config: &DetectorConfig) -> opencv::Result<Ptr<Feature2D>> {
    let native: Ptr<Feature2D> = match kind {
        DetectorKind::Sift => features2d::SIFT::create_def()?.into(),
        DetectorKind::Brisk => features2d::BRISK::create_def()?.into(),
        DetectorKind::Orb => features2d::ORB::create(
            config.orb_max_features,
            1.2,
            8,
            31,
            0,
            2,
            ORB_ScoreType::HARRIS_SCORE,
            31,
            20,
        )?
        .into(),
        DetectorKind::Akaze => features2d::AKAZE::create_def()?.into(),
        DetectorKind::Mser => features2d::MSER::create_def()?.into(),
        DetectorKind::Fast => features2d::FastFeatureDetector::create_def()?.into(),
        DetectorKind::SimpleBlob => features2d::SimpleBlobDetector::create_def()?.into(),
        DetectorKind::Agast => features2d::AgastFeatureDetector::create_def()?.into(),
        DetectorKind::Gftt => features2d::GFTTDetector::create_def()?.into(),
    };
    Ok(native)
}

fn convert_keypoint(kp: &KeyPoint) -> Keypoint {
    let pt = kp.pt();
    Keypoint {
        x: pt.x,
        y: pt.y,
        size: kp.size(),
        angle: kp.angle(),
        response: kp.response(),
        octave: kp.octave(),
    }
}

/// `None` when the matrix is not a plain row-major buffer
fn descriptors_from_mat(mat: &Mat) -> opencv::Result<Option<Descriptors>> {
    if mat.empty() {
        return Ok(Some(Descriptors::empty()));
    }
    let rows = mat.rows() as usize;
    let row_bytes = mat.cols() as usize * mat.elem_size()?;
    let data = mat.data_bytes()?.to_vec();
    Ok(Descriptors::from_raw(rows, row_bytes, data))
}
