use crate::Keypoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distribution of keypoint responses for one detector run.
///
/// All four fields are zero when there were no keypoints. Accumulation is
/// single precision in keypoint order and `stdev` is the population standard
/// deviation (divisor `n`), which is what the stats CSV columns promise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResponseStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub stdev: f32,
}

impl ResponseStats {
    pub fn from_keypoints(keypoints: &[Keypoint]) -> Self {
        let responses: Vec<f32> = keypoints.iter().map(|kp| kp.response).collect();
        Self::from_responses(&responses)
    }

    pub fn from_responses(responses: &[f32]) -> Self {
        let Some((&first, rest)) = responses.split_first() else {
            return Self::default();
        };

        let (min, max) = rest.iter().fold((first, first), |(lo, hi), &r| {
            (if r < lo { r } else { lo }, if r > hi { r } else { hi })
        });

        let n = responses.len() as f32;
        let sum = responses.iter().fold(0.0f32, |acc, &r| acc + r);
        // Rounding in the running sum can land a hair outside [min, max]
        let mean = sum / n;
        let mean = if mean < min {
            min
        } else if mean > max {
            max
        } else {
            mean
        };

        let sum_sq = responses.iter().fold(0.0f32, |acc, &r| {
            let diff = r - mean;
            acc + diff * diff
        });
        let stdev = (sum_sq / n).sqrt();

        Self { min, max, mean, stdev }
    }
}
