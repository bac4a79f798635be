//! Run-wide aggregation written to `summary.csv`.

use featbench_core::format::{format_general, DEFAULT_PRECISION};
use featbench_core::{GeneralFloat, ResponseStats};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{BenchError, BenchResult};

pub const SUMMARY_FILE: &str = "summary.csv";
pub const SUMMARY_HEADER: &str = "detector,images,keypoints_mean,r_min,r_max,r_mean,r_stddev";

#[derive(Debug, Clone, Default)]
struct DetectorTotals {
    name: String,
    images: usize,
    keypoints: usize,
    responses: Vec<f32>,
}

/// Pooled results per detector, in the order detectors were registered
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    detectors: Vec<DetectorTotals>,
}

impl RunSummary {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            detectors: names
                .into_iter()
                .map(|name| DetectorTotals {
                    name: name.into(),
                    ..Default::default()
                })
                .collect(),
        }
    }

    /// Add the run of the detector at `index` (registration order).
    /// Indices past the registered detectors are ignored.
    pub fn record(&mut self, index: usize, responses: &[f32]) {
        if let Some(totals) = self.detectors.get_mut(index) {
            totals.images += 1;
            totals.keypoints += responses.len();
            totals.responses.extend_from_slice(responses);
        }
    }

    /// Images with at least one recorded run
    pub fn images(&self) -> usize {
        self.detectors.iter().map(|d| d.images).max().unwrap_or(0)
    }

    pub fn lines(&self) -> Vec<String> {
        self.detectors.iter().map(summary_line).collect()
    }

    /// Write `summary.csv` into `output_dir`
    pub fn write(&self, output_dir: &Path) -> BenchResult<PathBuf> {
        let path = output_dir.join(SUMMARY_FILE);
        let file = File::create(&path).map_err(|e| BenchError::output(&path, e))?;
        let mut out = BufWriter::new(file);

        let mut write_all = || -> std::io::Result<()> {
            writeln!(out, "{}", SUMMARY_HEADER)?;
            for line in self.lines() {
                writeln!(out, "{}", line)?;
            }
            out.flush()
        };
        write_all().map_err(|e| BenchError::output(&path, e))?;
        Ok(path)
    }
}

fn summary_line(totals: &DetectorTotals) -> String {
    if totals.images == 0 {
        return format!("{},0,0,0,0,0,0", totals.name);
    }
    let stats = ResponseStats::from_responses(&totals.responses);
    let keypoints_mean = totals.keypoints as f64 / totals.images as f64;
    format!(
        "{},{},{},{},{},{},{}",
        totals.name,
        totals.images,
        format_general(keypoints_mean, DEFAULT_PRECISION),
        GeneralFloat(stats.min),
        GeneralFloat(stats.max),
        GeneralFloat(stats.mean),
        GeneralFloat(stats.stdev)
    )
}
