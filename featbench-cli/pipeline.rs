//! Per-image orchestration: load once, run every detector, write outputs.

use featbench_core::{FeatureDetector, GrayImage};
use image::ImageReader;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::{ErrorPolicy, PipelineConfig};
use crate::error::{BenchError, BenchResult};
use crate::render::{draw_rich_keypoints, save_jpeg};
use crate::report::{write_keypoints_csv, OutputPaths, StatsRow, StatsWriter};
use crate::summary::RunSummary;
use crate::walker::collect_inputs;

/// Rows written for one fully processed image
#[derive(Debug, Clone)]
pub struct ImageReport {
    pub image: PathBuf,
    pub stats_file: PathBuf,
    pub rows: Vec<StatsRow>,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<ImageReport>,
    /// Only filled under `ErrorPolicy::Skip`
    pub failed: Vec<(PathBuf, BenchError)>,
    pub summary_file: Option<PathBuf>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs a fixed, ordered detector set over images
pub struct FeaturePipeline {
    detectors: Vec<Box<dyn FeatureDetector>>,
    config: PipelineConfig,
}

impl FeaturePipeline {
    pub fn new(detectors: Vec<Box<dyn FeatureDetector>>) -> Self {
        Self::with_config(detectors, PipelineConfig::default())
    }

    pub fn with_config(detectors: Vec<Box<dyn FeatureDetector>>, config: PipelineConfig) -> Self {
        Self { detectors, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn detector_names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Process every image named by `input`, writing into `output_dir`
    pub fn run(&mut self, input: &Path, output_dir: &Path) -> BenchResult<BatchReport> {
        self.config.validate()?;
        crate::check_output_dir(output_dir)?;
        let images = collect_inputs(input, &self.config)?;
        debug!("{}", self.config.summary());

        let mut summary = RunSummary::new(self.detector_names());
        let mut report = BatchReport::default();

        for image in images {
            match self.process(&image, output_dir) {
                Ok((image_report, responses)) => {
                    for (index, r) in responses.iter().enumerate() {
                        summary.record(index, r);
                    }
                    report.processed.push(image_report);
                }
                Err(e) => match self.config.error_policy {
                    ErrorPolicy::Abort => return Err(e),
                    ErrorPolicy::Skip => {
                        warn!("Skipping {}: {}", image.display(), e);
                        report.failed.push((image, e));
                    }
                },
            }
        }

        if self.config.write_summary && !report.processed.is_empty() {
            report.summary_file = Some(summary.write(output_dir)?);
        }

        info!(
            "{} image(s) processed, {} failed, {} detector(s)",
            report.processed.len(),
            report.failed.len(),
            self.detectors.len()
        );
        Ok(report)
    }

    /// Run every detector on one image and write its outputs
    pub fn process_image(&mut self, image_path: &Path, output_dir: &Path) -> BenchResult<ImageReport> {
        self.process(image_path, output_dir).map(|(report, _)| report)
    }

    fn process(
        &mut self,
        image_path: &Path,
        output_dir: &Path,
    ) -> BenchResult<(ImageReport, Vec<Vec<f32>>)> {
        println!("Open {}", image_path.display());
        let image = load_gray(image_path)?;

        let paths = OutputPaths::new(output_dir, image_path);
        let mut stats = StatsWriter::create(paths.stats())?;
        let mut rows = Vec::with_capacity(self.detectors.len());
        let mut responses = Vec::with_capacity(self.detectors.len());

        for detector in self.detectors.iter_mut() {
            let name = detector.name().to_string();
            println!("Start {}", name);

            let start = Instant::now();
            let detection = detector.run(&image).map_err(|source| BenchError::Detector {
                detector: name.clone(),
                image: image_path.to_path_buf(),
                source,
            })?;
            let elapsed_ms = start.elapsed().as_millis();

            let row = StatsRow {
                detector: name.clone(),
                keypoints: detection.keypoints.len(),
                stats: detection.stats(),
                elapsed_ms,
            };
            stats.append(&row)?;
            debug!(
                "{} on {}: {} keypoints, {} descriptor rows, {} ms",
                name,
                paths.stem(),
                row.keypoints,
                detection.descriptors.rows(),
                elapsed_ms
            );

            if self.config.write_keypoints {
                write_keypoints_csv(&paths.keypoints(&name), &detection.keypoints)?;
            }
            if self.config.write_visualizations {
                let canvas = draw_rich_keypoints(&image, &detection.keypoints);
                save_jpeg(&canvas, &paths.visualization(&name), self.config.jpeg_quality)?;
            }

            responses.push(detection.keypoints.iter().map(|kp| kp.response).collect());
            rows.push(row);
        }

        let report = ImageReport {
            image: image_path.to_path_buf(),
            stats_file: stats.path().to_path_buf(),
            rows,
        };
        Ok((report, responses))
    }
}

/// Decode any supported format as 8-bit grayscale. The format is sniffed
/// from the content so files without an image extension still load.
pub fn load_gray(path: &Path) -> BenchResult<GrayImage> {
    let load_err = |message: String| BenchError::ImageLoad {
        path: path.to_path_buf(),
        message,
    };
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| load_err(e.to_string()))?;
    let decoded = reader.decode().map_err(|e| load_err(e.to_string()))?;
    Ok(decoded.to_luma8())
}
