//! CSV outputs: output file naming, the per-image stats table and the
//! per-detector keypoint dump.

use featbench_core::{GeneralFloat, Keypoint, ResponseStats};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{BenchError, BenchResult};

pub const STATS_HEADER: &str = "detector,keypoints,r_min,r_max,r_mean,r_stddev,ms";
pub const KEYPOINTS_HEADER: &str = "x,y,size,angle,response,octave";

/// Base filename of `image_path` without its extension
pub fn image_stem(image_path: &Path) -> String {
    image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Names of every file written for one image
#[derive(Debug, Clone)]
pub struct OutputPaths {
    dir: PathBuf,
    stem: String,
}

impl OutputPaths {
    pub fn new(output_dir: &Path, image_path: &Path) -> Self {
        Self {
            dir: output_dir.to_path_buf(),
            stem: image_stem(image_path),
        }
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// `<stem>_stats.csv`
    pub fn stats(&self) -> PathBuf {
        self.dir.join(format!("{}_stats.csv", self.stem))
    }

    /// `<stem>_<detector>_keypoints.csv`
    pub fn keypoints(&self, detector: &str) -> PathBuf {
        self.dir.join(format!("{}_{}_keypoints.csv", self.stem, detector))
    }

    /// `<stem>_<detector>.jpg`
    pub fn visualization(&self, detector: &str) -> PathBuf {
        self.dir.join(format!("{}_{}.jpg", self.stem, detector))
    }
}

/// One completed detector run on one image
#[derive(Debug, Clone, PartialEq)]
pub struct StatsRow {
    pub detector: String,
    pub keypoints: usize,
    pub stats: ResponseStats,
    pub elapsed_ms: u128,
}

impl StatsRow {
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.detector,
            self.keypoints,
            GeneralFloat(self.stats.min),
            GeneralFloat(self.stats.max),
            GeneralFloat(self.stats.mean),
            GeneralFloat(self.stats.stdev),
            self.elapsed_ms
        )
    }
}

/// Stats table for one image. Rows are flushed as they are appended, so a
/// run that dies mid-image leaves the rows of the detectors that finished.
pub struct StatsWriter {
    path: PathBuf,
    out: BufWriter<File>,
}

impl StatsWriter {
    /// Create (or truncate) the file and write the header
    pub fn create(path: PathBuf) -> BenchResult<Self> {
        let file = File::create(&path).map_err(|e| BenchError::output(&path, e))?;
        let mut writer = Self {
            path,
            out: BufWriter::new(file),
        };
        writer.write_line(STATS_HEADER)?;
        Ok(writer)
    }

    pub fn append(&mut self, row: &StatsRow) -> BenchResult<()> {
        self.write_line(&row.to_csv_line())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&mut self, line: &str) -> BenchResult<()> {
        writeln!(self.out, "{}", line)
            .and_then(|_| self.out.flush())
            .map_err(|e| BenchError::output(&self.path, e))
    }
}

/// Write the keypoint CSV; rows appear in detector output order
pub fn write_keypoints_csv(path: &Path, keypoints: &[Keypoint]) -> BenchResult<()> {
    let file = File::create(path).map_err(|e| BenchError::output(path, e))?;
    let mut out = BufWriter::new(file);
    write_keypoints(&mut out, keypoints)
        .and_then(|_| out.flush())
        .map_err(|e| BenchError::output(path, e))
}

fn write_keypoints<W: Write>(out: &mut W, keypoints: &[Keypoint]) -> std::io::Result<()> {
    writeln!(out, "{}", KEYPOINTS_HEADER)?;
    for kp in keypoints {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            GeneralFloat(kp.x),
            GeneralFloat(kp.y),
            GeneralFloat(kp.size),
            GeneralFloat(kp.angle),
            GeneralFloat(kp.response),
            kp.octave
        )?;
    }
    Ok(())
}
