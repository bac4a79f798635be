pub mod config;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod summary;
pub mod walker;

pub use config::{ErrorPolicy, PipelineConfig};
pub use error::{BenchError, BenchResult};
pub use pipeline::{load_gray, BatchReport, FeaturePipeline, ImageReport};
pub use report::{OutputPaths, StatsRow, StatsWriter, KEYPOINTS_HEADER, STATS_HEADER};
pub use summary::{RunSummary, SUMMARY_FILE, SUMMARY_HEADER};
pub use walker::collect_inputs;

pub use featbench_core;
pub use featbench_detect;

use featbench_detect::SELECTOR_TOKENS;
use std::path::{Path, PathBuf};

/// Positional arguments of the `featbench` binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub selector: String,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl CliArgs {
    /// Parse `args` including the program name in position 0
    pub fn parse<I>(args: I) -> BenchResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let program = args.next().unwrap_or_else(|| "featbench".to_string());
        let rest: Vec<String> = args.collect();

        match <[String; 3]>::try_from(rest) {
            Ok([selector, input, output]) => Ok(Self {
                selector,
                input: PathBuf::from(input),
                output: PathBuf::from(output),
            }),
            Err(_) => Err(BenchError::Usage(usage(&program))),
        }
    }
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {} <detector_type> <input_path> <output_dir> (detectors: {})",
        program, SELECTOR_TOKENS
    )
}

/// The output directory must already exist; it is never created
pub fn check_output_dir(output: &Path) -> BenchResult<()> {
    if output.is_dir() {
        Ok(())
    } else {
        Err(BenchError::Usage(format!(
            "Output path is not a directory: {}",
            output.display()
        )))
    }
}
