use log::{debug, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::error::{BenchError, BenchResult};
use crate::report::image_stem;

/// Image paths named by the input argument.
///
/// A regular file is returned as-is, whatever its extension. A directory
/// yields its regular files whose extension is one of
/// `PipelineConfig::extensions`; subdirectories are only entered when
/// `recursive` is set. Anything else is a usage error.
pub fn collect_inputs(input: &Path, config: &PipelineConfig) -> BenchResult<Vec<PathBuf>> {
    if input.is_dir() {
        let mut images = Vec::new();
        scan_dir(input, config, &mut images)?;
        debug!("{} image(s) found under {}", images.len(), input.display());
        for stem in duplicate_stems(&images) {
            warn!("Several images share the stem '{}'; their outputs overwrite each other", stem);
        }
        Ok(images)
    } else if input.is_file() {
        Ok(vec![input.to_path_buf()])
    } else {
        Err(BenchError::Usage(format!(
            "Input path is not a file or directory: {}",
            input.display()
        )))
    }
}

fn scan_dir(dir: &Path, config: &PipelineConfig, images: &mut Vec<PathBuf>) -> BenchResult<()> {
    let input_err = |e| BenchError::Input {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(input_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(input_err)?;

    if config.sort_entries {
        entries.sort();
    }

    for path in entries {
        if path.is_dir() {
            if config.recursive {
                scan_dir(&path, config, images)?;
            }
        } else if path.is_file() && has_image_extension(&path, config) {
            images.push(path);
        }
    }
    Ok(())
}

/// Stems named by more than one path, in first-repeat order
fn duplicate_stems(images: &[PathBuf]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut repeated = Vec::new();
    for path in images {
        let stem = image_stem(path);
        if !seen.insert(stem.clone()) && !repeated.contains(&stem) {
            repeated.push(stem);
        }
    }
    repeated
}

fn has_image_extension(path: &Path, config: &PipelineConfig) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| config.accepts_extension(ext))
}
