use featbench_core::DetectError;
use featbench_detect::RegistryError;
use std::path::PathBuf;

#[derive(Debug)]
pub enum BenchError {
    /// Bad command line; the message is printed as-is
    Usage(String),
    /// Directory listing of the input failed
    Input { path: PathBuf, source: std::io::Error },
    /// Image missing, unreadable or not decodable
    ImageLoad { path: PathBuf, message: String },
    /// A detector failed on an image
    Detector { detector: String, image: PathBuf, source: DetectError },
    /// Creating or writing an output file failed
    Output { path: PathBuf, source: std::io::Error },
    /// Encoding the visualization failed
    Render { path: PathBuf, message: String },
    Registry(RegistryError),
    Config(String),
}

impl BenchError {
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BenchError::Output {
            path: path.into(),
            source,
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, BenchError::Usage(_))
    }

    /// 1 for usage mistakes, 2 for failures while processing
    pub fn exit_code(&self) -> i32 {
        if self.is_usage() {
            1
        } else {
            2
        }
    }
}

impl std::fmt::Display for BenchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BenchError::Usage(msg) => write!(f, "{}", msg),
            BenchError::Input { path, source } => {
                write!(f, "Failed to read input {}: {}", path.display(), source)
            }
            BenchError::ImageLoad { path, message } => {
                write!(f, "Failed to load image: {} ({})", path.display(), message)
            }
            BenchError::Detector { detector, image, source } => {
                write!(f, "Detector {} failed on {}: {}", detector, image.display(), source)
            }
            BenchError::Output { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            BenchError::Render { path, message } => {
                write!(f, "Failed to save visualization {}: {}", path.display(), message)
            }
            BenchError::Registry(e) => write!(f, "{}", e),
            BenchError::Config(msg) => write!(f, "Invalid pipeline configuration: {}", msg),
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::Input { source, .. } | BenchError::Output { source, .. } => Some(source),
            BenchError::Detector { source, .. } => Some(source),
            BenchError::Registry(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RegistryError> for BenchError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownSelector(_) => BenchError::Usage(err.to_string()),
            other => BenchError::Registry(other),
        }
    }
}

pub type BenchResult<T> = Result<T, BenchError>;
