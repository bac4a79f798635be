use featbench_core::DetectError;

#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// The selector token matched no detector
    UnknownSelector(String),
    InvalidConfig(String),
    Detector(DetectError),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::UnknownSelector(token) => write!(f, "Unknown detector type: {}", token),
            RegistryError::InvalidConfig(msg) => write!(f, "Invalid detector configuration: {}", msg),
            RegistryError::Detector(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Detector(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DetectError> for RegistryError {
    fn from(err: DetectError) -> Self {
        RegistryError::Detector(err)
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
