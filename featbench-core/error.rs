#[derive(Debug, Clone, PartialEq)]
pub enum DetectError {
    /// The native detector could not be created
    Construct { detector: String, message: String },
    /// The native detect / detect-and-compute call failed
    Native { detector: String, message: String },
    /// The image cannot be handed to the detector (e.g. zero-sized)
    InvalidImage { width: u32, height: u32 },
}

impl DetectError {
    pub fn construct(detector: impl Into<String>, message: impl std::fmt::Display) -> Self {
        DetectError::Construct {
            detector: detector.into(),
            message: message.to_string(),
        }
    }

    pub fn native(detector: impl Into<String>, message: impl std::fmt::Display) -> Self {
        DetectError::Native {
            detector: detector.into(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for DetectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectError::Construct { detector, message } => {
                write!(f, "Failed to create {} detector: {}", detector, message)
            }
            DetectError::Native { detector, message } => {
                write!(f, "{} detection failed: {}", detector, message)
            }
            DetectError::InvalidImage { width, height } => {
                write!(f, "Invalid image dimensions: {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for DetectError {}

pub type DetectResult<T> = Result<T, DetectError>;
