use crate::error::{BenchError, BenchResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a batch does when one image fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ErrorPolicy {
    /// Stop the whole run at the first failing image
    #[default]
    Abort,
    /// Log the failure and continue with the next image
    Skip,
}

/// Pipeline and walker settings. The CLI always runs with `Default`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    /// Extensions (without the dot, case-sensitive) picked up from directories
    pub extensions: Vec<String>,
    /// Descend into subdirectories of a directory input. Outputs are named by
    /// file stem only, so equal stems in different subdirectories overwrite
    /// each other (a warning is logged).
    pub recursive: bool,
    /// Process directory entries in lexicographic order
    pub sort_entries: bool,
    pub write_keypoints: bool,
    pub write_visualizations: bool,
    /// Write `summary.csv` pooling every image of the run
    pub write_summary: bool,
    pub error_policy: ErrorPolicy,
    /// 1-100
    pub jpeg_quality: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["jpg".to_string(), "png".to_string()],
            recursive: false,
            sort_entries: true,
            write_keypoints: true,
            write_visualizations: true,
            write_summary: false,
            error_policy: ErrorPolicy::Abort,
            jpeg_quality: 95,
        }
    }
}

impl PipelineConfig {
    pub fn recursive(mut self, enable: bool) -> Self {
        self.recursive = enable;
        self
    }

    pub fn sort_entries(mut self, enable: bool) -> Self {
        self.sort_entries = enable;
        self
    }

    pub fn write_keypoints(mut self, enable: bool) -> Self {
        self.write_keypoints = enable;
        self
    }

    pub fn write_visualizations(mut self, enable: bool) -> Self {
        self.write_visualizations = enable;
        self
    }

    pub fn write_summary(mut self, enable: bool) -> Self {
        self.write_summary = enable;
        self
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// True when `ext` is one of the configured image extensions
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "PipelineConfig: ext={:?}, recursive={}, sorted={}, outputs=[keypoints:{}, jpg:{}, summary:{}], on_error={:?}, quality={}",
            self.extensions,
            self.recursive,
            self.sort_entries,
            self.write_keypoints,
            self.write_visualizations,
            self.write_summary,
            self.error_policy,
            self.jpeg_quality
        )
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> BenchResult<()> {
        if self.extensions.is_empty() {
            return Err(BenchError::Config("at least one extension is required".into()));
        }
        if let Some(bad) = self.extensions.iter().find(|e| e.is_empty() || e.starts_with('.')) {
            return Err(BenchError::Config(format!(
                "extension '{}' must be non-empty and given without the dot",
                bad
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(BenchError::Config(format!(
                "jpeg_quality must be 1-100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save configuration to TOML file
    #[cfg(feature = "serde")]
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Load configuration from TOML file
    #[cfg(feature = "serde")]
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
