use crate::error::{RegistryError, RegistryResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// ORB's feature cap when none is configured. OpenCV's own default (500) is
/// far below what the other detectors return and would skew comparisons.
pub const UNCAPPED_ORB_FEATURES: i32 = 10_000_000;

/// Where adapters take their display name from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NameSource {
    /// `getDefaultName()` of the native detector, `Feature2D.` prefix stripped
    #[default]
    Native,
    /// The fixed table in `DetectorKind::display_name`
    Table,
}

/// Construction settings shared by every adapter
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// `nfeatures` passed to ORB
    pub orb_max_features: i32,
    pub name_source: NameSource,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            orb_max_features: UNCAPPED_ORB_FEATURES,
            name_source: NameSource::Native,
        }
    }
}

impl DetectorConfig {
    /// ORB with OpenCV's stock cap of 500 features
    pub fn capped_orb() -> Self {
        Self {
            orb_max_features: 500,
            ..Self::default()
        }
    }

    pub fn with_orb_max_features(mut self, n: i32) -> Self {
        self.orb_max_features = n;
        self
    }

    pub fn with_name_source(mut self, source: NameSource) -> Self {
        self.name_source = source;
        self
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "DetectorConfig: orb_max_features={}, names={:?}",
            self.orb_max_features, self.name_source
        )
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> RegistryResult<()> {
        if self.orb_max_features <= 0 {
            return Err(RegistryError::InvalidConfig(format!(
                "orb_max_features must be positive, got {}",
                self.orb_max_features
            )));
        }
        Ok(())
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from TOML file
    #[cfg(feature = "serde")]
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Serialize to JSON string
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    #[cfg(feature = "serde")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserialize from TOML string
    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
