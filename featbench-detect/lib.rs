pub mod config;
pub mod error;
pub mod kind;
pub mod selector;

#[cfg(feature = "opencv")]
pub mod adapter;

pub use config::{DetectorConfig, NameSource, UNCAPPED_ORB_FEATURES};
pub use error::{RegistryError, RegistryResult};
pub use kind::{display_name_from_native, DetectorKind, NATIVE_NAME_PREFIX};
pub use selector::{select_kinds, SELECTOR_TOKENS};

#[cfg(feature = "opencv")]
pub use adapter::{Mode, OpenCvDetector};

#[cfg(feature = "opencv")]
use featbench_core::FeatureDetector;

/// Instantiate one adapter per kind, preserving order
#[cfg(feature = "opencv")]
pub fn build_detectors(
    kinds: &[DetectorKind],
    config: &DetectorConfig,
) -> RegistryResult<Vec<Box<dyn FeatureDetector>>> {
    config.validate()?;
    kinds
        .iter()
        .map(|&kind| {
            OpenCvDetector::new(kind, config)
                .map(|d| Box::new(d) as Box<dyn FeatureDetector>)
                .map_err(RegistryError::from)
        })
        .collect()
}

/// Resolve `token` and build its detectors; unknown tokens are an error
#[cfg(feature = "opencv")]
pub fn select_detectors(
    token: &str,
    config: &DetectorConfig,
) -> RegistryResult<Vec<Box<dyn FeatureDetector>>> {
    let kinds = select_kinds(token);
    if kinds.is_empty() {
        return Err(RegistryError::UnknownSelector(token.to_string()));
    }
    build_detectors(&kinds, config)
}
