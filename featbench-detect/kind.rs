use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Prefix OpenCV puts in front of every `Feature2D::getDefaultName()`
pub const NATIVE_NAME_PREFIX: &str = "Feature2D.";

/// Every detector the registry knows, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DetectorKind {
    Sift,
    Brisk,
    Orb,
    Akaze,
    Mser,
    Fast,
    SimpleBlob,
    Agast,
    Gftt,
}

impl DetectorKind {
    /// Registration order; also the order of rows in the stats CSV
    pub const ALL: [DetectorKind; 9] = [
        DetectorKind::Sift,
        DetectorKind::Brisk,
        DetectorKind::Orb,
        DetectorKind::Akaze,
        DetectorKind::Mser,
        DetectorKind::Fast,
        DetectorKind::SimpleBlob,
        DetectorKind::Agast,
        DetectorKind::Gftt,
    ];

    /// Selector tokens that pick this detector (case-sensitive)
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            DetectorKind::Sift => &["SIFT", "desc", "all"],
            DetectorKind::Brisk => &["BRISK", "desc", "all"],
            DetectorKind::Orb => &["ORB", "desc", "all"],
            DetectorKind::Akaze => &["AKAZE", "desc", "all"],
            DetectorKind::Mser => &["MSER", "all"],
            DetectorKind::Fast => &["FAST", "all"],
            DetectorKind::SimpleBlob => &["SimpleBlobDetector", "blob", "all"],
            DetectorKind::Agast => &["AgastFeatureDetector", "Agast", "all"],
            DetectorKind::Gftt => &["GFTTDetector", "GFTT", "all"],
        }
    }

    pub fn matches(self, token: &str) -> bool {
        self.tokens().contains(&token)
    }

    /// Detectors that also produce descriptors
    pub fn computes_descriptors(self) -> bool {
        matches!(
            self,
            DetectorKind::Sift | DetectorKind::Brisk | DetectorKind::Orb | DetectorKind::Akaze
        )
    }

    /// Name OpenCV 4.x reports for this detector once the prefix is stripped
    pub fn display_name(self) -> &'static str {
        match self {
            DetectorKind::Sift => "SIFT",
            DetectorKind::Brisk => "BRISK",
            DetectorKind::Orb => "ORB",
            DetectorKind::Akaze => "AKAZE",
            DetectorKind::Mser => "MSER",
            DetectorKind::Fast => "FastFeatureDetector",
            DetectorKind::SimpleBlob => "SimpleBlobDetector",
            DetectorKind::Agast => "AgastFeatureDetector",
            DetectorKind::Gftt => "GFTTDetector",
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Parses the detector's own selector token (`SIFT`, `FAST`, `blob`, ...).
/// Group tokens such as `desc` or `all` name more than one kind and are
/// rejected here; use `selector::select_kinds` for those.
impl FromStr for DetectorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut found = DetectorKind::ALL.iter().copied().filter(|k| k.matches(s));
        match (found.next(), found.next()) {
            (Some(kind), None) => Ok(kind),
            (Some(_), Some(_)) => Err(format!("'{s}' selects more than one detector")),
            (None, _) => Err(format!("unknown detector '{s}'")),
        }
    }
}

/// Turn a native type identifier such as `Feature2D.SIFT` into `SIFT`.
/// Identifiers without the prefix are returned unchanged.
pub fn display_name_from_native(native: &str) -> &str {
    native.strip_prefix(NATIVE_NAME_PREFIX).unwrap_or(native)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_display_names_are_unique() {
        let names: HashSet<_> = DetectorKind::ALL.iter().map(|k| k.display_name()).collect();
        assert_eq!(names.len(), DetectorKind::ALL.len());
    }

    #[test]
    fn test_descriptor_capable_kinds() {
        let desc: Vec<_> = DetectorKind::ALL
            .iter()
            .copied()
            .filter(|k| k.computes_descriptors())
            .collect();
        assert_eq!(
            desc,
            vec![DetectorKind::Sift, DetectorKind::Brisk, DetectorKind::Orb, DetectorKind::Akaze]
        );
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert!(DetectorKind::Sift.matches("SIFT"));
        assert!(!DetectorKind::Sift.matches("sift"));
        assert!(DetectorKind::SimpleBlob.matches("blob"));
        assert!(!DetectorKind::SimpleBlob.matches("Blob"));
    }

    #[test]
    fn test_from_str_single_kind() {
        assert_eq!("GFTT".parse::<DetectorKind>(), Ok(DetectorKind::Gftt));
        assert_eq!("AgastFeatureDetector".parse::<DetectorKind>(), Ok(DetectorKind::Agast));
        assert!("desc".parse::<DetectorKind>().is_err());
        assert!("bogus".parse::<DetectorKind>().is_err());
    }

    #[test]
    fn test_strip_native_prefix() {
        assert_eq!(display_name_from_native("Feature2D.SIFT"), "SIFT");
        assert_eq!(display_name_from_native("Feature2D.FastFeatureDetector"), "FastFeatureDetector");
        assert_eq!(display_name_from_native("Custom"), "Custom");
    }
}
