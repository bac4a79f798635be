use crate::kind::DetectorKind;

/// Tokens listed in the CLI usage text
pub const SELECTOR_TOKENS: &str = "SIFT, BRISK, ORB, MSER, AKAZE, FAST, blob, Agast, GFTT, desc, all";

/// Resolve a selector token to the detectors it names, in registration order.
///
/// Each kind is tested independently, so `desc` yields the four
/// descriptor-capable detectors and `all` yields all nine. An empty result
/// means the token is not recognised.
pub fn select_kinds(token: &str) -> Vec<DetectorKind> {
    DetectorKind::ALL
        .iter()
        .copied()
        .filter(|kind| kind.matches(token))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use DetectorKind::*;

    #[test]
    fn test_single_tokens() {
        assert_eq!(select_kinds("SIFT"), vec![Sift]);
        assert_eq!(select_kinds("FAST"), vec![Fast]);
        assert_eq!(select_kinds("blob"), vec![SimpleBlob]);
        assert_eq!(select_kinds("SimpleBlobDetector"), vec![SimpleBlob]);
        assert_eq!(select_kinds("Agast"), vec![Agast]);
        assert_eq!(select_kinds("GFTTDetector"), vec![Gftt]);
    }

    #[test]
    fn test_desc_selects_descriptor_detectors_in_order() {
        assert_eq!(select_kinds("desc"), vec![Sift, Brisk, Orb, Akaze]);
    }

    #[test]
    fn test_all_selects_everything_in_order() {
        assert_eq!(select_kinds("all"), DetectorKind::ALL.to_vec());
    }

    #[test]
    fn test_unknown_tokens() {
        assert!(select_kinds("bogus").is_empty());
        assert!(select_kinds("").is_empty());
        assert!(select_kinds("ALL").is_empty());
        assert!(select_kinds("FastFeatureDetector").is_empty());
    }

    proptest! {
        #[test]
        fn prop_selection_keeps_registration_order(token in "[A-Za-z]{0,20}") {
            let kinds = select_kinds(&token);
            let positions: Vec<usize> = kinds
                .iter()
                .map(|k| DetectorKind::ALL.iter().position(|a| a == k).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
