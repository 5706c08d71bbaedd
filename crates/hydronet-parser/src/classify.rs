//! Element classification by identifier.

use hydronet_core::semantic::ElementKind;

/// Maps an element identifier to its semantic type.
///
/// Rules are checked in order, case-sensitively. `C`, `D` and `F` match the
/// first character only; `HW` and `ST` must be the whole identifier.
///
/// | Rule        | Type |
/// |-------------|------|
/// | `C…`        | conduit |
/// | `D…`        | dummy |
/// | `HW`        | reservoir |
/// | `F…`        | flowbalancing |
/// | `ST`        | storage |
///
/// Anything else, including the empty string and ids such as `HW2`, is
/// [`ElementKind::Unknown`].
pub fn classify(id: &str) -> ElementKind {
    match id.chars().next() {
        Some('C') => ElementKind::Conduit,
        Some('D') => ElementKind::Dummy,
        _ if id == "HW" => ElementKind::Reservoir,
        Some('F') => ElementKind::FlowBalancing,
        _ if id == "ST" => ElementKind::Storage,
        _ => ElementKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prefixes() {
        assert_eq!(classify("C12"), ElementKind::Conduit);
        assert_eq!(classify("D3"), ElementKind::Dummy);
        assert_eq!(classify("HW"), ElementKind::Reservoir);
        assert_eq!(classify("F1"), ElementKind::FlowBalancing);
        assert_eq!(classify("ST"), ElementKind::Storage);
    }

    #[test]
    fn test_classify_reservoir_and_storage_need_exact_id() {
        assert_eq!(classify("HW2"), ElementKind::Unknown);
        assert_eq!(classify("HW1"), ElementKind::Unknown);
        assert_eq!(classify("ST10"), ElementKind::Unknown);
        assert_eq!(classify("hw"), ElementKind::Unknown);
        assert_eq!(classify("H1"), ElementKind::Unknown);
        assert_eq!(classify("S1"), ElementKind::Unknown);
    }

    #[test]
    fn test_classify_fallback() {
        assert_eq!(classify(""), ElementKind::Unknown);
        assert_eq!(classify("c12"), ElementKind::Unknown);
        assert_eq!(classify("7"), ElementKind::Unknown);
        assert_eq!(classify("P4"), ElementKind::Unknown);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Single-letter rules look at nothing past the first character.
    fn check_suffix_is_ignored(prefix: &str, suffix: &str) -> Result<(), TestCaseError> {
        let bare = classify(prefix);
        let extended = classify(&format!("{prefix}{suffix}"));
        prop_assert_eq!(bare, extended);
        Ok(())
    }

    proptest! {
        #[test]
        fn suffix_is_ignored(
            prefix in prop::sample::select(vec!["C", "D", "F"]),
            suffix in "[A-Za-z0-9_]{0,8}",
        ) {
            check_suffix_is_ignored(prefix, &suffix)?;
        }

        #[test]
        fn reservoir_and_storage_match_whole_id(
            id in prop::sample::select(vec!["HW", "ST"]),
            suffix in "[A-Za-z0-9_]{1,8}",
        ) {
            prop_assert_ne!(classify(id), ElementKind::Unknown);
            prop_assert_eq!(classify(&format!("{id}{suffix}")), ElementKind::Unknown);
        }

        #[test]
        fn classify_never_panics(id in ".*") {
            let _ = classify(&id);
        }
    }
}
