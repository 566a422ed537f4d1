//! Property-Based Tests for the Documents Module
//!
//! Uses proptest to verify summary derivation and manifest reuse invariants.

use proptest::prelude::*;

use crate::docs::{DocSummary, FileMapping, PREVIEW_LENGTH};

// == Strategies ==
/// Generates document content including newlines, blanks, and multi-byte
/// characters.
fn content_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \nü#-]{0,1200}"
}

fn filename_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,32}".prop_map(|stem| format!("{stem}.md"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // A derived preview never exceeds the configured length, never contains
    // a newline, and the size always equals the content's character count.
    #[test]
    fn prop_preview_shape(filename in filename_strategy(), content in content_strategy()) {
        let summary = DocSummary::derive(&filename, &content);

        prop_assert!(summary.preview.chars().count() <= PREVIEW_LENGTH);
        prop_assert!(!summary.preview.contains('\n'));
        prop_assert_eq!(summary.size, content.chars().count());
    }

    // The preview carries no leading or trailing whitespace.
    #[test]
    fn prop_preview_trimmed(content in content_strategy()) {
        let summary = DocSummary::derive("doc.md", &content);
        prop_assert_eq!(summary.preview.trim(), summary.preview.as_str());
    }

    // Storing a derived summary in a manifest entry makes that entry
    // reusable for the same content. This is what guarantees the manifest
    // converges: once written, an unchanged document never triggers another
    // regeneration or manifest write.
    #[test]
    fn prop_stored_summary_validates_for_same_content(
        filename in filename_strategy(),
        content in content_strategy()
    ) {
        let summary = DocSummary::derive(&filename, &content);
        let mapping = FileMapping::synthesized(&filename, &summary);

        prop_assert!(mapping.has_valid_summary(content.chars().count()));
    }

    // Changing the content length always invalidates a stored summary.
    #[test]
    fn prop_size_change_invalidates(
        filename in filename_strategy(),
        content in content_strategy(),
        extra in "[a-z]{1,20}"
    ) {
        let summary = DocSummary::derive(&filename, &content);
        let mapping = FileMapping::synthesized(&filename, &summary);
        let grown = format!("{content}{extra}");

        prop_assert!(!mapping.has_valid_summary(grown.chars().count()));
    }

    // Derivation is deterministic.
    #[test]
    fn prop_derive_deterministic(content in content_strategy()) {
        let a = DocSummary::derive("doc.md", &content);
        let b = DocSummary::derive("doc.md", &content);
        prop_assert_eq!(a, b);
    }
}
