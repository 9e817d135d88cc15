//! Property-based tests for the resolver

use super::*;
use crate::knowledge::KnowledgeBase;
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

/// Index into the reference table
fn arb_entry_index() -> impl Strategy<Value = usize> {
    0..KnowledgeBase::reference().len()
}

fn cased(keyword: &str, upper: bool) -> String {
    if upper {
        keyword.to_ascii_uppercase()
    } else {
        keyword.to_string()
    }
}

/// A reference keyword spliced between arbitrary letters, with its table index
fn arb_text_with_keyword() -> impl Strategy<Value = (usize, String)> {
    (
        "[a-zA-Z ?!.,]{0,20}",
        arb_entry_index(),
        "[a-zA-Z ?!.,]{0,20}",
        any::<bool>(),
    )
        .prop_map(|(prefix, index, suffix, upper)| {
            let reference = KnowledgeBase::reference();
            let keyword = cased(reference.entries()[index].keyword(), upper);
            (index, format!("{prefix}{keyword}{suffix}"))
        })
}

/// Same, but the padding cannot start or finish any reference keyword
fn arb_text_with_isolated_keyword() -> impl Strategy<Value = (usize, String)> {
    (
        "[xzqXZQ0-9 ?!.,]{0,20}",
        arb_entry_index(),
        "[xzqXZQ0-9 ?!.,]{0,20}",
        any::<bool>(),
    )
        .prop_map(|(prefix, index, suffix, upper)| {
            let reference = KnowledgeBase::reference();
            let keyword = cased(reference.entries()[index].keyword(), upper);
            (index, format!("{prefix}{keyword}{suffix}"))
        })
}

fn response_at(index: usize) -> String {
    KnowledgeBase::reference().entries()[index]
        .response()
        .to_string()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_resolve_is_total(input in ".*") {
        let resolver = Resolver::default();
        prop_assert!(!resolver.resolve(&input).is_empty());
    }

    #[test]
    fn prop_resolve_is_idempotent(input in ".*") {
        let resolver = Resolver::default();
        prop_assert_eq!(resolver.resolve(&input), resolver.resolve(&input));
    }

    #[test]
    fn prop_keyword_input_never_answered_by_later_entry((index, input) in arb_text_with_keyword()) {
        let resolver = Resolver::default();
        let answer = resolver.resolve(&input);
        let allowed: Vec<String> = (0..=index).map(response_at).collect();
        prop_assert!(
            allowed.contains(&answer),
            "{:?} answered by an entry after #{}",
            input,
            index
        );
    }

    #[test]
    fn prop_isolated_keyword_gets_its_own_answer((index, input) in arb_text_with_isolated_keyword()) {
        // No reference keyword contains an earlier one
        let resolver = Resolver::default();
        prop_assert_eq!(resolver.resolve(&input), response_at(index));
    }

    #[test]
    fn prop_ascii_case_does_not_matter(input in "[a-zA-Z ?-]{0,40}") {
        let resolver = Resolver::default();
        prop_assert_eq!(
            resolver.resolve(&input.to_ascii_uppercase()),
            resolver.resolve(&input.to_ascii_lowercase())
        );
    }

    #[test]
    fn prop_unmatched_tiers_follow_question_mark(input in "[xyzq0-9 ?]{0,30}") {
        // The alphabet cannot spell any reference keyword
        let resolver = Resolver::default();
        let resolution = resolver.classify(&input);
        if input.contains('?') {
            prop_assert_eq!(resolution, Resolution::Menu);
        } else {
            prop_assert_eq!(resolution, Resolution::Fallback);
        }
    }
}
