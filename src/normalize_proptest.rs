//! Property-based tests for label normalization.
//!
//! These tests use proptest to generate random labels and verify that the
//! matching key keeps its shape for every input.

#[cfg(test)]
mod proptest_tests {
    use crate::normalize::normalize;
    use proptest::prelude::*;

    proptest! {
        /// Property: normalizing a key again leaves it unchanged
        #[test]
        fn normalize_is_idempotent(input in "[ -~]{0,48}") {
            let once = normalize(&input);
            let twice = normalize(once.as_str());
            prop_assert_eq!(once, twice);
        }

        /// Property: idempotence also holds for labels with accented letters
        #[test]
        fn normalize_is_idempotent_for_latin1_letters(input in "[a-zA-ZÀ-ÖØ-öø-ÿ _*-]{0,32}") {
            let once = normalize(&input);
            let twice = normalize(once.as_str());
            prop_assert_eq!(once, twice);
        }

        /// Property: keys never start or end with a hyphen, and never double it
        #[test]
        fn normalize_has_no_stray_hyphens(input in "[ -~]{0,48}") {
            let key = normalize(&input);
            let key = key.as_str();
            prop_assert!(!key.starts_with('-'), "leading hyphen in {:?}", key);
            prop_assert!(!key.ends_with('-'), "trailing hyphen in {:?}", key);
            prop_assert!(!key.contains("--"), "double hyphen in {:?}", key);
        }

        /// Property: keys contain only lowercase alphanumerics and hyphens
        #[test]
        fn normalize_output_alphabet(input in "[ -~]{0,48}") {
            let key = normalize(&input);
            for c in key.as_str().chars() {
                prop_assert!(
                    c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit(),
                    "unexpected character {:?} in {:?}",
                    c,
                    key
                );
            }
        }

        /// Property: case and separator style do not change the key
        #[test]
        fn normalize_ignores_case_and_separator_style(words in prop::collection::vec("[a-z0-9]{1,8}", 1..5)) {
            let spaced = words.join(" ").to_uppercase();
            let snake = words.join("_");
            prop_assert_eq!(normalize(&spaced), normalize(&snake));
        }
    }
}
