use numeric_input_rs::{sanitize, sanitize_text, validate, NumericInputConfig, OutcomeKind};
use proptest::prelude::*;

fn digit_groups(text: &str, separator: char) -> (usize, usize) {
    match text.split_once(separator) {
        Some((pre, post)) => (pre.len(), post.len()),
        None => (text.len(), 0),
    }
}

fn config_strategy() -> impl Strategy<Value = NumericInputConfig> {
    (
        prop_oneof![Just('.'), Just(','), Just('|')],
        any::<bool>(),
        0usize..8,
        0usize..5,
    )
        .prop_map(|(sep, allowed, pre, post)| {
            NumericInputConfig::default()
                .with_separator(sep)
                .unwrap()
                .with_separator_allowed(allowed)
                .with_max_integer_digits(pre)
                .with_max_fraction_digits(post)
        })
}

// Mostly field-like text with the odd stray character
fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9.,|a-z -]{0,24}").unwrap()
}

proptest! {
    #[test]
    fn sanitize_is_idempotent(raw in text_strategy(), config in config_strategy()) {
        let once = sanitize_text(&raw, &config);
        let twice = sanitize(&once, &config);
        prop_assert!(!twice.was_modified);
        prop_assert_eq!(twice.sanitized, once);
    }

    #[test]
    fn digit_groups_respect_caps(raw in text_strategy(), config in config_strategy()) {
        let out = sanitize_text(&raw, &config);
        let (pre, post) = digit_groups(&out, config.separator());
        prop_assert!(pre <= config.max_integer_digits());
        prop_assert!(post <= config.max_fraction_digits());
    }

    #[test]
    fn at_most_one_separator(raw in text_strategy(), config in config_strategy()) {
        let out = sanitize_text(&raw, &config);
        let count = out.chars().filter(|c| *c == config.separator()).count();
        if config.separator_allowed() {
            prop_assert!(count <= 1);
        } else {
            prop_assert_eq!(count, 0);
        }
    }

    #[test]
    fn only_digits_and_separator(raw in ".{0,24}", config in config_strategy()) {
        let out = sanitize_text(&raw, &config);
        prop_assert!(out.chars().all(|c| c.is_ascii_digit() || c == config.separator()));
    }

    #[test]
    fn length_grows_by_at_most_inserted_zero(raw in text_strategy(), config in config_strategy()) {
        let out = sanitize_text(&raw, &config);
        let (raw_len, out_len) = (raw.chars().count(), out.chars().count());
        prop_assert!(out_len <= raw_len + 1);
        if !out.starts_with('0') {
            prop_assert!(out_len <= raw_len);
        }
    }

    #[test]
    fn classification_is_complete(value in -1.0e6f64..1.0e6, min in -1.0e3f64..1.0e3, span in 0.0f64..1.0e4) {
        let config = NumericInputConfig::default().with_bounds(min, min + span);
        let outcomes = validate(value, &config);

        let first = outcomes[0].kind();
        prop_assert!(matches!(first, OutcomeKind::BelowMin | OutcomeKind::AboveMax | OutcomeKind::Ok));

        let violated = first != OutcomeKind::Ok;
        prop_assert_eq!(outcomes.len(), if violated { 2 } else { 1 });
        if violated {
            prop_assert_eq!(outcomes[1].kind(), OutcomeKind::RangeViolation);
        }
    }
}
