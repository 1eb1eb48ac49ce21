use std::collections::BTreeMap;

use islcodec::{Translations, decode, encode, parse, render};
use proptest::prelude::*;

fn string_id_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z0-9_]{0,15}").expect("valid id regex")
}

/// Locale tokens of the lengths the grammar accepts: 2-3, 5-8, 10-11.
fn locale_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z_]{2,3}|[a-z_]{5,8}|[a-z_]{10,11}")
        .expect("valid locale regex")
}

/// Value text without backslash or CR (both are lexically significant),
/// possibly containing real newlines via an escaped pair of segments.
fn value_strategy() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,:;=!\\?]{0,20}")
        .expect("valid value regex");
    prop::collection::vec(segment, 1..3).prop_map(|segments| segments.join("\n"))
}

fn dataset_strategy() -> impl Strategy<Value = BTreeMap<String, BTreeMap<String, String>>> {
    prop::collection::btree_map(
        string_id_strategy(),
        prop::collection::btree_map(locale_strategy(), value_strategy(), 1..4),
        1..8,
    )
}

fn build_translations(dataset: &BTreeMap<String, BTreeMap<String, String>>) -> Translations {
    let mut translations = Translations::new();
    for (id, locales) in dataset {
        translations.declare(id.clone());
        for (locale, value) in locales {
            translations.set(id, locale.clone(), value.clone());
        }
    }
    translations
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn binary_roundtrip_preserves_map(dataset in dataset_strategy()) {
        let translations = build_translations(&dataset);
        let bytes = encode(&translations).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let decoded = decode(&bytes).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(decoded, translations);
    }

    #[test]
    fn render_parse_roundtrip_preserves_map(dataset in dataset_strategy()) {
        let translations = build_translations(&dataset);
        let source = render(&translations);
        let reparsed = parse(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(reparsed, translations);
    }

    #[test]
    fn parse_is_idempotent_across_fresh_calls(dataset in dataset_strategy()) {
        let source = render(&build_translations(&dataset));
        let first = parse(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let second = parse(&source).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(first, second);
    }

    #[test]
    fn truncated_binary_never_decodes(dataset in dataset_strategy(), cut in 1usize..16) {
        let translations = build_translations(&dataset);
        let bytes = encode(&translations).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let cut = cut.min(bytes.len().saturating_sub(6));
        if cut > 0 {
            let short = &bytes[..bytes.len() - cut];
            prop_assert!(decode(short).is_err());
        }
    }
}
