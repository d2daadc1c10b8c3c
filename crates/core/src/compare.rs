//! Field-level comparison of an API response against an expected record.

use serde_json::Value;

use crate::model::{Difference, Fields};

/// Compare an actual API response against the expected record.
///
/// Only keys present in `expected` are checked — extra fields in the
/// response are never flagged. Equality is strict `Value` equality
/// (type-sensitive, top-level only); a key the response lacks is reported
/// with a null actual value. Output order follows the expected record's
/// key order.
pub fn compare(expected: &Fields, actual: &Value) -> Vec<Difference> {
    let mut differences = Vec::new();

    for (field, want) in expected {
        match actual.get(field) {
            Some(got) if got == want => {}
            Some(got) => differences.push(Difference {
                field: field.clone(),
                expected: want.clone(),
                actual: got.clone(),
            }),
            None => differences.push(Difference {
                field: field.clone(),
                expected: want.clone(),
                actual: Value::Null,
            }),
        }
    }

    differences
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, Value)]) -> Fields {
        let mut map = Fields::new();
        for (key, value) in pairs {
            map.insert((*key).to_string(), value.clone());
        }
        map
    }

    #[test]
    fn equal_records_produce_no_differences() {
        let expected = fields(&[
            ("cnpj", json!("12.345.678/0001-00")),
            ("total", json!("125.00")),
            ("date", json!("2026-03-01")),
        ]);
        let actual = json!({
            "cnpj": "12.345.678/0001-00",
            "total": "125.00",
            "date": "2026-03-01",
        });

        assert!(compare(&expected, &actual).is_empty());
    }

    #[test]
    fn single_mismatch_yields_one_entry() {
        let expected = fields(&[("total", json!("125.00"))]);
        let actual = json!({"total": "120.00"});

        let diffs = compare(&expected, &actual);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].field, "total");
        assert_eq!(diffs[0].expected, json!("125.00"));
        assert_eq!(diffs[0].actual, json!("120.00"));
    }

    #[test]
    fn extra_actual_keys_are_ignored() {
        let expected = fields(&[("total", json!("125.00"))]);
        let actual = json!({
            "total": "125.00",
            "confidence": 0.98,
            "raw_text": "NOTA FISCAL",
        });

        assert!(compare(&expected, &actual).is_empty());
    }

    #[test]
    fn missing_actual_key_is_a_difference_with_null() {
        let expected = fields(&[("cnpj", json!("12.345.678/0001-00"))]);
        let actual = json!({"total": "125.00"});

        let diffs = compare(&expected, &actual);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].actual, Value::Null);
    }

    #[test]
    fn expected_null_matches_explicit_null_but_not_absence() {
        let expected = fields(&[("due_date", Value::Null)]);

        assert!(compare(&expected, &json!({"due_date": null})).is_empty());
        assert_eq!(compare(&expected, &json!({})).len(), 1);
    }

    #[test]
    fn comparison_is_type_sensitive() {
        let expected = fields(&[("total", json!(125))]);
        let actual = json!({"total": "125"});

        let diffs = compare(&expected, &actual);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].actual, json!("125"));
    }

    #[test]
    fn entries_follow_expected_key_order() {
        let expected = fields(&[
            ("zeta", json!(1)),
            ("alpha", json!(2)),
            ("mid", json!(3)),
        ]);
        let actual = json!({"alpha": 0, "mid": 0, "zeta": 0});

        let diffs = compare(&expected, &actual);
        let order: Vec<&str> = diffs.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(order, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn non_object_actual_mismatches_every_key() {
        let expected = fields(&[("a", json!(1)), ("b", json!(2))]);

        let diffs = compare(&expected, &json!("not an object"));
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(|d| d.actual == Value::Null));
    }

    // ── Property tests ──────────────────────────────────────────────

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z0-9 ]{0,12}".prop_map(Value::from),
        ]
    }

    fn record() -> impl Strategy<Value = Vec<(String, Value)>> {
        proptest::collection::vec(("[a-z_]{1,10}", scalar()), 0..8)
    }

    proptest! {
        /// An actual record that agrees on every expected key compares
        /// clean, no matter what extra keys it carries.
        #[test]
        fn agreement_plus_extras_is_clean(pairs in record(), extras in record()) {
            let mut expected = Fields::new();
            for (key, value) in &pairs {
                expected.insert(key.clone(), value.clone());
            }

            let mut actual = expected.clone();
            for (key, value) in extras {
                if !expected.contains_key(&key) {
                    actual.insert(key, value);
                }
            }

            prop_assert!(compare(&expected, &Value::Object(actual)).is_empty());
        }

        /// Every reported difference names an expected key, and no key is
        /// reported twice.
        #[test]
        fn differences_are_keyed_by_expected(pairs in record(), actual in record()) {
            let mut expected = Fields::new();
            for (key, value) in &pairs {
                expected.insert(key.clone(), value.clone());
            }
            let mut actual_map = Fields::new();
            for (key, value) in actual {
                actual_map.insert(key, value);
            }

            let diffs = compare(&expected, &Value::Object(actual_map));
            let mut seen = std::collections::HashSet::new();
            for diff in &diffs {
                prop_assert!(expected.contains_key(&diff.field));
                prop_assert!(seen.insert(diff.field.clone()));
            }
        }
    }
}
