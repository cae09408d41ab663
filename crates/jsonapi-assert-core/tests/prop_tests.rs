//! Property-based tests for payload declarations, matching and sanitizing
//!
//! These tests verify invariants that must hold for any key names, values
//! and relationship graphs, not just the hand-picked fixtures.

use jsonapi_assert_core::matchers::{match_type, values_match};
use jsonapi_assert_core::string_helpers::{dasherize, underscore};
use jsonapi_assert_core::{sanitize, JsonType, Payload, Registry, TypeConstraint};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Strategy for snake_case attribute names
fn key_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}(_[a-z0-9]{1,6}){0,3}"
}

/// Strategy for leaf JSON values
fn leaf_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e6f64..1.0e6).prop_filter("non-integral", |f| f.fract() != 0.0).prop_map(|f| json!(f)),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ]
}

/// Strategy for a non-null type tag that `JsonType::of` can report
fn runtime_type_strategy() -> impl Strategy<Value = JsonType> {
    prop_oneof![
        Just(JsonType::Null),
        Just(JsonType::Boolean),
        Just(JsonType::Integer),
        Just(JsonType::Float),
        Just(JsonType::String),
    ]
}

/// Strategy for one related resource with a small id space so duplicates occur
fn related_strategy() -> impl Strategy<Value = Value> {
    (0u8..4, prop_oneof![Just("people"), Just("tags")]).prop_map(|(id, resource_type)| {
        json!({"id": id.to_string(), "type": resource_type, "name": format!("{}-{}", resource_type, id)})
    })
}

proptest! {
    #[test]
    fn prop_key_and_no_key_exclusive(
        name in key_name_strategy(),
        ops in proptest::collection::vec(any::<bool>(), 1..10),
    ) {
        let mut payload = Payload::new("thing");
        for declare_key in &ops {
            if *declare_key {
                payload.key(name.as_str());
            } else {
                payload.no_key(name.as_str());
            }
        }

        let last_was_key = *ops.last().unwrap();
        prop_assert_eq!(payload.has_key(&name), last_was_key);
        prop_assert_eq!(payload.has_no_key(&name), !last_was_key);
        prop_assert!(payload.keys().len() + payload.no_keys().len() == 1);
    }

    #[test]
    fn prop_type_constraint_is_or(
        value in leaf_value_strategy(),
        a in runtime_type_strategy(),
        b in runtime_type_strategy(),
    ) {
        let constraint = TypeConstraint::from([a, b]);
        let actual = JsonType::of(&value);
        let passes = match_type("k", &value, &constraint).is_ok();
        prop_assert_eq!(passes, actual == a || actual == b);
    }

    #[test]
    fn prop_values_match_is_reflexive(value in leaf_value_strategy()) {
        prop_assert!(values_match(&value, &value));
    }

    #[test]
    fn prop_matching_item_always_passes(
        attributes in proptest::collection::btree_map(key_name_strategy(), leaf_value_strategy(), 1..6),
    ) {
        prop_assume!(!attributes.contains_key("id") && !attributes.contains_key("jsonapi_type"));
        let mut registry = Registry::new();
        registry.register("thing", |p| {
            for (name, value) in &attributes {
                p.key(name.as_str()).set_allow_nil(value.is_null());
            }
        });

        let record: Map<String, Value> = attributes.clone().into_iter().collect();
        let mut item = record.clone();
        item.insert("id".to_string(), json!("1"));
        item.insert("jsonapi_type".to_string(), json!("things"));

        prop_assert!(registry.assert_payload("thing", &record, &Value::Object(item)).is_ok());
    }

    #[test]
    fn prop_undeclared_member_always_flagged(
        name in key_name_strategy(),
        value in leaf_value_strategy(),
    ) {
        prop_assume!(name != "id" && name != "jsonapi_type");
        let mut registry = Registry::new();
        registry.register("empty", |_| {});

        let mut item = Map::new();
        item.insert(name.clone(), value);
        let err = registry
            .assert_payload("empty", &json!({}), &Value::Object(item))
            .unwrap_err();
        let failure = err.as_assertion_failure().unwrap();
        prop_assert_eq!(failure.len(), 1);
        prop_assert_eq!(&failure.failures[0].member_name, &name);
    }

    #[test]
    fn prop_dasherize_round_trips(name in key_name_strategy()) {
        let dashed = dasherize(&name);
        prop_assert!(!dashed.contains('_'));
        prop_assert_eq!(underscore(&dashed), name);
    }

    #[test]
    fn prop_sanitizer_included_is_distinct_union(
        single in related_strategy(),
        many in proptest::collection::vec(related_strategy(), 0..8),
    ) {
        let input = json!({
            "type": "posts",
            "relationships": {"author": single.clone(), "tags": many.clone()}
        });
        let doc = sanitize(&input).unwrap();

        let included = doc["included"].as_array().unwrap();
        for (i, resource) in included.iter().enumerate() {
            prop_assert!(!included[i + 1..].contains(resource));
        }

        let mut expected_ids: Vec<(String, String)> = std::iter::once(&single)
            .chain(many.iter())
            .map(|r| (r["type"].as_str().unwrap().to_string(), r["id"].as_str().unwrap().to_string()))
            .collect();
        expected_ids.sort();
        expected_ids.dedup();

        let mut included_ids: Vec<(String, String)> = included
            .iter()
            .map(|r| (r["type"].as_str().unwrap().to_string(), r["id"].as_str().unwrap().to_string()))
            .collect();
        included_ids.sort();
        prop_assert_eq!(included_ids, expected_ids);

        let tags = doc["data"]["relationships"]["tags"]["data"].as_array().unwrap();
        prop_assert_eq!(tags.len(), many.len());
        prop_assert!(doc["data"]["relationships"]["author"]["data"].is_object());
    }
}
