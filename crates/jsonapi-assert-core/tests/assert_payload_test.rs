//! Integration tests for payload assertions against flattened response items


use chrono::{TimeZone, Utc};
use jsonapi_assert_core::{
    assert_payload, AssertOptions, Error, FailureKind, JsonType, MemberNameStyle, Registry,
    Serialized,
};
use serde::Serialize;
use serde_json::json;
use test_support::{failure_messages, post_item, post_record, post_registry};

#[test]
fn test_valid_payload_passes() {
    let registry = post_registry();
    registry
        .assert_payload("post", &post_record(), &post_item())
        .unwrap();
}

#[test]
fn test_macro_passes_for_valid_payload() {
    let registry = post_registry();
    assert_payload!(registry, "post", &post_record(), &post_item());
}

#[test]
#[should_panic(expected = "JSON payload contained unexpected key 'foo'")]
fn test_macro_panics_with_report() {
    let registry = post_registry();
    let mut item = post_item();
    item["foo"] = json!("bar");
    assert_payload!(registry, "post", &post_record(), &item, AssertOptions::default());
}

#[test]
fn test_macro_applies_customization() {
    let registry = post_registry();
    let mut item = post_item();
    item["foo"] = json!("bar");
    assert_payload!(
        registry,
        "post",
        &post_record(),
        &item,
        AssertOptions::default(),
        |p| {
            p.key("foo").produce(|_| Ok(json!("bar")));
        }
    );
    assert!(!registry.fetch("post").unwrap().has_key("foo"));
}

#[test]
#[should_panic(expected = "Expected JSON payload to NOT have key 'description' but was present")]
fn test_macro_customization_failure_panics() {
    let registry = post_registry();
    assert_payload!(
        registry,
        "post",
        &post_record(),
        &post_item(),
        AssertOptions::default(),
        |p| {
            p.no_key("description");
        }
    );
}

#[test]
fn test_value_mismatch_message() {
    let registry = post_registry();
    let mut record = post_record();
    record["title"] = json!("foo");
    let mut item = post_item();
    item["first_title_letter"] = json!("f");

    let messages = failure_messages(registry.assert_payload("post", &record, &item));
    assert_eq!(
        messages,
        vec!["Expected JSON payload to have key 'title' == \"foo\" but was \"post title\""]
    );
}

// Scenario A: right value, wrong wire type
#[test]
fn test_type_mismatch_names_key_and_types() {
    let registry = post_registry();
    let mut record = post_record();
    record["views"] = json!("100");
    let mut item = post_item();
    item["views"] = json!("100");

    let messages = failure_messages(registry.assert_payload("post", &record, &item));
    assert_eq!(
        messages,
        vec!["Expected JSON payload key 'views' to have type Integer but was String"]
    );
}

#[test]
fn test_any_of_types_via_customization() {
    let registry = post_registry();
    let options = AssertOptions::default();

    for value in [json!(false), json!(true)] {
        let mut record = post_record();
        record["is_foo"] = value.clone();
        let mut item = post_item();
        item["is_foo"] = value;
        registry
            .assert_payload_with("post", &record, &item, &options, |p| {
                p.key("is_foo").of_type([JsonType::Boolean]);
            })
            .unwrap();
    }

    let mut record = post_record();
    record["is_foo"] = json!("true");
    let mut item = post_item();
    item["is_foo"] = json!("true");
    let messages = failure_messages(registry.assert_payload_with(
        "post",
        &record,
        &item,
        &options,
        |p| {
            p.key("is_foo").of_type([JsonType::Boolean, JsonType::Null]);
        },
    ));
    assert_eq!(
        messages,
        vec!["Expected JSON payload key 'is_foo' to have type [Boolean, Null] but was String"]
    );
}

#[test]
fn test_timestamps_compare_in_wire_form() {
    #[derive(Serialize)]
    struct Post {
        title: String,
        description: String,
        views: u32,
        created_at: chrono::DateTime<Utc>,
        updated_at: chrono::DateTime<Utc>,
    }

    let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
    let post = Post {
        title: "post title".to_string(),
        description: "post description".to_string(),
        views: 100,
        created_at: at,
        updated_at: at,
    };

    let mut registry = Registry::new();
    registry.register("post_with_timestamps", |p| {
        p.key("title");
        p.key("description");
        p.key("views");
        p.timestamps();
    });

    let mut item = post_item();
    item.as_object_mut().unwrap().remove("first_title_letter");
    item["created_at"] = json!("2024-05-01T10:30:00Z");
    item["updated_at"] = json!("2024-05-01T10:30:00Z");

    let record = Serialized::new(&post).unwrap();
    registry
        .assert_payload("post_with_timestamps", &record, &item)
        .unwrap();
}

#[test]
fn test_produce_serialized_timestamp() {
    let mut registry = Registry::new();
    registry.register("event", |p| {
        p.key("starts_at")
            .of_type(JsonType::Timestamp)
            .produce_serialized(|_| Ok(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()));
    });

    let item = json!({"id": "9", "starts_at": "2024-01-02T03:04:05Z"});
    registry.assert_payload("event", &json!({}), &item).unwrap();
}

#[test]
fn test_nil_value_fails_with_hint() {
    let registry = post_registry();
    let mut item = post_item();
    item["title"] = json!(null);

    let messages = failure_messages(registry.assert_payload("post", &post_record(), &item));
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Expected JSON payload to have key 'title' but was nil"));
}

// Scenario B: allow_nil accepts null without further checks
#[test]
fn test_allow_nil_passes() {
    let mut registry = post_registry();
    registry.register("post_with_nil_title", |p| {
        p.key("title").allow_nil();
        p.key("description");
        p.key("views");
        p.key("first_title_letter").produce(|_| Ok(json!("p")));
    });

    let mut item = post_item();
    item["title"] = json!(null);
    registry
        .assert_payload("post_with_nil_title", &post_record(), &item)
        .unwrap();
}

#[test]
fn test_missing_key_message() {
    let registry = post_registry();
    let mut item = post_item();
    item.as_object_mut().unwrap().remove("title");

    let messages = failure_messages(registry.assert_payload("post", &post_record(), &item));
    assert_eq!(
        messages,
        vec!["Expected JSON payload to have key 'title' but was not present"]
    );
}

// Scenario C: exactly one unexpected-key failure
#[test]
fn test_unexpected_key_reported_once() {
    let mut registry = Registry::new();
    registry.register("pair", |p| {
        p.key("a");
        p.key("b");
    });

    let record = json!({"a": 1, "b": 2});
    let item = json!({"id": "1", "jsonapi_type": "pairs", "a": 1, "b": 2, "c": 3});
    let result = registry.assert_payload("pair", &record, &item);
    let failure = result.unwrap_err();
    let failure = failure.as_assertion_failure().unwrap();
    assert_eq!(failure.len(), 1);
    assert_eq!(failure.failures[0].kind, FailureKind::UnexpectedKey);
    assert_eq!(failure.failures[0].member_name, "c");
}

#[test]
fn test_unexpected_key_equal_to_id_still_fails() {
    let mut registry = Registry::new();
    registry.register("thing", |p| {
        p.key("name");
    });
    let item = json!({"id": "1", "name": "x", "foo": "1"});
    let messages = failure_messages(registry.assert_payload("thing", &json!({"name": "x"}), &item));
    assert_eq!(messages, vec!["JSON payload contained unexpected key 'foo'"]);
}

// Scenario D: schema-wide hyphen style
#[test]
fn test_hyphen_style_schema_wide() {
    let record = json!({"first_name": "First Name", "last_name": "Last Name"});
    let item = json!({"id": "1", "first-name": "First Name", "last-name": "Last Name"});

    let mut registry = Registry::new();
    registry.register("all_hyphens_object", |p| {
        p.member_name_style(MemberNameStyle::Hyphen);
        p.key("first_name");
        p.key("last_name");
    });
    registry
        .assert_payload("all_hyphens_object", &record, &item)
        .unwrap();

    registry.register("all_hyphens_object", |p| {
        p.key("first_name");
        p.key("last_name");
    });
    let messages = failure_messages(registry.assert_payload("all_hyphens_object", &record, &item));
    assert_eq!(messages.len(), 4);
    assert!(messages.contains(&"JSON payload contained unexpected key 'first-name'".to_string()));
}

#[test]
fn test_per_key_styles() {
    let record = json!({"first_name": "First Name", "last_name": "Last Name"});
    let mut registry = Registry::new();
    registry.register("some_hyphens_object", |p| {
        p.key("first_name");
        p.key("last_name").member_name_style(MemberNameStyle::Hyphen);
    });
    registry.register("all_titleized_object", |p| {
        p.member_name_style(MemberNameStyle::Titleize);
        p.key("first_name");
        p.key("last_name");
    });
    registry.register("some_titleized_object", |p| {
        p.key("first_name");
        p.key("last_name").member_name_style(MemberNameStyle::Titleize);
    });

    registry
        .assert_payload(
            "some_hyphens_object",
            &record,
            &json!({"first_name": "First Name", "last-name": "Last Name"}),
        )
        .unwrap();
    registry
        .assert_payload(
            "all_titleized_object",
            &record,
            &json!({"First Name": "First Name", "Last Name": "Last Name"}),
        )
        .unwrap();
    registry
        .assert_payload(
            "some_titleized_object",
            &record,
            &json!({"first_name": "First Name", "Last Name": "Last Name"}),
        )
        .unwrap();
}

#[test]
fn test_dasherized_option() {
    let mut registry = Registry::new();
    registry.register("person", |p| {
        p.key("first_name");
    });
    let record = json!({"first_name": "Jane"});
    let item = json!({"first-name": "Jane"});

    registry
        .assert_payload_with_options("person", &record, &item, &AssertOptions::new().dasherized())
        .unwrap();
    assert!(registry.assert_payload("person", &record, &item).is_err());
}

#[test]
fn test_unknown_payload_is_configuration_error() {
    let registry = post_registry();
    let err = registry
        .assert_payload("asdf", &post_record(), &post_item())
        .unwrap_err();
    assert!(!err.is_assertion_failure());
    assert_eq!(err.to_string(), "No payloads registered for 'asdf'");
}

#[test]
fn test_customization_is_isolated() {
    let registry = post_registry();
    let mut item = post_item();
    item["title"] = json!("POST TITLE");

    assert!(registry.assert_payload("post", &post_record(), &item).is_err());

    registry
        .assert_payload_with("post", &post_record(), &item, &AssertOptions::default(), |p| {
            p.key("title").produce(|record| {
                let title = record.fetch("title")?;
                Ok(json!(title.as_str().unwrap_or_default().to_uppercase()))
            });
        })
        .unwrap();

    assert!(registry.assert_payload("post", &post_record(), &item).is_err());
}

#[test]
fn test_no_key_customization() {
    let registry = post_registry();
    let result = registry.assert_payload_with(
        "post",
        &post_record(),
        &post_item(),
        &AssertOptions::default(),
        |p| {
            p.no_key("title");
        },
    );
    let messages = failure_messages(result);
    assert!(messages
        .contains(&"Expected JSON payload to NOT have key 'title' but was present".to_string()));
}

#[test]
fn test_no_key_passes_when_absent_or_null() {
    let mut registry = Registry::new();
    registry.register("user", |p| {
        p.key("name");
        p.no_key("password");
    });
    let record = json!({"name": "n"});
    registry
        .assert_payload("user", &record, &json!({"name": "n"}))
        .unwrap();

    let messages = failure_messages(registry.assert_payload(
        "user",
        &record,
        &json!({"name": "n", "password": null}),
    ));
    assert_eq!(messages, vec!["JSON payload contained unexpected key 'password'"]);
}

#[test]
fn test_failures_reported_in_declaration_order() {
    let mut registry = Registry::new();
    registry.register("post", |p| {
        p.key("title");
        p.key("views").of_type(JsonType::Integer);
        p.no_key("secret");
    });

    let record = json!({"title": "t", "views": 1});
    let item = json!({"views": "1", "secret": "s"});
    let err = registry.assert_payload("post", &record, &item).unwrap_err();
    let failure = err.as_assertion_failure().unwrap();
    let kinds: Vec<FailureKind> = failure.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![
            FailureKind::MissingKey,
            FailureKind::ValueMismatch,
            FailureKind::TypeMismatch,
            FailureKind::ForbiddenKey,
            FailureKind::UnexpectedKey,
        ]
    );
    assert!(err
        .to_string()
        .starts_with("Got 5 failures from failure aggregation block \"payload has correct key/values\":"));
}

#[test]
fn test_producer_error_aborts() {
    let mut registry = Registry::new();
    registry.register("post", |p| {
        p.key("score")
            .produce(|_| Err(Error::producer("score", "score service unavailable")));
    });
    let err = registry
        .assert_payload("post", &json!({}), &json!({"score": 1}))
        .unwrap_err();
    assert!(matches!(err, Error::Producer { .. }));
}
