//! Integration tests for the validation engine and the binding adapter
//!
//! These tests verify that:
//! - Only declared fields reach the cleaned parameters
//! - Required, type and rule errors are reported as data, in order
//! - A validator runs at most once per request cache
//! - Unknown validators are setup errors, not validation results

use axum::http::StatusCode;
use params::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;

fn raw(value: Value) -> RawInput {
    value.as_object().cloned().expect("raw input must be an object")
}

fn fancy_registry() -> ValidatorRegistry {
    ValidatorRegistry::new()
        .with(
            define_validator!("create_fancy_resource", {
                user_id: Integer [required],
                fancy_name: String [required],
            })
            .unwrap(),
        )
        .unwrap()
}

fn error_pairs(result: &ValidationResult) -> Vec<(String, String)> {
    result
        .errors()
        .iter()
        .map(|e| (e.field.clone(), e.message.clone()))
        .collect()
}

// =============================================================================
// Engine
// =============================================================================

mod engine_tests {
    use super::*;

    #[test]
    fn test_missing_required_user_id() {
        let registry = fancy_registry();
        let def = registry.resolve("create_fancy_resource").unwrap();
        let result = def.validate(&raw(json!({ "fancy_name": "abc" })));

        assert_eq!(
            error_pairs(&result),
            vec![("user_id".to_string(), "required".to_string())]
        );
    }

    #[test]
    fn test_valid_input_is_coerced_and_filtered() {
        let registry = fancy_registry();
        let def = registry.resolve("create_fancy_resource").unwrap();
        let result = def.validate(&raw(
            json!({ "user_id": "5", "fancy_name": "abc", "extra": "x" }),
        ));

        let ValidationResult::Valid { cleaned } = result else {
            panic!("expected Valid");
        };
        assert_eq!(
            serde_json::to_value(&cleaned).unwrap(),
            json!({ "user_id": 5, "fancy_name": "abc" })
        );
    }

    #[test]
    fn test_uncoercible_user_id() {
        let registry = fancy_registry();
        let def = registry.resolve("create_fancy_resource").unwrap();
        let result = def.validate(&raw(json!({ "user_id": "abc", "fancy_name": "x" })));

        assert_eq!(
            error_pairs(&result),
            vec![("user_id".to_string(), "invalid type".to_string())]
        );
    }

    #[test]
    fn test_required_error_does_not_hide_other_fields() {
        let def = define_validator!("signup", {
            email: String [required, email],
            age: Integer [required, min_value(18.0)],
            nickname: String [string_length(2, 20)],
        })
        .unwrap();

        let result = def.validate(&raw(json!({ "age": "12", "nickname": "x" })));
        assert_eq!(
            error_pairs(&result),
            vec![
                ("email".to_string(), "required".to_string()),
                ("age".to_string(), "must be at least 18".to_string()),
                (
                    "nickname".to_string(),
                    "length must be between 2 and 20".to_string()
                ),
            ]
        );

        let required: Vec<_> = result
            .errors()
            .iter()
            .filter(|e| e.field == "email")
            .collect();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0].kind, FieldErrorKind::Required);
    }

    #[test]
    fn test_cleaned_keys_match_present_declared_fields() {
        let def = define_validator!("profile", {
            name: String [],
            age: Integer [],
            active: Boolean [],
            joined_at: DateTime [],
        })
        .unwrap();

        let inputs = [
            json!({}),
            json!({ "name": "Ann" }),
            json!({ "age": 3, "unknown": true }),
            json!({ "active": "yes", "joined_at": "2024-01-15T10:00:00Z", "x": 1 }),
        ];

        for input in inputs {
            let input = raw(input);
            let result = def.validate(&input);
            let cleaned = result.cleaned().expect("all fields optional and well-typed");

            let mut expected: Vec<&str> = input
                .keys()
                .map(String::as_str)
                .filter(|k| def.field(k).is_some())
                .collect();
            let mut actual: Vec<&str> = cleaned.fields().collect();
            expected.sort_unstable();
            actual.sort_unstable();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_validate_twice_same_result() {
        let registry = fancy_registry();
        let def = registry.resolve("create_fancy_resource").unwrap();
        let input = raw(json!({ "user_id": "7", "fancy_name": "abc" }));
        assert_eq!(def.validate(&input), def.validate(&input));
    }

    #[test]
    fn test_cleaned_params_build_domain_object() {
        #[derive(Debug, Deserialize)]
        struct NewFancy {
            user_id: i64,
            fancy_name: String,
        }

        let registry = fancy_registry();
        let result = registry
            .resolve("create_fancy_resource")
            .unwrap()
            .validate(&raw(json!({ "user_id": "42", "fancy_name": "abc" })));
        let fancy: NewFancy = result.cleaned().unwrap().deserialize().unwrap();
        assert_eq!(fancy.user_id, 42);
        assert_eq!(fancy.fancy_name, "abc");
    }
}

// =============================================================================
// Adapter
// =============================================================================

mod adapter_tests {
    use super::*;

    #[test]
    fn test_bind_same_name_returns_identical_result() {
        let registry = fancy_registry();
        let mut cache = RequestCache::new();
        let input = raw(json!({ "user_id": "1", "fancy_name": "abc" }));

        let first = resolve("create_fancy_resource", &input, &registry, &mut cache).unwrap();
        let second = resolve("create_fancy_resource", &input, &registry, &mut cache).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cached_result_wins_over_new_input() {
        let registry = fancy_registry();
        let mut cache = RequestCache::new();

        let rejected = bind("create_fancy_resource", &RawInput::new(), &registry, &mut cache).unwrap();
        assert!(!rejected.is_proceed());

        let still_rejected = bind(
            "create_fancy_resource",
            &raw(json!({ "user_id": "1", "fancy_name": "abc" })),
            &registry,
            &mut cache,
        )
        .unwrap();
        assert_eq!(rejected, still_rejected);
    }

    #[test]
    fn test_reject_carries_400_and_errors_body() {
        let registry = fancy_registry();
        let mut cache = RequestCache::new();
        let outcome = registry
            .bind(
                "create_fancy_resource",
                &raw(json!({ "user_id": "abc" })),
                &mut cache,
            )
            .unwrap();

        let BindOutcome::Reject { status_code, body } = outcome else {
            panic!("expected Reject");
        };
        assert_eq!(status_code, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "errors": [
                    { "field": "user_id", "message": "invalid type" },
                    { "field": "fancy_name", "message": "required" }
                ]
            })
        );
    }

    #[test]
    fn test_unknown_validator() {
        let registry = fancy_registry();
        let mut cache = RequestCache::new();
        let err = bind("destroy_everything", &RawInput::new(), &registry, &mut cache).unwrap_err();

        assert!(matches!(err, ConfigError::UnknownValidator { ref name } if name == "destroy_everything"));
        let err: ParamsError = err.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_separate_caches_validate_separately() {
        let registry = fancy_registry();
        let mut first_request = RequestCache::new();
        let mut second_request = RequestCache::new();

        let a = bind("create_fancy_resource", &RawInput::new(), &registry, &mut first_request).unwrap();
        let b = bind(
            "create_fancy_resource",
            &raw(json!({ "user_id": 1, "fancy_name": "abc" })),
            &registry,
            &mut second_request,
        )
        .unwrap();

        assert!(!a.is_proceed());
        assert!(b.is_proceed());
    }
}
