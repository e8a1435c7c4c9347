//! Tests for the state access computations.

use rstest::rstest;
use stateflow::prelude::*;

fn request_state() -> State {
    State::new(
        Environment::new()
            .with("method", "GET".to_string())
            .with("path", "/users/7".to_string())
            .with("attempt", 1_u32),
    )
}

// =============================================================================
// Whole-state access
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_state_produces_current_state() {
    let state = request_state();
    let (value, final_state) = Computation::<State>::state().run(state.clone()).await.unwrap();

    assert_eq!(value, state);
    assert_eq!(final_state, state);
}

#[rstest]
#[tokio::test]
async fn test_put_state_replaces_state() {
    let replacement = State::new(Environment::new().with("fresh", true));

    let final_state = Computation::<()>::put_state(replacement.clone())
        .exec(request_state())
        .await
        .unwrap();

    assert_eq!(final_state, replacement);
}

#[rstest]
#[tokio::test]
async fn test_modify_state_rewrites_environment() {
    let computation: Computation<()> = Computation::modify_state(|state: State| {
        let environment = state.environment().clone().remove("path");
        state.with_environment(environment)
    });

    let final_state = computation.exec(request_state()).await.unwrap();

    assert!(!final_state.environment().contains_key("path"));
    assert!(final_state.environment().contains_key("method"));
}

// =============================================================================
// Views
// =============================================================================

#[rstest]
#[case::present("method", Some("GET".to_string()))]
#[case::absent("body", None)]
#[case::wrong_type("attempt", None)]
#[tokio::test]
async fn test_read_through_value_view(#[case] key: &str, #[case] expected: Option<String>) {
    let computation: Computation<Option<String>> = Computation::read(value_view::<String>(key));
    let state = request_state();

    let (value, final_state) = computation.run(state.clone()).await.unwrap();

    assert_eq!(value, expected);
    assert_eq!(final_state, state);
}

#[rstest]
#[tokio::test]
async fn test_write_inserts_and_overwrites() {
    let computation: Computation<()> = Computation::write(value_view("attempt"), Some(2_u32))
        .combine(Computation::write(value_view("user"), Some("alice".to_string())));

    let state = computation.exec(request_state()).await.unwrap();

    assert_eq!(value_view::<u32>("attempt").get(&state), Some(2));
    assert_eq!(
        value_view::<String>("user").get(&state),
        Some("alice".to_string())
    );
}

#[rstest]
#[tokio::test]
async fn test_write_none_removes_key() {
    let computation: Computation<()> = Computation::write(value_view::<String>("path"), None);

    let state = computation.exec(request_state()).await.unwrap();

    assert!(!state.environment().contains_key("path"));
    assert_eq!(state.environment().len(), 2);
}

#[rstest]
#[tokio::test]
async fn test_write_can_change_the_stored_type() {
    let computation: Computation<()> = Computation::write(value_view("attempt"), Some("second"));

    let state = computation.exec(request_state()).await.unwrap();

    assert_eq!(value_view::<u32>("attempt").get(&state), None);
    assert_eq!(value_view::<&str>("attempt").get(&state), Some("second"));
}

#[rstest]
#[tokio::test]
async fn test_update_increments() {
    let increment: Computation<()> = Computation::update(value_view::<u32>("attempt"), |attempt| {
        attempt.map(|attempt| attempt + 1)
    });

    let state = increment
        .clone()
        .combine(increment)
        .exec(request_state())
        .await
        .unwrap();

    assert_eq!(value_view::<u32>("attempt").get(&state), Some(3));
}

#[rstest]
#[tokio::test]
async fn test_update_returning_none_removes() {
    let computation: Computation<()> =
        Computation::update(value_view::<String>("method"), |_| None);

    let state = computation.exec(request_state()).await.unwrap();

    assert!(!state.environment().contains_key("method"));
}

#[rstest]
#[tokio::test]
async fn test_writes_do_not_touch_the_input_state() {
    let original = request_state();
    let computation: Computation<()> = Computation::write(value_view("path"), Some("/".to_string()));

    let updated = computation.exec(original.clone()).await.unwrap();

    assert_eq!(original, request_state());
    assert_ne!(updated, original);
}

// =============================================================================
// require
// =============================================================================

#[rstest]
#[tokio::test]
async fn test_require_present_value() {
    let computation: Computation<String, StateError> = Computation::require("path");
    assert_eq!(
        computation.eval(request_state()).await,
        Ok("/users/7".to_string())
    );
}

#[rstest]
#[tokio::test]
async fn test_require_missing_value() {
    let computation: Computation<String, StateError> = Computation::require("body");
    assert_eq!(
        computation.eval(request_state()).await,
        Err(StateError::MissingValue {
            key: "body".to_string()
        })
    );
}

#[rstest]
#[tokio::test]
async fn test_require_type_mismatch() {
    let computation: Computation<String, StateError> = Computation::require("attempt");

    let error = computation.eval(request_state()).await.unwrap_err();

    assert_eq!(
        error,
        StateError::TypeMismatch {
            key: "attempt".to_string(),
            expected: std::any::type_name::<String>(),
            found: std::any::type_name::<u32>(),
        }
    );
}

#[rstest]
#[tokio::test]
async fn test_require_with_boxed_fault() {
    let computation: Computation<u32> = Computation::require("missing");

    let error = computation.eval(request_state()).await.unwrap_err();

    assert_eq!(
        error.downcast_ref::<StateError>(),
        Some(&StateError::MissingValue {
            key: "missing".to_string()
        })
    );
    assert_eq!(error.to_string(), "no value stored under key `missing`");
}

#[rstest]
#[tokio::test]
async fn test_require_in_chain() {
    let computation: Computation<String> = Computation::require("method")
        .map2(Computation::require("path"), |method: String, path: String| {
            format!("{method} {path}")
        });

    assert_eq!(
        computation.eval(request_state()).await.unwrap(),
        "GET /users/7"
    );
}
