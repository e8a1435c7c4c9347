//! Unit tests for the state optics.

use rstest::rstest;
use stateflow::prelude::*;
use std::sync::Arc;

fn sample_state() -> State {
    State::new(
        Environment::new()
            .with("user", "alice".to_string())
            .with("retries", 3_u32),
    )
}

// =============================================================================
// value_view
// =============================================================================

#[rstest]
#[case::string("user", Some("alice".to_string()))]
#[case::absent("token", None)]
#[case::mismatch("retries", None)]
fn test_value_view_get(#[case] key: &str, #[case] expected: Option<String>) {
    assert_eq!(value_view::<String>(key).get(&sample_state()), expected);
}

#[rstest]
fn test_value_view_set_some_overwrites() {
    let state = value_view::<u32>("retries").set(sample_state(), Some(4));

    assert_eq!(value_view::<u32>("retries").get(&state), Some(4));
    assert_eq!(state.environment().len(), 2);
}

#[rstest]
fn test_value_view_set_none_removes() {
    let state = value_view::<String>("user").set(sample_state(), None);

    assert!(!state.environment().contains_key("user"));
    assert!(state.environment().contains_key("retries"));
}

#[rstest]
fn test_value_view_set_none_on_absent_key_keeps_state() {
    let state = sample_state();
    assert_eq!(value_view::<String>("token").set(state.clone(), None), state);
}

#[rstest]
fn test_value_view_modify() {
    let state = value_view::<u32>("retries").modify(sample_state(), |retries| {
        retries.and_then(|retries| retries.checked_sub(1))
    });

    assert_eq!(value_view::<u32>("retries").get(&state), Some(2));
}

#[rstest]
fn test_value_view_ignores_other_types_for_opaque_values() {
    let (sender, _receiver) = std::sync::mpsc::channel::<u8>();
    let handle = Arc::new(std::sync::Mutex::new(sender));
    let state = State::new(Environment::new().with_opaque("outbox", Arc::clone(&handle)));

    assert_eq!(value_view::<String>("outbox").get(&state), None);
    assert!(
        state
            .environment()
            .get("outbox")
            .and_then(|value| value.downcast::<Arc<std::sync::Mutex<std::sync::mpsc::Sender<u8>>>>())
            .is_some_and(|stored| Arc::ptr_eq(&stored, &handle))
    );
}

// =============================================================================
// Lenses
// =============================================================================

#[rstest]
fn test_environment_view_get_and_set() {
    let replacement = Environment::new().with("fresh", true);
    let state = environment_view().set(sample_state(), replacement.clone());

    assert_eq!(environment_view().get(&state), &replacement);
    assert!(state.meta().is_empty());
}

#[rstest]
fn test_meta_view_set_keeps_environment() {
    let id = MemoId::new();
    let meta = Meta::from_memos(Slots::new().with(id, 10_i64));
    let state = meta_view().set(sample_state(), meta.clone());

    assert_eq!(meta_view().get(&state), &meta);
    assert_eq!(state.environment(), sample_state().environment());
}

#[rstest]
fn test_composed_lens_reaches_memos() {
    let id = MemoId::new();
    let memos = meta_view().compose(memos_view());

    let state = memos.modify(sample_state(), |memos: Slots<MemoId>| {
        memos.with(id, "cached".to_string())
    });

    let stored: &Slots<MemoId> = memos.get(&state);
    assert!(stored.contains_key(&id));
    assert!(state.meta().contains(&id));
}

#[rstest]
fn test_hand_built_view_matches_value_view() {
    let view = environment_view()
        .compose_view(SlotView::new("retries".to_string()))
        .typed::<u32>();
    let state = sample_state();

    assert_eq!(view.get(&state), value_view::<u32>("retries").get(&state));
    assert_eq!(
        view.set(state.clone(), Some(9)),
        value_view::<u32>("retries").set(state, Some(9))
    );
}

#[rstest]
fn test_hand_built_view_matches_memo_view() {
    let id = MemoId::new();
    let view = meta_view()
        .compose(memos_view())
        .compose_view(SlotView::new(id))
        .typed::<String>();

    let state = view.set(sample_state(), Some("value".to_string()));

    assert_eq!(memo_view::<String>(id).get(&state), Some("value".to_string()));
}

// =============================================================================
// Sharing
// =============================================================================

#[rstest]
fn test_views_are_shareable_across_threads() {
    let view = value_view::<u32>("retries");
    let handles: Vec<_> = (0..4_u32)
        .map(|offset| {
            let view = view.clone();
            std::thread::spawn(move || {
                let state = view.set(sample_state(), Some(offset));
                view.get(&state)
            })
        })
        .collect();

    let mut seen: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![Some(0), Some(1), Some(2), Some(3)]);
}

#[rstest]
fn test_older_state_keeps_its_values() {
    let original = sample_state();
    let updated = value_view::<String>("user").set(original.clone(), Some("bob".to_string()));

    assert_eq!(
        value_view::<String>("user").get(&original),
        Some("alice".to_string())
    );
    assert_eq!(
        value_view::<String>("user").get(&updated),
        Some("bob".to_string())
    );
}
