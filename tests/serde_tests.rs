#![cfg(feature = "serde")]

//! Integration tests for serde support in stateflow.

use rstest::rstest;
use stateflow::state::MemoId;

#[rstest]
fn test_memo_id_serializes_as_hyphenated_uuid() {
    let id = MemoId::new();

    let json = serde_json::to_string(&id).unwrap();

    assert_eq!(json, format!("\"{id}\""));
}

#[rstest]
fn test_memo_id_json_roundtrip() {
    let id = MemoId::new();

    let json = serde_json::to_string(&id).unwrap();
    let restored: MemoId = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, id);
}

#[rstest]
fn test_memo_id_rejects_malformed_input() {
    assert!(serde_json::from_str::<MemoId>("\"not-a-uuid\"").is_err());
}
