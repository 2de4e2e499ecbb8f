use super::{EchoResult, Message, MessageStore};
use std::collections::HashSet;
use std::sync::Arc;

#[test]
fn test_store_new() {
    let store = MessageStore::new();
    assert!(store.is_empty());
    assert!(store.list().is_empty());
}

#[test]
fn test_create_assigns_sequential_ids() {
    let store = MessageStore::new();
    let first = store.create("hello");
    let second = store.create("world");

    assert_eq!(first.id, "1");
    assert_eq!(second.id, "2");
    assert_eq!(first.text, "hello");
    assert_eq!(store.len(), 2);
}

#[test]
fn test_create_accepts_empty_text() {
    let store = MessageStore::new();
    let msg = store.create("");
    assert_eq!(msg.text, "");
    assert_eq!(store.get(&msg.id), Some(msg));
}

#[test]
fn test_created_at_is_rfc3339() {
    let store = MessageStore::new();
    let msg = store.create("time");
    assert!(chrono::DateTime::parse_from_rfc3339(&msg.created_at).is_ok());
    assert!(msg.created_at.ends_with('Z'));
}

#[test]
fn test_get_returns_created_message() {
    let store = MessageStore::new();
    let msg = store.create("read your write");
    let fetched = store.get(&msg.id).unwrap();
    assert_eq!(fetched.text, "read your write");
    assert_eq!(fetched, msg);
}

#[test]
fn test_get_unknown_id_is_none() {
    let store = MessageStore::new();
    store.create("only one");

    assert!(store.get("2").is_none());
    assert!(store.get("0").is_none());
    assert!(store.get("01").is_none());
    assert!(store.get("abc").is_none());
    assert!(store.get("").is_none());
}

#[test]
fn test_list_is_in_insertion_order() {
    let store = MessageStore::new();
    for i in 0..12 {
        store.create(format!("msg-{i}"));
    }

    let listed = store.list();
    assert_eq!(listed.len(), 12);
    let ids: Vec<String> = listed.iter().map(|m| m.id.clone()).collect();
    let expected: Vec<String> = (1..=12).map(|i| i.to_string()).collect();
    assert_eq!(ids, expected);
    assert_eq!(listed[10].text, "msg-10");
}

#[test]
fn test_concurrent_create_ids_are_unique_and_contiguous() {
    let store = Arc::new(MessageStore::new());
    let threads = 8;
    let per_thread = 50;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let store = store.clone();
            std::thread::spawn(move || {
                (0..per_thread)
                    .map(|i| store.create(format!("{t}-{i}")))
                    .collect::<Vec<Message>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for msg in handle.join().unwrap() {
            assert!(ids.insert(msg.id.parse::<u64>().unwrap()));
        }
    }

    let total = (threads * per_thread) as u64;
    assert_eq!(ids.len() as u64, total);
    assert_eq!(ids, (1..=total).collect::<HashSet<_>>());
    assert_eq!(store.list().len() as u64, total);
}

#[test]
fn test_echo_result_serialization_omits_absent_field() {
    let ok = serde_json::to_value(EchoResult::success("done")).unwrap();
    assert_eq!(ok, serde_json::json!({ "message": "done" }));

    let err = EchoResult::failure("nope");
    assert!(!err.is_success());
    assert_eq!(
        serde_json::to_value(err).unwrap(),
        serde_json::json!({ "error": "nope" })
    );
}

#[test]
fn test_message_serializes_created_at_in_camel_case() {
    let store = MessageStore::new();
    let msg = store.create("json");
    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["id"], "1");
    assert_eq!(value["text"], "json");
    assert!(value.get("createdAt").is_some());
}
