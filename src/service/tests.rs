use super::{EchoService, Health};
use crate::config::BrokerSettings;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_create_message_returns_confirmation() {
    let service = EchoService::new();
    let result = service.create_message("hello");

    assert!(result.is_success());
    assert_eq!(result.message.as_deref(), Some("Message 1 created"));
    assert!(result.error.is_none());
}

#[test]
fn test_get_and_list_messages() {
    let service = EchoService::new();
    service.create_message("one");
    service.create_message("two");

    assert_eq!(service.get_message("2").unwrap().text, "two");
    assert!(service.get_message("3").is_none());

    let texts: Vec<String> = service
        .list_messages()
        .into_iter()
        .map(|m| m.text)
        .collect();
    assert_eq!(texts, vec!["one", "two"]);
}

#[test]
fn test_create_message_notifies_subscribers() {
    let service = EchoService::new();
    let mut a = service.subscribe_messages();
    let mut b = service.subscribe_messages();

    service.create_message("fan out");

    let from_a = a.try_recv().unwrap();
    let from_b = b.try_recv().unwrap();
    assert_eq!(from_a, from_b);
    assert_eq!(from_a.text, "fan out");
    assert_eq!(service.get_message(&from_a.id), Some(from_a));
}

#[test]
fn test_subscriber_only_sees_messages_after_subscribing() {
    let service = EchoService::new();
    service.create_message("before");
    let mut sub = service.subscribe_messages();
    service.create_message("after");

    assert_eq!(sub.try_recv().unwrap().text, "after");
    assert!(sub.try_recv().is_none());
}

#[test]
fn test_create_is_not_blocked_by_saturated_subscriber() {
    let service = EchoService::new();
    let mut idle = service.subscribe_messages();
    let mut active = service.subscribe_messages();

    for i in 0..10 {
        let result = service.create_message(format!("msg-{i}"));
        assert!(result.is_success());
        assert_eq!(active.try_recv().unwrap().text, format!("msg-{i}"));
    }

    assert_eq!(idle.try_recv().unwrap().text, "msg-0");
    assert!(idle.try_recv().is_none());
    assert_eq!(service.list_messages().len(), 10);
}

#[test]
fn test_settings_capacity_is_applied() {
    let service = EchoService::with_settings(&BrokerSettings {
        subscriber_capacity: 4,
    });
    assert_eq!(service.broadcaster().capacity(), 4);
}

#[test]
fn test_health_is_ok() {
    let service = EchoService::new();
    assert_eq!(service.health(), Health::ok());
    assert_eq!(
        serde_json::to_value(service.health()).unwrap(),
        serde_json::json!({ "status": "ok" })
    );
}

#[tokio::test]
async fn test_subscription_stream_across_tasks() {
    let service = Arc::new(EchoService::with_settings(&BrokerSettings {
        subscriber_capacity: 8,
    }));
    let sub = service.subscribe_messages();
    let id = sub.id();

    let reader = tokio::spawn(async move { sub.map(|m| m.text).collect::<Vec<_>>().await });

    let producer = service.clone();
    tokio::spawn(async move {
        for text in ["x", "y", "z"] {
            producer.create_message(text);
        }
    })
    .await
    .unwrap();

    assert!(service.unsubscribe(id));
    let texts = tokio::time::timeout(Duration::from_secs(1), reader)
        .await
        .expect("stream did not end")
        .unwrap();
    assert_eq!(texts, vec!["x", "y", "z"]);
}

#[tokio::test]
async fn test_concurrent_creates_from_tasks() {
    let service = Arc::new(EchoService::new());
    let mut handles = Vec::new();
    for i in 0..50 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.create_message(format!("task-{i}"))
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_success());
    }

    let listed = service.list_messages();
    assert_eq!(listed.len(), 50);
    assert_eq!(listed.last().unwrap().id, "50");
}
