// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

fn event(kind: &str, user_id: &str, payload: Value) -> LogEvent {
    LogEvent {
        stream_id: 0,
        user_id: Some(user_id.to_string()),
        scope: "task".to_string(),
        kind: kind.to_string(),
        payload,
        published_at: 0,
    }
}

#[test]
fn publish_assigns_increasing_monotone_ids() {
    let bus = LogBus::new(100);
    let a = bus.publish(event("task_completed", "alice", json!({})), 1);
    let b = bus.publish(event("task_completed", "alice", json!({})), 2);
    assert_eq!(a, 1);
    assert_eq!(b, 2);
}

#[test]
fn consume_only_returns_filter_matching_events_but_advances_past_others() {
    let bus = LogBus::new(100);
    bus.publish(event("task_completed", "alice", json!({})), 1);
    bus.publish(event("task_failed", "bob", json!({})), 2);
    bus.publish(event("task_completed", "alice", json!({})), 3);

    let mut filter = Filter::default();
    filter.0.insert(
        "user_id".to_string(),
        FilterValue::Scalar(json!("alice")),
    );
    let handle = bus.subscribe("observers", "c1", filter);

    let result = bus.consume(&handle, 10);
    assert_eq!(result.events.len(), 2);
    assert!(result.events.iter().all(|e| e.user_id.as_deref() == Some("alice")));
    assert_eq!(result.missed_events, 0);
}

#[test]
fn rejoining_the_same_group_and_consumer_resumes_the_cursor() {
    let bus = LogBus::new(100);
    bus.publish(event("task_completed", "alice", json!({})), 1);

    let handle = bus.subscribe("observers", "c1", Filter::default());
    let first = bus.consume(&handle, 10);
    assert_eq!(first.events.len(), 1);

    bus.publish(event("task_completed", "alice", json!({})), 2);
    let rejoined = bus.subscribe("observers", "c1", Filter::default());
    let second = bus.consume(&rejoined, 10);
    assert_eq!(second.events.len(), 1);
    assert_eq!(second.events[0].stream_id, 2);
}

#[test]
fn trimming_past_a_lagging_subscription_surfaces_missed_events() {
    let bus = LogBus::new(2);
    let handle = bus.subscribe("observers", "c1", Filter::default());
    bus.publish(event("task_completed", "alice", json!({})), 1);
    bus.publish(event("task_completed", "alice", json!({})), 2);
    bus.publish(event("task_completed", "alice", json!({})), 3);
    bus.publish(event("task_completed", "alice", json!({})), 4);

    let result = bus.consume(&handle, 10);
    assert!(result.missed_events > 0);
    assert_eq!(result.events.len(), 2);
}

#[test]
fn range_replays_a_bounded_historical_window() {
    let bus = LogBus::new(100);
    for i in 0..5 {
        bus.publish(event("task_completed", "alice", json!({"i": i})), i);
    }
    let replayed = bus.range(2, 4, 10);
    assert_eq!(replayed.len(), 3);
    assert_eq!(replayed[0].stream_id, 2);
}

#[test]
fn empty_filter_matches_everything() {
    let bus = LogBus::new(100);
    bus.publish(event("anything", "alice", json!({"x": 1})), 1);
    let handle = bus.subscribe("g", "c", Filter::default());
    let result = bus.consume(&handle, 10);
    assert_eq!(result.events.len(), 1);
}

#[tokio::test]
async fn live_receiver_observes_published_events() {
    let bus = LogBus::new(100);
    let mut rx = bus.live_receiver();
    bus.publish(event("task_completed", "alice", json!({})), 1);
    let received = rx.recv().await.unwrap();
    assert_eq!(received.kind, "task_completed");
}
