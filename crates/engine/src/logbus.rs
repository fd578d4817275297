// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured Log Bus (spec.md §4.H): a durable, in-process append-only
//! stream with consumer-group cursors, filtered delivery, and a
//! best-effort live fan-out channel. Grounded on this codebase's WAL
//! pattern (sequence-numbered, append-only, replay-on-demand) but held
//! in memory rather than on disk: the bus is a process-wide singleton
//! per spec.md §5, not a crash-recovery log, so durability here means
//! "survives for the life of the process," not "survives a restart."
//!
//! Simplification: `subscribe` keys a cursor by `(group, consumer)`
//! rather than partitioning work across consumers sharing one group
//! position. Multiple consumers in the same group therefore get
//! independent cursors, not a shared queue split between them — true
//! partitioned delivery would need a dedicated broker and is out of
//! scope for an in-process bus.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use tokio::sync::broadcast;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub stream_id: u64,
    pub user_id: Option<String>,
    pub scope: String,
    pub kind: String,
    pub payload: Value,
    pub published_at: u64,
}

/// A filter field may require an exact scalar match or membership in a
/// list (spec.md §4.H "Filter semantics").
#[derive(Debug, Clone)]
pub enum FilterValue {
    Scalar(Value),
    AnyOf(Vec<Value>),
}

#[derive(Debug, Clone, Default)]
pub struct Filter(pub HashMap<String, FilterValue>);

impl Filter {
    pub fn matches(&self, event: &LogEvent) -> bool {
        if self.0.is_empty() {
            return true;
        }
        self.0.iter().all(|(field, expected)| {
            let actual = match field.as_str() {
                "user_id" => event.user_id.clone().map(Value::String),
                "scope" => Some(Value::String(event.scope.clone())),
                "kind" => Some(Value::String(event.kind.clone())),
                other => event.payload.get(other).cloned(),
            };
            match (actual, expected) {
                (Some(actual), FilterValue::Scalar(expected)) => actual == *expected,
                (Some(actual), FilterValue::AnyOf(options)) => options.contains(&actual),
                (None, _) => false,
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    pub group: String,
    pub consumer: String,
}

struct Subscription {
    position: u64,
    filter: Filter,
}

struct Inner {
    events: VecDeque<LogEvent>,
    next_id: u64,
    subscriptions: HashMap<SubscriptionHandle, Subscription>,
}

#[derive(Debug, Clone)]
pub struct ConsumeResult {
    pub events: Vec<LogEvent>,
    /// Events that existed but were trimmed past this subscription's
    /// last position before it could read them.
    pub missed_events: u64,
}

/// Durable append-only event stream (spec.md §4.H). `max_len` bounds
/// in-memory retention; older entries are trimmed once exceeded.
pub struct LogBus {
    inner: Mutex<Inner>,
    live: broadcast::Sender<LogEvent>,
    max_len: usize,
}

impl LogBus {
    pub fn new(max_len: usize) -> Self {
        let (live, _) = broadcast::channel(1024);
        Self {
            inner: Mutex::new(Inner {
                events: VecDeque::new(),
                next_id: 1,
                subscriptions: HashMap::new(),
            }),
            live,
            max_len,
        }
    }

    /// Append `event` (its `stream_id` is assigned here), returning the
    /// assigned id.
    pub fn publish(&self, mut event: LogEvent, published_at: u64) -> u64 {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        event.stream_id = id;
        event.published_at = published_at;

        inner.events.push_back(event.clone());
        while inner.events.len() > self.max_len {
            inner.events.pop_front();
        }
        drop(inner);

        let _ = self.live.send(event);
        id
    }

    /// Create-or-join a consumer group's cursor.
    pub fn subscribe(&self, group: impl Into<String>, consumer: impl Into<String>, filter: Filter) -> SubscriptionHandle {
        let handle = SubscriptionHandle {
            group: group.into(),
            consumer: consumer.into(),
        };
        let mut inner = self.inner.lock();
        inner
            .subscriptions
            .entry(handle.clone())
            .and_modify(|sub| sub.filter = filter.clone())
            .or_insert(Subscription { position: 0, filter });
        handle
    }

    /// Pull up to `max` filter-matching events past the subscription's
    /// current position, auto-advancing the cursor through both
    /// delivered and filtered-out events.
    pub fn consume(&self, handle: &SubscriptionHandle, max: usize) -> ConsumeResult {
        let mut inner = self.inner.lock();
        let oldest_retained = inner.events.front().map(|e| e.stream_id).unwrap_or(0);

        let Some(sub) = inner.subscriptions.get(handle).map(|s| (s.position, s.filter.clone()))
        else {
            return ConsumeResult {
                events: Vec::new(),
                missed_events: 0,
            };
        };
        let (position, filter) = sub;

        let missed_events = oldest_retained.saturating_sub(position + 1);
        let mut new_position = position.max(oldest_retained.saturating_sub(1));

        let mut matched = Vec::new();
        for event in inner.events.iter() {
            if event.stream_id <= new_position {
                continue;
            }
            new_position = event.stream_id;
            if filter.matches(event) {
                matched.push(event.clone());
                if matched.len() >= max {
                    break;
                }
            }
        }

        if let Some(sub) = inner.subscriptions.get_mut(handle) {
            sub.position = new_position;
        }

        ConsumeResult {
            events: matched,
            missed_events,
        }
    }

    /// Advance a subscription's position explicitly (idempotent,
    /// forward-only — `consume` already advances past delivered
    /// batches, so this mainly lets a caller resume a handle without
    /// first replaying it).
    pub fn ack(&self, handle: &SubscriptionHandle, stream_id: u64) {
        let mut inner = self.inner.lock();
        if let Some(sub) = inner.subscriptions.get_mut(handle) {
            sub.position = sub.position.max(stream_id);
        }
    }

    /// Historical replay between two ids (inclusive), bounded by `max`.
    pub fn range(&self, from_id: u64, to_id: u64, max: usize) -> Vec<LogEvent> {
        let inner = self.inner.lock();
        inner
            .events
            .iter()
            .filter(|e| e.stream_id >= from_id && e.stream_id <= to_id)
            .take(max)
            .cloned()
            .collect()
    }

    /// Subscribe to the best-effort live fan-out channel (spec.md §4.H
    /// "Fan-out"). Durable replay via `range`/`consume` remains
    /// authoritative; a lagged live receiver simply misses events.
    pub fn live_receiver(&self) -> broadcast::Receiver<LogEvent> {
        self.live.subscribe()
    }

    /// Prune events published before `horizon` (spec.md §4.H
    /// "Retention"). Never reorders remaining ids.
    pub fn prune_older_than(&self, horizon: u64) {
        let mut inner = self.inner.lock();
        while inner
            .events
            .front()
            .map(|e| e.published_at < horizon)
            .unwrap_or(false)
        {
            inner.events.pop_front();
        }
    }
}

#[cfg(test)]
#[path = "logbus_tests.rs"]
mod tests;
