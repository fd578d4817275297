// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token-bucket enforcement of a tool's `rate_limit` string (spec.md §4.E,
//! §7 `denied`). This is the supplemental feature from `original_source`:
//! the distilled spec only describes the syntax of `rate_limit`; the
//! original system enforces it as a sliding window. A continuous-refill
//! token bucket gives the same "N per period" guarantee without needing a
//! background timer.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// A parsed `"N/{second|minute|hour|day}"` rate limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimit {
    pub count: u64,
    pub per: Duration,
}

pub fn parse_rate_limit(spec: &str) -> Option<RateLimit> {
    let (count_str, unit) = spec.split_once('/')?;
    let count: u64 = count_str.parse().ok()?;
    let per = match unit {
        "second" => Duration::from_secs(1),
        "minute" => Duration::from_secs(60),
        "hour" => Duration::from_secs(3600),
        "day" => Duration::from_secs(86_400),
        _ => return None,
    };
    Some(RateLimit { count, per })
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Per-tool-instance token bucket. Reset when a new `RateLimiter` is
/// constructed, matching "tool instances are not reused across tasks"
/// (spec.md §5) — a fresh instance means a fresh bucket.
pub struct RateLimiter {
    capacity: f64,
    refill_per_sec: f64,
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    pub fn new(limit: RateLimit) -> Self {
        let capacity = limit.count as f64;
        let refill_per_sec = capacity / limit.per.as_secs_f64().max(f64::EPSILON);
        Self {
            capacity,
            refill_per_sec,
            bucket: Mutex::new(Bucket {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Attempt to consume one token. Returns `false` (caller should raise
    /// `denied`) when the bucket is empty.
    pub fn try_acquire(&self) -> bool {
        let mut bucket = self.bucket.lock();
        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_per_sec).min(self.capacity);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "rate_limit_tests.rs"]
mod tests;
