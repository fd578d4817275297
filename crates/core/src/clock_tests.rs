// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_is_nonzero() {
    assert!(SystemClock.epoch_ms() > 0);
}

#[test]
fn fake_clock_starts_at_given_value() {
    let clock = FakeClock::new(1_000);
    assert_eq!(clock.epoch_ms(), 1_000);
}

#[test]
fn fake_clock_advances() {
    let clock = FakeClock::new(0);
    assert_eq!(clock.advance(500), 500);
    assert_eq!(clock.epoch_ms(), 500);
    assert_eq!(clock.advance(250), 750);
}

#[test]
fn fake_clock_set_overrides() {
    let clock = FakeClock::new(0);
    clock.set(42);
    assert_eq!(clock.epoch_ms(), 42);
}
