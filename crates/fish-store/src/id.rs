//! Identifier generation.
//!
//! Identifiers are the decimal rendering of a nanosecond wall-clock
//! timestamp. Each generator remembers the last value it issued and never
//! issues it again: when the clock has not advanced (or has gone backwards)
//! the next identifier is the previous one plus one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of timestamps, in nanoseconds.
pub type Clock = fn() -> u64;

/// Issues strictly increasing, timestamp-derived identifiers.
#[derive(Debug)]
pub struct IdGenerator {
    last: AtomicU64,
    clock: Clock,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Create a generator backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(system_nanos)
    }

    /// Create a generator backed by a custom clock.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            last: AtomicU64::new(0),
            clock,
        }
    }

    /// Issue the next identifier.
    pub fn next_id(&self) -> String {
        self.next_value().to_string()
    }

    fn next_value(&self) -> u64 {
        let now = (self.clock)();
        let advance = |last: u64| now.max(last.saturating_add(1));

        // The closure never returns None, so both arms carry the prior value.
        let previous = match self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| Some(advance(last)))
        {
            Ok(prev) | Err(prev) => prev,
        };

        advance(previous)
    }
}

fn system_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
