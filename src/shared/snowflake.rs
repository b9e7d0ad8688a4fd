//! Snowflake ID Generator
//!
//! Time-ordered unique identifiers for branch records. Ids leave the
//! generator as decimal strings so callers treat them as opaque.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Service epoch (2024-01-01T00:00:00.000Z)
const BRANCH_EPOCH: u64 = 1704067200000;

/// Snowflake ID generator
#[derive(Debug)]
pub struct SnowflakeGenerator {
    machine_id: u64,
    state: AtomicU64,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator
    pub fn new(machine_id: u64) -> Self {
        Self {
            machine_id: machine_id & 0x3FF, // 10 bits
            state: AtomicU64::new(0),
        }
    }

    /// Generate a new snowflake ID.
    ///
    /// `state` packs the last timestamp (upper bits) and the sequence
    /// (low 12 bits) so a single CAS keeps both consistent across threads.
    pub fn generate(&self) -> i64 {
        loop {
            let now = current_timestamp().saturating_sub(BRANCH_EPOCH);
            let prev = self.state.load(Ordering::Acquire);
            let prev_ts = prev >> 12;

            let next = if now > prev_ts {
                now << 12
            } else if prev & 0xFFF < 0xFFF {
                prev + 1
            } else {
                // sequence exhausted within this millisecond; borrow the next one
                (prev_ts + 1) << 12
            };

            if self
                .state
                .compare_exchange(prev, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                let timestamp = next >> 12;
                let sequence = next & 0xFFF;
                return ((timestamp << 22) | (self.machine_id << 12) | sequence) as i64;
            }
        }
    }

    /// Generate a new id as its string form.
    pub fn next_id(&self) -> String {
        self.generate().to_string()
    }
}

/// Current wall-clock time in milliseconds
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Extract timestamp from snowflake ID
pub fn extract_timestamp(snowflake: i64) -> u64 {
    ((snowflake as u64) >> 22) + BRANCH_EPOCH
}
