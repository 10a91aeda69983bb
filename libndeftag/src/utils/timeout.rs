//! Timing defaults for the presence poll and the worker loop.

use std::time::Duration;

/// How long a single presence IRQ wait blocks before reporting absence.
pub const DEFAULT_PRESENCE_TIMEOUT_MS: u64 = 100;

/// Pause after a tag leaves the field before the next cycle starts.
pub const DEFAULT_REMOVAL_COOLDOWN_MS: u64 = 1000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// 100 ms
pub fn default_presence_timeout() -> Duration {
    ms(DEFAULT_PRESENCE_TIMEOUT_MS)
}

/// 1 s
pub fn default_removal_cooldown() -> Duration {
    ms(DEFAULT_REMOVAL_COOLDOWN_MS)
}
