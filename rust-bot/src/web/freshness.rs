//! Replay protection based on the request timestamp header.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use super::rejection::Rejection;

/// Maximum age of a request timestamp.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Check that `timestamp` (decimal seconds since the epoch) is not older
/// than [`FRESHNESS_WINDOW`] relative to `now`.
///
/// Timestamps in the future are accepted. Returns the parsed value.
pub fn check_freshness(timestamp: &str, now: SystemTime) -> Result<i64, Rejection> {
    let unix: i64 = timestamp
        .parse()
        .map_err(|_| Rejection::InvalidTimestamp(timestamp.to_string()))?;

    let issued_at = if unix >= 0 {
        UNIX_EPOCH.checked_add(Duration::from_secs(unix.unsigned_abs()))
    } else {
        UNIX_EPOCH.checked_sub(Duration::from_secs(unix.unsigned_abs()))
    };

    let cutoff = match now.checked_sub(FRESHNESS_WINDOW) {
        Some(cutoff) => cutoff,
        None => return Ok(unix),
    };

    match issued_at {
        // Too far ahead to represent, so certainly not in the past.
        None if unix >= 0 => Ok(unix),
        Some(issued_at) if issued_at >= cutoff => Ok(unix),
        _ => Err(Rejection::StaleTimestamp {
            age_secs: issued_at
                .and_then(|t| now.duration_since(t).ok())
                .map(|age| age.as_secs())
                .unwrap_or(u64::MAX),
        }),
    }
}
