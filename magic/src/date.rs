//! Interprets a 32-bit value as seconds-since-epoch and renders it the way
//! the classic `ctime(3)` family does: `"Www Mmm dd hh:mm:ss yyyy\n"`.

use chrono::{Local, TimeZone};

/// Format `unixtime` (already widened to 64 bits by the caller) as a local
/// calendar string, matching `ctime(3)`'s conventional layout.
///
/// Re-entrant: no shared mutable state, unlike the C library's `ctime()`.
pub fn format_local(unixtime: i64) -> String {
    match Local.timestamp_opt(unixtime, 0) {
        chrono::LocalResult::Single(dt) => format!("{}\n", dt.format("%a %b %e %H:%M:%S %Y")),
        // an out-of-range timestamp (e.g. from a bogus/obfuscated window)
        // still has to produce *some* fragment rather than panic the scan.
        _ => "(invalid date)\n".to_string(),
    }
}
