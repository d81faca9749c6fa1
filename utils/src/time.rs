//! Time formatting helpers.

const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

/// Format seconds exactly, listing every non-zero unit: `1d 1s`, `2h 30m`.
pub fn format_duration(secs: u64) -> String {
    if secs == 0 {
        return "0s".to_string();
    }
    let mut rest = secs;
    let mut parts = Vec::new();
    for (unit, suffix) in UNITS {
        if rest >= unit {
            parts.push(format!("{}{suffix}", rest / unit));
            rest %= unit;
        }
    }
    parts.join(" ")
}

/// How long after staging a change becomes committable: `delay + 1` seconds.
pub fn format_commit_wait(delay: u64) -> String {
    format_duration(delay.saturating_add(1))
}
