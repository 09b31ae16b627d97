//! Pure text formatting helpers shared by the `apps` and `ps` commands.

use chrono::{DateTime, Duration, Utc};

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;
const GB: u64 = 1024 * MB;

/// Pluralise `noun` for `count`: `1 dyno`, `2 dynos`, `0 dynos`.
#[must_use]
pub fn quantify(noun: &str, count: u64) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Human-readable byte size: `(empty)`, `512`, `3k`, `12M`, `2G`.
///
/// The unit is picked from the exact size; the count is rounded to nearest.
#[must_use]
pub fn format_bytes(amount: u64) -> String {
    match amount {
        0 => "(empty)".to_string(),
        n if n < KB => n.to_string(),
        n if n < MB => format!("{}k", rounded(n, KB)),
        n if n < GB => format!("{}M", rounded(n, MB)),
        n => format!("{}G", rounded(n, GB)),
    }
}

fn rounded(n: u64, unit: u64) -> u64 {
    n / unit + u64::from(n % unit >= unit / 2)
}

/// Parse a platform timestamp (RFC 3339 or `%Y/%m/%d %H:%M:%S %z`).
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y/%m/%d %H:%M:%S %z"))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Render a timestamp as `%Y-%m-%d %H:%M UTC`; unparseable input is shown as-is.
#[must_use]
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || raw.to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M %Z").to_string(),
    )
}

/// Relative age of something that started `elapsed_secs` before `now`.
///
/// Beyond 25 hours the absolute start time is shown instead.
#[must_use]
pub fn time_ago(elapsed_secs: u64, now: DateTime<Utc>) -> String {
    if elapsed_secs <= 60 {
        format!("{elapsed_secs}s ago")
    } else if elapsed_secs <= 60 * 60 {
        format!("{}m ago", elapsed_secs / 60)
    } else if elapsed_secs <= 60 * 60 * 25 {
        format!("{}h ago", elapsed_secs / 3600)
    } else {
        let secs = i64::try_from(elapsed_secs).unwrap_or(i64::MAX);
        let started = now
            .checked_sub_signed(Duration::seconds(secs))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        started.format("%Y/%m/%d %H:%M:%S").to_string()
    }
}

/// Upper-case the first character: `web` → `Web`.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
