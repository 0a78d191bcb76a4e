//! Date helper functions
//!
//! Manifests carry dates as loose strings ("2024-01-15", "2024-01-15T09:00:00Z",
//! "May 2023"). Everything that sorts or prints a date goes through here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a date string in the formats seen in manifests and frontmatter
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%d %B %Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // "May 2023" style, as used by publications
    if let Ok(d) = NaiveDate::parse_from_str(&format!("1 {}", s), "%d %B %Y") {
        return d.and_hms_opt(0, 0, 0);
    }

    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year = s.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0);
    }

    None
}

/// Parse a year the way the listing pages do: leading digits only
pub fn parse_year(s: &str) -> Option<i64> {
    let s = s.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Format like "Jan 15, 2024" (list cards, recent posts)
pub fn short_date(date: &NaiveDateTime) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format like "January 15, 2024" (article header)
pub fn long_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Format a date string for display, keeping the raw text when it does not parse
pub fn display_date(raw: &str, long: bool) -> String {
    match parse_date(raw) {
        Some(dt) if long => long_date(&dt),
        Some(dt) => short_date(&dt),
        None => raw.to_string(),
    }
}

/// RFC 2822 timestamp for feeds
pub fn rfc2822(date: &NaiveDateTime) -> String {
    Utc.from_utc_datetime(date).to_rfc2822()
}
