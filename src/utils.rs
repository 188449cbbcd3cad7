//! Clock and logging helpers.
//!
//! Every timestamp the pipeline exposes (prompt date header, output filename,
//! email subject) is computed in UTC+8, the timezone of the news source and
//! the recipient, independent of the host's local timezone.

use chrono::{DateTime, FixedOffset, Utc};

/// Current time shifted to UTC+8.
pub fn beijing_now() -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(8 * 3600).unwrap();
    Utc::now().with_timezone(&offset)
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes with an ellipsis and
/// byte count indicator appended. The cut is walked back to the nearest char
/// boundary, so multi-byte text (Chinese API error bodies) is safe.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}
