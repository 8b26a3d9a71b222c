//! Truncation Utilities
//!
//! Shortens user or upstream text for log lines and error details while
//! respecting UTF-8 boundaries.

/// Flatten newlines and cut `s` to at most `max_len` bytes, ending in `...` when cut
pub fn truncate(s: &str, max_len: usize) -> String {
    let s = s.replace(['\n', '\r'], " ");
    if s.len() <= max_len {
        return s;
    }

    let mut end = max_len.saturating_sub(3);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
