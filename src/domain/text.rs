//! Text helpers for notification-sized strings

/// Clip `value` to at most `limit` characters, ending with `...` when cut
pub fn clip(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    if limit <= 3 {
        return value.chars().take(limit).collect();
    }
    let mut clipped: String = value.chars().take(limit - 3).collect();
    clipped.push_str("...");
    clipped
}

/// Collapse all whitespace runs to single spaces, then clip
pub fn compact(value: &str, limit: usize) -> String {
    let joined = value.split_whitespace().collect::<Vec<_>>().join(" ");
    clip(&joined, limit)
}
