//! String utility functions for safe UTF-8 text manipulation

/// Keep at most `max_chars` characters of `s`, cutting on a character boundary.
///
/// Used for the knowledge-base size cap, where no marker should be appended
/// because the result is fed to the analyzer.
pub fn take_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}

/// Truncate for display, appending "..." when anything was cut.
///
/// Model responses are logged through this so a runaway completion does not
/// flood the log.
pub fn truncate_at_char_boundary(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();

    if char_count <= max_chars {
        s.to_string()
    } else {
        format!("{}...", take_chars(s, max_chars))
    }
}
