//! POSIX shell quoting for rendered container commands.

/// Escapes a value for safe inclusion in a POSIX shell command.
///
/// Values made only of characters that never need quoting are returned
/// unchanged; everything else is single-quoted, with embedded quotes written
/// as `'\''`.
#[must_use]
pub fn shell_escape(value: &str) -> String {
    let is_plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,@%+".contains(c));
    if is_plain {
        return value.to_owned();
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            escaped.push_str("'\\''");
        } else {
            escaped.push(ch);
        }
    }
    escaped.push('\'');
    escaped
}
