//! Token boundary editing
//!
//! A token under review is adjusted one character at a time against the
//! corpus line it was selected in. Each operation locates the first
//! occurrence of the token in the line and grows or shrinks it by exactly
//! one character. All positions are character boundaries, so multi-byte
//! text behaves the same as ASCII.
//!
//! Every function returns `None` when the operation cannot apply: the token
//! does not occur in the line, the line has no room to grow into, or the
//! token is already a single character. Callers treat `None` as a no-op.

/// Grow the token by the character preceding it in `line`.
pub fn expand_left(line: &str, token: &str) -> Option<String> {
    let start = line.find(token)?;
    let prev = line[..start].chars().next_back()?;
    Some(line[start - prev.len_utf8()..start + token.len()].to_string())
}

/// Grow the token by the character following it in `line`.
pub fn expand_right(line: &str, token: &str) -> Option<String> {
    let start = line.find(token)?;
    let end = start + token.len();
    let next = line[end..].chars().next()?;
    Some(line[start..end + next.len_utf8()].to_string())
}

/// Drop the first character of the token. Single characters stay as they are.
pub fn shrink_left(line: &str, token: &str) -> Option<String> {
    line.find(token)?;
    if token.chars().count() < 2 {
        return None;
    }
    let first = token.chars().next()?;
    Some(token[first.len_utf8()..].to_string())
}

/// Drop the last character of the token. Single characters stay as they are.
pub fn shrink_right(line: &str, token: &str) -> Option<String> {
    line.find(token)?;
    if token.chars().count() < 2 {
        return None;
    }
    let last = token.chars().next_back()?;
    Some(token[..token.len() - last.len_utf8()].to_string())
}
