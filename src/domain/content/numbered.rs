//! Splitting of numbered completion responses.
//!
//! The completion provider is asked to number its suggestions ("1. ...",
//! "2. ..."). Models mostly comply, but not reliably, so splitting falls
//! back to returning the whole text as a single suggestion.

/// Splits text on numbered-list markers at line starts.
///
/// Leading text before the first marker is kept as its own entry; blank
/// entries are dropped. When no markers are found the whole trimmed text
/// is returned as the only entry.
pub fn split_numbered(raw: &str) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in raw.lines() {
        if let Some(rest) = strip_list_marker(line) {
            push_part(&mut parts, &current);
            current = rest.to_string();
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    push_part(&mut parts, &current);

    if parts.is_empty() {
        let whole = raw.trim();
        if whole.is_empty() {
            return Vec::new();
        }
        return vec![whole.to_string()];
    }
    parts
}

fn push_part(parts: &mut Vec<String>, part: &str) {
    let trimmed = part.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}

/// Returns the text after a `<digits>.` marker, or None if the line does
/// not start with one.
fn strip_list_marker(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = trimmed[digits..].strip_prefix('.')?;
    Some(rest.trim_start())
}
