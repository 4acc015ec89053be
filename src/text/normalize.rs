//! Comparison-only text canonicalization.

/// Canonicalize text for comparison.
///
/// Removes all whitespace and zero-width/BOM characters, folds full-width and
/// half-width punctuation variants onto one form, and lowercases. The result
/// is never shown to users. Idempotent.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_whitespace() || is_invisible(c) {
            continue;
        }
        match canonical_punct(c) {
            Some(p) => out.push(p),
            None => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Zero-width space/joiners and the byte-order mark.
fn is_invisible(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}')
}

fn canonical_punct(c: char) -> Option<char> {
    let mapped = match c {
        '，' | ',' => ',',
        '。' | '．' | '.' => '.',
        '：' | ':' => ':',
        '；' | ';' => ';',
        '（' | '(' => '(',
        '）' | ')' => ')',
        '“' | '”' | '‘' | '’' | '"' | '\'' => '"',
        '【' | '［' | '[' => '[',
        '】' | '］' | ']' => ']',
        '—' | '－' | '-' => '-',
        _ => return None,
    };
    Some(mapped)
}
