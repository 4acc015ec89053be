//! Section numbering and sentence boundaries.

use once_cell::sync::Lazy;
use regex::Regex;

/// Numbering prefixes in priority order; the first capture that matched is
/// the section token.
static SECTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // 1.2 付款 / 1. / 1.1.1、 / 1） / 1)
        r"^(?:([0-9]+(?:\.[0-9]+)+)\s|([0-9]+(?:\.[0-9]+)*)[.、）)])",
        // 一、 / （一） / (十二)
        r"^[（(]?([一二三四五六七八九十]+)[）)、]",
        // 第三条 / 第12章
        r"^第([一二三四五六七八九十0-9]+)[条章节款项]",
        // （1） / (1)
        r"^[（(]([0-9]+)[）)]",
        // a. / A） / b)
        r"^([a-zA-Z])[.）)]",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("section pattern is a valid regex"))
    .collect()
});

/// Chinese numerals understood by [`normalize_number`]. Values above fifteen
/// are deliberately absent.
const CHINESE_NUMERALS: [(&str, &str); 15] = [
    ("一", "1"),
    ("二", "2"),
    ("三", "3"),
    ("四", "4"),
    ("五", "5"),
    ("六", "6"),
    ("七", "7"),
    ("八", "8"),
    ("九", "9"),
    ("十", "10"),
    ("十一", "11"),
    ("十二", "12"),
    ("十三", "13"),
    ("十四", "14"),
    ("十五", "15"),
];

/// Sentence-terminating punctuation, Chinese and Latin forms.
const SENTENCE_TERMINATORS: [char; 11] = ['。', '．', '.', '？', '?', '！', '!', '；', ';', '：', ':'];

/// Extract the leading section-number token of a paragraph.
///
/// ```
/// use docalign::text::extract_section_number;
///
/// assert_eq!(extract_section_number("1.2 付款方式").as_deref(), Some("1.2"));
/// assert_eq!(extract_section_number("第三条 违约责任").as_deref(), Some("三"));
/// assert_eq!(extract_section_number("（一）定义").as_deref(), Some("一"));
/// assert_eq!(extract_section_number("a) scope").as_deref(), Some("a"));
/// assert_eq!(extract_section_number("甲方应付款"), None);
/// ```
pub fn extract_section_number(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    SECTION_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(trimmed)?;
        caps.iter()
            .skip(1)
            .flatten()
            .next()
            .map(|m| m.as_str().to_string())
    })
}

/// Canonicalize a section token so `三`, `3` and `第三条`'s token compare equal.
///
/// Chinese numerals one through fifteen map to Arabic digits; every other
/// token is only lowercased.
pub fn normalize_number(token: &str) -> String {
    CHINESE_NUMERALS
        .iter()
        .find(|(zh, _)| *zh == token)
        .map(|(_, arabic)| (*arabic).to_string())
        .unwrap_or_else(|| token.to_lowercase())
}

/// Extract and normalize in one step.
pub fn section_key(text: &str) -> Option<String> {
    extract_section_number(text).map(|token| normalize_number(&token))
}

/// Whether the paragraph opens with a recognized numbering prefix.
pub fn starts_with_section_number(text: &str) -> bool {
    extract_section_number(text).is_some()
}

/// Whether the trimmed text ends with sentence-terminating punctuation.
///
/// Empty text counts as terminated, so it never absorbs a following fragment.
pub fn ends_with_sentence_terminator(text: &str) -> bool {
    match text.trim().chars().last() {
        Some(c) => SENTENCE_TERMINATORS.contains(&c),
        None => true,
    }
}
