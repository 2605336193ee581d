use std::sync::OnceLock;

use regex::Regex;

static STRIP_PATTERN: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn strip_pattern() -> &'static Regex {
    // Word characters are letters, numbers and underscore only. Marks, joiners and
    // connector punctuation other than `_` are stripped along with brackets and periods.
    STRIP_PATTERN.get_or_init(|| Regex::new(r"[^\p{L}\p{N}_\s]").expect("valid strip pattern"))
}

fn whitespace_pattern() -> &'static Regex {
    WHITESPACE_PATTERN.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

/// Returns the canonical form of a field name.
///
/// The input is lowercased, every character that is not a letter, number,
/// underscore or whitespace is removed, and the trimmed remainder has each whitespace run
/// collapsed into a single underscore.
///
/// ```
/// use lakehouse_sqlgen::transform::normalize;
///
/// assert_eq!(normalize("Fecha (UTC)"), "fecha_utc");
/// assert_eq!(normalize("Test-String"), "teststring");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = strip_pattern().replace_all(&lowered, "");
    whitespace_pattern()
        .replace_all(stripped.trim(), "_")
        .into_owned()
}
