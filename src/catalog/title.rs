//! Title normalisation shared by sorting and category bucketing.
//!
//! Both callers must go through [`normalize`] so an entry always lands in the
//! category its sort position implies.

/// Leading articles ignored when ordering titles, checked in this order.
const ARTICLE_PREFIXES: [&str; 3] = ["the ", "a ", "an "];

/// Lowercase and trim a title, then drop at most one leading article.
///
/// `"The Legend"`, `"  legend "` and `"LEGEND"` all normalize to `"legend"`.
/// Only the first matching prefix is removed, so `"The A Team"` becomes
/// `"a team"`.
pub fn normalize(title: &str) -> String {
    let sanitized = title.trim().to_lowercase();
    for prefix in ARTICLE_PREFIXES {
        if let Some(rest) = sanitized.strip_prefix(prefix) {
            return rest.trim().to_string();
        }
    }
    sanitized
}

/// Category key for an already-normalized title: the uppercase form of its
/// first character, or the empty string when there is no first character.
pub fn category_key(normalized: &str) -> String {
    normalized
        .chars()
        .next()
        .map(|first| first.to_uppercase().collect())
        .unwrap_or_default()
}
