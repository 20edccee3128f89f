//! Tag list hygiene
//!
//! Tags are compared by exact, case-sensitive match after trimming.

use std::collections::HashSet;

/// Trim every tag, drop empty ones and remove duplicates, keeping first occurrence order
pub fn clean_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();

    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || !seen.insert(tag.to_string()) {
            continue;
        }
        cleaned.push(tag.to_string());
    }

    cleaned
}

/// Split free-form tag text on `delimiter` and clean the result
///
/// An empty delimiter treats the whole text as a single tag.
pub fn split_tags(text: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return clean_tags([text]);
    }
    clean_tags(text.split(delimiter))
}

/// Merge `incoming` into `existing`, appending only tags not already present
///
/// Returns the number of tags actually added.
pub fn merge_tags<I, S>(existing: &mut Vec<String>, incoming: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut present: HashSet<String> = existing.iter().cloned().collect();
    let before = existing.len();

    for tag in clean_tags(incoming) {
        if present.insert(tag.clone()) {
            existing.push(tag);
        }
    }

    existing.len() - before
}
