//! Attribute normalization shared by every scorer.
//!
//! Town and preference records come from independent sources (manual entry,
//! bulk imports, enrichment jobs) and disagree on case, spacing, delimiters
//! and plural forms. Everything is compared in the canonical form produced
//! here: lowercase words joined by a single `_`, each word singularized.

use std::collections::HashSet;

const DELIMITER: char = '_';

/// Canonicalize a tag, label or short free-text attribute.
///
/// `normalize(normalize(x)) == normalize(x)` holds for every input.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase().replace('&', " and ");

    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(singularize)
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}

/// Normalize every element, preserving order.
pub fn normalize_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values.iter().map(|v| normalize(v.as_ref())).collect()
}

/// Split a comma-joined list ("Southern Europe,Mediterranean") into
/// normalized segments, dropping empty ones.
pub fn split_list(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(normalize)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Normalized set view of a collection, for membership checks.
pub fn normalized_set<S: AsRef<str>>(values: &[S]) -> HashSet<String> {
    values.iter().map(|v| normalize(v.as_ref())).collect()
}

/// True when `needle` matches any element of `haystack` after normalization.
pub fn contains_normalized<S: AsRef<str>>(haystack: &[S], needle: &str) -> bool {
    let needle = normalize(needle);
    !needle.is_empty() && haystack.iter().any(|item| normalize(item.as_ref()) == needle)
}

/// True when the two collections share at least one normalized element.
pub fn intersects<A: AsRef<str>, B: AsRef<str>>(left: &[A], right: &[B]) -> bool {
    let right = normalized_set(right);
    left.iter()
        .map(|item| normalize(item.as_ref()))
        .any(|item| !item.is_empty() && right.contains(&item))
}

/// Conservative English singularization of one lowercase word.
///
/// The output never ends in a form the rules would strip again, which keeps
/// [`normalize`] idempotent.
fn singularize(word: &str) -> String {
    if word.chars().count() <= 3 || !word.ends_with('s') {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }

    for suffix in ["ches", "shes", "xes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    if ["ss", "us", "is", "os", "as"].iter().any(|keep| word.ends_with(keep)) {
        return word.to_string();
    }

    word[..word.len() - 1].to_string()
}
