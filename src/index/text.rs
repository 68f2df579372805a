//! Key extraction rules shared by the index engines.
//!
//! All windows are taken over `char` boundaries so multi-byte input never
//! splits a code point.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Characters that separate tokens: `@ . _ -` whitespace and comma.
static TOKEN_DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[@._\-\s,]+").expect("delimiter pattern is valid"));

/// Byte offsets of every char boundary in `value`, including the end.
fn char_boundaries(value: &str) -> Vec<usize> {
    value
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(value.len()))
        .collect()
}

/// Every contiguous substring of `value` with at least one char.
///
/// A value of `n` chars yields `n * (n + 1) / 2` windows, duplicates included.
pub fn all_substrings(value: &str) -> Vec<&str> {
    bounded_substrings(value, usize::MAX)
}

/// Every contiguous substring of `value` between 1 and `max_len` chars long.
pub fn bounded_substrings(value: &str, max_len: usize) -> Vec<&str> {
    let bounds = char_boundaries(value);
    let chars = bounds.len() - 1;
    let mut out = Vec::new();

    for start in 0..chars {
        let last = chars.min(start.saturating_add(max_len));
        for end in start + 1..=last {
            out.push(&value[bounds[start]..bounds[end]]);
        }
    }
    out
}

/// Sliding windows of exactly `k` chars. Empty when `value` is shorter than `k`.
pub fn ngrams(value: &str, k: usize) -> Vec<&str> {
    if k == 0 {
        return Vec::new();
    }
    let bounds = char_boundaries(value);
    let chars = bounds.len() - 1;
    if chars < k {
        return Vec::new();
    }
    (0..=chars - k)
        .map(|start| &value[bounds[start]..bounds[start + k]])
        .collect()
}

/// Lowercased fragments of `value` split on the token delimiters.
pub fn tokenize(value: &str) -> Vec<String> {
    TOKEN_DELIMITERS
        .split(value)
        .filter(|fragment| !fragment.trim().is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Collect borrowed keys into an owned, de-duplicated set.
pub fn unique<'a>(keys: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    keys.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_substrings() {
        let subs = all_substrings("abc");
        assert_eq!(subs, vec!["a", "ab", "abc", "b", "bc", "c"]);
    }

    #[test]
    fn test_all_substrings_empty() {
        assert!(all_substrings("").is_empty());
    }

    #[test]
    fn test_bounded_substrings_caps_length() {
        let subs = bounded_substrings("abcd", 2);
        assert_eq!(subs, vec!["a", "ab", "b", "bc", "c", "cd", "d"]);
    }

    #[test]
    fn test_bounded_substrings_multibyte() {
        let subs = bounded_substrings("zoë", 3);
        assert!(subs.contains(&"ë"));
        assert!(subs.contains(&"zoë"));
        assert_eq!(subs.len(), 6);
    }

    #[test]
    fn test_ngrams() {
        assert_eq!(ngrams("hello", 3), vec!["hel", "ell", "llo"]);
        assert_eq!(ngrams("hello", 5), vec!["hello"]);
        assert!(ngrams("hi", 3).is_empty());
        assert!(ngrams("hi", 0).is_empty());
    }

    #[test]
    fn test_tokenize_delimiters() {
        assert_eq!(
            tokenize("John.Smith@acme-corp.com"),
            vec!["john", "smith", "acme", "corp", "com"]
        );
        assert_eq!(tokenize("Mary  Ann, Lee_Jones"), vec!["mary", "ann", "lee", "jones"]);
    }

    #[test]
    fn test_tokenize_drops_empty_fragments() {
        assert_eq!(tokenize("@@john.."), vec!["john"]);
        assert!(tokenize(" ,.-_@ ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_unique_dedups() {
        let keys = unique(all_substrings("aa"));
        assert_eq!(keys.len(), 2);
        assert!(keys.contains("a"));
        assert!(keys.contains("aa"));
    }
}
