//! Shared text utilities used by the scoring heuristics.

use regex::Regex;
use std::collections::HashSet;

/// Truncate a string to approximately `max_bytes` without splitting a UTF-8
/// character boundary.
///
/// Returns a sub-slice of the original string. If the string is shorter than
/// `max_bytes`, the entire string is returned unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Lowercased alphanumeric words of `text`, in order of appearance.
///
/// Apostrophes are kept inside words so "don't" stays a single token.
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\'').to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Distinct lowercased words of `text`.
pub fn word_set(text: &str) -> HashSet<String> {
    words(text).into_iter().collect()
}

/// Whether `words` contains `keyword`, also accepting a trailing plural "s".
pub fn has_keyword(words: &HashSet<String>, keyword: &str) -> bool {
    if keyword.contains(' ') {
        return false;
    }
    words.contains(keyword) || words.contains(&format!("{keyword}s"))
}

/// Case-insensitive matcher for `phrase` on word boundaries.
///
/// Words of the phrase may be separated by any run of whitespace in the
/// matched text. Returns `None` for a blank phrase.
pub fn phrase_regex(phrase: &str) -> Option<Regex> {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?i)\b{}\b", words.join(r"\s+"))).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn truncate_no_op_when_short() {
        assert_eq!(truncate_str("hi", 10), "hi");
    }

    #[test]
    fn truncate_multibyte_boundary() {
        let s = "あのね";
        assert_eq!(truncate_str(s, 4), "あ");
        assert_eq!(truncate_str(s, 6), "あの");
    }

    #[test]
    fn words_split_on_punctuation() {
        assert_eq!(
            words("Hello, World! Don't panic?"),
            vec!["hello", "world", "don't", "panic"]
        );
    }

    #[test]
    fn keyword_accepts_plural() {
        let set = word_set("New algorithms everywhere");
        assert!(has_keyword(&set, "algorithm"));
        assert!(!has_keyword(&set, "code"));
    }

    #[test]
    fn phrase_respects_word_boundaries() {
        let hi = phrase_regex("hi").unwrap();
        assert!(hi.is_match("hi there"));
        assert!(!hi.is_match("this is it"));
        assert!(hi.is_match("this and HI"));
    }

    #[test]
    fn phrase_tolerates_whitespace_runs() {
        let re = phrase_regex("free will").unwrap();
        assert!(re.is_match("Is free will real?"));
        assert!(re.is_match("is free  will real"));
        assert!(re.is_match("is free\nwill real"));
        assert!(!re.is_match("freewill"));
    }

    #[test]
    fn phrase_escapes_metacharacters() {
        let re = phrase_regex("a.i").unwrap();
        assert!(re.is_match("the a.i thing"));
        assert!(!re.is_match("the axi thing"));
        assert!(phrase_regex("   ").is_none());
    }
}
