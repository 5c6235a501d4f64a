use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-zA-Z]+\b").unwrap());

/// Distinct lowercase words longer than two letters. Digits and punctuation are dropped.
pub fn tokenize_text(text: &str) -> HashSet<String> {
    WORD.find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|word| word.len() > 2)
        .collect()
}

/// Query words in the order typed, first occurrence only, tokenized like indexed text.
pub fn tokenize_query(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    WORD.find_iter(&query.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|word| word.len() > 2)
        .filter(|word| seen.insert(word.clone()))
        .collect()
}
