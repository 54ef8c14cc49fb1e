//! Description keyword frequencies.

use crate::catalog::Catalog;
use std::collections::BTreeMap;

/// Everyday words excluded from the keyword counts.
const STOP_WORDS: &[&str] = &[
    "about", "after", "against", "all", "and", "any", "are", "because", "been", "before", "being",
    "between", "both", "but", "can", "could", "did", "does", "doing", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "her", "here", "hers", "him",
    "his", "how", "into", "its", "itself", "just", "more", "most", "must", "nor", "not", "now",
    "off", "once", "only", "other", "our", "out", "over", "own", "same", "she", "should", "some",
    "such", "than", "that", "the", "their", "them", "then", "there", "these", "they",
    "this", "those", "through", "too", "under", "until", "very", "was", "were", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your",
];

/// Lower-cased word frequencies across all descriptions. Words are split on
/// whitespace with punctuation trimmed from the edges; stop words and words
/// shorter than `min_word_len` are skipped.
pub fn keyword_counts(catalog: &Catalog, min_word_len: usize) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in catalog.iter() {
        let Some(description) = &record.description else {
            continue;
        };
        for word in description.to_lowercase().split_whitespace() {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric());
            if word.len() < min_word_len || STOP_WORDS.contains(&word) {
                continue;
            }
            *counts.entry(word.to_owned()).or_insert(0) += 1;
        }
    }
    counts
}
