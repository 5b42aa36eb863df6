// Lightweight text analysis for the built-in scorers.
// Each scorer owns its own Tokenizer; nothing here is process-global.

use regex::Regex;
use std::collections::HashSet;

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
    "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Word and sentence splitter with an English stop word list
pub struct Tokenizer {
    word: Regex,
    sentence_end: Regex,
    stop_words: HashSet<&'static str>,
}

impl Tokenizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            word: Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}]+)*")?,
            sentence_end: Regex::new(r"[.!?]+(?:\s+|$)|\n+")?,
            stop_words: STOP_WORDS.iter().copied().collect(),
        })
    }

    /// Word tokens, punctuation dropped
    pub fn words<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.word.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// Sentences with their terminal punctuation removed; blanks skipped
    pub fn sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.sentence_end
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn is_stop(&self, word: &str) -> bool {
        self.stop_words.contains(word.to_lowercase().as_str())
    }

    /// Capitalised word that is not a function word
    pub fn is_proper_noun(&self, word: &str) -> bool {
        word.chars().next().is_some_and(char::is_uppercase) && !self.is_stop(word)
    }

    /// Jaccard overlap of the lower-cased content words of `a` and `b`
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        let left = self.content_words(a);
        let right = self.content_words(b);
        if left.is_empty() || right.is_empty() {
            return 0.0;
        }
        let shared = left.intersection(&right).count();
        let total = left.union(&right).count();
        shared as f64 / total as f64
    }

    fn content_words(&self, text: &str) -> HashSet<String> {
        self.words(text)
            .into_iter()
            .filter(|w| !self.is_stop(w))
            .map(str::to_lowercase)
            .collect()
    }
}
