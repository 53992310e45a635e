//! Recurring bigram/trigram mining across a review corpus.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::tally::Tally;

pub const MIN_PHRASE_COUNT: usize = 2;
pub const BIGRAM_LIMIT: usize = 15;
pub const TRIGRAM_LIMIT: usize = 10;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "had", "her", "was", "one",
    "our", "out", "has", "have", "been", "this", "that", "with", "they", "from", "will", "would",
    "there", "their", "what", "about", "which", "when", "make", "like", "just", "very", "than",
    "them", "other", "into", "some", "could", "more", "its",
];

static BUILTIN_STOPWORDS: Lazy<Arc<Stopwords>> =
    Lazy::new(|| Arc::new(Stopwords::new(STOPWORDS.iter().copied())));

#[derive(Debug, Clone, Default)]
pub struct Stopwords(HashSet<String>);

impl Stopwords {
    pub fn builtin() -> Arc<Stopwords> {
        BUILTIN_STOPWORDS.clone()
    }

    pub fn new<'a, I: IntoIterator<Item = &'a str>>(words: I) -> Self {
        Self(words.into_iter().map(str::to_lowercase).collect())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseFrequency {
    pub phrase: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringPhrases {
    pub bigrams: Vec<PhraseFrequency>,
    pub trigrams: Vec<PhraseFrequency>,
}

impl RecurringPhrases {
    /// Trigrams first, then bigrams, capped at `limit` (phrase cloud order).
    pub fn cloud(&self, limit: usize) -> Vec<&PhraseFrequency> {
        self.trigrams
            .iter()
            .chain(self.bigrams.iter())
            .take(limit)
            .collect()
    }
}

/// Lowercase, non-letters to spaces, split, drop words of 1–2 chars.
pub fn ngram_words(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Tally bigrams (no stopwords) and trigrams (at most one stopword) over the
/// corpus, keep those seen at least twice, most frequent first.
pub fn mine_recurring_phrases<S: AsRef<str>>(
    stopwords: &Stopwords,
    reviews: &[S],
) -> RecurringPhrases {
    let mut bigrams: Tally<usize> = Tally::new();
    let mut trigrams: Tally<usize> = Tally::new();

    for review in reviews {
        let words = ngram_words(review.as_ref());

        for w in words.windows(2) {
            if !w.iter().any(|p| stopwords.contains(p)) {
                bigrams.bump(&w.join(" "));
            }
        }
        for w in words.windows(3) {
            let content = w.iter().filter(|p| !stopwords.contains(p)).count();
            if content >= 2 {
                trigrams.bump(&w.join(" "));
            }
        }
    }

    RecurringPhrases {
        bigrams: to_freqs(bigrams.top(MIN_PHRASE_COUNT, BIGRAM_LIMIT)),
        trigrams: to_freqs(trigrams.top(MIN_PHRASE_COUNT, TRIGRAM_LIMIT)),
    }
}

fn to_freqs(v: Vec<(String, usize)>) -> Vec<PhraseFrequency> {
    v.into_iter()
        .map(|(phrase, count)| PhraseFrequency { phrase, count })
        .collect()
}
