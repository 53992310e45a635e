// src/problems/mod.rs
//! Problem Extractor: complaint categories + recurring phrases over a corpus.

pub mod catalog;
pub mod categorize;
pub mod phrases;

use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

pub use catalog::{Catalog, Category, CategoryDef, CATEGORIES};
pub use categorize::{categorize, CategoryMatch, KeywordCount, KeywordCounts, MatchedReview};
pub use phrases::{mine_recurring_phrases, PhraseFrequency, RecurringPhrases, Stopwords};

use crate::debug::{anon_hash, truncate_vec};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemReport {
    pub categories: Vec<CategoryMatch>,
    pub total_reviews: usize,
    pub reviews_with_problems: usize,
    pub recurring_phrases: RecurringPhrases,
}

/// Holds the read-only catalog and stopword set; cheap to clone and share.
#[derive(Debug, Clone)]
pub struct ProblemExtractor {
    catalog: Arc<Catalog>,
    stopwords: Arc<Stopwords>,
}

impl Default for ProblemExtractor {
    fn default() -> Self {
        Self::new(Catalog::builtin(), Stopwords::builtin())
    }
}

impl ProblemExtractor {
    pub fn new(catalog: Arc<Catalog>, stopwords: Arc<Stopwords>) -> Self {
        Self { catalog, stopwords }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn categorize<S: AsRef<str>>(&self, reviews: &[S]) -> Vec<CategoryMatch> {
        categorize(&self.catalog, reviews)
    }

    pub fn mine_recurring_phrases<S: AsRef<str>>(&self, reviews: &[S]) -> RecurringPhrases {
        mine_recurring_phrases(&self.stopwords, reviews)
    }

    pub fn extract_problems<S: AsRef<str>>(&self, reviews: &[S]) -> ProblemReport {
        let categories = self.categorize(reviews);
        let recurring_phrases = self.mine_recurring_phrases(reviews);

        let with_problems: BTreeSet<usize> = categories
            .iter()
            .flat_map(|c| c.matched_reviews.iter().map(|r| r.index))
            .collect();

        let ids: Vec<&str> = categories.iter().map(|c| c.id.as_str()).collect();
        debug!(
            target: "problems",
            corpus = %anon_hash(reviews.iter().map(|r| r.as_ref())),
            total = reviews.len(),
            with_problems = with_problems.len(),
            categories = ?truncate_vec(&ids, 5),
            bigrams = recurring_phrases.bigrams.len(),
            trigrams = recurring_phrases.trigrams.len(),
            "problems extracted"
        );

        ProblemReport {
            categories,
            total_reviews: reviews.len(),
            reviews_with_problems: with_problems.len(),
            recurring_phrases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_valid() {
        let p = ProblemExtractor::default().extract_problems::<&str>(&[]);
        assert!(p.categories.is_empty());
        assert_eq!(p.total_reviews, 0);
        assert_eq!(p.reviews_with_problems, 0);
        assert_eq!(p.recurring_phrases, RecurringPhrases::default());
    }

    #[test]
    fn review_in_many_categories_counts_once() {
        let p = ProblemExtractor::default()
            .extract_problems(&["slow, buggy and drains battery", "lovely"]);
        assert!(p.categories.len() >= 3);
        assert_eq!(p.reviews_with_problems, 1);
        assert_eq!(p.total_reviews, 2);
    }
}
