//! # Sentiment Scorer
//! Lexicon-based polarity scoring of single reviews, plus corpus aggregation.
//!
//! A review is tokenized, then walked left to right once. Negation and
//! intensifier words do not score on their own; they arm a pending modifier
//! that applies to the next lexicon word only and is dropped by any other
//! token.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

use crate::debug::anon_hash;
use crate::tally::Tally;

/// Number of entries kept in [`CorpusSentiment::top_words`].
pub const TOP_WORDS_LIMIT: usize = 20;

static BUILTIN_LEXICON: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    Arc::new(Lexicon::from_json(raw).expect("valid sentiment lexicon"))
});

static BUILTIN_MODIFIERS: Lazy<Arc<Modifiers>> = Lazy::new(|| Arc::new(Modifiers::builtin()));

/// Word → integer polarity weight (roughly -5..=5). Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    weights: HashMap<String, i32>,
}

impl Lexicon {
    /// Shared copy of the embedded lexicon.
    pub fn builtin() -> Arc<Lexicon> {
        BUILTIN_LEXICON.clone()
    }

    /// Parse a JSON object of `{"word": weight}`. Keys are lowercased.
    pub fn from_json(raw: &str) -> Result<Self> {
        let map: HashMap<String, i32> =
            serde_json::from_str(raw).context("parsing sentiment lexicon json")?;
        Ok(Self::from_pairs(map))
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: AsRef<str>,
    {
        let weights = pairs
            .into_iter()
            .map(|(w, v)| (w.as_ref().to_lowercase(), v))
            .collect();
        Self { weights }
    }

    #[inline]
    pub fn get(&self, word: &str) -> Option<i32> {
        self.weights.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Negation words and intensifier multipliers.
#[derive(Debug, Clone)]
pub struct Modifiers {
    negations: HashSet<String>,
    intensifiers: HashMap<String, f64>,
}

const NEGATIONS: &[&str] = &[
    "not", "don't", "doesn't", "didn't", "won't", "wouldn't", "couldn't", "shouldn't", "isn't",
    "aren't", "wasn't", "weren't", "no", "never", "neither", "nor", "hardly", "barely",
    "scarcely", "nothing",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.5),
    ("really", 1.5),
    ("extremely", 2.0),
    ("absolutely", 2.0),
    ("totally", 1.5),
    ("completely", 1.5),
    ("incredibly", 2.0),
    ("super", 1.8),
    ("so", 1.4),
    ("too", 1.3),
    ("pretty", 1.2),
    ("quite", 1.3),
    ("somewhat", 0.7),
    ("slightly", 0.5),
];

impl Modifiers {
    pub fn builtin() -> Self {
        Self::new(
            NEGATIONS.iter().copied(),
            INTENSIFIERS.iter().map(|&(w, m)| (w, m)),
        )
    }

    pub fn new<'a, N, I>(negations: N, intensifiers: I) -> Self
    where
        N: IntoIterator<Item = &'a str>,
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        Self {
            negations: negations.into_iter().map(str::to_string).collect(),
            intensifiers: intensifiers
                .into_iter()
                .map(|(w, m)| (w.to_string(), m))
                .collect(),
        }
    }

    pub fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(token)
    }

    pub fn intensity(&self, token: &str) -> Option<f64> {
        self.intensifiers.get(token).copied()
    }
}

/// Sentiment class of a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Neutral,
    Negative,
}

impl Label {
    /// `> 1` positive, `< -1` negative; the boundaries themselves are neutral.
    pub fn from_score(score: f64) -> Self {
        if score > 1.0 {
            Label::Positive
        } else if score < -1.0 {
            Label::Negative
        } else {
            Label::Neutral
        }
    }

    /// Display color used by the report UI.
    pub fn color(self) -> &'static str {
        match self {
            Label::Positive => "#00e676",
            Label::Negative => "#ff5252",
            Label::Neutral => "#ffd740",
        }
    }
}

/// One lexicon hit, after negation/intensifier adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredWord {
    pub word: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    pub index: usize,
    pub text: String,
    pub score: f64,
    pub comparative: f64,
    pub label: Label,
    pub words: Vec<ScoredWord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopWord {
    pub word: String,
    pub count: usize,
    pub total_score: f64,
    pub avg_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusSentiment {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub average_score: f64,
    pub most_positive: Option<ReviewResult>,
    pub most_negative: Option<ReviewResult>,
    pub top_words: Vec<TopWord>,
    pub results: Vec<ReviewResult>,
}

/// Lowercase, keep `[a-z'-]`, split on whitespace, drop 1-char tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c == '\'' || c == '-' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|t| t.len() > 1)
        .map(str::to_string)
        .collect()
}

/// Round half toward +infinity to `decimals` places; `-0` becomes `0`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let f = 10f64.powi(decimals);
    let r = (value * f + 0.5).floor() / f;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

/// Modifier armed by negation/intensifier tokens, consumed by the next token.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    negated: bool,
    multiplier: f64,
}

impl Default for Pending {
    fn default() -> Self {
        Self {
            negated: false,
            multiplier: 1.0,
        }
    }
}

impl Pending {
    fn weigh(self, base: i32) -> f64 {
        let w = round_to(f64::from(base) * self.multiplier, 1);
        if self.negated && w != 0.0 {
            -w
        } else {
            w
        }
    }
}

enum Step {
    Negate,
    Intensify(f64),
    Hit(i32),
    Miss,
}

#[derive(Debug, Clone)]
pub struct SentimentScorer {
    lexicon: Arc<Lexicon>,
    modifiers: Arc<Modifiers>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(Lexicon::builtin(), BUILTIN_MODIFIERS.clone())
    }
}

impl SentimentScorer {
    pub fn new(lexicon: Arc<Lexicon>, modifiers: Arc<Modifiers>) -> Self {
        Self { lexicon, modifiers }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn classify(&self, token: &str) -> Step {
        if self.modifiers.is_negation(token) {
            Step::Negate
        } else if let Some(m) = self.modifiers.intensity(token) {
            Step::Intensify(m)
        } else if let Some(w) = self.lexicon.get(token) {
            Step::Hit(w)
        } else {
            Step::Miss
        }
    }

    /// Score one review. The returned `index` is 0; use
    /// [`SentimentScorer::analyze_corpus`] for positional indices.
    pub fn score_review(&self, text: &str) -> ReviewResult {
        self.score_at(0, text)
    }

    fn score_at(&self, index: usize, text: &str) -> ReviewResult {
        let tokens = tokenize(text);
        let mut pending = Pending::default();
        let mut total = 0.0f64;
        let mut words = Vec::new();

        for tok in &tokens {
            match self.classify(tok) {
                Step::Negate => pending.negated = true,
                Step::Intensify(m) => pending.multiplier = m,
                Step::Hit(base) => {
                    let score = pending.weigh(base);
                    total += score;
                    words.push(ScoredWord {
                        word: tok.clone(),
                        score,
                    });
                    pending = Pending::default();
                }
                Step::Miss => pending = Pending::default(),
            }
        }

        let comparative = if tokens.is_empty() {
            0.0
        } else {
            total / tokens.len() as f64
        };
        let score = round_to(total, 2);

        ReviewResult {
            index,
            text: text.to_string(),
            score,
            comparative: round_to(comparative, 3),
            label: Label::from_score(score),
            words,
        }
    }

    /// Score every review (keeping input positions) and aggregate.
    pub fn analyze_corpus<S: AsRef<str>>(&self, reviews: &[S]) -> CorpusSentiment {
        let results: Vec<ReviewResult> = reviews
            .iter()
            .enumerate()
            .map(|(i, r)| self.score_at(i, r.as_ref()))
            .collect();

        let count = |l: Label| results.iter().filter(|r| r.label == l).count();
        let (positive, negative, neutral) =
            (count(Label::Positive), count(Label::Negative), count(Label::Neutral));

        let average_score = if results.is_empty() {
            0.0
        } else {
            let sum: f64 = results.iter().map(|r| r.score).sum();
            round_to(sum / results.len() as f64, 2)
        };

        // Same picks as a stable ascending sort: first minimum, last maximum.
        let mut lo: Option<&ReviewResult> = None;
        let mut hi: Option<&ReviewResult> = None;
        for r in &results {
            if lo.map_or(true, |l| r.score < l.score) {
                lo = Some(r);
            }
            if hi.map_or(true, |h| r.score >= h.score) {
                hi = Some(r);
            }
        }
        let most_negative = lo.cloned();
        let most_positive = hi.cloned();

        let top_words = top_words(&results, TOP_WORDS_LIMIT);

        debug!(
            target: "sentiment",
            corpus = %anon_hash(reviews.iter().map(|r| r.as_ref())),
            total = results.len(),
            positive,
            negative,
            neutral,
            average_score,
            "corpus scored"
        );

        CorpusSentiment {
            total: results.len(),
            positive,
            negative,
            neutral,
            average_score,
            most_positive,
            most_negative,
            top_words,
            results,
        }
    }
}

#[derive(Debug, Default)]
struct WordAcc {
    count: usize,
    total: f64,
}

fn top_words(results: &[ReviewResult], limit: usize) -> Vec<TopWord> {
    let mut tally: Tally<WordAcc> = Tally::new();
    for w in results.iter().flat_map(|r| r.words.iter()) {
        let acc = tally.entry(&w.word);
        acc.count += 1;
        acc.total += w.score;
    }

    let mut out: Vec<TopWord> = tally
        .into_entries()
        .into_iter()
        .map(|(word, acc)| TopWord {
            word,
            count: acc.count,
            total_score: acc.total,
            avg_score: acc.total / acc.count as f64,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out.truncate(limit);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> SentimentScorer {
        let lex = Lexicon::from_pairs([("good", 3), ("bad", -3), ("great", 3), ("slow", -2)]);
        SentimentScorer::new(Arc::new(lex), Arc::new(Modifiers::builtin()))
    }

    #[test]
    fn tokenize_strips_punctuation_and_short_tokens() {
        let toks = tokenize("It's GREAT!! a b well-made 5/5");
        assert_eq!(toks, vec!["it's", "great", "well-made"]);
    }

    #[test]
    fn negation_flips_next_hit() {
        let s = scorer();
        assert_eq!(s.score_review("good").score, 3.0);
        assert_eq!(s.score_review("not good").score, -3.0);
    }

    #[test]
    fn intensifier_then_negation_combine() {
        let s = scorer();
        let r = s.score_review("not very good");
        assert_eq!(r.score, -4.5);
        assert_eq!(r.words, vec![ScoredWord { word: "good".into(), score: -4.5 }]);
    }

    #[test]
    fn modifiers_do_not_leak_past_a_miss() {
        let s = scorer();
        // "app" consumes the negation, so "great" stays positive
        assert_eq!(s.score_review("not app great").score, 3.0);
        assert_eq!(s.score_review("very app great").score, 3.0);
        // trailing modifiers have no effect
        assert_eq!(s.score_review("great very").score, 3.0);
        assert_eq!(s.score_review("great not").score, 3.0);
    }

    #[test]
    fn modifier_resets_after_hit() {
        let s = scorer();
        // negation applies to "bad" only, "good" afterwards is untouched
        assert_eq!(s.score_review("never bad good").score, 6.0);
    }

    #[test]
    fn comparative_divides_by_all_tokens() {
        let s = scorer();
        let r = s.score_review("the app is good");
        assert_eq!(r.score, 3.0);
        assert_eq!(r.comparative, 0.75);
    }

    #[test]
    fn label_boundaries_are_neutral() {
        assert_eq!(Label::from_score(1.0), Label::Neutral);
        assert_eq!(Label::from_score(-1.0), Label::Neutral);
        assert_eq!(Label::from_score(1.01), Label::Positive);
        assert_eq!(Label::from_score(-1.01), Label::Negative);
    }

    #[test]
    fn rounding_matches_half_up() {
        assert_eq!(round_to(-0.0625, 3), -0.062);
        assert_eq!(round_to(0.0625, 3), 0.063);
        assert_eq!(round_to(-0.04, 1), 0.0);
        assert!(round_to(-0.04, 1).is_sign_positive());
    }

    #[test]
    fn slightly_scales_down() {
        let s = scorer();
        assert_eq!(s.score_review("slightly slow").score, -1.0);
        assert_eq!(s.score_review("slightly slow").label, Label::Neutral);
    }

    #[test]
    fn empty_corpus_has_no_extremes() {
        let s = scorer();
        let c = s.analyze_corpus::<&str>(&[]);
        assert_eq!(c.total, 0);
        assert_eq!((c.positive, c.negative, c.neutral), (0, 0, 0));
        assert_eq!(c.average_score, 0.0);
        assert!(c.most_positive.is_none() && c.most_negative.is_none());
        assert!(c.top_words.is_empty());
    }

    #[test]
    fn extremes_tie_break_by_position() {
        let s = scorer();
        let c = s.analyze_corpus(&["good", "bad", "good", "bad"]);
        assert_eq!(c.most_negative.as_ref().map(|r| r.index), Some(1));
        assert_eq!(c.most_positive.as_ref().map(|r| r.index), Some(2));
    }

    #[test]
    fn top_words_sorted_by_count_then_first_seen() {
        let s = scorer();
        let c = s.analyze_corpus(&["bad good", "good great", "not bad"]);
        let words: Vec<(&str, usize)> =
            c.top_words.iter().map(|w| (w.word.as_str(), w.count)).collect();
        assert_eq!(words, vec![("bad", 2), ("good", 2), ("great", 1)]);
        assert_eq!(c.top_words[0].avg_score, 0.0);
    }
}
