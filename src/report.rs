//! # Report
//! Pure composition of the two analyses into one serializable record.
//! No I/O; the HTTP layer and tests call it directly.
//!
//! Sentiment and problem extraction run independently over the same input;
//! review `index` is the only link between their outputs.

use metrics::{counter, histogram};
use serde::Serialize;
use std::time::Instant;

use crate::problems::{PhraseFrequency, ProblemExtractor, ProblemReport};
use crate::sentiment::{CorpusSentiment, Label, SentimentScorer};

/// Phrases shown in the summary cloud.
pub const PHRASE_CLOUD_LIMIT: usize = 12;

/// One table row for the per-review view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRow {
    pub index: usize,
    pub label: Label,
    pub color: &'static str,
    pub score: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub reviews_with_problems: usize,
    pub average_score: f64,
    pub average_label: Label,
    /// Trigrams first, then bigrams.
    pub phrase_cloud: Vec<PhraseFrequency>,
    /// Every review, lowest score first (input order on ties).
    pub rows: Vec<ReviewRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub sentiment: CorpusSentiment,
    pub problems: ProblemReport,
    pub summary: Summary,
}

/// Scorer + extractor pair. Both hold only shared read-only data, so one
/// instance can serve concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    scorer: SentimentScorer,
    extractor: ProblemExtractor,
}

impl Analyzer {
    pub fn new(scorer: SentimentScorer, extractor: ProblemExtractor) -> Self {
        Self { scorer, extractor }
    }

    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    pub fn extractor(&self) -> &ProblemExtractor {
        &self.extractor
    }

    pub fn analyze<S: AsRef<str>>(&self, reviews: &[S]) -> AnalysisReport {
        let t0 = Instant::now();

        let sentiment = self.scorer.analyze_corpus(reviews);
        let problems = self.extractor.extract_problems(reviews);
        let summary = summarize(&sentiment, &problems);

        counter!("analysis_runs_total").increment(1);
        counter!("analysis_reviews_total").increment(reviews.len() as u64);
        histogram!("analysis_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

        AnalysisReport {
            sentiment,
            problems,
            summary,
        }
    }
}

fn summarize(s: &CorpusSentiment, p: &ProblemReport) -> Summary {
    let mut rows: Vec<ReviewRow> = s
        .results
        .iter()
        .map(|r| ReviewRow {
            index: r.index,
            label: r.label,
            color: r.label.color(),
            score: r.score,
            text: r.text.clone(),
        })
        .collect();
    rows.sort_by(|a, b| a.score.total_cmp(&b.score));

    Summary {
        total: s.total,
        positive: s.positive,
        negative: s.negative,
        neutral: s.neutral,
        reviews_with_problems: p.reviews_with_problems,
        average_score: s.average_score,
        average_label: Label::from_score(s.average_score),
        phrase_cloud: p
            .recurring_phrases
            .cloud(PHRASE_CLOUD_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
        rows,
    }
}
