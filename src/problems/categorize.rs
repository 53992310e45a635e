//! Review → complaint category matching.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Serialize as DeriveSerialize;

use super::catalog::{Catalog, Category};
use crate::sentiment::round_to;

/// How many keywords a category card shows.
pub const TOP_KEYWORDS_LIMIT: usize = 6;

/// Keyword → hit count, in first-hit order. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordCounts(Vec<(String, usize)>);

impl KeywordCounts {
    fn bump(&mut self, keyword: &str) {
        match self.0.iter_mut().find(|(k, _)| k == keyword) {
            Some((_, c)) => *c += 1,
            None => self.0.push((keyword.to_string(), 1)),
        }
    }

    pub fn get(&self, keyword: &str) -> Option<usize> {
        self.0.iter().find(|(k, _)| k == keyword).map(|(_, c)| *c)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Highest counts first, ties in first-hit order.
    pub fn top(&self, limit: usize) -> Vec<KeywordCount> {
        let mut v: Vec<KeywordCount> = self
            .0
            .iter()
            .map(|(k, c)| KeywordCount {
                keyword: k.clone(),
                count: *c,
            })
            .collect();
        v.sort_by(|a, b| b.count.cmp(&a.count));
        v.truncate(limit);
        v
    }
}

impl Serialize for KeywordCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, c) in &self.0 {
            map.serialize_entry(k, c)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, DeriveSerialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, DeriveSerialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedReview {
    pub index: usize,
    pub text: String,
    pub matched_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, DeriveSerialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMatch {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub keywords: Vec<String>,
    pub matched_reviews: Vec<MatchedReview>,
    pub matched_keywords: KeywordCounts,
    /// Share of the corpus matched, as a rounded percentage.
    pub percent: u32,
    pub top_keywords: Vec<KeywordCount>,
}

impl CategoryMatch {
    fn empty(c: &Category) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
            icon: c.icon.clone(),
            keywords: c.keywords.clone(),
            matched_reviews: Vec::new(),
            matched_keywords: KeywordCounts::default(),
            percent: 0,
            top_keywords: Vec::new(),
        }
    }

    pub fn mentions(&self) -> usize {
        self.matched_reviews.len()
    }
}

/// Match every review against every category; keep categories with at least
/// one matched review, most-matched first (catalog order on ties).
pub fn categorize<S: AsRef<str>>(catalog: &Catalog, reviews: &[S]) -> Vec<CategoryMatch> {
    let mut out: Vec<CategoryMatch> = catalog.categories().iter().map(CategoryMatch::empty).collect();

    for (idx, review) in reviews.iter().enumerate() {
        let review = review.as_ref();
        let lowered = review.to_lowercase();
        for (cat, m) in catalog.categories().iter().zip(out.iter_mut()) {
            let hits = cat.matches(&lowered);
            if hits.is_empty() {
                continue;
            }
            let matched: Vec<String> = hits.iter().map(|&i| cat.keywords[i].clone()).collect();
            for kw in &matched {
                m.matched_keywords.bump(kw);
            }
            m.matched_reviews.push(MatchedReview {
                index: idx,
                text: review.to_string(),
                matched_keywords: matched,
            });
        }
    }

    let total = reviews.len();
    let mut out: Vec<CategoryMatch> = out
        .into_iter()
        .filter(|m| !m.matched_reviews.is_empty())
        .map(|mut m| {
            m.percent = round_to(m.mentions() as f64 / total as f64 * 100.0, 0) as u32;
            m.top_keywords = m.matched_keywords.top(TOP_KEYWORDS_LIMIT);
            m
        })
        .collect();
    out.sort_by(|a, b| b.mentions().cmp(&a.mentions()));
    out
}
