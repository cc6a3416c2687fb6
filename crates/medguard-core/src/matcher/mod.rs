//! Fuzzy matching of extracted medicine names against the drug vocabulary.
//!
//! Matching is a suggestion step only. Every [`CandidateMatch`] carries
//! `requires_confirmation = true`; nothing reaches the timeline until a
//! human picks a candidate and [`confirm::confirm_medicine`] runs.

mod confirm;
mod vocabulary;

pub use confirm::confirm_medicine;
pub use vocabulary::{similarity, VocabEntry, Vocabulary};

use thiserror::Error;
use tracing::debug;

use crate::db::{Database, DbError};
use crate::models::{CandidateHit, CandidateMatch, ExtractedCandidate};

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("database error: {0}")]
    Database(#[from] DbError),

    #[error("drug not found: {0}")]
    DrugNotFound(String),
}

pub type MatchResult<T> = Result<T, MatchError>;

/// Minimum confidence (0-100) for a vocabulary hit to be suggested.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 60.0;

/// Candidates kept per scoring pass.
const TOP_N: usize = 3;

pub struct Matcher {
    vocabulary: Vocabulary,
    threshold: f64,
}

impl Matcher {
    /// Build a matcher over the current contents of the record store.
    pub fn from_store(db: &Database) -> MatchResult<Self> {
        Ok(Self {
            vocabulary: Vocabulary::from_store(db)?,
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        })
    }

    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Match one extracted candidate. The chemical hint, when present, is
    /// scored first; the printed display name scored after. Hits are merged,
    /// deduplicated by (name, drug) and sorted by descending confidence.
    pub fn match_candidate(&self, candidate: &ExtractedCandidate) -> CandidateMatch {
        let mut hits: Vec<CandidateHit> = Vec::new();

        if let Some(hint) = &candidate.chemical_hint {
            self.score_query(hint, &mut hits);
        }
        self.score_query(&candidate.extracted_name, &mut hits);

        hits.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(
            query = %candidate.extracted_name,
            hits = hits.len(),
            "matched extracted candidate"
        );

        CandidateMatch {
            raw_text: candidate.raw_text.clone(),
            extracted_name: candidate.extracted_name.clone(),
            candidates: hits,
            requires_confirmation: true,
            disclaimer: crate::DISCLAIMER.into(),
        }
    }

    /// Match a batch of extracted candidates in input order.
    pub fn match_all(&self, candidates: &[ExtractedCandidate]) -> Vec<CandidateMatch> {
        candidates.iter().map(|c| self.match_candidate(c)).collect()
    }

    /// Score `query` against the whole vocabulary, appending the top hits
    /// above the threshold. Hits whose (name, drug) pair is already present
    /// from an earlier pass are skipped.
    fn score_query(&self, query: &str, hits: &mut Vec<CandidateHit>) {
        let mut scored: Vec<CandidateHit> = self
            .vocabulary
            .entries()
            .iter()
            .map(|entry| CandidateHit {
                matched_name: entry.name.clone(),
                drug_id: entry.drug_id.clone(),
                confidence: similarity(query, &entry.name),
                basis: entry.kind,
            })
            .filter(|hit| hit.confidence >= self.threshold)
            .collect();

        scored.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for hit in scored.into_iter().take(TOP_N) {
            let seen = hits
                .iter()
                .any(|h| h.matched_name == hit.matched_name && h.drug_id == hit.drug_id);
            if !seen {
                hits.push(hit);
            }
        }
    }
}
