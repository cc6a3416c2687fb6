//! Candidate-matching models for the scanned-prescription pipeline.

use serde::{Deserialize, Serialize};

/// A candidate medicine extracted from raw scanned text, ready for
/// vocabulary matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedCandidate {
    /// The raw line the candidate came from
    pub raw_text: String,
    /// Display-name guess (usually the printed brand name)
    pub extracted_name: String,
    /// Parenthesized chemical-name hint, when present
    pub chemical_hint: Option<String>,
}

/// Which side of the vocabulary a match came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchBasis {
    /// Canonical molecule name
    Molecule,
    /// Brand or alias name
    Brand,
}

/// One scored vocabulary hit for a candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateHit {
    pub matched_name: String,
    pub drug_id: String,
    /// Confidence score on a 0-100 scale, rounded to one decimal
    pub confidence: f64,
    pub basis: MatchBasis,
}

/// All hits for one extracted candidate.
///
/// `requires_confirmation` is structural: it is always true and nothing
/// downstream may bypass it. Matches are never written to the timeline;
/// only the explicit confirmation gate does that, one drug id at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateMatch {
    pub raw_text: String,
    pub extracted_name: String,
    /// Hits sorted descending by confidence (stable on ties)
    pub candidates: Vec<CandidateHit>,
    pub requires_confirmation: bool,
    /// Fixed educational disclaimer.
    pub disclaimer: String,
}
