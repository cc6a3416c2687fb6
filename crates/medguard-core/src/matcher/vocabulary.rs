//! Known-name vocabulary and similarity scoring.

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::db::{Database, DbResult};
use crate::models::MatchBasis;

/// One known name. A name colliding between the molecule and brand sides
/// keeps an entry for each owner; nothing is silently overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct VocabEntry {
    pub name: String,
    pub drug_id: String,
    pub kind: MatchBasis,
}

/// The merged vocabulary of canonical molecule names and brand names.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<VocabEntry>,
}

impl Vocabulary {
    /// Load every molecule and brand name from the record store.
    /// Molecule entries come first; order is otherwise the store's.
    pub fn from_store(db: &Database) -> DbResult<Self> {
        let mut entries = Vec::new();

        for drug in db.list_drugs()? {
            entries.push(VocabEntry {
                name: drug.molecule,
                drug_id: drug.drug_id,
                kind: MatchBasis::Molecule,
            });
        }
        for (brand_name, drug_id) in db.list_brand_mappings()? {
            entries.push(VocabEntry {
                name: brand_name,
                drug_id,
                kind: MatchBasis::Brand,
            });
        }

        Ok(Self { entries })
    }

    /// Build directly from entries (for tests).
    pub fn from_entries(entries: Vec<VocabEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Similarity between a query and a known name on a 0-100 scale, rounded
/// to one decimal. Exact case-insensitive equality scores 100.
pub fn similarity(query: &str, known: &str) -> f64 {
    let q = query.to_lowercase();
    let k = known.to_lowercase();
    if q == k {
        return 100.0;
    }
    // Jaro-Winkler favors shared prefixes (good for typos in printed
    // names); Levenshtein covers overall shape.
    let blended = jaro_winkler(&q, &k) * 0.6 + normalized_levenshtein(&q, &k) * 0.4;
    (blended * 1000.0).round() / 10.0
}
