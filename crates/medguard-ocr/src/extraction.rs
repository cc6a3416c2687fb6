//! Medicine-name extraction from raw prescription text.
//!
//! Handles common Indian prescription formats: a dosage-form prefix
//! ("Tab.", "Syp."), a brand or molecule name, an optional strength
//! number and an optional parenthesized chemical name.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use medguard_core::ExtractedCandidate;

static PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(Tab\.?|Cap\.?|Syp\.?|Inj\.?|Susp\.?|Oint\.?)\s*").unwrap());

// Name like "Dolo 650", "Azithral 500" or "Pan-D"
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9\-]+(?:\s+\d+)?)").unwrap());

static CHEMICAL_HINT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([A-Za-z]+)").unwrap());

/// One medicine line parsed out of the raw text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedMedicine {
    /// The full original line
    pub raw_text: String,
    /// Display name after prefix stripping (may carry a strength number)
    pub extracted_name: String,
    /// Parenthesized chemical name, when the line prints one
    pub chemical_hint: Option<String>,
}

/// Extract candidate medicine lines from raw prescription text.
///
/// Blank lines and lines with no recognizable name are skipped; input
/// order is preserved.
pub fn extract_candidates(text: &str) -> Vec<ExtractedMedicine> {
    let mut medicines = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let cleaned = PREFIX_RE.replace(line, "");
        let Some(name_match) = NAME_RE.captures(&cleaned) else {
            continue;
        };
        let extracted_name = name_match[1].trim().to_string();

        // The hint is searched on the original line, not the cleaned one
        let chemical_hint = CHEMICAL_HINT_RE
            .captures(line)
            .map(|caps| caps[1].to_string());

        medicines.push(ExtractedMedicine {
            raw_text: line.to_string(),
            extracted_name,
            chemical_hint,
        });
    }

    medicines
}

/// Convert extracted lines into matcher input.
pub fn to_candidates(medicines: &[ExtractedMedicine]) -> Vec<ExtractedCandidate> {
    medicines
        .iter()
        .map(|m| ExtractedCandidate {
            raw_text: m.raw_text.clone(),
            extracted_name: m.extracted_name.clone(),
            chemical_hint: m.chemical_hint.clone(),
        })
        .collect()
}
