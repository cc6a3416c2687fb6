//! Immutable reference records owned by the record store.

use serde::{Deserialize, Serialize};

use super::{InteractionSeverity, Severity};

/// Master record for one drug molecule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugRecord {
    /// Stable identifier (e.g. "D03")
    pub drug_id: String,
    /// Canonical molecule name (e.g. "Ibuprofen")
    pub molecule: String,
    /// Class description (e.g. "NSAID", "Macrolide antibiotic")
    pub drug_class: String,
    /// Human-readable usage description
    pub common_use: Option<String>,
    /// Free-text caution notes ("Avoid in elderly, renal impairment")
    pub avoid_in: Option<String>,
    /// Free-text alcohol warning
    pub alcohol_warning: Option<String>,
    /// Source citation for the record
    pub source: Option<String>,
}

impl DrugRecord {
    /// Create a record with required fields only.
    pub fn new(drug_id: String, molecule: String, drug_class: String) -> Self {
        Self {
            drug_id,
            molecule,
            drug_class,
            common_use: None,
            avoid_in: None,
            alcohol_warning: None,
            source: None,
        }
    }

    /// Whether the class description marks this drug as an antibiotic.
    pub fn is_antibiotic(&self) -> bool {
        self.drug_class.to_lowercase().contains("antibiotic")
    }
}

/// A known interaction between an unordered pair of molecules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InteractionRecord {
    pub drug_a: String,
    pub drug_b: String,
    pub mechanism: Option<String>,
    pub clinical_effect: Option<String>,
    pub severity: InteractionSeverity,
    pub source: String,
}

/// A known adverse reaction for one drug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdverseReactionRecord {
    pub drug_id: String,
    /// Layman symptom description
    pub symptom: String,
    /// Clinical severity descriptor (serious, moderate, mild)
    pub severity: String,
    /// Frequency descriptor (common, rare, ...)
    pub frequency: Option<String>,
    /// Authored risk tier, copied verbatim into flags
    pub risk_level: Severity,
    pub advice: Option<String>,
    pub source: String,
}

/// A food or alcohol interaction keyed by molecule name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodAlcoholRecord {
    pub molecule: String,
    /// Trigger item, e.g. "Alcohol", "Grapefruit"
    pub trigger: String,
    pub risk_level: Severity,
    pub message: Option<String>,
    pub source: String,
}

/// Antimicrobial-resistance risk tier of a molecule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AmrRiskTier {
    High,
    Medium,
    Low,
}

impl AmrRiskTier {
    /// Parse a stored label; unrecognized reads as `Low` (no flag fires).
    pub fn from_label(label: &str) -> AmrRiskTier {
        match label.to_lowercase().as_str() {
            "high" => AmrRiskTier::High,
            "medium" => AmrRiskTier::Medium,
            _ => AmrRiskTier::Low,
        }
    }
}

/// Antimicrobial-resistance risk record for a molecule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmrRiskRecord {
    pub molecule: String,
    pub amr_risk: AmrRiskTier,
    /// WHO AWaRe stewardship category (Access, Watch, Reserve)
    pub aware_category: Option<String>,
    pub common_misuse: Option<String>,
    pub source: String,
}

/// A stewardship advisory rule for antibiotic misuse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StewardshipRule {
    pub rule_id: String,
    pub condition: Option<String>,
    pub recommendation: String,
    pub risk_level: Severity,
    pub source: String,
}
