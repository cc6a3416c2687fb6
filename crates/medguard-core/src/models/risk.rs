//! Risk flags and assessment output.

use serde::{Deserialize, Serialize};

/// Traffic-light severity tier. Total order: `Red > Yellow > Green`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Green,
    Yellow,
    Red,
}

impl Severity {
    /// Numeric priority used for aggregation (red 3, yellow 2, green 1).
    pub fn priority(self) -> u8 {
        match self {
            Severity::Red => 3,
            Severity::Yellow => 2,
            Severity::Green => 1,
        }
    }

    /// Parse a stored tier label. Unknown labels degrade to `Green` so a
    /// malformed reference row never blocks the rules that did fire.
    pub fn from_label(label: &str) -> Severity {
        match label.to_lowercase().as_str() {
            "red" => Severity::Red,
            "yellow" => Severity::Yellow,
            _ => Severity::Green,
        }
    }

    /// Stored label form.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Red => "red",
            Severity::Yellow => "yellow",
            Severity::Green => "green",
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Authored severity tier of an interaction record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InteractionSeverity {
    Serious,
    Moderate,
    Mild,
}

impl InteractionSeverity {
    /// Parse a stored label; anything unrecognized reads as `Mild`.
    pub fn from_label(label: &str) -> InteractionSeverity {
        match label.to_lowercase().as_str() {
            "serious" => InteractionSeverity::Serious,
            "moderate" => InteractionSeverity::Moderate,
            _ => InteractionSeverity::Mild,
        }
    }

    /// Map to the flag tier: serious is red, moderate is yellow,
    /// everything else green.
    pub fn to_severity(self) -> Severity {
        match self {
            InteractionSeverity::Serious => Severity::Red,
            InteractionSeverity::Moderate => Severity::Yellow,
            InteractionSeverity::Mild => Severity::Green,
        }
    }
}

/// A single generated safety flag.
///
/// Flags are transient: generated fresh per assessment, never persisted.
/// Every variant carries at least one source citation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Flag {
    /// Known adverse drug reaction.
    Adr {
        severity: Severity,
        drug: String,
        symptom: String,
        /// Clinical severity descriptor from the record (e.g. "serious").
        clinical_severity: String,
        advice: String,
        sources: Vec<String>,
    },
    /// Drug-drug interaction between two molecules.
    Interaction {
        severity: Severity,
        drug_a: String,
        drug_b: String,
        mechanism: String,
        effect: String,
        sources: Vec<String>,
    },
    /// Alcohol interaction for a reported drinker.
    Alcohol {
        severity: Severity,
        drug: String,
        message: String,
        sources: Vec<String>,
    },
    /// Caution for patients aged 65 or over.
    Elderly {
        severity: Severity,
        drug: String,
        message: String,
        sources: Vec<String>,
    },
    /// Standing antimicrobial-resistance risk of the molecule itself.
    Amr {
        severity: Severity,
        drug: String,
        message: String,
        aware_category: Option<String>,
        sources: Vec<String>,
    },
    /// Behavioral flag for missed antibiotic doses.
    MissedDoses {
        severity: Severity,
        drug: String,
        missed: u32,
        message: String,
        sources: Vec<String>,
    },
}

impl Flag {
    /// Severity tier of this flag.
    pub fn severity(&self) -> Severity {
        match self {
            Flag::Adr { severity, .. }
            | Flag::Interaction { severity, .. }
            | Flag::Alcohol { severity, .. }
            | Flag::Elderly { severity, .. }
            | Flag::Amr { severity, .. }
            | Flag::MissedDoses { severity, .. } => *severity,
        }
    }

    /// Source citations backing this flag (never empty).
    pub fn sources(&self) -> &[String] {
        match self {
            Flag::Adr { sources, .. }
            | Flag::Interaction { sources, .. }
            | Flag::Alcohol { sources, .. }
            | Flag::Elderly { sources, .. }
            | Flag::Amr { sources, .. }
            | Flag::MissedDoses { sources, .. } => sources,
        }
    }

    /// The drug this flag primarily concerns. Interaction flags fall back
    /// to the first paired drug.
    pub fn primary_drug(&self) -> &str {
        match self {
            Flag::Adr { drug, .. }
            | Flag::Alcohol { drug, .. }
            | Flag::Elderly { drug, .. }
            | Flag::Amr { drug, .. }
            | Flag::MissedDoses { drug, .. } => drug,
            Flag::Interaction { drug_a, .. } => drug_a,
        }
    }

    /// The headline message for narrative grouping.
    pub fn message(&self) -> &str {
        match self {
            Flag::Adr { advice, .. } => advice,
            Flag::Interaction { effect, .. } => effect,
            Flag::Alcohol { message, .. }
            | Flag::Elderly { message, .. }
            | Flag::Amr { message, .. }
            | Flag::MissedDoses { message, .. } => message,
        }
    }
}

/// Full output of a risk assessment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    /// Highest tier across all flags; `Green` when no flags fired.
    pub risk_level: Severity,
    /// Every generated flag, in generation order. Nothing is merged or dropped.
    pub flags: Vec<Flag>,
    /// Synthesized clinical narrative.
    pub clinical_analysis: String,
    /// Deduplicated, sorted union of every flag's sources.
    pub sources: Vec<String>,
    /// Fixed educational disclaimer.
    pub disclaimer: String,
}

/// Standalone AMR monitoring summary for one drug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AmrReport {
    pub drug: String,
    pub is_antibiotic: bool,
    pub risk_level: Severity,
    pub missed_doses: u32,
    pub flags: Vec<Flag>,
    pub disclaimer: String,
}

/// Explainable per-drug risk profile with source citations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrugProfile {
    pub drug_id: String,
    pub molecule: String,
    pub drug_class: String,
    pub common_use: Option<String>,
    pub is_antibiotic: bool,
    pub avoid_in: Option<String>,
    pub alcohol_warning: Option<String>,
    /// Adverse reactions ordered red, yellow, green.
    pub adverse_reactions: Vec<crate::models::AdverseReactionRecord>,
    pub food_alcohol_interactions: Vec<crate::models::FoodAlcoholRecord>,
    pub disclaimer: String,
}
