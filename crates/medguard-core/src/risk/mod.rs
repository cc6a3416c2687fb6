//! Rule-based RED / YELLOW / GREEN risk assessment.
//!
//! This engine provides educational risk awareness only. It does not
//! diagnose, prescribe, or modify doses: everything it says is a table
//! lookup with deterministic severity resolution.

mod behavior;
mod generators;
mod narrative;

use std::collections::{BTreeSet, HashMap};

use thiserror::Error;
use tracing::debug;

use crate::db::{Database, DbError};
use crate::models::{AmrReport, DrugProfile, Flag, Insight, RiskAssessment, Severity};
use crate::DISCLAIMER;

/// Age at which the elderly-caution check starts running.
const ELDERLY_AGE: u32 = 65;

/// Risk-engine errors.
#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Drug not found: {0}")]
    DrugNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type RiskResult<T> = Result<T, RiskError>;

/// Explicit assessment context. All defaults are visible here instead of
/// being substituted deep in the call chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssessmentContext {
    /// User age; the elderly check runs only at 65 and over
    pub age: Option<u32>,
    /// Whether the user reports alcohol consumption
    pub reports_alcohol: bool,
    /// Missed-dose counts per drug id
    pub missed_doses: HashMap<String, u32>,
}

/// The risk engine: flag generation, aggregation and narrative synthesis
/// over a borrowed record store.
pub struct RiskEngine<'a> {
    db: &'a Database,
}

impl<'a> RiskEngine<'a> {
    /// Create an engine over a record store.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Run the full risk assessment for a set of drug ids.
    ///
    /// Per-drug generators run in a fixed order (adr, alcohol, elderly,
    /// amr), then the interaction check runs once across the whole set.
    /// The overall tier is the maximum tier present; no flag is dropped
    /// or merged.
    pub fn assess(&self, drug_ids: &[&str], ctx: &AssessmentContext) -> RiskResult<RiskAssessment> {
        if drug_ids.is_empty() {
            return Err(RiskError::InvalidInput("drug_ids list is required".into()));
        }

        let mut flags = Vec::new();

        for drug_id in drug_ids {
            flags.extend(generators::adr_flags(self.db, drug_id)?);

            if ctx.reports_alcohol {
                flags.extend(generators::alcohol_flags(self.db, drug_id)?);
            }

            if ctx.age.is_some_and(|age| age >= ELDERLY_AGE) {
                flags.extend(generators::elderly_flags(self.db, drug_id)?);
            }

            if let Some(&missed) = ctx.missed_doses.get(*drug_id) {
                flags.extend(generators::amr_flags(self.db, drug_id, missed)?);
            }
        }

        if drug_ids.len() >= 2 {
            flags.extend(generators::interaction_flags(self.db, drug_ids)?);
        }

        let risk_level = overall_level(&flags);
        let sources = collect_sources(&flags);
        let clinical_analysis = narrative::synthesize(&flags, risk_level);

        debug!(
            drugs = drug_ids.len(),
            flags = flags.len(),
            level = %risk_level,
            "risk assessment complete"
        );

        Ok(RiskAssessment {
            risk_level,
            flags,
            clinical_analysis,
            sources,
            disclaimer: DISCLAIMER.into(),
        })
    }

    /// Check drug-drug interactions only. Requires at least two ids.
    pub fn check_interactions(&self, drug_ids: &[&str]) -> RiskResult<Vec<Flag>> {
        if drug_ids.len() < 2 {
            return Err(RiskError::InvalidInput(
                "at least 2 drug_ids are required to check interactions".into(),
            ));
        }
        Ok(generators::interaction_flags(self.db, drug_ids)?)
    }

    /// Standalone AMR monitoring for one drug.
    ///
    /// Unknown ids are a structured not-found error. Drugs whose class is
    /// not an antibiotic always report green with no flags, regardless of
    /// the missed-dose count.
    pub fn amr_monitor(&self, drug_id: &str, missed_doses: u32) -> RiskResult<AmrReport> {
        let drug = self
            .db
            .get_drug(drug_id)?
            .ok_or_else(|| RiskError::DrugNotFound(drug_id.to_string()))?;

        if !drug.is_antibiotic() {
            return Ok(AmrReport {
                drug: drug.molecule,
                is_antibiotic: false,
                risk_level: Severity::Green,
                missed_doses,
                flags: Vec::new(),
                disclaimer: DISCLAIMER.into(),
            });
        }

        let flags = generators::amr_flags(self.db, drug_id, missed_doses)?;
        let risk_level = overall_level(&flags);

        Ok(AmrReport {
            drug: drug.molecule,
            is_antibiotic: true,
            risk_level,
            missed_doses,
            flags,
            disclaimer: DISCLAIMER.into(),
        })
    }

    /// Full explainable risk profile for one drug, with source citations.
    pub fn explain_drug(&self, drug_id: &str) -> RiskResult<DrugProfile> {
        let drug = self
            .db
            .get_drug(drug_id)?
            .ok_or_else(|| RiskError::DrugNotFound(drug_id.to_string()))?;

        let adverse_reactions = self.db.adverse_reactions_for(drug_id)?;
        let food_alcohol_interactions = self.db.food_alcohol_all_for(&drug.molecule)?;

        Ok(DrugProfile {
            drug_id: drug.drug_id,
            is_antibiotic: drug.drug_class.to_lowercase().contains("antibiotic"),
            molecule: drug.molecule,
            drug_class: drug.drug_class,
            common_use: drug.common_use,
            avoid_in: drug.avoid_in,
            alcohol_warning: drug.alcohol_warning,
            adverse_reactions,
            food_alcohol_interactions,
            disclaimer: DISCLAIMER.into(),
        })
    }

    /// Behavioral insights from the user's medicine timeline.
    pub fn analyze_behavior(&self, user_id: &str) -> RiskResult<Vec<Insight>> {
        Ok(behavior::analyze(self.db, user_id)?)
    }
}

/// Maximum tier across the flags; green when none. A tier is never
/// lowered once raised.
fn overall_level(flags: &[Flag]) -> Severity {
    flags
        .iter()
        .map(Flag::severity)
        .max()
        .unwrap_or(Severity::Green)
}

/// Order-insensitive union of every flag's sources, flattened to a
/// sorted list for deterministic output.
fn collect_sources(flags: &[Flag]) -> Vec<String> {
    let set: BTreeSet<String> = flags
        .iter()
        .flat_map(|f| f.sources().iter().cloned())
        .collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    #[test]
    fn test_assess_rejects_empty_input_before_store_access() {
        let db = Database::open_in_memory().unwrap();
        let engine = RiskEngine::new(&db);
        let result = engine.assess(&[], &AssessmentContext::default());
        assert!(matches!(result, Err(RiskError::InvalidInput(_))));
    }

    #[test]
    fn test_check_interactions_requires_two_ids() {
        let db = Database::open_in_memory().unwrap();
        let engine = RiskEngine::new(&db);
        let result = engine.check_interactions(&["D01"]);
        assert!(matches!(result, Err(RiskError::InvalidInput(_))));
    }

    #[test]
    fn test_overall_level_laws() {
        assert_eq!(overall_level(&[]), Severity::Green);

        let yellow = Flag::Elderly {
            severity: Severity::Yellow,
            drug: "Ibuprofen".into(),
            message: "Caution".into(),
            sources: vec!["BNF".into()],
        };
        let red = Flag::MissedDoses {
            severity: Severity::Red,
            drug: "Azithromycin".into(),
            missed: 2,
            message: "Complete the course".into(),
            sources: vec!["ICMR".into()],
        };
        assert_eq!(overall_level(&[yellow.clone()]), Severity::Yellow);
        assert_eq!(overall_level(&[yellow, red]), Severity::Red);
    }

    #[test]
    fn test_collect_sources_dedups() {
        let a = Flag::Elderly {
            severity: Severity::Yellow,
            drug: "A".into(),
            message: "m".into(),
            sources: vec!["BNF".into(), "NHS".into()],
        };
        let b = Flag::Elderly {
            severity: Severity::Yellow,
            drug: "B".into(),
            message: "m".into(),
            sources: vec!["BNF".into()],
        };
        assert_eq!(collect_sources(&[a, b]), vec!["BNF", "NHS"]);
    }

    #[test]
    fn test_amr_monitor_unknown_drug_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let engine = RiskEngine::new(&db);
        let result = engine.amr_monitor("GHOST", 3);
        assert!(matches!(result, Err(RiskError::DrugNotFound(_))));
    }
}
