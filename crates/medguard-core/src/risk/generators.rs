//! The five flag generators.
//!
//! Each generator is a pure function over the record store: it returns
//! zero or more flags for one risk dimension and never fails for a
//! data-shape reason. Unresolvable drug ids and absent reference rows
//! degrade to "no flag"; only store failures propagate.

use std::collections::HashSet;

use crate::db::{Database, DbResult};
use crate::models::{AmrRiskTier, Flag, Severity};

/// Fixed advisory used when no red stewardship rule is on record.
pub(crate) const MISSED_DOSE_DEFAULT_ADVICE: &str =
    "Missing doses increases resistance risk. Please complete your course.";

/// Source cited for the behavioral missed-dose flag.
const MISSED_DOSE_SOURCE: &str = "ICMR";

/// Caution-text markers that trigger the elderly flag.
const ELDERLY_MARKERS: [&str; 3] = ["elderly", "avoid", "severe"];

/// Adverse-reaction flags for one drug. Tier is authored data, copied
/// verbatim from each record.
pub(crate) fn adr_flags(db: &Database, drug_id: &str) -> DbResult<Vec<Flag>> {
    let Some(molecule) = db.molecule_for(drug_id)? else {
        return Ok(Vec::new());
    };

    let flags = db
        .adverse_reactions_for(drug_id)?
        .into_iter()
        .map(|adr| Flag::Adr {
            severity: adr.risk_level,
            drug: molecule.clone(),
            symptom: adr.symptom,
            clinical_severity: adr.severity,
            advice: adr.advice.unwrap_or_default(),
            sources: vec![adr.source],
        })
        .collect();
    Ok(flags)
}

/// Pairwise interaction flags across the whole drug set.
///
/// Pairs are deduplicated via a sorted-pair set, so duplicate input ids
/// and either ordering produce each pair exactly once. Ids that do not
/// resolve to a molecule are silently skipped.
pub(crate) fn interaction_flags(db: &Database, drug_ids: &[&str]) -> DbResult<Vec<Flag>> {
    let mut flags = Vec::new();
    let mut checked: HashSet<(String, String)> = HashSet::new();

    for (i, id_a) in drug_ids.iter().enumerate() {
        for id_b in &drug_ids[i + 1..] {
            let mut pair = [id_a.to_string(), id_b.to_string()];
            pair.sort();
            let key = (pair[0].clone(), pair[1].clone());
            if !checked.insert(key) {
                continue;
            }

            let (Some(mol_a), Some(mol_b)) =
                (db.molecule_for(id_a)?, db.molecule_for(id_b)?)
            else {
                continue;
            };

            for record in db.interactions_between(&mol_a, &mol_b)? {
                flags.push(Flag::Interaction {
                    severity: record.severity.to_severity(),
                    drug_a: record.drug_a,
                    drug_b: record.drug_b,
                    mechanism: record.mechanism.unwrap_or_default(),
                    effect: record.clinical_effect.unwrap_or_default(),
                    sources: vec![record.source],
                });
            }
        }
    }
    Ok(flags)
}

/// Alcohol-interaction flags for one drug. Only called when the user
/// reports alcohol use; tier copied verbatim.
pub(crate) fn alcohol_flags(db: &Database, drug_id: &str) -> DbResult<Vec<Flag>> {
    let Some(molecule) = db.molecule_for(drug_id)? else {
        return Ok(Vec::new());
    };

    let flags = db
        .food_alcohol_for(&molecule, "Alcohol")?
        .into_iter()
        .map(|record| Flag::Alcohol {
            severity: record.risk_level,
            drug: molecule.clone(),
            message: record.message.unwrap_or_default(),
            sources: vec![record.source],
        })
        .collect();
    Ok(flags)
}

/// Elderly-caution flag for one drug. Only called when age >= 65.
///
/// Scans the free-text caution field for marker substrings; intentionally
/// conservative since the underlying data is unstructured text.
pub(crate) fn elderly_flags(db: &Database, drug_id: &str) -> DbResult<Vec<Flag>> {
    let Some(drug) = db.get_drug(drug_id)? else {
        return Ok(Vec::new());
    };

    let Some(avoid_in) = drug.avoid_in.filter(|text| {
        let lower = text.to_lowercase();
        ELDERLY_MARKERS.iter().any(|marker| lower.contains(marker))
    }) else {
        return Ok(Vec::new());
    };

    Ok(vec![Flag::Elderly {
        severity: Severity::Yellow,
        drug: drug.molecule,
        message: format!("Caution: {}", avoid_in),
        sources: vec![drug.source.unwrap_or_else(|| "Drug label".into())],
    }])
}

/// AMR and missed-dose flags for one drug. Two independent contributions
/// that may both fire: the molecule's standing resistance risk, and a
/// behavioral flag when two or more doses were missed.
pub(crate) fn amr_flags(db: &Database, drug_id: &str, missed_doses: u32) -> DbResult<Vec<Flag>> {
    let Some(molecule) = db.molecule_for(drug_id)? else {
        return Ok(Vec::new());
    };

    let mut flags = Vec::new();

    if let Some(record) = db.amr_risk_for(&molecule)? {
        let category = record.aware_category.clone().unwrap_or_default();
        match record.amr_risk {
            AmrRiskTier::High => flags.push(Flag::Amr {
                severity: Severity::Red,
                drug: molecule.clone(),
                message: format!(
                    "High AMR risk ({}): {}",
                    category,
                    record.common_misuse.as_deref().unwrap_or("Avoid overuse")
                ),
                aware_category: record.aware_category,
                sources: vec![record.source],
            }),
            AmrRiskTier::Medium => flags.push(Flag::Amr {
                severity: Severity::Yellow,
                drug: molecule.clone(),
                message: format!(
                    "AMR risk ({}): {}",
                    category,
                    record
                        .common_misuse
                        .as_deref()
                        .unwrap_or("Complete full course")
                ),
                aware_category: record.aware_category,
                sources: vec![record.source],
            }),
            AmrRiskTier::Low => {}
        }
    }

    if missed_doses >= 2 {
        let message = db
            .red_stewardship_rule()?
            .map(|rule| rule.recommendation)
            .unwrap_or_else(|| MISSED_DOSE_DEFAULT_ADVICE.into());

        flags.push(Flag::MissedDoses {
            severity: Severity::Red,
            drug: molecule,
            missed: missed_doses,
            message,
            sources: vec![MISSED_DOSE_SOURCE.into()],
        });
    }

    Ok(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AdverseReactionRecord, AmrRiskRecord, DrugRecord, FoodAlcoholRecord, InteractionRecord,
        InteractionSeverity, StewardshipRule,
    };

    fn setup_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.upsert_drug(&DrugRecord::new("D03".into(), "Ibuprofen".into(), "NSAID".into()))
            .unwrap();
        db.upsert_drug(&DrugRecord::new("D14".into(), "Diclofenac".into(), "NSAID".into()))
            .unwrap();
        db.upsert_drug(&DrugRecord::new(
            "D04".into(),
            "Azithromycin".into(),
            "Macrolide Antibiotic".into(),
        ))
        .unwrap();
        db
    }

    #[test]
    fn test_adr_flags_copy_tier_verbatim() {
        let db = setup_db();
        db.insert_adverse_reaction(&AdverseReactionRecord {
            drug_id: "D03".into(),
            symptom: "Stomach bleeding".into(),
            severity: "serious".into(),
            frequency: Some("rare".into()),
            risk_level: Severity::Red,
            advice: Some("Stop and seek help if stools darken".into()),
            source: "BNF".into(),
        })
        .unwrap();

        let flags = adr_flags(&db, "D03").unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity(), Severity::Red);
        assert_eq!(flags[0].primary_drug(), "Ibuprofen");
    }

    #[test]
    fn test_adr_flags_unknown_drug_is_empty() {
        let db = setup_db();
        assert!(adr_flags(&db, "NOPE").unwrap().is_empty());
    }

    #[test]
    fn test_interaction_flags_symmetric_and_deduped() {
        let db = setup_db();
        db.insert_interaction(&InteractionRecord {
            drug_a: "Ibuprofen".into(),
            drug_b: "Diclofenac".into(),
            mechanism: Some("Additive COX inhibition".into()),
            clinical_effect: Some("Severe GI bleeding risk".into()),
            severity: InteractionSeverity::Serious,
            source: "BNF".into(),
        })
        .unwrap();

        let forward = interaction_flags(&db, &["D03", "D14"]).unwrap();
        let reverse = interaction_flags(&db, &["D14", "D03"]).unwrap();
        assert_eq!(forward.len(), 1);
        assert_eq!(forward[0].severity(), Severity::Red);
        assert_eq!(forward, reverse);

        // Duplicate ids do not duplicate the pair
        let duplicated = interaction_flags(&db, &["D03", "D14", "D03"]).unwrap();
        assert_eq!(duplicated.len(), 1);
    }

    #[test]
    fn test_interaction_flags_skip_unresolvable_ids() {
        let db = setup_db();
        let flags = interaction_flags(&db, &["D03", "GHOST"]).unwrap();
        assert!(flags.is_empty());
    }

    #[test]
    fn test_alcohol_flags() {
        let db = setup_db();
        db.insert_food_alcohol(&FoodAlcoholRecord {
            molecule: "Ibuprofen".into(),
            trigger: "Alcohol".into(),
            risk_level: Severity::Yellow,
            message: Some("Raises GI bleeding risk".into()),
            source: "BNF".into(),
        })
        .unwrap();

        let flags = alcohol_flags(&db, "D03").unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity(), Severity::Yellow);
    }

    #[test]
    fn test_elderly_flags_marker_scan() {
        let db = setup_db();
        let mut drug = DrugRecord::new("D07".into(), "Pantoprazole".into(), "PPI".into());
        drug.avoid_in = Some("Long-term use in Elderly patients".into());
        db.upsert_drug(&drug).unwrap();

        let flags = elderly_flags(&db, "D07").unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity(), Severity::Yellow);
        assert!(flags[0].message().starts_with("Caution:"));

        // No markers, no flag
        let mut benign = DrugRecord::new("D99".into(), "Cetirizine".into(), "Antihistamine".into());
        benign.avoid_in = Some("None known".into());
        db.upsert_drug(&benign).unwrap();
        assert!(elderly_flags(&db, "D99").unwrap().is_empty());
    }

    #[test]
    fn test_amr_flags_both_contributions() {
        let db = setup_db();
        db.insert_amr_risk(&AmrRiskRecord {
            molecule: "Azithromycin".into(),
            amr_risk: AmrRiskTier::High,
            aware_category: Some("Watch".into()),
            common_misuse: Some("Often taken for viral infections".into()),
            source: "WHO AWaRe".into(),
        })
        .unwrap();

        let flags = amr_flags(&db, "D04", 3).unwrap();
        assert_eq!(flags.len(), 2);
        assert!(matches!(flags[0], Flag::Amr { severity: Severity::Red, .. }));
        assert!(matches!(
            flags[1],
            Flag::MissedDoses { severity: Severity::Red, missed: 3, .. }
        ));
    }

    #[test]
    fn test_amr_flags_one_miss_no_behavioral_flag() {
        let db = setup_db();
        let flags = amr_flags(&db, "D04", 1).unwrap();
        assert!(flags.is_empty());
    }

    #[test]
    fn test_missed_dose_message_prefers_lowest_rule_id() {
        let db = setup_db();
        for (id, rec) in [("R10", "later"), ("R01", "Finish the prescribed course")] {
            db.insert_stewardship_rule(&StewardshipRule {
                rule_id: id.into(),
                condition: None,
                recommendation: rec.into(),
                risk_level: Severity::Red,
                source: "ICMR".into(),
            })
            .unwrap();
        }

        let flags = amr_flags(&db, "D04", 2).unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].message(), "Finish the prescribed course");
    }

    #[test]
    fn test_missed_dose_default_message() {
        let db = setup_db();
        let flags = amr_flags(&db, "D04", 2).unwrap();
        assert_eq!(flags[0].message(), MISSED_DOSE_DEFAULT_ADVICE);
    }
}
