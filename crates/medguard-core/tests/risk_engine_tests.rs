//! End-to-end risk engine scenarios over a seeded in-memory store.

use std::collections::HashMap;

use medguard_core::models::{
    AdverseReactionRecord, FoodAlcoholRecord, InteractionRecord, InteractionSeverity,
    StewardshipRule,
};
use medguard_core::{
    AmrRiskRecord, AmrRiskTier, AssessmentContext, Database, DrugRecord, Flag, RiskEngine,
    Severity, DISCLAIMER,
};

/// Seed the store with a small formulary covering every scenario below.
fn seeded_db() -> Database {
    let db = Database::open_in_memory().unwrap();

    let mut ibuprofen = DrugRecord::new("D03".into(), "Ibuprofen".into(), "NSAID".into());
    ibuprofen.avoid_in = Some("Avoid in elderly, peptic ulcer, severe renal impairment".into());
    ibuprofen.source = Some("CDSCO".into());
    db.upsert_drug(&ibuprofen).unwrap();

    let aspirin = DrugRecord::new("D08".into(), "Aspirin".into(), "NSAID / Antiplatelet".into());
    db.upsert_drug(&aspirin).unwrap();

    let cetirizine = DrugRecord::new("D06".into(), "Cetirizine".into(), "Antihistamine".into());
    db.upsert_drug(&cetirizine).unwrap();

    let azithro = DrugRecord::new(
        "D05".into(),
        "Azithromycin".into(),
        "Macrolide antibiotic".into(),
    );
    db.upsert_drug(&azithro).unwrap();

    db.insert_interaction(&InteractionRecord {
        drug_a: "Ibuprofen".into(),
        drug_b: "Aspirin".into(),
        mechanism: Some("Additive COX inhibition".into()),
        clinical_effect: Some("Increased risk of GI bleeding".into()),
        severity: InteractionSeverity::Serious,
        source: "BNF".into(),
    })
    .unwrap();

    db.insert_adverse_reaction(&AdverseReactionRecord {
        drug_id: "D03".into(),
        symptom: "Stomach pain".into(),
        severity: "moderate".into(),
        frequency: Some("common".into()),
        risk_level: Severity::Yellow,
        advice: Some("Take with food".into()),
        source: "CDSCO".into(),
    })
    .unwrap();

    db.insert_food_alcohol(&FoodAlcoholRecord {
        molecule: "Cetirizine".into(),
        trigger: "Alcohol".into(),
        risk_level: Severity::Yellow,
        message: Some("Increased drowsiness with alcohol".into()),
        source: "FDA label".into(),
    })
    .unwrap();

    db.insert_amr_risk(&AmrRiskRecord {
        molecule: "Azithromycin".into(),
        amr_risk: AmrRiskTier::High,
        aware_category: Some("Watch".into()),
        common_misuse: Some("Often taken for viral sore throat".into()),
        source: "WHO AWaRe".into(),
    })
    .unwrap();

    db.insert_stewardship_rule(&StewardshipRule {
        rule_id: "SR01".into(),
        condition: Some("missed_doses >= 2".into()),
        recommendation: "Set reminders and finish the prescribed course.".into(),
        risk_level: Severity::Red,
        source: "ICMR".into(),
    })
    .unwrap();

    db
}

#[test]
fn test_dual_nsaid_assessment_is_red_with_interaction_flag() {
    let db = seeded_db();
    let engine = RiskEngine::new(&db);

    let assessment = engine
        .assess(&["D03", "D08"], &AssessmentContext::default())
        .unwrap();

    assert_eq!(assessment.risk_level, Severity::Red);
    let interaction = assessment
        .flags
        .iter()
        .find(|f| matches!(f, Flag::Interaction { .. }))
        .unwrap();
    match interaction {
        Flag::Interaction {
            severity,
            drug_a,
            drug_b,
            effect,
            ..
        } => {
            assert_eq!(*severity, Severity::Red);
            assert_eq!(drug_a, "Ibuprofen");
            assert_eq!(drug_b, "Aspirin");
            assert_eq!(effect, "Increased risk of GI bleeding");
        }
        _ => unreachable!(),
    }

    // The yellow ADR flag rides along without being merged away
    assert!(assessment
        .flags
        .iter()
        .any(|f| matches!(f, Flag::Adr { .. })));

    assert!(assessment
        .clinical_analysis
        .contains("**CRITICAL ATTENTION REQUIRED:**"));
    assert!(assessment.sources.contains(&"BNF".to_string()));
    assert_eq!(assessment.disclaimer, DISCLAIMER);
}

#[test]
fn test_interaction_pair_is_order_insensitive() {
    let db = seeded_db();
    let engine = RiskEngine::new(&db);

    let forward = engine.check_interactions(&["D03", "D08"]).unwrap();
    let reversed = engine.check_interactions(&["D08", "D03"]).unwrap();

    assert_eq!(forward.len(), 1);
    assert_eq!(reversed.len(), 1);
}

#[test]
fn test_antihistamine_with_alcohol_yields_single_yellow_flag() {
    let db = seeded_db();
    let engine = RiskEngine::new(&db);

    let ctx = AssessmentContext {
        reports_alcohol: true,
        ..Default::default()
    };
    let assessment = engine.assess(&["D06"], &ctx).unwrap();

    assert_eq!(assessment.risk_level, Severity::Yellow);
    assert_eq!(assessment.flags.len(), 1);
    match &assessment.flags[0] {
        Flag::Alcohol { drug, message, .. } => {
            assert_eq!(drug, "Cetirizine");
            assert_eq!(message, "Increased drowsiness with alcohol");
        }
        other => panic!("expected alcohol flag, got {other:?}"),
    }
}

#[test]
fn test_alcohol_flag_absent_when_user_does_not_drink() {
    let db = seeded_db();
    let engine = RiskEngine::new(&db);

    let assessment = engine
        .assess(&["D06"], &AssessmentContext::default())
        .unwrap();

    assert_eq!(assessment.risk_level, Severity::Green);
    assert!(assessment.flags.is_empty());
}

#[test]
fn test_missed_antibiotic_doses_raise_amr_and_adherence_flags() {
    let db = seeded_db();
    let engine = RiskEngine::new(&db);

    let ctx = AssessmentContext {
        missed_doses: HashMap::from([("D05".to_string(), 3)]),
        ..Default::default()
    };
    let assessment = engine.assess(&["D05"], &ctx).unwrap();

    assert_eq!(assessment.risk_level, Severity::Red);
    assert!(assessment
        .flags
        .iter()
        .any(|f| matches!(f, Flag::Amr { severity: Severity::Red, .. })));

    let missed = assessment
        .flags
        .iter()
        .find_map(|f| match f {
            Flag::MissedDoses {
                missed, message, ..
            } => Some((missed, message)),
            _ => None,
        })
        .unwrap();
    assert_eq!(*missed.0, 3);
    assert_eq!(missed.1, "Set reminders and finish the prescribed course.");
}

#[test]
fn test_elderly_caution_fires_only_at_threshold_age() {
    let db = seeded_db();
    let engine = RiskEngine::new(&db);

    let young = AssessmentContext {
        age: Some(64),
        ..Default::default()
    };
    let old = AssessmentContext {
        age: Some(65),
        ..Default::default()
    };

    let no_flag = engine.assess(&["D03"], &young).unwrap();
    assert!(!no_flag
        .flags
        .iter()
        .any(|f| matches!(f, Flag::Elderly { .. })));

    let flagged = engine.assess(&["D03"], &old).unwrap();
    let elderly = flagged
        .flags
        .iter()
        .find(|f| matches!(f, Flag::Elderly { .. }))
        .unwrap();
    match elderly {
        Flag::Elderly { severity, message, .. } => {
            assert_eq!(*severity, Severity::Yellow);
            assert!(message.contains("Avoid in elderly"));
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_amr_monitor_non_antibiotic_is_always_green() {
    let db = seeded_db();
    let engine = RiskEngine::new(&db);

    let report = engine.amr_monitor("D03", 5).unwrap();
    assert!(!report.is_antibiotic);
    assert_eq!(report.risk_level, Severity::Green);
    assert!(report.flags.is_empty());
    assert_eq!(report.missed_doses, 5);
}

#[test]
fn test_amr_monitor_antibiotic_reports_standing_risk() {
    let db = seeded_db();
    let engine = RiskEngine::new(&db);

    let report = engine.amr_monitor("D05", 0).unwrap();
    assert!(report.is_antibiotic);
    assert_eq!(report.risk_level, Severity::Red);
    assert_eq!(report.drug, "Azithromycin");
}

#[test]
fn test_explain_drug_bundles_reference_data() {
    let db = seeded_db();
    let engine = RiskEngine::new(&db);

    let profile = engine.explain_drug("D03").unwrap();
    assert_eq!(profile.molecule, "Ibuprofen");
    assert!(!profile.is_antibiotic);
    assert_eq!(profile.adverse_reactions.len(), 1);
    assert_eq!(profile.disclaimer, DISCLAIMER);
}
