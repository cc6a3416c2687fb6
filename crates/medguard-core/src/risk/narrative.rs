//! Clinical narrative synthesis.
//!
//! A deterministic formatting procedure, not a language model: flags are
//! partitioned by tier, rendered per kind, deduplicated, and closed with
//! a recommendation chosen by the overall tier. Bullet order within a
//! tier follows flag generation order.

use std::collections::HashSet;

use crate::models::{Flag, Severity};

const ALL_CLEAR: &str =
    "No significant pharmacological risks detected based on current data matches.";
const CRITICAL_HEADER: &str = "**CRITICAL ATTENTION REQUIRED:**";
const MANAGEMENT_HEADER: &str = "**Clinical Management Notes:**";
const RED_RECOMMENDATION: &str =
    "**Recommendation:** Review prescription safety immediately with the prescribing physician.";
const YELLOW_RECOMMENDATION: &str =
    "**Recommendation:** Proceed with caution and monitor for specified symptoms.";

/// Synthesize the clinical narrative for a flag list and its overall tier.
pub(crate) fn synthesize(flags: &[Flag], overall: Severity) -> String {
    if flags.is_empty() {
        return ALL_CLEAR.to_string();
    }

    let mut parts = Vec::new();

    let red_section = render_red_section(flags);
    if !red_section.is_empty() {
        parts.push(red_section);
    }

    let yellow_section = render_yellow_section(flags);
    if !yellow_section.is_empty() {
        parts.push(yellow_section);
    }

    match overall {
        Severity::Red => parts.push(format!("\n{}", RED_RECOMMENDATION)),
        Severity::Yellow => parts.push(format!("\n{}", YELLOW_RECOMMENDATION)),
        Severity::Green => {}
    }

    parts.join("\n")
}

/// One bullet per distinct red issue, first-seen order preserved.
fn render_red_section(flags: &[Flag]) -> String {
    let mut seen = HashSet::new();
    let mut bullets = Vec::new();

    for flag in flags.iter().filter(|f| f.severity() == Severity::Red) {
        let issue = match flag {
            Flag::Interaction { drug_a, drug_b, effect, .. } => {
                let effect = if effect.is_empty() { "Serious interaction" } else { effect };
                format!("Concurrent use of {} and {} ({}).", drug_a, drug_b, effect)
            }
            Flag::Alcohol { drug, message, .. } => {
                format!("Strictly avoid alcohol with {} ({}).", drug, message)
            }
            Flag::Amr { message, .. } => {
                format!("Antibiotic stewardship: {}.", message)
            }
            Flag::Adr { drug, symptom, advice, .. } => {
                let detail = if advice.is_empty() { symptom } else { advice };
                format!("{}: {}.", drug, detail)
            }
            Flag::Elderly { drug, message, .. } | Flag::MissedDoses { drug, message, .. } => {
                format!("{}: {}.", drug, message)
            }
        };
        if seen.insert(issue.clone()) {
            bullets.push(issue);
        }
    }

    if bullets.is_empty() {
        return String::new();
    }

    let mut section = CRITICAL_HEADER.to_string();
    for bullet in bullets {
        section.push_str("\n\u{2022} ");
        section.push_str(&bullet);
    }
    section
}

/// Yellow flags grouped per primary drug, distinct messages joined with
/// semicolons, one bullet per drug in first-seen drug order.
fn render_yellow_section(flags: &[Flag]) -> String {
    // Vec of (drug, messages) keeps first-seen drug order
    let mut notes: Vec<(String, Vec<String>)> = Vec::new();

    for flag in flags.iter().filter(|f| f.severity() == Severity::Yellow) {
        let drug = flag.primary_drug().to_string();
        let message = match flag {
            Flag::Adr { symptom, advice, .. } => {
                if advice.is_empty() { symptom.clone() } else { advice.clone() }
            }
            _ => flag.message().to_string(),
        };
        if message.is_empty() {
            continue;
        }

        match notes.iter_mut().find(|(d, _)| *d == drug) {
            Some((_, messages)) => {
                if !messages.contains(&message) {
                    messages.push(message);
                }
            }
            None => notes.push((drug, vec![message])),
        }
    }

    if notes.is_empty() {
        return String::new();
    }

    let mut section = MANAGEMENT_HEADER.to_string();
    for (drug, messages) in notes {
        section.push_str(&format!("\n\u{2022} {}: {}.", drug, messages.join("; ")));
    }
    section
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_interaction() -> Flag {
        Flag::Interaction {
            severity: Severity::Red,
            drug_a: "Ibuprofen".into(),
            drug_b: "Diclofenac".into(),
            mechanism: "Additive COX inhibition".into(),
            effect: "Severe GI bleeding risk".into(),
            sources: vec!["BNF".into()],
        }
    }

    fn yellow_adr(drug: &str, advice: &str) -> Flag {
        Flag::Adr {
            severity: Severity::Yellow,
            drug: drug.into(),
            symptom: "Dizziness".into(),
            clinical_severity: "moderate".into(),
            advice: advice.into(),
            sources: vec!["BNF".into()],
        }
    }

    #[test]
    fn test_empty_flags_all_clear() {
        assert_eq!(synthesize(&[], Severity::Green), ALL_CLEAR);
    }

    #[test]
    fn test_red_flags_open_with_critical_header() {
        let narrative = synthesize(&[red_interaction()], Severity::Red);
        assert!(narrative.starts_with(CRITICAL_HEADER));
        assert!(narrative.contains("Concurrent use of Ibuprofen and Diclofenac"));
        assert!(narrative.contains(RED_RECOMMENDATION));
    }

    #[test]
    fn test_duplicate_red_issues_collapse() {
        let narrative = synthesize(&[red_interaction(), red_interaction()], Severity::Red);
        assert_eq!(narrative.matches("Concurrent use of").count(), 1);
    }

    #[test]
    fn test_yellow_grouped_by_drug_with_semicolons() {
        let flags = vec![
            yellow_adr("Amlodipine", "Watch for ankle swelling"),
            yellow_adr("Amlodipine", "Take at the same time daily"),
            yellow_adr("Pantoprazole", "Avoid long-term use"),
        ];
        let narrative = synthesize(&flags, Severity::Yellow);
        assert!(narrative.contains(MANAGEMENT_HEADER));
        assert!(narrative
            .contains("Amlodipine: Watch for ankle swelling; Take at the same time daily."));
        assert!(narrative.contains("Pantoprazole: Avoid long-term use."));
        assert!(narrative.contains(YELLOW_RECOMMENDATION));
        // Amlodipine bullet comes first (generation order, not alphabetical)
        let amlo = narrative.find("Amlodipine").unwrap();
        let panto = narrative.find("Pantoprazole").unwrap();
        assert!(amlo < panto);
    }

    #[test]
    fn test_duplicate_yellow_messages_collapse() {
        let flags = vec![
            yellow_adr("Amlodipine", "Watch for ankle swelling"),
            yellow_adr("Amlodipine", "Watch for ankle swelling"),
        ];
        let narrative = synthesize(&flags, Severity::Yellow);
        assert_eq!(narrative.matches("Watch for ankle swelling").count(), 1);
    }

    #[test]
    fn test_green_overall_has_no_recommendation() {
        let flags = vec![Flag::Alcohol {
            severity: Severity::Green,
            drug: "Cetirizine".into(),
            message: "May increase drowsiness slightly".into(),
            sources: vec!["BNF".into()],
        }];
        let narrative = synthesize(&flags, Severity::Green);
        assert!(!narrative.contains("Recommendation"));
    }
}
