//! Longitudinal behavioral analysis of a user's medicine timeline.

use crate::db::{Database, DbResult};
use crate::models::{Insight, InsightKind, Severity};

/// Active-medicine count at which the pill-burden insight fires.
const POLYPHARMACY_THRESHOLD: usize = 5;

/// Missed-dose count at which a non-antibiotic adherence gap fires.
const FREQUENT_MISS_THRESHOLD: u32 = 3;

/// Analyze the user's timeline for behavioral patterns.
pub(crate) fn analyze(db: &Database, user_id: &str) -> DbResult<Vec<Insight>> {
    let rows = db.timeline_for_user(user_id)?;

    if rows.is_empty() {
        return Ok(vec![Insight {
            kind: InsightKind::Info,
            title: "No History".into(),
            message: "Start adding medicines to track your daily health patterns.".into(),
            severity: Severity::Green,
        }]);
    }

    let mut insights = Vec::new();

    if rows.len() >= POLYPHARMACY_THRESHOLD {
        insights.push(Insight {
            kind: InsightKind::Behavior,
            title: "High Pill Burden".into(),
            message: format!(
                "You are managing {} medicines daily. Consider using a pill organizer to avoid errors.",
                rows.len()
            ),
            severity: Severity::Yellow,
        });
    }

    let mut missed_antibiotics = Vec::new();
    let mut frequent_misses = Vec::new();
    for row in &rows {
        if row.is_antibiotic && row.entry.missed_doses > 0 {
            missed_antibiotics.push(row.molecule.clone());
        } else if row.entry.missed_doses >= FREQUENT_MISS_THRESHOLD {
            frequent_misses.push(row.molecule.clone());
        }
    }

    if !missed_antibiotics.is_empty() {
        insights.push(Insight {
            kind: InsightKind::Critical,
            title: "Antibiotic Resistance Risk".into(),
            message: format!(
                "You missed doses of {}. Inconsistent antibiotic use causes superbugs (AMR). Please complete the course exactly.",
                missed_antibiotics.join(", ")
            ),
            severity: Severity::Red,
        });
    }

    if !frequent_misses.is_empty() {
        insights.push(Insight {
            kind: InsightKind::Behavior,
            title: "Adherence Gaps".into(),
            message: format!(
                "Frequent misses detected for: {}. Set a daily alarm or reminders.",
                frequent_misses.join(", ")
            ),
            severity: Severity::Yellow,
        });
    }

    if missed_antibiotics.is_empty() && frequent_misses.is_empty() {
        insights.push(Insight {
            kind: InsightKind::Success,
            title: "Great Adherence!".into(),
            message: "You are taking your medicines consistently. This significantly improves treatment outcomes.".into(),
            severity: Severity::Green,
        });
    }

    Ok(insights)
}
