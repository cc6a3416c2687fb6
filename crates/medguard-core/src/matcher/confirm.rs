//! The confirmation gate: the only path from a candidate match to the
//! user's medicine timeline.

use chrono::{Duration, NaiveDate, Utc};
use tracing::info;

use super::{MatchError, MatchResult};
use crate::db::Database;
use crate::models::{ConfirmedCourse, TimelineEntry};

/// Default course length for antibiotics, in days.
const ANTIBIOTIC_COURSE_DAYS: i64 = 5;

/// Default course length for everything else, in days.
const DEFAULT_COURSE_DAYS: i64 = 10;

/// Record a human-confirmed medicine on the user's timeline.
///
/// `drug_id` must already exist in the drug store; an unknown id is an
/// error, never a silent insert. The course start defaults to today and
/// the end is inferred from the drug class: antibiotics get a shorter
/// default course so adherence tracking kicks in sooner.
pub fn confirm_medicine(
    db: &Database,
    drug_id: &str,
    user_id: &str,
    start_date: Option<NaiveDate>,
) -> MatchResult<ConfirmedCourse> {
    let drug = db
        .get_drug(drug_id)?
        .ok_or_else(|| MatchError::DrugNotFound(drug_id.to_string()))?;

    let start = start_date.unwrap_or_else(|| Utc::now().date_naive());
    let course_days = if drug.is_antibiotic() {
        ANTIBIOTIC_COURSE_DAYS
    } else {
        DEFAULT_COURSE_DAYS
    };
    let end = start + Duration::days(course_days);

    let entry = TimelineEntry {
        id: 0,
        user_id: user_id.to_string(),
        drug_id: drug.drug_id.clone(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        confirmed: true,
        taken_doses: 0,
        missed_doses: 0,
        symptoms: None,
    };
    let timeline_id = db.insert_timeline_entry(&entry)?;

    info!(
        user = user_id,
        drug = %drug.molecule,
        timeline_id,
        "confirmed medicine onto timeline"
    );

    Ok(ConfirmedCourse {
        timeline_id,
        drug_id: drug.drug_id,
        molecule: drug.molecule,
        start_date: entry.start_date,
        end_date: entry.end_date,
    })
}
