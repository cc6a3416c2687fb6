//! Timeline and profile models.

use serde::{Deserialize, Serialize};

use super::Severity;

/// One course of a medicine on a user's timeline.
///
/// Rows are created only through the confirmation gate and are never
/// implicitly deleted. Dose counters are monotonically non-decreasing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEntry {
    /// Row id; 0 until inserted
    pub id: i64,
    pub user_id: String,
    pub drug_id: String,
    /// ISO date (YYYY-MM-DD)
    pub start_date: String,
    /// ISO date; defaulted from drug class at confirmation time
    pub end_date: String,
    pub confirmed: bool,
    pub taken_doses: u32,
    pub missed_doses: u32,
    /// Free-text post-course symptom notes
    pub symptoms: Option<String>,
}

/// Timeline row joined with drug identity, for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineView {
    pub entry: TimelineEntry,
    pub molecule: String,
    pub drug_class: String,
    pub is_antibiotic: bool,
    pub common_use: Option<String>,
}

/// Whether a logged dose was taken or missed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DoseStatus {
    Taken,
    Missed,
}

/// Result of confirming a medicine into the timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfirmedCourse {
    pub timeline_id: i64,
    pub drug_id: String,
    pub molecule: String,
    pub start_date: String,
    pub end_date: String,
}

/// User profile captured at onboarding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: String,
    pub name: Option<String>,
    pub age: Option<u32>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub diet: Option<String>,
    pub occupation: Option<String>,
    pub existing_conditions: Vec<String>,
}

impl UserProfile {
    /// Create an empty profile for a user id.
    pub fn new(user_id: String) -> Self {
        Self {
            user_id,
            name: None,
            age: None,
            weight_kg: None,
            height_cm: None,
            diet: None,
            occupation: None,
            existing_conditions: Vec::new(),
        }
    }
}

/// Kind of a behavioral insight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Info,
    Behavior,
    Critical,
    Success,
}

/// A longitudinal behavioral insight derived from the timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub severity: Severity,
}
