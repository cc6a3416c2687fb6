//! MedGuard Core Library
//!
//! Local-first medication risk engine with human-confirmed intake.
//!
//! # Architecture
//!
//! ```text
//! Scanned text → Extraction → Fuzzy Match → Candidate suggestions
//!                                                  │
//!                                  [requires_confirmation: always]
//!                                                  │
//!                                        User picks a candidate
//!                                                  │
//!                                  ┌───────────────▼───────────────┐
//!                                  │     Confirmation Gate         │
//!                                  │  timeline row + course dates  │
//!                                  └───────────────┬───────────────┘
//!                                                  │
//!                          ┌───────────────────────┼───────────────────────┐
//!                          │                       │                       │
//!                          ▼                       ▼                       ▼
//!                     Risk Check              AMR Monitor           Behavior Insights
//!                  (flags + narrative)     (resistance risk)       (adherence trends)
//! ```
//!
//! # Core Principle
//!
//! **No medicine reaches a user's timeline without explicit confirmation.**
//! Fuzzy matches are suggestions only, regardless of confidence score.
//!
//! # Modules
//!
//! - [`db`]: SQLite record store (drugs, interactions, AMR tiers, timeline)
//! - [`models`]: Domain types (DrugRecord, Flag, RiskAssessment, etc.)
//! - [`risk`]: Flag generators, aggregation, and the clinical narrative
//! - [`matcher`]: Fuzzy name matching and the confirmation gate
//! - [`logging`]: Tracing setup

pub mod db;
pub mod logging;
pub mod matcher;
pub mod models;
pub mod risk;

// Re-export commonly used types
pub use db::Database;
pub use matcher::{confirm_medicine, Matcher, Vocabulary, DEFAULT_CONFIDENCE_THRESHOLD};
pub use models::{
    AmrReport, AmrRiskRecord, AmrRiskTier, CandidateHit, CandidateMatch, ConfirmedCourse,
    DoseStatus, DrugProfile, DrugRecord, ExtractedCandidate, Flag, Insight, InteractionRecord,
    MatchBasis, RiskAssessment, Severity, StewardshipRule, TimelineEntry, UserProfile,
};
pub use risk::{AssessmentContext, RiskEngine};

/// Fixed disclaimer attached verbatim to every assessment.
pub const DISCLAIMER: &str = "DISCLAIMER: This is educational risk information only. \
    It does NOT constitute medical advice, diagnosis, or treatment. Always consult a \
    qualified healthcare professional before making any medication decisions.";
