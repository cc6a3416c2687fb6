//! SQLite schema definition.

/// Complete database schema for medguard.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Drug Master (immutable reference data)
-- ============================================================================

CREATE TABLE IF NOT EXISTS drug_master (
    drug_id TEXT PRIMARY KEY,
    molecule TEXT NOT NULL,
    drug_class TEXT NOT NULL,
    common_use TEXT,
    avoid_in TEXT,                                -- free-text caution notes
    alcohol_warning TEXT,
    source TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_drug_master_molecule ON drug_master(molecule);

-- Brand / alias names pointing back at a drug
CREATE TABLE IF NOT EXISTS brand_mapping (
    brand_name TEXT NOT NULL,
    drug_id TEXT NOT NULL REFERENCES drug_master(drug_id),
    PRIMARY KEY (brand_name, drug_id)
);

CREATE INDEX IF NOT EXISTS idx_brand_mapping_drug ON brand_mapping(drug_id);

-- ============================================================================
-- Adverse Reactions
-- ============================================================================

CREATE TABLE IF NOT EXISTS adverse_reactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    drug_id TEXT NOT NULL REFERENCES drug_master(drug_id),
    symptom TEXT NOT NULL,
    severity TEXT NOT NULL,                       -- clinical descriptor (serious, moderate, mild)
    frequency TEXT,
    risk_level TEXT NOT NULL CHECK (risk_level IN ('red', 'yellow', 'green')),
    advice TEXT,
    source TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_adr_drug ON adverse_reactions(drug_id);

-- ============================================================================
-- Drug-Drug Interactions (keyed by molecule name, unordered pair)
-- ============================================================================

CREATE TABLE IF NOT EXISTS drug_interactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    drug_a TEXT NOT NULL,
    drug_b TEXT NOT NULL,
    mechanism TEXT,
    clinical_effect TEXT,
    severity TEXT NOT NULL CHECK (severity IN ('serious', 'moderate', 'mild')),
    source TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_interactions_pair ON drug_interactions(drug_a, drug_b);

-- ============================================================================
-- Food / Alcohol Interactions
-- ============================================================================

CREATE TABLE IF NOT EXISTS food_alcohol_interactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    molecule TEXT NOT NULL,
    trigger_item TEXT NOT NULL,                   -- e.g. 'Alcohol'
    risk_level TEXT NOT NULL CHECK (risk_level IN ('red', 'yellow', 'green')),
    message TEXT,
    source TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_food_alcohol_molecule ON food_alcohol_interactions(molecule);

-- ============================================================================
-- Antimicrobial Resistance Risk
-- ============================================================================

CREATE TABLE IF NOT EXISTS amr_risk (
    molecule TEXT PRIMARY KEY,
    amr_risk TEXT NOT NULL CHECK (amr_risk IN ('high', 'medium', 'low')),
    aware_category TEXT,                          -- WHO AWaRe stewardship category
    common_misuse TEXT,
    source TEXT NOT NULL
);

-- Stewardship advisory rules for missed antibiotic doses
CREATE TABLE IF NOT EXISTS stewardship_rules (
    rule_id TEXT PRIMARY KEY,
    condition TEXT,
    recommendation TEXT NOT NULL,
    risk_level TEXT NOT NULL CHECK (risk_level IN ('red', 'yellow', 'green')),
    source TEXT NOT NULL
);

-- ============================================================================
-- User Medicine Timeline (mutable; rows created only via confirmation)
-- ============================================================================

CREATE TABLE IF NOT EXISTS user_medicine_timeline (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    drug_id TEXT NOT NULL REFERENCES drug_master(drug_id),
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    confirmed INTEGER NOT NULL DEFAULT 0,
    taken_doses INTEGER NOT NULL DEFAULT 0 CHECK (taken_doses >= 0),
    missed_doses INTEGER NOT NULL DEFAULT 0 CHECK (missed_doses >= 0),
    symptoms TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_timeline_user ON user_medicine_timeline(user_id);
CREATE INDEX IF NOT EXISTS idx_timeline_drug ON user_medicine_timeline(drug_id);

-- ============================================================================
-- User Profile
-- ============================================================================

CREATE TABLE IF NOT EXISTS user_profile (
    user_id TEXT PRIMARY KEY,
    name TEXT,
    age INTEGER,
    weight_kg REAL,
    height_cm REAL,
    diet TEXT,
    occupation TEXT,
    existing_conditions TEXT NOT NULL DEFAULT '[]',  -- JSON array of strings
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
