//! User medicine timeline and profile operations.
//!
//! Every write here is a single atomic statement: one insert per
//! confirmation, one increment per dose log, one upsert per profile save.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::{DoseStatus, TimelineEntry, TimelineView, UserProfile};

impl Database {
    /// Insert a timeline entry, returning the new row id.
    pub fn insert_timeline_entry(&self, entry: &TimelineEntry) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO user_medicine_timeline (
                user_id, drug_id, start_date, end_date, confirmed,
                taken_doses, missed_doses, symptoms
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                entry.user_id,
                entry.drug_id,
                entry.start_date,
                entry.end_date,
                entry.confirmed,
                entry.taken_doses,
                entry.missed_doses,
                entry.symptoms,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Increment the taken or missed counter for an entry. Counters only
    /// ever go up within a course.
    pub fn log_dose(&self, timeline_id: i64, status: DoseStatus) -> DbResult<bool> {
        let sql = match status {
            DoseStatus::Taken => {
                "UPDATE user_medicine_timeline
                 SET taken_doses = taken_doses + 1, updated_at = datetime('now')
                 WHERE id = ?"
            }
            DoseStatus::Missed => {
                "UPDATE user_medicine_timeline
                 SET missed_doses = missed_doses + 1, updated_at = datetime('now')
                 WHERE id = ?"
            }
        };
        let rows_affected = self.conn.execute(sql, [timeline_id])?;
        Ok(rows_affected > 0)
    }

    /// Attach post-course symptom notes to an entry.
    pub fn record_symptoms(&self, timeline_id: i64, symptoms: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE user_medicine_timeline
             SET symptoms = ?2, updated_at = datetime('now')
             WHERE id = ?1",
            params![timeline_id, symptoms],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get one timeline entry by row id.
    pub fn get_timeline_entry(&self, timeline_id: i64) -> DbResult<Option<TimelineEntry>> {
        self.conn
            .query_row(
                r#"
                SELECT id, user_id, drug_id, start_date, end_date, confirmed,
                       taken_doses, missed_doses, symptoms
                FROM user_medicine_timeline
                WHERE id = ?
                "#,
                [timeline_id],
                map_entry_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All timeline rows for a user joined with drug identity, newest
    /// course first.
    pub fn timeline_for_user(&self, user_id: &str) -> DbResult<Vec<TimelineView>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT t.id, t.user_id, t.drug_id, t.start_date, t.end_date,
                   t.confirmed, t.taken_doses, t.missed_doses, t.symptoms,
                   dm.molecule, dm.drug_class, dm.common_use
            FROM user_medicine_timeline t
            JOIN drug_master dm ON t.drug_id = dm.drug_id
            WHERE t.user_id = ?
            ORDER BY t.start_date DESC, t.id DESC
            "#,
        )?;
        let rows = stmt.query_map([user_id], |row| {
            let entry = map_entry_row(row)?;
            let drug_class: String = row.get(10)?;
            Ok(TimelineView {
                is_antibiotic: drug_class.to_lowercase().contains("antibiotic"),
                entry,
                molecule: row.get(9)?,
                drug_class,
                common_use: row.get(11)?,
            })
        })?;

        let mut views = Vec::new();
        for row in rows {
            views.push(row?);
        }
        Ok(views)
    }

    /// Create or replace a user profile.
    pub fn upsert_profile(&self, profile: &UserProfile) -> DbResult<()> {
        let conditions_json = serde_json::to_string(&profile.existing_conditions)?;
        self.conn.execute(
            r#"
            INSERT INTO user_profile (
                user_id, name, age, weight_kg, height_cm, diet, occupation,
                existing_conditions, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, datetime('now'))
            ON CONFLICT(user_id) DO UPDATE SET
                name = excluded.name,
                age = excluded.age,
                weight_kg = excluded.weight_kg,
                height_cm = excluded.height_cm,
                diet = excluded.diet,
                occupation = excluded.occupation,
                existing_conditions = excluded.existing_conditions,
                updated_at = datetime('now')
            "#,
            params![
                profile.user_id,
                profile.name,
                profile.age,
                profile.weight_kg,
                profile.height_cm,
                profile.diet,
                profile.occupation,
                conditions_json,
            ],
        )?;
        Ok(())
    }

    /// Get a user profile by id.
    pub fn get_profile(&self, user_id: &str) -> DbResult<Option<UserProfile>> {
        let result = self
            .conn
            .query_row(
                r#"
                SELECT user_id, name, age, weight_kg, height_cm, diet,
                       occupation, existing_conditions
                FROM user_profile
                WHERE user_id = ?
                "#,
                [user_id],
                |row| {
                    Ok(ProfileRow {
                        user_id: row.get(0)?,
                        name: row.get(1)?,
                        age: row.get(2)?,
                        weight_kg: row.get(3)?,
                        height_cm: row.get(4)?,
                        diet: row.get(5)?,
                        occupation: row.get(6)?,
                        existing_conditions: row.get(7)?,
                    })
                },
            )
            .optional()?;

        result.map(|row| row.try_into()).transpose()
    }
}

fn map_entry_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<TimelineEntry> {
    Ok(TimelineEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        drug_id: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        confirmed: row.get(5)?,
        taken_doses: row.get(6)?,
        missed_doses: row.get(7)?,
        symptoms: row.get(8)?,
    })
}

/// Intermediate row struct for database mapping.
struct ProfileRow {
    user_id: String,
    name: Option<String>,
    age: Option<u32>,
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    diet: Option<String>,
    occupation: Option<String>,
    existing_conditions: String,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = super::DbError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(UserProfile {
            user_id: row.user_id,
            name: row.name,
            age: row.age,
            weight_kg: row.weight_kg,
            height_cm: row.height_cm,
            diet: row.diet,
            occupation: row.occupation,
            existing_conditions: serde_json::from_str(&row.existing_conditions)?,
        })
    }
}
