//! Reference-data lookups: adverse reactions, interactions, food/alcohol,
//! AMR risk and stewardship rules.

use std::collections::BTreeMap;

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::{
    AdverseReactionRecord, AmrRiskRecord, AmrRiskTier, FoodAlcoholRecord, InteractionRecord,
    InteractionSeverity, Severity, StewardshipRule,
};

impl Database {
    /// Insert an adverse-reaction record.
    pub fn insert_adverse_reaction(&self, adr: &AdverseReactionRecord) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO adverse_reactions (
                drug_id, symptom, severity, frequency, risk_level, advice, source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                adr.drug_id,
                adr.symptom,
                adr.severity,
                adr.frequency,
                adr.risk_level.label(),
                adr.advice,
                adr.source,
            ],
        )?;
        Ok(())
    }

    /// Adverse reactions for a drug, ordered red, yellow, green.
    pub fn adverse_reactions_for(&self, drug_id: &str) -> DbResult<Vec<AdverseReactionRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT drug_id, symptom, severity, frequency, risk_level, advice, source
            FROM adverse_reactions
            WHERE drug_id = ?
            ORDER BY CASE risk_level
                WHEN 'red' THEN 1 WHEN 'yellow' THEN 2 ELSE 3
            END, id
            "#,
        )?;
        let rows = stmt.query_map([drug_id], |row| {
            let risk_label: String = row.get(4)?;
            Ok(AdverseReactionRecord {
                drug_id: row.get(0)?,
                symptom: row.get(1)?,
                severity: row.get(2)?,
                frequency: row.get(3)?,
                risk_level: Severity::from_label(&risk_label),
                advice: row.get(5)?,
                source: row.get(6)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Insert an interaction record.
    pub fn insert_interaction(&self, interaction: &InteractionRecord) -> DbResult<()> {
        let severity_label = match interaction.severity {
            InteractionSeverity::Serious => "serious",
            InteractionSeverity::Moderate => "moderate",
            InteractionSeverity::Mild => "mild",
        };
        self.conn.execute(
            r#"
            INSERT INTO drug_interactions (
                drug_a, drug_b, mechanism, clinical_effect, severity, source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                interaction.drug_a,
                interaction.drug_b,
                interaction.mechanism,
                interaction.clinical_effect,
                severity_label,
                interaction.source,
            ],
        )?;
        Ok(())
    }

    /// Interaction records for an unordered molecule pair (matched in either
    /// name order).
    pub fn interactions_between(
        &self,
        molecule_a: &str,
        molecule_b: &str,
    ) -> DbResult<Vec<InteractionRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT drug_a, drug_b, mechanism, clinical_effect, severity, source
            FROM drug_interactions
            WHERE (drug_a = ?1 AND drug_b = ?2)
               OR (drug_a = ?2 AND drug_b = ?1)
            ORDER BY id
            "#,
        )?;
        let rows = stmt.query_map(params![molecule_a, molecule_b], |row| {
            let severity_label: String = row.get(4)?;
            Ok(InteractionRecord {
                drug_a: row.get(0)?,
                drug_b: row.get(1)?,
                mechanism: row.get(2)?,
                clinical_effect: row.get(3)?,
                severity: InteractionSeverity::from_label(&severity_label),
                source: row.get(5)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Insert a food/alcohol interaction record.
    pub fn insert_food_alcohol(&self, record: &FoodAlcoholRecord) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO food_alcohol_interactions (
                molecule, trigger_item, risk_level, message, source
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.molecule,
                record.trigger,
                record.risk_level.label(),
                record.message,
                record.source,
            ],
        )?;
        Ok(())
    }

    /// Food/alcohol records for a molecule and a specific trigger item.
    pub fn food_alcohol_for(
        &self,
        molecule: &str,
        trigger: &str,
    ) -> DbResult<Vec<FoodAlcoholRecord>> {
        self.query_food_alcohol(
            r#"
            SELECT molecule, trigger_item, risk_level, message, source
            FROM food_alcohol_interactions
            WHERE molecule = ?1 AND trigger_item = ?2
            ORDER BY id
            "#,
            params![molecule, trigger],
        )
    }

    /// All food/alcohol records for a molecule, any trigger.
    pub fn food_alcohol_all_for(&self, molecule: &str) -> DbResult<Vec<FoodAlcoholRecord>> {
        self.query_food_alcohol(
            r#"
            SELECT molecule, trigger_item, risk_level, message, source
            FROM food_alcohol_interactions
            WHERE molecule = ?1
            ORDER BY id
            "#,
            params![molecule],
        )
    }

    fn query_food_alcohol(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> DbResult<Vec<FoodAlcoholRecord>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, |row| {
            let risk_label: String = row.get(2)?;
            Ok(FoodAlcoholRecord {
                molecule: row.get(0)?,
                trigger: row.get(1)?,
                risk_level: Severity::from_label(&risk_label),
                message: row.get(3)?,
                source: row.get(4)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Insert an AMR risk record.
    pub fn insert_amr_risk(&self, record: &AmrRiskRecord) -> DbResult<()> {
        let tier_label = match record.amr_risk {
            AmrRiskTier::High => "high",
            AmrRiskTier::Medium => "medium",
            AmrRiskTier::Low => "low",
        };
        self.conn.execute(
            r#"
            INSERT INTO amr_risk (molecule, amr_risk, aware_category, common_misuse, source)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(molecule) DO UPDATE SET
                amr_risk = excluded.amr_risk,
                aware_category = excluded.aware_category,
                common_misuse = excluded.common_misuse,
                source = excluded.source
            "#,
            params![
                record.molecule,
                tier_label,
                record.aware_category,
                record.common_misuse,
                record.source,
            ],
        )?;
        Ok(())
    }

    /// AMR risk record for a molecule.
    pub fn amr_risk_for(&self, molecule: &str) -> DbResult<Option<AmrRiskRecord>> {
        self.conn
            .query_row(
                r#"
                SELECT molecule, amr_risk, aware_category, common_misuse, source
                FROM amr_risk
                WHERE molecule = ?
                "#,
                [molecule],
                |row| {
                    let tier_label: String = row.get(1)?;
                    Ok(AmrRiskRecord {
                        molecule: row.get(0)?,
                        amr_risk: AmrRiskTier::from_label(&tier_label),
                        aware_category: row.get(2)?,
                        common_misuse: row.get(3)?,
                        source: row.get(4)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Insert a stewardship rule.
    pub fn insert_stewardship_rule(&self, rule: &StewardshipRule) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO stewardship_rules (rule_id, condition, recommendation, risk_level, source)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(rule_id) DO UPDATE SET
                condition = excluded.condition,
                recommendation = excluded.recommendation,
                risk_level = excluded.risk_level,
                source = excluded.source
            "#,
            params![
                rule.rule_id,
                rule.condition,
                rule.recommendation,
                rule.risk_level.label(),
                rule.source,
            ],
        )?;
        Ok(())
    }

    /// The red-tier stewardship rule with the lowest rule id, if any.
    /// Deterministic selection: ties on tier break by rule id.
    pub fn red_stewardship_rule(&self) -> DbResult<Option<StewardshipRule>> {
        self.conn
            .query_row(
                r#"
                SELECT rule_id, condition, recommendation, risk_level, source
                FROM stewardship_rules
                WHERE risk_level = 'red'
                ORDER BY rule_id
                LIMIT 1
                "#,
                [],
                |row| {
                    let risk_label: String = row.get(3)?;
                    Ok(StewardshipRule {
                        rule_id: row.get(0)?,
                        condition: row.get(1)?,
                        recommendation: row.get(2)?,
                        risk_level: Severity::from_label(&risk_label),
                        source: row.get(4)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Row counts per table, for health surfaces.
    pub fn table_stats(&self) -> DbResult<BTreeMap<String, u64>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        )?;
        let tables: Vec<String> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<_, _>>()?;

        let mut stats = BTreeMap::new();
        for table in tables {
            let count: u64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM \"{}\"", table), [], |row| {
                    row.get(0)
                })?;
            stats.insert(table, count);
        }
        Ok(stats)
    }
}
