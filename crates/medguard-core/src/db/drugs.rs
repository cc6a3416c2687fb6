//! Drug master and brand-mapping operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::DrugRecord;

impl Database {
    /// Insert or update a drug master record.
    pub fn upsert_drug(&self, drug: &DrugRecord) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO drug_master (
                drug_id, molecule, drug_class, common_use, avoid_in,
                alcohol_warning, source
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(drug_id) DO UPDATE SET
                molecule = excluded.molecule,
                drug_class = excluded.drug_class,
                common_use = excluded.common_use,
                avoid_in = excluded.avoid_in,
                alcohol_warning = excluded.alcohol_warning,
                source = excluded.source
            "#,
            params![
                drug.drug_id,
                drug.molecule,
                drug.drug_class,
                drug.common_use,
                drug.avoid_in,
                drug.alcohol_warning,
                drug.source,
            ],
        )?;
        Ok(())
    }

    /// Get a drug record by id.
    pub fn get_drug(&self, drug_id: &str) -> DbResult<Option<DrugRecord>> {
        self.conn
            .query_row(
                r#"
                SELECT drug_id, molecule, drug_class, common_use, avoid_in,
                       alcohol_warning, source
                FROM drug_master
                WHERE drug_id = ?
                "#,
                [drug_id],
                map_drug_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Resolve a drug id to its canonical molecule name.
    pub fn molecule_for(&self, drug_id: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT molecule FROM drug_master WHERE drug_id = ?",
                [drug_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all drug records, ordered by molecule name.
    pub fn list_drugs(&self) -> DbResult<Vec<DrugRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT drug_id, molecule, drug_class, common_use, avoid_in,
                   alcohol_warning, source
            FROM drug_master
            ORDER BY molecule
            "#,
        )?;
        let rows = stmt.query_map([], map_drug_row)?;

        let mut drugs = Vec::new();
        for row in rows {
            drugs.push(row?);
        }
        Ok(drugs)
    }

    /// Register a brand/alias name for a drug.
    pub fn insert_brand(&self, brand_name: &str, drug_id: &str) -> DbResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO brand_mapping (brand_name, drug_id) VALUES (?1, ?2)",
            params![brand_name, drug_id],
        )?;
        Ok(())
    }

    /// Brand names registered for a drug.
    pub fn brands_for(&self, drug_id: &str) -> DbResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT brand_name FROM brand_mapping WHERE drug_id = ? ORDER BY brand_name",
        )?;
        let rows = stmt.query_map([drug_id], |row| row.get(0))?;

        let mut brands = Vec::new();
        for row in rows {
            brands.push(row?);
        }
        Ok(brands)
    }

    /// All (brand_name, drug_id) pairs, for vocabulary building.
    pub fn list_brand_mappings(&self) -> DbResult<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT brand_name, drug_id FROM brand_mapping ORDER BY brand_name, drug_id")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

        let mut mappings = Vec::new();
        for row in rows {
            mappings.push(row?);
        }
        Ok(mappings)
    }
}

fn map_drug_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DrugRecord> {
    Ok(DrugRecord {
        drug_id: row.get(0)?,
        molecule: row.get(1)?,
        drug_class: row.get(2)?,
        common_use: row.get(3)?,
        avoid_in: row.get(4)?,
        alcohol_warning: row.get(5)?,
        source: row.get(6)?,
    })
}
