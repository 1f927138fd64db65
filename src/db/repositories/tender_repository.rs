use std::convert::TryFrom;

use rusqlite::{named_params, Connection, Row};
use serde_json::json;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::tender::TenderRecord;
use crate::services::clash_service::TenderSource;
use crate::services::date_utils::{format_date, parse_date};

const BASE_SELECT: &str = r#"
    SELECT
        id,
        pincode,
        area_name,
        local_area_name,
        sanction_date,
        completion_date,
        department
    FROM tenders
"#;

/// Raw tender row as stored; dates stay TEXT until `into_record` converts
/// them, where an unparseable value becomes a typed error.
#[derive(Debug, Clone)]
pub struct TenderRow {
    pub id: String,
    pub pincode: String,
    pub area_name: String,
    pub local_area_name: String,
    pub sanction_date: String,
    pub completion_date: String,
    pub department: String,
}

impl TenderRow {
    pub fn from_record(record: &TenderRecord) -> Self {
        Self {
            id: record.id.clone(),
            pincode: record.pincode.clone(),
            area_name: record.area_name.clone(),
            local_area_name: record.local_area_name.clone(),
            sanction_date: format_date(record.sanction_date),
            completion_date: format_date(record.completion_date),
            department: record.department.clone(),
        }
    }

    pub fn into_record(self) -> AppResult<TenderRecord> {
        let sanction_date = parse_stored_date(&self.id, &self.sanction_date)?;
        let completion_date = parse_stored_date(&self.id, &self.completion_date)?;
        Ok(TenderRecord {
            id: self.id,
            pincode: self.pincode,
            area_name: self.area_name,
            local_area_name: self.local_area_name,
            sanction_date,
            completion_date,
            department: self.department,
        })
    }
}

impl TryFrom<&Row<'_>> for TenderRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            pincode: row.get("pincode")?,
            area_name: row.get("area_name")?,
            local_area_name: row.get("local_area_name")?,
            sanction_date: row.get("sanction_date")?,
            completion_date: row.get("completion_date")?,
            department: row.get("department")?,
        })
    }
}

pub struct TenderRepository;

impl TenderRepository {
    pub fn insert(conn: &Connection, row: &TenderRow) -> AppResult<()> {
        conn.execute(
            r#"
            INSERT INTO tenders (
                id, pincode, area_name, local_area_name,
                sanction_date, completion_date, department
            ) VALUES (
                :id, :pincode, :area_name, :local_area_name,
                :sanction_date, :completion_date, :department
            )
            "#,
            named_params! {
                ":id": row.id,
                ":pincode": row.pincode,
                ":area_name": row.area_name,
                ":local_area_name": row.local_area_name,
                ":sanction_date": row.sanction_date,
                ":completion_date": row.completion_date,
                ":department": row.department,
            },
        )?;
        Ok(())
    }

    /// Batch for one postal code, ordered by id so identical store contents
    /// always produce the same scan order downstream.
    pub fn fetch_by_pincode(conn: &Connection, pincode: &str) -> AppResult<Vec<TenderRow>> {
        let query = format!("{BASE_SELECT} WHERE pincode = :pincode ORDER BY id");
        let mut stmt = conn.prepare(&query)?;
        let rows = stmt.query_map(named_params! {":pincode": pincode}, |row| {
            TenderRow::try_from(row)
        })?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    pub fn count(conn: &Connection) -> AppResult<i64> {
        let count = conn.query_row("SELECT COUNT(*) FROM tenders", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn parse_stored_date(tender_id: &str, value: &str) -> AppResult<chrono::NaiveDate> {
    parse_date(value).map_err(|_| {
        AppError::validation_with_details(
            "tender store holds an unparseable date",
            json!({"tender_id": tender_id, "value": value}),
        )
    })
}

/// The shipped `TenderSource`: serves batches straight from the SQLite
/// store. Opens and drops its connection inside one fetch scope.
#[derive(Clone)]
pub struct SqliteTenderSource {
    db: DbPool,
}

impl SqliteTenderSource {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}

impl TenderSource for SqliteTenderSource {
    fn fetch_tenders(&self, pincode: &str) -> AppResult<Vec<TenderRecord>> {
        let rows = self
            .db
            .with_connection(|conn| TenderRepository::fetch_by_pincode(conn, pincode))?;
        rows.into_iter().map(TenderRow::into_record).collect()
    }
}
