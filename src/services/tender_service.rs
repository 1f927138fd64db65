use tracing::{debug, info};

use crate::db::repositories::tender_repository::{TenderRepository, TenderRow};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::tender::TenderRecord;
use crate::services::priority;

/// Validated ingestion and listing for the tender store. The detection
/// engine never writes; this service is how the store gets populated
/// (seeding, imports, tests).
#[derive(Clone)]
pub struct TenderService {
    db: DbPool,
}

impl TenderService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Inserts one tender after checking the invariants the engine relies
    /// on: non-blank identity and locality keys, a known department, and
    /// `sanction_date <= completion_date`.
    pub fn register_tender(&self, record: TenderRecord) -> AppResult<TenderRecord> {
        validate_record(&record)?;

        let row = TenderRow::from_record(&record);
        self.db
            .with_connection(|conn| TenderRepository::insert(conn, &row))?;
        info!(target: "tender::store", tender_id = %record.id, pincode = %record.pincode, "tender registered");
        Ok(record)
    }

    pub fn list_by_pincode(&self, pincode: &str) -> AppResult<Vec<TenderRecord>> {
        let rows = self
            .db
            .with_connection(|conn| TenderRepository::fetch_by_pincode(conn, pincode))?;
        let records = rows
            .into_iter()
            .map(TenderRow::into_record)
            .collect::<AppResult<Vec<_>>>()?;
        debug!(target: "tender::store", %pincode, count = records.len(), "tenders listed");
        Ok(records)
    }
}

fn validate_record(record: &TenderRecord) -> AppResult<()> {
    if record.id.trim().is_empty() {
        return Err(AppError::validation("tender id must not be blank"));
    }
    if record.pincode.trim().is_empty() {
        return Err(AppError::validation("pincode must not be blank"));
    }
    if record.area_name.trim().is_empty() || record.local_area_name.trim().is_empty() {
        return Err(AppError::validation(
            "area name and local area name must not be blank",
        ));
    }
    if record.completion_date < record.sanction_date {
        return Err(AppError::malformed_date_range(&record.id));
    }
    priority::rank(&record.department)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn record() -> TenderRecord {
        TenderRecord {
            id: "TND-001".to_string(),
            pincode: "400001".to_string(),
            area_name: "Andheri".to_string(),
            local_area_name: "Marol".to_string(),
            sanction_date: date(2025, 1, 1),
            completion_date: date(2025, 1, 10),
            department: "Department of Water Pipeline".to_string(),
        }
    }

    #[test]
    fn validation_accepts_a_well_formed_record() {
        assert!(validate_record(&record()).is_ok());
    }

    #[test]
    fn validation_rejects_blank_identity() {
        let mut bad = record();
        bad.id = "   ".to_string();
        assert!(matches!(
            validate_record(&bad),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn validation_rejects_inverted_date_range() {
        let mut bad = record();
        bad.sanction_date = date(2025, 2, 1);
        bad.completion_date = date(2025, 1, 1);
        assert!(matches!(
            validate_record(&bad),
            Err(AppError::MalformedDateRange { .. })
        ));
    }

    #[test]
    fn validation_rejects_unknown_department() {
        let mut bad = record();
        bad.department = "Department of Sanitation".to_string();
        assert!(matches!(
            validate_record(&bad),
            Err(AppError::UnknownDepartment { .. })
        ));
    }
}
