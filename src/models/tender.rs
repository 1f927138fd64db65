use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A municipal work order as served by the tender store. Read-only to the
/// detection engine; `sanction_date <= completion_date` is enforced at
/// ingestion and re-checked before every scan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TenderRecord {
    pub id: String,
    pub pincode: String,
    pub area_name: String,
    pub local_area_name: String,
    pub sanction_date: NaiveDate,
    pub completion_date: NaiveDate,
    pub department: String,
}
