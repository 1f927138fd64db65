use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::clash::ClashRecord;
use crate::models::tender::TenderRecord;
use crate::services::date_utils::{format_date, overlap_days};
use crate::services::priority;

/// All-pairs clash scan over one tender batch.
///
/// Every ordered pair of distinct tenders sharing both locality keys and at
/// least one overlapping day yields one record, so a clash between A and B
/// appears twice with opposite priority direction. Emission follows input
/// order (subject-major), keeping output deterministic for a fixed batch.
///
/// The whole batch is rejected up front if any tender carries a malformed
/// date range or a department outside the priority table. No partial
/// results leave this function.
pub fn detect(tenders: &[TenderRecord]) -> AppResult<Vec<ClashRecord>> {
    validate_batch(tenders)?;

    let mut records = Vec::new();
    for subject in tenders {
        for counterpart in tenders {
            if subject.id == counterpart.id {
                continue;
            }
            if subject.area_name != counterpart.area_name
                || subject.local_area_name != counterpart.local_area_name
            {
                continue;
            }

            let overlap = overlap_days(
                subject.sanction_date,
                subject.completion_date,
                counterpart.sanction_date,
                counterpart.completion_date,
            );
            if overlap <= 0 {
                continue;
            }

            let priority_issue =
                priority::is_priority_issue(&subject.department, &counterpart.department)?;

            records.push(ClashRecord {
                tender_id: subject.id.clone(),
                clashing_tender_id: counterpart.id.clone(),
                area_name: subject.area_name.clone(),
                local_area_name: subject.local_area_name.clone(),
                overlap_days: overlap,
                priority_issue,
                department: subject.department.clone(),
                clashing_department: counterpart.department.clone(),
                tender_start_date: format_date(subject.sanction_date),
                tender_end_date: format_date(subject.completion_date),
                clashing_tender_start_date: format_date(counterpart.sanction_date),
                clashing_tender_end_date: format_date(counterpart.completion_date),
            });
        }
    }

    debug!(
        target: "tender::detector",
        tender_count = tenders.len(),
        clash_count = records.len(),
        "pairwise scan complete"
    );
    Ok(records)
}

fn validate_batch(tenders: &[TenderRecord]) -> AppResult<()> {
    for tender in tenders {
        if tender.completion_date < tender.sanction_date {
            return Err(AppError::malformed_date_range(&tender.id));
        }
        priority::rank(&tender.department)?;
    }
    Ok(())
}
