use std::sync::Arc;

use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::clash::{ClashReport, LocalityGroups};
use crate::models::tender::TenderRecord;
use crate::services::clash_detector;
use crate::services::locality;
use crate::services::suggestion::{self, NO_CLASH_SUGGESTION};

/// Collaborator serving the tender batch for one postal code. The service
/// treats it as opaque; connectivity and query failures surface as
/// `AppError::DataSource`.
pub trait TenderSource: Send + Sync {
    fn fetch_tenders(&self, pincode: &str) -> AppResult<Vec<TenderRecord>>;
}

/// Orchestrates one clash check: fetch the batch, scan it, group the
/// records by locality and synthesize the rework suggestions. Stateless
/// apart from the source handle; no retries, no partial recovery.
pub struct ClashService {
    source: Arc<dyn TenderSource>,
}

impl ClashService {
    pub fn new(source: Arc<dyn TenderSource>) -> Self {
        Self { source }
    }

    pub fn check_clashes(&self, pincode: &str) -> AppResult<ClashReport> {
        debug!(target: "tender::service", %pincode, "clash check requested");
        let tenders = self.source.fetch_tenders(pincode)?;
        debug!(
            target: "tender::service",
            %pincode,
            tender_count = tenders.len(),
            "tender batch fetched"
        );

        if tenders.is_empty() {
            return Ok(ClashReport {
                clashes_by_local_area: LocalityGroups::new(),
                suggestions: vec![NO_CLASH_SUGGESTION.to_string()],
            });
        }

        let records = clash_detector::detect(&tenders)?;
        let clashes_by_local_area = locality::group_by_local_area(records);
        let suggestions = suggestion::synthesize(&clashes_by_local_area)?;

        info!(
            target: "tender::service",
            %pincode,
            localities = clashes_by_local_area.len(),
            clash_count = clashes_by_local_area.record_count(),
            "clash check complete"
        );

        Ok(ClashReport {
            clashes_by_local_area,
            suggestions,
        })
    }
}
