use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::models::clash::ClashReport;

use super::{run_blocking, ApiError, ApiResult, AppState};

#[derive(Debug, Clone, Deserialize)]
pub struct CheckClashesRequest {
    pub pincode: String,
}

/// The single exposed operation: clash report for one postal code. Blank
/// pincodes are rejected here, before the core runs; everything else is
/// the orchestrator's verdict translated into the uniform envelope.
pub async fn check_clashes(
    state: &AppState,
    request: CheckClashesRequest,
) -> ApiResult<ClashReport> {
    let pincode = request.pincode.trim().to_string();
    if pincode.is_empty() {
        return Err(ApiError::from(AppError::validation(
            "pincode must not be blank",
        )));
    }

    debug!(target: "tender::api", %pincode, "check_clashes received");
    let service = state.clashes();
    run_blocking(move || service.check_clashes(&pincode)).await
}
