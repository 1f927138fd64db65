pub mod clashes;
pub mod status;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tokio::task::spawn_blocking;
use tracing::{error, warn};

use crate::db::repositories::tender_repository::SqliteTenderSource;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::services::clash_service::ClashService;
use crate::services::tender_service::TenderService;

/// Shared wiring for the boundary operations: one store handle, the clash
/// orchestrator over the SQLite tender source, and the ingestion service.
/// Cheap to clone; any transport layer can hold one per process.
#[derive(Clone)]
pub struct AppState {
    db_pool: DbPool,
    clash_service: Arc<ClashService>,
    tender_service: Arc<TenderService>,
}

impl AppState {
    pub fn new(db_pool: DbPool) -> AppResult<Self> {
        let source = Arc::new(SqliteTenderSource::new(db_pool.clone()));
        let clash_service = Arc::new(ClashService::new(source));
        let tender_service = Arc::new(TenderService::new(db_pool.clone()));

        Ok(Self {
            db_pool,
            clash_service,
            tender_service,
        })
    }

    pub fn clashes(&self) -> Arc<ClashService> {
        Arc::clone(&self.clash_service)
    }

    pub fn tenders(&self) -> Arc<TenderService> {
        Arc::clone(&self.tender_service)
    }

    pub fn db(&self) -> DbPool {
        self.db_pool.clone()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Uniform failure envelope for every boundary operation. A failed check
/// never ships alongside partial results.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl ApiError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<JsonValue>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        match error {
            AppError::DataSource { message } => {
                error!(target: "tender::api", %message, "data source failure in request");
                ApiError::new("DATA_SOURCE_ERROR", message, None)
            }
            AppError::UnknownDepartment { department } => ApiError::new(
                "UNKNOWN_DEPARTMENT",
                format!("department is not in the priority table: {department}"),
                Some(serde_json::json!({ "department": department })),
            ),
            AppError::MalformedDateRange { tender_id } => ApiError::new(
                "MALFORMED_DATE_RANGE",
                format!("tender {tender_id} completes before it is sanctioned"),
                Some(serde_json::json!({ "tender_id": tender_id })),
            ),
            AppError::Conflict { message } => ApiError::new("CONFLICT", message, None),
            AppError::Validation { message, details } => {
                ApiError::new("VALIDATION_ERROR", message, details)
            }
            AppError::Serialization(error) => {
                error!(target: "tender::api", error = %error, "serialization error in request");
                ApiError::new("UNKNOWN", "serialization failed", None)
            }
            AppError::Io(error) => {
                error!(target: "tender::api", error = %error, "io error in request");
                ApiError::new("UNKNOWN", "filesystem read/write failed", None)
            }
            AppError::Other(message) => {
                error!(target: "tender::api", %message, "unexpected error in request");
                ApiError::new("UNKNOWN", message, None)
            }
        }
    }
}

pub(crate) async fn run_blocking<T: Send + 'static>(
    task: impl FnOnce() -> Result<T, AppError> + Send + 'static,
) -> ApiResult<T> {
    spawn_blocking(task)
        .await
        .map_err(|err| {
            warn!(target: "tender::api", error = %err, "worker task failed");
            ApiError::new("UNKNOWN", format!("worker task failed: {err}"), None)
        })?
        .map_err(ApiError::from)
}
