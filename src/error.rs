use rusqlite;
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("tender source failure: {message}")]
    DataSource { message: String },

    #[error("unknown department: {department}")]
    UnknownDepartment { department: String },

    #[error("malformed date range on tender {tender_id}")]
    MalformedDateRange { tender_id: String },

    #[error("record conflict: {message}")]
    Conflict { message: String },

    #[error("validation failed: {message}")]
    Validation {
        message: String,
        details: Option<JsonValue>,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn data_source(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "tender::source", %message, "tender source error");
        AppError::DataSource { message }
    }

    pub fn unknown_department(department: impl Into<String>) -> Self {
        let department = department.into();
        warn!(target: "tender::priority", %department, "department missing from priority table");
        AppError::UnknownDepartment { department }
    }

    pub fn malformed_date_range(tender_id: impl Into<String>) -> Self {
        let tender_id = tender_id.into();
        warn!(target: "tender::detector", %tender_id, "completion date precedes sanction date");
        AppError::MalformedDateRange { tender_id }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "tender::store", %message, "conflict error");
        AppError::Conflict { message }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "tender::validation", %message, "validation error");
        AppError::Validation {
            message,
            details: None,
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: JsonValue) -> Self {
        let message = message.into();
        warn!(target: "tender::validation", %message, details = %details, "validation error with details");
        AppError::Validation {
            message,
            details: Some(details),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "tender::other", %message, "other error");
        AppError::Other(message)
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        use rusqlite::Error::SqliteFailure;
        use rusqlite::ErrorCode;

        match &error {
            SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
                AppError::conflict("tender violates a uniqueness or integrity constraint")
            }
            _ => {
                error!(target: "tender::store", error = ?error, "sqlite error");
                AppError::data_source(error.to_string())
            }
        }
    }
}
