use axum::http::StatusCode;
use thiserror::Error;

/// Ошибки синхронизации с CRM
///
/// `row` is 1-based, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("No rows to sync")]
    EmptyBatch,

    #[error("Row {row} is missing an EHR ID")]
    MissingIdentifier { row: usize },

    #[error("Row {row} lookup failed: {message}")]
    RemoteLookup { row: usize, message: String },

    #[error("Row {row} failed: {message}")]
    RemoteSync { row: usize, message: String },

    #[error("No access token provided")]
    UnauthorizedConfig,
}

impl SyncError {
    /// HTTP статус для ответа клиенту
    pub fn status_code(&self) -> StatusCode {
        match self {
            SyncError::EmptyBatch | SyncError::MissingIdentifier { .. } => StatusCode::BAD_REQUEST,
            SyncError::RemoteLookup { .. }
            | SyncError::RemoteSync { .. }
            | SyncError::UnauthorizedConfig => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
