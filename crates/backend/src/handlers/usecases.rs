use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use contracts::usecases::u501_sync_patients_to_crm::{SyncRequest, SyncResponse};

use crate::shared::app_state::AppState;
use crate::usecases::u501_sync_patients_to_crm::SyncError;

// ============================================================================
// UseCase u501: Sync patients to CRM
// ============================================================================

fn sync_failure(err: SyncError) -> (StatusCode, Json<SyncResponse>) {
    (err.status_code(), Json(SyncResponse::failure(err.to_string())))
}

/// POST /api/u501/sync
pub async fn u501_sync(
    State(state): State<AppState>,
    payload: Result<Json<SyncRequest>, JsonRejection>,
) -> (StatusCode, Json<SyncResponse>) {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!("Rejected sync request body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(SyncResponse::failure(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                ))),
            );
        }
    };

    let Some(executor) = state.sync_executor.as_ref() else {
        tracing::error!("Sync requested but no CRM access token is configured");
        return sync_failure(SyncError::UnauthorizedConfig);
    };

    if request.rows.is_empty() {
        return sync_failure(SyncError::EmptyBatch);
    }

    tracing::info!("Received sync request with {} rows", request.rows.len());

    match executor.sync(&request.rows).await {
        Ok(summary) => (StatusCode::OK, Json(SyncResponse::ok(summary))),
        Err(e) => sync_failure(e),
    }
}

/// Any other method on /api/u501/sync
pub async fn u501_method_not_allowed() -> (StatusCode, Json<SyncResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(SyncResponse::failure("Method not allowed")),
    )
}
