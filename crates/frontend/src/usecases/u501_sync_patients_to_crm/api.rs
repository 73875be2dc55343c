use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_sync_patients_to_crm::{
    SyncPatientsToCrm, SyncRequest, SyncResponse, SyncSummary,
};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Итог ответа сервера: сводка при успехе, текст ошибки иначе
///
/// A body that says `success: false` without a message falls back to the HTTP
/// status so the user always sees something.
pub fn sync_outcome(status: u16, response: SyncResponse) -> Result<SyncSummary, String> {
    if response.success {
        return Ok(response.summary.unwrap_or_default());
    }
    Err(response
        .error
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("Sync failed: HTTP {}", status)))
}

/// POST /api/u501/sync
pub async fn sync_rows(request: &SyncRequest) -> Result<SyncSummary, String> {
    let url = api_url(&SyncPatientsToCrm::api_path("sync"));
    log::info!("Syncing {} rows to {}", request.rows.len(), url);

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    let status = response.status();
    let body = response
        .json::<SyncResponse>()
        .await
        .map_err(|e| format!("Failed to parse response (HTTP {}): {}", status, e))?;

    sync_outcome(status, body)
}
