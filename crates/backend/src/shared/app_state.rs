use std::sync::Arc;
use std::time::Duration;

use crate::shared::config::CrmConfig;
use crate::usecases::u501_sync_patients_to_crm::{CrmApiClient, SyncExecutor};

/// Состояние приложения, передается в handlers через axum `State`
#[derive(Clone, Default)]
pub struct AppState {
    /// `None` when no CRM access token is configured
    pub sync_executor: Option<Arc<SyncExecutor>>,
}

impl AppState {
    pub fn from_config(crm: &CrmConfig) -> anyhow::Result<Self> {
        let Some(token) = crm.access_token() else {
            tracing::warn!("CRM access token is not configured; sync requests will fail");
            return Ok(Self::default());
        };

        let client = CrmApiClient::new(
            &crm.base_url,
            token,
            crm.timeout_secs.map(Duration::from_secs),
        )?;
        tracing::info!("CRM client configured for {}", client.base_url());

        Ok(Self::with_executor(SyncExecutor::new(Arc::new(client))))
    }

    pub fn with_executor(executor: SyncExecutor) -> Self {
        Self {
            sync_executor: Some(Arc::new(executor)),
        }
    }
}
