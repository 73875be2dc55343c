use contracts::shared::csv_import::RowRecord;
use contracts::usecases::u501_sync_patients_to_crm::SyncSummary;
use std::sync::Arc;
use uuid::Uuid;

use super::crm_api_client::CrmContactsApi;
use super::error::SyncError;
use super::payload::SyncPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpsertOutcome {
    Created,
    Updated,
}

/// Executor для UseCase синхронизации пациентов с CRM
///
/// Rows go out strictly one after another. The first failing row stops the run;
/// rows before it stay committed in the CRM.
pub struct SyncExecutor {
    api: Arc<dyn CrmContactsApi>,
}

impl SyncExecutor {
    pub fn new(api: Arc<dyn CrmContactsApi>) -> Self {
        Self { api }
    }

    /// Синхронизировать все строки (create-or-update по external_id)
    pub async fn sync(&self, rows: &[RowRecord]) -> Result<SyncSummary, SyncError> {
        if rows.is_empty() {
            return Err(SyncError::EmptyBatch);
        }

        let sync_id = Uuid::new_v4();
        tracing::info!("CRM sync {} started: {} rows", sync_id, rows.len());

        let mut summary = SyncSummary::default();
        for (idx, record) in rows.iter().enumerate() {
            let line = idx + 1;
            match self.sync_row(line, record).await {
                Ok(UpsertOutcome::Created) => summary.created += 1,
                Ok(UpsertOutcome::Updated) => summary.updated += 1,
                Err(e) => {
                    tracing::error!(
                        "CRM sync {} aborted at row {} ({} rows already synced): {}",
                        sync_id,
                        line,
                        summary.total(),
                        e
                    );
                    return Err(e);
                }
            }
        }

        tracing::info!(
            "CRM sync {} completed: {} created, {} updated",
            sync_id,
            summary.created,
            summary.updated
        );
        Ok(summary)
    }

    async fn sync_row(&self, line: usize, record: &RowRecord) -> Result<UpsertOutcome, SyncError> {
        // PatientRow trims every value
        let payload = SyncPayload::from_record(record, line)?;

        let existing = self
            .api
            .find_by_external_id(&payload.external_id)
            .await
            .map_err(|e| SyncError::RemoteLookup {
                row: line,
                message: e.to_string(),
            })?;

        let outcome = match existing {
            Some(contact_id) => {
                tracing::debug!(
                    "Row {}: updating contact {} (external_id={})",
                    line,
                    contact_id,
                    payload.external_id
                );
                self.api
                    .update_contact(&contact_id, &payload)
                    .await
                    .map(|_| UpsertOutcome::Updated)
            }
            None => {
                tracing::debug!(
                    "Row {}: creating contact (external_id={})",
                    line,
                    payload.external_id
                );
                self.api
                    .create_contact(&payload)
                    .await
                    .map(|_| UpsertOutcome::Created)
            }
        };

        outcome.map_err(|e| SyncError::RemoteSync {
            row: line,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Search(String),
        Create(String),
        Update(String, String),
    }

    /// Mock CRM: in-memory contacts, every call recorded
    #[derive(Default)]
    struct MockCrm {
        contacts: Mutex<HashMap<String, String>>,
        calls: Mutex<Vec<Call>>,
        fail_search_for: HashSet<String>,
        fail_upsert_for: HashSet<String>,
    }

    impl MockCrm {
        fn with_contacts(contacts: &[(&str, &str)]) -> Self {
            let mock = Self::default();
            {
                let mut map = mock.contacts.lock().unwrap();
                for (external_id, id) in contacts {
                    map.insert(external_id.to_string(), id.to_string());
                }
            }
            mock
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CrmContactsApi for MockCrm {
        async fn find_by_external_id(&self, external_id: &str) -> anyhow::Result<Option<String>> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Search(external_id.to_string()));
            if self.fail_search_for.contains(external_id) {
                anyhow::bail!("Error searching for external_id {}: Unauthorized", external_id);
            }
            Ok(self.contacts.lock().unwrap().get(external_id).cloned())
        }

        async fn create_contact(&self, payload: &SyncPayload) -> anyhow::Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Create(payload.external_id.clone()));
            if self.fail_upsert_for.contains(&payload.external_id) {
                anyhow::bail!("Email is invalid");
            }
            let mut contacts = self.contacts.lock().unwrap();
            let id = format!("new-{}", contacts.len() + 1);
            contacts.insert(payload.external_id.clone(), id);
            Ok(())
        }

        async fn update_contact(&self, contact_id: &str, payload: &SyncPayload) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push(Call::Update(
                contact_id.to_string(),
                payload.external_id.clone(),
            ));
            if self.fail_upsert_for.contains(&payload.external_id) {
                anyhow::bail!("Email is invalid");
            }
            Ok(())
        }
    }

    fn row(id: &str, name: &str) -> RowRecord {
        RowRecord::from([("EHR ID", id), ("Patient Name", name)])
    }

    fn executor(mock: &Arc<MockCrm>) -> SyncExecutor {
        SyncExecutor::new(mock.clone())
    }

    #[tokio::test]
    async fn test_creates_when_not_found() {
        let mock = Arc::new(MockCrm::default());
        let summary = executor(&mock).sync(&[row("1", "Ann")]).await.unwrap();

        assert_eq!(summary, SyncSummary { created: 1, updated: 0 });
        assert_eq!(
            mock.calls(),
            vec![Call::Search("1".into()), Call::Create("1".into())]
        );
    }

    #[tokio::test]
    async fn test_updates_existing_record_by_remote_id() {
        let mock = Arc::new(MockCrm::with_contacts(&[("1", "remote-77")]));
        let summary = executor(&mock).sync(&[row(" 1 ", "Ann")]).await.unwrap();

        assert_eq!(summary, SyncSummary { created: 0, updated: 1 });
        assert_eq!(
            mock.calls(),
            vec![
                Call::Search("1".into()),
                Call::Update("remote-77".into(), "1".into())
            ]
        );
    }

    #[tokio::test]
    async fn test_processes_every_row() {
        let mock = Arc::new(MockCrm::with_contacts(&[("2", "r2")]));
        let rows = vec![row("1", "A"), row("2", "B"), row("3", "C")];

        let summary = executor(&mock).sync(&rows).await.unwrap();

        assert_eq!(summary, SyncSummary { created: 2, updated: 1 });
        assert_eq!(
            mock.calls(),
            vec![
                Call::Search("1".into()),
                Call::Create("1".into()),
                Call::Search("2".into()),
                Call::Update("r2".into(), "2".into()),
                Call::Search("3".into()),
                Call::Create("3".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_identifier_on_first_row_makes_no_calls() {
        let mock = Arc::new(MockCrm::default());
        let err = executor(&mock)
            .sync(&[row("", "X"), row("2", "Y")])
            .await
            .unwrap_err();

        assert_eq!(err, SyncError::MissingIdentifier { row: 1 });
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_stops_batch_and_keeps_earlier_rows() {
        let mut mock = MockCrm::default();
        mock.fail_upsert_for.insert("2".into());
        let mock = Arc::new(mock);

        let err = executor(&mock)
            .sync(&[row("1", "A"), row("2", "B"), row("3", "C")])
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SyncError::RemoteSync {
                row: 2,
                message: "Email is invalid".into()
            }
        );
        assert_eq!(err.to_string(), "Row 2 failed: Email is invalid");
        let calls = mock.calls();
        assert!(calls.contains(&Call::Create("1".into())));
        assert!(!calls.contains(&Call::Search("3".into())));
    }

    #[tokio::test]
    async fn test_missing_identifier_mid_batch() {
        let mock = Arc::new(MockCrm::default());
        let err = executor(&mock)
            .sync(&[row("1", "A"), row("  ", "B")])
            .await
            .unwrap_err();

        assert_eq!(err, SyncError::MissingIdentifier { row: 2 });
        assert_eq!(
            mock.calls(),
            vec![Call::Search("1".into()), Call::Create("1".into())]
        );
    }

    #[tokio::test]
    async fn test_lookup_failure() {
        let mut mock = MockCrm::default();
        mock.fail_search_for.insert("9".into());
        let mock = Arc::new(mock);

        let err = executor(&mock).sync(&[row("9", "Z")]).await.unwrap_err();

        assert_eq!(
            err,
            SyncError::RemoteLookup {
                row: 1,
                message: "Error searching for external_id 9: Unauthorized".into()
            }
        );
    }

    #[tokio::test]
    async fn test_duplicate_identifiers_are_processed_independently() {
        let mock = Arc::new(MockCrm::default());
        let summary = executor(&mock)
            .sync(&[row("5", "First"), row("5", "Second")])
            .await
            .unwrap();

        assert_eq!(summary, SyncSummary { created: 1, updated: 1 });
        assert_eq!(
            mock.calls(),
            vec![
                Call::Search("5".into()),
                Call::Create("5".into()),
                Call::Search("5".into()),
                Call::Update("new-1".into(), "5".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let mock = Arc::new(MockCrm::default());
        assert_eq!(executor(&mock).sync(&[]).await, Err(SyncError::EmptyBatch));
    }
}
