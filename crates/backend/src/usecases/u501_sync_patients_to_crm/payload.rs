use contracts::domain::a001_patient::PatientRow;
use contracts::shared::csv_import::RowRecord;
use serde::{Deserialize, Serialize};

use super::error::SyncError;

/// Тело запроса create/update контакта в CRM
///
/// Only non-empty source cells are sent; `external_id` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPayload {
    pub external_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_attributes: Option<CustomAttributes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomAttributes {
    pub referring_provider: String,
}

impl SyncPayload {
    /// Маппинг строки таблицы в контакт CRM (`line` - номер строки с 1)
    pub fn from_record(record: &RowRecord, line: usize) -> Result<Self, SyncError> {
        let patient = PatientRow::from_record(record);

        let external_id = patient
            .ehr_id
            .ok_or(SyncError::MissingIdentifier { row: line })?;

        Ok(Self {
            external_id,
            name: patient.patient_name,
            email: patient.email,
            phone: patient.phone,
            custom_attributes: patient
                .referring_provider
                .map(|referring_provider| CustomAttributes { referring_provider }),
        })
    }
}
