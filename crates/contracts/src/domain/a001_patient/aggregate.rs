use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::csv_import::RowRecord;

/// Известные колонки файла пациентов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientColumn {
    EhrId,
    PatientName,
    Email,
    Phone,
    ReferringProvider,
}

impl PatientColumn {
    /// Ожидаемый набор колонок, в порядке отображения
    pub const ALL: [PatientColumn; 5] = [
        PatientColumn::EhrId,
        PatientColumn::PatientName,
        PatientColumn::Email,
        PatientColumn::Phone,
        PatientColumn::ReferringProvider,
    ];

    /// Заголовок колонки в CSV файле
    pub fn header(&self) -> &'static str {
        match self {
            PatientColumn::EhrId => "EHR ID",
            PatientColumn::PatientName => "Patient Name",
            PatientColumn::Email => "Email",
            PatientColumn::Phone => "Phone",
            PatientColumn::ReferringProvider => "Referring Provider",
        }
    }

    /// Case-insensitive match on the trimmed header.
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.header().eq_ignore_ascii_case(header))
    }
}

/// Заголовки ожидаемых колонок
pub fn expected_headers() -> Vec<&'static str> {
    PatientColumn::ALL.iter().map(PatientColumn::header).collect()
}

/// Типизированная строка пациента
///
/// Known columns become `Option` fields (`None` for empty cells); everything else
/// is carried through in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRow {
    pub ehr_id: Option<String>,
    pub patient_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub referring_provider: Option<String>,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl PatientRow {
    pub fn from_record(record: &RowRecord) -> Self {
        let mut row = PatientRow::default();

        for (key, value) in record.iter() {
            let value = value.trim();
            match PatientColumn::from_header(key) {
                Some(column) => {
                    let slot = row.slot_mut(column);
                    // первая непустая колонка выигрывает ("Email" и "email" в одном файле)
                    if slot.is_none() && !value.is_empty() {
                        *slot = Some(value.to_string());
                    }
                }
                None => {
                    row.extra.insert(key.to_string(), value.to_string());
                }
            }
        }

        row
    }

    fn slot_mut(&mut self, column: PatientColumn) -> &mut Option<String> {
        match column {
            PatientColumn::EhrId => &mut self.ehr_id,
            PatientColumn::PatientName => &mut self.patient_name,
            PatientColumn::Email => &mut self.email,
            PatientColumn::Phone => &mut self.phone,
            PatientColumn::ReferringProvider => &mut self.referring_provider,
        }
    }
}
