use serde::{Deserialize, Serialize};

use crate::shared::csv_import::RowRecord;

/// Запрос на синхронизацию строк с CRM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncRequest {
    /// Строки в порядке таблицы
    pub rows: Vec<RowRecord>,
}
