use std::sync::Arc;

use super::types::ParsedTable;
use super::validation::diff_columns;
use crate::domain::a001_patient::expected_headers;
use crate::usecases::u501_sync_patients_to_crm::SyncRequest;

impl ParsedTable {
    /// Возвращает новую таблицу с одной измененной ячейкой
    ///
    /// Only the targeted row is replaced; all other rows are the same `Arc`s as in
    /// `self`. `column` is not checked against `headers`. An out-of-range
    /// `row_index` yields an unchanged copy.
    pub fn update_cell(&self, row_index: usize, column: &str, value: &str) -> ParsedTable {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                if idx == row_index {
                    Arc::new(row.with_cell(column, value))
                } else {
                    Arc::clone(row)
                }
            })
            .collect();

        ParsedTable {
            headers: self.headers.clone(),
            rows,
        }
    }
}

/// Состояние текущей сессии: загруженная таблица и предупреждения по колонкам
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableStore {
    table: Option<ParsedTable>,
    warnings: Vec<String>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Заменяет таблицу целиком и пересчитывает предупреждения
    pub fn load(&mut self, table: ParsedTable) {
        self.warnings = diff_columns(&table.headers, &expected_headers());
        self.table = Some(table);
    }

    pub fn clear(&mut self) {
        self.table = None;
        self.warnings.clear();
    }

    /// No-op when nothing is loaded.
    pub fn update_cell(&mut self, row_index: usize, column: &str, value: &str) {
        if let Some(table) = &self.table {
            self.table = Some(table.update_cell(row_index, column, value));
        }
    }

    pub fn table(&self) -> Option<&ParsedTable> {
        self.table.as_ref()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn row_count(&self) -> usize {
        self.table.as_ref().map_or(0, ParsedTable::row_count)
    }

    /// Тело запроса синхронизации из текущих строк
    pub fn sync_request(&self) -> Option<SyncRequest> {
        self.table.as_ref().map(|table| SyncRequest {
            rows: table.rows_owned(),
        })
    }
}
