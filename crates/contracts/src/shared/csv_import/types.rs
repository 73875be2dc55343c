use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Строка CSV: имя колонки -> значение ячейки
///
/// Keys are whatever headers the file had; no schema is implied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowRecord(BTreeMap<String, String>);

impl RowRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Копия строки, в которой изменена одна ячейка
    pub fn with_cell(&self, column: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.insert(column, value);
        next
    }
}

impl FromIterator<(String, String)> for RowRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(&str, &str); N]> for RowRecord {
    fn from(cells: [(&str, &str); N]) -> Self {
        cells
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// Результат парсинга CSV: заголовки + строки в порядке файла
///
/// Rows are shared through `Arc` so an edit can replace one row while every other
/// row stays pointer-identical to the previous table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Arc<RowRecord>>,
}

impl ParsedTable {
    pub fn new(headers: Vec<String>, rows: Vec<RowRecord>) -> Self {
        Self {
            headers,
            rows: rows.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Значение ячейки; `None` если строки или колонки нет
    pub fn cell(&self, row_index: usize, column: &str) -> Option<&str> {
        self.rows.get(row_index).and_then(|row| row.get(column))
    }

    /// Строки без `Arc` (для отправки на сервер)
    pub fn rows_owned(&self) -> Vec<RowRecord> {
        self.rows.iter().map(|row| row.as_ref().clone()).collect()
    }
}
