//! Загрузка CSV: парсинг, проверка колонок, редактирование строк

pub mod error;
pub mod parser;
pub mod store;
pub mod types;
pub mod validation;

pub use error::ImportError;
pub use parser::{parse_csv, write_csv};
pub use store::TableStore;
pub use types::{ParsedTable, RowRecord};
pub use validation::{check_file, diff_columns, MAX_FILE_SIZE};
