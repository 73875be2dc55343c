use thiserror::Error;

/// Ошибки загрузки CSV файла (выбор файла, парсинг, выгрузка)
///
/// Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Please select a .CSV file.")]
    InvalidFileExtension { file_name: String },

    #[error("File too large (max 5 MB).")]
    FileTooLarge { size: u64 },

    #[error("{0}")]
    Parse(String),

    #[error("CSV export error: {0}")]
    Export(String),
}

impl ImportError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Ошибка выбора файла (можно выбрать другой файл без перезагрузки)
    pub fn is_file_selection(&self) -> bool {
        matches!(
            self,
            Self::InvalidFileExtension { .. } | Self::FileTooLarge { .. }
        )
    }
}
