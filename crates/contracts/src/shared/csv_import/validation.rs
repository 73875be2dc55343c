use super::error::ImportError;

/// Максимальный размер загружаемого файла (5 MB)
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Проверка выбранного файла до парсинга: сначала расширение, потом размер
pub fn check_file(file_name: &str, size: u64) -> Result<(), ImportError> {
    if !file_name.to_lowercase().ends_with(".csv") {
        return Err(ImportError::InvalidFileExtension {
            file_name: file_name.to_string(),
        });
    }
    if size > MAX_FILE_SIZE {
        return Err(ImportError::FileTooLarge { size });
    }
    Ok(())
}

/// Сравнивает колонки файла с ожидаемыми
///
/// Advisory only: returns at most two warnings, extras first, then missing.
pub fn diff_columns<A, E>(actual: &[A], expected: &[E]) -> Vec<String>
where
    A: AsRef<str>,
    E: AsRef<str>,
{
    let extra: Vec<&str> = actual
        .iter()
        .map(AsRef::as_ref)
        .filter(|h| !expected.iter().any(|e| e.as_ref() == *h))
        .collect();

    let missing: Vec<&str> = expected
        .iter()
        .map(AsRef::as_ref)
        .filter(|e| !actual.iter().any(|h| h.as_ref() == *e))
        .collect();

    let mut warnings = Vec::new();
    if !extra.is_empty() {
        warnings.push(format!("Unexpected columns: {}", extra.join(", ")));
    }
    if !missing.is_empty() {
        warnings.push(format!("Missing columns: {}", missing.join(", ")));
    }
    warnings
}
