use contracts::shared::csv_import::{check_file, parse_csv, ImportError, ParsedTable};
use wasm_bindgen_futures::JsFuture;

/// Читает выбранный файл целиком в байты
async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, ImportError> {
    let array_buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ImportError::parse(format!("Failed to read file: {:?}", e)))?;

    Ok(js_sys::Uint8Array::new(&array_buffer).to_vec())
}

/// Проверяет файл (расширение, размер), читает и парсит CSV
///
/// Файл с неверным расширением или слишком большой не читается вовсе.
pub async fn load_csv_file(file: web_sys::File) -> Result<ParsedTable, ImportError> {
    let name = file.name();
    let size = file.size() as u64;
    check_file(&name, size)?;

    let bytes = read_file_bytes(&file).await?;
    let table = parse_csv(&bytes)?;

    log::info!(
        "Parsed {}: {} columns, {} rows",
        name,
        table.headers.len(),
        table.row_count()
    );
    Ok(table)
}
