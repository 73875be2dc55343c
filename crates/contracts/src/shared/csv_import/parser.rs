use std::collections::HashSet;

use super::error::ImportError;
use super::types::{ParsedTable, RowRecord};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Разделители, которые распознаются автоматически (первый выигрывает при равенстве)
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b'\t', b'|', b';'];

pub const TOO_FEW_ROWS: &str = "CSV must have a header row and at least one data row";

/// Парсит CSV файл в заголовки + строки
///
/// Rules:
/// - the delimiter is detected from the first line that contains one of
///   `,` `\t` `|` `;` (comma when none does);
/// - bytes that are not valid UTF-8 are replaced with U+FFFD;
/// - every physical record with fewer than two cells is dropped (blank lines,
///   stray single cells);
/// - the first remaining record is the header row, the rest are data rows;
/// - trailing blank header cells are dropped together with their column, an
///   interior blank header is named "Column N" by its position;
/// - cells are mapped to headers by position, missing trailing cells become `""`;
/// - headers and values are trimmed.
pub fn parse_csv(bytes: &[u8]) -> Result<ParsedTable, ImportError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(detect_delimiter(bytes))
        .from_reader(bytes);

    let mut records: Vec<Vec<String>> = Vec::new();
    for result in reader.byte_records() {
        let record = result.map_err(read_error)?;
        if record.len() > 1 {
            records.push(
                record
                    .iter()
                    .map(|field| String::from_utf8_lossy(field).trim().to_string())
                    .collect(),
            );
        }
    }

    let Some((header_record, data_records)) = records.split_first() else {
        return Err(ImportError::parse(TOO_FEW_ROWS));
    };
    if data_records.is_empty() {
        return Err(ImportError::parse(TOO_FEW_ROWS));
    }

    let headers = header_names(header_record);

    let mut seen = HashSet::new();
    for header in &headers {
        if !seen.insert(header.as_str()) {
            return Err(ImportError::parse(format!(
                "CSV has duplicate column: {}",
                header
            )));
        }
    }

    let rows = data_records
        .iter()
        .map(|record| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, key)| {
                    let value = record.get(idx).cloned().unwrap_or_default();
                    (key.clone(), value)
                })
                .collect::<RowRecord>()
        })
        .collect();

    Ok(ParsedTable::new(headers, rows))
}

fn read_error(e: csv::Error) -> ImportError {
    // Display of csv::Error already carries its own "CSV ... error" prefix
    ImportError::parse(e.to_string())
}

/// Разделитель по первой строке, где встречается хотя бы один кандидат
fn detect_delimiter(bytes: &[u8]) -> u8 {
    bytes
        .split(|&b| b == b'\n')
        .find_map(|line| {
            let mut best: Option<(u8, usize)> = None;
            for candidate in DELIMITER_CANDIDATES {
                let count = count_unquoted(line, candidate);
                if count > best.map_or(0, |(_, n)| n) {
                    best = Some((candidate, count));
                }
            }
            best.map(|(delimiter, _)| delimiter)
        })
        .unwrap_or(b',')
}

fn count_unquoted(line: &[u8], delimiter: u8) -> usize {
    let mut in_quotes = false;
    line.iter()
        .filter(|&&b| {
            if b == b'"' {
                in_quotes = !in_quotes;
            }
            !in_quotes && b == delimiter
        })
        .count()
}

fn header_names(header_record: &[String]) -> Vec<String> {
    let width = header_record
        .iter()
        .rposition(|h| !h.is_empty())
        .map_or(0, |last| last + 1);

    header_record[..width]
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            if h.is_empty() {
                format!("Column {}", idx + 1)
            } else {
                h.clone()
            }
        })
        .collect()
}

/// Сериализует таблицу обратно в CSV (заголовки в исходном порядке)
pub fn write_csv(table: &ParsedTable) -> Result<String, ImportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(&table.headers)
        .map_err(|e| ImportError::Export(e.to_string()))?;

    for row in &table.rows {
        writer
            .write_record(table.headers.iter().map(|h| row.get(h).unwrap_or("")))
            .map_err(|e| ImportError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::Export(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| ImportError::Export(e.to_string()))
}
