/// Выгрузка отредактированной таблицы в CSV файл
use contracts::shared::csv_import::{write_csv, ParsedTable};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Сериализует таблицу в CSV и инициирует скачивание
pub fn download_csv(table: &ParsedTable, filename: &str) -> Result<(), String> {
    if table.headers.is_empty() {
        return Err("Nothing to export".to_string());
    }

    let csv_content = write_csv(table).map_err(|e| e.to_string())?;
    let blob = create_csv_blob(&csv_content)?;
    download_blob(&blob, filename)
}

/// Имя файла выгрузки: "patients.csv" -> "patients_edited.csv"
pub fn edited_file_name(original: Option<&str>) -> String {
    let stem = original
        .map(|name| {
            let lower = name.to_lowercase();
            if lower.ends_with(".csv") {
                &name[..name.len() - 4]
            } else {
                name
            }
        })
        .filter(|stem| !stem.is_empty())
        .unwrap_or("patients");
    format!("{}_edited.csv", stem)
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Скачивание через временную ссылку <a download>
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edited_file_name() {
        assert_eq!(edited_file_name(Some("patients.csv")), "patients_edited.csv");
        assert_eq!(edited_file_name(Some("Export.CSV")), "Export_edited.csv");
        assert_eq!(edited_file_name(Some(".csv")), "patients_edited.csv");
        assert_eq!(edited_file_name(None), "patients_edited.csv");
    }
}
