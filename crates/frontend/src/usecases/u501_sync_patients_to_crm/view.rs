use super::api;
use crate::shared::csv_importer::{load_csv_file, DataTable};
use crate::shared::export::{download_csv, edited_file_name};
use contracts::shared::csv_import::TableStore;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_sync_patients_to_crm::{SyncPatientsToCrm, SyncSummary};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use wasm_bindgen::JsCast;

fn error_box(message: String) -> impl IntoView {
    view! {
        <div class="warning-box warning-box--error">
            <span class="warning-box__icon">"⚠"</span>
            <span class="warning-box__text">{message}</span>
        </div>
    }
}

#[component]
pub fn PatientUploadPage() -> impl IntoView {
    let store = RwSignal::new(TableStore::new());
    let (file_name, set_file_name) = signal(None::<String>);
    let (file_error, set_file_error) = signal(None::<String>);
    let (is_loading, set_is_loading) = signal(false);
    let (is_syncing, set_is_syncing) = signal(false);
    let (sync_error, set_sync_error) = signal(None::<String>);
    let (sync_summary, set_sync_summary) = signal(None::<SyncSummary>);

    let has_table = Memo::new(move |_| store.with(|s| s.table().is_some()));
    let row_count = Memo::new(move |_| store.with(TableStore::row_count));
    let table = Signal::derive(move || {
        store.with(|s| s.table().cloned().unwrap_or_default())
    });

    // Выбор файла: сбросить предыдущее состояние и распарсить новый файл
    let handle_file_select = move |ev: web_sys::Event| {
        store.update(TableStore::clear);
        set_file_error.set(None);
        set_sync_error.set(None);
        set_sync_summary.set(None);
        set_file_name.set(None);

        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        // Выбор отменен
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        set_file_name.set(Some(file.name()));

        set_is_loading.set(true);
        spawn_local(async move {
            match load_csv_file(file).await {
                Ok(parsed) => store.update(|s| s.load(parsed)),
                Err(e) => {
                    log::warn!("CSV load failed: {}", e);
                    if e.is_file_selection() {
                        // файл не принят: очистить input, чтобы можно было выбрать другой
                        input.set_value("");
                        set_file_name.set(None);
                    }
                    set_file_error.set(Some(e.to_string()));
                }
            }
            set_is_loading.set(false);
        });
    };

    let on_cell_change = Callback::new(move |(row_index, column, value): (usize, String, String)| {
        store.update(|s| s.update_cell(row_index, &column, &value));
    });

    let on_sync = move |_| {
        if is_syncing.get_untracked() {
            return;
        }
        let Some(request) = store.with_untracked(TableStore::sync_request) else {
            return;
        };

        set_sync_error.set(None);
        set_sync_summary.set(None);
        set_is_syncing.set(true);

        spawn_local(async move {
            match api::sync_rows(&request).await {
                Ok(summary) => set_sync_summary.set(Some(summary)),
                // Таблица остается как есть: пользователь может исправить и отправить снова
                Err(e) => set_sync_error.set(Some(e)),
            }
            set_is_syncing.set(false);
        });
    };

    let on_download = move |_| {
        let Some(current) = store.with_untracked(|s| s.table().cloned()) else {
            return;
        };
        let name = edited_file_name(file_name.get_untracked().as_deref());
        if let Err(e) = download_csv(&current, &name) {
            log::error!("CSV download failed: {}", e);
            set_file_error.set(Some(e));
        }
    };

    view! {
        <div class="page patient-upload">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Patient CSV Uploader"</h1>
                </div>
            </div>

            <div class="patient-upload__filebar">
                <label class="button button--primary" for="patient-csv-input">
                    "Choose CSV file"
                </label>
                <input
                    id="patient-csv-input"
                    type="file"
                    accept=".csv"
                    on:change=handle_file_select
                    class="hidden"
                />
                {move || match file_name.get() {
                    Some(name) => view! {
                        <span class="patient-upload__fileinfo"><strong>{name}</strong></span>
                    }.into_any(),
                    None => view! {
                        <span class="patient-upload__filehint">"No file selected"</span>
                    }.into_any(),
                }}
            </div>

            <Show when=move || is_loading.get()>
                <Space gap=SpaceGap::Small>
                    <Spinner />
                    <span>"Parsing..."</span>
                </Space>
            </Show>

            {move || file_error.get().map(error_box)}

            {move || {
                let warnings = store.with(|s| s.warnings().to_vec());
                (!warnings.is_empty()).then(|| view! {
                    <div class="warning-box warning-box--warning">
                        <span class="warning-box__icon">"⚠"</span>
                        <ul class="warning-box__list">
                            {warnings
                                .into_iter()
                                .map(|w| view! { <li>{w}</li> })
                                .collect_view()}
                        </ul>
                    </div>
                })
            }}

            <Show when=move || has_table.get()>
                <div class="patient-upload__actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_sync
                        disabled=Signal::derive(move || is_syncing.get() || row_count.get() == 0)
                    >
                        {move || if is_syncing.get() {
                            "Syncing...".to_string()
                        } else {
                            SyncPatientsToCrm::display_name().to_string()
                        }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=on_download
                    >
                        "Download CSV"
                    </Button>
                    <span class="patient-upload__rowcount">
                        {move || format!("{} rows", row_count.get())}
                    </span>
                </div>

                {move || sync_error.get().map(error_box)}

                {move || sync_summary.get().map(|summary| view! {
                    <div class="warning-box warning-box--success">
                        <span class="warning-box__icon">"✓"</span>
                        <span class="warning-box__text">
                            {format!(
                                "Data synced! {} created, {} updated.",
                                summary.created,
                                summary.updated
                            )}
                        </span>
                    </div>
                })}

                <DataTable table=table on_change=on_cell_change />
            </Show>
        </div>
    }
}

