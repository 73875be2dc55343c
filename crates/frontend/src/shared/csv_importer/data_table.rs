use contracts::shared::csv_import::ParsedTable;
use leptos::prelude::*;

/// Редактируемая таблица загруженного CSV
///
/// Columns are rendered in `headers` order. The row/column skeleton only rebuilds
/// when the headers or the row count change, so an input keeps focus while its
/// value is edited. Every keystroke is reported through `on_change` as
/// `(row_index, column, value)`.
#[component]
pub fn DataTable(
    #[prop(into)] table: Signal<ParsedTable>,
    on_change: Callback<(usize, String, String)>,
) -> impl IntoView {
    let headers = Memo::new(move |_| table.with(|t| t.headers.clone()));
    let row_count = Memo::new(move |_| table.with(ParsedTable::row_count));

    view! {
        <div class="csv-table__wrapper">
            <table class="csv-table">
                <thead>
                    <tr>
                        <th class="csv-table__index">"#"</th>
                        {move || {
                            headers
                                .get()
                                .into_iter()
                                .map(|header| view! { <th>{header}</th> })
                                .collect_view()
                        }}
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || 0..row_count.get()
                        key=|row_index| *row_index
                        children=move |row_index| {
                            view! {
                                <tr>
                                    <td class="csv-table__index">{row_index + 1}</td>
                                    {move || {
                                        headers
                                            .get()
                                            .into_iter()
                                            .map(|column| {
                                                let label = format!("Row {} {}", row_index + 1, column);
                                                let column_for_value = column.clone();
                                                let value = move || {
                                                    table.with(|t| {
                                                        t.cell(row_index, &column_for_value)
                                                            .unwrap_or_default()
                                                            .to_string()
                                                    })
                                                };
                                                view! {
                                                    <td>
                                                        <input
                                                            type="text"
                                                            class="csv-table__input"
                                                            aria-label=label
                                                            prop:value=value
                                                            on:input=move |ev| {
                                                                on_change
                                                                    .run((
                                                                        row_index,
                                                                        column.clone(),
                                                                        event_target_value(&ev),
                                                                    ));
                                                            }
                                                        />
                                                    </td>
                                                }
                                            })
                                            .collect_view()
                                    }}
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
