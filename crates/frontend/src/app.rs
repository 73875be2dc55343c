use crate::usecases::u501_sync_patients_to_crm::PatientUploadPage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <PatientUploadPage />
    }
}
