/// Метаданные UseCase для идентификации и отображения в UI
pub trait UseCaseMetadata {
    /// Индекс UseCase (например, "u501")
    fn usecase_index() -> &'static str;

    /// Техническое имя (например, "sync_patients_to_crm")
    fn usecase_name() -> &'static str;

    /// Отображаемое имя для UI
    fn display_name() -> &'static str;

    /// Описание UseCase
    fn description() -> &'static str {
        ""
    }

    /// Полное имя вида "u501_sync_patients_to_crm"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }

    /// Путь API вида "/api/u501/sync"
    fn api_path(action: &str) -> String {
        format!("/api/{}/{}", Self::usecase_index(), action)
    }
}
