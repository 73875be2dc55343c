use serde::{Deserialize, Serialize};

/// Ответ синхронизации: успех или одно сообщение об ошибке
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SyncSummary>,
}

/// Сколько контактов создано / обновлено
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub created: usize,
    pub updated: usize,
}

impl SyncSummary {
    pub fn total(&self) -> usize {
        self.created + self.updated
    }
}

impl SyncResponse {
    pub fn ok(summary: SyncSummary) -> Self {
        Self {
            success: true,
            error: None,
            summary: Some(summary),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            summary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_wire_shape() {
        let json = serde_json::to_value(SyncResponse::failure("Row 1 is missing an EHR ID")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "error": "Row 1 is missing an EHR ID"})
        );
    }

    #[test]
    fn test_success_parses_without_optional_fields() {
        let parsed: SyncResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.error, None);
        assert_eq!(parsed.summary, None);
    }
}
