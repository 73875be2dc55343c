//! In-process fake CRM for tests (axum on 127.0.0.1:0)

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    routing::{post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const FAKE_TOKEN: &str = "test-token";

/// Email the fake CRM refuses with 409
pub const TAKEN_EMAIL: &str = "taken@example.com";

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct FakeCrm {
    /// external_id -> contact id
    contacts: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<RecordedCall>>,
    next_id: Mutex<usize>,
}

impl FakeCrm {
    pub fn with_contact(external_id: &str, contact_id: &str) -> Self {
        let crm = Self::default();
        crm.contacts
            .lock()
            .unwrap()
            .insert(external_id.to_string(), contact_id.to_string());
        crm
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn contact_id(&self, external_id: &str) -> Option<String> {
        self.contacts.lock().unwrap().get(external_id).cloned()
    }

    fn record(&self, method: &str, path: String, headers: &HeaderMap, body: Value) {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.to_string(),
            path,
            authorization: headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body,
        });
    }

    fn has_contact_id(&self, contact_id: &str) -> bool {
        self.contacts
            .lock()
            .unwrap()
            .values()
            .any(|id| id == contact_id)
    }
}

pub async fn spawn_fake_crm(crm: Arc<FakeCrm>) -> String {
    let app = Router::new()
        .route("/contacts/search", post(search))
        .route("/contacts", post(create))
        .route("/contacts/:id", put(update))
        .with_state(crm);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(&format!("Bearer {}", FAKE_TOKEN)[..])
}

fn error_list(status: StatusCode, code: &str, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "type": "error.list",
            "errors": [{"code": code, "message": message}]
        })),
    )
}

async fn search(
    State(crm): State<Arc<FakeCrm>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    crm.record("POST", "/contacts/search".to_string(), &headers, body.clone());
    if !authorized(&headers) {
        return error_list(StatusCode::UNAUTHORIZED, "unauthorized", "Access Token Invalid");
    }

    let external_id = body["query"]["value"].as_str().unwrap_or_default();
    let data: Vec<Value> = crm
        .contact_id(external_id)
        .map(|id| json!({"type": "contact", "id": id, "external_id": external_id}))
        .into_iter()
        .collect();
    let total = data.len();

    (
        StatusCode::OK,
        Json(json!({"type": "list", "data": data, "total_count": total})),
    )
}

async fn create(
    State(crm): State<Arc<FakeCrm>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    crm.record("POST", "/contacts".to_string(), &headers, body.clone());
    if !authorized(&headers) {
        return error_list(StatusCode::UNAUTHORIZED, "unauthorized", "Access Token Invalid");
    }
    if body["email"].as_str() == Some(TAKEN_EMAIL) {
        return error_list(
            StatusCode::CONFLICT,
            "conflict",
            "A contact matching those details already exists",
        );
    }

    let id = {
        let mut next = crm.next_id.lock().unwrap();
        *next += 1;
        format!("c-{}", *next)
    };
    if let Some(external_id) = body["external_id"].as_str() {
        crm.contacts
            .lock()
            .unwrap()
            .insert(external_id.to_string(), id.clone());
    }

    (StatusCode::OK, Json(json!({"type": "contact", "id": id})))
}

async fn update(
    State(crm): State<Arc<FakeCrm>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    crm.record("PUT", format!("/contacts/{}", id), &headers, body.clone());
    if !authorized(&headers) {
        return error_list(StatusCode::UNAUTHORIZED, "unauthorized", "Access Token Invalid");
    }
    if !crm.has_contact_id(&id) {
        return error_list(StatusCode::NOT_FOUND, "not_found", "Contact not found");
    }

    (StatusCode::OK, Json(json!({"type": "contact", "id": id})))
}
