//! HTTP API for the case record store.
//!
//! Route table, request payloads, and handlers. Errors map onto a small
//! `ApiError` wrapper so every failure leaves the server as
//! `{"error": message}` with the right status code.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::DbHandle;
use crate::models::{Case, CaseAlert, CaseCreate, CaseNote, CaseTask, CaseType, NewAlert, NewNote, NewTask, Priority};
use crate::research::{ResearchRequest, ResearchResult};
use crate::stage::Stage;

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub db: DbHandle,
}

pub type SharedState = Arc<AppState>;

// ── Request payload types ─────────────────────────────────────────────

/// Creation payload with every required field optional at the wire level,
/// so an omission comes back as a 400 naming the field rather than a
/// deserialization rejection.
#[derive(Deserialize)]
pub struct CreateCaseRequest {
    pub law_firm_id: Option<String>,
    pub case_number: Option<String>,
    pub case_title: Option<String>,
    #[serde(default)]
    pub case_type: CaseType,
    pub court_jurisdiction: Option<String>,
    pub client_name: Option<String>,
    pub assigned_attorney: Option<String>,
    #[serde(default)]
    pub opposing_counsel: Option<String>,
    #[serde(default)]
    pub judge_name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Deserialize)]
pub struct SetStageRequest {
    pub stage: Stage,
}

// ── Error handling ────────────────────────────────────────────────────

pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

fn internal(e: anyhow::Error) -> ApiError {
    tracing::error!(error = %e, "database operation failed");
    ApiError::Internal(e.to_string())
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/api/cases", post(create_case))
        .route("/api/cases/{firm_id}", get(list_cases))
        .route("/api/cases/{id}/stage", put(set_stage))
        .route("/api/cases/{id}/notes", post(add_note))
        .route("/api/cases/{id}/tasks", post(add_task))
        .route("/api/cases/{id}/alerts", post(add_alert))
        .route("/api/legal-research", post(run_research))
        .route("/api/research-history/{firm_id}", get(research_history))
        .route("/api/documents/{firm_id}", get(list_documents))
        .route("/health", get(health_check))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn list_cases(
    State(state): State<SharedState>,
    Path(firm_id): Path<String>,
) -> Result<Json<Vec<Case>>, ApiError> {
    let cases = state
        .db
        .call(move |db| db.list_cases(&firm_id))
        .await
        .map_err(internal)?;
    Ok(Json(cases))
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ApiError::BadRequest(format!(
            "missing required field: {}",
            name
        ))),
    }
}

async fn create_case(
    State(state): State<SharedState>,
    Json(req): Json<CreateCaseRequest>,
) -> Result<(StatusCode, Json<Case>), ApiError> {
    let draft = CaseCreate {
        law_firm_id: required(req.law_firm_id, "law_firm_id")?,
        case_number: required(req.case_number, "case_number")?,
        case_title: required(req.case_title, "case_title")?,
        case_type: req.case_type,
        court_jurisdiction: required(req.court_jurisdiction, "court_jurisdiction")?,
        client_name: required(req.client_name, "client_name")?,
        assigned_attorney: required(req.assigned_attorney, "assigned_attorney")?,
        opposing_counsel: req.opposing_counsel,
        judge_name: req.judge_name,
        description: required(req.description, "description")?,
        priority: req.priority,
    };
    let case = state
        .db
        .call(move |db| db.create_case(&draft))
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint failed") {
                ApiError::Conflict("case_number already exists for this firm".into())
            } else {
                internal(e)
            }
        })?;
    Ok((StatusCode::CREATED, Json(case)))
}

async fn set_stage(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(req): Json<SetStageRequest>,
) -> Result<Json<Case>, ApiError> {
    let case_id = id.clone();
    let case = state
        .db
        .call(move |db| db.set_stage(&case_id, req.stage))
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::NotFound(format!("Case {} not found", id)))?;
    Ok(Json(case))
}

async fn add_note(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(note): Json<NewNote>,
) -> Result<(StatusCode, Json<CaseNote>), ApiError> {
    let case_id = id.clone();
    let created = state
        .db
        .call(move |db| db.add_note(&case_id, &note))
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::NotFound(format!("Case {} not found", id)))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn add_task(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(task): Json<NewTask>,
) -> Result<(StatusCode, Json<CaseTask>), ApiError> {
    let case_id = id.clone();
    let created = state
        .db
        .call(move |db| db.add_task(&case_id, &task))
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::NotFound(format!("Case {} not found", id)))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn add_alert(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(alert): Json<NewAlert>,
) -> Result<(StatusCode, Json<CaseAlert>), ApiError> {
    let case_id = id.clone();
    let created = state
        .db
        .call(move |db| db.add_alert(&case_id, &alert))
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::NotFound(format!("Case {} not found", id)))?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn run_research(
    State(state): State<SharedState>,
    Json(req): Json<ResearchRequest>,
) -> Result<(StatusCode, Json<ResearchResult>), ApiError> {
    if req.query.trim().is_empty() {
        return Err(ApiError::BadRequest("missing required field: query".into()));
    }
    // The store records the query; answer generation lives elsewhere.
    let result_text = "Research request recorded; results pending counsel review.".to_string();
    let firm_id = req.law_firm_id.clone();
    let query = req.query.clone();
    let case_id = req.case_id.clone();
    let stored = result_text.clone();
    let id = state
        .db
        .call(move |db| db.record_research(&firm_id, case_id.as_deref(), &query, &stored))
        .await
        .map_err(internal)?;
    Ok((
        StatusCode::CREATED,
        Json(ResearchResult {
            id,
            case_id: req.case_id,
            law_firm_id: req.law_firm_id,
            query: req.query,
            result: result_text,
            created_at: chrono::Utc::now(),
        }),
    ))
}

async fn research_history(
    State(state): State<SharedState>,
    Path(firm_id): Path<String>,
) -> Result<Json<Vec<ResearchResult>>, ApiError> {
    let results = state
        .db
        .call(move |db| db.list_research(&firm_id))
        .await
        .map_err(internal)?;
    Ok(Json(results))
}

async fn list_documents(
    State(state): State<SharedState>,
    Path(firm_id): Path<String>,
) -> Result<Json<Vec<crate::documents::LegalDocument>>, ApiError> {
    let docs = state
        .db
        .call(move |db| db.list_documents(&firm_id))
        .await
        .map_err(internal)?;
    Ok(Json(docs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DocketDb;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let db = DocketDb::new_in_memory().unwrap();
        let state = Arc::new(AppState {
            db: DbHandle::new(db),
        });
        api_router().with_state(state)
    }

    fn create_body(number: &str) -> String {
        serde_json::json!({
            "law_firm_id": "firm-1",
            "case_number": number,
            "case_title": "Mehta vs State",
            "court_jurisdiction": "Delhi High Court",
            "client_name": "R. Mehta",
            "assigned_attorney": "A. Rao",
            "description": "Land acquisition dispute"
        })
        .to_string()
    }

    fn post(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(resp: Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_check_responds() {
        let app = test_app();
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_defaults_and_forces_intake() {
        let app = test_app();
        let resp = app
            .oneshot(post("/api/cases", create_body("CV2025-001")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let case = json_body(resp).await;
        assert_eq!(case["stage"], "intake");
        assert_eq!(case["case_type"], "civil");
        assert_eq!(case["priority"], "medium");
    }

    #[tokio::test]
    async fn create_missing_field_is_400() {
        let app = test_app();
        let body = serde_json::json!({
            "law_firm_id": "firm-1",
            "case_number": "CV2025-002"
        })
        .to_string();
        let resp = app.oneshot(post("/api/cases", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err = json_body(resp).await;
        assert!(err["error"].as_str().unwrap().contains("case_title"));
    }

    #[tokio::test]
    async fn duplicate_case_number_is_409() {
        let app = test_app();
        let resp = app
            .clone()
            .oneshot(post("/api/cases", create_body("CV2025-003")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let resp = app
            .oneshot(post("/api/cases", create_body("CV2025-003")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn set_stage_unknown_id_is_404() {
        let app = test_app();
        let req = Request::builder()
            .method("PUT")
            .uri("/api/cases/no-such-id/stage")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"stage": "hearing"}"#))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn stage_update_round_trips_through_list() {
        let app = test_app();
        let resp = app
            .clone()
            .oneshot(post("/api/cases", create_body("CV2025-004")))
            .await
            .unwrap();
        let case = json_body(resp).await;
        let id = case["id"].as_str().unwrap().to_string();

        let req = Request::builder()
            .method("PUT")
            .uri(format!("/api/cases/{}/stage", id))
            .header("content-type", "application/json")
            .body(Body::from(r#"{"stage": "hearing"}"#))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/cases/firm-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let cases = json_body(resp).await;
        assert_eq!(cases[0]["stage"], "hearing");
    }

    #[tokio::test]
    async fn appended_children_show_up_in_listed_counters() {
        let app = test_app();
        let resp = app
            .clone()
            .oneshot(post("/api/cases", create_body("CV2025-005")))
            .await
            .unwrap();
        let case = json_body(resp).await;
        let id = case["id"].as_str().unwrap().to_string();

        let task = serde_json::json!({
            "title": "File reply",
            "assigned_to": "user-1"
        })
        .to_string();
        let resp = app
            .clone()
            .oneshot(post(&format!("/api/cases/{}/tasks", id), task))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let alert = serde_json::json!({
            "alert_type": "reminder",
            "message": "hearing tomorrow"
        })
        .to_string();
        let resp = app
            .clone()
            .oneshot(post(&format!("/api/cases/{}/alerts", id), alert))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/cases/firm-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let cases = json_body(resp).await;
        assert_eq!(cases[0]["pending_tasks_count"], 1);
        assert_eq!(cases[0]["active_alerts_count"], 1);
    }

    #[tokio::test]
    async fn note_to_unknown_case_is_404() {
        let app = test_app();
        let note = serde_json::json!({
            "content": "adjourned",
            "author": "user-1"
        })
        .to_string();
        let resp = app
            .oneshot(post("/api/cases/no-such-id/notes", note))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn research_is_recorded_and_listed() {
        let app = test_app();
        let body = serde_json::json!({
            "law_firm_id": "firm-1",
            "query": "limitation period for civil appeals"
        })
        .to_string();
        let resp = app
            .clone()
            .oneshot(post("/api/legal-research", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/research-history/firm-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let history = json_body(resp).await;
        assert_eq!(history.as_array().unwrap().len(), 1);
        assert_eq!(history[0]["query"], "limitation period for civil appeals");
    }
}
