//! HTTP implementation of `CaseStore`.
//!
//! Speaks JSON to a remote case record store (`docket serve` or any service
//! honoring the same contract). HTTP statuses map onto the error taxonomy:
//! 404 → `NotFound`, 400/422 → `Validation`, 409 → `Conflict`, everything
//! else (including connection failures) → `Transport`.

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::StoreError;
use crate::models::{Case, CaseCreate, NewAlert, NewNote, NewTask};
use crate::stage::Stage;
use crate::store::CaseStore;

pub struct HttpCaseStore {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct SetStageRequest {
    stage: Stage,
}

impl HttpCaseStore {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8420`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a non-success response into the matching `StoreError`.
    async fn reject(case_id: &str, resp: reqwest::Response) -> StoreError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        match status {
            reqwest::StatusCode::NOT_FOUND => StoreError::not_found(case_id),
            reqwest::StatusCode::BAD_REQUEST | reqwest::StatusCode::UNPROCESSABLE_ENTITY => {
                StoreError::Validation(body)
            }
            reqwest::StatusCode::CONFLICT => StoreError::Conflict {
                id: case_id.to_string(),
            },
            _ => StoreError::Transport(format!("server returned {}: {}", status, body)),
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, StoreError> {
        resp.json::<T>()
            .await
            .map_err(|e| StoreError::Transport(format!("failed to decode response: {}", e)))
    }

    /// POST an append payload to a child collection of one case.
    async fn append<B: Serialize + Sync>(
        &self,
        case_id: &str,
        child: &str,
        body: &B,
    ) -> Result<(), StoreError> {
        let resp = self
            .client
            .post(self.url(&format!("/api/cases/{}/{}", case_id, child)))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::reject(case_id, resp).await)
        }
    }
}

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Transport(e.to_string())
}

#[async_trait]
impl CaseStore for HttpCaseStore {
    async fn list_cases(&self, firm_id: &str) -> Result<Vec<Case>, StoreError> {
        let resp = self
            .client
            .get(self.url(&format!("/api/cases/{}", firm_id)))
            .send()
            .await
            .map_err(transport)?;
        if resp.status().is_success() {
            Self::decode(resp).await
        } else {
            Err(Self::reject(firm_id, resp).await)
        }
    }

    async fn create_case(&self, draft: CaseCreate) -> Result<Case, StoreError> {
        let resp = self
            .client
            .post(self.url("/api/cases"))
            .json(&draft)
            .send()
            .await
            .map_err(transport)?;
        if resp.status().is_success() {
            Self::decode(resp).await
        } else {
            Err(Self::reject(&draft.case_number, resp).await)
        }
    }

    async fn set_stage(&self, case_id: &str, stage: Stage) -> Result<Case, StoreError> {
        let resp = self
            .client
            .put(self.url(&format!("/api/cases/{}/stage", case_id)))
            .json(&SetStageRequest { stage })
            .send()
            .await
            .map_err(transport)?;
        if resp.status().is_success() {
            Self::decode(resp).await
        } else {
            Err(Self::reject(case_id, resp).await)
        }
    }

    async fn append_note(&self, case_id: &str, note: NewNote) -> Result<(), StoreError> {
        self.append(case_id, "notes", &note).await
    }

    async fn append_task(&self, case_id: &str, task: NewTask) -> Result<(), StoreError> {
        self.append(case_id, "tasks", &task).await
    }

    async fn append_alert(&self, case_id: &str, alert: NewAlert) -> Result<(), StoreError> {
        self.append(case_id, "alerts", &alert).await
    }
}
