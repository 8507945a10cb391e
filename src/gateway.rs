//! Mutation gateway between the board and the case store.
//!
//! Every successful mutation is followed by a full refetch of the firm's
//! case collection, and the refetched collection is what the caller gets
//! back. There is no local patching and no merging: the server result is
//! the whole truth. A failed mutation returns the error without touching
//! anything, so the caller keeps showing its last-known collection.

use std::sync::Arc;

use crate::errors::StoreError;
use crate::models::{Case, CaseCreate, NewAlert, NewNote, NewTask};
use crate::stage::Stage;
use crate::store::CaseStore;

pub struct CaseGateway<S: CaseStore> {
    store: Arc<S>,
    firm_id: String,
}

impl<S: CaseStore> CaseGateway<S> {
    pub fn new(store: Arc<S>, firm_id: impl Into<String>) -> Self {
        Self {
            store,
            firm_id: firm_id.into(),
        }
    }

    pub fn firm_id(&self) -> &str {
        &self.firm_id
    }

    /// Fetch the full case collection for the firm.
    pub async fn fetch_cases(&self) -> Result<Vec<Case>, StoreError> {
        self.store.list_cases(&self.firm_id).await
    }

    /// Refetch after a mutation succeeded. A refetch failure after a
    /// successful write still surfaces as an error; the caller keeps its
    /// stale collection and the next refresh heals it.
    async fn refetch(&self, op: &str) -> Result<Vec<Case>, StoreError> {
        self.store.list_cases(&self.firm_id).await.map_err(|e| {
            tracing::warn!(op, error = %e, "refetch after mutation failed");
            e
        })
    }

    pub async fn create_case(&self, draft: CaseCreate) -> Result<Vec<Case>, StoreError> {
        if let Err(e) = self.store.create_case(draft).await {
            tracing::warn!(error = %e, "case creation failed");
            return Err(e);
        }
        self.refetch("create_case").await
    }

    pub async fn transition_stage(
        &self,
        case_id: &str,
        stage: Stage,
    ) -> Result<Vec<Case>, StoreError> {
        if let Err(e) = self.store.set_stage(case_id, stage).await {
            tracing::warn!(case_id, %stage, error = %e, "stage transition failed");
            return Err(e);
        }
        self.refetch("transition_stage").await
    }

    pub async fn append_note(
        &self,
        case_id: &str,
        note: NewNote,
    ) -> Result<Vec<Case>, StoreError> {
        if let Err(e) = self.store.append_note(case_id, note).await {
            tracing::warn!(case_id, error = %e, "note append failed");
            return Err(e);
        }
        self.refetch("append_note").await
    }

    pub async fn append_task(
        &self,
        case_id: &str,
        task: NewTask,
    ) -> Result<Vec<Case>, StoreError> {
        if let Err(e) = self.store.append_task(case_id, task).await {
            tracing::warn!(case_id, error = %e, "task append failed");
            return Err(e);
        }
        self.refetch("append_task").await
    }

    pub async fn append_alert(
        &self,
        case_id: &str,
        alert: NewAlert,
    ) -> Result<Vec<Case>, StoreError> {
        if let Err(e) = self.store.append_alert(case_id, alert).await {
            tracing::warn!(case_id, error = %e, "alert append failed");
            return Err(e);
        }
        self.refetch("append_alert").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingStore, StoreCall, make_case};

    fn draft() -> CaseCreate {
        CaseCreate {
            law_firm_id: "firm-1".into(),
            case_number: "CV2025-001".into(),
            case_title: "Mehta vs State".into(),
            case_type: Default::default(),
            court_jurisdiction: "Delhi High Court".into(),
            client_name: "R. Mehta".into(),
            assigned_attorney: "A. Rao".into(),
            opposing_counsel: None,
            judge_name: None,
            description: "Land acquisition dispute".into(),
            priority: Default::default(),
        }
    }

    #[tokio::test]
    async fn successful_mutation_refetches_the_collection() {
        let store = Arc::new(RecordingStore::with_cases(vec![make_case(
            "case-1",
            Stage::Intake,
        )]));
        let gateway = CaseGateway::new(store.clone(), "firm-1");

        let cases = gateway
            .transition_stage("case-1", Stage::Hearing)
            .await
            .unwrap();

        // Exactly one write then one list, and the returned collection
        // reflects the write.
        assert_eq!(
            store.calls(),
            vec![
                StoreCall::SetStage {
                    case_id: "case-1".into(),
                    stage: Stage::Hearing
                },
                StoreCall::ListCases {
                    firm_id: "firm-1".into()
                },
            ]
        );
        assert_eq!(cases[0].stage, Stage::Hearing);
    }

    #[tokio::test]
    async fn failed_mutation_does_not_refetch() {
        let store = Arc::new(RecordingStore::with_cases(vec![make_case(
            "case-1",
            Stage::Intake,
        )]));
        store.fail_next("append_note");
        let gateway = CaseGateway::new(store.clone(), "firm-1");

        let err = gateway
            .append_note(
                "case-1",
                NewNote {
                    content: "hearing adjourned".into(),
                    author: "user-1".into(),
                    note_type: "general".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(err.is_transport());
        // The failed append is the only call; no list followed it.
        assert_eq!(
            store.calls(),
            vec![StoreCall::AppendNote {
                case_id: "case-1".into()
            }]
        );
    }

    #[tokio::test]
    async fn create_then_refetch_returns_the_new_case() {
        let store = Arc::new(RecordingStore::with_cases(vec![]));
        let gateway = CaseGateway::new(store.clone(), "firm-1");

        let cases = gateway.create_case(draft()).await.unwrap();

        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].stage, Stage::Intake);
        assert_eq!(cases[0].case_number, "CV2025-001");
    }
}
