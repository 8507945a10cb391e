//! In-memory `CaseStore` double for unit tests.
//!
//! Records every call in order, serves a mutable backing collection so a
//! refetch after a write observes the write, and supports one-shot failure
//! injection per operation name.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::StoreError;
use crate::models::{Case, CaseCreate, CaseType, NewAlert, NewNote, NewTask, Priority};
use crate::stage::Stage;
use crate::store::CaseStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    ListCases { firm_id: String },
    CreateCase { case_number: String },
    SetStage { case_id: String, stage: Stage },
    AppendNote { case_id: String },
    AppendTask { case_id: String },
    AppendAlert { case_id: String },
}

#[derive(Default)]
pub struct RecordingStore {
    cases: Mutex<Vec<Case>>,
    calls: Mutex<Vec<StoreCall>>,
    failures: Mutex<HashSet<&'static str>>,
}

impl RecordingStore {
    pub fn with_cases(cases: Vec<Case>) -> Self {
        Self {
            cases: Mutex::new(cases),
            ..Default::default()
        }
    }

    /// Make the next invocation of `op` fail with a transport error.
    pub fn fail_next(&self, op: &'static str) {
        self.failures.lock().unwrap().insert(op);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: StoreCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn maybe_fail(&self, op: &'static str) -> Result<(), StoreError> {
        if self.failures.lock().unwrap().remove(op) {
            Err(StoreError::Transport(format!("injected failure in {}", op)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CaseStore for RecordingStore {
    async fn list_cases(&self, firm_id: &str) -> Result<Vec<Case>, StoreError> {
        self.record(StoreCall::ListCases {
            firm_id: firm_id.into(),
        });
        self.maybe_fail("list_cases")?;
        Ok(self.cases.lock().unwrap().clone())
    }

    async fn create_case(&self, draft: CaseCreate) -> Result<Case, StoreError> {
        self.record(StoreCall::CreateCase {
            case_number: draft.case_number.clone(),
        });
        self.maybe_fail("create_case")?;
        let now = Utc::now();
        let case = Case {
            id: uuid::Uuid::new_v4().to_string(),
            law_firm_id: draft.law_firm_id,
            case_number: draft.case_number,
            case_title: draft.case_title,
            case_type: draft.case_type,
            court_jurisdiction: draft.court_jurisdiction,
            client_name: draft.client_name,
            assigned_attorney: draft.assigned_attorney,
            opposing_counsel: draft.opposing_counsel,
            judge_name: draft.judge_name,
            description: draft.description,
            stage: Stage::Intake,
            priority: draft.priority,
            next_hearing_date: None,
            documents_count: 0,
            research_count: 0,
            active_alerts_count: 0,
            pending_tasks_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.cases.lock().unwrap().push(case.clone());
        Ok(case)
    }

    async fn set_stage(&self, case_id: &str, stage: Stage) -> Result<Case, StoreError> {
        self.record(StoreCall::SetStage {
            case_id: case_id.into(),
            stage,
        });
        self.maybe_fail("set_stage")?;
        let mut cases = self.cases.lock().unwrap();
        let case = cases
            .iter_mut()
            .find(|c| c.id == case_id)
            .ok_or_else(|| StoreError::not_found(case_id))?;
        case.stage = stage;
        case.updated_at = Utc::now();
        Ok(case.clone())
    }

    async fn append_note(&self, case_id: &str, _note: NewNote) -> Result<(), StoreError> {
        self.record(StoreCall::AppendNote {
            case_id: case_id.into(),
        });
        self.maybe_fail("append_note")?;
        self.touch(case_id, |_| {})
    }

    async fn append_task(&self, case_id: &str, _task: NewTask) -> Result<(), StoreError> {
        self.record(StoreCall::AppendTask {
            case_id: case_id.into(),
        });
        self.maybe_fail("append_task")?;
        self.touch(case_id, |c| c.pending_tasks_count += 1)
    }

    async fn append_alert(&self, case_id: &str, _alert: NewAlert) -> Result<(), StoreError> {
        self.record(StoreCall::AppendAlert {
            case_id: case_id.into(),
        });
        self.maybe_fail("append_alert")?;
        self.touch(case_id, |c| c.active_alerts_count += 1)
    }
}

impl RecordingStore {
    fn touch(&self, case_id: &str, f: impl FnOnce(&mut Case)) -> Result<(), StoreError> {
        let mut cases = self.cases.lock().unwrap();
        let case = cases
            .iter_mut()
            .find(|c| c.id == case_id)
            .ok_or_else(|| StoreError::not_found(case_id))?;
        f(case);
        case.updated_at = Utc::now();
        Ok(())
    }
}

/// A minimal well-formed case for test fixtures.
pub fn make_case(id: &str, stage: Stage) -> Case {
    let now = Utc::now();
    Case {
        id: id.to_string(),
        law_firm_id: "firm-1".to_string(),
        case_number: format!("CV2025-{}", id),
        case_title: format!("Matter {}", id),
        case_type: CaseType::Civil,
        court_jurisdiction: "Delhi High Court".to_string(),
        client_name: "R. Mehta".to_string(),
        assigned_attorney: "A. Rao".to_string(),
        opposing_counsel: None,
        judge_name: None,
        description: "Test matter".to_string(),
        stage,
        priority: Priority::Medium,
        next_hearing_date: None,
        documents_count: 0,
        research_count: 0,
        active_alerts_count: 0,
        pending_tasks_count: 0,
        created_at: now,
        updated_at: now,
    }
}
