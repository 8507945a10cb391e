//! The external interface to the case record store.
//!
//! `CaseStore` is the seam between the workflow engine and whatever holds the
//! authoritative case records. The engine only ever needs the six operations
//! below; transport and encoding are the implementation's business.
//! `HttpCaseStore` talks JSON to a remote record store; tests substitute a
//! recording mock.

pub mod http;

pub use http::HttpCaseStore;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::models::{Case, CaseCreate, NewAlert, NewNote, NewTask};
use crate::stage::Stage;

#[async_trait]
pub trait CaseStore: Send + Sync {
    /// Full case collection for one firm, in the store's insertion order.
    async fn list_cases(&self, firm_id: &str) -> Result<Vec<Case>, StoreError>;

    /// Create a case. The store assigns the id and forces stage = intake.
    async fn create_case(&self, draft: CaseCreate) -> Result<Case, StoreError>;

    /// Move a case to `stage`. Callers short-circuit same-stage transitions;
    /// the store accepts them harmlessly anyway.
    async fn set_stage(&self, case_id: &str, stage: Stage) -> Result<Case, StoreError>;

    async fn append_note(&self, case_id: &str, note: NewNote) -> Result<(), StoreError>;

    async fn append_task(&self, case_id: &str, task: NewTask) -> Result<(), StoreError>;

    async fn append_alert(&self, case_id: &str, alert: NewAlert) -> Result<(), StoreError>;
}
