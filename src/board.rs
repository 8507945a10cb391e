//! Board controller: the single owner of the case collection and the drag
//! slot.
//!
//! The collection is only ever replaced wholesale with a fresh server fetch;
//! columns are computed from it on demand and never stored. All access is
//! serialized through `&mut self`, so a drop is fully resolved (write,
//! refetch, replace) before the next gesture is processed.

use std::sync::Arc;

use crate::drag::DragState;
use crate::errors::StoreError;
use crate::gateway::CaseGateway;
use crate::models::{Case, CaseCreate, NewAlert, NewNote, NewTask};
use crate::stage::{self, Stage};
use crate::store::CaseStore;

/// What became of a drop gesture.
#[derive(Debug)]
pub enum DropOutcome {
    /// No drag was pending, or the gesture ended without a column target.
    Ignored,
    /// Same-column drop, or the dragged case is no longer in the collection.
    /// No store call was made.
    NoOp,
    Transitioned { case_id: String, stage: Stage },
    /// The store rejected the move. The collection is unchanged and the card
    /// stays in its last-known column.
    Failed(StoreError),
}

pub struct BoardController<S: CaseStore> {
    gateway: CaseGateway<S>,
    cases: Vec<Case>,
    drag: DragState,
}

impl<S: CaseStore> BoardController<S> {
    pub fn new(store: Arc<S>, firm_id: impl Into<String>) -> Self {
        Self {
            gateway: CaseGateway::new(store, firm_id),
            cases: Vec::new(),
            drag: DragState::Idle,
        }
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn find_case(&self, case_id: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.id == case_id)
    }

    /// Cases belonging to one column, in collection order. Pure filter over
    /// the owned collection; the five partitions are disjoint and together
    /// cover every case.
    pub fn partition(&self, stage: Stage) -> Vec<&Case> {
        self.cases.iter().filter(|c| c.stage == stage).collect()
    }

    /// Replace the collection with a fresh fetch. On failure the last-known
    /// collection stays on screen.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        match self.gateway.fetch_cases().await {
            Ok(cases) => {
                self.cases = cases;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "board refresh failed, keeping last-known cases");
                Err(e)
            }
        }
    }

    // ── drag gestures ──────────────────────────────────────────────────────

    pub fn begin_drag(&mut self, case_id: impl Into<String>) {
        self.drag.begin(case_id);
    }

    pub fn drag_over(&mut self, target: Stage) {
        self.drag.hover(target);
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// Resolve the pending drop. A same-column drop is detected against the
    /// card's current stage in the owned collection and never reaches the
    /// store; a cross-column drop issues exactly one stage write followed by
    /// one refetch.
    pub async fn apply_drop(&mut self) -> DropOutcome {
        let Some((case_id, target)) = self.drag.take_drop() else {
            return DropOutcome::Ignored;
        };
        let Some(current) = self.find_case(&case_id).map(|c| c.stage) else {
            return DropOutcome::NoOp;
        };
        let Some(next) = stage::transition(current, target) else {
            return DropOutcome::NoOp;
        };
        match self.gateway.transition_stage(&case_id, next).await {
            Ok(cases) => {
                self.cases = cases;
                DropOutcome::Transitioned {
                    case_id,
                    stage: next,
                }
            }
            Err(e) => DropOutcome::Failed(e),
        }
    }

    // ── mutations ──────────────────────────────────────────────────────────

    pub async fn create_case(&mut self, draft: CaseCreate) -> Result<(), StoreError> {
        self.cases = self.gateway.create_case(draft).await?;
        Ok(())
    }

    pub async fn add_note(&mut self, case_id: &str, note: NewNote) -> Result<(), StoreError> {
        self.cases = self.gateway.append_note(case_id, note).await?;
        Ok(())
    }

    pub async fn add_task(&mut self, case_id: &str, task: NewTask) -> Result<(), StoreError> {
        self.cases = self.gateway.append_task(case_id, task).await?;
        Ok(())
    }

    pub async fn add_alert(&mut self, case_id: &str, alert: NewAlert) -> Result<(), StoreError> {
        self.cases = self.gateway.append_alert(case_id, alert).await?;
        Ok(())
    }
}
