//! Case creation form.
//!
//! Holds in-progress field values, validates them client-side before any
//! request is made, and clears only after the store confirms creation. A
//! rejected submission, client- or server-side, preserves every entered
//! value for correction.

use crate::board::BoardController;
use crate::errors::StoreError;
use crate::models::{CaseCreate, CaseType, Priority};
use crate::store::CaseStore;

/// Required fields checked before submit, in display order.
const REQUIRED: [(&str, fn(&CaseForm) -> &str); 6] = [
    ("case_number", |f| &f.case_number),
    ("case_title", |f| &f.case_title),
    ("court_jurisdiction", |f| &f.court_jurisdiction),
    ("client_name", |f| &f.client_name),
    ("assigned_attorney", |f| &f.assigned_attorney),
    ("description", |f| &f.description),
];

#[derive(Debug, Clone, Default)]
pub struct CaseForm {
    pub case_number: String,
    pub case_title: String,
    pub case_type: CaseType,
    pub court_jurisdiction: String,
    pub client_name: String,
    pub assigned_attorney: String,
    pub opposing_counsel: String,
    pub judge_name: String,
    pub description: String,
    pub priority: Priority,
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl CaseForm {
    /// Validate and assemble the creation payload. Whitespace-only input
    /// counts as missing; empty optional fields become `None` rather than
    /// empty strings.
    pub fn validate(&self, firm_id: &str) -> Result<CaseCreate, StoreError> {
        let missing: Vec<&str> = REQUIRED
            .iter()
            .filter(|(_, get)| get(self).trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        Ok(CaseCreate {
            law_firm_id: firm_id.to_string(),
            case_number: self.case_number.trim().to_string(),
            case_title: self.case_title.trim().to_string(),
            case_type: self.case_type,
            court_jurisdiction: self.court_jurisdiction.trim().to_string(),
            client_name: self.client_name.trim().to_string(),
            assigned_attorney: self.assigned_attorney.trim().to_string(),
            opposing_counsel: optional(&self.opposing_counsel),
            judge_name: optional(&self.judge_name),
            description: self.description.trim().to_string(),
            priority: self.priority,
        })
    }

    /// Submit through the board. Validation failure short-circuits before
    /// any request; only a confirmed creation resets the form.
    pub async fn submit<S: CaseStore>(
        &mut self,
        board: &mut BoardController<S>,
        firm_id: &str,
    ) -> Result<(), StoreError> {
        let draft = self.validate(firm_id)?;
        board.create_case(draft).await?;
        *self = Self::default();
        Ok(())
    }
}
