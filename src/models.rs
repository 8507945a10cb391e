//! Shared domain types: the `Case` entity, its closed classification enums,
//! and the append-only child payloads (notes, tasks, alerts).
//!
//! Ids are UUIDv4 strings assigned by the record store; timestamps are UTC
//! and serialize as RFC 3339. The four activity counters on `Case` are
//! denormalized by the server (counts over child rows) and are read-only
//! everywhere else — the engine displays them, never recomputes them.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stage::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    #[default]
    Civil,
    Criminal,
    Family,
    Corporate,
    Constitutional,
    Labor,
}

impl CaseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Civil => "civil",
            Self::Criminal => "criminal",
            Self::Family => "family",
            Self::Corporate => "corporate",
            Self::Constitutional => "constitutional",
            Self::Labor => "labor",
        }
    }
}

impl std::fmt::Display for CaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "civil" => Ok(Self::Civil),
            "criminal" => Ok(Self::Criminal),
            "family" => Ok(Self::Family),
            "corporate" => Ok(Self::Corporate),
            "constitutional" => Ok(Self::Constitutional),
            "labor" => Ok(Self::Labor),
            _ => Err(format!("Invalid case type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(format!("Invalid priority: {}", s)),
        }
    }
}

/// A legal case as the record store returns it. `stage` changes only through
/// an explicit transition operation; `case_number` is immutable after create
/// and unique within a firm (enforced by the store, not re-validated here).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub law_firm_id: String,
    pub case_number: String,
    pub case_title: String,
    pub case_type: CaseType,
    pub court_jurisdiction: String,
    pub client_name: String,
    pub assigned_attorney: String,
    pub opposing_counsel: Option<String>,
    pub judge_name: Option<String>,
    pub description: String,
    pub stage: Stage,
    pub priority: Priority,
    pub next_hearing_date: Option<DateTime<Utc>>,
    /// Derived counters, maintained server-side as sums over child entities.
    pub documents_count: u32,
    pub research_count: u32,
    pub active_alerts_count: u32,
    pub pending_tasks_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a case. No id, no counters, no stage — the store
/// assigns the id and every new case enters the workflow at `intake`.
/// Type and priority default to `civil` / `medium` when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseCreate {
    pub law_firm_id: String,
    pub case_number: String,
    pub case_title: String,
    #[serde(default)]
    pub case_type: CaseType,
    pub court_jurisdiction: String,
    pub client_name: String,
    pub assigned_attorney: String,
    #[serde(default)]
    pub opposing_counsel: Option<String>,
    #[serde(default)]
    pub judge_name: Option<String>,
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
}

/// Append-only note payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNote {
    pub content: String,
    pub author: String,
    #[serde(default = "default_note_type")]
    pub note_type: String,
}

fn default_note_type() -> String {
    "general".to_string()
}

/// Append-only task payload. Pending tasks feed `pending_tasks_count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assigned_to: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
}

/// Append-only alert/reminder payload. Active alerts feed
/// `active_alerts_count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlert {
    pub alert_type: String,
    pub message: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
}

impl NewAlert {
    /// A reminder due in 24 hours — the quick-action default.
    pub fn reminder(message: impl Into<String>) -> Self {
        Self {
            alert_type: "reminder".to_string(),
            message: message.into(),
            due_date: Some(Utc::now() + chrono::Duration::hours(24)),
            priority: Priority::Medium,
        }
    }
}

// Server-side child entities. The engine never reads these back directly —
// it observes them only through the refetched counters.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseNote {
    pub id: String,
    pub case_id: String,
    pub content: String,
    pub author: String,
    pub note_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Invalid task status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseTask {
    pub id: String,
    pub case_id: String,
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseAlert {
    pub id: String,
    pub case_id: String,
    pub alert_type: String,
    pub message: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
