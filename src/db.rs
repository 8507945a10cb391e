//! SQLite persistence for the case record store.
//!
//! `DocketDb` owns the connection and exposes synchronous CRUD; `DbHandle`
//! wraps it behind `Arc<Mutex>` and runs all access on tokio's blocking
//! thread pool via `spawn_blocking`, preventing synchronous SQLite I/O from
//! tying up async worker threads.
//!
//! The four activity counters on a case are never stored; the list and get
//! queries derive them with correlated subqueries over the child tables, so
//! every fetch reflects the children at that instant.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, Row, params};
use uuid::Uuid;

use crate::models::{
    Case, CaseAlert, CaseCreate, CaseNote, CaseTask, NewAlert, NewNote, NewTask, TaskStatus,
};
use crate::stage::Stage;

/// Async-safe handle to the docket database.
#[derive(Clone)]
pub struct DbHandle {
    inner: Arc<std::sync::Mutex<DocketDb>>,
}

impl DbHandle {
    pub fn new(db: DocketDb) -> Self {
        Self {
            inner: Arc::new(std::sync::Mutex::new(db)),
        }
    }

    /// Run a closure with access to the database on a blocking thread.
    /// All data passed into `f` must be owned (`'static`).
    pub async fn call<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&DocketDb) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let db = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = db
                .lock()
                .map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
            f(&guard)
        })
        .await
        .context("DB task panicked")?
    }
}

pub struct DocketDb {
    conn: Connection,
}

const CASE_COLUMNS: &str = "id, law_firm_id, case_number, case_title, case_type, \
     court_jurisdiction, client_name, assigned_attorney, opposing_counsel, judge_name, \
     description, stage, priority, next_hearing_date, \
     (SELECT COUNT(*) FROM legal_documents d WHERE d.case_id = cases.id) AS documents_count, \
     (SELECT COUNT(*) FROM research_results r WHERE r.case_id = cases.id) AS research_count, \
     (SELECT COUNT(*) FROM case_alerts a WHERE a.case_id = cases.id AND a.active = 1) AS active_alerts_count, \
     (SELECT COUNT(*) FROM case_tasks t WHERE t.case_id = cases.id AND t.status = 'pending') AS pending_tasks_count, \
     created_at, updated_at";

impl DocketDb {
    /// Open (or create) a SQLite database at the given path and run migrations.
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open SQLite database")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Create an in-memory SQLite database (for testing).
    pub fn new_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("Failed to open in-memory SQLite database")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> Result<()> {
        self.conn
            .execute_batch("PRAGMA foreign_keys = ON;")
            .context("Failed to enable foreign keys")?;
        self.run_migrations().context("Failed to run migrations")?;
        Ok(())
    }

    fn run_migrations(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS cases (
                    id TEXT PRIMARY KEY,
                    law_firm_id TEXT NOT NULL,
                    case_number TEXT NOT NULL,
                    case_title TEXT NOT NULL,
                    case_type TEXT NOT NULL DEFAULT 'civil',
                    court_jurisdiction TEXT NOT NULL,
                    client_name TEXT NOT NULL,
                    assigned_attorney TEXT NOT NULL,
                    opposing_counsel TEXT,
                    judge_name TEXT,
                    description TEXT NOT NULL,
                    stage TEXT NOT NULL DEFAULT 'intake',
                    priority TEXT NOT NULL DEFAULT 'medium',
                    next_hearing_date TEXT,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    UNIQUE(law_firm_id, case_number)
                );

                CREATE TABLE IF NOT EXISTS case_notes (
                    id TEXT PRIMARY KEY,
                    case_id TEXT NOT NULL REFERENCES cases(id) ON DELETE CASCADE,
                    content TEXT NOT NULL,
                    author TEXT NOT NULL,
                    note_type TEXT NOT NULL DEFAULT 'general',
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS case_tasks (
                    id TEXT PRIMARY KEY,
                    case_id TEXT NOT NULL REFERENCES cases(id) ON DELETE CASCADE,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL DEFAULT '',
                    assigned_to TEXT NOT NULL,
                    due_date TEXT,
                    priority TEXT NOT NULL DEFAULT 'medium',
                    status TEXT NOT NULL DEFAULT 'pending',
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS case_alerts (
                    id TEXT PRIMARY KEY,
                    case_id TEXT NOT NULL REFERENCES cases(id) ON DELETE CASCADE,
                    alert_type TEXT NOT NULL,
                    message TEXT NOT NULL,
                    due_date TEXT,
                    priority TEXT NOT NULL DEFAULT 'medium',
                    active INTEGER NOT NULL DEFAULT 1,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS research_results (
                    id TEXT PRIMARY KEY,
                    case_id TEXT,
                    law_firm_id TEXT NOT NULL,
                    query TEXT NOT NULL,
                    result TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS legal_documents (
                    id TEXT PRIMARY KEY,
                    case_id TEXT,
                    law_firm_id TEXT NOT NULL,
                    title TEXT NOT NULL,
                    document_type TEXT NOT NULL DEFAULT 'general',
                    content TEXT NOT NULL DEFAULT '',
                    created_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_cases_firm ON cases(law_firm_id);
                CREATE INDEX IF NOT EXISTS idx_cases_firm_stage ON cases(law_firm_id, stage);
                CREATE INDEX IF NOT EXISTS idx_notes_case ON case_notes(case_id);
                CREATE INDEX IF NOT EXISTS idx_tasks_case ON case_tasks(case_id);
                CREATE INDEX IF NOT EXISTS idx_alerts_case ON case_alerts(case_id);
                CREATE INDEX IF NOT EXISTS idx_research_firm ON research_results(law_firm_id);
                CREATE INDEX IF NOT EXISTS idx_documents_firm ON legal_documents(law_firm_id);
                ",
            )
            .context("Failed to create tables")?;
        Ok(())
    }

    fn case_from_row(row: &Row<'_>) -> rusqlite::Result<Case> {
        Ok(Case {
            id: row.get(0)?,
            law_firm_id: row.get(1)?,
            case_number: row.get(2)?,
            case_title: row.get(3)?,
            case_type: parse_column(row, 4)?,
            court_jurisdiction: row.get(5)?,
            client_name: row.get(6)?,
            assigned_attorney: row.get(7)?,
            opposing_counsel: row.get(8)?,
            judge_name: row.get(9)?,
            description: row.get(10)?,
            stage: parse_column(row, 11)?,
            priority: parse_column(row, 12)?,
            next_hearing_date: row.get(13)?,
            documents_count: row.get(14)?,
            research_count: row.get(15)?,
            active_alerts_count: row.get(16)?,
            pending_tasks_count: row.get(17)?,
            created_at: row.get(18)?,
            updated_at: row.get(19)?,
        })
    }

    // ── Case CRUD ─────────────────────────────────────────────────────

    pub fn create_case(&self, draft: &CaseCreate) -> Result<Case> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        // Stage is never caller-supplied: every new case enters at intake.
        self.conn
            .execute(
                "INSERT INTO cases (id, law_firm_id, case_number, case_title, case_type, \
                 court_jurisdiction, client_name, assigned_attorney, opposing_counsel, \
                 judge_name, description, stage, priority, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 'intake', ?12, ?13, ?14)",
                params![
                    id,
                    draft.law_firm_id,
                    draft.case_number,
                    draft.case_title,
                    draft.case_type.as_str(),
                    draft.court_jurisdiction,
                    draft.client_name,
                    draft.assigned_attorney,
                    draft.opposing_counsel,
                    draft.judge_name,
                    draft.description,
                    draft.priority.as_str(),
                    now,
                    now,
                ],
            )
            .context("Failed to insert case")?;
        self.get_case(&id)?.context("Case not found after insert")
    }

    pub fn list_cases(&self, firm_id: &str) -> Result<Vec<Case>> {
        let sql = format!(
            "SELECT {} FROM cases WHERE law_firm_id = ?1 ORDER BY created_at, rowid",
            CASE_COLUMNS
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .context("Failed to prepare list_cases")?;
        let rows = stmt
            .query_map(params![firm_id], Self::case_from_row)
            .context("Failed to query cases")?;
        let mut cases = Vec::new();
        for row in rows {
            cases.push(row.context("Failed to read case row")?);
        }
        Ok(cases)
    }

    pub fn get_case(&self, id: &str) -> Result<Option<Case>> {
        let sql = format!("SELECT {} FROM cases WHERE id = ?1", CASE_COLUMNS);
        let mut stmt = self
            .conn
            .prepare(&sql)
            .context("Failed to prepare get_case")?;
        let mut rows = stmt
            .query_map(params![id], Self::case_from_row)
            .context("Failed to query case")?;
        match rows.next() {
            Some(row) => Ok(Some(row.context("Failed to read case row")?)),
            None => Ok(None),
        }
    }

    /// Move a case to `stage`. Idempotent: setting the current stage again
    /// succeeds without effect. Returns `None` for an unknown id.
    pub fn set_stage(&self, id: &str, stage: Stage) -> Result<Option<Case>> {
        let changed = self
            .conn
            .execute(
                "UPDATE cases SET stage = ?1, updated_at = ?2 WHERE id = ?3",
                params![stage.as_str(), Utc::now(), id],
            )
            .context("Failed to update case stage")?;
        if changed == 0 {
            return Ok(None);
        }
        self.get_case(id)
    }

    // ── Child appends ─────────────────────────────────────────────────

    fn case_exists(&self, case_id: &str) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM cases WHERE id = ?1",
                params![case_id],
                |row| row.get(0),
            )
            .context("Failed to check case existence")?;
        Ok(count > 0)
    }

    /// Returns `None` when the case does not exist.
    pub fn add_note(&self, case_id: &str, note: &NewNote) -> Result<Option<CaseNote>> {
        if !self.case_exists(case_id)? {
            return Ok(None);
        }
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        self.conn
            .execute(
                "INSERT INTO case_notes (id, case_id, content, author, note_type, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, case_id, note.content, note.author, note.note_type, now],
            )
            .context("Failed to insert note")?;
        Ok(Some(CaseNote {
            id,
            case_id: case_id.to_string(),
            content: note.content.clone(),
            author: note.author.clone(),
            note_type: note.note_type.clone(),
            created_at: now,
        }))
    }

    pub fn add_task(&self, case_id: &str, task: &NewTask) -> Result<Option<CaseTask>> {
        if !self.case_exists(case_id)? {
            return Ok(None);
        }
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        self.conn
            .execute(
                "INSERT INTO case_tasks (id, case_id, title, description, assigned_to, \
                 due_date, priority, status, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'pending', ?8)",
                params![
                    id,
                    case_id,
                    task.title,
                    task.description,
                    task.assigned_to,
                    task.due_date,
                    task.priority.as_str(),
                    now,
                ],
            )
            .context("Failed to insert task")?;
        Ok(Some(CaseTask {
            id,
            case_id: case_id.to_string(),
            title: task.title.clone(),
            description: task.description.clone(),
            assigned_to: task.assigned_to.clone(),
            due_date: task.due_date,
            priority: task.priority,
            status: TaskStatus::Pending,
            created_at: now,
        }))
    }

    pub fn add_alert(&self, case_id: &str, alert: &NewAlert) -> Result<Option<CaseAlert>> {
        if !self.case_exists(case_id)? {
            return Ok(None);
        }
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        self.conn
            .execute(
                "INSERT INTO case_alerts (id, case_id, alert_type, message, due_date, \
                 priority, active, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7)",
                params![
                    id,
                    case_id,
                    alert.alert_type,
                    alert.message,
                    alert.due_date,
                    alert.priority.as_str(),
                    now,
                ],
            )
            .context("Failed to insert alert")?;
        Ok(Some(CaseAlert {
            id,
            case_id: case_id.to_string(),
            alert_type: alert.alert_type.clone(),
            message: alert.message.clone(),
            due_date: alert.due_date,
            priority: alert.priority,
            active: true,
            created_at: now,
        }))
    }

    // ── Research & documents ──────────────────────────────────────────

    pub fn record_research(&self, firm_id: &str, case_id: Option<&str>, query: &str, result: &str) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.conn
            .execute(
                "INSERT INTO research_results (id, case_id, law_firm_id, query, result, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, case_id, firm_id, query, result, Utc::now()],
            )
            .context("Failed to insert research result")?;
        Ok(id)
    }

    pub fn list_research(&self, firm_id: &str) -> Result<Vec<crate::research::ResearchResult>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, case_id, law_firm_id, query, result, created_at \
                 FROM research_results WHERE law_firm_id = ?1 ORDER BY created_at DESC",
            )
            .context("Failed to prepare list_research")?;
        let rows = stmt
            .query_map(params![firm_id], |row| {
                Ok(crate::research::ResearchResult {
                    id: row.get(0)?,
                    case_id: row.get(1)?,
                    law_firm_id: row.get(2)?,
                    query: row.get(3)?,
                    result: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })
            .context("Failed to query research results")?;
        let mut results = Vec::new();
        for row in rows {
            results.push(row.context("Failed to read research row")?);
        }
        Ok(results)
    }

    pub fn list_documents(&self, firm_id: &str) -> Result<Vec<crate::documents::LegalDocument>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, case_id, law_firm_id, title, document_type, content, created_at \
                 FROM legal_documents WHERE law_firm_id = ?1 ORDER BY created_at DESC",
            )
            .context("Failed to prepare list_documents")?;
        let rows = stmt
            .query_map(params![firm_id], |row| {
                Ok(crate::documents::LegalDocument {
                    id: row.get(0)?,
                    case_id: row.get(1)?,
                    law_firm_id: row.get(2)?,
                    title: row.get(3)?,
                    document_type: row.get(4)?,
                    content: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })
            .context("Failed to query documents")?;
        let mut docs = Vec::new();
        for row in rows {
            docs.push(row.context("Failed to read document row")?);
        }
        Ok(docs)
    }

    pub fn add_document(
        &self,
        firm_id: &str,
        case_id: Option<&str>,
        title: &str,
        document_type: &str,
        content: &str,
    ) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.conn
            .execute(
                "INSERT INTO legal_documents (id, case_id, law_firm_id, title, document_type, content, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![id, case_id, firm_id, title, document_type, content, Utc::now()],
            )
            .context("Failed to insert document")?;
        Ok(id)
    }
}

/// Parse a TEXT column through `FromStr`, surfacing bad stored values as
/// conversion failures instead of panics.
fn parse_column<T: std::str::FromStr<Err = String>>(
    row: &Row<'_>,
    idx: usize,
) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, e.into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CaseType, Priority};

    fn draft(number: &str) -> CaseCreate {
        CaseCreate {
            law_firm_id: "firm-1".into(),
            case_number: number.into(),
            case_title: "Mehta vs State".into(),
            case_type: CaseType::Civil,
            court_jurisdiction: "Delhi High Court".into(),
            client_name: "R. Mehta".into(),
            assigned_attorney: "A. Rao".into(),
            opposing_counsel: None,
            judge_name: None,
            description: "Land acquisition dispute".into(),
            priority: Priority::Medium,
        }
    }

    #[test]
    fn create_forces_intake_and_assigns_uuid() {
        let db = DocketDb::new_in_memory().unwrap();
        let case = db.create_case(&draft("CV2025-001")).unwrap();
        assert_eq!(case.stage, Stage::Intake);
        assert!(Uuid::parse_str(&case.id).is_ok());
        assert_eq!(case.documents_count, 0);
    }

    #[test]
    fn list_preserves_insertion_order() {
        let db = DocketDb::new_in_memory().unwrap();
        db.create_case(&draft("CV2025-001")).unwrap();
        db.create_case(&draft("CV2025-002")).unwrap();
        db.create_case(&draft("CV2025-003")).unwrap();
        let numbers: Vec<String> = db
            .list_cases("firm-1")
            .unwrap()
            .into_iter()
            .map(|c| c.case_number)
            .collect();
        assert_eq!(numbers, ["CV2025-001", "CV2025-002", "CV2025-003"]);
    }

    #[test]
    fn set_stage_unknown_id_is_none() {
        let db = DocketDb::new_in_memory().unwrap();
        assert!(db.set_stage("no-such-id", Stage::Hearing).unwrap().is_none());
    }

    #[test]
    fn set_stage_same_stage_is_idempotent() {
        let db = DocketDb::new_in_memory().unwrap();
        let case = db.create_case(&draft("CV2025-001")).unwrap();
        let after = db.set_stage(&case.id, Stage::Intake).unwrap().unwrap();
        assert_eq!(after.stage, Stage::Intake);
    }

    #[test]
    fn counters_are_derived_from_children() {
        let db = DocketDb::new_in_memory().unwrap();
        let case = db.create_case(&draft("CV2025-001")).unwrap();

        db.add_task(
            &case.id,
            &NewTask {
                title: "File reply".into(),
                description: String::new(),
                assigned_to: "user-1".into(),
                due_date: None,
                priority: Priority::High,
            },
        )
        .unwrap()
        .unwrap();
        db.add_alert(&case.id, &NewAlert::reminder("hearing tomorrow"))
            .unwrap()
            .unwrap();
        db.add_document(&case.law_firm_id, Some(&case.id), "Writ petition", "petition", "")
            .unwrap();

        let fetched = db.get_case(&case.id).unwrap().unwrap();
        assert_eq!(fetched.pending_tasks_count, 1);
        assert_eq!(fetched.active_alerts_count, 1);
        assert_eq!(fetched.documents_count, 1);
        assert_eq!(fetched.research_count, 0);
    }

    #[test]
    fn appends_to_unknown_case_are_none() {
        let db = DocketDb::new_in_memory().unwrap();
        let none = db
            .add_note(
                "no-such-id",
                &NewNote {
                    content: "x".into(),
                    author: "user-1".into(),
                    note_type: "general".into(),
                },
            )
            .unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn duplicate_case_number_within_firm_is_rejected() {
        let db = DocketDb::new_in_memory().unwrap();
        db.create_case(&draft("CV2025-001")).unwrap();
        assert!(db.create_case(&draft("CV2025-001")).is_err());
    }
}
