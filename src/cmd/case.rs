//! Case commands — `docket case create|move|note|task|remind`.
//!
//! `move` drives the same drag machinery the interactive board uses, so a
//! same-column move is short-circuited client-side exactly like a drop.

use std::sync::Arc;

use anyhow::{Context, Result};

use docket::board::{BoardController, DropOutcome};
use docket::config::Settings;
use docket::form::CaseForm;
use docket::models::{CaseType, NewAlert, NewNote, NewTask, Priority};
use docket::stage::Stage;
use docket::store::HttpCaseStore;
use docket::ui::icons;

async fn connect(settings: &Settings) -> Result<BoardController<HttpCaseStore>> {
    let store = Arc::new(HttpCaseStore::new(&settings.api_url));
    let mut board = BoardController::new(store, &settings.firm_id);
    board
        .refresh()
        .await
        .with_context(|| format!("Failed to fetch cases from {}", settings.api_url))?;
    Ok(board)
}

/// Resolve a user-supplied case reference (id or case number) against the
/// fetched collection.
fn resolve_case_id(board: &BoardController<HttpCaseStore>, case_ref: &str) -> Result<String> {
    board
        .cases()
        .iter()
        .find(|c| c.id == case_ref || c.case_number == case_ref)
        .map(|c| c.id.clone())
        .with_context(|| format!("No case matching '{}'", case_ref))
}

#[allow(clippy::too_many_arguments)]
pub async fn cmd_case_create(
    settings: &Settings,
    number: String,
    title: String,
    client: String,
    attorney: String,
    court: String,
    description: String,
    case_type: CaseType,
    priority: Priority,
    opposing_counsel: Option<String>,
    judge: Option<String>,
) -> Result<()> {
    let mut board = connect(settings).await?;
    let mut form = CaseForm {
        case_number: number,
        case_title: title,
        case_type,
        court_jurisdiction: court,
        client_name: client,
        assigned_attorney: attorney,
        opposing_counsel: opposing_counsel.unwrap_or_default(),
        judge_name: judge.unwrap_or_default(),
        description,
        priority,
    };
    let case_number = form.case_number.clone();
    form.submit(&mut board, &settings.firm_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    println!("{}Case {} created in intake", icons::CHECK, case_number);
    Ok(())
}

pub async fn cmd_case_move(settings: &Settings, case_ref: String, target: Stage) -> Result<()> {
    let mut board = connect(settings).await?;
    let case_id = resolve_case_id(&board, &case_ref)?;

    board.begin_drag(case_id);
    board.drag_over(target);
    match board.apply_drop().await {
        DropOutcome::Transitioned { stage, .. } => {
            println!("{}Case {} moved to {}", icons::CHECK, case_ref, stage.label());
            Ok(())
        }
        DropOutcome::NoOp => {
            println!("Case {} is already in {}", case_ref, target.label());
            Ok(())
        }
        DropOutcome::Failed(e) => Err(anyhow::anyhow!("Move failed: {}", e)),
        DropOutcome::Ignored => Err(anyhow::anyhow!("Move was not applied")),
    }
}

pub async fn cmd_case_note(settings: &Settings, case_ref: String, content: String) -> Result<()> {
    let mut board = connect(settings).await?;
    let case_id = resolve_case_id(&board, &case_ref)?;
    board
        .add_note(
            &case_id,
            NewNote {
                content,
                author: settings.user_id.clone(),
                note_type: "general".to_string(),
            },
        )
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    println!("{}Note added to case {}", icons::NOTE, case_ref);
    Ok(())
}

pub async fn cmd_case_task(
    settings: &Settings,
    case_ref: String,
    title: String,
    description: Option<String>,
    priority: Priority,
) -> Result<()> {
    let mut board = connect(settings).await?;
    let case_id = resolve_case_id(&board, &case_ref)?;
    board
        .add_task(
            &case_id,
            NewTask {
                title,
                description: description.unwrap_or_default(),
                assigned_to: settings.user_id.clone(),
                due_date: None,
                priority,
            },
        )
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let pending = board
        .find_case(&case_id)
        .map(|c| c.pending_tasks_count)
        .unwrap_or_default();
    println!(
        "{}Task added to case {} ({} pending)",
        icons::CHECK,
        case_ref,
        pending
    );
    Ok(())
}

pub async fn cmd_case_remind(
    settings: &Settings,
    case_ref: String,
    message: String,
) -> Result<()> {
    let mut board = connect(settings).await?;
    let case_id = resolve_case_id(&board, &case_ref)?;
    board
        .add_alert(&case_id, NewAlert::reminder(message))
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    println!("{}Reminder set on case {} (due in 24h)", icons::BELL, case_ref);
    Ok(())
}
