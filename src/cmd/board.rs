//! Board rendering command — `docket board`.

use std::sync::Arc;

use anyhow::{Context, Result};

use docket::board::BoardController;
use docket::config::Settings;
use docket::store::HttpCaseStore;
use docket::ui::render_board;

pub async fn cmd_board(settings: &Settings) -> Result<()> {
    let store = Arc::new(HttpCaseStore::new(&settings.api_url));
    let mut board = BoardController::new(store, &settings.firm_id);
    board
        .refresh()
        .await
        .with_context(|| format!("Failed to fetch cases from {}", settings.api_url))?;
    print!("{}", render_board(board.cases()));
    Ok(())
}
