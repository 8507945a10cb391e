//! Record store server command — `docket serve`.

use anyhow::Result;

use docket::config::Settings;
use docket::server::{ServerConfig, start_server};

pub async fn cmd_serve(settings: &Settings, port: u16, dev: bool) -> Result<()> {
    start_server(ServerConfig {
        port,
        db_path: settings.db_path.clone(),
        dev_mode: dev,
    })
    .await
}
