//! Client for the document backend.
//!
//! Read-only: the console lists a firm's documents; drafting and storage
//! belong to the backend.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalDocument {
    pub id: String,
    pub case_id: Option<String>,
    pub law_firm_id: String,
    pub title: String,
    pub document_type: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Fetch the firm's documents, newest first.
pub async fn list_documents(
    base_url: &str,
    firm_id: &str,
) -> anyhow::Result<Vec<LegalDocument>> {
    let client = reqwest::Client::new();
    let resp = client
        .get(format!(
            "{}/api/documents/{}",
            base_url.trim_end_matches('/'),
            firm_id
        ))
        .send()
        .await
        .context("Failed to reach document backend")?;
    if !resp.status().is_success() {
        anyhow::bail!("Document backend returned {}", resp.status());
    }
    resp.json::<Vec<LegalDocument>>()
        .await
        .context("Failed to parse document list")
}
