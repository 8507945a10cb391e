//! Client for the legal research backend.
//!
//! Free-function reqwest calls against the record store's research endpoints.
//! The console only submits queries and renders history; answer generation
//! happens (or not) entirely on the backend.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored research entry, newest first in history listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchResult {
    pub id: String,
    pub case_id: Option<String>,
    pub law_firm_id: String,
    pub query: String,
    pub result: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub law_firm_id: String,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
}

/// Submit a research query and return the stored entry.
pub async fn run_research(
    base_url: &str,
    request: &ResearchRequest,
) -> anyhow::Result<ResearchResult> {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{}/api/legal-research", base_url.trim_end_matches('/')))
        .json(request)
        .send()
        .await
        .context("Failed to reach research backend")?;
    if !resp.status().is_success() {
        anyhow::bail!("Research backend returned {}", resp.status());
    }
    resp.json::<ResearchResult>()
        .await
        .context("Failed to parse research response")
}

/// Fetch the firm's research history, newest first.
pub async fn research_history(
    base_url: &str,
    firm_id: &str,
) -> anyhow::Result<Vec<ResearchResult>> {
    let client = reqwest::Client::new();
    let resp = client
        .get(format!(
            "{}/api/research-history/{}",
            base_url.trim_end_matches('/'),
            firm_id
        ))
        .send()
        .await
        .context("Failed to reach research backend")?;
    if !resp.status().is_success() {
        anyhow::bail!("Research backend returned {}", resp.status());
    }
    resp.json::<Vec<ResearchResult>>()
        .await
        .context("Failed to parse research history")
}
