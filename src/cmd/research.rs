//! Research commands — `docket research`.

use anyhow::Result;
use console::style;

use docket::config::Settings;
use docket::research::{self, ResearchRequest};
use docket::ui::icons;

pub async fn cmd_research(
    settings: &Settings,
    query: Option<String>,
    case_id: Option<String>,
    history: bool,
) -> Result<()> {
    if history {
        let entries = research::research_history(&settings.api_url, &settings.firm_id).await?;
        if entries.is_empty() {
            println!("No research history for firm {}", settings.firm_id);
            return Ok(());
        }
        for entry in entries {
            println!(
                "{}{}  {}",
                icons::SEARCH,
                style(entry.created_at.format("%Y-%m-%d %H:%M")).dim(),
                style(&entry.query).bold()
            );
            println!("    {}", entry.result);
        }
        return Ok(());
    }

    let Some(query) = query else {
        anyhow::bail!("Provide a query, or --history to list past research");
    };
    let result = research::run_research(
        &settings.api_url,
        &ResearchRequest {
            law_firm_id: settings.firm_id.clone(),
            query,
            case_id,
        },
    )
    .await?;
    println!("{}{}", icons::SEARCH, style(&result.query).bold());
    println!("{}", result.result);
    Ok(())
}
