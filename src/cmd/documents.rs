//! Document listing command — `docket documents`.

use anyhow::Result;
use console::style;

use docket::config::Settings;
use docket::documents;
use docket::ui::icons;

pub async fn cmd_documents(settings: &Settings) -> Result<()> {
    let docs = documents::list_documents(&settings.api_url, &settings.firm_id).await?;
    if docs.is_empty() {
        println!("No documents for firm {}", settings.firm_id);
        return Ok(());
    }
    for doc in docs {
        println!(
            "{}{}  [{}]  {}",
            icons::DOCS,
            style(&doc.title).bold(),
            doc.document_type,
            style(doc.created_at.format("%Y-%m-%d")).dim()
        );
        if let Some(case_id) = &doc.case_id {
            println!("    case: {}", case_id);
        }
    }
    Ok(())
}
