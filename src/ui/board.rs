//! Terminal rendering of the five-column board.
//!
//! Columns render top to bottom in stage order, each with its header,
//! subtitle, and count, then one block per card. Cards carry the activity
//! badges only when the counter is nonzero. Rendering is a pure function of
//! the case slice so it can be asserted on directly.

use console::{Style, style};

use crate::models::{Case, CaseType, Priority};
use crate::stage::Stage;

/// Style for a case type tag. Exhaustive: a new case type must pick a
/// color here before the crate compiles.
fn type_style(case_type: CaseType) -> Style {
    match case_type {
        CaseType::Civil => Style::new().blue(),
        CaseType::Criminal => Style::new().red(),
        CaseType::Family => Style::new().magenta(),
        CaseType::Corporate => Style::new().cyan(),
        CaseType::Constitutional => Style::new().yellow(),
        CaseType::Labor => Style::new().green(),
    }
}

/// Style for a priority tag. Exhaustive for the same reason.
fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::Low => Style::new().dim(),
        Priority::Medium => Style::new().yellow(),
        Priority::High => Style::new().red(),
        Priority::Urgent => Style::new().red().bold(),
    }
}

fn badges(case: &Case) -> String {
    let mut parts = Vec::new();
    if case.documents_count > 0 {
        parts.push(format!("docs:{}", case.documents_count));
    }
    if case.research_count > 0 {
        parts.push(format!("research:{}", case.research_count));
    }
    if case.active_alerts_count > 0 {
        parts.push(format!("alerts:{}", case.active_alerts_count));
    }
    if case.pending_tasks_count > 0 {
        parts.push(format!("tasks:{}", case.pending_tasks_count));
    }
    parts.join("  ")
}

fn render_card(case: &Case, out: &mut String) {
    out.push_str(&format!(
        "  {}  {}  [{}] [{}]\n",
        style(&case.case_number).bold(),
        case.case_title,
        type_style(case.case_type).apply_to(case.case_type),
        priority_style(case.priority).apply_to(case.priority),
    ));
    out.push_str(&format!(
        "      {} · {}\n",
        case.client_name, case.court_jurisdiction
    ));
    if let Some(hearing) = case.next_hearing_date {
        out.push_str(&format!(
            "      next hearing: {}\n",
            hearing.format("%Y-%m-%d %H:%M")
        ));
    }
    let badges = badges(case);
    if !badges.is_empty() {
        out.push_str(&format!("      {}\n", style(badges).dim()));
    }
}

/// Render the whole board as a string, one column per stage in board order.
pub fn render_board(cases: &[Case]) -> String {
    let mut out = String::new();
    for stage in Stage::ALL {
        let column: Vec<&Case> = cases.iter().filter(|c| c.stage == stage).collect();
        let header = Style::new().fg(stage.accent()).bold();
        out.push_str(&format!(
            "{} ({})\n",
            header.apply_to(stage.label()),
            column.len()
        ));
        out.push_str(&format!("{}\n", style(stage.subtitle()).dim()));
        if column.is_empty() {
            out.push_str(&format!("  {}\n", style("no cases").dim()));
        } else {
            for case in column {
                render_card(case, &mut out);
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::make_case;
    use console::strip_ansi_codes;

    #[test]
    fn every_column_renders_with_subtitle() {
        let plain = strip_ansi_codes(&render_board(&[])).to_string();
        for stage in Stage::ALL {
            assert!(plain.contains(stage.label()));
            assert!(plain.contains(stage.subtitle()));
        }
        assert!(plain.contains("no cases"));
    }

    #[test]
    fn cards_land_under_their_stage_and_show_badges() {
        let mut case = make_case("a", Stage::Hearing);
        case.pending_tasks_count = 2;
        case.documents_count = 1;
        let plain = strip_ansi_codes(&render_board(&[case.clone()])).to_string();

        let hearing_at = plain.find("Hearing (1)").unwrap();
        let card_at = plain.find(&case.case_number).unwrap();
        assert!(card_at > hearing_at);
        assert!(plain.contains("tasks:2"));
        assert!(plain.contains("docs:1"));
        // Zero counters stay silent.
        assert!(!plain.contains("alerts:"));
    }

    #[test]
    fn column_counts_match_partition_sizes() {
        let cases = vec![
            make_case("a", Stage::Intake),
            make_case("b", Stage::Intake),
            make_case("c", Stage::Closed),
        ];
        let plain = strip_ansi_codes(&render_board(&cases)).to_string();
        assert!(plain.contains("Intake (2)"));
        assert!(plain.contains("Closed (1)"));
        assert!(plain.contains("Ongoing (0)"));
    }
}
