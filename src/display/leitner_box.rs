//! Box display formatting
//!
//! Formats boxes for terminal output in list and detail views.

use crate::models::LeitnerBox;
use crate::services::LevelSummary;

/// Format boxes with their per-level counts as a table
pub fn format_box_list(boxes: &[(LeitnerBox, Vec<LevelSummary>)]) -> String {
    if boxes.is_empty() {
        return "No boxes found.".to_string();
    }

    let name_width = boxes
        .iter()
        .map(|(b, _)| b.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<6}  {:<name_width$}  {:>6}  {:>6}  {:>9}  {}\n",
        "ID",
        "Name",
        "Cards",
        "Due",
        "Completed",
        "On Fail",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<6}  {:-<name_width$}  {:->6}  {:->6}  {:->9}  {:-<8}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for (leitner_box, summaries) in boxes {
        let total: usize = summaries.iter().map(|s| s.total).sum();
        let due: usize = summaries.iter().map(|s| s.reviewable).sum();
        let completed: usize = summaries.iter().map(|s| s.completed).sum();

        output.push_str(&format!(
            "{:<6}  {:<name_width$}  {:>6}  {:>6}  {:>9}  {}\n",
            leitner_box.id.to_string(),
            leitner_box.name,
            total,
            due,
            completed,
            fail_policy(leitner_box),
            name_width = name_width,
        ));
    }

    output
}

/// Format a box with its level table
pub fn format_box_details(leitner_box: &LeitnerBox, summaries: &[LevelSummary]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Box: {}\n", leitner_box.name));
    output.push_str(&format!("  ID:       {}\n", leitner_box.id));
    output.push_str(&format!("  On fail:  {}\n", fail_policy(leitner_box)));
    output.push_str(&format!(
        "  Created:  {}\n",
        leitner_box.created_at.format("%Y-%m-%d")
    ));
    output.push('\n');

    output.push_str(&format!(
        "  {:>5}  {:>8}  {:>6}  {:>6}  {:>9}\n",
        "Level", "Interval", "Cards", "Due", "Completed"
    ));
    output.push_str(&format!(
        "  {:->5}  {:->8}  {:->6}  {:->6}  {:->9}\n",
        "", "", "", "", ""
    ));

    for summary in summaries {
        output.push_str(&format!(
            "  {:>5}  {:>7}d  {:>6}  {:>6}  {:>9}\n",
            summary.level.to_string(),
            summary.days_to_recommend,
            summary.total,
            summary.reviewable,
            summary.completed,
        ));
    }

    let total: usize = summaries.iter().map(|s| s.total).sum();
    let due: usize = summaries.iter().map(|s| s.reviewable).sum();
    output.push('\n');
    output.push_str(&format!("  {} cards, {} due for review\n", total, due));

    output
}

fn fail_policy(leitner_box: &LeitnerBox) -> &'static str {
    if leitner_box.back_to_top_level {
        "level 1"
    } else {
        "stay"
    }
}
