//! Display formatting for terminal output
//!
//! Formats boxes, cards and review progress as plain strings so handlers
//! can print them and tests can inspect them.

pub mod card;
pub mod leitner_box;

pub use card::{
    format_card_details, format_card_list, format_due, format_review_prompt,
    format_review_summary, format_transition,
};
pub use leitner_box::{format_box_details, format_box_list};

/// Shorten text to `max` characters, marking the cut with "..."
pub(crate) fn truncate(text: &str, max: usize) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= max {
        return single_line;
    }
    let kept: String = single_line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
