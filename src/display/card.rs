//! Card display formatting
//!
//! Card lists render through `tabled`; details, review prompts and
//! transition messages are plain formatted strings.

use chrono::{DateTime, Utc};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::truncate;
use crate::models::{Card, LeitnerBox, Level};
use crate::scheduler::{next_review_at, remaining_days, Transition};

const QUESTION_WIDTH: usize = 48;

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Question")]
    question: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Fav")]
    favorite: &'static str,
}

/// When a card is next due, relative to `now`
pub fn format_due(card: &Card, level: &Level, now: DateTime<Utc>) -> String {
    if card.completed {
        return "completed".to_string();
    }
    match remaining_days(card, level, now) {
        0 => "now".to_string(),
        1 => "in 1 day".to_string(),
        n => format!("in {} days", n),
    }
}

/// Format a box's cards as a table
pub fn format_card_list(cards: &[Card], leitner_box: &LeitnerBox, now: DateTime<Utc>) -> String {
    if cards.is_empty() {
        return "No cards found.".to_string();
    }

    let rows: Vec<CardRow> = cards
        .iter()
        .map(|card| CardRow {
            id: card.id.to_string(),
            level: card.level.to_string(),
            question: truncate(&card.question, QUESTION_WIDTH),
            due: match leitner_box.level(card.level) {
                Ok(level) => format_due(card, level, now),
                Err(_) => "?".to_string(),
            },
            favorite: if card.favorite { "*" } else { "" },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format a single card's details
pub fn format_card_details(
    card: &Card,
    leitner_box: &LeitnerBox,
    now: DateTime<Utc>,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Card: {}\n", card.id));
    output.push_str(&format!("  Question: {}\n", card.question));
    if let Some(answer) = &card.answer {
        output.push_str(&format!("  Answer:   {}\n", answer));
    }
    output.push('\n');
    output.push_str(&format!("  Box:      {} ({})\n", leitner_box.name, leitner_box.id));
    output.push_str(&format!("  Level:    {}\n", card.level));
    output.push_str(&format!(
        "  Favorite: {}\n",
        if card.favorite { "Yes" } else { "No" }
    ));
    output.push_str(&format!("  Created:  {}\n", card.created_at.format(date_format)));

    match card.pass_time {
        Some(passed) => {
            output.push_str(&format!("  Passed:   {}\n", passed.format(date_format)));
        }
        None => output.push_str("  Passed:   never\n"),
    }

    if let Ok(level) = leitner_box.level(card.level) {
        output.push_str(&format!("  Due:      {}", format_due(card, level, now)));
        if let Some(at) = next_review_at(card, level) {
            output.push_str(&format!(" ({})", at.format(date_format)));
        }
        output.push('\n');
    }

    if !card.tags.is_empty() {
        output.push_str(&format!("  Tags:     {}\n", card.tags.join(", ")));
    }

    output
}

/// Question block shown before asking for an outcome
pub fn format_review_prompt(card: &Card, position: usize, total: usize) -> String {
    let mut output = format!("[{}/{}] {}\n", position, total, card.question);
    if card.favorite {
        output.push_str("  (favorite)\n");
    }
    output
}

/// One-line report of what a transition did to a card
pub fn format_transition(card: &Card, transition: &Transition) -> String {
    format!("{} {}", card.id, transition.summary())
}

/// End-of-session tally
pub fn format_review_summary(passed: usize, failed: usize, skipped: usize) -> String {
    let mut output = format!("Reviewed {} cards: {} passed, {} failed", passed + failed, passed, failed);
    if skipped > 0 {
        output.push_str(&format!(", {} left for later", skipped));
    }
    output.push('\n');
    output
}
