//! Card CLI commands
//!
//! Implements CLI commands for adding, browsing and editing cards, plus the
//! manual schedule overrides (reset, complete, move).

use clap::Subcommand;

use super::{parse_level, resolve_box};
use crate::config::settings::Settings;
use crate::display::card::{format_card_details, format_card_list, format_transition};
use crate::error::{LeitnerError, LeitnerResult};
use crate::models::Card;
use crate::scheduler::{is_reviewable, Clock, SystemClock};
use crate::services::{BoxService, CardService};
use crate::storage::Storage;

/// Card subcommands
#[derive(Subcommand)]
pub enum CardCommands {
    /// Add a card to a box
    Add {
        /// Box name or ID
        #[arg(value_name = "BOX")]
        leitner_box: String,
        /// Question text
        question: String,
        /// Answer text
        #[arg(short, long)]
        answer: Option<String>,
        /// Start at this level instead of level 1
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=13))]
        level: Option<u8>,
    },
    /// List the cards of a box
    List {
        /// Box name or ID
        #[arg(value_name = "BOX")]
        leitner_box: String,
        /// Only show one level
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=13))]
        level: Option<u8>,
        /// Only show cards due for review
        #[arg(short, long)]
        due: bool,
    },
    /// Show card details
    Show {
        /// Card ID (full or short form)
        card: String,
    },
    /// Edit a card's text
    Edit {
        /// Card ID (full or short form)
        card: String,
        /// New question
        #[arg(short, long)]
        question: Option<String>,
        /// New answer
        #[arg(short, long, conflicts_with = "clear_answer")]
        answer: Option<String>,
        /// Remove the answer
        #[arg(long)]
        clear_answer: bool,
    },
    /// Delete a card
    Delete {
        /// Card ID (full or short form)
        card: String,
    },
    /// Mark or unmark a card as favorite
    Favorite {
        /// Card ID (full or short form)
        card: String,
    },
    /// List favorite cards of a box
    Favorites {
        /// Box name or ID
        #[arg(value_name = "BOX")]
        leitner_box: String,
    },
    /// Send a card back to level 1 as new
    Reset {
        /// Card ID (full or short form)
        card: String,
    },
    /// Mark a card as completed
    Complete {
        /// Card ID (full or short form)
        card: String,
    },
    /// Move a card to another box
    Move {
        /// Card ID (full or short form)
        card: String,
        /// Target box name or ID
        #[arg(value_name = "BOX")]
        target: String,
    },
}

fn resolve_card(service: &CardService, identifier: &str) -> LeitnerResult<Card> {
    service
        .find_card(identifier)?
        .ok_or_else(|| LeitnerError::card_not_found(identifier))
}

/// Handle a card command
pub fn handle_card_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CardCommands,
) -> LeitnerResult<()> {
    let service = CardService::new(storage);
    let clock = SystemClock;

    match cmd {
        CardCommands::Add {
            leitner_box,
            question,
            answer,
            level,
        } => {
            let found = resolve_box(storage, &leitner_box)?;
            let level = level.map(parse_level).transpose()?;
            let card = service.add_card(found.id, &question, answer.as_deref(), level)?;

            println!("Added card to {}: {}", found.name, card.question);
            println!("  Level: {}", card.level);
            println!("  ID: {}", card.id);
        }

        CardCommands::List {
            leitner_box,
            level,
            due,
        } => {
            let found = resolve_box(storage, &leitner_box)?;
            let level = level.map(parse_level).transpose()?;
            let now = clock.now();

            let mut cards = service.list_cards(found.id, level)?;
            if due {
                cards.retain(|card| match found.level(card.level) {
                    Ok(l) => is_reviewable(card, l, now),
                    Err(_) => false,
                });
            }
            println!("{}", format_card_list(&cards, &found, now).trim_end());
        }

        CardCommands::Show { card } => {
            let found = resolve_card(&service, &card)?;
            let leitner_box = BoxService::new(storage).require_box(found.box_id)?;
            print!(
                "{}",
                format_card_details(&found, &leitner_box, clock.now(), &settings.date_format)
            );
        }

        CardCommands::Edit {
            card,
            question,
            answer,
            clear_answer,
        } => {
            let found = resolve_card(&service, &card)?;

            if question.is_none() && answer.is_none() && !clear_answer {
                println!("No changes specified. Use --question, --answer or --clear-answer.");
                return Ok(());
            }

            let updated =
                service.edit_card(found.id, question.as_deref(), answer.as_deref(), clear_answer)?;
            println!("Updated card: {}", updated.question);
        }

        CardCommands::Delete { card } => {
            let found = resolve_card(&service, &card)?;
            service.delete_card(found.id)?;
            println!("Deleted card: {}", found.question);
        }

        CardCommands::Favorite { card } => {
            let found = resolve_card(&service, &card)?;
            let updated = service.toggle_favorite(found.id, clock.now())?;
            if updated.favorite {
                println!("Marked as favorite: {}", updated.question);
            } else {
                println!("Removed from favorites: {}", updated.question);
            }
        }

        CardCommands::Favorites { leitner_box } => {
            let found = resolve_box(storage, &leitner_box)?;
            let cards = service.list_favorites(found.id)?;
            println!("{}", format_card_list(&cards, &found, clock.now()).trim_end());
        }

        CardCommands::Reset { card } => {
            let found = resolve_card(&service, &card)?;
            let (updated, transition) = service.reset_card(found.id, clock.now())?;
            println!("{}", format_transition(&updated, &transition));
        }

        CardCommands::Complete { card } => {
            let found = resolve_card(&service, &card)?;
            let (updated, transition) = service.complete_card(found.id, clock.now())?;
            println!("{}", format_transition(&updated, &transition));
        }

        CardCommands::Move { card, target } => {
            let found = resolve_card(&service, &card)?;
            let target = resolve_box(storage, &target)?;
            let (updated, transition) = service.move_card(found.id, target.id, clock.now())?;
            println!("Moved to {}", target.name);
            println!("{}", format_transition(&updated, &transition));
        }
    }

    Ok(())
}
