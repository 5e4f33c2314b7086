//! Box CLI commands
//!
//! Implements CLI commands for box management.

use clap::{Subcommand, ValueEnum};

use super::{parse_level, resolve_box};
use crate::config::settings::Settings;
use crate::display::leitner_box::{format_box_details, format_box_list};
use crate::error::LeitnerResult;
use crate::scheduler::{Clock, SystemClock};
use crate::services::BoxService;
use crate::storage::Storage;

/// What happens to a card that fails a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailPolicy {
    /// Keep the card at its level
    Stay,
    /// Send the card back to level 1
    Restart,
}

/// Box subcommands
#[derive(Subcommand)]
pub enum BoxCommands {
    /// Create a new box with 13 levels
    Create {
        /// Box name
        name: String,
        /// Send failed cards back to level 1
        #[arg(long)]
        back_to_top: bool,
    },
    /// List all boxes
    List,
    /// Show a box and its levels
    Show {
        /// Box name or ID
        #[arg(value_name = "BOX")]
        leitner_box: String,
    },
    /// Rename a box
    Rename {
        /// Box name or ID
        #[arg(value_name = "BOX")]
        leitner_box: String,
        /// New name
        name: String,
    },
    /// Set what happens to failed cards
    Policy {
        /// Box name or ID
        #[arg(value_name = "BOX")]
        leitner_box: String,
        #[arg(value_enum)]
        policy: FailPolicy,
    },
    /// Change the review interval of a level
    Interval {
        /// Box name or ID
        #[arg(value_name = "BOX")]
        leitner_box: String,
        /// Level number (1-13)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=13))]
        level: u8,
        /// Days to wait after a pass
        days: u32,
    },
    /// Delete a box and all of its cards
    Delete {
        /// Box name or ID
        #[arg(value_name = "BOX")]
        leitner_box: String,
        /// Confirm deletion
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a box command
pub fn handle_box_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BoxCommands,
) -> LeitnerResult<()> {
    let service = BoxService::new(storage);
    let clock = SystemClock;

    match cmd {
        BoxCommands::Create { name, back_to_top } => {
            let back_to_top = back_to_top || settings.default_back_to_top_level;
            let created = service.create_box(&name, back_to_top)?;

            println!("Created box: {}", created.name);
            println!("  ID: {}", created.id);
            println!(
                "  Failed cards: {}",
                if created.back_to_top_level {
                    "back to level 1"
                } else {
                    "stay at their level"
                }
            );
        }

        BoxCommands::List => {
            let now = clock.now();
            let mut rows = Vec::new();
            for leitner_box in service.list_boxes()? {
                let summaries = service.level_summaries(leitner_box.id, now)?;
                rows.push((leitner_box, summaries));
            }
            println!("{}", format_box_list(&rows).trim_end());
        }

        BoxCommands::Show { leitner_box } => {
            let found = resolve_box(storage, &leitner_box)?;
            let summaries = service.level_summaries(found.id, clock.now())?;
            print!("{}", format_box_details(&found, &summaries));
        }

        BoxCommands::Rename { leitner_box, name } => {
            let found = resolve_box(storage, &leitner_box)?;
            let renamed = service.rename_box(found.id, &name)?;
            println!("Renamed box: {} -> {}", found.name, renamed.name);
        }

        BoxCommands::Policy {
            leitner_box,
            policy,
        } => {
            let found = resolve_box(storage, &leitner_box)?;
            let updated = service.set_back_to_top_level(found.id, policy == FailPolicy::Restart)?;
            match policy {
                FailPolicy::Stay => {
                    println!("Failed cards in {} now stay at their level", updated.name)
                }
                FailPolicy::Restart => {
                    println!("Failed cards in {} now go back to level 1", updated.name)
                }
            }
        }

        BoxCommands::Interval {
            leitner_box,
            level,
            days,
        } => {
            let found = resolve_box(storage, &leitner_box)?;
            let level = parse_level(level)?;
            service.set_days_to_recommend(found.id, level, days)?;
            println!(
                "Level {} of {} now waits {} day{}",
                level,
                found.name,
                days,
                if days == 1 { "" } else { "s" }
            );
        }

        BoxCommands::Delete { leitner_box, force } => {
            let found = resolve_box(storage, &leitner_box)?;

            if !force {
                let cards = storage.cards.get_in_box(found.id)?.len();
                println!(
                    "Box {} holds {} card(s). Re-run with --force to delete it.",
                    found.name, cards
                );
                return Ok(());
            }

            let removed = service.delete_box(found.id)?;
            println!("Deleted box: {} ({} cards removed)", found.name, removed);
        }
    }

    Ok(())
}
