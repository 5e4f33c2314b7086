use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use leitner::cli::{handle_box_command, handle_card_command, handle_review_command};
use leitner::config::{paths::LeitnerPaths, settings::Settings};
use leitner::storage::Storage;

/// Environment variable holding the log filter (e.g. `debug`, `leitner=trace`)
const LOG_ENV: &str = "LEITNER_LOG";

#[derive(Parser)]
#[command(
    name = "leitner",
    version,
    about = "Spaced repetition flashcards using the Leitner box system",
    long_about = "Leitner keeps flashcards in boxes of 13 levels. A card that passes \
                  review moves up a level and waits longer before it is due again; \
                  a card that passes at level 13 is completed."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Box management commands
    #[command(subcommand)]
    Box(leitner::cli::BoxCommands),

    /// Card management commands
    #[command(subcommand)]
    Card(leitner::cli::CardCommands),

    /// Review the due cards of a box
    Review {
        /// Box name or ID
        #[arg(value_name = "BOX")]
        leitner_box: String,
        /// Level to review (defaults to the lowest level with due cards)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=13))]
        level: Option<u8>,
    },

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LeitnerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Box(cmd)) => {
            handle_box_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Card(cmd)) => {
            handle_card_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Review { leitner_box, level }) => {
            handle_review_command(&storage, &settings, &leitner_box, level)?;
        }
        Some(Commands::Audit { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Init) => {
            let already = paths.is_initialized();
            settings.save(&paths)?;
            storage.save_all()?;
            if already {
                println!("Leitner is already initialized at: {}", paths.base_dir().display());
            } else {
                println!("Initialized Leitner at: {}", paths.base_dir().display());
                println!();
                println!("Create your first box with 'leitner box create <name>'.");
            }
        }
        Some(Commands::Config) => {
            println!("Leitner Configuration");
            println!("=====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!(
                "  Failed cards back to level 1: {}",
                settings.default_back_to_top_level
            );
            println!("  Shuffle review queue:         {}", settings.shuffle_queue);
            println!("  Date format:                  {}", settings.date_format);
        }
        None => {
            println!("Leitner - spaced repetition flashcards");
            println!();
            println!("Run 'leitner --help' for usage information.");
        }
    }

    Ok(())
}
