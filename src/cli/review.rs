//! Interactive review
//!
//! Prompts for each due card of one level and records pass or fail as the
//! user answers. Every outcome is saved and audited before the next card is
//! shown, so quitting midway loses nothing.

use std::io::{self, BufRead, Write};

use super::{parse_level, resolve_box};
use crate::config::settings::Settings;
use crate::display::card::{format_review_prompt, format_review_summary, format_transition};
use crate::error::{LeitnerError, LeitnerResult};
use crate::models::{LeitnerBox, LevelNumber};
use crate::scheduler::{Clock, SystemClock};
use crate::services::{BoxService, ReviewOutcome, ReviewSession};
use crate::storage::Storage;

enum Choice {
    Pass,
    Fail,
    Answer,
    Quit,
    Unknown,
}

fn parse_choice(line: &str) -> Choice {
    match line.trim().to_lowercase().as_str() {
        "p" | "pass" | "y" => Choice::Pass,
        "f" | "fail" | "n" => Choice::Fail,
        "a" | "answer" => Choice::Answer,
        "q" | "quit" => Choice::Quit,
        _ => Choice::Unknown,
    }
}

/// Read one line; `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> LeitnerResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Handle the `review` command on stdin/stdout
pub fn handle_review_command(
    storage: &Storage,
    settings: &Settings,
    leitner_box: &str,
    level: Option<u8>,
) -> LeitnerResult<()> {
    let found = resolve_box(storage, leitner_box)?;
    let clock = SystemClock;

    let level = match level {
        Some(value) => parse_level(value)?,
        None => {
            let summaries = BoxService::new(storage).level_summaries(found.id, clock.now())?;
            match summaries.iter().find(|s| s.reviewable > 0) {
                Some(summary) => summary.level,
                None => {
                    println!("Nothing to review in {}.", found.name);
                    return Ok(());
                }
            }
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_review(
        storage,
        &clock,
        found,
        level,
        settings.shuffle_queue,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
}

/// Run a review session reading choices from `input`
///
/// End of input behaves like quitting.
pub fn run_review<R: BufRead, W: Write>(
    storage: &Storage,
    clock: &dyn Clock,
    leitner_box: LeitnerBox,
    level: LevelNumber,
    shuffle: bool,
    input: &mut R,
    out: &mut W,
) -> LeitnerResult<()> {
    let box_name = leitner_box.name.clone();
    let mut session = ReviewSession::start(storage, clock, leitner_box, level, shuffle)?;

    if session.is_finished() {
        writeln!(out, "Nothing to review at level {} of {}.", level, box_name)?;
        return Ok(());
    }

    writeln!(
        out,
        "Reviewing {} card(s) at level {} of {}",
        session.total(),
        level,
        box_name
    )?;

    'cards: while let Some(card) = session.current().cloned() {
        let position = session.total() - session.remaining() + 1;
        writeln!(out)?;
        write!(out, "{}", format_review_prompt(&card, position, session.total()))?;

        let result = loop {
            write!(out, "(p)ass, (f)ail, (a)nswer, (q)uit: ")?;
            out.flush()?;

            let Some(line) = read_line(input)? else {
                writeln!(out)?;
                break 'cards;
            };

            match parse_choice(&line) {
                Choice::Pass => break session.pass(),
                Choice::Fail => break session.fail(),
                Choice::Answer => match &card.answer {
                    Some(answer) => writeln!(out, "  Answer: {}", answer)?,
                    None => writeln!(out, "  (no answer recorded)")?,
                },
                Choice::Quit => break 'cards,
                Choice::Unknown => writeln!(out, "  Please answer p, f, a or q")?,
            }
        };

        match result {
            Ok(outcome) => report(storage, &outcome, out)?,
            Err(LeitnerError::SaveFailed(reason)) => {
                if !recover_save(storage, &mut session, &reason, input, out)? {
                    break;
                }
            }
            Err(e) => return Err(e),
        }
    }

    writeln!(out)?;
    write!(
        out,
        "{}",
        format_review_summary(
            session.pass_count(),
            session.failed_count(),
            session.remaining()
        )
    )?;
    Ok(())
}

fn report<W: Write>(storage: &Storage, outcome: &ReviewOutcome, out: &mut W) -> LeitnerResult<()> {
    storage.log_review(&outcome.before, &outcome.after, outcome.transition.summary())?;
    writeln!(out, "  {}", format_transition(&outcome.after, &outcome.transition))?;
    Ok(())
}

/// Offer to retry or skip a failed save; returns false if the user quits
fn recover_save<R: BufRead, W: Write>(
    storage: &Storage,
    session: &mut ReviewSession<'_, Storage>,
    reason: &str,
    input: &mut R,
    out: &mut W,
) -> LeitnerResult<bool> {
    let mut reason = reason.to_string();

    loop {
        writeln!(out, "  Could not save: {}", reason)?;
        write!(out, "(r)etry, (s)kip, (q)uit: ")?;
        out.flush()?;

        let choice = read_line(input)?.unwrap_or_else(|| "q".to_string());
        match choice.trim().to_lowercase().as_str() {
            "r" | "retry" => match session.retry_save() {
                Ok(outcome) => {
                    report(storage, &outcome, out)?;
                    return Ok(true);
                }
                Err(LeitnerError::SaveFailed(again)) => reason = again,
                Err(e) => return Err(e),
            },
            "s" | "skip" => {
                session.discard_unsaved();
                return Ok(true);
            }
            "q" | "quit" => {
                session.discard_unsaved();
                return Ok(false);
            }
            _ => writeln!(out, "  Please answer r, s or q")?,
        }
    }
}
