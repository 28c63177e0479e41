use crate::dataset::CompanyRecord;
use crate::error::{ClipboardError, SessionError};
use crate::evaluator::{Field, FieldResults};
use crate::game_state::{GameInterface, UserAction, game_over_message};
use crate::search::{best_candidate, filter_candidates};
use crate::session::{DEFAULT_MAX_GUESSES, Session};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Biz Wordle: guess the mystery company from its attributes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a company CSV (name,industry,founded,headquarters,fortuneRank,ceo)
    #[arg(short = 'i', long = "input")]
    pub dataset_path: Option<String>,

    /// Guesses allowed per game
    #[arg(short = 'm', long = "max-guesses", default_value_t = DEFAULT_MAX_GUESSES, value_parser = parse_max_guesses)]
    pub max_guesses: usize,

    /// Use the line-oriented interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Show the instructions even if you have played before
    #[arg(long)]
    pub instructions: bool,

    /// Write log output to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn parse_max_guesses(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

// UI Input/Output functions

pub fn read_action<R: BufRead>(reader: &mut R, session: &Session) -> Option<UserAction> {
    println!(
        "\nGuess a company ({} left), or 'giveup', 'share', 'next', 'help', 'exit':",
        session.remaining_guesses()
    );
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => return Some(UserAction::Exit),
        Ok(_) => {}
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            return Some(UserAction::Exit);
        }
    }
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "exit" | "quit" => return Some(UserAction::Exit),
        "next" | "new" => return Some(UserAction::NewGame),
        "giveup" | "give up" => return Some(UserAction::GiveUp),
        "share" => return Some(UserAction::Share),
        "help" => return Some(UserAction::ToggleInstructions),
        "" => {
            println!("Type part of a company name to guess.");
            return None;
        }
        _ => {}
    }

    let guessed = session.guessed_names();
    let candidates = filter_candidates(input, session.dataset(), &guessed);
    let Some(choice) = best_candidate(input, &candidates) else {
        println!("No unguessed company matches '{input}'.");
        return None;
    };
    if candidates.len() > 1 {
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        println!("Matches: {}", names.join(", "));
    }
    println!("Guessing {}", choice.name);
    Some(UserAction::Guess(choice.name.clone()))
}

/// One board row: the guessed name followed by each attribute with its match glyph and hint arrow.
pub fn format_guess_row(guess: &CompanyRecord, results: &FieldResults) -> String {
    let cells: Vec<String> = results
        .iter()
        .map(|r| {
            let mut cell = format!("{} {}", r.glyph(), r.field.value(guess));
            if let Some(hint) = r.hint {
                cell.push(' ');
                cell.push(hint.arrow());
            }
            cell
        })
        .collect();
    format!("{}: {}", guess.name, cells.join(" | "))
}

pub fn display_instructions(max_guesses: usize) {
    println!("Guess the mystery business in {max_guesses} tries or less!");
    let labels: Vec<&str> = Field::ALL.iter().map(|f| f.label()).collect();
    println!("Each guess is compared on: {}.", labels.join(", "));
    println!("🟩 marks a match with the mystery business.");
    println!("For numeric values, arrows show if the mystery business's value is higher (↑) or lower (↓).");
}

pub fn display_board(session: &Session) {
    println!("Guesses: {}/{}", session.guesses().len(), session.max_guesses());
    for (guess, results) in session.evaluations() {
        println!("{}", format_guess_row(guess, &results));
    }
}

pub fn display_game_over(session: &Session) {
    println!("The mystery business was: {}", session.target().name);
    println!("{}", game_over_message(session));
    println!("Type 'share' to copy your results or 'next' for a new game.");
}

pub fn display_share_result(text: &str, result: &Result<(), ClipboardError>) {
    println!("{text}");
    match result {
        Ok(()) => println!("Results copied to clipboard!"),
        Err(e) => println!("Failed to copy results. Please try again. ({e})"),
    }
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_instructions(&mut self, max_guesses: usize) {
        display_instructions(max_guesses);
    }

    fn read_action(&mut self, session: &Session) -> Option<UserAction> {
        read_action(&mut self.reader, session)
    }

    fn display_board(&mut self, session: &Session) {
        display_board(session);
    }

    fn display_rejection(&mut self, error: &SessionError) {
        println!("{}", capitalize(&error.to_string()));
    }

    fn display_unknown_company(&mut self, name: &str) {
        println!("Unknown company: {name}");
    }

    fn display_game_over(&mut self, session: &Session) {
        display_game_over(session);
    }

    fn display_share_result(&mut self, text: &str, result: &Result<(), ClipboardError>) {
        display_share_result(text, result);
    }

    fn display_new_game_message(&mut self, company_count: usize) {
        println!("New game started. Pick from {company_count} companies.");
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
