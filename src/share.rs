use crate::error::ClipboardError;
use crate::session::{GameStatus, Session};
use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;
use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};

pub const TITLE: &str = "Biz Wordle";
pub const PLAY_URL: &str = "https://bizwordle.me";

/// Builds the text summary of a finished game. Returns `None` while the game is still running.
pub fn share_text(session: &Session) -> Option<String> {
    let count = session.guesses().len();
    let max = session.max_guesses();
    let status_line = match session.status() {
        GameStatus::InProgress => return None,
        GameStatus::Won => format!("I got it in {count}/{max} guesses!"),
        GameStatus::GaveUp => format!("I gave up after {count}/{max} guesses!"),
        GameStatus::Lost => format!("I ran out of guesses ({count}/{max})!"),
    };

    let mut text = format!("{TITLE} - {}\n{status_line}\n\n", session.target().name);
    for (_, results) in session.evaluations() {
        let row: String = results.iter().map(|r| r.glyph()).collect();
        let _ = writeln!(text, "{row}");
    }
    let _ = write!(text, "\nPlay at: {PLAY_URL}");
    Some(text)
}

/// Destination for exported results.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Copies through the terminal with an OSC 52 escape sequence.
///
/// Only a terminal can act on the escape, so copying fails when `out` is not one.
pub struct TerminalClipboard<W: Write> {
    out: W,
    is_terminal: bool,
}

impl TerminalClipboard<io::Stdout> {
    pub fn stdout() -> Self {
        let out = io::stdout();
        let is_terminal = out.is_terminal();
        Self { out, is_terminal }
    }
}

impl<W: Write> TerminalClipboard<W> {
    pub fn new(out: W, is_terminal: bool) -> Self {
        Self { out, is_terminal }
    }
}

impl<W: Write> Clipboard for TerminalClipboard<W> {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        if !self.is_terminal {
            return Err(ClipboardError::NotATerminal);
        }
        execute!(self.out, CopyToClipboard::to_clipboard_from(text))?;
        log::info!("Copied {} bytes of results to the clipboard", text.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CompanyRecord, EMBEDDED_DATASET, load_dataset_from_str};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn others<'a>(dataset: &'a [CompanyRecord], target: &CompanyRecord) -> Vec<&'a CompanyRecord> {
        dataset.iter().filter(|c| c.name != target.name).collect()
    }

    #[test]
    fn test_no_share_text_while_in_progress() {
        let dataset = load_dataset_from_str(EMBEDDED_DATASET).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let session = Session::new(&dataset, 8, &mut rng).unwrap();
        assert!(share_text(&session).is_none());
    }

    #[test]
    fn test_share_text_for_win() {
        let dataset = load_dataset_from_str(EMBEDDED_DATASET).unwrap();
        let mut rng = StdRng::seed_from_u64(12);
        let mut session = Session::new(&dataset, 8, &mut rng).unwrap();
        let target = session.target();
        let wrong = others(&dataset, target);
        session.submit_guess(wrong[0]).unwrap();
        session.submit_guess(target).unwrap();

        let text = share_text(&session).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("Biz Wordle - {}", target.name));
        assert_eq!(lines[1], "I got it in 2/8 guesses!");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3].chars().count(), 5);
        assert!(lines[3].chars().all(|c| c == '🟩' || c == '⬜'));
        assert_eq!(lines[4], "🟩🟩🟩🟩🟩");
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "Play at: https://bizwordle.me");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_share_text_for_give_up_and_loss() {
        let dataset = load_dataset_from_str(EMBEDDED_DATASET).unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let mut session = Session::new(&dataset, 2, &mut rng).unwrap();
        let wrong = others(&dataset, session.target());

        session.submit_guess(wrong[0]).unwrap();
        session.give_up().unwrap();
        let text = share_text(&session).unwrap();
        assert!(text.contains("I gave up after 1/2 guesses!"));

        session.restart(&mut rng);
        let wrong = others(&dataset, session.target());
        session.submit_guess(wrong[0]).unwrap();
        session.submit_guess(wrong[1]).unwrap();
        let text = share_text(&session).unwrap();
        assert!(text.contains("I ran out of guesses (2/2)!"));
    }

    #[test]
    fn test_terminal_clipboard_writes_osc52() {
        let mut clipboard = TerminalClipboard::new(Vec::new(), true);
        clipboard.copy("hello").unwrap();
        let written = String::from_utf8(clipboard.out).unwrap();
        assert!(written.starts_with("\x1b]52;"));
        assert!(written.contains("aGVsbG8="));
    }

    #[test]
    fn test_terminal_clipboard_refuses_without_terminal() {
        let mut clipboard = TerminalClipboard::new(Vec::new(), false);
        assert!(matches!(
            clipboard.copy("hello"),
            Err(ClipboardError::NotATerminal)
        ));
        assert!(clipboard.out.is_empty());
    }
}
