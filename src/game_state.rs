use crate::dataset::CompanyRecord;
use crate::error::{ClipboardError, SessionError};
use crate::session::{GameStatus, Session};
use crate::share::{Clipboard, share_text};
use crate::info_log;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Submit the company with this exact name.
    Guess(String),
    GiveUp,
    Share,
    ToggleInstructions,
    NewGame,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    pub max_guesses: usize,
    pub show_instructions: bool,
}

/// Front end seam: everything the game loop shows or asks for goes through here.
pub trait GameInterface {
    fn display_instructions(&mut self, max_guesses: usize);
    /// Returns `None` when the input was not a usable action; the loop just asks again.
    fn read_action(&mut self, session: &Session) -> Option<UserAction>;
    fn display_board(&mut self, session: &Session);
    fn display_rejection(&mut self, error: &SessionError);
    fn display_unknown_company(&mut self, name: &str);
    fn display_game_over(&mut self, session: &Session);
    fn display_share_result(&mut self, text: &str, result: &Result<(), ClipboardError>);
    fn display_new_game_message(&mut self, company_count: usize);
    fn display_exit_message(&mut self);
}

/// Runs games until the player exits.
pub fn game_loop<I, C, R>(
    dataset: &[CompanyRecord],
    interface: &mut I,
    clipboard: &mut C,
    options: GameOptions,
    rng: &mut R,
) -> Result<(), SessionError>
where
    I: GameInterface + ?Sized,
    C: Clipboard + ?Sized,
    R: Rng,
{
    let mut session = Session::new(dataset, options.max_guesses, rng)?;
    if options.show_instructions {
        interface.display_instructions(session.max_guesses());
    }
    interface.display_new_game_message(dataset.len());
    log::debug!("Target for this game: {}", session.target().name);

    loop {
        let Some(action) = interface.read_action(&session) else {
            continue;
        };
        info_log!("game_loop() - action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                session.restart(rng);
                log::debug!("Target for this game: {}", session.target().name);
                interface.display_new_game_message(dataset.len());
            }
            UserAction::ToggleInstructions => interface.display_instructions(session.max_guesses()),
            UserAction::Guess(name) => {
                let Some(company) = session.find(&name) else {
                    interface.display_unknown_company(&name);
                    continue;
                };
                match session.submit_guess(company) {
                    Ok(status) => {
                        interface.display_board(&session);
                        if status.is_over() {
                            interface.display_game_over(&session);
                        }
                    }
                    Err(e) => interface.display_rejection(&e),
                }
            }
            UserAction::GiveUp => match session.give_up() {
                Ok(()) => interface.display_game_over(&session),
                Err(e) => interface.display_rejection(&e),
            },
            UserAction::Share => match share_text(&session) {
                Some(text) => {
                    let result = clipboard.copy(&text);
                    if let Err(e) = &result {
                        log::debug!("Share copy failed: {e}");
                    }
                    interface.display_share_result(&text, &result);
                }
                None => interface.display_rejection(&SessionError::NotFinished),
            },
        }
    }
    Ok(())
}

pub fn game_over_message(session: &Session) -> String {
    let count = session.guesses().len();
    match session.status() {
        GameStatus::Won => format!("You got it in {count} tries!"),
        GameStatus::GaveUp => format!("You gave up after {count} guesses."),
        GameStatus::Lost => format!("You ran out of guesses after {count} guesses."),
        GameStatus::InProgress => format!("Guesses: {count}/{}", session.max_guesses()),
    }
}
