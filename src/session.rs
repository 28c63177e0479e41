use crate::dataset::CompanyRecord;
use crate::error::SessionError;
use crate::evaluator::{FieldResults, evaluate};
use crate::info_log;
use rand::Rng;
use std::collections::HashSet;

pub const DEFAULT_MAX_GUESSES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
    GaveUp,
}

impl GameStatus {
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// One game against a randomly drawn target.
///
/// Status is derived from the guesses and the give-up flag; there is no way to set it directly.
#[derive(Debug)]
pub struct Session<'a> {
    dataset: &'a [CompanyRecord],
    target: &'a CompanyRecord,
    guesses: Vec<&'a CompanyRecord>,
    max_guesses: usize,
    gave_up: bool,
}

impl<'a> Session<'a> {
    pub fn new<R: Rng>(
        dataset: &'a [CompanyRecord],
        max_guesses: usize,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        if max_guesses == 0 {
            return Err(SessionError::InvalidMaxGuesses);
        }
        let target = draw_target(dataset, rng).ok_or(SessionError::EmptyDataset)?;
        info_log!("Session::new() - {} companies, {} guesses", dataset.len(), max_guesses);
        Ok(Self {
            dataset,
            target,
            guesses: Vec::new(),
            max_guesses,
            gave_up: false,
        })
    }

    pub fn submit_guess(&mut self, company: &'a CompanyRecord) -> Result<GameStatus, SessionError> {
        if self.status().is_over() {
            return Err(SessionError::GameOver);
        }
        if self.guesses.iter().any(|g| g.name == company.name) {
            return Err(SessionError::AlreadyGuessed(company.name.clone()));
        }
        self.guesses.push(company);
        let status = self.status();
        log::debug!(
            "Guess {}/{}: {} -> {:?}",
            self.guesses.len(),
            self.max_guesses,
            company.name,
            status
        );
        Ok(status)
    }

    pub fn give_up(&mut self) -> Result<(), SessionError> {
        if self.status().is_over() {
            return Err(SessionError::GameOver);
        }
        if self.guesses.is_empty() {
            return Err(SessionError::NoGuessesYet);
        }
        self.gave_up = true;
        log::debug!("Gave up after {} guesses", self.guesses.len());
        Ok(())
    }

    /// Start over with a fresh target drawn from the whole dataset.
    pub fn restart<R: Rng>(&mut self, rng: &mut R) {
        if let Some(target) = draw_target(self.dataset, rng) {
            self.target = target;
        }
        self.guesses.clear();
        self.gave_up = false;
    }

    pub fn status(&self) -> GameStatus {
        if self.guesses.last().is_some_and(|g| g.name == self.target.name) {
            GameStatus::Won
        } else if self.guesses.len() >= self.max_guesses {
            GameStatus::Lost
        } else if self.gave_up {
            GameStatus::GaveUp
        } else {
            GameStatus::InProgress
        }
    }

    pub fn target(&self) -> &'a CompanyRecord {
        self.target
    }

    pub fn guesses(&self) -> &[&'a CompanyRecord] {
        &self.guesses
    }

    pub fn dataset(&self) -> &'a [CompanyRecord] {
        self.dataset
    }

    pub fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    pub fn remaining_guesses(&self) -> usize {
        self.max_guesses.saturating_sub(self.guesses.len())
    }

    pub fn can_give_up(&self) -> bool {
        !self.status().is_over() && !self.guesses.is_empty()
    }

    pub fn guessed_names(&self) -> HashSet<&'a str> {
        self.guesses.iter().map(|g| g.name.as_str()).collect()
    }

    /// Looks a company up by exact name in this session's dataset.
    pub fn find(&self, name: &str) -> Option<&'a CompanyRecord> {
        self.dataset.iter().find(|c| c.name == name)
    }

    /// Each guess in submission order, paired with its comparison against the target.
    pub fn evaluations(&self) -> impl Iterator<Item = (&'a CompanyRecord, FieldResults)> + '_ {
        self.guesses.iter().map(|&g| (g, evaluate(g, self.target)))
    }
}

fn draw_target<'a, R: Rng>(
    dataset: &'a [CompanyRecord],
    rng: &mut R,
) -> Option<&'a CompanyRecord> {
    if dataset.is_empty() {
        return None;
    }
    dataset.get(rng.random_range(0..dataset.len()))
}
