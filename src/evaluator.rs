use crate::dataset::CompanyRecord;
use std::cmp::Ordering;

/// Attributes compared between a guess and the target, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Industry,
    Founded,
    Headquarters,
    FortuneRank,
    Ceo,
}

impl Field {
    pub const ALL: [Self; 5] = [
        Self::Industry,
        Self::Founded,
        Self::Headquarters,
        Self::FortuneRank,
        Self::Ceo,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Industry => "Industry",
            Self::Founded => "Founded",
            Self::Headquarters => "Headquarters",
            Self::FortuneRank => "Fortune 500 Rank",
            Self::Ceo => "CEO",
        }
    }

    /// The attribute's value on `company`, formatted for display.
    pub fn value(self, company: &CompanyRecord) -> String {
        match self {
            Self::Industry => company.industry.clone(),
            Self::Founded => company.founded.to_string(),
            Self::Headquarters => company.headquarters.clone(),
            Self::FortuneRank => company.fortune_rank.to_string(),
            Self::Ceo => company.ceo.clone(),
        }
    }
}

/// Where the target's numeric value lies relative to the guessed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    TargetHigher,
    TargetLower,
}

impl Hint {
    pub const fn arrow(self) -> char {
        match self {
            Self::TargetHigher => '↑',
            Self::TargetLower => '↓',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldResult {
    pub field: Field,
    pub matched: bool,
    pub hint: Option<Hint>,
}

impl FieldResult {
    pub const fn glyph(&self) -> char {
        if self.matched { '🟩' } else { '⬜' }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldResults([FieldResult; 5]);

impl FieldResults {
    pub fn get(&self, field: Field) -> FieldResult {
        self.0[field as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldResult> {
        self.0.iter()
    }

    pub fn is_exact(&self) -> bool {
        self.0.iter().all(|r| r.matched)
    }
}

pub fn evaluate(guess: &CompanyRecord, target: &CompanyRecord) -> FieldResults {
    FieldResults(Field::ALL.map(|field| compare_field(field, guess, target)))
}

fn compare_field(field: Field, guess: &CompanyRecord, target: &CompanyRecord) -> FieldResult {
    let (matched, hint) = match field {
        Field::Industry => (guess.industry == target.industry, None),
        Field::Headquarters => (guess.headquarters == target.headquarters, None),
        Field::Ceo => (guess.ceo == target.ceo, None),
        Field::Founded => numeric(guess.founded.cmp(&target.founded), || {
            if guess.founded < target.founded {
                Hint::TargetHigher
            } else {
                Hint::TargetLower
            }
        }),
        // Rank 1 is the largest company, so a numerically lower target rank ranks "above" the guess.
        Field::FortuneRank => numeric(guess.fortune_rank.cmp(&target.fortune_rank), || {
            if guess.fortune_rank > target.fortune_rank {
                Hint::TargetLower
            } else {
                Hint::TargetHigher
            }
        }),
    };
    FieldResult {
        field,
        matched,
        hint,
    }
}

fn numeric(ordering: Ordering, hint: impl FnOnce() -> Hint) -> (bool, Option<Hint>) {
    match ordering {
        Ordering::Equal => (true, None),
        _ => (false, Some(hint())),
    }
}
