use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::model::ids::{QuestionId, SubthemeId};
use crate::model::repr::CodeOrName;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BandError {
    #[error("question {0} appears more than once in the band")]
    DuplicateQuestion(QuestionId),

    #[error("unknown difficulty level code: {0}")]
    UnknownLevel(u8),

    #[error("unknown difficulty level: {0:?}")]
    UnknownLevelName(String),
}

//
// ─── LEVEL ─────────────────────────────────────────────────────────────────────
//

/// Difficulty level of a band. Ordered easy < medium < hard.
///
/// Serialized by name; configuration may also give the numeric code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "CodeOrName")]
pub enum DifficultyLevel {
    Easy,
    Medium,
    Hard,
}

impl DifficultyLevel {
    /// All levels in ascending order.
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
    ];

    /// Stable numeric code used by configuration sources (1..=3).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            DifficultyLevel::Easy => 1,
            DifficultyLevel::Medium => 2,
            DifficultyLevel::Hard => 3,
        }
    }

    /// # Errors
    ///
    /// Returns `BandError::UnknownLevel` for codes outside 1..=3.
    pub fn from_code(code: u8) -> Result<Self, BandError> {
        Self::ALL
            .into_iter()
            .find(|level| level.code() == code)
            .ok_or(BandError::UnknownLevel(code))
    }

    /// # Errors
    ///
    /// Returns `BandError::UnknownLevelName` unless `name` is one of
    /// `easy`, `medium` or `hard` (any case).
    pub fn from_name(name: &str) -> Result<Self, BandError> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| BandError::UnknownLevelName(name.to_owned()))
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
        }
    }
}

impl TryFrom<CodeOrName> for DifficultyLevel {
    type Error = BandError;

    fn try_from(value: CodeOrName) -> Result<Self, Self::Error> {
        match value {
            CodeOrName::Code(code) => Self::from_code(code),
            CodeOrName::Name(name) => Self::from_name(&name),
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── BAND ──────────────────────────────────────────────────────────────────────
//

/// The pool of questions at one difficulty level within a subtheme, plus the
/// share of a match (in percent) it should provide.
///
/// The question count is always derived from the id set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyBand {
    subtheme: SubthemeId,
    level: DifficultyLevel,
    question_ids: Vec<QuestionId>,
    proportion: u8,
}

impl DifficultyBand {
    /// Creates a band, keeping question ids in the given order.
    ///
    /// `proportion` is not range checked here; the validator reports values
    /// above 100 against the owning subtheme.
    ///
    /// # Errors
    ///
    /// Returns `BandError::DuplicateQuestion` if an id is listed twice.
    pub fn new(
        subtheme: SubthemeId,
        level: DifficultyLevel,
        question_ids: impl IntoIterator<Item = QuestionId>,
        proportion: u8,
    ) -> Result<Self, BandError> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for id in question_ids {
            if !seen.insert(id) {
                return Err(BandError::DuplicateQuestion(id));
            }
            ids.push(id);
        }

        Ok(Self {
            subtheme,
            level,
            question_ids: ids,
            proportion,
        })
    }

    #[must_use]
    pub fn subtheme(&self) -> SubthemeId {
        self.subtheme
    }

    #[must_use]
    pub fn level(&self) -> DifficultyLevel {
        self.level
    }

    #[must_use]
    pub fn question_ids(&self) -> &[QuestionId] {
        &self.question_ids
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.question_ids.len()
    }

    /// Configured share of a match, in percent.
    #[must_use]
    pub fn proportion(&self) -> u8 {
        self.proportion
    }

    #[must_use]
    pub fn contains(&self, id: QuestionId) -> bool {
        self.question_ids.contains(&id)
    }
}
