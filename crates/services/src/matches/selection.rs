use quiz_core::model::{
    DifficultyLevel, Question, QuestionId, ResourceKind, ResourceLocation, SubthemeId, ThemeId,
};
use serde::Serialize;

use super::allocation::Allocation;

/// A match request as it arrives from a serving layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRequest {
    pub theme: ThemeId,
    pub subtheme: SubthemeId,
    pub size: usize,
    pub seed: Option<u64>,
}

/// One drawn question, tagged with the band it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedQuestion {
    pub level: DifficultyLevel,
    pub question_id: QuestionId,
    pub resource_kind: ResourceKind,
    pub location: ResourceLocation,
}

impl SelectedQuestion {
    #[must_use]
    pub fn new(level: DifficultyLevel, question: &Question) -> Self {
        Self {
            level,
            question_id: question.id(),
            resource_kind: question.resource_kind(),
            location: question.location().clone(),
        }
    }
}

/// The questions of one match, grouped easy, medium, hard.
///
/// Order inside a group carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSelection {
    pub subtheme: SubthemeId,
    pub allocation: Allocation,
    pub questions: Vec<SelectedQuestion>,
}

impl MatchSelection {
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.questions.iter().map(|q| q.question_id)
    }

    pub fn of_level(&self, level: DifficultyLevel) -> impl Iterator<Item = &SelectedQuestion> {
        self.questions.iter().filter(move |q| q.level == level)
    }
}
