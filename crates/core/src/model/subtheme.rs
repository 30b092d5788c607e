use crate::model::difficulty::DifficultyLevel;
use crate::model::ids::SubthemeId;

/// A subtheme references its difficulty bands by level; the bands themselves
/// live in the catalog under `(subtheme id, level)`.
///
/// Nothing here enforces "one band per level". A subtheme can be loaded with
/// a broken level list and is rejected by the validator before any selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtheme {
    id: SubthemeId,
    name: String,
    levels: Vec<DifficultyLevel>,
}

impl Subtheme {
    #[must_use]
    pub fn new(
        id: SubthemeId,
        name: impl Into<String>,
        levels: impl IntoIterator<Item = DifficultyLevel>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            levels: levels.into_iter().collect(),
        }
    }

    /// Subtheme referencing easy, medium and hard.
    #[must_use]
    pub fn with_all_levels(id: SubthemeId, name: impl Into<String>) -> Self {
        Self::new(id, name, DifficultyLevel::ALL)
    }

    #[must_use]
    pub fn id(&self) -> SubthemeId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Referenced levels, as configured.
    #[must_use]
    pub fn levels(&self) -> &[DifficultyLevel] {
        &self.levels
    }

    #[must_use]
    pub fn references(&self, level: DifficultyLevel) -> bool {
        self.levels.contains(&level)
    }
}
