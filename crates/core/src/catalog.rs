//! The content catalog: single owner of every theme, subtheme, band and
//! question.
//!
//! A catalog is assembled once through [`CatalogBuilder`] and is read-only
//! afterwards. Parents refer to children by id only, so every traversal goes
//! through the lookup methods below.

use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;

use crate::model::name_key;
use crate::model::{
    DifficultyBand, DifficultyLevel, Question, QuestionId, Subtheme, SubthemeId, Theme, ThemeId,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// A lookup named an id the catalog does not hold.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFound {
    #[error("theme {0} not found")]
    Theme(ThemeId),

    #[error("theme named {0:?} not found")]
    ThemeName(String),

    #[error("subtheme {0} not found")]
    Subtheme(SubthemeId),

    #[error("{level} band of subtheme {subtheme} not found")]
    Band {
        subtheme: SubthemeId,
        level: DifficultyLevel,
    },

    #[error("question {0} not found")]
    Question(QuestionId),
}

/// Referential integrity violations found while building a catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("question {0} is defined more than once")]
    DuplicateQuestion(QuestionId),

    #[error("subtheme {0} is defined more than once")]
    DuplicateSubtheme(SubthemeId),

    #[error("theme {0} is defined more than once")]
    DuplicateTheme(ThemeId),

    #[error("theme {0} has a blank name")]
    BlankThemeName(ThemeId),

    #[error("themes {first} and {second} share the name {name:?}")]
    DuplicateThemeName {
        name: String,
        first: ThemeId,
        second: ThemeId,
    },

    #[error("subtheme {subtheme} has more than one {level} band")]
    DuplicateBand {
        subtheme: SubthemeId,
        level: DifficultyLevel,
    },

    #[error("{level} band refers to unknown subtheme {subtheme}")]
    BandWithoutSubtheme {
        subtheme: SubthemeId,
        level: DifficultyLevel,
    },

    #[error("{level} band of subtheme {subtheme} refers to unknown question {question}")]
    UnknownQuestion {
        subtheme: SubthemeId,
        level: DifficultyLevel,
        question: QuestionId,
    },

    #[error("question {question} is listed by several bands of subtheme {subtheme}")]
    QuestionInSeveralBands {
        subtheme: SubthemeId,
        question: QuestionId,
    },

    #[error("theme {theme} refers to unknown subtheme {subtheme}")]
    UnknownSubtheme { theme: ThemeId, subtheme: SubthemeId },
}

//
// ─── BUILDER ───────────────────────────────────────────────────────────────────
//

/// Collects catalog entries in any order and checks referential integrity
/// once, in [`CatalogBuilder::build`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    questions: Vec<Question>,
    bands: Vec<DifficultyBand>,
    subthemes: Vec<Subtheme>,
    themes: Vec<Theme>,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_question(&mut self, question: Question) -> &mut Self {
        self.questions.push(question);
        self
    }

    pub fn add_band(&mut self, band: DifficultyBand) -> &mut Self {
        self.bands.push(band);
        self
    }

    pub fn add_subtheme(&mut self, subtheme: Subtheme) -> &mut Self {
        self.subthemes.push(subtheme);
        self
    }

    pub fn add_theme(&mut self, theme: Theme) -> &mut Self {
        self.themes.push(theme);
        self
    }

    /// Freezes the collected entries into a catalog.
    ///
    /// Difficulty configuration (one band per level, proportions) is left to
    /// the validator so a single misconfigured subtheme does not keep the rest
    /// of the catalog from loading.
    ///
    /// # Errors
    ///
    /// Returns the first `CatalogError` found.
    pub fn build(self) -> Result<ContentCatalog, CatalogError> {
        let mut questions = HashMap::with_capacity(self.questions.len());
        for question in self.questions {
            let id = question.id();
            if questions.insert(id, question).is_some() {
                return Err(CatalogError::DuplicateQuestion(id));
            }
        }

        let mut subthemes = BTreeMap::new();
        for subtheme in self.subthemes {
            let id = subtheme.id();
            if subthemes.insert(id, subtheme).is_some() {
                return Err(CatalogError::DuplicateSubtheme(id));
            }
        }

        let mut bands = BTreeMap::new();
        let mut claimed: HashSet<(SubthemeId, QuestionId)> = HashSet::new();
        for band in self.bands {
            let subtheme = band.subtheme();
            let level = band.level();
            if !subthemes.contains_key(&subtheme) {
                return Err(CatalogError::BandWithoutSubtheme { subtheme, level });
            }
            for &question in band.question_ids() {
                if !questions.contains_key(&question) {
                    return Err(CatalogError::UnknownQuestion {
                        subtheme,
                        level,
                        question,
                    });
                }
                if !claimed.insert((subtheme, question)) {
                    return Err(CatalogError::QuestionInSeveralBands { subtheme, question });
                }
            }
            if bands.insert((subtheme, level), band).is_some() {
                return Err(CatalogError::DuplicateBand { subtheme, level });
            }
        }

        let mut themes = BTreeMap::new();
        let mut theme_names = HashMap::with_capacity(self.themes.len());
        for theme in self.themes {
            let id = theme.id();
            let key = theme.name_key();
            if key.is_empty() {
                return Err(CatalogError::BlankThemeName(id));
            }
            if let Some(missing) = theme
                .subthemes()
                .iter()
                .find(|sub| !subthemes.contains_key(*sub))
            {
                return Err(CatalogError::UnknownSubtheme {
                    theme: id,
                    subtheme: *missing,
                });
            }
            if themes.insert(id, theme).is_some() {
                return Err(CatalogError::DuplicateTheme(id));
            }
            if let Some(first) = theme_names.insert(key, id) {
                let name = themes[&id].name().to_owned();
                return Err(CatalogError::DuplicateThemeName {
                    name,
                    first,
                    second: id,
                });
            }
        }

        Ok(ContentCatalog {
            themes,
            theme_names,
            subthemes,
            bands,
            questions,
        })
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Read-only view over the whole content graph.
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    themes: BTreeMap<ThemeId, Theme>,
    theme_names: HashMap<String, ThemeId>,
    subthemes: BTreeMap<SubthemeId, Subtheme>,
    bands: BTreeMap<(SubthemeId, DifficultyLevel), DifficultyBand>,
    questions: HashMap<QuestionId, Question>,
}

impl ContentCatalog {
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// # Errors
    ///
    /// Returns `NotFound::Theme` for unknown ids.
    pub fn theme(&self, id: ThemeId) -> Result<&Theme, NotFound> {
        self.themes.get(&id).ok_or(NotFound::Theme(id))
    }

    /// Looks a theme up by name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `NotFound::ThemeName` when no theme carries that name.
    pub fn theme_by_name(&self, name: &str) -> Result<&Theme, NotFound> {
        self.theme_names
            .get(&name_key(name))
            .and_then(|id| self.themes.get(id))
            .ok_or_else(|| NotFound::ThemeName(name.to_owned()))
    }

    /// # Errors
    ///
    /// Returns `NotFound::Subtheme` for unknown ids.
    pub fn subtheme(&self, id: SubthemeId) -> Result<&Subtheme, NotFound> {
        self.subthemes.get(&id).ok_or(NotFound::Subtheme(id))
    }

    /// # Errors
    ///
    /// Returns `NotFound::Band` when the subtheme has no band at `level`.
    pub fn band(
        &self,
        subtheme: SubthemeId,
        level: DifficultyLevel,
    ) -> Result<&DifficultyBand, NotFound> {
        self.bands
            .get(&(subtheme, level))
            .ok_or(NotFound::Band { subtheme, level })
    }

    /// # Errors
    ///
    /// Returns `NotFound::Question` for unknown ids.
    pub fn question(&self, id: QuestionId) -> Result<&Question, NotFound> {
        self.questions.get(&id).ok_or(NotFound::Question(id))
    }

    /// Themes ordered by id.
    pub fn themes(&self) -> impl Iterator<Item = &Theme> {
        self.themes.values()
    }

    /// Subthemes ordered by id.
    pub fn subthemes(&self) -> impl Iterator<Item = &Subtheme> {
        self.subthemes.values()
    }

    /// Resolved subthemes of a theme, in the theme's order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the theme or one of its subthemes is missing.
    pub fn subthemes_of(&self, theme: ThemeId) -> Result<Vec<&Subtheme>, NotFound> {
        self.theme(theme)?
            .subthemes()
            .iter()
            .map(|id| self.subtheme(*id))
            .collect()
    }

    /// Bands stored for a subtheme, easy to hard. Levels without a band are
    /// skipped.
    pub fn bands_of(&self, subtheme: SubthemeId) -> impl Iterator<Item = &DifficultyBand> {
        self.bands
            .range((subtheme, DifficultyLevel::Easy)..=(subtheme, DifficultyLevel::Hard))
            .map(|(_, band)| band)
    }

    /// # Errors
    ///
    /// Returns `NotFound::Theme` for unknown themes.
    pub fn theme_contains(&self, theme: ThemeId, subtheme: SubthemeId) -> Result<bool, NotFound> {
        Ok(self.theme(theme)?.contains(subtheme))
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty() && self.subthemes.is_empty() && self.questions.is_empty()
    }
}
