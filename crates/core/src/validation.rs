//! Difficulty configuration checks that must pass before a subtheme can be
//! used for selection.

use std::fmt;

use thiserror::Error;

use crate::catalog::ContentCatalog;
use crate::model::{DifficultyBand, DifficultyLevel, Subtheme, SubthemeId};

/// Which configuration rule a subtheme broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigRule {
    DuplicateLevel(DifficultyLevel),
    MissingLevel(DifficultyLevel),
    UnresolvedBand(DifficultyLevel),
    ProportionOutOfRange {
        level: DifficultyLevel,
        proportion: u8,
    },
    ProportionSum {
        total: u32,
    },
}

impl fmt::Display for ConfigRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigRule::DuplicateLevel(level) => write!(f, "{level} level is referenced twice"),
            ConfigRule::MissingLevel(level) => write!(f, "{level} level is not referenced"),
            ConfigRule::UnresolvedBand(level) => write!(f, "{level} band is not in the catalog"),
            ConfigRule::ProportionOutOfRange { level, proportion } => {
                write!(f, "{level} proportion {proportion} is outside 0..=100")
            }
            ConfigRule::ProportionSum { total } => {
                write!(f, "proportions sum to {total}, expected 100")
            }
        }
    }
}

/// A subtheme's difficulty configuration is unusable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("invalid configuration for subtheme {subtheme}: {rule}")]
pub struct ConfigError {
    pub subtheme: SubthemeId,
    pub rule: ConfigRule,
}

impl ConfigError {
    fn new(subtheme: SubthemeId, rule: ConfigRule) -> Self {
        Self { subtheme, rule }
    }
}

/// Checks one subtheme's difficulty configuration.
///
/// # Errors
///
/// Returns the first `ConfigError` found, see [`validated_bands`].
pub fn validate_subtheme(catalog: &ContentCatalog, subtheme: &Subtheme) -> Result<(), ConfigError> {
    validated_bands(catalog, subtheme).map(|_| ())
}

/// Checks a subtheme and hands back its bands, easy to hard.
///
/// Rules run in this order and the first violation wins:
/// 1. every level referenced exactly once,
/// 2. every referenced band present in the catalog,
/// 3. each proportion within 0..=100,
/// 4. proportions summing to exactly 100.
///
/// # Errors
///
/// Returns `ConfigError` naming the subtheme and the broken rule.
pub fn validated_bands<'c>(
    catalog: &'c ContentCatalog,
    subtheme: &Subtheme,
) -> Result<[&'c DifficultyBand; 3], ConfigError> {
    let id = subtheme.id();

    let mut seen = [false; 3];
    for level in subtheme.levels() {
        let slot = &mut seen[level_index(*level)];
        if *slot {
            return Err(ConfigError::new(id, ConfigRule::DuplicateLevel(*level)));
        }
        *slot = true;
    }
    if let Some(missing) = DifficultyLevel::ALL
        .into_iter()
        .find(|level| !seen[level_index(*level)])
    {
        return Err(ConfigError::new(id, ConfigRule::MissingLevel(missing)));
    }

    let resolve = |level: DifficultyLevel| {
        catalog
            .band(id, level)
            .map_err(|_| ConfigError::new(id, ConfigRule::UnresolvedBand(level)))
    };
    let bands = [
        resolve(DifficultyLevel::Easy)?,
        resolve(DifficultyLevel::Medium)?,
        resolve(DifficultyLevel::Hard)?,
    ];

    if let Some(band) = bands.iter().find(|band| band.proportion() > 100) {
        return Err(ConfigError::new(
            id,
            ConfigRule::ProportionOutOfRange {
                level: band.level(),
                proportion: band.proportion(),
            },
        ));
    }

    let total: u32 = bands.iter().map(|band| u32::from(band.proportion())).sum();
    if total != 100 {
        return Err(ConfigError::new(id, ConfigRule::ProportionSum { total }));
    }

    Ok(bands)
}

/// Validates every subtheme in the catalog and returns all failures, ordered
/// by subtheme id.
#[must_use]
pub fn validate_catalog(catalog: &ContentCatalog) -> Vec<ConfigError> {
    catalog
        .subthemes()
        .filter_map(|subtheme| validate_subtheme(catalog, subtheme).err())
        .collect()
}

fn level_index(level: DifficultyLevel) -> usize {
    match level {
        DifficultyLevel::Easy => 0,
        DifficultyLevel::Medium => 1,
        DifficultyLevel::Hard => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogBuilder;
    use crate::model::{Question, QuestionId, ResourceKind, ResourceLocation};

    const SUB: u64 = 1;

    fn sub_id() -> SubthemeId {
        SubthemeId::new(SUB)
    }

    fn catalog_with(
        levels: &[DifficultyLevel],
        bands: &[(DifficultyLevel, u8)],
    ) -> ContentCatalog {
        let mut builder = CatalogBuilder::new();
        builder.add_subtheme(Subtheme::new(sub_id(), "Fractions", levels.iter().copied()));
        for (n, (level, proportion)) in bands.iter().enumerate() {
            let qid = QuestionId::new(n as u64 + 1);
            builder.add_question(
                Question::new(
                    qid,
                    ResourceKind::SimpleText,
                    ResourceLocation::new("q").unwrap(),
                )
                .unwrap(),
            );
            builder.add_band(DifficultyBand::new(sub_id(), *level, [qid], *proportion).unwrap());
        }
        builder.build().unwrap()
    }

    fn full(proportions: [u8; 3]) -> ContentCatalog {
        catalog_with(
            &DifficultyLevel::ALL,
            &[
                (DifficultyLevel::Easy, proportions[0]),
                (DifficultyLevel::Medium, proportions[1]),
                (DifficultyLevel::Hard, proportions[2]),
            ],
        )
    }

    fn check(catalog: &ContentCatalog) -> Result<(), ConfigError> {
        validate_subtheme(catalog, catalog.subtheme(sub_id()).unwrap())
    }

    #[test]
    fn accepts_well_formed_subtheme() {
        assert_eq!(check(&full([50, 30, 20])), Ok(()));
        assert_eq!(check(&full([100, 0, 0])), Ok(()));
    }

    #[test]
    fn validated_bands_are_easy_to_hard() {
        let catalog = full([50, 30, 20]);
        let bands = validated_bands(&catalog, catalog.subtheme(sub_id()).unwrap()).unwrap();
        let levels: Vec<_> = bands.iter().map(|b| b.level()).collect();
        assert_eq!(levels, DifficultyLevel::ALL.to_vec());
    }

    #[test]
    fn rejects_sum_of_99_and_101() {
        assert_eq!(
            check(&full([50, 30, 19])).unwrap_err().rule,
            ConfigRule::ProportionSum { total: 99 }
        );
        assert_eq!(
            check(&full([50, 30, 21])).unwrap_err().rule,
            ConfigRule::ProportionSum { total: 101 }
        );
    }

    #[test]
    fn rejects_duplicate_level_before_anything_else() {
        let catalog = catalog_with(
            &[DifficultyLevel::Easy, DifficultyLevel::Easy, DifficultyLevel::Hard],
            &[(DifficultyLevel::Easy, 200)],
        );
        let err = check(&catalog).unwrap_err();
        assert_eq!(err.subtheme, sub_id());
        assert_eq!(err.rule, ConfigRule::DuplicateLevel(DifficultyLevel::Easy));
    }

    #[test]
    fn rejects_missing_level() {
        let catalog = catalog_with(
            &[DifficultyLevel::Easy, DifficultyLevel::Hard],
            &[(DifficultyLevel::Easy, 50), (DifficultyLevel::Hard, 50)],
        );
        assert_eq!(
            check(&catalog).unwrap_err().rule,
            ConfigRule::MissingLevel(DifficultyLevel::Medium)
        );
    }

    #[test]
    fn rejects_unresolved_band() {
        let catalog = catalog_with(
            &DifficultyLevel::ALL,
            &[(DifficultyLevel::Easy, 50), (DifficultyLevel::Medium, 50)],
        );
        assert_eq!(
            check(&catalog).unwrap_err().rule,
            ConfigRule::UnresolvedBand(DifficultyLevel::Hard)
        );
    }

    #[test]
    fn rejects_out_of_range_proportion() {
        assert_eq!(
            check(&full([0, 150, 0])).unwrap_err().rule,
            ConfigRule::ProportionOutOfRange {
                level: DifficultyLevel::Medium,
                proportion: 150
            }
        );
    }

    #[test]
    fn error_message_names_subtheme_and_rule() {
        let err = check(&full([10, 10, 10])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration for subtheme 1: proportions sum to 30, expected 100"
        );
    }

    #[test]
    fn validate_catalog_collects_every_failure() {
        let mut builder = CatalogBuilder::new();
        builder
            .add_subtheme(Subtheme::with_all_levels(SubthemeId::new(1), "Fractions"))
            .add_subtheme(Subtheme::new(
                SubthemeId::new(2),
                "Decimals",
                [DifficultyLevel::Easy],
            ));
        let catalog = builder.build().unwrap();
        let errors = validate_catalog(&catalog);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].subtheme, SubthemeId::new(1));
        assert_eq!(errors[1].rule, ConfigRule::MissingLevel(DifficultyLevel::Medium));
    }
}
