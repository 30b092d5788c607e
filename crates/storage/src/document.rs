//! Serde shape of the static catalog configuration.
//!
//! Records mirror the domain types with raw ids so configuration files stay
//! flat; [`CatalogDocument::into_catalog`] runs every domain check on the way in.

use quiz_core::model::{
    DifficultyBand, DifficultyLevel, Question, QuestionId, ResourceKind, ResourceLocation,
    Subtheme, SubthemeId, Theme, ThemeId,
};
use quiz_core::{CatalogBuilder, ContentCatalog};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
    #[serde(default)]
    pub subthemes: Vec<SubthemeRecord>,
    #[serde(default)]
    pub themes: Vec<ThemeRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: u64,
    pub resource_kind: ResourceKind,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandRecord {
    pub level: DifficultyLevel,
    pub proportion: u8,
    #[serde(default)]
    pub questions: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubthemeRecord {
    pub id: u64,
    pub name: String,
    /// Referenced levels. When omitted, the levels of `bands` are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<DifficultyLevel>>,
    #[serde(default)]
    pub bands: Vec<BandRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub subthemes: Vec<u64>,
}

impl CatalogDocument {
    /// Convert the document into a frozen catalog.
    ///
    /// # Errors
    ///
    /// Returns `quiz_core::Error` if a record fails domain validation or the
    /// catalog breaks referential integrity.
    pub fn into_catalog(self) -> Result<ContentCatalog, quiz_core::Error> {
        let mut builder = CatalogBuilder::new();

        for record in self.questions {
            let location = ResourceLocation::new(record.location)?;
            builder.add_question(Question::new(
                QuestionId::new(record.id),
                record.resource_kind,
                location,
            )?);
        }

        for record in self.subthemes {
            let id = SubthemeId::new(record.id);
            let levels = record
                .levels
                .unwrap_or_else(|| record.bands.iter().map(|band| band.level).collect());
            builder.add_subtheme(Subtheme::new(id, record.name, levels));
            for band in record.bands {
                builder.add_band(DifficultyBand::new(
                    id,
                    band.level,
                    band.questions.into_iter().map(QuestionId::new),
                    band.proportion,
                )?);
            }
        }

        for record in self.themes {
            builder.add_theme(Theme::new(
                ThemeId::new(record.id),
                record.name,
                record.subthemes.into_iter().map(SubthemeId::new),
            ));
        }

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionError;
    use quiz_core::{CatalogError, Error};

    const SAMPLE: &str = r#"{
        "questions": [
            { "id": 1, "resource_kind": "simple-text", "location": "q/1.txt" },
            { "id": 2, "resource_kind": "rich-text", "location": "q/2.md" },
            { "id": 3, "resource_kind": "multimedia", "location": "https://cdn.example.org/3.mp4" }
        ],
        "subthemes": [
            {
                "id": 10,
                "name": "Rivers",
                "bands": [
                    { "level": "easy", "proportion": 50, "questions": [1] },
                    { "level": "medium", "proportion": 30, "questions": [2] },
                    { "level": "hard", "proportion": 20, "questions": [3] }
                ]
            }
        ],
        "themes": [ { "id": 1, "name": "Geography", "subthemes": [10] } ]
    }"#;

    #[test]
    fn parses_and_builds_catalog() {
        let doc: CatalogDocument = serde_json::from_str(SAMPLE).unwrap();
        let catalog = doc.into_catalog().unwrap();
        let sub = catalog.subtheme(SubthemeId::new(10)).unwrap();
        assert_eq!(sub.levels(), DifficultyLevel::ALL.as_slice());
        assert_eq!(
            catalog
                .band(SubthemeId::new(10), DifficultyLevel::Hard)
                .unwrap()
                .proportion(),
            20
        );
        assert_eq!(
            catalog.question(QuestionId::new(3)).unwrap().resource_kind(),
            ResourceKind::Multimedia
        );
    }

    #[test]
    fn explicit_levels_override_band_levels() {
        let mut doc: CatalogDocument = serde_json::from_str(SAMPLE).unwrap();
        doc.subthemes[0].levels = Some(vec![DifficultyLevel::Easy]);
        let catalog = doc.into_catalog().unwrap();
        assert_eq!(
            catalog.subtheme(SubthemeId::new(10)).unwrap().levels(),
            &[DifficultyLevel::Easy]
        );
    }

    #[test]
    fn blank_location_is_rejected() {
        let mut doc: CatalogDocument = serde_json::from_str(SAMPLE).unwrap();
        doc.questions[0].location = "  ".into();
        assert!(matches!(
            doc.into_catalog().unwrap_err(),
            Error::Question(QuestionError::EmptyLocation)
        ));
    }

    #[test]
    fn dangling_theme_reference_is_rejected() {
        let mut doc: CatalogDocument = serde_json::from_str(SAMPLE).unwrap();
        doc.themes[0].subthemes.push(99);
        assert!(matches!(
            doc.into_catalog().unwrap_err(),
            Error::Catalog(CatalogError::UnknownSubtheme { .. })
        ));
    }

    #[test]
    fn numeric_codes_load_like_names() {
        let raw = r#"{
            "questions": [
                { "id": 1, "resource_kind": 1, "location": "q/1.txt" },
                { "id": 2, "resource_kind": 4, "location": "apps/2" },
                { "id": 3, "resource_kind": "multimedia", "location": "q/3.mp4" }
            ],
            "subthemes": [
                {
                    "id": 10,
                    "name": "Rivers",
                    "levels": [1, 2, 3],
                    "bands": [
                        { "level": 1, "proportion": 50, "questions": [1] },
                        { "level": 2, "proportion": 30, "questions": [2] },
                        { "level": "hard", "proportion": 20, "questions": [3] }
                    ]
                }
            ],
            "themes": [ { "id": 1, "name": "Geography", "subthemes": [10] } ]
        }"#;
        let doc: CatalogDocument = serde_json::from_str(raw).unwrap();
        let catalog = doc.into_catalog().unwrap();
        assert_eq!(
            catalog.question(QuestionId::new(2)).unwrap().resource_kind(),
            ResourceKind::Interactive
        );
        assert_eq!(
            catalog
                .band(SubthemeId::new(10), DifficultyLevel::Medium)
                .unwrap()
                .proportion(),
            30
        );
        assert!(quiz_core::validation::validate_catalog(&catalog).is_empty());
    }

    #[test]
    fn unknown_level_code_fails_to_parse() {
        let raw = SAMPLE.replace("\"level\": \"medium\"", "\"level\": 7");
        assert!(serde_json::from_str::<CatalogDocument>(&raw).is_err());
    }

    #[test]
    fn names_reach_the_catalog() {
        let doc: CatalogDocument = serde_json::from_str(SAMPLE).unwrap();
        let catalog = doc.into_catalog().unwrap();
        assert_eq!(catalog.theme_by_name("geography").unwrap().id(), ThemeId::new(1));
        assert_eq!(catalog.subtheme(SubthemeId::new(10)).unwrap().name(), "Rivers");
    }

    #[test]
    fn unknown_resource_kind_fails_to_parse() {
        let raw = SAMPLE.replace("rich-text", "hologram");
        assert!(serde_json::from_str::<CatalogDocument>(&raw).is_err());
    }
}
