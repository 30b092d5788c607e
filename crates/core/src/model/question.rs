use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

use crate::model::ids::QuestionId;
use crate::model::repr::CodeOrName;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id must be a positive integer")]
    NonPositiveId,

    #[error("resource location cannot be empty")]
    EmptyLocation,

    #[error("unknown resource kind code: {0}")]
    UnknownResourceKind(u8),

    #[error("unknown resource kind: {0:?}")]
    UnknownResourceKindName(String),
}

//
// ─── RESOURCE KIND ─────────────────────────────────────────────────────────────
//

/// How the question's resource has to be presented.
///
/// Serialized by name; configuration may also give the numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "CodeOrName")]
pub enum ResourceKind {
    SimpleText,
    RichText,
    Multimedia,
    Interactive,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::SimpleText,
        ResourceKind::RichText,
        ResourceKind::Multimedia,
        ResourceKind::Interactive,
    ];

    /// Stable numeric code used by configuration sources (1..=4).
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            ResourceKind::SimpleText => 1,
            ResourceKind::RichText => 2,
            ResourceKind::Multimedia => 3,
            ResourceKind::Interactive => 4,
        }
    }

    /// # Errors
    ///
    /// Returns `QuestionError::UnknownResourceKind` for codes outside 1..=4.
    pub fn from_code(code: u8) -> Result<Self, QuestionError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code() == code)
            .ok_or(QuestionError::UnknownResourceKind(code))
    }

    /// # Errors
    ///
    /// Returns `QuestionError::UnknownResourceKindName` for names other than
    /// the kebab-case kind names.
    pub fn from_name(name: &str) -> Result<Self, QuestionError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| QuestionError::UnknownResourceKindName(name.to_owned()))
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::SimpleText => "simple-text",
            ResourceKind::RichText => "rich-text",
            ResourceKind::Multimedia => "multimedia",
            ResourceKind::Interactive => "interactive",
        }
    }
}

impl TryFrom<CodeOrName> for ResourceKind {
    type Error = QuestionError;

    fn try_from(value: CodeOrName) -> Result<Self, Self::Error> {
        match value {
            CodeOrName::Code(code) => Self::from_code(code),
            CodeOrName::Name(name) => Self::from_name(&name),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── RESOURCE LOCATION ─────────────────────────────────────────────────────────
//

/// Opaque reference to where a question's resource lives.
///
/// Usually a URI, but relative paths and other schemes are kept verbatim,
/// surrounding whitespace included. The catalog never dereferences it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceLocation(String);

impl ResourceLocation {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyLocation` for empty or whitespace-only input.
    pub fn new(raw: impl Into<String>) -> Result<Self, QuestionError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(QuestionError::EmptyLocation);
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the location as an absolute URL, if it is one.
    #[must_use]
    pub fn as_url(&self) -> Option<Url> {
        Url::parse(&self.0).ok()
    }
}

impl TryFrom<String> for ResourceLocation {
    type Error = QuestionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ResourceLocation> for String {
    fn from(value: ResourceLocation) -> Self {
        value.0
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Immutable description of one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    resource_kind: ResourceKind,
    location: ResourceLocation,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError::NonPositiveId` when `id` is zero.
    pub fn new(
        id: QuestionId,
        resource_kind: ResourceKind,
        location: ResourceLocation,
    ) -> Result<Self, QuestionError> {
        if !id.is_positive() {
            return Err(QuestionError::NonPositiveId);
        }
        Ok(Self {
            id,
            resource_kind,
            location,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn resource_kind(&self) -> ResourceKind {
        self.resource_kind
    }

    #[must_use]
    pub fn location(&self) -> &ResourceLocation {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(raw: &str) -> ResourceLocation {
        ResourceLocation::new(raw).unwrap()
    }

    #[test]
    fn resource_kind_codes_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_code(kind.code()).unwrap(), kind);
        }
        assert_eq!(
            ResourceKind::from_code(0),
            Err(QuestionError::UnknownResourceKind(0))
        );
        assert_eq!(
            ResourceKind::from_code(5),
            Err(QuestionError::UnknownResourceKind(5))
        );
    }

    #[test]
    fn resource_kind_uses_kebab_case_names() {
        let json = serde_json::to_string(&ResourceKind::SimpleText).unwrap();
        assert_eq!(json, "\"simple-text\"");
        let kind: ResourceKind = serde_json::from_str("\"interactive\"").unwrap();
        assert_eq!(kind, ResourceKind::Interactive);
    }

    #[test]
    fn resource_kind_accepts_numeric_codes() {
        let kind: ResourceKind = serde_json::from_str("3").unwrap();
        assert_eq!(kind, ResourceKind::Multimedia);
        assert!(serde_json::from_str::<ResourceKind>("0").is_err());
        assert!(serde_json::from_str::<ResourceKind>("\"hologram\"").is_err());
    }

    #[test]
    fn location_rejects_blank_input() {
        assert_eq!(ResourceLocation::new("   "), Err(QuestionError::EmptyLocation));
        assert!(serde_json::from_str::<ResourceLocation>("\"\"").is_err());
    }

    #[test]
    fn location_is_kept_verbatim() {
        assert_eq!(location(" q ").as_str(), " q ");
        let parsed: ResourceLocation = serde_json::from_str("\" q \"").unwrap();
        assert_eq!(parsed.as_str(), " q ");
    }

    #[test]
    fn location_exposes_url_when_absolute() {
        let loc = location("https://cdn.example.org/q/1.png");
        assert_eq!(loc.as_url().unwrap().host_str(), Some("cdn.example.org"));
        assert!(location("files/q1.md").as_url().is_none());
    }

    #[test]
    fn question_rejects_zero_id() {
        let err = Question::new(QuestionId::new(0), ResourceKind::RichText, location("a"))
            .unwrap_err();
        assert_eq!(err, QuestionError::NonPositiveId);
    }

    #[test]
    fn question_accessors() {
        let q = Question::new(QuestionId::new(3), ResourceKind::Multimedia, location("v.mp4"))
            .unwrap();
        assert_eq!(q.id(), QuestionId::new(3));
        assert_eq!(q.resource_kind(), ResourceKind::Multimedia);
        assert_eq!(q.location().as_str(), "v.mp4");
    }
}
