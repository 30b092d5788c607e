use crate::model::ids::{SubthemeId, ThemeId};

/// Root of the catalog hierarchy. Holds subtheme ids in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    id: ThemeId,
    name: String,
    subthemes: Vec<SubthemeId>,
}

impl Theme {
    #[must_use]
    pub fn new(
        id: ThemeId,
        name: impl Into<String>,
        subthemes: impl IntoIterator<Item = SubthemeId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            subthemes: subthemes.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ThemeId {
        self.id
    }

    /// Display name, as configured.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key used for name lookups: trimmed and lowercased.
    #[must_use]
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }

    #[must_use]
    pub fn subthemes(&self) -> &[SubthemeId] {
        &self.subthemes
    }

    #[must_use]
    pub fn contains(&self, subtheme: SubthemeId) -> bool {
        self.subthemes.contains(&subtheme)
    }
}

pub(crate) fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_key_ignores_case_and_padding() {
        let theme = Theme::new(ThemeId::new(1), "  World History ", [SubthemeId::new(2)]);
        assert_eq!(theme.name(), "  World History ");
        assert_eq!(theme.name_key(), "world history");
    }
}
