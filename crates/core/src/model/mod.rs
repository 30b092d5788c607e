mod difficulty;
mod ids;
mod question;
mod repr;
mod subtheme;
mod theme;

pub use difficulty::{BandError, DifficultyBand, DifficultyLevel};
pub use ids::{ParseIdError, QuestionId, SubthemeId, ThemeId};
pub use question::{Question, QuestionError, ResourceKind, ResourceLocation};
pub use subtheme::Subtheme;
pub use theme::Theme;
pub(crate) use theme::name_key;
