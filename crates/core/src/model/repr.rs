use serde::Deserialize;

/// Configuration shape for enums that accept either their numeric code or
/// their name, e.g. `2` or `"medium"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum CodeOrName {
    Code(u8),
    Name(String),
}
