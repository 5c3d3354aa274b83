//! Tag normalization.
//!
//! The service is loose about the `tags` field: older posts carry a single
//! comma-separated string, newer ones a JSON array. Everything funnels
//! through [`normalize`] so the rest of the crate only ever sees trimmed,
//! non-empty tags in arrival order.

use serde::{Deserialize, Deserializer};

/// Trims entries and drops the empty ones, preserving order.
pub fn normalize<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|tag| {
            let trimmed = tag.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

/// Deserializes a tags field that is either a sequence of strings or one
/// comma-separated string.
pub(crate) fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TagsField {
        Seq(Vec<String>),
        Csv(String),
    }

    match TagsField::deserialize(deserializer)? {
        TagsField::Seq(items) => Ok(normalize(items)),
        TagsField::Csv(csv) => Ok(normalize(csv.split(','))),
    }
}
