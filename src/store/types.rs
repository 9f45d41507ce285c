//! Item records and the request payloads that create or modify them.

use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// Item identifier.
pub type ItemId = u64;

/// A stored item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique id, never reused.
    pub id: ItemId,
    /// Display name. Never empty.
    pub name: String,
    /// Free-text description, empty when not given.
    pub description: String,
    /// Creation time.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Time of the most recent update; absent until the first one.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "time::serde::rfc3339::option"
    )]
    pub updated_at: Option<OffsetDateTime>,
}

/// Body of a create request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewItem {
    /// Required; an empty string counts as missing.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional; missing or null becomes "".
    #[serde(default)]
    pub description: Option<String>,
}

impl NewItem {
    /// Create a payload with a name and no description.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Body of an update request.
///
/// `name` is applied only when non-empty. `description` is applied whenever
/// the key is present, so `""` and `null` both clear it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

impl ItemPatch {
    /// Patch that only replaces the name.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }

    /// Patch that only replaces the description.
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            name: None,
            description: Some(Some(description.into())),
        }
    }

    /// Apply the patch to `item`, stamping `updated_at` with `now`.
    pub fn apply(self, item: &mut Item, now: OffsetDateTime) {
        if let Some(name) = self.name.filter(|n| !n.is_empty()) {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description.unwrap_or_default();
        }
        item.updated_at = Some(now);
    }
}

/// Distinguishes a key sent as `null` (`Some(None)`) from a missing key (`None`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parse a path segment into an id. Only ASCII digits are accepted: no sign,
/// no surrounding whitespace.
pub fn parse_id(raw: &str) -> Option<ItemId> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
