use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Label set the logging UI offers, paired with its glyph. Advisory only:
/// the store never rejects a label outside this set.
pub const MOOD_VOCABULARY: &[(&str, &str)] = &[
    ("happy", "😊"),
    ("excited", "🤩"),
    ("calm", "😌"),
    ("grateful", "🙏"),
    ("loved", "🥰"),
    ("neutral", "😐"),
    ("tired", "😴"),
    ("stressed", "😰"),
    ("anxious", "😟"),
    ("sad", "😢"),
    ("angry", "😠"),
    ("lonely", "😔"),
];

pub fn emoji_for(mood: &str) -> Option<&'static str> {
    MOOD_VOCABULARY
        .iter()
        .find(|(name, _)| *name == mood)
        .map(|(_, emoji)| *emoji)
}

/// One logged mood. Field names serialize in camelCase so the cache blob
/// stays compatible with the historical on-disk format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    /// Opaque id, unique within the store. Locally created entries carry a
    /// creation-epoch-ms derived string until a hydrate swaps in the remote
    /// store's canonical id.
    pub id: String,
    /// Calendar date, the partition key for the one-entry-per-day invariant.
    pub date: NaiveDate,
    pub mood: String,
    /// May be empty when the entry was hydrated from the remote shape,
    /// which does not carry a glyph.
    pub mood_emoji: String,
    /// In [1,10] for entries created through the mutator. Hydrated entries
    /// get a midpoint default and are not re-validated.
    pub intensity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation instant, epoch milliseconds. Derived from the stored date
    /// for hydrated entries.
    pub timestamp: i64,
}

/// Mutator input for [`crate::store::EntryStore::add`].
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    #[validate(length(min = 1, message = "Mood is required"))]
    pub mood: String,
    #[serde(default)]
    pub mood_emoji: String,
    #[validate(range(min = 1, max = 10, message = "Intensity must be between 1 and 10"))]
    pub intensity: i32,
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to the current calendar date in the user's local timezone.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}
