use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::entry::MoodEntry;

/// Intensity assigned to entries hydrated from the remote shape, which does
/// not model intensity at all.
pub const DEFAULT_REMOTE_INTENSITY: i32 = 5;

/// Document shape returned by `GET /mood`. The remote store uses a different
/// field set than [`MoodEntry`]; [`RemoteMoodRecord::into_entry`] is the only
/// bridge between the two.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteMoodRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub mood: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Stored date as the remote renders it (full datetime in practice).
    pub date: String,
}

/// Acknowledgment body of `POST /mood` and `DELETE /mood/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAck {
    #[serde(default)]
    pub message: String,
}

/// Wire body for `POST /mood`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateMoodBody {
    pub mood: String,
    pub description: String,
    pub date: NaiveDate,
}

impl RemoteMoodRecord {
    /// Total, lossy normalization into the internal entry shape: the glyph
    /// is not recoverable and the remote carries no intensity, so hydrated
    /// entries get an empty emoji and the midpoint intensity. Callers of
    /// hydrate treat this degradation as known behavior.
    pub fn into_entry(self) -> MoodEntry {
        let (date, timestamp) = parse_stored_date(&self.date);
        MoodEntry {
            id: self.id,
            date,
            mood: self.mood,
            mood_emoji: String::new(),
            intensity: DEFAULT_REMOTE_INTENSITY,
            notes: self.description,
            timestamp,
        }
    }
}

/// Never fails: RFC 3339 first (what the remote actually emits), bare
/// `YYYY-MM-DD` as a fallback, epoch origin if neither parses.
fn parse_stored_date(raw: &str) -> (NaiveDate, i64) {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        let utc = dt.with_timezone(&Utc);
        return (utc.date_naive(), utc.timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let millis = date
            .and_hms_opt(0, 0, 0)
            .map(|t| t.and_utc().timestamp_millis())
            .unwrap_or(0);
        return (date, millis);
    }
    tracing::warn!(raw, "Unparseable stored date in remote record");
    (NaiveDate::default(), 0)
}
