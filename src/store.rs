use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use tokio::sync::broadcast;
use validator::Validate;

use crate::cache::EntryCache;
use crate::error::{CoreError, CoreResult};
use crate::models::entry::{EntryDraft, MoodEntry};
use crate::models::remote::CreateMoodBody;
use crate::sync::MoodApi;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Time source for the store. Injected so "today" is fixed in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date entries are partitioned by.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    // Entries are logged against the user's local calendar day, not UTC.
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Outcome of a fire-and-forget remote call. Mutators commit locally and
/// return before the paired remote call completes; subscribers see the
/// eventual result here (it is also logged).
#[derive(Debug, Clone)]
pub enum SyncEvent {
    Created { id: String },
    CreateFailed { id: String, reason: String },
    Deleted { id: String },
    DeleteFailed { id: String, reason: String },
}

/// Single source of truth for the user's logged moods.
///
/// Owns the in-memory working set, enforces one entry per calendar date,
/// mirrors every change to the local cache, and fans mutations out to the
/// remote store through [`MoodApi`]. Local state is provisional-authoritative:
/// remote failures never roll a mutation back, and [`EntryStore::hydrate`] is
/// the only point where remote state overwrites local state.
pub struct EntryStore {
    entries: Vec<MoodEntry>,
    cache: Arc<dyn EntryCache>,
    api: Arc<dyn MoodApi>,
    token: Option<String>,
    clock: Arc<dyn Clock>,
    events: Option<broadcast::Sender<SyncEvent>>,
}

impl EntryStore {
    pub fn new(
        cache: Arc<dyn EntryCache>,
        api: Arc<dyn MoodApi>,
        token: Option<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            entries: Vec::new(),
            cache,
            api,
            token,
            clock,
            events: None,
        }
    }

    /// Subscribe a broadcast channel to remote sync outcomes.
    pub fn with_events(mut self, events: broadcast::Sender<SyncEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Seed the working set from the local cache. Call once at startup;
    /// absence or unreadable cache leaves the set empty.
    pub async fn load_cached(&mut self) {
        match self.cache.load().await {
            Ok(Some(entries)) => {
                tracing::debug!(count = entries.len(), "Seeded working set from cache");
                self.entries = entries;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read entry cache, starting empty");
            }
        }
    }

    /// Log a mood. Validates the draft, replaces any existing entry for the
    /// same date, persists the set locally, then fires the remote create as
    /// an independent task. The returned entry reflects the local commit
    /// only; the remote outcome arrives later via log/[`SyncEvent`].
    pub async fn add(&mut self, draft: EntryDraft) -> CoreResult<MoodEntry> {
        draft
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let timestamp = self.clock.now().timestamp_millis();
        let entry = MoodEntry {
            id: self.next_local_id(timestamp),
            date: draft.date.unwrap_or_else(|| self.clock.today()),
            mood: draft.mood,
            mood_emoji: draft.mood_emoji,
            intensity: draft.intensity,
            notes: draft.notes,
            timestamp,
        };

        // Replacement, not merge: at most one entry per calendar date.
        self.entries.retain(|e| e.date != entry.date);
        self.entries.insert(0, entry.clone());
        self.persist().await;
        self.spawn_create(entry.clone());

        Ok(entry)
    }

    /// Optimistic removal: the entry leaves the working set immediately and
    /// the remote delete runs as an independent task. No rollback if the
    /// remote call fails — the local removal stands until the next hydrate.
    pub async fn remove(&mut self, id: &str) {
        self.entries.retain(|e| e.id != id);
        self.persist().await;
        self.spawn_delete(id.to_string());
    }

    /// Replace the entire working set with the remote store's view. This is
    /// the authority-reconciliation point: a failed list leaves local state
    /// untouched and propagates the error; a successful one overwrites
    /// everything, including entries whose create never reached the remote.
    pub async fn hydrate(&mut self) -> CoreResult<()> {
        let records = self.api.list(self.token.as_deref()).await?;
        self.entries = records.into_iter().map(|r| r.into_entry()).collect();
        tracing::debug!(count = self.entries.len(), "Hydrated working set from remote store");
        self.persist().await;
        Ok(())
    }

    /// Entries whose timestamp falls within the last `days` days. In-memory
    /// only, no I/O.
    pub fn query(&self, days: i64) -> Vec<MoodEntry> {
        let cutoff = self.clock.now().timestamp_millis() - days.saturating_mul(MILLIS_PER_DAY);
        self.entries
            .iter()
            .filter(|e| e.timestamp >= cutoff)
            .cloned()
            .collect()
    }

    /// The entry logged for the current calendar date, if any.
    pub fn today(&self) -> Option<&MoodEntry> {
        let today = self.clock.today();
        self.entries.iter().find(|e| e.date == today)
    }

    /// Snapshot accessor for the analytics engine.
    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    // Timestamp-derived, but ids must stay unique within the store: two
    // adds in the same millisecond get a counter suffix so a later
    // remove-by-id cannot take out more than one entry.
    fn next_local_id(&self, timestamp: i64) -> String {
        let mut id = timestamp.to_string();
        let mut suffix = 1;
        while self.entries.iter().any(|e| e.id == id) {
            suffix += 1;
            id = format!("{timestamp}-{suffix}");
        }
        id
    }

    // Best-effort: cache failures are logged and never block a mutation.
    async fn persist(&self) {
        if let Err(e) = self.cache.store(&self.entries).await {
            tracing::warn!(error = %e, "Failed to persist entry cache");
        }
    }

    fn spawn_create(&self, entry: MoodEntry) {
        let api = Arc::clone(&self.api);
        let token = self.token.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let body = CreateMoodBody {
                mood: entry.mood.clone(),
                description: entry.notes.clone().unwrap_or_default(),
                date: entry.date,
            };
            let event = match api.create(body, token.as_deref()).await {
                Ok(ack) => {
                    tracing::debug!(id = %entry.id, message = %ack.message, "Mood entry synced to remote store");
                    SyncEvent::Created { id: entry.id }
                }
                Err(e) => {
                    tracing::warn!(id = %entry.id, error = %e, "Failed to sync mood entry, keeping local state");
                    SyncEvent::CreateFailed {
                        id: entry.id,
                        reason: e.to_string(),
                    }
                }
            };
            if let Some(tx) = events {
                let _ = tx.send(event);
            }
        });
    }

    fn spawn_delete(&self, id: String) {
        let api = Arc::clone(&self.api);
        let token = self.token.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let event = match api.delete(&id, token.as_deref()).await {
                Ok(ack) => {
                    tracing::debug!(id = %id, message = %ack.message, "Mood entry deleted from remote store");
                    SyncEvent::Deleted { id }
                }
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Failed to delete mood entry remotely, local removal stands");
                    SyncEvent::DeleteFailed {
                        id,
                        reason: e.to_string(),
                    }
                }
            };
            if let Some(tx) = events {
                let _ = tx.send(event);
            }
        });
    }
}
