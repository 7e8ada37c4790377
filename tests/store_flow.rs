//! End-to-end store scenarios: mutate, reconcile with the remote store,
//! read back through the analytics engine.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use tokio::sync::broadcast;

use moodmate_core::{
    analytics, Clock, CoreResult, EntryCache, EntryDraft, EntryStore, MoodApi, MoodEntry,
    CreateMoodBody, RemoteAck, RemoteMoodRecord, SyncEvent,
};

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Default)]
struct MemoryCache {
    stored: Mutex<Option<Vec<MoodEntry>>>,
}

#[async_trait]
impl EntryCache for MemoryCache {
    async fn load(&self) -> CoreResult<Option<Vec<MoodEntry>>> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn store(&self, entries: &[MoodEntry]) -> CoreResult<()> {
        *self.stored.lock().unwrap() = Some(entries.to_vec());
        Ok(())
    }
}

/// Remote store stand-in that assigns canonical ids on create and serves
/// them back on list, like the real API does across a hydrate.
#[derive(Default)]
struct FakeRemote {
    records: Mutex<Vec<RemoteMoodRecord>>,
    reject_creates: bool,
}

#[async_trait]
impl MoodApi for FakeRemote {
    async fn create(&self, body: CreateMoodBody, _token: Option<&str>) -> CoreResult<RemoteAck> {
        if self.reject_creates {
            return Err(moodmate_core::CoreError::Remote {
                status: 401,
                message: "Not authorized".into(),
            });
        }
        let mut records = self.records.lock().unwrap();
        let id = format!("remote-{}", records.len() + 1);
        records.push(RemoteMoodRecord {
            id,
            mood: body.mood,
            description: Some(body.description),
            date: format!("{}T00:00:00.000Z", body.date),
        });
        Ok(RemoteAck {
            message: "Mood added successfully!".into(),
        })
    }

    async fn delete(&self, id: &str, _token: Option<&str>) -> CoreResult<RemoteAck> {
        self.records.lock().unwrap().retain(|r| r.id != id);
        Ok(RemoteAck {
            message: "Mood deleted successfully!".into(),
        })
    }

    async fn list(&self, _token: Option<&str>) -> CoreResult<Vec<RemoteMoodRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }
}

// 2024-01-01T12:00:00Z — a Monday.
fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(
        DateTime::from_timestamp(1_704_110_400, 0).unwrap(),
    ))
}

fn draft(mood: &str, intensity: i32, date: &str) -> EntryDraft {
    EntryDraft {
        mood: mood.into(),
        mood_emoji: String::new(),
        intensity,
        notes: None,
        date: Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()),
    }
}

fn build_store(
    remote: Arc<FakeRemote>,
) -> (EntryStore, broadcast::Receiver<SyncEvent>) {
    let (tx, rx) = broadcast::channel(64);
    let store = EntryStore::new(
        Arc::new(MemoryCache::default()),
        remote,
        Some("t0k3n".into()),
        clock(),
    )
    .with_events(tx);
    (store, rx)
}

#[tokio::test]
async fn same_day_relog_keeps_only_the_last_entry() {
    let (mut store, mut rx) = build_store(Arc::new(FakeRemote::default()));

    store.add(draft("happy", 8, "2024-01-01")).await.unwrap();
    store.add(draft("sad", 3, "2024-01-01")).await.unwrap();
    rx.recv().await.unwrap();
    rx.recv().await.unwrap();

    let today = store.today().expect("today's entry");
    assert_eq!(today.mood, "sad");
    assert_eq!(today.intensity, 3);
    assert_eq!(store.entries().len(), 1);
}

#[tokio::test]
async fn hydrate_swaps_local_ids_for_canonical_ones() {
    let remote = Arc::new(FakeRemote::default());
    let (mut store, mut rx) = build_store(remote.clone());

    let local = store.add(draft("calm", 6, "2024-01-01")).await.unwrap();
    assert!(matches!(rx.recv().await.unwrap(), SyncEvent::Created { .. }));
    assert_eq!(local.id, local.timestamp.to_string());

    store.hydrate().await.unwrap();

    let entries = store.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "remote-1");
    assert_eq!(entries[0].mood, "calm");
    // Known degradation of the remote shape: no glyph, midpoint intensity.
    assert_eq!(entries[0].mood_emoji, "");
    assert_eq!(entries[0].intensity, 5);
}

#[tokio::test]
async fn hydrate_discards_entries_the_remote_never_saw() {
    let remote = Arc::new(FakeRemote {
        records: Mutex::new(vec![RemoteMoodRecord {
            id: "remote-old".into(),
            mood: "tired".into(),
            description: None,
            date: "2023-12-25T00:00:00.000Z".into(),
        }]),
        // The create is rejected, so the new entry stays local-only.
        reject_creates: true,
    });

    let (mut store, mut rx) = build_store(remote);
    store.add(draft("happy", 9, "2024-01-01")).await.unwrap();
    assert!(matches!(
        rx.recv().await.unwrap(),
        SyncEvent::CreateFailed { .. }
    ));
    store.hydrate().await.unwrap();

    let all = store.query(3650);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "remote-old");
}

#[tokio::test]
async fn removed_entry_never_reappears_in_queries() {
    let remote = Arc::new(FakeRemote::default());
    let (mut store, mut rx) = build_store(remote.clone());

    let kept = store.add(draft("happy", 8, "2024-01-01")).await.unwrap();
    let dropped = store.add(draft("sad", 2, "2023-12-31")).await.unwrap();
    rx.recv().await.unwrap();
    rx.recv().await.unwrap();

    store.remove(&dropped.id).await;
    assert!(matches!(rx.recv().await.unwrap(), SyncEvent::Deleted { .. }));

    for days in [1, 7, 30, 3650] {
        assert!(store.query(days).iter().all(|e| e.id != dropped.id));
    }
    assert!(store.query(30).iter().any(|e| e.id == kept.id));
}

#[tokio::test]
async fn analytics_over_store_snapshot() {
    let (mut store, mut rx) = build_store(Arc::new(FakeRemote::default()));

    // 10 happy days then 5 sad days, all within the 30-day window.
    for day in 1..=10 {
        store
            .add(draft("happy", 7, &format!("2023-12-{:02}", day + 10)))
            .await
            .unwrap();
    }
    for day in 28..=31 {
        store
            .add(draft("sad", 3, &format!("2023-12-{day}")))
            .await
            .unwrap();
    }
    store.add(draft("sad", 3, "2024-01-01")).await.unwrap();
    for _ in 0..15 {
        rx.recv().await.unwrap();
    }

    let window = store.query(30);
    assert_eq!(window.len(), 15);

    let distribution = analytics::mood_distribution(&window);
    let dominant = analytics::dominant_mood(&distribution).unwrap();
    assert_eq!(dominant.mood, "happy");
    assert_eq!(dominant.percentage, 66.7);

    // Entries are prepended, so the working set is most-recent-first: the
    // 7 latest are the 5 sad entries plus 2 happy ones, the preceding 7
    // all happy. Recent mean is lower, so the trend declines.
    let facts = analytics::insight_facts(&window, store.entries());
    assert_eq!(facts.trend, Some(analytics::TrendDirection::Declining));

    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let trend = analytics::weekly_trend(store.entries(), today, Weekday::Mon);
    assert_eq!(trend.len(), 7);
    assert!(trend
        .iter()
        .all(|w| (0.0..=10.0).contains(&w.avg_intensity)));
}
