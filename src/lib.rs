//! MoodMate core — entry reconciliation and analytics for a daily mood log.
//!
//! The crate owns three things: the [`store::EntryStore`] working set (one
//! entry per calendar date, local cache fan-out, fire-and-forget remote
//! sync), the [`sync::HttpMoodApi`] adapter that isolates the store from the
//! remote wire format, and the pure [`analytics`] functions that turn an
//! entry snapshot into chart-ready aggregates.
//!
//! Transport routes, credential issuance and rendering live outside this
//! crate; the core only ever sees an opaque bearer token and a base URL.

pub mod analytics;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod sync;

pub use cache::{EntryCache, JsonFileCache};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use models::entry::{emoji_for, EntryDraft, MoodEntry, MOOD_VOCABULARY};
pub use models::remote::{CreateMoodBody, RemoteAck, RemoteMoodRecord};
pub use store::{Clock, EntryStore, SyncEvent, SystemClock};
pub use sync::{HttpMoodApi, MoodApi};
