//! Raw topic document shape.
//!
//! Mirrors the on-disk JSON one-to-one. Nothing here is validated; see
//! [`crate::Topic::from_document`] for the checked conversion.
//!
//! ```text
//! { "topic": "...", "total_count": 8,
//!   "events": [{"id": 1, "title": "...", "date": "...", "summary": "...", "C_gold": ["..."]}],
//!   "ordered_buckets": [{"bucket_id": 1, "event_ids": [1, 2]}] }
//! ```

use serde::{Deserialize, Serialize};

use crate::bucket::{Bucket, BucketId};
use crate::error::LoadError;
use crate::event::EventId;

/// A topic document exactly as stored.
///
/// `events` and `ordered_buckets` are optional here so that a missing field
/// can be reported by name instead of as a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<EventRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordered_buckets: Option<Vec<BucketRecord>>,
}

impl TopicDocument {
    /// Parses a document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns true if the document can drive the ordering game: some event
    /// carries a `C_gold` list and the document has `ordered_buckets`.
    pub fn has_game(&self) -> bool {
        let has_claims = self
            .events
            .as_ref()
            .is_some_and(|events| events.iter().any(|e| e.claims.is_some()));
        has_claims && self.ordered_buckets.is_some()
    }
}

/// One event entry. Older documents name the identifier `event_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "C_gold", default, skip_serializing_if = "Option::is_none")]
    pub claims: Option<Vec<String>>,
}

impl EventRecord {
    /// Returns `id`, falling back to `event_id`.
    pub fn resolved_id(&self) -> Option<EventId> {
        self.id.or(self.event_id)
    }
}

/// One bucket entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRecord {
    pub bucket_id: BucketId,
    #[serde(default)]
    pub event_ids: Vec<EventId>,
}

impl From<BucketRecord> for Bucket {
    fn from(record: BucketRecord) -> Self {
        Bucket {
            id: record.bucket_id,
            event_ids: record.event_ids,
        }
    }
}
