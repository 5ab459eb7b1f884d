//! Bucket Types
//!
//! Buckets partition a topic's events into ground-truth time phases.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::event::EventId;

/// Identifier of a bucket, either an integer or a string.
///
/// Bucket ids define chronology: smaller is earlier. Integers compare
/// numerically and strings lexicographically. When a document mixes both,
/// every integer id sorts before every string id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketId {
    Number(i64),
    Name(String),
}

impl From<i64> for BucketId {
    fn from(value: i64) -> Self {
        BucketId::Number(value)
    }
}

impl From<&str> for BucketId {
    fn from(value: &str) -> Self {
        BucketId::Name(value.to_string())
    }
}

impl From<String> for BucketId {
    fn from(value: String) -> Self {
        BucketId::Name(value)
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketId::Number(n) => write!(f, "{}", n),
            BucketId::Name(s) => write!(f, "{}", s),
        }
    }
}

/// A ground-truth time phase and the events it contains, in stored order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(rename = "bucket_id")]
    pub id: BucketId,
    #[serde(default)]
    pub event_ids: Vec<EventId>,
}

impl Bucket {
    /// Creates a bucket with an integer id holding the given event ids.
    pub fn new(id: i64, event_ids: impl IntoIterator<Item = i64>) -> Self {
        Self::with_id(BucketId::Number(id), event_ids)
    }

    /// Creates a bucket with a string id.
    pub fn named(name: impl Into<String>, event_ids: impl IntoIterator<Item = i64>) -> Self {
        Self::with_id(BucketId::Name(name.into()), event_ids)
    }

    pub fn with_id(id: BucketId, event_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            id,
            event_ids: event_ids.into_iter().map(EventId).collect(),
        }
    }

    /// Returns true if the bucket lists the given event.
    pub fn contains(&self, event_id: EventId) -> bool {
        self.event_ids.contains(&event_id)
    }

    pub fn len(&self) -> usize {
        self.event_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.event_ids.is_empty()
    }
}
