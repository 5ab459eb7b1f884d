//! Errors raised while materialising topics and catalogs.

use std::path::PathBuf;
use thiserror::Error;

use crate::bucket::BucketId;
use crate::event::EventId;

/// A topic or catalog document could not be turned into a usable value.
///
/// A topic is either fully materialised or its load fails with one of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document is missing the `{0}` field")]
    MissingField(&'static str),

    #[error("event at position {index} has neither `id` nor `event_id`")]
    MissingEventId { index: usize },

    #[error("bucket {bucket} references unknown event {event_id}")]
    UnresolvedEvent { bucket: BucketId, event_id: EventId },

    #[error("event {event_id} is assigned to bucket {first} and again to bucket {second}")]
    DuplicateAssignment {
        event_id: EventId,
        first: BucketId,
        second: BucketId,
    },

    #[error("event id {0} is used by more than one event")]
    DuplicateEvent(EventId),
}

impl LoadError {
    /// Wraps an IO error with the path that was being read.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}
