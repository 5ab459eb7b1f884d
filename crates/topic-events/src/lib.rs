//! Shared topic, bucket and event types for the timeline showcase.
//!
//! This crate contains pure data structures plus document parsing and
//! validation. It has no game logic and is a dependency for every other crate
//! in the workspace.

pub mod bucket;
pub mod catalog;
pub mod document;
pub mod error;
pub mod event;
pub mod topic;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export event types
pub use event::{Event, EventId, ParseEventIdError};

// Re-export bucket types
pub use bucket::{Bucket, BucketId};

// Re-export document types
pub use document::{BucketRecord, EventRecord, TopicDocument};

// Re-export catalog types
pub use catalog::{Catalog, CatalogEntry};

// Re-export topic types
pub use topic::{DocumentIssue, Topic, ValidationMode};

pub use error::LoadError;
