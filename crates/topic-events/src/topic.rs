//! Topic Types
//!
//! A topic is a named set of events partitioned into time buckets. Buckets
//! keep the order they were stored in; only their ids define chronology.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::bucket::{Bucket, BucketId};
use crate::document::TopicDocument;
use crate::error::LoadError;
use crate::event::{Event, EventId};

/// How strictly a document's bucket partition is checked at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Reject documents whose buckets do not partition the events.
    #[default]
    Strict,
    /// Accept them and log each defect. Flattening then skips unknown ids
    /// and the ground-truth index keeps the last assignment it sees.
    Lenient,
}

/// A defect in the bucket partition of a topic.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentIssue {
    /// A bucket lists an id that no event carries.
    UnresolvedEvent { bucket: BucketId, event_id: EventId },
    /// An event id is listed by more than one bucket (or twice by one).
    DuplicateAssignment {
        event_id: EventId,
        first: BucketId,
        second: BucketId,
    },
    /// Two events share an id.
    DuplicateEvent(EventId),
}

impl fmt::Display for DocumentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentIssue::UnresolvedEvent { bucket, event_id } => {
                write!(f, "bucket {} references unknown event {}", bucket, event_id)
            }
            DocumentIssue::DuplicateAssignment {
                event_id,
                first,
                second,
            } => write!(
                f,
                "event {} is assigned to bucket {} and again to bucket {}",
                event_id, first, second
            ),
            DocumentIssue::DuplicateEvent(id) => write!(f, "event id {} is used twice", id),
        }
    }
}

impl From<DocumentIssue> for LoadError {
    fn from(issue: DocumentIssue) -> Self {
        match issue {
            DocumentIssue::UnresolvedEvent { bucket, event_id } => {
                LoadError::UnresolvedEvent { bucket, event_id }
            }
            DocumentIssue::DuplicateAssignment {
                event_id,
                first,
                second,
            } => LoadError::DuplicateAssignment {
                event_id,
                first,
                second,
            },
            DocumentIssue::DuplicateEvent(id) => LoadError::DuplicateEvent(id),
        }
    }
}

/// A fully materialised topic.
#[derive(Debug, Clone)]
pub struct Topic {
    id: String,
    name: String,
    total_count: Option<u64>,
    events: Vec<Event>,
    buckets: Vec<Bucket>,
    /// Event id to position in `events`. The first event with an id wins.
    lookup: HashMap<EventId, usize>,
}

impl Topic {
    /// Builds a topic from parts without checking the bucket partition.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        events: Vec<Event>,
        buckets: Vec<Bucket>,
    ) -> Self {
        let mut lookup = HashMap::with_capacity(events.len());
        for (index, event) in events.iter().enumerate() {
            lookup.entry(event.id).or_insert(index);
        }

        Self {
            id: id.into(),
            name: name.into(),
            total_count: None,
            events,
            buckets,
            lookup,
        }
    }

    /// Sets the declared sub-event count.
    pub fn with_total_count(mut self, total_count: u64) -> Self {
        self.total_count = Some(total_count);
        self
    }

    /// Parses and validates a topic from JSON text.
    pub fn from_json_str(
        id: impl Into<String>,
        json: &str,
        mode: ValidationMode,
    ) -> Result<Self, LoadError> {
        let document = TopicDocument::from_json_str(json)?;
        Self::from_document(id, document, mode)
    }

    /// Converts a raw document into a topic.
    ///
    /// Fails if `events` or `ordered_buckets` is missing or an event has no
    /// id. Under [`ValidationMode::Strict`] the first [`DocumentIssue`] found
    /// also fails the load.
    pub fn from_document(
        id: impl Into<String>,
        document: TopicDocument,
        mode: ValidationMode,
    ) -> Result<Self, LoadError> {
        let id = id.into();
        let records = document.events.ok_or(LoadError::MissingField("events"))?;
        let bucket_records = document
            .ordered_buckets
            .ok_or(LoadError::MissingField("ordered_buckets"))?;

        let events = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let event_id = record
                    .resolved_id()
                    .ok_or(LoadError::MissingEventId { index })?;
                Ok(Event {
                    id: event_id,
                    title: record.title,
                    date: record.date,
                    summary: record.summary,
                    claims: record.claims.unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, LoadError>>()?;
        let buckets = bucket_records.into_iter().map(Bucket::from).collect();

        let name = document.topic.unwrap_or_else(|| id.clone());
        let mut topic = Topic::new(id, name, events, buckets);
        topic.total_count = document.total_count;

        let issues = topic.issues();
        match mode {
            ValidationMode::Strict => {
                if let Some(issue) = issues.into_iter().next() {
                    return Err(issue.into());
                }
            }
            ValidationMode::Lenient => {
                for issue in &issues {
                    tracing::warn!(topic = %topic.id, "Tolerating document defect: {}", issue);
                }
            }
        }

        tracing::debug!(
            topic = %topic.id,
            events = topic.events.len(),
            buckets = topic.buckets.len(),
            "Topic materialised"
        );
        Ok(topic)
    }

    /// Lists every defect in the bucket partition, in bucket iteration order.
    pub fn issues(&self) -> Vec<DocumentIssue> {
        let mut issues = Vec::new();

        let mut seen_events = HashSet::with_capacity(self.events.len());
        for event in &self.events {
            if !seen_events.insert(event.id) {
                issues.push(DocumentIssue::DuplicateEvent(event.id));
            }
        }

        let mut assigned: HashMap<EventId, &BucketId> = HashMap::new();
        for bucket in &self.buckets {
            for &event_id in &bucket.event_ids {
                if !self.lookup.contains_key(&event_id) {
                    issues.push(DocumentIssue::UnresolvedEvent {
                        bucket: bucket.id.clone(),
                        event_id,
                    });
                }
                if let Some(first) = assigned.insert(event_id, &bucket.id) {
                    issues.push(DocumentIssue::DuplicateAssignment {
                        event_id,
                        first: first.clone(),
                        second: bucket.id.clone(),
                    });
                }
            }
        }

        issues
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name; falls back to the topic id when the document has none.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// Sub-event count shown to the user: `total_count` when declared,
    /// otherwise the number of events.
    pub fn display_count(&self) -> u64 {
        self.total_count.unwrap_or(self.events.len() as u64)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Buckets in stored order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Resolves an event id.
    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.lookup.get(&id).map(|&index| &self.events[index])
    }

    /// Returns true if the topic can drive the ordering game.
    pub fn has_game(&self) -> bool {
        !self.buckets.is_empty() && self.events.iter().any(Event::has_claims)
    }

    /// Every claim of every event, in event order.
    pub fn all_claims(&self) -> Vec<&str> {
        self.events
            .iter()
            .flat_map(|e| e.claims.iter().map(String::as_str))
            .collect()
    }
}
