//! Event Types
//!
//! A sub-event of a topic: the unit the timeline displays and the ordering
//! game asks the player to place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of an event, unique within one topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl EventId {
    /// Returns the raw integer value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for EventId {
    fn from(value: i64) -> Self {
        EventId(value)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when an event id cannot be parsed from text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseEventIdError {
    input: String,
    source: ParseIntError,
}

impl fmt::Display for ParseEventIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid event id '{}': {}", self.input, self.source)
    }
}

impl std::error::Error for ParseEventIdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl FromStr for EventId {
    type Err = ParseEventIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(EventId)
            .map_err(|source| ParseEventIdError {
                input: s.to_string(),
                source,
            })
    }
}

/// A single sub-event of a topic.
///
/// Immutable once loaded. `date` is free text for display only and never
/// takes part in ordering; ground-truth order comes from buckets alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Atomic facts about the event, in source order.
    #[serde(rename = "C_gold", default, skip_serializing_if = "Vec::is_empty")]
    pub claims: Vec<String>,
}

impl Event {
    /// Creates an event with no summary and no claims.
    pub fn new(id: i64, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: EventId(id),
            title: title.into(),
            date: date.into(),
            summary: None,
            claims: Vec::new(),
        }
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the claims.
    pub fn with_claims(mut self, claims: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.claims = claims.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if the event carries at least one claim.
    pub fn has_claims(&self) -> bool {
        !self.claims.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_id_parse() {
        assert_eq!("42".parse::<EventId>().unwrap(), EventId(42));
        assert_eq!(" 7 ".parse::<EventId>().unwrap(), EventId(7));
        assert!("abc".parse::<EventId>().is_err());
    }

    #[test]
    fn test_event_id_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&EventId(12)).unwrap(), "12");
        assert_eq!(serde_json::from_str::<EventId>("12").unwrap(), EventId(12));
    }

    #[test]
    fn test_event_builder() {
        let event = Event::new(3, "Launch", "1969-07-16")
            .with_summary("Saturn V lifts off")
            .with_claims(["Crew of three", "Launched from LC-39A"]);

        assert_eq!(event.id, EventId(3));
        assert_eq!(event.summary.as_deref(), Some("Saturn V lifts off"));
        assert_eq!(event.claims.len(), 2);
        assert!(event.has_claims());
    }

    #[test]
    fn test_event_serializes_claims_as_c_gold() {
        let event = Event::new(1, "Launch", "1969").with_claims(["fact"]);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""C_gold":["fact"]"#));
        assert!(!json.contains("summary"));
    }
}
