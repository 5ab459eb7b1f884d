//! Sample data fixtures for testing.
//!
//! This module provides ready-made topics for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // topic-events = { path = "../topic-events", features = ["test-fixtures"] }
//!
//! use topic_events::fixtures;
//!
//! let topic = fixtures::sample_topic();
//! ```

use crate::{Catalog, Topic, ValidationMode};

/// Apollo 11 topic.
///
/// Contains 8 events over 4 numbered buckets:
/// - bucket 1: 101, 102
/// - bucket 2: 103
/// - bucket 3: 104 (stored with `event_id`), 105, 106
/// - bucket 4: 107 (no claims), 108 (empty claims)
pub fn sample_topic() -> Topic {
    let json = include_str!("../tests/fixtures/sample_topic.json");
    Topic::from_json_str("apollo", json, ValidationMode::Strict)
        .expect("Failed to parse sample_topic.json")
}

/// Four events e1..e4 with buckets 1, 1, 2, 3.
pub fn scenario_topic() -> Topic {
    let json = include_str!("../tests/fixtures/scenario_topic.json");
    Topic::from_json_str("scenario", json, ValidationMode::Strict)
        .expect("Failed to parse scenario_topic.json")
}

/// Three events in one string-named bucket.
pub fn single_bucket_topic() -> Topic {
    let json = include_str!("../tests/fixtures/single_bucket_topic.json");
    Topic::from_json_str("single", json, ValidationMode::Strict)
        .expect("Failed to parse single_bucket_topic.json")
}

/// Catalog pointing at the three topics above, in bare-array form.
pub fn sample_catalog() -> Catalog {
    let json = include_str!("../tests/fixtures/catalog.json");
    Catalog::from_json_str(json).expect("Failed to parse catalog.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BucketId, EventId};

    #[test]
    fn test_sample_topic_load() {
        let topic = sample_topic();

        assert_eq!(topic.name(), "Apollo 11 Lunar Landing");
        assert_eq!(topic.events().len(), 8);
        assert_eq!(topic.bucket_count(), 4);
        assert_eq!(topic.display_count(), 8);
        assert!(topic.has_game());
    }

    #[test]
    fn test_sample_topic_resolves_event_id_alias() {
        let topic = sample_topic();
        let orbit = topic.event(EventId(104)).unwrap();
        assert_eq!(orbit.title, "Lunar orbit insertion");
    }

    #[test]
    fn test_scenario_topic_load() {
        let topic = scenario_topic();
        assert_eq!(topic.events().len(), 4);
        assert_eq!(topic.buckets()[0].event_ids, vec![EventId(1), EventId(2)]);
    }

    #[test]
    fn test_single_bucket_topic_load() {
        let topic = single_bucket_topic();
        assert_eq!(topic.bucket_count(), 1);
        assert_eq!(topic.buckets()[0].id, BucketId::Name("all".to_string()));
    }

    #[test]
    fn test_sample_catalog_load() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.entries()[0].file, "apollo/new_event.json");
    }
}
