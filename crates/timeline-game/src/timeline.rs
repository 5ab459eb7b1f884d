//! Timeline flattening.
//!
//! Projects a topic's bucket/event graph onto one display sequence. Buckets
//! are walked in stored order (not sorted by id) and events within a bucket
//! in stored order.

use topic_events::{Bucket, BucketId, Event, Topic};

/// One row of the flattened timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineEntry<'a> {
    pub event: &'a Event,
    pub bucket_id: &'a BucketId,
    /// Zero-based position among the emitted entries.
    pub position: usize,
}

/// Lazy iterator over a topic's timeline.
///
/// Cloning yields an independent iterator from the same point, so a render
/// can restart by keeping a clone of a fresh `Timeline`.
#[derive(Debug, Clone)]
pub struct Timeline<'a> {
    topic: &'a Topic,
    buckets: std::slice::Iter<'a, Bucket>,
    current: Option<(&'a BucketId, std::slice::Iter<'a, topic_events::EventId>)>,
    emitted: usize,
}

/// Flattens a topic into `(event, bucket)` entries.
///
/// Bucket entries whose event id does not resolve are skipped.
pub fn flatten(topic: &Topic) -> Timeline<'_> {
    Timeline {
        topic,
        buckets: topic.buckets().iter(),
        current: None,
        emitted: 0,
    }
}

impl<'a> Iterator for Timeline<'a> {
    type Item = TimelineEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((bucket_id, ids)) = self.current.as_mut() {
                let bucket_id: &'a BucketId = *bucket_id;
                for &event_id in ids.by_ref() {
                    match self.topic.event(event_id) {
                        Some(event) => {
                            let entry = TimelineEntry {
                                event,
                                bucket_id,
                                position: self.emitted,
                            };
                            self.emitted += 1;
                            return Some(entry);
                        }
                        None => {
                            tracing::debug!(
                                topic = self.topic.id(),
                                bucket = %bucket_id,
                                event_id = %event_id,
                                "Skipping unresolved event in timeline"
                            );
                        }
                    }
                }
            }

            let bucket = self.buckets.next()?;
            self.current = Some((&bucket.id, bucket.event_ids.iter()));
        }
    }
}
