//! Shuffle engine for the guessing game.
//!
//! The random source is always injected, so tests and replays can pass a
//! seeded `SmallRng`.

use rand::Rng;
use std::collections::HashSet;

use topic_events::{Event, Topic};

/// Uniform in-place Fisher–Yates shuffle.
///
/// For `i` from the last index down to 1, swaps slot `i` with a slot chosen
/// uniformly from `0..=i`. Every permutation is equally likely given a
/// uniform source.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Every resolvable event referenced by a bucket, in bucket-then-event order.
///
/// An event listed by several buckets appears once, at its first sighting.
pub fn bucketed_events(topic: &Topic) -> Vec<&Event> {
    let mut seen = HashSet::new();
    topic
        .buckets()
        .iter()
        .flat_map(|bucket| bucket.event_ids.iter())
        .filter(|&&id| seen.insert(id))
        .filter_map(|&id| topic.event(id))
        .collect()
}

/// Returns the topic's bucketed events in a fresh random order.
///
/// Callable any number of times against the same topic; nothing is reloaded.
pub fn shuffle<'a, R: Rng + ?Sized>(topic: &'a Topic, rng: &mut R) -> Vec<&'a Event> {
    let mut events = bucketed_events(topic);
    shuffle_in_place(&mut events, rng);
    events
}
