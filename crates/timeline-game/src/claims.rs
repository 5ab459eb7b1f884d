//! Random claim sampling for tooltips.

use rand::Rng;

use topic_events::Topic;

use crate::shuffle::shuffle_in_place;

/// Default number of claims shown in a topic tooltip.
pub const DEFAULT_CLAIM_CAP: usize = 12;

/// Returns up to `cap` claims in random order.
pub fn sample_claims<'a, R: Rng + ?Sized>(
    claims: &'a [String],
    cap: usize,
    rng: &mut R,
) -> Vec<&'a str> {
    draw(claims.iter().map(String::as_str).collect(), cap, rng)
}

/// Samples up to `cap` claims drawn from every event of the topic.
pub fn sample_topic_claims<'a, R: Rng + ?Sized>(
    topic: &'a Topic,
    cap: usize,
    rng: &mut R,
) -> Vec<&'a str> {
    draw(topic.all_claims(), cap, rng)
}

fn draw<'a, R: Rng + ?Sized>(mut pool: Vec<&'a str>, cap: usize, rng: &mut R) -> Vec<&'a str> {
    shuffle_in_place(&mut pool, rng);
    pool.truncate(cap);
    pool
}
