//! Game session: one play-through of the ordering game for a topic.
//!
//! A session is an explicit value owned by whoever drives the UI. It borrows
//! the topic, owns the ground-truth index, the live permutation and its
//! random source, and is dropped when the game closes.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

use topic_events::{Event, EventId, Topic};

use crate::ground_truth::GroundTruth;
use crate::scorer::{score_detailed, score_order, PoScore, ScoreReport};
use crate::shuffle::{bucketed_events, shuffle_in_place};

/// Errors raised by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("submitted order is not a permutation of the {expected} session events")]
    NotAPermutation { expected: usize },

    #[error("position {position} is out of range for {len} events")]
    PositionOutOfRange { position: usize, len: usize },
}

/// What a finished session leaves behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub topic_id: String,
    pub event_count: usize,
    pub final_order: Vec<EventId>,
    pub last_score: Option<PoScore>,
    pub checks: u32,
    pub reshuffles: u32,
}

/// State of one ordering game.
#[derive(Debug)]
pub struct GameSession<'t, R = SmallRng> {
    id: Uuid,
    topic: &'t Topic,
    truth: GroundTruth,
    order: Vec<EventId>,
    rng: R,
    last_score: Option<PoScore>,
    checks: u32,
    reshuffles: u32,
}

impl<'t> GameSession<'t, SmallRng> {
    /// Starts a session with a generator seeded from the given value.
    pub fn seeded(topic: &'t Topic, seed: u64) -> Self {
        Self::start(topic, SmallRng::seed_from_u64(seed))
    }

    /// Starts a session with a generator seeded from OS entropy.
    pub fn from_entropy(topic: &'t Topic) -> Self {
        Self::start(topic, SmallRng::from_entropy())
    }
}

impl<'t, R: Rng> GameSession<'t, R> {
    /// Builds the ground-truth index and deals the first shuffled order.
    pub fn start(topic: &'t Topic, mut rng: R) -> Self {
        let truth = GroundTruth::build(topic);
        let mut order: Vec<EventId> = bucketed_events(topic).iter().map(|e| e.id).collect();
        shuffle_in_place(&mut order, &mut rng);

        let id = Uuid::new_v4();
        tracing::info!(
            session = %id,
            topic = topic.id(),
            events = order.len(),
            "Game session started"
        );

        Self {
            id,
            topic,
            truth,
            order,
            rng,
            last_score: None,
            checks: 0,
            reshuffles: 0,
        }
    }

    /// Deals a fresh random order of the same events and clears the last
    /// score.
    pub fn reshuffle(&mut self) {
        shuffle_in_place(&mut self.order, &mut self.rng);
        self.last_score = None;
        self.reshuffles += 1;
        tracing::debug!(session = %self.id, reshuffles = self.reshuffles, "Reshuffled");
    }

    /// Applies one drag: removes the event at `from` and reinserts it at `to`.
    pub fn move_event(&mut self, from: usize, to: usize) -> Result<(), SessionError> {
        let len = self.order.len();
        for position in [from, to] {
            if position >= len {
                return Err(SessionError::PositionOutOfRange { position, len });
            }
        }

        let event_id = self.order.remove(from);
        self.order.insert(to, event_id);
        Ok(())
    }

    /// Replaces the current order with one supplied by the UI.
    ///
    /// The order must contain every session event exactly once.
    pub fn submit_order(&mut self, order: &[EventId]) -> Result<(), SessionError> {
        if !self.is_permutation(order) {
            return Err(SessionError::NotAPermutation {
                expected: self.order.len(),
            });
        }
        self.order = order.to_vec();
        Ok(())
    }

    /// Scores the current order and remembers the result.
    pub fn check(&mut self) -> PoScore {
        let score = score_order(&self.order, &self.truth);
        self.checks += 1;
        self.last_score = Some(score);
        tracing::info!(
            session = %self.id,
            strict_pairs = score.strict_pairs,
            correct_pairs = score.correct_pairs,
            percentage = score.percentage,
            "Order checked"
        );
        score
    }

    /// Submits an order and scores it.
    pub fn check_order(&mut self, order: &[EventId]) -> Result<PoScore, SessionError> {
        self.submit_order(order)?;
        Ok(self.check())
    }

    /// Scores the current order with its inverted pairs, without recording it.
    pub fn report(&self) -> ScoreReport {
        score_detailed(&self.order, &self.truth)
    }

    /// Ends the session.
    pub fn finish(self) -> SessionSummary {
        tracing::info!(session = %self.id, checks = self.checks, "Game session finished");
        SessionSummary {
            session_id: self.id,
            topic_id: self.topic.id().to_string(),
            event_count: self.order.len(),
            final_order: self.order,
            last_score: self.last_score,
            checks: self.checks,
            reshuffles: self.reshuffles,
        }
    }

    fn is_permutation(&self, candidate: &[EventId]) -> bool {
        if candidate.len() != self.order.len() {
            return false;
        }
        let expected: HashSet<EventId> = self.order.iter().copied().collect();
        let mut seen = HashSet::with_capacity(candidate.len());
        candidate
            .iter()
            .all(|id| expected.contains(id) && seen.insert(*id))
    }
}

impl<'t, R> GameSession<'t, R> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn topic(&self) -> &'t Topic {
        self.topic
    }

    pub fn ground_truth(&self) -> &GroundTruth {
        &self.truth
    }

    /// The current permutation of event ids.
    pub fn order(&self) -> &[EventId] {
        &self.order
    }

    /// The current permutation resolved to events.
    pub fn presented_events(&self) -> Vec<&'t Event> {
        let topic = self.topic;
        self.order.iter().filter_map(|&id| topic.event(id)).collect()
    }

    pub fn last_score(&self) -> Option<PoScore> {
        self.last_score
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topic_events::{fixtures, ValidationMode};

    fn ids(raw: &[i64]) -> Vec<EventId> {
        raw.iter().copied().map(EventId).collect()
    }

    #[test]
    fn test_session_start_deals_every_bucketed_event() {
        let topic = fixtures::sample_topic();
        let session = GameSession::seeded(&topic, 42);

        assert_eq!(session.len(), 8);
        let mut sorted = session.order().to_vec();
        sorted.sort();
        assert_eq!(sorted, ids(&[101, 102, 103, 104, 105, 106, 107, 108]));
        assert_eq!(session.ground_truth().len(), 8);
        assert!(session.last_score().is_none());
    }

    #[test]
    fn test_same_seed_same_deal() {
        let topic = fixtures::sample_topic();
        let a = GameSession::seeded(&topic, 42);
        let b = GameSession::seeded(&topic, 42);
        assert_eq!(a.order(), b.order());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_check_order_concrete_scenario() {
        let topic = fixtures::scenario_topic();
        let mut session = GameSession::seeded(&topic, 1);

        let score = session.check_order(&ids(&[3, 1, 2, 4])).unwrap();

        assert_eq!(score.strict_pairs, 5);
        assert_eq!(score.correct_pairs, 3);
        assert_eq!(score.percentage, 60);
        assert_eq!(session.last_score(), Some(score));
    }

    #[test]
    fn test_submit_rejects_non_permutations() {
        let topic = fixtures::scenario_topic();
        let mut session = GameSession::seeded(&topic, 1);
        let before = session.order().to_vec();

        let expected = Err(SessionError::NotAPermutation { expected: 4 });
        assert_eq!(session.submit_order(&ids(&[1, 2, 3])), expected);
        assert_eq!(session.submit_order(&ids(&[1, 2, 3, 3])), expected);
        assert_eq!(session.submit_order(&ids(&[1, 2, 3, 9])), expected);
        assert_eq!(session.order(), &before[..]);
    }

    #[test]
    fn test_move_event_applies_drag() {
        let topic = fixtures::scenario_topic();
        let mut session = GameSession::seeded(&topic, 1);
        session.submit_order(&ids(&[1, 2, 3, 4])).unwrap();

        session.move_event(3, 0).unwrap();
        assert_eq!(session.order(), &ids(&[4, 1, 2, 3])[..]);

        session.move_event(0, 2).unwrap();
        assert_eq!(session.order(), &ids(&[1, 2, 4, 3])[..]);
    }

    #[test]
    fn test_move_event_out_of_range() {
        let topic = fixtures::scenario_topic();
        let mut session = GameSession::seeded(&topic, 1);

        assert_eq!(
            session.move_event(0, 4),
            Err(SessionError::PositionOutOfRange { position: 4, len: 4 })
        );
    }

    #[test]
    fn test_reshuffle_keeps_event_set_and_clears_score() {
        let topic = fixtures::sample_topic();
        let mut session = GameSession::seeded(&topic, 9);
        session.check();

        session.reshuffle();

        let mut sorted = session.order().to_vec();
        sorted.sort();
        assert_eq!(sorted.len(), 8);
        sorted.dedup();
        assert_eq!(sorted.len(), 8);
        assert!(session.last_score().is_none());
    }

    #[test]
    fn test_reference_order_scores_perfect() {
        let topic = fixtures::sample_topic();
        let mut session = GameSession::seeded(&topic, 3);
        let answer = session.ground_truth().reference_order();

        let score = session.check_order(&answer).unwrap();

        assert!(score.is_perfect());
        assert!(session.report().inversions.is_empty());
    }

    #[test]
    fn test_presented_events_follow_order() {
        let topic = fixtures::scenario_topic();
        let mut session = GameSession::seeded(&topic, 1);
        session.submit_order(&ids(&[4, 3, 2, 1])).unwrap();

        let titles: Vec<&str> = session
            .presented_events()
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["e4", "e3", "e2", "e1"]);
    }

    #[test]
    fn test_finish_summarises() {
        let topic = fixtures::scenario_topic();
        let mut session = GameSession::seeded(&topic, 1);
        session.reshuffle();
        session.check_order(&ids(&[1, 2, 3, 4])).unwrap();

        let summary = session.finish();

        assert_eq!(summary.topic_id, "scenario");
        assert_eq!(summary.event_count, 4);
        assert_eq!(summary.final_order, ids(&[1, 2, 3, 4]));
        assert_eq!(summary.checks, 1);
        assert_eq!(summary.reshuffles, 1);
        assert_eq!(summary.last_score.map(|s| s.percentage), Some(100));
    }

    #[test]
    fn test_lenient_doubly_assigned_topic_is_playable() {
        let json = r#"{
            "events": [{"id": 1, "title": "a", "date": ""}, {"id": 2, "title": "b", "date": ""}],
            "ordered_buckets": [
                {"bucket_id": 1, "event_ids": [1]},
                {"bucket_id": 2, "event_ids": [2, 1]}
            ]
        }"#;
        let topic = Topic::from_json_str("dup", json, ValidationMode::Lenient).unwrap();
        let mut session = GameSession::seeded(&topic, 5);

        let mut dealt = session.order().to_vec();
        dealt.sort();
        assert_eq!(dealt, ids(&[1, 2]));

        assert!(session.check_order(&ids(&[1, 2])).is_ok());
        assert!(session.check_order(&ids(&[2, 1])).is_ok());
        assert_eq!(
            session.check_order(&ids(&[1, 2, 1])),
            Err(SessionError::NotAPermutation { expected: 2 })
        );
    }

    #[test]
    fn test_lenient_unresolved_reference_is_playable() {
        let json = r#"{
            "events": [{"id": 1, "title": "a", "date": ""}, {"id": 2, "title": "b", "date": ""}],
            "ordered_buckets": [
                {"bucket_id": 1, "event_ids": [1, 9]},
                {"bucket_id": 2, "event_ids": [2]}
            ]
        }"#;
        let topic = Topic::from_json_str("gap", json, ValidationMode::Lenient).unwrap();
        let mut session = GameSession::seeded(&topic, 5);

        assert_eq!(session.len(), 2);
        assert_eq!(session.presented_events().len(), 2);

        let score = session.check_order(&ids(&[1, 2])).unwrap();
        assert!(score.is_perfect());
        let score = session.check_order(&ids(&[2, 1])).unwrap();
        assert_eq!(score.percentage, 0);
    }

    #[test]
    fn test_empty_topic_session() {
        let topic = Topic::new("empty", "Empty", vec![], vec![]);
        let mut session = GameSession::seeded(&topic, 1);

        assert!(session.is_empty());
        assert!(session.check().is_degenerate());
    }
}
