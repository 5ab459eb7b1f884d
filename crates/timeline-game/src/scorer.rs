//! Partial-order accuracy scoring.
//!
//! Scores a submitted event order against the ground-truth bucket partition.
//! Only *strict* pairs count: two events whose buckets differ, so one of them
//! must come first. Pairs sharing a bucket have no defined order and are
//! ignored.
//!
//! For every pair of positions `i < j` in the submission the player claims
//! `order[i]` precedes `order[j]`. The claim is correct when the first event's
//! bucket id is smaller than the second's.
//!
//! A pair where either event is absent from the index is not strict and is
//! skipped, including the case where both are absent.

use serde::{Deserialize, Serialize};
use std::fmt;

use topic_events::EventId;

use crate::ground_truth::GroundTruth;

/// Result of scoring one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoScore {
    /// Pairs whose ground-truth buckets differ.
    pub strict_pairs: u64,
    /// Strict pairs the submission ordered correctly.
    pub correct_pairs: u64,
    /// `correct / strict` as a whole percentage, rounded half up; 0 when
    /// there are no strict pairs.
    pub percentage: u8,
}

impl PoScore {
    /// Derives the percentage from the two counts.
    pub fn from_counts(strict_pairs: u64, correct_pairs: u64) -> Self {
        let percentage = if strict_pairs == 0 {
            0
        } else {
            // Exact half-up rounding of correct * 100 / strict. A float
            // round can land one lower, e.g. 29/200 gives 14.499.. and 14.
            ((correct_pairs * 200 + strict_pairs) / (2 * strict_pairs)).min(100) as u8
        };

        Self {
            strict_pairs,
            correct_pairs,
            percentage,
        }
    }

    /// `correct / strict`, or 0 when there are no strict pairs.
    pub fn accuracy(&self) -> f64 {
        if self.strict_pairs == 0 {
            0.0
        } else {
            self.correct_pairs as f64 / self.strict_pairs as f64
        }
    }

    /// Strict pairs the submission got wrong.
    pub fn incorrect_pairs(&self) -> u64 {
        self.strict_pairs.saturating_sub(self.correct_pairs)
    }

    /// Every strict pair is in order.
    pub fn is_perfect(&self) -> bool {
        self.strict_pairs > 0 && self.correct_pairs == self.strict_pairs
    }

    /// No strict pairs exist, e.g. a single-bucket topic. Not an error.
    pub fn is_degenerate(&self) -> bool {
        self.strict_pairs == 0
    }
}

impl fmt::Display for PoScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_perfect() {
            write!(f, "Perfect! PO-Accuracy {}%", self.percentage)
        } else if self.is_degenerate() {
            write!(f, "No strict ordering pairs to score (0%)")
        } else {
            write!(
                f,
                "{}% - {} of {} strict pairs in order",
                self.percentage, self.correct_pairs, self.strict_pairs
            )
        }
    }
}

/// A score plus the pairs the player inverted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: PoScore,
    /// `(u, v)` where the player put `u` before `v` but `v` belongs to an
    /// earlier bucket. Listed in scan order.
    pub inversions: Vec<(EventId, EventId)>,
}

/// Scores a submitted order.
///
/// Runs the naive all-pairs scan; submissions are tens of events at most.
pub fn score_order(order: &[EventId], truth: &GroundTruth) -> PoScore {
    scan_pairs(order, truth, |_, _| {})
}

/// Scores a submitted order and collects its inverted pairs.
pub fn score_detailed(order: &[EventId], truth: &GroundTruth) -> ScoreReport {
    let mut inversions = Vec::new();
    let score = scan_pairs(order, truth, |u, v| inversions.push((u, v)));
    ScoreReport { score, inversions }
}

fn scan_pairs<F>(order: &[EventId], truth: &GroundTruth, mut on_inversion: F) -> PoScore
where
    F: FnMut(EventId, EventId),
{
    let mut strict_pairs = 0u64;
    let mut correct_pairs = 0u64;

    for (i, &u) in order.iter().enumerate() {
        let Some(bucket_u) = truth.bucket_of(u) else {
            continue;
        };
        for &v in &order[i + 1..] {
            let Some(bucket_v) = truth.bucket_of(v) else {
                continue;
            };
            if bucket_u == bucket_v {
                continue;
            }

            strict_pairs += 1;
            if bucket_u < bucket_v {
                correct_pairs += 1;
            } else {
                on_inversion(u, v);
            }
        }
    }

    PoScore::from_counts(strict_pairs, correct_pairs)
}
