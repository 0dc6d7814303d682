//! Candidate ordering.
//!
//! Generated candidates are sorted (stably) by:
//!
//! 1. movies watched, descending
//! 2. premium screenings, descending
//! 3. summed format priority, descending
//! 4. total break time, ascending
//!
//! After sorting, an optional [`AnchorPolicy`] may promote one candidate to
//! second place.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::format::format_priority;
use crate::schedule::ScheduleResult;

/// Post-ranking rule that keeps a partner venue's premium screening visible.
///
/// When the best candidate has no item at `venue` (substring match on the
/// theater name) in `format`, the first lower-ranked candidate that does is
/// moved to index 1. A match already at index 0 or 1 leaves the order alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorPolicy {
    pub venue: String,
    pub format: String,
}

impl AnchorPolicy {
    pub fn new(venue: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            venue: venue.into(),
            format: format.into(),
        }
    }

    /// Whether any item in the candidate satisfies the policy.
    pub fn is_satisfied_by(&self, candidate: &ScheduleResult) -> bool {
        candidate.schedule.iter().any(|item| {
            item.theater.contains(&self.venue)
                && item.format.as_deref() == Some(self.format.as_str())
        })
    }

    /// Apply the promotion to an already-sorted candidate list.
    pub fn apply(&self, candidates: &mut Vec<ScheduleResult>) {
        let Some(best) = candidates.first() else {
            return;
        };
        if self.is_satisfied_by(best) {
            return;
        }

        if let Some(index) = candidates.iter().position(|c| self.is_satisfied_by(c)) {
            if index > 1 {
                let promoted = candidates.remove(index);
                candidates.insert(1, promoted);
            }
        }
    }
}

/// Sum of format priorities over every item in the itinerary.
pub fn format_score(candidate: &ScheduleResult) -> u32 {
    candidate
        .schedule
        .iter()
        .map(|item| format_priority(item.format.as_deref()))
        .sum()
}

/// Total order used to rank candidates; `Less` means `a` ranks first.
pub fn compare_candidates(a: &ScheduleResult, b: &ScheduleResult) -> Ordering {
    b.stats
        .total_movies
        .cmp(&a.stats.total_movies)
        .then_with(|| b.stats.premium_count.cmp(&a.stats.premium_count))
        .then_with(|| format_score(b).cmp(&format_score(a)))
        .then_with(|| {
            a.stats
                .total_break_time_minutes
                .cmp(&b.stats.total_break_time_minutes)
        })
}

/// Sort candidates best-first, then apply the anchor policy if one is given.
///
/// The sort is stable: candidates that tie on every key keep their
/// generation order.
pub fn rank_candidates(candidates: &mut Vec<ScheduleResult>, anchor: Option<&AnchorPolicy>) {
    candidates.sort_by(compare_candidates);

    if let Some(policy) = anchor {
        policy.apply(candidates);
    }
}
