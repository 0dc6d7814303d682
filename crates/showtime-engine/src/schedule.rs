//! Data model shared by the search, the ranking and the tool front end.
//!
//! Every type serializes with camelCase field names; the JSON shape is part
//! of the tool contract and must not drift.

use serde::{Deserialize, Serialize};

use crate::time::calculate_duration;

/// One screening of a movie at a theater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Showtime {
    pub movie_title: String,
    pub theater: String,
    /// `HH:MM`, 24-hour clock.
    pub start_time: String,
    /// `HH:MM`; may be earlier than `start_time` when the screening crosses midnight.
    pub end_time: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub audio_type: Option<String>,
}

impl Showtime {
    /// A standard-format screening with no audio annotation.
    pub fn new(movie_title: &str, theater: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            movie_title: movie_title.to_string(),
            theater: theater.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            format: None,
            audio_type: None,
        }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    pub fn with_audio(mut self, audio_type: &str) -> Self {
        self.audio_type = Some(audio_type.to_string());
        self
    }
}

/// Inclusive wall-clock window the itinerary must fit into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

/// Input to the optimizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeOptions {
    /// Desired titles in viewing priority. Duplicates are processed independently.
    pub movie_titles: Vec<String>,
    pub showtimes: Vec<Showtime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    pub buffer_minutes: u32,
    pub prefer_premium: bool,
}

/// A screening placed into a candidate itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    /// 1-based position in the itinerary.
    pub order: usize,
    pub movie_title: String,
    pub theater: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub format: Option<String>,
    pub audio_type: Option<String>,
    /// Gap since the previous item ended; 0 for the first item, never negative.
    pub break_minutes_before: i64,
}

impl ScheduleItem {
    /// Place `showtime` at position `order` with the given break before it.
    pub fn place(showtime: &Showtime, order: usize, break_minutes_before: i64) -> Self {
        Self {
            order,
            movie_title: showtime.movie_title.clone(),
            theater: showtime.theater.clone(),
            start_time: showtime.start_time.clone(),
            end_time: showtime.end_time.clone(),
            duration_minutes: calculate_duration(&showtime.start_time, &showtime.end_time),
            format: showtime.format.clone(),
            audio_type: showtime.audio_type.clone(),
            break_minutes_before: break_minutes_before.max(0),
        }
    }
}

/// Why a requested title did not make it into an itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// No showtime's title fuzzily matches.
    NotFound,
    /// Matches exist but none fit after the itinerary built so far.
    TimeConflict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedMovie {
    pub title: String,
    pub reason: ExclusionReason,
}

impl ExcludedMovie {
    pub fn new(title: &str, reason: ExclusionReason) -> Self {
        Self {
            title: title.to_string(),
            reason,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    pub total_movies: usize,
    pub total_watch_time_minutes: i64,
    pub total_break_time_minutes: i64,
    /// Items with any non-null format.
    pub premium_count: usize,
}

impl ScheduleStats {
    pub fn from_items(items: &[ScheduleItem]) -> Self {
        Self {
            total_movies: items.len(),
            total_watch_time_minutes: saturating_sum(items.iter().map(|i| i.duration_minutes)),
            total_break_time_minutes: saturating_sum(items.iter().map(|i| i.break_minutes_before)),
            premium_count: items.iter().filter(|i| i.format.is_some()).count(),
        }
    }
}

fn saturating_sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

/// One complete candidate itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub schedule: Vec<ScheduleItem>,
    pub excluded: Vec<ExcludedMovie>,
    pub stats: ScheduleStats,
}

impl ScheduleResult {
    pub fn new(schedule: Vec<ScheduleItem>, excluded: Vec<ExcludedMovie>) -> Self {
        let stats = ScheduleStats::from_items(&schedule);
        Self {
            schedule,
            excluded,
            stats,
        }
    }
}

/// Ranked candidates, best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResult {
    pub candidates: Vec<ScheduleResult>,
    pub total_candidates: usize,
}

impl OptimizeResult {
    pub fn new(candidates: Vec<ScheduleResult>) -> Self {
        let total_candidates = candidates.len();
        Self {
            candidates,
            total_candidates,
        }
    }

    /// The top-ranked candidate, if any.
    pub fn best(&self) -> Option<&ScheduleResult> {
        self.candidates.first()
    }
}
