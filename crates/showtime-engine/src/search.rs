//! Recursive candidate generation.
//!
//! Walks the requested titles in input order. For each title it either records
//! an exclusion and moves on, or branches once per feasible showtime. A global
//! cap on emitted results bounds the whole walk; it is checked on entry to every
//! call and before every branch so that dead subtrees are cut as soon as the
//! sink fills up.
//!
//! Each branch owns its own copy of the itinerary and exclusion list. The only
//! shared state is the result sink, which is append-only.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::format::format_priority;
use crate::schedule::{
    ExcludedMovie, ExclusionReason, OptimizeOptions, ScheduleItem, ScheduleResult, Showtime,
};
use crate::time::{time_to_minutes, MINUTES_PER_DAY};
use crate::title::match_title;

/// Clock time an itinerary starts from when no time range is given.
pub const DAY_START: &str = "00:00";

/// Generate up to `max_results` candidates in generation order (unranked).
///
/// The order of the returned list is the depth-first order of the search, so
/// the cap truncates lexicographically by branch, not by quality.
pub fn generate_candidates(options: &OptimizeOptions, max_results: usize) -> Vec<ScheduleResult> {
    let search = Search::new(options, max_results);
    let start = options
        .time_range
        .as_ref()
        .map(|r| r.start.as_str())
        .unwrap_or(DAY_START);

    let mut results = Vec::new();
    search.generate(&options.movie_titles, Vec::new(), start, Vec::new(), &mut results);
    results
}

/// Resolve every distinct title to its matching showtimes, once.
///
/// The returned lists are already in branching order: format priority
/// descending then start time when `prefer_premium`, start time alone
/// otherwise. Filtering a pre-sorted list keeps that order, so the search never
/// re-sorts inside the recursion.
pub fn resolve_candidates<'a>(
    titles: &[String],
    showtimes: &'a [Showtime],
    prefer_premium: bool,
) -> HashMap<String, Vec<&'a Showtime>> {
    let mut resolved: HashMap<String, Vec<&'a Showtime>> = HashMap::new();

    for title in titles {
        if resolved.contains_key(title) {
            continue;
        }
        let mut matches: Vec<&Showtime> = showtimes
            .iter()
            .filter(|s| match_title(title, &s.movie_title))
            .collect();
        matches.sort_by(|a, b| branch_order(a, b, prefer_premium));
        resolved.insert(title.clone(), matches);
    }

    resolved
}

fn branch_order(a: &Showtime, b: &Showtime, prefer_premium: bool) -> Ordering {
    let by_start = || time_to_minutes(&a.start_time).cmp(&time_to_minutes(&b.start_time));
    if prefer_premium {
        format_priority(b.format.as_deref())
            .cmp(&format_priority(a.format.as_deref()))
            .then_with(by_start)
    } else {
        by_start()
    }
}

struct Search<'a> {
    candidates: HashMap<String, Vec<&'a Showtime>>,
    latest_end: Option<i64>,
    buffer_minutes: i64,
    max_results: usize,
}

impl<'a> Search<'a> {
    fn new(options: &'a OptimizeOptions, max_results: usize) -> Self {
        Self {
            candidates: resolve_candidates(
                &options.movie_titles,
                &options.showtimes,
                options.prefer_premium,
            ),
            latest_end: options.time_range.as_ref().map(|r| time_to_minutes(&r.end)),
            buffer_minutes: i64::from(options.buffer_minutes),
            max_results,
        }
    }

    fn generate(
        &self,
        titles: &[String],
        built: Vec<ScheduleItem>,
        current_end: &str,
        excluded: Vec<ExcludedMovie>,
        results: &mut Vec<ScheduleResult>,
    ) {
        if results.len() >= self.max_results {
            return;
        }

        let Some((title, remaining)) = titles.split_first() else {
            results.push(ScheduleResult::new(built, excluded));
            return;
        };

        let matches = self.candidates.get(title).map(Vec::as_slice).unwrap_or(&[]);
        if matches.is_empty() {
            let excluded = with_exclusion(excluded, title, ExclusionReason::NotFound);
            self.generate(remaining, built, current_end, excluded, results);
            return;
        }

        let earliest_start = time_to_minutes(current_end).saturating_add(self.buffer_minutes);
        let latest_end = self.latest_end.unwrap_or(MINUTES_PER_DAY);
        let feasible: Vec<&Showtime> = matches
            .iter()
            .copied()
            .filter(|s| {
                time_to_minutes(&s.start_time) >= earliest_start
                    && (self.latest_end.is_none() || time_to_minutes(&s.end_time) <= latest_end)
            })
            .collect();

        if feasible.is_empty() {
            let excluded = with_exclusion(excluded, title, ExclusionReason::TimeConflict);
            self.generate(remaining, built, current_end, excluded, results);
            return;
        }

        for showtime in feasible {
            if results.len() >= self.max_results {
                return;
            }

            let break_minutes = if built.is_empty() {
                0
            } else {
                time_to_minutes(&showtime.start_time).saturating_sub(time_to_minutes(current_end))
            };

            let mut branch = built.clone();
            branch.push(ScheduleItem::place(showtime, built.len() + 1, break_minutes));

            self.generate(
                remaining,
                branch,
                &showtime.end_time,
                excluded.clone(),
                results,
            );
        }
    }
}

fn with_exclusion(
    mut excluded: Vec<ExcludedMovie>,
    title: &str,
    reason: ExclusionReason,
) -> Vec<ExcludedMovie> {
    excluded.push(ExcludedMovie::new(title, reason));
    excluded
}
