//! # showtime-engine
//!
//! Deterministic multi-movie schedule optimization over a day's showtime listings.
//!
//! Given an ordered list of movies someone wants to see, the engine fuzzily
//! resolves each title against the available screenings, enumerates feasible
//! back-to-back itineraries (respecting a buffer between screenings and an
//! optional time window) and ranks them. The search is a pure function: no I/O,
//! no global state, safe to call from any number of threads.
//!
//! ## Quick start
//!
//! ```rust
//! use showtime_engine::{optimize_schedule, OptimizeOptions, Showtime};
//!
//! let options = OptimizeOptions {
//!     movie_titles: vec!["Movie A".into()],
//!     showtimes: vec![Showtime::new("Movie A", "Cinema 1", "10:00", "11:48")],
//!     time_range: None,
//!     buffer_minutes: 30,
//!     prefer_premium: false,
//! };
//! let result = optimize_schedule(&options);
//! assert_eq!(result.total_candidates, 1);
//! assert_eq!(result.candidates[0].stats.total_watch_time_minutes, 108);
//! ```
//!
//! ## Modules
//!
//! - [`title`] — Title normalization and fuzzy matching
//! - [`time`] — `HH:MM` arithmetic with midnight rollover
//! - [`format`] — Premium format priority table
//! - [`schedule`] — Input/output data model (camelCase JSON)
//! - [`search`] — Recursive candidate generation
//! - [`ranking`] — Candidate ordering and the anchor venue policy
//! - [`optimizer`] — Entry points tying search and ranking together
//! - [`area`] — Area alias resolution
//! - [`catalog`] — Read-only query layer over a listing snapshot
//! - [`error`] — Error types

pub mod area;
pub mod catalog;
pub mod error;
pub mod format;
pub mod optimizer;
pub mod ranking;
pub mod schedule;
pub mod search;
pub mod time;
pub mod title;

pub use area::AreaAliases;
pub use catalog::Catalog;
pub use error::CatalogError;
pub use format::{format_priority, PremiumFormat};
pub use optimizer::{optimize_schedule, Optimizer, OptimizerConfig, MAX_CANDIDATES};
pub use ranking::{rank_candidates, AnchorPolicy};
pub use schedule::{
    ExcludedMovie, ExclusionReason, OptimizeOptions, OptimizeResult, ScheduleItem,
    ScheduleResult, ScheduleStats, Showtime, TimeRange,
};
pub use time::{calculate_duration, minutes_to_time, time_to_minutes};
pub use title::{match_title, normalize_title};
