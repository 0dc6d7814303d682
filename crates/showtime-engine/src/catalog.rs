//! Read-only query layer over a scraped listing snapshot.
//!
//! The scraper writes its cache out as a single JSON document (theaters,
//! showtime rows and a scrape log). [`Catalog`] loads that document once and
//! answers the queries the tool front end needs: flat showtimes for the
//! optimizer, a movie → theater → showtime report, per-movie counts, the
//! theater list and a freshness summary.
//!
//! Showtime rows join to theaters by name. A row naming a theater that is not
//! in the snapshot has no area and is skipped by every query.
//!
//! In every area-filtered query an empty `areas` slice means "all areas".

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::schedule::Showtime;
use crate::time::{calculate_duration, time_to_minutes};
use crate::title::match_title;

/// Theater chain a venue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TheaterChain {
    Toho,
    CinemaSunshine,
    Aeon,
    United,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theater {
    pub name: String,
    pub area: String,
    #[serde(default)]
    pub chain: Option<TheaterChain>,
}

/// One stored showtime row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRow {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub theater: String,
    pub movie_title: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub audio_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeLogEntry {
    pub area: String,
    /// RFC 3339 timestamp.
    pub scraped_at: String,
    #[serde(default)]
    pub showtime_count: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The on-disk snapshot document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub theaters: Vec<Theater>,
    #[serde(default)]
    pub showtimes: Vec<ListingRow>,
    #[serde(default)]
    pub scrape_log: Vec<ScrapeLogEntry>,
}

/// Filter for [`Catalog::movie_showtimes`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowtimeQuery {
    pub date: String,
    pub areas: Vec<String>,
    /// Case-insensitive substring of the theater name.
    pub theater: Option<String>,
    /// Fuzzy title, see [`match_title`].
    pub movie_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowtimeInfo {
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub format: Option<String>,
    pub audio_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TheaterShowtimes {
    pub theater: String,
    pub area: String,
    pub showtimes: Vec<ShowtimeInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieShowtimes {
    pub movie_title: String,
    pub theaters: Vec<TheaterShowtimes>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowtimesStats {
    pub total_movies: usize,
    pub total_theaters: usize,
    pub total_showtimes: usize,
}

/// Grouped result of [`Catalog::movie_showtimes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowtimesReport {
    pub date: String,
    /// The requested areas, or the areas actually found when none were requested.
    pub areas: Vec<String>,
    pub movie_title: Option<String>,
    pub movies: Vec<MovieShowtimes>,
    pub stats: ShowtimesStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub title: String,
    pub theater_count: usize,
    pub showtime_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStatus {
    pub last_scraped_at: Option<String>,
    pub area_count: usize,
    pub theater_count: usize,
    pub showtime_count: usize,
    pub date_range: DateRange,
}

/// In-memory listing store.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    theaters: Vec<Theater>,
    theater_areas: HashMap<String, String>,
    rows: Vec<ListingRow>,
    scrape_log: Vec<ScrapeLogEntry>,
}

impl Catalog {
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let theater_areas = snapshot
            .theaters
            .iter()
            .map(|t| (t.name.clone(), t.area.clone()))
            .collect();

        Self {
            theaters: snapshot.theaters,
            theater_areas,
            rows: snapshot.showtimes,
            scrape_log: snapshot.scrape_log,
        }
    }

    /// Parse a snapshot document.
    ///
    /// # Errors
    /// Returns [`CatalogError::Snapshot`] if the JSON does not match [`Snapshot`].
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json).map_err(CatalogError::Snapshot)?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn theaters(&self) -> &[Theater] {
        &self.theaters
    }

    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    /// Distinct theater areas, sorted.
    pub fn areas(&self) -> Vec<String> {
        self.theaters
            .iter()
            .map(|t| t.area.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Rows on `date` whose theater lies in one of `areas`, paired with that area.
    fn rows_in<'a>(
        &'a self,
        date: &'a str,
        areas: &'a [String],
    ) -> impl Iterator<Item = (&'a ListingRow, &'a str)> + 'a {
        self.rows.iter().filter_map(move |row| {
            if row.date != date {
                return None;
            }
            let area = self.theater_areas.get(&row.theater)?;
            (areas.is_empty() || areas.contains(area)).then_some((row, area.as_str()))
        })
    }

    /// Flat showtimes for the optimizer, ordered by start time.
    pub fn showtimes_for(&self, date: &str, areas: &[String]) -> Vec<Showtime> {
        let mut rows: Vec<&ListingRow> = self.rows_in(date, areas).map(|(row, _)| row).collect();
        rows.sort_by_key(|row| time_to_minutes(&row.start_time));

        rows.into_iter()
            .map(|row| Showtime {
                movie_title: row.movie_title.clone(),
                theater: row.theater.clone(),
                start_time: row.start_time.clone(),
                end_time: row.end_time.clone(),
                format: row.format.clone(),
                audio_type: row.audio_type.clone(),
            })
            .collect()
    }

    /// Showtimes grouped movie → theater, ordered by title, theater, start time.
    pub fn movie_showtimes(&self, query: &ShowtimeQuery) -> ShowtimesReport {
        let theater_filter = query.theater.as_deref().map(str::to_lowercase);

        let mut rows: Vec<(&ListingRow, &str)> = self
            .rows_in(&query.date, &query.areas)
            .filter(|(row, _)| match &theater_filter {
                Some(needle) => row.theater.to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .filter(|(row, _)| match &query.movie_title {
                Some(title) => match_title(title, &row.movie_title),
                None => true,
            })
            .collect();
        rows.sort_by(|(a, _), (b, _)| {
            a.movie_title
                .cmp(&b.movie_title)
                .then_with(|| a.theater.cmp(&b.theater))
                .then_with(|| time_to_minutes(&a.start_time).cmp(&time_to_minutes(&b.start_time)))
        });

        let mut movies: Vec<MovieShowtimes> = Vec::new();
        let mut found_areas: BTreeSet<String> = BTreeSet::new();
        let mut theater_names: HashSet<&str> = HashSet::new();

        for (row, area) in &rows {
            found_areas.insert(area.to_string());
            theater_names.insert(row.theater.as_str());

            let info = ShowtimeInfo {
                start_time: row.start_time.clone(),
                end_time: row.end_time.clone(),
                duration_minutes: calculate_duration(&row.start_time, &row.end_time),
                format: row.format.clone(),
                audio_type: row.audio_type.clone(),
            };

            // Rows are sorted, so a new title always starts a new group.
            if movies.last().map_or(true, |m| m.movie_title != row.movie_title) {
                movies.push(MovieShowtimes {
                    movie_title: row.movie_title.clone(),
                    theaters: Vec::new(),
                });
            }
            let Some(movie) = movies.last_mut() else {
                continue;
            };

            match movie.theaters.last_mut() {
                Some(t) if t.theater == row.theater => t.showtimes.push(info),
                _ => movie.theaters.push(TheaterShowtimes {
                    theater: row.theater.clone(),
                    area: area.to_string(),
                    showtimes: vec![info],
                }),
            }
        }

        let stats = ShowtimesStats {
            total_movies: movies.len(),
            total_theaters: theater_names.len(),
            total_showtimes: rows.len(),
        };

        ShowtimesReport {
            date: query.date.clone(),
            areas: if query.areas.is_empty() {
                found_areas.into_iter().collect()
            } else {
                query.areas.clone()
            },
            movie_title: query.movie_title.clone(),
            movies,
            stats,
        }
    }

    /// Per-movie counts, most widely shown first, then by title.
    pub fn list_movies(&self, date: &str, areas: &[String]) -> Vec<MovieSummary> {
        let mut by_title: HashMap<&str, (HashSet<&str>, usize)> = HashMap::new();
        for (row, _) in self.rows_in(date, areas) {
            let entry = by_title.entry(row.movie_title.as_str()).or_default();
            entry.0.insert(row.theater.as_str());
            entry.1 += 1;
        }

        let mut movies: Vec<MovieSummary> = by_title
            .into_iter()
            .map(|(title, (theaters, showtimes))| MovieSummary {
                title: title.to_string(),
                theater_count: theaters.len(),
                showtime_count: showtimes,
            })
            .collect();
        movies.sort_by(|a, b| {
            b.theater_count
                .cmp(&a.theater_count)
                .then_with(|| a.title.cmp(&b.title))
        });
        movies
    }

    /// Theaters in `areas`, ordered by area then name.
    pub fn list_theaters(&self, areas: &[String]) -> Vec<Theater> {
        let mut theaters: Vec<Theater> = self
            .theaters
            .iter()
            .filter(|t| areas.is_empty() || areas.contains(&t.area))
            .cloned()
            .collect();
        theaters.sort_by(|a, b| a.area.cmp(&b.area).then_with(|| a.name.cmp(&b.name)));
        theaters
    }

    /// Freshness and size summary of the snapshot.
    pub fn data_status(&self) -> DataStatus {
        let dates = || self.rows.iter().map(|r| r.date.as_str());

        DataStatus {
            last_scraped_at: self
                .scrape_log
                .iter()
                .map(|e| e.scraped_at.as_str())
                .max()
                .map(str::to_string),
            area_count: self.areas().len(),
            theater_count: self.theaters.len(),
            showtime_count: self.rows.len(),
            date_range: DateRange {
                from: dates().min().map(str::to_string),
                to: dates().max().map(str::to_string),
            },
        }
    }
}
