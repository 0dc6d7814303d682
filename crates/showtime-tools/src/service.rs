//! The tool dispatcher.
//!
//! Every tool takes a JSON argument object and produces a JSON document. The
//! catalog, alias table and optimizer are built once and shared read-only by
//! all calls.

use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use showtime_engine::catalog::{MovieSummary, ShowtimeQuery, Theater};
use showtime_engine::{
    AnchorPolicy, AreaAliases, Catalog, OptimizeOptions, Optimizer, OptimizerConfig, TimeRange,
    MAX_CANDIDATES,
};
use tracing::{info, warn};

use crate::error::{Result, ToolError};
use crate::validate::{check_buffer, check_non_empty, check_time, parse_date};

pub const DEFAULT_ANCHOR_VENUE: &str = "グランドシネマサンシャイン池袋";
pub const DEFAULT_ANCHOR_FORMAT: &str = "IMAX";
pub const DEFAULT_BUFFER_MINUTES: u32 = 30;

// ---------------------------------------------------------------------------
// Configuration and wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Post-ranking promotion rule passed to the optimizer.
    pub anchor: Option<AnchorPolicy>,
    pub max_candidates: usize,
    /// Used when a call omits `bufferMinutes`.
    pub default_buffer_minutes: u32,
    /// Overrides the local date used when a call omits `date`.
    pub today: Option<NaiveDate>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            anchor: Some(AnchorPolicy::new(DEFAULT_ANCHOR_VENUE, DEFAULT_ANCHOR_FORMAT)),
            max_candidates: MAX_CANDIDATES,
            default_buffer_minutes: DEFAULT_BUFFER_MINUTES,
            today: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
}

const TOOL_DEFINITIONS: [ToolDefinition; 5] = [
    ToolDefinition {
        name: "optimize_schedule",
        description: "Plan an itinerary for watching several movies back to back. \
                      Arguments: movieTitles (in priority order), areas, date?, \
                      timeRange? {start, end}, bufferMinutes? (0-120, default 30), \
                      preferPremium?",
    },
    ToolDefinition {
        name: "get_showtimes",
        description: "Showtimes grouped by movie and theater. \
                      Arguments: date?, areas?, theater? (substring), movieTitle? (fuzzy)",
    },
    ToolDefinition {
        name: "list_movies",
        description: "Movies showing on a date, most widely shown first. \
                      Arguments: date?, areas?",
    },
    ToolDefinition {
        name: "list_theaters",
        description: "Theaters in the given areas. Arguments: areas?",
    },
    ToolDefinition {
        name: "get_data_status",
        description: "Freshness and size of the listing snapshot. No arguments.",
    },
];

pub fn tool_definitions() -> &'static [ToolDefinition] {
    &TOOL_DEFINITIONS
}

/// The outcome of one tool call as sent back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub text: String,
    pub is_error: bool,
}

impl ToolResponse {
    fn success(value: &Value) -> Self {
        Self {
            text: format!("{value:#}"),
            is_error: false,
        }
    }

    fn failure(err: &ToolError) -> Self {
        let payload = err.payload();
        let text = serde_json::to_string(&payload).unwrap_or_else(|_| payload.message.clone());
        Self {
            text,
            is_error: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieList {
    pub date: String,
    pub areas: Vec<String>,
    pub movies: Vec<MovieSummary>,
    pub total_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TheaterList {
    pub areas: Vec<String>,
    pub theaters: Vec<Theater>,
    pub total_count: usize,
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeArgs {
    #[serde(default)]
    movie_titles: Vec<String>,
    date: Option<String>,
    #[serde(default)]
    areas: Vec<String>,
    time_range: Option<TimeRange>,
    buffer_minutes: Option<i64>,
    #[serde(default)]
    prefer_premium: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShowtimesArgs {
    date: Option<String>,
    #[serde(default)]
    areas: Vec<String>,
    theater: Option<String>,
    movie_title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MoviesArgs {
    date: Option<String>,
    #[serde(default)]
    areas: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TheatersArgs {
    #[serde(default)]
    areas: Vec<String>,
}

/// A missing argument document is the same as `{}`.
fn parse_args<T: DeserializeOwned>(args: &Value) -> Result<T> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other.clone(),
    };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ToolService {
    catalog: Catalog,
    aliases: AreaAliases,
    config: ToolConfig,
    optimizer: Optimizer,
}

impl ToolService {
    pub fn new(catalog: Catalog, aliases: AreaAliases, config: ToolConfig) -> Self {
        let optimizer = Optimizer::new(OptimizerConfig {
            max_candidates: config.max_candidates,
            anchor: config.anchor.clone(),
        });
        Self {
            catalog,
            aliases,
            config,
            optimizer,
        }
    }

    /// Run a tool and render its outcome. Never fails: errors become an
    /// error payload with `is_error` set.
    pub fn call(&self, name: &str, args: &Value) -> ToolResponse {
        info!(tool = name, "tool call");
        match self.invoke(name, args) {
            Ok(value) => ToolResponse::success(&value),
            Err(err) => {
                warn!(tool = name, code = err.code(), error = %err, "tool call failed");
                ToolResponse::failure(&err)
            }
        }
    }

    /// [`call`](Self::call) with the arguments given as JSON text. Blank text
    /// means no arguments.
    pub fn call_json(&self, name: &str, args: &str) -> ToolResponse {
        if args.trim().is_empty() {
            return self.call(name, &Value::Null);
        }
        match serde_json::from_str::<Value>(args) {
            Ok(value) => self.call(name, &value),
            Err(e) => {
                let err = ToolError::InvalidArguments(e.to_string());
                warn!(tool = name, code = err.code(), error = %err, "tool call failed");
                ToolResponse::failure(&err)
            }
        }
    }

    /// Run a tool and return its result document.
    pub fn invoke(&self, name: &str, args: &Value) -> Result<Value> {
        match name {
            "optimize_schedule" => self.optimize_schedule(parse_args(args)?),
            "get_showtimes" => self.get_showtimes(parse_args(args)?),
            "list_movies" => self.list_movies(parse_args(args)?),
            "list_theaters" => self.list_theaters(parse_args(args)?),
            "get_data_status" => Ok(serde_json::to_value(self.catalog.data_status())?),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    fn resolve_date(&self, date: Option<&str>) -> Result<String> {
        let date = match date {
            Some(s) => parse_date(s)?,
            None => self
                .config
                .today
                .unwrap_or_else(|| Local::now().date_naive()),
        };
        Ok(date.format("%Y-%m-%d").to_string())
    }

    fn optimize_schedule(&self, args: OptimizeArgs) -> Result<Value> {
        check_non_empty("movieTitles", &args.movie_titles)?;
        check_non_empty("areas", &args.areas)?;
        let date = self.resolve_date(args.date.as_deref())?;
        if let Some(range) = &args.time_range {
            check_time("timeRange.start", &range.start)?;
            check_time("timeRange.end", &range.end)?;
        }
        let buffer_minutes = match args.buffer_minutes {
            Some(minutes) => check_buffer(minutes)?,
            None => self.config.default_buffer_minutes,
        };

        let areas = self.aliases.resolve_all(&args.areas);
        let showtimes = self.catalog.showtimes_for(&date, &areas);
        if showtimes.is_empty() {
            return Err(ToolError::NoData(format!(
                "No listings for {} on {date}",
                areas.join(", ")
            )));
        }

        let options = OptimizeOptions {
            movie_titles: args.movie_titles,
            showtimes,
            time_range: args.time_range,
            buffer_minutes,
            prefer_premium: args.prefer_premium,
        };
        let result = self.optimizer.optimize(&options);
        if result.candidates.is_empty() {
            return Err(ToolError::NoSchedule);
        }
        Ok(serde_json::to_value(result)?)
    }

    fn get_showtimes(&self, args: ShowtimesArgs) -> Result<Value> {
        let query = ShowtimeQuery {
            date: self.resolve_date(args.date.as_deref())?,
            areas: self.aliases.resolve_all(&args.areas),
            theater: args.theater,
            movie_title: args.movie_title,
        };

        let report = self.catalog.movie_showtimes(&query);
        if report.movies.is_empty() {
            let message = match &query.movie_title {
                Some(title) => format!("No showtimes for '{title}' on {}", query.date),
                None => format!("No showtimes on {}", query.date),
            };
            return Err(ToolError::NoData(message));
        }
        Ok(serde_json::to_value(report)?)
    }

    fn list_movies(&self, args: MoviesArgs) -> Result<Value> {
        let date = self.resolve_date(args.date.as_deref())?;
        let areas = self.aliases.resolve_all(&args.areas);

        let movies = self.catalog.list_movies(&date, &areas);
        if movies.is_empty() {
            let message = if areas.is_empty() {
                format!("No movies showing on {date}")
            } else {
                format!("No movies showing in {} on {date}", areas.join(", "))
            };
            return Err(ToolError::NoData(message));
        }

        let areas = if areas.is_empty() {
            self.catalog.areas()
        } else {
            areas
        };
        Ok(serde_json::to_value(MovieList {
            date,
            areas,
            total_count: movies.len(),
            movies,
        })?)
    }

    fn list_theaters(&self, args: TheatersArgs) -> Result<Value> {
        let areas = self.aliases.resolve_all(&args.areas);

        let theaters = self.catalog.list_theaters(&areas);
        if theaters.is_empty() {
            let message = if areas.is_empty() {
                "No theaters in the listing snapshot".to_string()
            } else {
                format!("No theaters in {}", areas.join(", "))
            };
            return Err(ToolError::NoData(message));
        }

        let areas = if areas.is_empty() {
            // Theaters come back ordered by area.
            let mut found: Vec<String> = theaters.iter().map(|t| t.area.clone()).collect();
            found.dedup();
            found
        } else {
            areas
        };
        Ok(serde_json::to_value(TheaterList {
            areas,
            total_count: theaters.len(),
            theaters,
        })?)
    }
}
