//! JSON tool front end for the showtime optimizer and listing catalog.
//!
//! Five tools are exposed, each taking a JSON argument object and returning a
//! JSON document:
//!
//! - `optimize_schedule` — plan a multi-movie itinerary
//! - `get_showtimes` — showtimes grouped by movie and theater
//! - `list_movies` — movies showing on a date
//! - `list_theaters` — theaters per area
//! - `get_data_status` — snapshot freshness
//!
//! Failures come back as `{ "error": true, "code", "message", "suggestion"? }`
//! with [`ToolResponse::is_error`] set.
//!
//! ```
//! use serde_json::json;
//! use showtime_engine::{AreaAliases, Catalog};
//! use showtime_tools::{ToolConfig, ToolService};
//!
//! let service = ToolService::new(
//!     Catalog::default(),
//!     AreaAliases::builtin(),
//!     ToolConfig::default(),
//! );
//! let response = service.call("get_data_status", &json!({}));
//! assert!(!response.is_error);
//! assert!(response.text.contains("\"showtimeCount\": 0"));
//! ```

pub mod error;
pub mod service;
pub mod validate;

pub use error::{ErrorPayload, ToolError};
pub use service::{
    tool_definitions, MovieList, TheaterList, ToolConfig, ToolDefinition, ToolResponse,
    ToolService,
};
