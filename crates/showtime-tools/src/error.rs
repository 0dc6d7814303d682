//! Error types for tool invocations.

use serde::Serialize;
use thiserror::Error;

const RUN_SCRAPER: &str = "Run the scraper to refresh the listing snapshot";

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The catalog has nothing for the requested date, areas or filters.
    #[error("{0}")]
    NoData(String),

    #[error("No schedule satisfies the requested conditions")]
    NoSchedule,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ToolError>;

/// Wire form of a failed call: `{ "error": true, "code", "message", "suggestion"? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPayload {
    pub error: bool,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'static str>,
}

impl ToolError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::InvalidArguments(_) => "INVALID_ARGUMENTS",
            ToolError::UnknownTool(_) => "UNKNOWN_TOOL",
            ToolError::NoData(_) => "NO_DATA",
            ToolError::NoSchedule => "NO_SCHEDULE",
            ToolError::Serialization(_) => "OPTIMIZE_ERROR",
        }
    }

    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            ToolError::NoData(_) => Some(RUN_SCRAPER),
            ToolError::NoSchedule => Some("Widen the time range or ask for fewer movies"),
            ToolError::UnknownTool(_) => Some(
                "Available tools: optimize_schedule, get_showtimes, list_movies, \
                 list_theaters, get_data_status",
            ),
            _ => None,
        }
    }

    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            error: true,
            code: self.code(),
            message: self.to_string(),
            suggestion: self.suggestion(),
        }
    }
}
