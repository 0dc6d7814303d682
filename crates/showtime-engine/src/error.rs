//! Error types for loading listing snapshots and alias tables.
//!
//! The optimizer itself is total and never returns an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid listing snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),

    #[error("Invalid area alias table: {0}")]
    Aliases(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
