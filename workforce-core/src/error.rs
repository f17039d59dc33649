//! Error kinds surfaced to callers.
//!
//! Per-row anomalies (a bad interval, an unparseable entry time) are never
//! raised as errors — those are logged and dropped at the point of parsing.
//! These variants are reserved for failures that must abort the whole run
//! before any report is written.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkforceError {
    /// Missing required columns, missing selected sheet, or a structurally
    /// invalid input that prevents any computation from starting.
    #[error("validation error: {0}")]
    Validation(String),

    /// The input could not be parsed as the expected tabular format at all.
    #[error("input format error: {0}")]
    InputFormat(String),

    /// Read/write failure on a report or workbook path.
    #[error("resource error: {0}")]
    Resource(String),
}

pub type Result<T> = std::result::Result<T, WorkforceError>;
