/*!
 * Error types for the subrefine application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while parsing the human-authored transcript
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// A timestamp marker did not parse into four integer fields. Fatal:
    /// downstream offsets would be meaningless.
    #[error("Malformed timestamp '{raw}': expected HH:MM:SS:FF")]
    MalformedTimestamp {
        /// The offending marker text
        raw: String,
    },
}

/// Errors that can occur during alignment and interpolation
#[derive(Error, Debug)]
pub enum AlignError {
    /// Interpolation was requested with fewer than two anchors
    #[error("Insufficient anchors for interpolation: {available} available, at least 2 required")]
    InsufficientAnchors {
        /// How many anchors the set held
        available: usize,
    },
}

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// An entry whose end time does not lie after its start time
    #[error("Invalid time range in entry {seq_num}: end {end_ms}ms <= start {start_ms}ms")]
    InvalidTimeRange {
        /// Sequence number of the entry
        seq_num: usize,
        /// Start time in milliseconds
        start_ms: u64,
        /// End time in milliseconds
        end_ms: u64,
    },

    /// An entry with no visible text
    #[error("Empty subtitle text for entry {0}")]
    EmptyText(usize),

    /// No entries could be parsed from the input at all
    #[error("No valid subtitle entries were found")]
    NoEntries,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from transcript parsing
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Error from alignment
    #[error("Alignment error: {0}")]
    Align(#[from] AlignError),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
