/*!
 * Error types for the caption_prefs crate.
 *
 * Preference queries, scoring and ranking never fail; these types only cover
 * the ambient surfaces: loading configuration and reading track list snapshots.
 */

use thiserror::Error;

/// Errors that can occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read or written
    #[error("Config file error: {0}")]
    Io(String),

    /// Configuration file is not valid JSON for the expected schema
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A language tag in the configuration is not well formed
    #[error("Invalid language tag '{tag}' in {field}")]
    InvalidLanguage {
        /// Configuration field holding the tag
        field: String,
        /// The offending tag
        tag: String,
    },

    /// A numeric setting is out of range
    #[error("Invalid value for {field}: {message}")]
    InvalidValue {
        /// Configuration field
        field: String,
        /// What is wrong with it
        message: String,
    },
}

/// Errors that can occur while reading a track list snapshot
#[derive(Error, Debug)]
pub enum TrackListError {
    /// Track list file could not be read
    #[error("Track list file error: {0}")]
    Io(String),

    /// Track list file is not valid JSON for the expected schema
    #[error("Failed to parse track list: {0}")]
    Parse(String),

    /// Two tracks share the same identifier
    #[error("Duplicate track id: {0}")]
    DuplicateTrackId(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration handling
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from track list handling
    #[error("Track list error: {0}")]
    TrackList(#[from] TrackListError),
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

impl From<serde_json::Error> for TrackListError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}
