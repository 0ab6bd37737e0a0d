/*!
 * # caption_prefs - caption and subtitle track preferences for media playback
 *
 * Decides which timed text track a media element shows and how the caption
 * menu is presented.
 *
 * ## Features
 *
 * - Per page group caption preferences with coalesced change notifications
 * - Track selection scores for automatic track enabling
 * - Caption menu ranking and display names
 * - Integration with platform accessibility settings:
 *   - caption display mode and selected languages
 *   - caption appearance as a CSS override
 * - BCP 47 language tag matching with ISO 639 fallbacks
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `captions`: Caption preference handling:
 *   - `captions::store`: Preference state
 *   - `captions::source`: In-memory and system preference sources
 *   - `captions::scorer`: Track selection scores
 *   - `captions::ranker`: Caption menu ordering
 *   - `captions::selection`: Automatic track enabling
 * - `text_track`: Text track model and track list snapshots
 * - `language_utils`: Language tag utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod captions;
pub mod errors;
pub mod language_utils;
pub mod text_track;

// Re-export main types for easier usage
pub use app_config::Config;
pub use captions::{CaptionDisplayMode, CaptionPreferenceStore, CaptionPreferences, TaskQueue};
pub use errors::{AppError, ConfigError, TrackListError};
pub use language_utils::{index_of_best_matching_language_in_list, language_codes_match, language_display_name};
pub use text_track::{MediaContext, MenuItem, TextTrack, TrackKind, TrackListSnapshot, TrackMode};
