/*!
 * Text track model.
 *
 * A `TextTrack` is a read-only view of one caption, subtitle or description
 * track of a media resource. Track lists are snapshots owned by the caller;
 * scoring and ranking only borrow them.
 */

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::errors::TrackListError;

/// Kind of a text track
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Captions,
    #[default]
    Subtitles,
    Descriptions,
    Forced,
    Chapters,
    Metadata,
    Other,
}

impl TrackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Captions => "captions",
            Self::Subtitles => "subtitles",
            Self::Descriptions => "descriptions",
            Self::Forced => "forced",
            Self::Chapters => "chapters",
            Self::Metadata => "metadata",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text track mode
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrackMode {
    #[default]
    Disabled,
    Hidden,
    Showing,
}

/// One caption/subtitle/description track
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TextTrack {
    /// Identifier unique within a track list
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub kind: TrackKind,

    /// BCP-47 language tag, possibly empty
    #[serde(default)]
    pub language: String,

    /// Free text label, possibly empty
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub mode: TrackMode,

    /// Set on tracks whose track element carries the default attribute
    #[serde(default)]
    pub is_default: bool,

    #[serde(default)]
    pub is_closed_captions: bool,

    #[serde(default)]
    pub is_sdh: bool,

    #[serde(default)]
    pub is_easy_to_read: bool,

    #[serde(default = "default_true")]
    pub is_main_program_content: bool,

    #[serde(default)]
    pub contains_only_forced_subtitles: bool,
}

fn default_true() -> bool {
    true
}

impl TextTrack {
    /// Create a main-program track with the given kind and language
    pub fn new(id: &str, kind: TrackKind, language: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            language: language.to_string(),
            label: String::new(),
            mode: TrackMode::Disabled,
            is_default: false,
            is_closed_captions: false,
            is_sdh: false,
            is_easy_to_read: false,
            is_main_program_content: true,
            contains_only_forced_subtitles: false,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn with_mode(mut self, mode: TrackMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn closed_captions(mut self) -> Self {
        self.is_closed_captions = true;
        self
    }

    pub fn sdh(mut self) -> Self {
        self.is_sdh = true;
        self
    }

    pub fn easy_to_read(mut self) -> Self {
        self.is_easy_to_read = true;
        self
    }

    pub fn forced_only(mut self) -> Self {
        self.contains_only_forced_subtitles = true;
        self
    }

    pub fn default_track(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn not_main_program(mut self) -> Self {
        self.is_main_program_content = false;
        self
    }

    pub fn is_showing(&self) -> bool {
        self.mode == TrackMode::Showing
    }
}

/// An entry of the caption menu: the two fixed pseudo-tracks or a real track
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuItem<'a> {
    Off,
    Automatic,
    Track(&'a TextTrack),
}

impl<'a> MenuItem<'a> {
    pub fn track(&self) -> Option<&'a TextTrack> {
        match self {
            Self::Track(track) => Some(track),
            _ => None,
        }
    }
}

/// Media element state that influences scoring
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MediaContext {
    /// Language of the primary audio track reported by the media player
    #[serde(default)]
    pub primary_audio_language: Option<String>,

    /// Legacy "closed captions visible" switch set by script
    #[serde(default)]
    pub closed_captions_visible: bool,
}

impl MediaContext {
    pub fn with_audio_language(language: &str) -> Self {
        Self {
            primary_audio_language: Some(language.to_string()),
            closed_captions_visible: false,
        }
    }
}

/// A track list snapshot as read from disk by the CLI
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TrackListSnapshot {
    #[serde(default)]
    pub media: MediaContext,

    #[serde(default)]
    pub tracks: Vec<TextTrack>,
}

impl TrackListSnapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self, TrackListError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TrackListError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Parse a snapshot, assigning positional ids to tracks without one.
    /// A position already used as an explicit id moves on to the next free number.
    pub fn from_json(content: &str) -> Result<Self, TrackListError> {
        let mut snapshot: TrackListSnapshot = serde_json::from_str(content)?;

        // Explicit ids are reserved first so positional ids never collide with them.
        let mut taken = HashSet::new();
        for track in snapshot.tracks.iter().filter(|track| !track.id.is_empty()) {
            if !taken.insert(track.id.clone()) {
                return Err(TrackListError::DuplicateTrackId(track.id.clone()));
            }
        }

        for (index, track) in snapshot.tracks.iter_mut().enumerate() {
            if !track.id.is_empty() {
                continue;
            }
            let mut position = index;
            while taken.contains(&position.to_string()) {
                position += 1;
            }
            track.id = position.to_string();
            taken.insert(track.id.clone());
        }

        Ok(snapshot)
    }
}
