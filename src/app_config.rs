use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::captions::{
    AccessibilitySettings, CaptionDisplayMode, CaptionPreferenceStore, CaptionPreferences,
    StaticAccessibilityService, TaskQueue,
};
use crate::errors::ConfigError;
use crate::language_utils::is_well_formed_tag;

/// Application configuration module
/// This module handles loading, validating and saving caption preference
/// configuration, and building a `CaptionPreferences` from it.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// In-memory caption preferences
    #[serde(default)]
    pub preferences: PreferencesConfig,

    /// Platform accessibility settings. When present, preferences integrate
    /// with them instead of being answered from memory alone.
    #[serde(default)]
    pub accessibility: Option<AccessibilitySettings>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Caption preferences held in memory for a session
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PreferencesConfig {
    #[serde(default)]
    pub display_mode: CaptionDisplayMode,

    #[serde(default)]
    pub prefers_captions: bool,

    #[serde(default)]
    pub prefers_subtitles: bool,

    #[serde(default)]
    pub prefers_text_descriptions: bool,

    /// System preferred languages, most preferred first
    #[serde(default = "default_system_languages")]
    pub system_languages: Vec<String>,

    /// Makes preferences ignore the platform and honor the overrides below
    #[serde(default)]
    pub testing_mode: bool,

    /// Language placed first in the preferred languages in testing mode
    #[serde(default)]
    pub preferred_language_override: String,

    /// Audio language used instead of the player's in testing mode
    #[serde(default)]
    pub primary_audio_language_override: String,

    #[serde(default)]
    pub captions_style_sheet_override: String,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            display_mode: CaptionDisplayMode::default(),
            prefers_captions: false,
            prefers_subtitles: false,
            prefers_text_descriptions: false,
            system_languages: default_system_languages(),
            testing_mode: false,
            preferred_language_override: String::new(),
            primary_audio_language_override: String::new(),
            captions_style_sheet_override: String::new(),
        }
    }
}

fn default_system_languages() -> Vec<String> {
    vec!["en".to_string()]
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn check_tag(field: &str, tag: &str) -> Result<(), ConfigError> {
    if is_well_formed_tag(tag) {
        return Ok(());
    }
    Err(ConfigError::InvalidLanguage {
        field: field.to_string(),
        tag: tag.to_string(),
    })
}

fn check_opacity(field: &str, value: Option<f32>) -> Result<(), ConfigError> {
    match value {
        Some(opacity) if !(0.0..=1.0).contains(&opacity) => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("opacity {} is outside 0.0..=1.0", opacity),
        }),
        _ => Ok(()),
    }
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let preferences = &self.preferences;
        for tag in &preferences.system_languages {
            check_tag("preferences.system_languages", tag)?;
        }
        if !preferences.preferred_language_override.is_empty() {
            check_tag("preferences.preferred_language_override", &preferences.preferred_language_override)?;
        }
        if !preferences.primary_audio_language_override.is_empty() {
            check_tag(
                "preferences.primary_audio_language_override",
                &preferences.primary_audio_language_override,
            )?;
        }

        if let Some(accessibility) = &self.accessibility {
            for tag in &accessibility.selected_languages {
                check_tag("accessibility.selected_languages", tag)?;
            }

            let appearance = &accessibility.appearance;
            check_opacity("accessibility.appearance.text_opacity", appearance.text_opacity.as_ref().map(|s| s.value))?;
            check_opacity(
                "accessibility.appearance.background_opacity",
                appearance.background_opacity.as_ref().map(|s| s.value),
            )?;
            check_opacity(
                "accessibility.appearance.window_opacity",
                appearance.window_opacity.as_ref().map(|s| s.value),
            )?;
            if let Some(size) = &appearance.relative_character_size {
                if size.value <= 0.0 {
                    return Err(ConfigError::InvalidValue {
                        field: "accessibility.appearance.relative_character_size".to_string(),
                        message: format!("size {} must be positive", size.value),
                    });
                }
            }
        }

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration as pretty printed JSON
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .map_err(|e| ConfigError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    /// Build caption preferences posting change notifications to `queue`
    pub fn build_preferences(&self, queue: TaskQueue) -> CaptionPreferences {
        let settings = &self.preferences;
        let mut store = CaptionPreferenceStore::new(queue);

        store.set_caption_display_mode(settings.display_mode);
        store.set_user_prefers_captions(settings.prefers_captions);
        store.set_user_prefers_subtitles(settings.prefers_subtitles);
        store.set_user_prefers_text_descriptions(settings.prefers_text_descriptions);
        store.set_system_languages(settings.system_languages.clone());
        if !settings.preferred_language_override.is_empty() {
            store.set_preferred_language(&settings.preferred_language_override);
        }
        if !settings.primary_audio_language_override.is_empty() {
            store.set_primary_audio_track_language_override(&settings.primary_audio_language_override);
        }
        if !settings.captions_style_sheet_override.is_empty() {
            store.set_captions_style_sheet_override(&settings.captions_style_sheet_override);
        }
        store.set_testing_mode(settings.testing_mode);

        match &self.accessibility {
            Some(accessibility) => CaptionPreferences::with_accessibility_service(
                store,
                std::sync::Arc::new(StaticAccessibilityService::new(accessibility.clone())),
            ),
            None => CaptionPreferences::in_memory(store),
        }
    }
}
