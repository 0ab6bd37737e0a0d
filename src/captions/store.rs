/*!
 * In-memory caption preference state.
 *
 * One store exists per page group. It is owned by whoever owns the page group and
 * is handed to the scorer and ranker through a `PreferenceSource`.
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::notifier::{CaptionPreferencesObserver, ChangeNotifier, TaskQueue};

/// Policy governing whether and when captions are shown
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaptionDisplayMode {
    Automatic,
    #[default]
    ForcedOnly,
    AlwaysOn,
}

impl CaptionDisplayMode {
    /// Map a display type code reported by the system accessibility service.
    ///
    /// Codes: 0 forced only, 1 automatic, 2 always on. Anything else is a logic
    /// error: it asserts in debug builds and degrades to `ForcedOnly`.
    pub fn from_system_code(code: i32) -> Self {
        match code {
            0 => Self::ForcedOnly,
            1 => Self::Automatic,
            2 => Self::AlwaysOn,
            other => {
                debug_assert!(false, "unexpected caption display type {}", other);
                warn!("Unexpected caption display type {}, using forced-only", other);
                Self::ForcedOnly
            }
        }
    }

    pub fn system_code(&self) -> i32 {
        match self {
            Self::ForcedOnly => 0,
            Self::Automatic => 1,
            Self::AlwaysOn => 2,
        }
    }
}

impl fmt::Display for CaptionDisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Automatic => "automatic",
            Self::ForcedOnly => "forced_only",
            Self::AlwaysOn => "always_on",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for CaptionDisplayMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "automatic" | "auto" => Ok(Self::Automatic),
            "forced_only" | "forced" | "off" => Ok(Self::ForcedOnly),
            "always_on" | "on" => Ok(Self::AlwaysOn),
            _ => Err(anyhow::anyhow!("Invalid caption display mode: {}", s)),
        }
    }
}

/// Per-page caption settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSettings {
    pub should_display_captions: bool,
    pub should_display_subtitles: bool,
    pub should_display_text_descriptions: bool,
}

/// Caption preference state for one page group
pub struct CaptionPreferenceStore {
    page: Option<PageSettings>,
    display_mode: CaptionDisplayMode,
    testing_mode: bool,
    have_preferences: bool,
    system_languages: Vec<String>,
    user_preferred_language: String,
    primary_audio_track_language_override: String,
    captions_style_sheet_override: String,
    notifier: ChangeNotifier,
}

impl CaptionPreferenceStore {
    /// Create a store attached to a page, posting notifications to `queue`
    pub fn new(queue: TaskQueue) -> Self {
        Self::with_page(Some(PageSettings::default()), queue)
    }

    /// Create a store with no page context. Every query answers its safe default.
    pub fn detached(queue: TaskQueue) -> Self {
        Self::with_page(None, queue)
    }

    fn with_page(page: Option<PageSettings>, queue: TaskQueue) -> Self {
        Self {
            page,
            display_mode: CaptionDisplayMode::ForcedOnly,
            testing_mode: false,
            have_preferences: false,
            system_languages: Vec::new(),
            user_preferred_language: String::new(),
            primary_audio_track_language_override: String::new(),
            captions_style_sheet_override: String::new(),
            notifier: ChangeNotifier::new(queue),
        }
    }

    pub fn has_page(&self) -> bool {
        self.page.is_some()
    }

    pub fn caption_display_mode(&self) -> CaptionDisplayMode {
        if self.page.is_none() {
            return CaptionDisplayMode::ForcedOnly;
        }
        self.display_mode
    }

    /// Set the display mode. In testing mode anything but `AlwaysOn` also turns
    /// off the captions and subtitles preferences.
    pub fn set_caption_display_mode(&mut self, mode: CaptionDisplayMode) {
        debug!("Caption display mode set to {}", mode);
        self.display_mode = mode;
        if self.testing_mode && mode != CaptionDisplayMode::AlwaysOn {
            self.set_user_prefers_captions(false);
            self.set_user_prefers_subtitles(false);
        }
        self.notify();
    }

    pub fn user_prefers_captions(&self) -> bool {
        self.page.is_some_and(|page| page.should_display_captions)
    }

    pub fn set_user_prefers_captions(&mut self, preference: bool) {
        let Some(page) = self.page.as_mut() else {
            return;
        };
        page.should_display_captions = preference;
        self.notify();
    }

    pub fn user_prefers_subtitles(&self) -> bool {
        self.page.is_some_and(|page| page.should_display_subtitles)
    }

    pub fn set_user_prefers_subtitles(&mut self, preference: bool) {
        let Some(page) = self.page.as_mut() else {
            return;
        };
        page.should_display_subtitles = preference;
        self.notify();
    }

    pub fn user_prefers_text_descriptions(&self) -> bool {
        self.page.is_some_and(|page| page.should_display_text_descriptions)
    }

    pub fn set_user_prefers_text_descriptions(&mut self, preference: bool) {
        let Some(page) = self.page.as_mut() else {
            return;
        };
        page.should_display_text_descriptions = preference;
        self.notify();
    }

    /// Languages reported by the system, most preferred first
    pub fn system_languages(&self) -> &[String] {
        &self.system_languages
    }

    pub fn set_system_languages(&mut self, languages: Vec<String>) {
        self.system_languages = languages;
        self.notify();
    }

    /// The user's default language: the first system language, or empty
    pub fn default_language(&self) -> String {
        self.system_languages.first().cloned().unwrap_or_default()
    }

    /// System languages, with the override language first in testing mode
    pub fn preferred_languages(&self) -> Vec<String> {
        if self.page.is_none() {
            return Vec::new();
        }

        let mut languages = self.system_languages.clone();
        if self.testing_mode && !self.user_preferred_language.is_empty() {
            languages.insert(0, self.user_preferred_language.clone());
        }
        languages
    }

    pub fn set_preferred_language(&mut self, language: &str) {
        self.user_preferred_language = language.to_string();
        self.notify();
    }

    pub fn testing_mode(&self) -> bool {
        self.testing_mode
    }

    pub fn set_testing_mode(&mut self, testing_mode: bool) {
        self.testing_mode = testing_mode;
    }

    /// Audio language used instead of the player's in testing mode
    pub fn primary_audio_track_language_override(&self) -> &str {
        &self.primary_audio_track_language_override
    }

    pub fn set_primary_audio_track_language_override(&mut self, language: &str) {
        self.primary_audio_track_language_override = language.to_string();
        self.notify();
    }

    pub fn captions_style_sheet_override(&self) -> &str {
        &self.captions_style_sheet_override
    }

    pub fn set_captions_style_sheet_override(&mut self, style_sheet: &str) {
        self.captions_style_sheet_override = style_sheet.to_string();
        self.notify();
    }

    /// Whether any preference has been set since the store was created
    pub fn have_preferences(&self) -> bool {
        self.have_preferences
    }

    pub fn register_observer(&self, observer: &Arc<dyn CaptionPreferencesObserver>) {
        self.notifier.register(observer);
    }

    pub fn unregister_observer(&self, observer: &Arc<dyn CaptionPreferencesObserver>) {
        self.notifier.unregister(observer);
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Record that preferences changed and schedule the coalesced notification
    pub fn notify(&mut self) {
        self.have_preferences = true;
        self.notifier.schedule();
    }
}
