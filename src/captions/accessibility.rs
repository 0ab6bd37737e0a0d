/*!
 * System accessibility service seam.
 *
 * On a live system caption preferences can also come from the platform's
 * media accessibility settings. The service reports raw platform codes; the
 * preference source maps them, treating unknown codes as logic errors.
 */

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::store::CaptionDisplayMode;
use super::style::{CaptionAppearance, TextEdgeStyle};

/// Queries answered by the platform media accessibility settings
pub trait AccessibilityService: Send + Sync {
    /// Raw caption display type (0 forced only, 1 automatic, 2 always on)
    fn display_type(&self) -> i32;

    fn set_display_type(&self, display_type: i32);

    /// Caption languages selected by the user, most preferred first
    fn selected_languages(&self) -> Vec<String>;

    fn add_selected_language(&self, language: &str);

    /// Media characteristics the user wants in captions (e.g. "public.accessibility.describes-music-and-sound")
    fn preferred_captioning_characteristics(&self) -> Vec<String>;

    /// Whether the platform can answer `preferred_captioning_characteristics`,
    /// which is what allows the caption menu to be filtered
    fn supports_characteristics_query(&self) -> bool;

    fn appearance(&self) -> CaptionAppearance;

    /// Raw text edge style code (see `TextEdgeStyle::from_system_code`)
    fn text_edge_style(&self) -> i32;
}

/// Accessibility settings as stored in configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccessibilitySettings {
    #[serde(default = "default_display_mode")]
    pub display_mode: CaptionDisplayMode,

    #[serde(default)]
    pub selected_languages: Vec<String>,

    #[serde(default)]
    pub captioning_characteristics: Vec<String>,

    #[serde(default = "default_true")]
    pub supports_characteristics_query: bool,

    #[serde(default)]
    pub appearance: CaptionAppearance,
}

fn default_display_mode() -> CaptionDisplayMode {
    CaptionDisplayMode::Automatic
}

fn default_true() -> bool {
    true
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            display_mode: default_display_mode(),
            selected_languages: Vec::new(),
            captioning_characteristics: Vec::new(),
            supports_characteristics_query: true,
            appearance: CaptionAppearance::default(),
        }
    }
}

/// An accessibility service answering from fixed settings.
///
/// Writes (display type, added languages) are kept in memory so that the
/// service behaves like the platform within one session.
pub struct StaticAccessibilityService {
    settings: Mutex<AccessibilitySettings>,
}

impl StaticAccessibilityService {
    pub fn new(settings: AccessibilitySettings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }

    pub fn settings(&self) -> AccessibilitySettings {
        self.settings.lock().clone()
    }
}

impl AccessibilityService for StaticAccessibilityService {
    fn display_type(&self) -> i32 {
        self.settings.lock().display_mode.system_code()
    }

    fn set_display_type(&self, display_type: i32) {
        self.settings.lock().display_mode = CaptionDisplayMode::from_system_code(display_type);
    }

    fn selected_languages(&self) -> Vec<String> {
        self.settings.lock().selected_languages.clone()
    }

    fn add_selected_language(&self, language: &str) {
        let mut settings = self.settings.lock();
        settings.selected_languages.retain(|existing| existing != language);
        settings.selected_languages.insert(0, language.to_string());
    }

    fn preferred_captioning_characteristics(&self) -> Vec<String> {
        self.settings.lock().captioning_characteristics.clone()
    }

    fn supports_characteristics_query(&self) -> bool {
        self.settings.lock().supports_characteristics_query
    }

    fn appearance(&self) -> CaptionAppearance {
        self.settings.lock().appearance.clone()
    }

    fn text_edge_style(&self) -> i32 {
        let style: TextEdgeStyle = self.settings.lock().appearance.text_edge_style;
        style.system_code()
    }
}
