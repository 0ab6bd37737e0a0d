/*!
 * Preference sources.
 *
 * `PreferenceSource` is the capability interface the scorer and ranker read.
 * `InMemoryPreferences` answers purely from the store. `SystemPreferences`
 * layers the platform accessibility service on top of it; in testing mode it
 * answers from the store too, so tests are independent of the platform.
 */

use std::sync::Arc;

use super::accessibility::AccessibilityService;
use super::store::{CaptionDisplayMode, CaptionPreferenceStore};
use super::style::{DEFAULT_FONT_SIZE_SCALE, captions_style_sheet};

/// Which scoring and ranking rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Kind and language matching only
    Baseline,
    /// Accessibility characteristics, forced subtitles and audio language aware.
    /// `filter_track_menu` allows the menu to hide tracks of the type the user
    /// does not prefer.
    AccessibilityAware { filter_track_menu: bool },
}

/// Caption preferences as seen by scoring and ranking
pub trait PreferenceSource {
    fn store(&self) -> &CaptionPreferenceStore;
    fn store_mut(&mut self) -> &mut CaptionPreferenceStore;
    fn selection_policy(&self) -> SelectionPolicy;

    fn caption_display_mode(&self) -> CaptionDisplayMode;
    fn set_caption_display_mode(&mut self, mode: CaptionDisplayMode);

    fn user_prefers_captions(&self) -> bool;
    fn set_user_prefers_captions(&mut self, preference: bool);

    fn user_prefers_subtitles(&self) -> bool;
    fn set_user_prefers_subtitles(&mut self, preference: bool);

    fn user_prefers_text_descriptions(&self) -> bool;
    fn set_user_prefers_text_descriptions(&mut self, preference: bool);

    /// Preferred caption languages, most preferred first
    fn preferred_languages(&self) -> Vec<String>;
    fn set_preferred_language(&mut self, language: &str);

    fn captions_style_sheet_override(&self) -> String;
    fn set_captions_style_sheet_override(&mut self, style_sheet: &str);

    /// Caption font size as a fraction of the video height, and whether it is important
    fn caption_font_size_scale(&self) -> (f32, bool);
}

/// Preferences held only in memory
pub struct InMemoryPreferences {
    store: CaptionPreferenceStore,
}

impl InMemoryPreferences {
    pub fn new(store: CaptionPreferenceStore) -> Self {
        Self { store }
    }
}

impl PreferenceSource for InMemoryPreferences {
    fn store(&self) -> &CaptionPreferenceStore {
        &self.store
    }

    fn store_mut(&mut self) -> &mut CaptionPreferenceStore {
        &mut self.store
    }

    fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::Baseline
    }

    fn caption_display_mode(&self) -> CaptionDisplayMode {
        self.store.caption_display_mode()
    }

    fn set_caption_display_mode(&mut self, mode: CaptionDisplayMode) {
        self.store.set_caption_display_mode(mode);
    }

    fn user_prefers_captions(&self) -> bool {
        self.store.user_prefers_captions()
    }

    fn set_user_prefers_captions(&mut self, preference: bool) {
        self.store.set_user_prefers_captions(preference);
    }

    fn user_prefers_subtitles(&self) -> bool {
        self.store.user_prefers_subtitles()
    }

    fn set_user_prefers_subtitles(&mut self, preference: bool) {
        self.store.set_user_prefers_subtitles(preference);
    }

    fn user_prefers_text_descriptions(&self) -> bool {
        self.store.user_prefers_text_descriptions()
    }

    fn set_user_prefers_text_descriptions(&mut self, preference: bool) {
        self.store.set_user_prefers_text_descriptions(preference);
    }

    fn preferred_languages(&self) -> Vec<String> {
        self.store.preferred_languages()
    }

    fn set_preferred_language(&mut self, language: &str) {
        self.store.set_preferred_language(language);
    }

    fn captions_style_sheet_override(&self) -> String {
        self.store.captions_style_sheet_override().to_string()
    }

    fn set_captions_style_sheet_override(&mut self, style_sheet: &str) {
        self.store.set_captions_style_sheet_override(style_sheet);
    }

    fn caption_font_size_scale(&self) -> (f32, bool) {
        (DEFAULT_FONT_SIZE_SCALE, false)
    }
}

/// Preferences backed by the platform accessibility service
pub struct SystemPreferences {
    store: CaptionPreferenceStore,
    service: Arc<dyn AccessibilityService>,
}

impl SystemPreferences {
    pub fn new(store: CaptionPreferenceStore, service: Arc<dyn AccessibilityService>) -> Self {
        Self { store, service }
    }

    pub fn service(&self) -> &Arc<dyn AccessibilityService> {
        &self.service
    }

    /// Whether queries go to the platform rather than the store
    fn consults_service(&self) -> bool {
        self.store.has_page() && !self.store.testing_mode()
    }
}

impl PreferenceSource for SystemPreferences {
    fn store(&self) -> &CaptionPreferenceStore {
        &self.store
    }

    fn store_mut(&mut self) -> &mut CaptionPreferenceStore {
        &mut self.store
    }

    fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::AccessibilityAware {
            filter_track_menu: self.service.supports_characteristics_query(),
        }
    }

    fn caption_display_mode(&self) -> CaptionDisplayMode {
        if !self.consults_service() {
            return self.store.caption_display_mode();
        }
        CaptionDisplayMode::from_system_code(self.service.display_type())
    }

    fn set_caption_display_mode(&mut self, mode: CaptionDisplayMode) {
        if !self.consults_service() {
            self.store.set_caption_display_mode(mode);
            return;
        }
        self.service.set_display_type(mode.system_code());
        self.store.notify();
    }

    /// The platform can only turn the preference on: an explicit `true` in the
    /// store always wins.
    fn user_prefers_captions(&self) -> bool {
        let captions_setting = self.store.user_prefers_captions();
        if captions_setting || !self.consults_service() {
            return captions_setting;
        }
        !self.service.preferred_captioning_characteristics().is_empty()
    }

    fn set_user_prefers_captions(&mut self, preference: bool) {
        self.store.set_user_prefers_captions(preference);
    }

    fn user_prefers_subtitles(&self) -> bool {
        let subtitles_setting = self.store.user_prefers_subtitles();
        if subtitles_setting || !self.consults_service() {
            return subtitles_setting;
        }
        !self.service.selected_languages().is_empty()
    }

    fn set_user_prefers_subtitles(&mut self, preference: bool) {
        self.store.set_user_prefers_subtitles(preference);
    }

    fn user_prefers_text_descriptions(&self) -> bool {
        self.store.user_prefers_text_descriptions()
    }

    fn set_user_prefers_text_descriptions(&mut self, preference: bool) {
        self.store.set_user_prefers_text_descriptions(preference);
    }

    fn preferred_languages(&self) -> Vec<String> {
        if !self.consults_service() {
            return self.store.preferred_languages();
        }

        let selected = self.service.selected_languages();
        if selected.is_empty() {
            return self.store.preferred_languages();
        }

        let mut languages = selected;
        languages.extend(self.store.system_languages().iter().cloned());
        languages
    }

    fn set_preferred_language(&mut self, language: &str) {
        if !self.consults_service() {
            self.store.set_preferred_language(language);
            return;
        }
        self.service.add_selected_language(language);
        self.store.notify();
    }

    fn captions_style_sheet_override(&self) -> String {
        if !self.consults_service() {
            return self.store.captions_style_sheet_override().to_string();
        }
        captions_style_sheet(&self.service.appearance(), self.service.text_edge_style())
    }

    fn set_captions_style_sheet_override(&mut self, style_sheet: &str) {
        self.store.set_captions_style_sheet_override(style_sheet);
    }

    fn caption_font_size_scale(&self) -> (f32, bool) {
        if !self.consults_service() {
            return (DEFAULT_FONT_SIZE_SCALE, false);
        }
        self.service.appearance().font_size_scale()
    }
}
