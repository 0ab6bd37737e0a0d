/*!
 * Caption preferences facade.
 *
 * `CaptionPreferences` owns one preference source, chosen at construction,
 * and exposes the operations the media element and its controls use.
 */

use std::sync::Arc;

use super::accessibility::AccessibilityService;
use super::notifier::CaptionPreferencesObserver;
use super::ranker::TrackListRanker;
use super::scorer::{Score, TrackScorer};
use super::source::{InMemoryPreferences, PreferenceSource, SelectionPolicy, SystemPreferences};
use super::store::{CaptionDisplayMode, CaptionPreferenceStore};
use crate::text_track::{MediaContext, MenuItem, TextTrack};

pub struct CaptionPreferences {
    source: Box<dyn PreferenceSource>,
}

impl CaptionPreferences {
    /// Preferences answered from the store alone
    pub fn in_memory(store: CaptionPreferenceStore) -> Self {
        Self {
            source: Box::new(InMemoryPreferences::new(store)),
        }
    }

    /// Preferences integrated with the platform accessibility service
    pub fn with_accessibility_service(store: CaptionPreferenceStore, service: Arc<dyn AccessibilityService>) -> Self {
        Self {
            source: Box::new(SystemPreferences::new(store, service)),
        }
    }

    pub fn from_source(source: Box<dyn PreferenceSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &dyn PreferenceSource {
        self.source.as_ref()
    }

    pub fn store(&self) -> &CaptionPreferenceStore {
        self.source.store()
    }

    pub fn store_mut(&mut self) -> &mut CaptionPreferenceStore {
        self.source.store_mut()
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        self.source.selection_policy()
    }

    pub fn caption_display_mode(&self) -> CaptionDisplayMode {
        self.source.caption_display_mode()
    }

    pub fn set_caption_display_mode(&mut self, mode: CaptionDisplayMode) {
        self.source.set_caption_display_mode(mode);
    }

    pub fn user_prefers_captions(&self) -> bool {
        self.source.user_prefers_captions()
    }

    pub fn set_user_prefers_captions(&mut self, preference: bool) {
        self.source.set_user_prefers_captions(preference);
    }

    pub fn user_prefers_subtitles(&self) -> bool {
        self.source.user_prefers_subtitles()
    }

    pub fn set_user_prefers_subtitles(&mut self, preference: bool) {
        self.source.set_user_prefers_subtitles(preference);
    }

    pub fn user_prefers_text_descriptions(&self) -> bool {
        self.source.user_prefers_text_descriptions()
    }

    pub fn set_user_prefers_text_descriptions(&mut self, preference: bool) {
        self.source.set_user_prefers_text_descriptions(preference);
    }

    pub fn preferred_languages(&self) -> Vec<String> {
        self.source.preferred_languages()
    }

    pub fn set_preferred_language(&mut self, language: &str) {
        self.source.set_preferred_language(language);
    }

    pub fn captions_style_sheet_override(&self) -> String {
        self.source.captions_style_sheet_override()
    }

    pub fn set_captions_style_sheet_override(&mut self, style_sheet: &str) {
        self.source.set_captions_style_sheet_override(style_sheet);
    }

    pub fn caption_font_size_scale(&self) -> (f32, bool) {
        self.source.caption_font_size_scale()
    }

    pub fn testing_mode(&self) -> bool {
        self.store().testing_mode()
    }

    pub fn set_testing_mode(&mut self, testing_mode: bool) {
        self.store_mut().set_testing_mode(testing_mode);
    }

    pub fn set_primary_audio_track_language_override(&mut self, language: &str) {
        self.store_mut().set_primary_audio_track_language_override(language);
    }

    pub fn register_observer(&self, observer: &Arc<dyn CaptionPreferencesObserver>) {
        self.store().register_observer(observer);
    }

    pub fn unregister_observer(&self, observer: &Arc<dyn CaptionPreferencesObserver>) {
        self.store().unregister_observer(observer);
    }

    pub fn text_track_selection_score(&self, track: &TextTrack, media: Option<&MediaContext>) -> Score {
        TrackScorer::new(self.source()).score(track, media)
    }

    pub fn sorted_track_list_for_menu<'t>(&self, tracks: &'t [TextTrack]) -> Vec<MenuItem<'t>> {
        TrackListRanker::new(self.source()).sorted_track_list_for_menu(tracks)
    }

    pub fn display_name_for_track(&self, track: &TextTrack) -> String {
        TrackListRanker::new(self.source()).display_name_for_track(track)
    }

    pub fn display_name_for_menu_item(&self, item: &MenuItem<'_>) -> String {
        TrackListRanker::new(self.source()).display_name_for_item(item)
    }
}
