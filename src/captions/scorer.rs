/*!
 * Text track selection scoring.
 *
 * A score says how well a track suits the current caption preferences. Higher
 * is better and zero means the track is not a candidate at all. Scores are
 * pure: the same track, preferences and media context always give the same
 * number.
 */

use log::trace;

use super::source::{PreferenceSource, SelectionPolicy};
use super::store::CaptionDisplayMode;
use crate::language_utils::index_of_best_matching_language_in_list;
use crate::text_track::{MediaContext, TextTrack, TrackKind};

/// Track selection score
pub type Score = i32;

/// Weight of one step in the preferred language list. Must exceed the largest
/// type rank so that matching language always beats matching track type.
pub const LANGUAGE_MATCH_WEIGHT: Score = 10;

/// Bonus for the position of the track language in `preferred_languages`:
/// `(n - i) * 10` for a best match at index `i`, zero without a match.
pub fn language_selection_score(track: &TextTrack, preferred_languages: &[String]) -> Score {
    if track.language.is_empty() {
        return 0;
    }

    let match_index = index_of_best_matching_language_in_list(&track.language, preferred_languages);
    if match_index >= preferred_languages.len() {
        return 0;
    }

    (preferred_languages.len() - match_index) as Score * LANGUAGE_MATCH_WEIGHT
}

/// Scores tracks against a preference source
pub struct TrackScorer<'a> {
    prefs: &'a dyn PreferenceSource,
}

impl<'a> TrackScorer<'a> {
    pub fn new(prefs: &'a dyn PreferenceSource) -> Self {
        Self { prefs }
    }

    pub fn score(&self, track: &TextTrack, media: Option<&MediaContext>) -> Score {
        let score = match self.prefs.selection_policy() {
            SelectionPolicy::Baseline => self.baseline_score(track),
            SelectionPolicy::AccessibilityAware { .. } => self.accessibility_score(track, media),
        };
        trace!(
            "'{}' track '{}' with language '{}' has score {}",
            track.kind, track.id, track.language, score
        );
        score
    }

    fn baseline_score(&self, track: &TextTrack) -> Score {
        if track.kind != TrackKind::Captions && track.kind != TrackKind::Subtitles {
            return 0;
        }

        let prefers_subtitles = self.prefs.user_prefers_subtitles();
        let prefers_captions = self.prefs.user_prefers_captions();
        if !prefers_subtitles && !prefers_captions {
            return 0;
        }

        let kind_preferred = (track.kind == TrackKind::Subtitles && prefers_subtitles)
            || (track.kind == TrackKind::Captions && prefers_captions);
        if !kind_preferred {
            return 0;
        }

        1 + language_selection_score(track, &self.prefs.preferred_languages())
    }

    fn accessibility_score(&self, track: &TextTrack, media: Option<&MediaContext>) -> Score {
        let display_mode = self.prefs.caption_display_mode();
        let legacy_override = media.is_some_and(|m| m.closed_captions_visible);
        let prefers_captions = self.prefs.user_prefers_captions();

        // Always-on with nothing chosen yet shows nothing.
        if display_mode == CaptionDisplayMode::AlwaysOn
            && !self.prefs.user_prefers_subtitles()
            && !prefers_captions
            && !legacy_override
        {
            return 0;
        }

        if !matches!(track.kind, TrackKind::Captions | TrackKind::Subtitles | TrackKind::Forced) {
            return 0;
        }
        if !track.is_main_program_content {
            return 0;
        }

        let forced_only = track.contains_only_forced_subtitles;
        if !legacy_override {
            let forced_mode = display_mode == CaptionDisplayMode::ForcedOnly;
            if forced_only != forced_mode {
                return 0;
            }
        }

        let mut preferred_languages = self.prefs.preferred_languages();
        if (display_mode == CaptionDisplayMode::Automatic && !legacy_override) || forced_only {
            let Some(media) = media else {
                return 0;
            };
            if track.language.is_empty() {
                return 0;
            }

            let audio_language = self.primary_audio_language(media);
            if audio_language.is_empty() {
                return 0;
            }

            let language_list = if forced_only {
                // A forced-only track is only useful in the language being spoken.
                let language_list = vec![audio_language];
                if index_of_best_matching_language_in_list(&track.language, &language_list) != 0 {
                    return 0;
                }
                language_list
            } else {
                let language_list = vec![self.prefs.store().default_language()];

                // Only when the audio is NOT in the user's language...
                if index_of_best_matching_language_in_list(&audio_language, &language_list) == 0 {
                    return 0;
                }
                // ...and the track IS.
                if index_of_best_matching_language_in_list(&track.language, &language_list) != 0 {
                    return 0;
                }
                language_list
            };

            preferred_languages = language_list;
        }

        type_rank(track, prefers_captions) + language_selection_score(track, &preferred_languages)
    }

    fn primary_audio_language(&self, media: &MediaContext) -> String {
        let store = self.prefs.store();
        if store.testing_mode() {
            return store.primary_audio_track_language_override().to_string();
        }
        media.primary_audio_language.clone().unwrap_or_default()
    }
}

/// Accessibility tracks (SDH, then CC, then subtitles) rank first when the user
/// prefers captions, translation tracks rank first otherwise.
fn type_rank(track: &TextTrack, prefers_captions: bool) -> Score {
    let is_subtitles = track.kind == TrackKind::Subtitles;
    if prefers_captions {
        if is_subtitles {
            1
        } else if track.is_closed_captions {
            2
        } else {
            3
        }
    } else if is_subtitles {
        3
    } else if !track.is_closed_captions {
        2
    } else {
        1
    }
}
