/*!
 * Caption menu ranking.
 *
 * Produces the ordered list of entries for the caption menu: "Off", then
 * "Automatic", then the tracks worth offering. Ranking is a pure function of
 * the track list snapshot and the preferences, and is simply re-run whenever
 * either changes.
 */

use log::debug;
use std::cmp::Ordering;
use std::collections::HashSet;

use super::source::{PreferenceSource, SelectionPolicy};
use crate::language_utils::{language_display_name, region_subtag};
use crate::text_track::{MenuItem, TextTrack, TrackKind};

pub const OFF_MENU_ITEM_TEXT: &str = "Off";
pub const AUTOMATIC_MENU_ITEM_TEXT: &str = "Auto (Recommended)";
pub const NO_LABEL_TEXT: &str = "no label";

/// Menu text of a track: its label, else its language, else "no label"
pub fn baseline_display_name(track: &TextTrack) -> String {
    if !track.label.is_empty() {
        return track.label.clone();
    }
    if !track.language.is_empty() {
        return track.language.clone();
    }
    NO_LABEL_TEXT.to_string()
}

fn accessible_base_display_name(track: &TextTrack) -> String {
    let language = language_display_name(&track.language);
    let region = region_subtag(&track.language);

    if !track.label.is_empty() {
        if language.is_empty() || track.label.contains(&language) {
            return track.label.clone();
        }
        return match region {
            Some(region) => format!("{} ({}-{})", track.label, language, region),
            None => format!("{} ({})", track.label, language),
        };
    }

    language_locale_name(&track.language)
}

/// Language name that keeps the region, so "en-US" and "en-GB" stay distinct
pub fn language_locale_name(tag: &str) -> String {
    let language = language_display_name(tag);
    match region_subtag(tag) {
        Some(region) if !language.is_empty() => format!("{} ({})", language, region),
        _ => language,
    }
}

/// Menu text of a track that also names its language and accessibility traits
pub fn accessible_display_name(track: &TextTrack) -> String {
    let mut display_name = accessible_base_display_name(track);
    if display_name.is_empty() {
        display_name = NO_LABEL_TEXT.to_string();
    }

    if track.is_easy_to_read {
        format!("{} Easy Reader", display_name)
    } else if track.is_closed_captions {
        format!("{} CC", display_name)
    } else if track.is_sdh {
        format!("{} SDH", display_name)
    } else if track.contains_only_forced_subtitles {
        format!("{} Forced", display_name)
    } else {
        display_name
    }
}

/// Ranks a track list for the caption menu
pub struct TrackListRanker<'a> {
    prefs: &'a dyn PreferenceSource,
}

impl<'a> TrackListRanker<'a> {
    pub fn new(prefs: &'a dyn PreferenceSource) -> Self {
        Self { prefs }
    }

    pub fn display_name_for_track(&self, track: &TextTrack) -> String {
        match self.prefs.selection_policy() {
            SelectionPolicy::Baseline => baseline_display_name(track),
            SelectionPolicy::AccessibilityAware { .. } => accessible_display_name(track),
        }
    }

    pub fn display_name_for_item(&self, item: &MenuItem<'_>) -> String {
        match item {
            MenuItem::Off => OFF_MENU_ITEM_TEXT.to_string(),
            MenuItem::Automatic => AUTOMATIC_MENU_ITEM_TEXT.to_string(),
            MenuItem::Track(track) => self.display_name_for_track(track),
        }
    }

    /// Menu entries: `Off`, `Automatic`, then the ranked tracks
    pub fn sorted_track_list_for_menu<'t>(&self, tracks: &'t [TextTrack]) -> Vec<MenuItem<'t>> {
        let ranked = match self.prefs.selection_policy() {
            SelectionPolicy::Baseline => Self::baseline_ranking(tracks),
            SelectionPolicy::AccessibilityAware { filter_track_menu } => {
                self.accessibility_ranking(tracks, filter_track_menu)
            }
        };

        let mut menu = Vec::with_capacity(ranked.len() + 2);
        menu.push(MenuItem::Off);
        menu.push(MenuItem::Automatic);
        menu.extend(ranked.into_iter().map(MenuItem::Track));
        menu
    }

    fn baseline_ranking(tracks: &[TextTrack]) -> Vec<&TextTrack> {
        let mut ranked: Vec<(String, &TextTrack)> = tracks
            .iter()
            .map(|track| (baseline_display_name(track), track))
            .collect();
        ranked.sort_by(|(a, _), (b, _)| a.cmp(b));
        ranked.into_iter().map(|(_, track)| track).collect()
    }

    fn accessibility_ranking<'t>(&self, tracks: &'t [TextTrack], filter_track_list: bool) -> Vec<&'t TextTrack> {
        let prefers_accessibility_tracks = self.prefs.user_prefers_captions();
        let mut languages_included: HashSet<String> = HashSet::new();
        let mut included = vec![false; tracks.len()];

        for (index, track) in tracks.iter().enumerate() {
            let language = language_locale_name(&track.language);

            if track.contains_only_forced_subtitles {
                debug!("Skipping '{}' track '{}': contains only forced subtitles", track.kind, track.id);
                continue;
            }

            let always_offered = track.is_easy_to_read || track.is_showing();
            if !always_offered && !language.is_empty() && track.is_main_program_content && filter_track_list {
                let is_accessibility_track = track.kind == TrackKind::Captions;
                if prefers_accessibility_tracks {
                    if !is_accessibility_track {
                        debug!("Skipping '{}' track '{}': user prefers accessibility tracks", track.kind, track.id);
                        continue;
                    }
                } else {
                    if is_accessibility_track {
                        debug!("Skipping '{}' track '{}': user prefers translation tracks", track.kind, track.id);
                        continue;
                    }
                    if languages_included.contains(&language) {
                        debug!("Skipping '{}' track '{}': language {} already offered", track.kind, track.id, language);
                        continue;
                    }
                }
            }

            if !language.is_empty() {
                languages_included.insert(language);
            }
            included[index] = true;
        }

        // Every language gets at least one entry, whatever its track type.
        for (index, track) in tracks.iter().enumerate() {
            if included[index] || track.contains_only_forced_subtitles || !track.is_main_program_content {
                continue;
            }
            let language = language_locale_name(&track.language);
            if language.is_empty() || languages_included.contains(&language) {
                continue;
            }
            debug!("Adding '{}' track '{}' so language {} is offered", track.kind, track.id, language);
            languages_included.insert(language);
            included[index] = true;
        }

        let default_language_name = language_locale_name(&self.prefs.store().default_language());
        let mut ranked: Vec<RankKey<'t>> = tracks
            .iter()
            .zip(included)
            .filter(|(_, keep)| *keep)
            .map(|(track, _)| RankKey::new(track, &default_language_name))
            .collect();
        ranked.sort_by(RankKey::compare);
        ranked.into_iter().map(|key| key.track).collect()
    }
}

/// Precomputed sort keys for the accessibility-aware menu order
struct RankKey<'t> {
    track: &'t TextTrack,
    language_name: String,
    in_default_language: bool,
    display_name: String,
}

impl<'t> RankKey<'t> {
    fn new(track: &'t TextTrack, default_language_name: &str) -> Self {
        let language_name = language_locale_name(&track.language);
        let in_default_language = !default_language_name.is_empty() && language_name == default_language_name;
        Self {
            track,
            language_name,
            in_default_language,
            display_name: accessible_display_name(track),
        }
    }

    fn compare(a: &Self, b: &Self) -> Ordering {
        // Tracks in the user's language head the menu...
        if a.in_default_language != b.in_default_language {
            return if a.in_default_language { Ordering::Less } else { Ordering::Greater };
        }

        // ...then tracks group by language...
        let by_language = a.language_name.cmp(&b.language_name);
        if by_language != Ordering::Equal {
            return by_language;
        }

        // ...main program content first within a language...
        let (a_main, b_main) = (a.track.is_main_program_content, b.track.is_main_program_content);
        if a_main != b_main {
            return if a_main { Ordering::Less } else { Ordering::Greater };
        }

        // ...main program tracks above their CC variant, while among secondary
        // content the CC track comes first...
        let (a_cc, b_cc) = (a.track.is_closed_captions, b.track.is_closed_captions);
        if a_cc != b_cc {
            let cc_first = !a_main;
            return if a_cc == cc_first { Ordering::Less } else { Ordering::Greater };
        }

        // ...and finally by menu text.
        a.display_name.cmp(&b.display_name)
    }
}
