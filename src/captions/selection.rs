/*!
 * Automatic text track selection.
 *
 * Tracks are configured per group (captions and subtitles, descriptions,
 * chapters, metadata, other). Within a group at most one track is enabled:
 * the best scoring one, else the default track, else a matching forced
 * subtitle track, else the first track the user showed interest in.
 */

use log::debug;

use super::preferences::CaptionPreferences;
use super::store::CaptionDisplayMode;
use crate::text_track::{MediaContext, TextTrack, TrackKind, TrackMode};

/// Group a track is configured in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackGroup {
    CaptionsAndSubtitles,
    Descriptions,
    Chapters,
    Metadata,
    Other,
}

impl TrackGroup {
    pub const ALL: [TrackGroup; 5] = [
        TrackGroup::CaptionsAndSubtitles,
        TrackGroup::Descriptions,
        TrackGroup::Chapters,
        TrackGroup::Metadata,
        TrackGroup::Other,
    ];

    pub fn for_kind(kind: TrackKind) -> Self {
        match kind {
            TrackKind::Captions | TrackKind::Subtitles | TrackKind::Forced => Self::CaptionsAndSubtitles,
            TrackKind::Descriptions => Self::Descriptions,
            TrackKind::Chapters => Self::Chapters,
            TrackKind::Metadata => Self::Metadata,
            TrackKind::Other => Self::Other,
        }
    }
}

/// Outcome of selecting within one group. Indices refer to the track list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupSelection {
    pub track_to_enable: Option<usize>,
    pub default_track: Option<usize>,
    pub fallback_track: Option<usize>,
    /// Language of a track enabled because of forced subtitles or the automatic
    /// mode, rather than because the user asked for it
    pub forced_or_automatic_language: Option<String>,
}

/// Pick the track to enable among `group` (indices into `tracks`)
pub fn select_track_in_group(
    prefs: &CaptionPreferences,
    tracks: &[TextTrack],
    group: &[usize],
    media: Option<&MediaContext>,
) -> GroupSelection {
    let visible_track = group.iter().copied().find(|&index| tracks[index].is_showing());

    let mut track_to_enable = None;
    let mut default_track = None;
    let mut fallback_track = None;
    let mut forced_subtitle_track = None;
    let mut highest_track_score = 0;
    let mut highest_forced_score = 0;

    for &index in group {
        let track = &tracks[index];
        let score = prefs.text_track_selection_score(track, media);
        debug!("'{}' track '{}' with language '{}' has score {}", track.kind, track.id, track.language, score);

        if score > 0 {
            if score > highest_track_score {
                highest_track_score = score;
                track_to_enable = Some(index);
            }
            if default_track.is_none() && track.is_default {
                default_track = Some(index);
            }
            if default_track.is_none() && fallback_track.is_none() {
                fallback_track = Some(index);
            }
            if track.contains_only_forced_subtitles && score > highest_forced_score {
                forced_subtitle_track = Some(index);
                highest_forced_score = score;
            }
        } else if visible_track.is_none() && default_track.is_none() && track.is_default {
            default_track = Some(index);
        }
    }

    let track_to_enable = track_to_enable
        .or(default_track)
        .or(forced_subtitle_track)
        .or(fallback_track);

    let forced_or_automatic_language = match track_to_enable {
        Some(index)
            if default_track.is_none()
                && Some(index) != fallback_track
                && prefs.caption_display_mode() != CaptionDisplayMode::AlwaysOn =>
        {
            Some(tracks[index].language.clone())
        }
        _ => None,
    };

    GroupSelection {
        track_to_enable,
        default_track,
        fallback_track,
        forced_or_automatic_language,
    }
}

/// Configure every track group and apply the chosen modes.
///
/// When `processing_preference_change` is set, caption and subtitle tracks that
/// were showing but were not chosen again are disabled. Other groups keep their
/// showing tracks. Returns the forced-or-automatic language
/// of the captions and subtitles group.
pub fn configure_text_tracks(
    prefs: &CaptionPreferences,
    tracks: &mut [TextTrack],
    media: Option<&MediaContext>,
    processing_preference_change: bool,
) -> Option<String> {
    let mut caption_language = None;

    for group_kind in TrackGroup::ALL {
        let group: Vec<usize> = tracks
            .iter()
            .enumerate()
            .filter(|(_, track)| TrackGroup::for_kind(track.kind) == group_kind)
            .map(|(index, _)| index)
            .collect();
        if group.is_empty() {
            continue;
        }

        let selection = select_track_in_group(prefs, tracks, &group, media);

        // A preference change only concerns captions and subtitles.
        if processing_preference_change && group_kind == TrackGroup::CaptionsAndSubtitles {
            for &index in &group {
                if tracks[index].is_showing() && Some(index) != selection.track_to_enable {
                    tracks[index].mode = TrackMode::Disabled;
                }
            }
        }

        if let Some(index) = selection.track_to_enable {
            debug!("Enabling '{}' track '{}'", tracks[index].kind, tracks[index].id);
            tracks[index].mode = TrackMode::Showing;
        }

        if group_kind == TrackGroup::CaptionsAndSubtitles {
            caption_language = selection.forced_or_automatic_language;
        }
    }

    caption_language
}

/// An entry picked from the caption menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSelection {
    Off,
    Automatic,
    /// Index into the track list
    Track(usize),
}

/// Apply a caption menu choice to the track list and the preferences.
///
/// Choosing a track shows it, disables every other track, switches captions
/// always on and remembers the track language. Returns false when the choice
/// does not apply to `tracks`.
pub fn select_track_from_menu(prefs: &mut CaptionPreferences, tracks: &mut [TextTrack], selection: MenuSelection) -> bool {
    if tracks.is_empty() {
        return false;
    }

    let display_mode = match selection {
        MenuSelection::Off => CaptionDisplayMode::ForcedOnly,
        MenuSelection::Automatic => CaptionDisplayMode::Automatic,
        MenuSelection::Track(selected) => {
            if selected >= tracks.len() {
                return false;
            }
            for (index, track) in tracks.iter_mut().enumerate() {
                track.mode = if index == selected {
                    TrackMode::Showing
                } else {
                    TrackMode::Disabled
                };
            }

            let language = tracks[selected].language.clone();
            if !language.is_empty() {
                prefs.set_preferred_language(&language);
            }
            CaptionDisplayMode::AlwaysOn
        }
    };

    prefs.set_caption_display_mode(display_mode);
    true
}
