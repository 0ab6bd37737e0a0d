/*!
 * Tests for caption menu ranking and display names
 */

use caption_prefs::captions::{AccessibilitySettings, CaptionPreferences, TaskQueue};
use caption_prefs::text_track::{MenuItem, TextTrack, TrackMode};
use crate::common::{self, captions, subtitles};

fn menu_ids(prefs: &CaptionPreferences, tracks: &[TextTrack]) -> Vec<String> {
    prefs
        .sorted_track_list_for_menu(tracks)
        .iter()
        .map(|item| match item {
            MenuItem::Off => "off".to_string(),
            MenuItem::Automatic => "auto".to_string(),
            MenuItem::Track(track) => track.id.clone(),
        })
        .collect()
}

fn unfiltered_settings() -> AccessibilitySettings {
    AccessibilitySettings {
        supports_characteristics_query: false,
        ..AccessibilitySettings::default()
    }
}

#[test]
fn test_menu_withAnyTrackList_shouldStartWithOffAndAutomatic() {
    let queue = TaskQueue::new();
    let baseline = common::in_memory_prefs(&queue, &["en"]);
    let system = common::system_prefs(&queue, &["en"], AccessibilitySettings::default());

    for prefs in [&baseline, &system] {
        let menu = prefs.sorted_track_list_for_menu(&[]);
        assert_eq!(menu, vec![MenuItem::Off, MenuItem::Automatic]);

        let tracks = common::sample_track_list();
        let menu = prefs.sorted_track_list_for_menu(&tracks);
        assert_eq!(menu[0], MenuItem::Off);
        assert_eq!(menu[1], MenuItem::Automatic);
        assert_eq!(prefs.display_name_for_menu_item(&menu[0]), "Off");
        assert_eq!(prefs.display_name_for_menu_item(&menu[1]), "Auto (Recommended)");
    }
}

#[test]
fn test_baseline_menu_withSampleTracks_shouldSortByDisplayName() {
    let queue = TaskQueue::new();
    let prefs = common::in_memory_prefs(&queue, &["en"]);
    let tracks = common::sample_track_list();

    assert_eq!(menu_ids(&prefs, &tracks), vec!["off", "auto", "7", "5", "2", "3", "4", "6", "1"]);
}

#[test]
fn test_menu_whenComputedTwice_shouldBeIdentical() {
    let queue = TaskQueue::new();
    let baseline = common::in_memory_prefs(&queue, &["en"]);
    let system = common::system_prefs(&queue, &["en"], AccessibilitySettings::default());
    let tracks = common::sample_track_list();

    assert_eq!(menu_ids(&baseline, &tracks), menu_ids(&baseline, &tracks));
    assert_eq!(menu_ids(&system, &tracks), menu_ids(&system, &tracks));
}

#[test]
fn test_accessibility_menu_withTranslationPreference_shouldOfferOneTrackPerLanguage() {
    let queue = TaskQueue::new();
    let prefs = common::system_prefs(&queue, &["en"], AccessibilitySettings::default());
    let tracks = common::sample_track_list();

    assert_eq!(menu_ids(&prefs, &tracks), vec!["off", "auto", "2", "7", "1", "5"]);
}

#[test]
fn test_accessibility_menu_withCaptionsPreferred_shouldOfferAccessibilityTracks() {
    let queue = TaskQueue::new();
    let mut prefs = common::system_prefs(&queue, &["en"], AccessibilitySettings::default());
    prefs.set_user_prefers_captions(true);
    let tracks = common::sample_track_list();

    // French and German have no captions track, so their subtitles are kept.
    assert_eq!(menu_ids(&prefs, &tracks), vec!["off", "auto", "4", "3", "7", "1", "5"]);
}

#[test]
fn test_accessibility_menu_withoutFiltering_shouldOrderCcAfterMainTracks() {
    let queue = TaskQueue::new();
    let prefs = common::system_prefs(&queue, &["en"], unfiltered_settings());
    let tracks = common::sample_track_list();

    assert_eq!(menu_ids(&prefs, &tracks), vec!["off", "auto", "2", "4", "3", "7", "1", "5"]);
}

#[test]
fn test_accessibility_menu_withShowingTrack_shouldAlwaysOfferIt() {
    let queue = TaskQueue::new();
    let prefs = common::system_prefs(&queue, &["en"], AccessibilitySettings::default());
    let mut tracks = common::sample_track_list();
    tracks[2].mode = TrackMode::Showing;

    let ids = menu_ids(&prefs, &tracks);
    assert!(ids.contains(&"3".to_string()));
    assert!(!ids.contains(&"4".to_string()));
    assert!(!ids.contains(&"6".to_string()));
}

#[test]
fn test_accessibility_menu_withForcedOnlyTracks_shouldNeverOfferThem() {
    let queue = TaskQueue::new();
    let prefs = common::system_prefs(&queue, &["en"], unfiltered_settings());
    let mut tracks = common::sample_track_list();
    tracks[5].mode = TrackMode::Showing;

    assert!(!menu_ids(&prefs, &tracks).contains(&"6".to_string()));
}

#[test]
fn test_accessibility_menu_withDifferentDefaultLanguage_shouldPutItFirst() {
    let queue = TaskQueue::new();
    let prefs = common::system_prefs(&queue, &["de", "en"], AccessibilitySettings::default());
    let tracks = common::sample_track_list();

    assert_eq!(menu_ids(&prefs, &tracks), vec!["off", "auto", "5", "2", "7", "1"]);
}

#[test]
fn test_display_names_withBothPolicies_shouldDiffer() {
    let queue = TaskQueue::new();
    let baseline = common::in_memory_prefs(&queue, &["en"]);
    let system = common::system_prefs(&queue, &["en"], AccessibilitySettings::default());

    let cc = captions("1", "en-US").closed_captions();
    assert_eq!(baseline.display_name_for_track(&cc), "en-US");
    assert_eq!(system.display_name_for_track(&cc), "English (US) CC");

    let unlabelled = subtitles("2", "");
    assert_eq!(baseline.display_name_for_track(&unlabelled), "no label");
    assert_eq!(system.display_name_for_track(&unlabelled), "no label");

    let labelled = subtitles("3", "fr").with_label("Director");
    assert_eq!(baseline.display_name_for_track(&labelled), "Director");
    assert_eq!(system.display_name_for_track(&labelled), "Director (French)");
}

fn regional_tracks() -> Vec<TextTrack> {
    vec![
        subtitles("us", "en-US"),
        subtitles("gb", "en-GB"),
        subtitles("br", "pt-BR"),
        subtitles("pt", "pt-PT"),
    ]
}

#[test]
fn test_accessibility_menu_withRegionalVariants_shouldOfferEachLocale() {
    let queue = TaskQueue::new();
    let prefs = common::system_prefs(&queue, &["fr"], AccessibilitySettings::default());

    assert_eq!(menu_ids(&prefs, &regional_tracks()), vec!["off", "auto", "gb", "us", "br", "pt"]);
}

#[test]
fn test_accessibility_menu_withRegionalDefaultLanguage_shouldOnlyLiftThatLocale() {
    let queue = TaskQueue::new();
    let prefs = common::system_prefs(&queue, &["pt-PT", "en"], AccessibilitySettings::default());

    assert_eq!(menu_ids(&prefs, &regional_tracks()), vec!["off", "auto", "pt", "gb", "us", "br"]);
}
