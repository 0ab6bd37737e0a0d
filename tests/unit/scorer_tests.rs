/*!
 * Tests for text track selection scores
 */

use caption_prefs::captions::{AccessibilitySettings, CaptionDisplayMode, TaskQueue};
use caption_prefs::text_track::{MediaContext, TextTrack, TrackKind};
use crate::common::{self, captions, subtitles};

#[test]
fn test_baseline_score_withSubtitlesPreferredAndMatchingLanguage_shouldBe11() {
    let queue = TaskQueue::new();
    let mut prefs = common::in_memory_prefs(&queue, &["en"]);
    prefs.set_user_prefers_subtitles(true);

    assert_eq!(prefs.text_track_selection_score(&subtitles("1", "en"), None), 11);
}

#[test]
fn test_baseline_score_withOnlyCaptionsPreferred_shouldNotScoreSubtitles() {
    let queue = TaskQueue::new();
    let mut prefs = common::in_memory_prefs(&queue, &["en"]);
    prefs.set_user_prefers_captions(true);

    assert_eq!(prefs.text_track_selection_score(&subtitles("1", "en"), None), 0);
    assert_eq!(prefs.text_track_selection_score(&captions("2", "en"), None), 11);
}

#[test]
fn test_baseline_score_withNothingPreferred_shouldBeZeroForEveryTrack() {
    let queue = TaskQueue::new();
    let prefs = common::in_memory_prefs(&queue, &["en", "fr"]);

    for track in common::sample_track_list() {
        assert_eq!(prefs.text_track_selection_score(&track, None), 0, "track {}", track.id);
    }
}

#[test]
fn test_baseline_score_withOtherKinds_shouldBeZero() {
    let queue = TaskQueue::new();
    let mut prefs = common::in_memory_prefs(&queue, &["en"]);
    prefs.set_user_prefers_captions(true);
    prefs.set_user_prefers_subtitles(true);

    for kind in [TrackKind::Descriptions, TrackKind::Chapters, TrackKind::Metadata, TrackKind::Forced, TrackKind::Other] {
        let track = TextTrack::new("x", kind, "en");
        assert_eq!(prefs.text_track_selection_score(&track, None), 0, "kind {}", kind);
    }
}

#[test]
fn test_baseline_score_withEarlierLanguage_shouldNeverScoreLower() {
    let queue = TaskQueue::new();
    let mut prefs = common::in_memory_prefs(&queue, &["ja", "en", "fr", "de"]);
    prefs.set_user_prefers_subtitles(true);

    let scores: Vec<i32> = ["ja", "en", "fr", "de", "ko"]
        .iter()
        .map(|lang| prefs.text_track_selection_score(&subtitles("t", lang), None))
        .collect();

    assert_eq!(scores, vec![41, 31, 21, 11, 1]);
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[test]
fn test_baseline_score_withRegionalTrack_shouldMatchLanguage() {
    let queue = TaskQueue::new();
    let mut prefs = common::in_memory_prefs(&queue, &["en", "pt"]);
    prefs.set_user_prefers_subtitles(true);

    assert_eq!(prefs.text_track_selection_score(&subtitles("1", "pt-BR"), None), 11);
}

#[test]
fn test_accessibility_score_withCaptionsPreferred_shouldRankSdhThenCcThenSubtitles() {
    let queue = TaskQueue::new();
    let mut prefs = common::system_prefs(&queue, &["en"], AccessibilitySettings::default());
    prefs.set_testing_mode(true);
    prefs.set_caption_display_mode(CaptionDisplayMode::AlwaysOn);
    prefs.set_user_prefers_captions(true);

    let sdh = prefs.text_track_selection_score(&captions("1", "en").sdh(), None);
    let cc = prefs.text_track_selection_score(&captions("2", "en").closed_captions(), None);
    let subs = prefs.text_track_selection_score(&subtitles("3", "en"), None);

    assert_eq!((sdh, cc, subs), (13, 12, 11));
}

#[test]
fn test_accessibility_score_withAlwaysOnAndNothingPreferred_shouldBeZero() {
    let queue = TaskQueue::new();
    let mut prefs = common::system_prefs(&queue, &["en"], AccessibilitySettings::default());
    prefs.set_testing_mode(true);
    prefs.set_caption_display_mode(CaptionDisplayMode::AlwaysOn);

    assert_eq!(prefs.text_track_selection_score(&subtitles("1", "en"), None), 0);

    // The legacy "closed captions visible" switch lifts the early exit.
    let media = MediaContext {
        closed_captions_visible: true,
        ..MediaContext::default()
    };
    assert!(prefs.text_track_selection_score(&subtitles("1", "en"), Some(&media)) > 0);
}

#[test]
fn test_accessibility_score_withForcedOnlyMode_shouldOnlyScoreForcedTrackInAudioLanguage() {
    let queue = TaskQueue::new();
    let mut prefs = common::system_prefs(&queue, &["en"], AccessibilitySettings::default());
    prefs.set_testing_mode(true);
    prefs.set_caption_display_mode(CaptionDisplayMode::ForcedOnly);
    prefs.set_primary_audio_track_language_override("fr");
    let media = MediaContext::with_audio_language("en");

    let forced_fr = TextTrack::new("1", TrackKind::Forced, "fr").forced_only();
    let forced_de = TextTrack::new("2", TrackKind::Forced, "de").forced_only();

    // Testing mode takes the audio language from the override, not the player.
    assert!(prefs.text_track_selection_score(&forced_fr, Some(&media)) > 0);
    assert_eq!(prefs.text_track_selection_score(&forced_de, Some(&media)), 0);
    assert_eq!(prefs.text_track_selection_score(&subtitles("3", "fr"), Some(&media)), 0);
    assert_eq!(prefs.text_track_selection_score(&forced_fr, None), 0);
}

#[test]
fn test_accessibility_score_withAutomaticMode_shouldScoreOnlyForForeignAudio() {
    let queue = TaskQueue::new();
    let mut prefs = common::system_prefs(&queue, &["en"], AccessibilitySettings::default());
    prefs.set_testing_mode(true);
    prefs.set_caption_display_mode(CaptionDisplayMode::Automatic);
    let track = subtitles("1", "en");

    prefs.set_primary_audio_track_language_override("ja");
    assert_eq!(prefs.text_track_selection_score(&track, Some(&MediaContext::default())), 13);
    assert_eq!(prefs.text_track_selection_score(&subtitles("2", "fr"), Some(&MediaContext::default())), 0);

    prefs.set_primary_audio_track_language_override("en");
    assert_eq!(prefs.text_track_selection_score(&track, Some(&MediaContext::default())), 0);
}

#[test]
fn test_accessibility_score_withSecondaryContent_shouldBeZero() {
    let queue = TaskQueue::new();
    let mut prefs = common::system_prefs(&queue, &["en"], AccessibilitySettings::default());
    prefs.set_testing_mode(true);
    prefs.set_caption_display_mode(CaptionDisplayMode::AlwaysOn);
    prefs.set_user_prefers_subtitles(true);

    assert!(prefs.text_track_selection_score(&subtitles("1", "en"), None) > 0);
    assert_eq!(prefs.text_track_selection_score(&subtitles("2", "en").not_main_program(), None), 0);
    assert_eq!(
        prefs.text_track_selection_score(&TextTrack::new("3", TrackKind::Descriptions, "en"), None),
        0
    );
}

#[test]
fn test_accessibility_score_withServiceSelectedLanguage_shouldUseServiceLanguages() {
    let queue = TaskQueue::new();
    let settings = AccessibilitySettings {
        display_mode: CaptionDisplayMode::AlwaysOn,
        selected_languages: vec!["de".to_string()],
        ..AccessibilitySettings::default()
    };
    let prefs = common::system_prefs(&queue, &["en"], settings);

    // Selected languages turn the subtitles preference on.
    assert!(prefs.user_prefers_subtitles());
    assert_eq!(prefs.preferred_languages(), vec!["de", "en"]);
    assert_eq!(prefs.text_track_selection_score(&subtitles("1", "de"), None), 23);
    assert_eq!(prefs.text_track_selection_score(&subtitles("2", "en"), None), 13);
}
