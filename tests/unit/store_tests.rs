/*!
 * Tests for the caption preference store and change notifications
 */

use std::sync::Arc;

use caption_prefs::captions::{CaptionDisplayMode, CaptionPreferenceStore, CaptionPreferencesObserver, TaskQueue};
use crate::common::{self, CountingObserver};

fn observed_store(queue: &TaskQueue) -> (CaptionPreferenceStore, Arc<CountingObserver>) {
    let store = CaptionPreferenceStore::new(queue.clone());
    let observer = Arc::new(CountingObserver::default());
    let as_observer: Arc<dyn CaptionPreferencesObserver> = observer.clone();
    store.register_observer(&as_observer);
    (store, observer)
}

#[test]
fn test_new_store_withNoChanges_shouldHaveDefaults() {
    let store = CaptionPreferenceStore::new(TaskQueue::new());

    assert_eq!(store.caption_display_mode(), CaptionDisplayMode::ForcedOnly);
    assert!(!store.user_prefers_captions());
    assert!(!store.user_prefers_subtitles());
    assert!(!store.user_prefers_text_descriptions());
    assert!(store.preferred_languages().is_empty());
    assert_eq!(store.default_language(), "");
    assert!(!store.have_preferences());
}

#[test]
fn test_set_display_mode_inTestingMode_shouldClearFlagsUnlessAlwaysOn() {
    let mut store = CaptionPreferenceStore::new(TaskQueue::new());
    store.set_testing_mode(true);
    store.set_user_prefers_captions(true);
    store.set_user_prefers_subtitles(true);

    store.set_caption_display_mode(CaptionDisplayMode::AlwaysOn);
    assert!(store.user_prefers_captions());
    assert!(store.user_prefers_subtitles());

    store.set_caption_display_mode(CaptionDisplayMode::Automatic);
    assert!(!store.user_prefers_captions());
    assert!(!store.user_prefers_subtitles());
}

#[test]
fn test_set_display_mode_outsideTestingMode_shouldKeepFlags() {
    let mut store = CaptionPreferenceStore::new(TaskQueue::new());
    store.set_user_prefers_captions(true);

    store.set_caption_display_mode(CaptionDisplayMode::ForcedOnly);

    assert!(store.user_prefers_captions());
}

#[test]
fn test_preferred_languages_inTestingMode_shouldPrependOverride() {
    let queue = TaskQueue::new();
    let mut store = common::store_with_languages(&queue, &["en", "es"]);
    store.set_preferred_language("fr");

    assert_eq!(store.preferred_languages(), vec!["en", "es"]);

    store.set_testing_mode(true);
    assert_eq!(store.preferred_languages(), vec!["fr", "en", "es"]);
    assert_eq!(store.default_language(), "en");
}

#[test]
fn test_detached_store_withSetters_shouldAnswerSafeDefaults() {
    let mut store = CaptionPreferenceStore::detached(TaskQueue::new());
    store.set_system_languages(vec!["en".to_string()]);
    store.set_user_prefers_captions(true);
    store.set_caption_display_mode(CaptionDisplayMode::AlwaysOn);

    assert!(!store.has_page());
    assert!(!store.user_prefers_captions());
    assert_eq!(store.caption_display_mode(), CaptionDisplayMode::ForcedOnly);
    assert!(store.preferred_languages().is_empty());
}

#[test]
fn test_notifications_withSeveralMutations_shouldCoalesceIntoOne() {
    let queue = TaskQueue::new();
    let (mut store, observer) = observed_store(&queue);

    store.set_user_prefers_captions(true);
    store.set_user_prefers_subtitles(true);
    store.set_caption_display_mode(CaptionDisplayMode::AlwaysOn);

    assert_eq!(queue.len(), 1);
    assert!(store.notifier().is_pending());
    assert_eq!(observer.calls(), 0);

    assert_eq!(queue.run_pending(), 1);
    assert_eq!(observer.calls(), 1);
    assert!(!store.notifier().is_pending());
    assert!(store.have_preferences());
}

#[test]
fn test_notifications_afterDelivery_shouldScheduleAgain() {
    let queue = TaskQueue::new();
    let (mut store, observer) = observed_store(&queue);

    store.set_captions_style_sheet_override("video::cue{color:red;}");
    queue.run_pending();
    store.set_primary_audio_track_language_override("ja");
    queue.run_pending();

    assert_eq!(observer.calls(), 2);
    assert_eq!(store.notifier().delivered_count(), 2);
    assert_eq!(store.captions_style_sheet_override(), "video::cue{color:red;}");
    assert_eq!(store.primary_audio_track_language_override(), "ja");
}

#[test]
fn test_notifications_afterStoreDropped_shouldBeNoOp() {
    let queue = TaskQueue::new();
    let (mut store, observer) = observed_store(&queue);

    store.set_user_prefers_subtitles(true);
    drop(store);

    assert_eq!(queue.run_pending(), 1);
    assert_eq!(observer.calls(), 0);
}

#[test]
fn test_unregister_observer_shouldStopDelivery() {
    let queue = TaskQueue::new();
    let mut store = CaptionPreferenceStore::new(queue.clone());
    let observer = Arc::new(CountingObserver::default());
    let as_observer: Arc<dyn CaptionPreferencesObserver> = observer.clone();
    store.register_observer(&as_observer);
    store.unregister_observer(&as_observer);

    store.set_user_prefers_captions(true);
    queue.run_pending();

    assert_eq!(observer.calls(), 0);
}

#[test]
fn test_display_mode_parsing_withNamesAndCodes_shouldMap() {
    assert_eq!("always_on".parse::<CaptionDisplayMode>().unwrap(), CaptionDisplayMode::AlwaysOn);
    assert!("sometimes".parse::<CaptionDisplayMode>().is_err());
    assert_eq!(CaptionDisplayMode::from_system_code(1), CaptionDisplayMode::Automatic);
    assert_eq!(CaptionDisplayMode::AlwaysOn.system_code(), 2);
}
