/*!
 * Caption preference handling.
 *
 * - `store`: per page group preference state
 * - `notifier`: coalesced change notifications
 * - `accessibility`: platform accessibility service seam
 * - `source`: the `PreferenceSource` capability and its implementations
 * - `scorer`: text track selection scores
 * - `ranker`: caption menu ordering and display names
 * - `selection`: automatic track enabling and menu choices
 * - `style`: caption CSS override
 */

pub mod accessibility;
pub mod notifier;
pub mod preferences;
pub mod ranker;
pub mod scorer;
pub mod selection;
pub mod source;
pub mod store;
pub mod style;

pub use accessibility::{AccessibilityService, AccessibilitySettings, StaticAccessibilityService};
pub use notifier::{CaptionPreferencesObserver, ChangeNotifier, TaskQueue};
pub use preferences::CaptionPreferences;
pub use ranker::TrackListRanker;
pub use scorer::{Score, TrackScorer};
pub use selection::{GroupSelection, MenuSelection, configure_text_tracks, select_track_from_menu};
pub use source::{InMemoryPreferences, PreferenceSource, SelectionPolicy, SystemPreferences};
pub use store::{CaptionDisplayMode, CaptionPreferenceStore};
pub use style::{CaptionAppearance, TextEdgeStyle};
