/*!
 * Tests for language utility functions
 */

use caption_prefs::language_utils::{
    canonical_language_identifier, index_of_best_matching_language_in_list, is_well_formed_tag, language_codes_match,
    language_display_name, normalize_to_part2t, region_subtag,
};

fn list(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_normalize_to_part2t_withVariousCodes_shouldNormalizeCorrectly() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("DEU").unwrap(), "deu");
    assert!(normalize_to_part2t("zz").is_err());
}

#[test]
fn test_language_codes_match_withEquivalentCodes_shouldReturnTrue() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("fre", "fr"));
    assert!(!language_codes_match("en", "fr"));
    assert!(!language_codes_match("", "en"));
}

#[test]
fn test_is_well_formed_tag_withTags_shouldAcceptBcp47Shapes() {
    for tag in ["en", "eng", "en-US", "pt_BR", "zh-Hant-TW", "es-419"] {
        assert!(is_well_formed_tag(tag), "{}", tag);
    }
    for tag in ["", "e", "en-", "-en", "en US", "12"] {
        assert!(!is_well_formed_tag(tag), "{}", tag);
    }
}

#[test]
fn test_canonical_and_region_withMixedCase_shouldNormalize() {
    assert_eq!(canonical_language_identifier("pt_BR"), "pt-br");
    assert_eq!(region_subtag("pt_br").as_deref(), Some("BR"));
    assert_eq!(region_subtag("zh-Hant-TW").as_deref(), Some("TW"));
    assert_eq!(region_subtag("es-419").as_deref(), Some("419"));
    assert_eq!(region_subtag("en"), None);
}

#[test]
fn test_best_matching_language_withExactMatch_shouldWin() {
    let languages = list(&["en", "en-GB", "fr"]);
    assert_eq!(index_of_best_matching_language_in_list("en-GB", &languages), 1);
    assert_eq!(index_of_best_matching_language_in_list("EN_gb", &languages), 1);
    assert_eq!(index_of_best_matching_language_in_list("fr", &languages), 2);
}

#[test]
fn test_best_matching_language_withRegionalTrack_shouldPreferLanguageOnlyEntry() {
    let languages = list(&["en-GB", "de", "en"]);
    assert_eq!(index_of_best_matching_language_in_list("en-US", &languages), 2);

    let regional_only = list(&["de", "en-GB"]);
    assert_eq!(index_of_best_matching_language_in_list("en-US", &regional_only), 1);
}

#[test]
fn test_best_matching_language_withIsoVariants_shouldMatch() {
    let languages = list(&["fr", "en"]);
    assert_eq!(index_of_best_matching_language_in_list("eng", &languages), 1);
    assert_eq!(index_of_best_matching_language_in_list("fre", &languages), 0);
}

#[test]
fn test_best_matching_language_withNoMatch_shouldReturnListLength() {
    let languages = list(&["fr", "en"]);
    assert_eq!(index_of_best_matching_language_in_list("ja", &languages), 2);
    assert_eq!(index_of_best_matching_language_in_list("", &languages), 2);
    assert_eq!(index_of_best_matching_language_in_list("not a tag", &languages), 2);
    assert_eq!(index_of_best_matching_language_in_list("en", &[]), 0);
}

#[test]
fn test_language_display_name_withTags_shouldUseEnglishNames() {
    assert_eq!(language_display_name("en-US"), "English");
    assert_eq!(language_display_name("deu"), "German");
    assert_eq!(language_display_name("zz-ZZ"), "zz");
    assert_eq!(language_display_name(""), "");
}
