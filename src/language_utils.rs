use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;
use regex::Regex;

/// Language utilities for caption track language tags
///
/// Track and preference languages are BCP-47 style tags ("en", "en-US", "pt_BR",
/// "eng"). Primary subtags are resolved through ISO 639-1 and ISO 639-2 so that
/// "en" and "eng" name the same language.
static LANGUAGE_TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]{2,8}([-_][A-Za-z0-9]{1,8})*$").expect("language tag pattern is valid")
});

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
fn bibliographic_to_terminology(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"),
        "ger" => Some("deu"),
        "dut" => Some("nld"),
        "gre" => Some("ell"),
        "chi" => Some("zho"),
        "cze" => Some("ces"),
        "ice" => Some("isl"),
        "alb" => Some("sqi"),
        "arm" => Some("hye"),
        "baq" => Some("eus"),
        "bur" => Some("mya"),
        "per" => Some("fas"),
        "geo" => Some("kat"),
        "may" => Some("msa"),
        "mac" => Some("mkd"),
        "rum" => Some("ron"),
        "slo" => Some("slk"),
        "wel" => Some("cym"),
        _ => None,
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
        if let Some(part2t) = bibliographic_to_terminology(&normalized_code) {
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    let normalized1 = match normalize_to_part2t(code1) {
        Ok(n) => n,
        Err(_) => return false,
    };

    let normalized2 = match normalize_to_part2t(code2) {
        Ok(n) => n,
        Err(_) => return false,
    };

    normalized1 == normalized2
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Whether `tag` has the shape of a language tag: a 2-8 letter primary subtag
/// followed by alphanumeric subtags separated by '-' or '_'
pub fn is_well_formed_tag(tag: &str) -> bool {
    LANGUAGE_TAG_PATTERN.is_match(tag)
}

/// Lowercase the tag and use '-' as the only subtag separator
pub fn canonical_language_identifier(tag: &str) -> String {
    tag.trim().to_lowercase().replace('_', "-")
}

/// The primary (language) subtag of a canonical or raw tag
pub fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or("")
}

/// The region subtag of a tag, uppercased ("en-us" gives "US", "zh-Hant-TW" gives "TW")
pub fn region_subtag(tag: &str) -> Option<String> {
    tag.split(['-', '_'])
        .skip(1)
        .find(|subtag| {
            (subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()))
                || (subtag.len() == 3 && subtag.chars().all(|c| c.is_ascii_digit()))
        })
        .map(|subtag| subtag.to_uppercase())
}

fn primary_subtags_match(a: &str, b: &str) -> bool {
    a == b || language_codes_match(a, b)
}

/// Index of the entry in `language_list` that best matches `language`.
///
/// An exact (canonicalized) match wins immediately. Otherwise an entry naming
/// only the same primary language ("en") is preferred over one naming the same
/// language with a region or script ("en-GB"). Returns `language_list.len()` when
/// nothing matches or `language` is empty or malformed.
pub fn index_of_best_matching_language_in_list(language: &str, language_list: &[String]) -> usize {
    let no_match = language_list.len();
    if language.is_empty() || !is_well_formed_tag(language.trim()) {
        return no_match;
    }

    let language = canonical_language_identifier(language);
    let language_primary = primary_subtag(&language);

    let mut language_without_locale_match: Option<usize> = None;
    let mut language_match_but_not_locale: Option<usize> = None;

    for (index, candidate) in language_list.iter().enumerate() {
        let candidate = canonical_language_identifier(candidate);
        if candidate == language {
            return index;
        }

        let candidate_primary = primary_subtag(&candidate);
        if candidate_primary.len() < 2 || !primary_subtags_match(language_primary, candidate_primary) {
            continue;
        }

        if candidate_primary.len() == candidate.len() {
            language_without_locale_match.get_or_insert(index);
        } else {
            language_match_but_not_locale.get_or_insert(index);
        }
    }

    language_without_locale_match
        .or(language_match_but_not_locale)
        .unwrap_or(no_match)
}

/// Human readable name of the primary language of `tag`.
///
/// Returns an empty string for an empty tag, and the canonical primary subtag
/// when the language is not a known ISO 639 code.
pub fn language_display_name(tag: &str) -> String {
    let canonical = canonical_language_identifier(tag);
    if canonical.is_empty() {
        return String::new();
    }

    let primary = primary_subtag(&canonical);
    match get_language_name(primary) {
        Ok(name) => name,
        Err(_) => primary.to_string(),
    }
}
