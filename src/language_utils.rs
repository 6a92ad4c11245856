//! Language utilities for language tag handling
//!
//! Target languages arrive as tags such as "zh-CN", "pt_BR" or "ja". The
//! primary subtag is an ISO 639-1 or ISO 639-2 code; the region subtag is
//! kept only to pick between script variants when naming the language in
//! prompts.

use isolang::Language;

use crate::errors::ConfigError;

/// Split a tag into its lowercase primary subtag and optional region
fn split_tag(tag: &str) -> (String, Option<String>) {
    let normalized = tag.trim().replace('_', "-");
    let mut parts = normalized.splitn(2, '-');
    let primary = parts.next().unwrap_or_default().to_lowercase();
    let region = parts.next().map(|r| r.to_uppercase());
    (primary, region)
}

/// Resolve the primary subtag of a language tag with isolang
fn lookup(primary: &str) -> Option<Language> {
    match primary.len() {
        2 => Language::from_639_1(primary),
        3 => Language::from_639_3(primary).or_else(|| {
            // ISO 639-2/B codes that differ from 639-2/T
            let part2t = match primary {
                "fre" => "fra",
                "ger" => "deu",
                "dut" => "nld",
                "gre" => "ell",
                "chi" => "zho",
                "cze" => "ces",
                "per" => "fas",
                "rum" => "ron",
                _ => return None,
            };
            Language::from_639_3(part2t)
        }),
        _ => None,
    }
}

/// Validate a language tag such as "zh-CN" or "fr"
pub fn validate_language_tag(tag: &str) -> Result<(), ConfigError> {
    let (primary, _) = split_tag(tag);
    lookup(&primary)
        .map(|_| ())
        .ok_or_else(|| ConfigError::InvalidLanguage(tag.to_string()))
}

/// Get a human-readable English name for a language tag, for use in prompts
///
/// Chinese tags are expanded to the script variant since that is what
/// translation models need to know.
pub fn get_language_name(tag: &str) -> Result<String, ConfigError> {
    let (primary, region) = split_tag(tag);
    let lang = lookup(&primary).ok_or_else(|| ConfigError::InvalidLanguage(tag.to_string()))?;

    if lang == Language::Zho {
        return Ok(match region.as_deref() {
            Some("TW") | Some("HK") | Some("MO") | Some("HANT") => "Traditional Chinese".to_string(),
            _ => "Simplified Chinese".to_string(),
        });
    }

    Ok(lang.to_name().to_string())
}

/// Language name for prompts, falling back to the raw tag for unknown codes
pub fn prompt_language_name(tag: &str) -> String {
    get_language_name(tag).unwrap_or_else(|_| tag.trim().to_string())
}
