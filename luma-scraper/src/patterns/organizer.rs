use once_cell::sync::Lazy;
use regex::Regex;

use super::{first_match, Output, PatternRule};
use crate::common::constants::MAX_FREE_TEXT_CAPTURE;
use crate::common::text::{clean_text, truncate_chars};

/// Organizer cascade, highest precedence first. The bare "by" rule sits
/// below the labelled forms so "hosted by X" never degrades to "by X".
static ORGANIZER_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::new(r"(?i)hosted\s+by\s*:?\s*([^,\n\r]{2,50})", Output::SpaceJoinGroups),
        PatternRule::new(r"(?i)\borganizer\s*:?\s*([^,\n\r]{2,50})", Output::SpaceJoinGroups),
        PatternRule::new(r"(?i)\bcreator\s*:?\s*([^,\n\r]{2,50})", Output::SpaceJoinGroups),
        PatternRule::new(r"(?i)\bby\s+([^,\n\r]{2,50})", Output::SpaceJoinGroups),
        PatternRule::new(r"(?i)presented\s+by\s*:?\s*([^,\n\r]{2,50})", Output::SpaceJoinGroups),
        PatternRule::new(r"(?i)sponsored\s+by\s*:?\s*([^,\n\r]{2,50})", Output::SpaceJoinGroups),
    ]
});

static ORGANIZER_NOISE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"\.{2,}", r"(?i)access support.*$"]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid organizer noise pattern"))
        .collect()
});

pub fn extract_organizer(text: &str) -> Option<String> {
    first_match(&ORGANIZER_RULES, text).and_then(|raw| clean_organizer(&raw))
}

/// Strips noise, normalizes whitespace, and bounds the result.
pub fn clean_organizer(raw: &str) -> Option<String> {
    let mut cleaned = raw.to_string();
    for noise in ORGANIZER_NOISE.iter() {
        cleaned = noise.replace_all(&cleaned, " ").into_owned();
    }
    let cleaned = clean_text(&cleaned);
    let cleaned = truncate_chars(&cleaned, MAX_FREE_TEXT_CAPTURE).trim().to_string();
    if cleaned.chars().count() < 2 {
        None
    } else {
        Some(cleaned)
    }
}
