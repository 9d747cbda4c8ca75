use once_cell::sync::Lazy;
use regex::Regex;

use super::{first_match, Output, PatternRule};
use crate::common::constants::MAX_FREE_TEXT_CAPTURE;
use crate::common::text::{clean_text, truncate_chars};

const STREET_SUFFIXES: &str = "Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Lane|Ln|Drive|Dr|Place|Pl|Court|Ct|Way|Terrace|Ter|Circle|Cir|Square|Sq|Highway|Hwy|Parkway|Pkwy|Plaza|Point|Park|Trail|Crossing|Heights";

/// Location cascade, highest precedence first. Free-text captures are
/// bounded in-pattern; `clean_location` bounds them again defensively.
static LOCATION_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        // "📍 New York", "🏢 Office Building"
        PatternRule::new(
            r"(?:📍|🏙|🏢|🏛|🏟|🏪|🏫|🏬|🏭|🏯|🏰)\s*([^,\n\r]{3,50})",
            Output::SpaceJoinGroups,
        ),
        // "at Conference Center"
        PatternRule::new(r"(?i)\bat\s+([^,\n\r]{3,50})", Output::SpaceJoinGroups),
        // "in Mumbai"
        PatternRule::new(r"(?i)\bin\s+([^,\n\r]{3,50})", Output::SpaceJoinGroups),
        // labelled forms: "venue: X", "location: X", "where: X"
        PatternRule::new(r"(?i)\bvenue:?\s*([^,\n\r]{3,50})", Output::SpaceJoinGroups),
        PatternRule::new(r"(?i)\blocation:?\s*([^,\n\r]{3,50})", Output::SpaceJoinGroups),
        PatternRule::new(r"(?i)\bwhere:?\s*([^,\n\r]{3,50})", Output::SpaceJoinGroups),
        // "123 Main St"
        PatternRule::new(
            &format!(r"(?i)\b(\d+\s+[A-Za-z\s]+(?:{STREET_SUFFIXES}))\b"),
            Output::SpaceJoinGroups,
        ),
        // "New York, NY", "Mumbai, India"
        PatternRule::new(
            r"(?i)\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*),\s*([A-Z]{2}|[A-Z][a-z]+)\b",
            Output::SpaceJoinGroups,
        ),
        // "Conference Room A", "Building 3", "Floor 2"
        PatternRule::new(
            r"(?i)\b(?:Conference\s+Room|Building|Floor|Room|Hall|Auditorium|Theater|Theatre|Center|Centre|Office|Studio|Workshop|Lab|Laboratory|Classroom|Meeting\s+Room)\s+[A-Za-z0-9][A-Za-z0-9\s]{0,40}\b",
            Output::WholeMatch,
        ),
        // virtual events
        PatternRule::new(
            r"(?i)\b(?:Online|Virtual|Zoom|Google\s+Meet|Microsoft\s+Teams|Webinar|Web\s+Event|Digital\s+Event|Remote\s+Event)\b",
            Output::WholeMatch,
        ),
    ]
});

/// Trailing noise that listing text tends to drag into a location capture.
static LOCATION_NOISE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)hosted by.*$",
        r"(?i)contact(?:\s+us)?:.*$",
        r"(?i)email:.*$",
        r"(?i)join our.*$",
        r"(?i)explore events.*$",
        r"(?i)sign (?:in|up).*$",
        r"(?i)report event.*$",
        r"(?i)^(?:venue|location|where):\s*",
        r"\u{200B}.*$",
        r"\.{2,}",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid location noise pattern"))
    .collect()
});

pub fn extract_location(text: &str) -> Option<String> {
    first_match(&LOCATION_RULES, text).and_then(|raw| clean_location(&raw))
}

/// Strips noise, normalizes whitespace, and bounds the result. Anything
/// shorter than two characters after cleaning is treated as not found.
pub fn clean_location(raw: &str) -> Option<String> {
    let mut cleaned = raw.to_string();
    for noise in LOCATION_NOISE.iter() {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_glyph_outranks_everything() {
        assert_eq!(
            extract_location("📍 New York"),
            Some("New York".to_string())
        );
    }

    #[test]
    fn labelled_forms() {
        assert_eq!(
            extract_location("Venue: Conference Center"),
            Some("Conference Center".to_string())
        );
        assert_eq!(
            extract_location("where: Rooftop Bar"),
            Some("Rooftop Bar".to_string())
        );
    }

    #[test]
    fn city_comma_form_is_space_joined() {
        assert_eq!(
            extract_location("New York, NY"),
            Some("New York NY".to_string())
        );
    }

    #[test]
    fn virtual_keywords() {
        assert_eq!(extract_location("Online"), Some("Online".to_string()));
        assert_eq!(
            extract_location("join us on Google Meet"),
            Some("Google Meet".to_string())
        );
    }

    #[test]
    fn noise_after_the_venue_is_stripped() {
        assert_eq!(
            extract_location("📍 Rooftop Garden Hosted by Acme Labs"),
            Some("Rooftop Garden".to_string())
        );
    }

    #[test]
    fn too_short_after_cleaning_is_rejected() {
        assert_eq!(clean_location("  V  "), None);
    }
}
