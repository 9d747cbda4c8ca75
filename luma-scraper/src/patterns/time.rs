use once_cell::sync::Lazy;

use super::{first_match, Output, PatternRule};

/// Time cascade, highest precedence first. Range rules sit above the
/// single-time rule so "10:00 - 19:00" is never cut down to its prefix.
static TIME_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        // "10:00 - 19:00", "9:30 AM - 5:00 PM"
        PatternRule::new(
            r"(?i)\b\d{1,2}:\d{2}(?:\s*(?:AM|PM))?\s*[-–—]\s*\d{1,2}:\d{2}(?:\s*(?:AM|PM))?\b",
            Output::WholeMatch,
        ),
        // "10:00 AM", "14:30"
        PatternRule::new(r"(?i)\b\d{1,2}:\d{2}(?:\s*(?:AM|PM))?\b", Output::WholeMatch),
        // "10 AM - 5 PM", "9:30 AM to 6:00 PM"; meridiem required on both ends
        PatternRule::new(
            r"(?i)\b\d{1,2}(?::\d{2})?\s*(?:AM|PM)\s*(?:[-–—]|to)\s*\d{1,2}(?::\d{2})?\s*(?:AM|PM)\b",
            Output::WholeMatch,
        ),
        // "14:00-16:00"
        PatternRule::new(r"\b\d{2}:\d{2}\s*[-–—]\s*\d{2}:\d{2}\b", Output::WholeMatch),
    ]
});

pub fn extract_time(text: &str) -> Option<String> {
    first_match(&TIME_RULES, text)
}
