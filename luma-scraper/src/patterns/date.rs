use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{first_match, Output, PatternRule};

const WEEKDAYS: &str = "Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday";
const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec";

/// Date cascade, highest precedence first. Ordinal suffixes (1st, 22nd) are
/// accepted but dropped from the output.
static DATE_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        // "Monday 6 October", "Friday, 15th March"
        PatternRule::new(
            &format!(r"(?i)\b({WEEKDAYS})[,\s]+(\d{{1,2}})(?:st|nd|rd|th)?[,\s]+({MONTHS})\b"),
            Output::SpaceJoinGroups,
        ),
        // "6 October", "22nd December"
        PatternRule::new(
            &format!(r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?[,\s]+({MONTHS})\b"),
            Output::SpaceJoinGroups,
        ),
        // "October 6", "March 15th"
        PatternRule::new(
            &format!(r"(?i)\b({MONTHS})[,\s]+(\d{{1,2}})(?:st|nd|rd|th)?\b"),
            Output::SpaceJoinGroups,
        ),
        // "2024-10-06", "2024/10/06"
        PatternRule::new(r"\b\d{4}[-/]\d{1,2}[-/]\d{1,2}\b", Output::WholeMatch),
        // "06/10/2024" or "10/06/2024"; day/month order is locale-dependent
        // and kept verbatim (see `NumericDate`)
        PatternRule::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{4}\b", Output::WholeMatch),
        PatternRule::new(r"(?i)\b(?:Today|Tomorrow|Yesterday)\b", Output::WholeMatch),
    ]
});

pub fn extract_date(text: &str) -> Option<String> {
    first_match(&DATE_RULES, text)
}

/// Which convention a slashed numeric date should be read in. The source
/// markup never says, so resolution is the caller's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    DayFirst,
    MonthFirst,
}

/// A `D/M/YYYY`-or-`M/D/YYYY` date whose first two fields are ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericDate {
    pub first: u32,
    pub second: u32,
    pub year: i32,
}

static SLASHED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})[/-](\d{1,2})[/-](\d{4})$").expect("valid slashed date"));

impl NumericDate {
    /// Parses a slashed numeric date without deciding what the first two
    /// fields mean. ISO `YYYY-MM-DD` text needs no disambiguation and is not
    /// handled here.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = SLASHED.captures(text.trim())?;
        Some(Self {
            first: caps[1].parse().ok()?,
            second: caps[2].parse().ok()?,
            year: caps[3].parse().ok()?,
        })
    }

    /// Resolves the ambiguity under the given convention. Returns `None`
    /// when the resulting calendar date does not exist.
    pub fn resolve(&self, order: DateOrder) -> Option<NaiveDate> {
        let (day, month) = match order {
            DateOrder::DayFirst => (self.first, self.second),
            DateOrder::MonthFirst => (self.second, self.first),
        };
        NaiveDate::from_ymd_opt(self.year, month, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_rule_outranks_day_month() {
        // "6 October" alone would also match; the weekday rule must win.
        assert_eq!(
            extract_date("Monday 6 October"),
            Some("Monday 6 October".to_string())
        );
    }

    #[test]
    fn ordinal_suffixes_are_dropped() {
        assert_eq!(
            extract_date("Friday, 15th March"),
            Some("Friday 15 March".to_string())
        );
        assert_eq!(extract_date("doors open 22nd December"), Some("22 December".to_string()));
    }

    #[test]
    fn month_first_form() {
        assert_eq!(extract_date("October 6"), Some("October 6".to_string()));
    }

    #[test]
    fn numeric_forms_are_kept_verbatim() {
        assert_eq!(extract_date("on 2024-10-06"), Some("2024-10-06".to_string()));
        assert_eq!(extract_date("on 06/10/2024"), Some("06/10/2024".to_string()));
    }

    #[test]
    fn relative_keywords() {
        assert_eq!(extract_date("happening Tomorrow!"), Some("Tomorrow".to_string()));
    }

    #[test]
    fn no_date_means_none() {
        assert_eq!(extract_date("join us for drinks"), None);
    }

    #[test]
    fn slashed_dates_resolve_per_caller_convention() {
        let date = NumericDate::parse("06/10/2024").unwrap();
        assert_eq!(
            date.resolve(DateOrder::DayFirst),
            NaiveDate::from_ymd_opt(2024, 10, 6)
        );
        assert_eq!(
            date.resolve(DateOrder::MonthFirst),
            NaiveDate::from_ymd_opt(2024, 6, 10)
        );
    }

    #[test]
    fn impossible_resolutions_are_rejected() {
        let date = NumericDate::parse("13/06/2024").unwrap();
        assert_eq!(date.resolve(DateOrder::MonthFirst), None);
        assert!(date.resolve(DateOrder::DayFirst).is_some());
    }
}
