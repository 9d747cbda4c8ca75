//! Ordered text-matching rules for recovering typed fields from prose-like
//! page text. Each field kind exposes a cascade: the first rule that matches
//! wins and nothing after it is tried.

pub mod contact;
pub mod date;
pub mod location;
pub mod organizer;
pub mod time;

use regex::Regex;

/// How a rule turns its regex captures into the extracted value.
pub enum Output {
    /// Non-empty capture groups joined by single spaces.
    SpaceJoinGroups,
    /// The entire match, trimmed.
    WholeMatch,
}

pub struct PatternRule {
    regex: Regex,
    output: Output,
}

impl PatternRule {
    pub fn new(pattern: &str, output: Output) -> Self {
        Self {
            regex: Regex::new(pattern).expect("valid extraction pattern"),
            output,
        }
    }

    pub fn try_match(&self, text: &str) -> Option<String> {
        let caps = self.regex.captures(text)?;
        let value = match self.output {
            Output::WholeMatch => caps.get(0)?.as_str().to_string(),
            Output::SpaceJoinGroups => {
                let parts: Vec<&str> = caps
                    .iter()
                    .skip(1)
                    .flatten()
                    .map(|group| group.as_str())
                    .collect();
                if parts.is_empty() {
                    return None;
                }
                parts.join(" ")
            }
        };
        let value = value.trim().to_string();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}

/// Runs an ordered cascade and stops at the first rule that matches.
pub fn first_match(rules: &[PatternRule], text: &str) -> Option<String> {
    rules.iter().find_map(|rule| rule.try_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_match_output_is_trimmed() {
        let rule = PatternRule::new(r"\bToday\b", Output::WholeMatch);
        assert_eq!(rule.try_match("starts Today at noon"), Some("Today".into()));
        assert_eq!(rule.try_match("tomorrow"), None);
    }

    #[test]
    fn group_output_joins_with_spaces() {
        let rule = PatternRule::new(r"(\d+)-(\d+)", Output::SpaceJoinGroups);
        assert_eq!(rule.try_match("pages 3-7"), Some("3 7".into()));
    }

    #[test]
    fn cascade_stops_at_the_first_matching_rule() {
        let rules = vec![
            PatternRule::new(r"first (\w+)", Output::SpaceJoinGroups),
            PatternRule::new(r"(\w+)", Output::SpaceJoinGroups),
        ];
        assert_eq!(first_match(&rules, "the first word"), Some("word".into()));
        assert_eq!(first_match(&rules, "fallback"), Some("fallback".into()));
    }
}
