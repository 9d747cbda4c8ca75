use once_cell::sync::Lazy;
use regex::Regex;

use crate::common::constants::SOCIAL_MEDIA_DOMAINS;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email pattern")
});

// Optional country code, then a 3-3-4 digit shape with common separators.
// Colons and slashes are deliberately absent so times and dates never match.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,2}\s?)?(?:\(\d{3}\)|\d{3})[\s.-]?\d{3}[\s.-]?\d{4}\b")
        .expect("valid phone pattern")
});

static SOCIAL_URL_RE: Lazy<Regex> = Lazy::new(|| {
    let domains = SOCIAL_MEDIA_DOMAINS
        .iter()
        .map(|domain| regex::escape(domain))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r#"(?i)https?://(?:www\.)?(?:{domains})/[^\s"<>]+"#
    ))
    .expect("valid social URL pattern")
});

pub fn find_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn find_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

/// All allow-listed social URLs in the text, in discovery order.
pub fn find_social_urls(text: &str) -> Vec<String> {
    SOCIAL_URL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// True when an href points at one of the allow-listed platforms.
pub fn is_social_url(href: &str) -> bool {
    let lower = href.to_lowercase();
    SOCIAL_MEDIA_DOMAINS
        .iter()
        .any(|domain| lower.contains(domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_found_in_prose() {
        assert_eq!(
            find_email("reach us at events@ethglobal.com for details"),
            Some("events@ethglobal.com".to_string())
        );
        assert_eq!(find_email("no contact here"), None);
    }

    #[test]
    fn phones_are_found_but_dates_are_not() {
        assert_eq!(
            find_phone("call +1 555 123 4567 to RSVP"),
            Some("+1 555 123 4567".to_string())
        );
        assert_eq!(find_phone("(206) 555-0144"), Some("(206) 555-0144".to_string()));
        assert_eq!(find_phone("happening on 2024-10-06 at 10:00"), None);
        assert_eq!(find_phone("06/10/2024"), None);
    }

    #[test]
    fn social_urls_respect_the_allow_list_and_order() {
        let text = "follow https://twitter.com/ethglobal and https://example.com/x \
                    then https://github.com/ethglobal";
        assert_eq!(
            find_social_urls(text),
            vec![
                "https://twitter.com/ethglobal".to_string(),
                "https://github.com/ethglobal".to_string(),
            ]
        );
    }

    #[test]
    fn href_allow_list_check() {
        assert!(is_social_url("https://www.instagram.com/acme"));
        assert!(is_social_url("https://t.me/acme"));
        assert!(!is_social_url("https://acme.com/contact"));
    }
}
