use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use luma_core::domain::Event;

use crate::common::text::{clean_text, element_text};
use crate::common::urls::absolute_url;
use crate::patterns::{date, location, organizer, time};

/// Selector cascades lifted from the markup the site actually serves; the
/// generic tails catch layout changes at the cost of precision.
const NAME_SELECTORS: &[&str] = &[
    r#"h1[data-testid="event-title"]"#,
    "h1.event-title",
    "h1.title",
    "h1",
    r#"[data-testid="event-name"]"#,
    r#"[class*="title"]"#,
];

const ORGANIZER_SELECTORS: &[&str] = &[
    r#"[data-testid="organizer-name"]"#,
    ".organizer-name",
    ".organizer",
    r#"[class*="organizer"]"#,
    r#"[class*="host"]"#,
    r#"[class*="creator"]"#,
    r#"a[href*="/u/"]"#,
];

const LOCATION_FALLBACK_SELECTORS: &[&str] = &[
    r#"[data-testid="event-location"]"#,
    ".event-location",
    ".location",
    r#"[class*="location"]"#,
    r#"[class*="venue"]"#,
    r#"[class*="address"]"#,
    r#"[class*="place"]"#,
];

const PROFILE_LINK_SELECTOR: &str = r#"a[href*="/u/"]"#;

static TIMEZONE_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:GMT|UTC)[+-][0-9:]+").expect("valid timezone pattern"));

/// Turns one event page into a typed record. Contact fields are left at the
/// sentinel; the enricher owns those.
pub struct FieldExtractor {
    base_url: String,
}

impl FieldExtractor {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    pub fn extract(&self, event_url: &str, html: &str) -> Event {
        let document = Html::parse_document(html);
        let page_text = clean_text(
            &document
                .root_element()
                .text()
                .collect::<Vec<_>>()
                .join(" "),
        );

        let mut event = Event::new(event_url);

        if let Some(name) = first_selector_text(&document, NAME_SELECTORS) {
            event.event_name = name;
        }

        if let Some(date_time) = extract_date_time(&page_text) {
            event.date_time = date_time;
        }

        match location::extract_location(&page_text) {
            Some(found) => event.location = found,
            None => {
                if let Some(found) = first_selector_text(&document, LOCATION_FALLBACK_SELECTORS)
                    .and_then(|raw| location::clean_location(&raw))
                {
                    event.location = found;
                }
            }
        }

        let (organizer_name, organizer_contact) = self.extract_organizer(&document, &page_text);
        if let Some(name) = organizer_name {
            event.organizer_name = name;
        }
        if let Some(contact) = organizer_contact {
            event.organizer_contact = contact;
        }

        event
    }

    /// Organizer name and profile URL: structured markup first, then any
    /// profile anchor, then the text pattern cascade.
    fn extract_organizer(&self, document: &Html, page_text: &str) -> (Option<String>, Option<String>) {
        let mut name = None;
        let mut contact = None;

        for raw in ORGANIZER_SELECTORS {
            let selector = Selector::parse(raw).expect("valid organizer selector");
            if let Some(element) = document.select(&selector).next() {
                if let Some(cleaned) = organizer::clean_organizer(&element_text(&element)) {
                    if element.value().name() == "a" {
                        contact = element
                            .value()
                            .attr("href")
                            .and_then(|href| absolute_url(&self.base_url, href));
                    }
                    name = Some(cleaned);
                    break;
                }
            }
        }

        if contact.is_none() {
            let selector = Selector::parse(PROFILE_LINK_SELECTOR).expect("valid profile selector");
            if let Some(anchor) = document.select(&selector).next() {
                contact = anchor
                    .value()
                    .attr("href")
                    .and_then(|href| absolute_url(&self.base_url, href));
                if name.is_none() {
                    name = organizer::clean_organizer(&element_text(&anchor));
                }
            }
        }

        if name.is_none() {
            name = organizer::extract_organizer(page_text);
        }

        (name, contact)
    }
}

fn first_selector_text(document: &Html, selectors: &[&str]) -> Option<String> {
    for raw in selectors {
        let selector = Selector::parse(raw).expect("valid selector");
        if let Some(element) = document.select(&selector).next() {
            let text = element_text(&element);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Date and time cascades run independently; whichever matched makes up the
/// combined value.
fn extract_date_time(page_text: &str) -> Option<String> {
    let combined = match (date::extract_date(page_text), time::extract_time(page_text)) {
        (Some(date), Some(time)) => format!("{date} {time}"),
        (Some(date), None) => date,
        (None, Some(time)) => time,
        (None, None) => return None,
    };
    clean_datetime(&combined)
}

fn clean_datetime(raw: &str) -> Option<String> {
    let cleaned = clean_text(&TIMEZONE_NOISE.replace_all(raw, " "));
    if cleaned.chars().count() < 3 {
        None
    } else {
        Some(cleaned)
    }
}
