use serde::{Deserialize, Serialize};

/// Placeholder written into any field that could not be resolved. Consumers
/// rely on every field being present, so unresolved values are never empty
/// strings or missing keys.
pub const SENTINEL: &str = "N/A";

/// One scraped event occurrence.
///
/// All fields are plain strings so the record doubles as its export shape;
/// `event_url` is the identity key and is the only field that can never hold
/// the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub event_name: String,
    pub date_time: String,
    pub location: String,
    pub organizer_name: String,
    /// URL of the organizer's profile page, used for contact enrichment.
    pub organizer_contact: String,
    pub host_email: String,
    pub host_phone: String,
    /// Comma-joined allow-listed social URLs in discovery order.
    pub host_social_media: String,
    /// Canonical source URL; unique within a result set.
    pub event_url: String,
}

impl Event {
    /// A record with the identity key set and every other field unresolved.
    pub fn new(event_url: impl Into<String>) -> Self {
        Self {
            event_name: SENTINEL.to_string(),
            date_time: SENTINEL.to_string(),
            location: SENTINEL.to_string(),
            organizer_name: SENTINEL.to_string(),
            organizer_contact: SENTINEL.to_string(),
            host_email: SENTINEL.to_string(),
            host_phone: SENTINEL.to_string(),
            host_social_media: SENTINEL.to_string(),
            event_url: event_url.into(),
        }
    }

    /// True when any keyword is a case-insensitive substring of the event
    /// name, location, or organizer name.
    pub fn matches_any_keyword(&self, keywords: &[String]) -> bool {
        let haystack = format!(
            "{} {} {}",
            self.event_name, self.location, self.organizer_name
        )
        .to_lowercase();
        keywords.iter().any(|keyword| {
            let keyword = keyword.trim().to_lowercase();
            !keyword.is_empty() && haystack.contains(&keyword)
        })
    }
}
