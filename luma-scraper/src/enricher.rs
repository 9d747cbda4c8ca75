use std::sync::Arc;

use scraper::{Html, Selector};
use tracing::{debug, warn};

use luma_core::domain::{Event, SENTINEL};

use crate::app::ports::PageRenderer;
use crate::common::constants::{MAX_PROFILE_SOCIAL_LINKS, MAX_SOCIAL_LINKS};
use crate::common::text::clean_text;
use crate::patterns::contact;

/// Contact details recovered for one event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub social: Vec<String>,
}

impl ContactDetails {
    fn missing_any(&self) -> bool {
        self.email.is_none() || self.phone.is_none() || self.social.is_empty()
    }

    /// Fills unresolved fields from `other`; resolved fields are never
    /// overwritten.
    fn fill_missing(&mut self, other: ContactDetails, social_cap: usize) {
        if self.email.is_none() {
            self.email = other.email;
        }
        if self.phone.is_none() {
            self.phone = other.phone;
        }
        if self.social.is_empty() {
            self.social = other.social.into_iter().take(social_cap).collect();
        }
    }
}

/// Resolves email, phone, and social links for one event: first from the
/// event's own page, then from the organizer profile for anything still
/// missing.
#[derive(Clone)]
pub struct ContactEnricher {
    renderer: Arc<dyn PageRenderer>,
}

impl ContactEnricher {
    pub fn new(renderer: Arc<dyn PageRenderer>) -> Self {
        Self { renderer }
    }

    pub async fn enrich(&self, event_html: &str, organizer_contact: &str) -> ContactDetails {
        let mut details = scan_contacts(event_html);
        if organizer_contact != SENTINEL && details.missing_any() {
            debug!(url = %organizer_contact, "fetching organizer profile for missing contact fields");
            match self.renderer.fetch(organizer_contact).await {
                Ok(profile_html) => {
                    details.fill_missing(scan_contacts(&profile_html), MAX_PROFILE_SOCIAL_LINKS)
                }
                Err(err) => warn!(
                    url = %organizer_contact,
                    error = %err,
                    "profile fetch failed; contact fields stay unresolved"
                ),
            }
        }
        details
    }

    /// Writes resolved details onto the event, leaving sentinels elsewhere.
    pub fn apply(event: &mut Event, details: ContactDetails) {
        if let Some(email) = details.email {
            event.host_email = email;
        }
        if let Some(phone) = details.phone {
            event.host_phone = phone;
        }
        if !details.social.is_empty() {
            event.host_social_media = details.social.join(", ");
        }
    }
}

/// One pass over a page: contact regexes over the text plus anchor hrefs
/// checked against the social allow-list.
fn scan_contacts(html: &str) -> ContactDetails {
    let document = Html::parse_document(html);
    let text = clean_text(
        &document
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" "),
    );

    let mut details = ContactDetails {
        email: contact::find_email(&text),
        phone: contact::find_phone(&text),
        social: Vec::new(),
    };

    let anchor = Selector::parse("a[href]").expect("valid anchor selector");
    for element in document.select(&anchor) {
        if let Some(href) = element.value().attr("href") {
            if contact::is_social_url(href) {
                push_unique(&mut details.social, href.to_lowercase());
            }
        }
    }
    for url in contact::find_social_urls(&text) {
        push_unique(&mut details.social, url.to_lowercase());
    }
    details.social.truncate(MAX_SOCIAL_LINKS);

    details
}

fn push_unique(list: &mut Vec<String>, url: String) {
    if !list.contains(&url) {
        list.push(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use luma_core::common::error::{Result, ScraperError};

    use crate::app::ports::PageSession;

    struct FakeRenderer {
        profile_html: Option<String>,
    }

    #[async_trait]
    impl PageRenderer for FakeRenderer {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.profile_html
                .clone()
                .ok_or_else(|| ScraperError::Fetch {
                    url: url.to_string(),
                    message: "profile unavailable".to_string(),
                })
        }

        async fn open(&self, _url: &str) -> Result<Box<dyn PageSession>> {
            unimplemented!("listings are not used in enricher tests")
        }
    }

    const EVENT_HTML: &str = r#"<html><body>
        <p>Hosted by Acme. Contact events@acme.io or call (206) 555-0144.</p>
    </body></html>"#;

    const PROFILE_HTML: &str = r#"<html><body>
        <p>other@acme.io</p>
        <a href="https://twitter.com/acme">Twitter</a>
        <a href="https://acme.io/blog">Blog</a>
    </body></html>"#;

    #[tokio::test]
    async fn event_page_fields_are_never_overwritten_by_the_profile() {
        let enricher = ContactEnricher::new(Arc::new(FakeRenderer {
            profile_html: Some(PROFILE_HTML.to_string()),
        }));

        let details = enricher.enrich(EVENT_HTML, "https://lu.ma/u/acme").await;
        assert_eq!(details.email.as_deref(), Some("events@acme.io"));
        assert_eq!(details.phone.as_deref(), Some("(206) 555-0144"));
        // Social was missing on the event page, so the profile fills it.
        assert_eq!(details.social, vec!["https://twitter.com/acme".to_string()]);
    }

    #[tokio::test]
    async fn profile_failure_is_non_fatal() {
        let enricher = ContactEnricher::new(Arc::new(FakeRenderer { profile_html: None }));

        let details = enricher.enrich("<html><body></body></html>", "https://lu.ma/u/acme").await;
        assert_eq!(details, ContactDetails::default());
    }

    #[tokio::test]
    async fn sentinel_contact_means_no_profile_fetch() {
        // A renderer that would fail if called; sentinel must short-circuit.
        let enricher = ContactEnricher::new(Arc::new(FakeRenderer { profile_html: None }));

        let details = enricher.enrich(EVENT_HTML, SENTINEL).await;
        assert_eq!(details.email.as_deref(), Some("events@acme.io"));
        assert!(details.social.is_empty());
    }

    #[test]
    fn apply_leaves_sentinels_for_missing_fields() {
        let mut event = Event::new("https://lu.ma/e/abc");
        ContactEnricher::apply(
            &mut event,
            ContactDetails {
                email: Some("events@acme.io".to_string()),
                phone: None,
                social: vec![
                    "https://twitter.com/acme".to_string(),
                    "https://github.com/acme".to_string(),
                ],
            },
        );

        assert_eq!(event.host_email, "events@acme.io");
        assert_eq!(event.host_phone, SENTINEL);
        assert_eq!(
            event.host_social_media,
            "https://twitter.com/acme, https://github.com/acme"
        );
    }
}
