use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use scraper::{Html, Selector};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use luma_core::common::error::Result;
use luma_core::domain::Event;

use crate::app::ports::PageRenderer;
use crate::common::constants::{BASE_URL, MAX_CITY_LISTING_EVENTS, MAX_LISTING_EVENTS};
use crate::common::text::element_text;
use crate::common::urls::absolute_url;
use crate::config::ScraperConfig;
use crate::enricher::{ContactDetails, ContactEnricher};
use crate::extractor::FieldExtractor;
use crate::scroll::ScrollLoader;

/// One scrape target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeSource {
    /// The global explore feed.
    Explore,
    /// A named collection, e.g. "web3" or "hackathon".
    Slug(String),
    /// A city feed, e.g. "new-delhi" or "Mumbai".
    City(String),
    /// A single event page.
    Url(String),
}

impl ScrapeSource {
    fn target_url(&self) -> String {
        match self {
            ScrapeSource::Explore => format!("{BASE_URL}/explore"),
            ScrapeSource::Slug(slug) => format!("{BASE_URL}/{slug}"),
            ScrapeSource::City(city) => format!("{BASE_URL}/{}", city_slug(city)),
            ScrapeSource::Url(url) => url.clone(),
        }
    }

    fn lead_cap(&self) -> usize {
        match self {
            ScrapeSource::City(_) => MAX_CITY_LISTING_EVENTS,
            _ => MAX_LISTING_EVENTS,
        }
    }

    /// Only the explore feed filters leads by anchor text before paying for
    /// the detail fetches; slug and city feeds always follow every lead.
    fn prefilters_leads(&self) -> bool {
        matches!(self, ScrapeSource::Explore)
    }
}

impl fmt::Display for ScrapeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeSource::Explore => write!(f, "explore feed"),
            ScrapeSource::Slug(slug) => write!(f, "slug '{slug}'"),
            ScrapeSource::City(city) => write!(f, "city '{city}'"),
            ScrapeSource::Url(url) => write!(f, "event {url}"),
        }
    }
}

/// Outcome of one source within a batch run.
#[derive(Debug, Clone)]
pub struct SourceReport {
    pub source: ScrapeSource,
    pub events: Vec<Event>,
    pub error: Option<String>,
}

struct EventLead {
    url: String,
    link_text: String,
}

/// Orchestrates one scrape: fetch, segment, extract, enrich, filter.
pub struct EventAssembler {
    renderer: Arc<dyn PageRenderer>,
    extractor: FieldExtractor,
    enricher: ContactEnricher,
    scroll: ScrollLoader,
    request_delay: Duration,
    enrich_concurrency: usize,
}

impl EventAssembler {
    pub fn new(renderer: Arc<dyn PageRenderer>, config: &ScraperConfig) -> Self {
        Self {
            extractor: FieldExtractor::new(BASE_URL),
            enricher: ContactEnricher::new(renderer.clone()),
            scroll: ScrollLoader::new(
                config.scroll_max_attempts,
                Duration::from_secs(config.scroll_attempt_timeout_secs),
            ),
            request_delay: Duration::from_millis(config.request_delay_ms),
            enrich_concurrency: config.enrich_concurrency,
            renderer,
        }
    }

    /// Runs one scrape to completion. A failed primary fetch is the only
    /// error path; an empty listing is an empty result, not an error.
    pub async fn scrape(
        &self,
        source: &ScrapeSource,
        keywords: Option<&[String]>,
    ) -> Result<Vec<Event>> {
        info!(source = %source, "starting scrape");
        let drafts = match source {
            ScrapeSource::Url(url) => {
                let html = self.renderer.fetch(url).await?;
                vec![(self.extractor.extract(url, &html), html)]
            }
            _ => self.scrape_listing(source, keywords).await?,
        };

        let events = self.enrich_all(drafts).await;
        // Dedup must run exactly once, before the keyword filter.
        let events = dedupe_by_url(events);
        let events = filter_by_keywords(events, keywords);
        info!(source = %source, count = events.len(), "scrape finished");
        Ok(events)
    }

    /// Runs several sources back to back. One source's failure is recorded
    /// on its report and never aborts the rest.
    pub async fn scrape_batch(
        &self,
        sources: &[ScrapeSource],
        keywords: Option<&[String]>,
    ) -> Vec<SourceReport> {
        let mut reports = Vec::with_capacity(sources.len());
        for source in sources {
            match self.scrape(source, keywords).await {
                Ok(events) => reports.push(SourceReport {
                    source: source.clone(),
                    events,
                    error: None,
                }),
                Err(err) => {
                    warn!(source = %source, error = %err, "source failed; continuing batch");
                    reports.push(SourceReport {
                        source: source.clone(),
                        events: Vec::new(),
                        error: Some(err.to_string()),
                    });
                }
            }
        }
        reports
    }

    async fn scrape_listing(
        &self,
        source: &ScrapeSource,
        keywords: Option<&[String]>,
    ) -> Result<Vec<(Event, String)>> {
        let listing_url = source.target_url();
        let mut session = self.renderer.open(&listing_url).await?;
        let content = self.scroll.load_all(&mut *session).await;

        let mut leads = discover_event_leads(&content, BASE_URL);
        info!(count = leads.len(), url = %listing_url, "discovered event links");
        leads.truncate(source.lead_cap());
        if source.prefilters_leads() {
            if let Some(keywords) = keywords {
                leads.retain(|lead| matches_link_text(&lead.link_text, keywords));
            }
        }

        let mut drafts = Vec::with_capacity(leads.len());
        for (index, lead) in leads.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.request_delay).await;
            }
            let html = match self.renderer.fetch(&lead.url).await {
                Ok(html) => html,
                Err(err) => {
                    warn!(url = %lead.url, error = %err, "event page fetch failed; skipping");
                    continue;
                }
            };
            drafts.push((self.extractor.extract(&lead.url, &html), html));
        }
        Ok(drafts)
    }

    /// Fans contact enrichment out over a bounded worker pool, then puts the
    /// results back in discovery order.
    async fn enrich_all(&self, drafts: Vec<(Event, String)>) -> Vec<Event> {
        let semaphore = Arc::new(Semaphore::new(self.enrich_concurrency.max(1)));
        let mut tasks = JoinSet::new();
        let mut events = Vec::with_capacity(drafts.len());

        for (index, (event, html)) in drafts.into_iter().enumerate() {
            let organizer_contact = event.organizer_contact.clone();
            events.push(event);
            let enricher = self.enricher.clone();
            let semaphore = semaphore.clone();
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                (index, enricher.enrich(&html, &organizer_contact).await)
            });
        }

        let mut details: Vec<Option<ContactDetails>> = vec![None; events.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, found)) => details[index] = Some(found),
                Err(err) => warn!(error = %err, "enrichment task failed"),
            }
        }
        for (event, found) in events.iter_mut().zip(details) {
            if let Some(found) = found {
                ContactEnricher::apply(event, found);
            }
        }
        events
    }
}

const EVENT_LINK_SELECTORS: &[&str] = &[
    r#"a[href*="/event/"]"#,
    r#"a[href*="/e/"]"#,
    r#"[data-testid="event-card"] a"#,
    ".event-card a",
    r#"a[class*="event"]"#,
];

/// Finds event anchors in listing content, first via the known card
/// selectors, then by scanning every anchor for event-shaped paths. Leads
/// are deduplicated by URL at discovery so no detail page is fetched twice.
fn discover_event_leads(listing_html: &str, base_url: &str) -> Vec<EventLead> {
    let document = Html::parse_document(listing_html);

    let mut anchors = Vec::new();
    for raw in EVENT_LINK_SELECTORS {
        let selector = Selector::parse(raw).expect("valid event link selector");
        let found: Vec<_> = document.select(&selector).collect();
        if !found.is_empty() {
            anchors = found;
            break;
        }
    }
    if anchors.is_empty() {
        let selector = Selector::parse("a[href]").expect("valid anchor selector");
        anchors = document
            .select(&selector)
            .filter(|element| {
                let href = element.value().attr("href").unwrap_or("");
                href.contains("/event/") || href.contains("/e/")
            })
            .collect();
    }

    let mut seen = HashSet::new();
    let mut leads = Vec::new();
    for element in anchors {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        // An anchor that cannot resolve to a URL cannot carry an identity
        // key, so it is dropped entirely.
        let Some(url) = absolute_url(base_url, href) else {
            continue;
        };
        if seen.insert(url.clone()) {
            leads.push(EventLead {
                link_text: element_text(&element),
                url,
            });
        }
    }
    leads
}

fn matches_link_text(link_text: &str, keywords: &[String]) -> bool {
    let haystack = link_text.to_lowercase();
    keywords.iter().any(|keyword| {
        let keyword = keyword.trim().to_lowercase();
        !keyword.is_empty() && haystack.contains(&keyword)
    })
}

fn dedupe_by_url(events: Vec<Event>) -> Vec<Event> {
    let mut seen = HashSet::new();
    events
        .into_iter()
        .filter(|event| seen.insert(event.event_url.clone()))
        .collect()
}

fn filter_by_keywords(events: Vec<Event>, keywords: Option<&[String]>) -> Vec<Event> {
    match keywords {
        Some(keywords) if !keywords.is_empty() => events
            .into_iter()
            .filter(|event| event.matches_any_keyword(keywords))
            .collect(),
        _ => events,
    }
}

fn city_slug(city: &str) -> String {
    city.trim().to_lowercase().replace([' ', '_'], "-")
}
