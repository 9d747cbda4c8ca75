pub const BASE_URL: &str = "https://lu.ma";

/// How many event links to follow from one listing page.
pub const MAX_LISTING_EVENTS: usize = 20;
/// City feeds tend to be denser, so they get a higher cap.
pub const MAX_CITY_LISTING_EVENTS: usize = 30;

/// Cap on social URLs kept per event.
pub const MAX_SOCIAL_LINKS: usize = 5;
/// Cap on social URLs taken from an organizer profile page.
pub const MAX_PROFILE_SOCIAL_LINKS: usize = 3;

/// Upper bound on free-text captures (location and organizer style fields).
pub const MAX_FREE_TEXT_CAPTURE: usize = 50;

/// Platforms whose URLs count as social media contacts.
pub const SOCIAL_MEDIA_DOMAINS: &[&str] = &[
    "x.com",
    "twitter.com",
    "instagram.com",
    "facebook.com",
    "linkedin.com",
    "youtube.com",
    "tiktok.com",
    "github.com",
    "discord.gg",
    "telegram.me",
    "t.me",
];

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
