/// Resolves a possibly-relative href against a base URL.
pub fn absolute_url(base: &str, href: &str) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    let base_url = reqwest::Url::parse(base).ok()?;
    base_url.join(href).ok().map(|url| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_hrefs_are_joined_to_the_base() {
        assert_eq!(
            absolute_url("https://lu.ma", "/e/rust-meetup"),
            Some("https://lu.ma/e/rust-meetup".to_string())
        );
    }

    #[test]
    fn absolute_hrefs_pass_through() {
        assert_eq!(
            absolute_url("https://lu.ma", "https://example.com/e/abc"),
            Some("https://example.com/e/abc".to_string())
        );
    }
}
