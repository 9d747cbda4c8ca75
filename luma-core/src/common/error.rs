use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("export failed: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, ScraperError>;
