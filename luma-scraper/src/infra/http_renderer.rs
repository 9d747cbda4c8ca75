use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use luma_core::common::error::{Result, ScraperError};

use crate::app::ports::{PageRenderer, PageSession};
use crate::config::ScraperConfig;

/// Plain-HTTP implementation of `PageRenderer`. It cannot execute scripts,
/// so its sessions serve the fetched document as-is and never grow.
pub struct HttpRenderer {
    client: reqwest::Client,
}

impl HttpRenderer {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(%url, "HTTP GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScraperError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        let response = response.error_for_status().map_err(|e| ScraperError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        response.text().await.map_err(|e| ScraperError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn open(&self, url: &str) -> Result<Box<dyn PageSession>> {
        let content = self.fetch(url).await?;
        Ok(Box::new(StaticSession { content }))
    }
}

/// Session over a document that was fetched once; triggers are no-ops.
struct StaticSession {
    content: String,
}

#[async_trait]
impl PageSession for StaticSession {
    fn content(&self) -> &str {
        &self.content
    }

    async fn trigger_more_content(&mut self) -> Result<String> {
        Ok(self.content.clone())
    }
}
