mod http_renderer;

pub use http_renderer::HttpRenderer;

use std::sync::Arc;
use tracing::warn;

use luma_core::common::error::Result;

use crate::app::ports::{PageRenderer, RenderMode};
use crate::config::ScraperConfig;

/// Builds the page retrieval backend for one scrape run.
///
/// Only the lightweight HTTP backend is linked into this build. A request
/// for full rendering falls back to it; callers that need real scripted
/// rendering construct the assembler with their own `PageRenderer`.
pub fn build_renderer(mode: RenderMode, config: &ScraperConfig) -> Result<Arc<dyn PageRenderer>> {
    if mode == RenderMode::Full {
        warn!("full render mode requested but no browser backend is linked; using the HTTP renderer");
    }
    Ok(Arc::new(HttpRenderer::new(config)?))
}
