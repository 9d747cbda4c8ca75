use async_trait::async_trait;

use luma_core::common::error::Result;

/// How page content should be retrieved. `Full` asks for a scripted browser
/// so dynamically-loaded listings can grow; `Lightweight` is a plain HTTP
/// GET of the initial document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Full,
    Lightweight,
}

/// A handle onto an open listing page that may be able to reveal more
/// content (scroll-to-bottom or equivalent).
#[async_trait]
pub trait PageSession: Send {
    /// The current content snapshot.
    fn content(&self) -> &str;

    /// Asks the page to reveal more content and returns the new snapshot.
    async fn trigger_more_content(&mut self) -> Result<String>;
}

/// Page retrieval collaborator. Implementations may be backed by a headless
/// browser or a plain HTTP client; the engine works against either.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Fetches one document.
    async fn fetch(&self, url: &str) -> Result<String>;

    /// Opens a page for progressive loading.
    async fn open(&self, url: &str) -> Result<Box<dyn PageSession>>;
}
