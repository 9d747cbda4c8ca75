use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, warn};

use crate::app::ports::PageSession;

/// Drives a page session's "load more" trigger until the content stops
/// growing or the attempt budget runs out. This is the only place the engine
/// waits on external rendering, and every wait is bounded.
pub struct ScrollLoader {
    max_attempts: u32,
    attempt_timeout: Duration,
}

impl ScrollLoader {
    pub fn new(max_attempts: u32, attempt_timeout: Duration) -> Self {
        Self {
            max_attempts,
            attempt_timeout,
        }
    }

    /// Returns the final content snapshot. Two consecutive snapshots with no
    /// growth between them end the loop, so a renderer that stops producing
    /// content costs exactly one confirming trigger. A timed-out or failed
    /// trigger counts as no growth, never as an error.
    pub async fn load_all(&self, session: &mut dyn PageSession) -> String {
        let mut content = session.content().to_string();
        for attempt in 1..=self.max_attempts {
            let snapshot = match timeout(self.attempt_timeout, session.trigger_more_content()).await
            {
                Ok(Ok(snapshot)) => snapshot,
                Ok(Err(err)) => {
                    warn!(attempt, error = %err, "content trigger failed; treating as no growth");
                    break;
                }
                Err(_) => {
                    warn!(attempt, "content trigger timed out; treating as no growth");
                    break;
                }
            };
            if snapshot.len() <= content.len() {
                debug!(attempt, "no new content revealed");
                break;
            }
            debug!(attempt, size = snapshot.len(), "more content revealed");
            content = snapshot;
        }
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use luma_core::common::error::Result;

    struct GrowingSession {
        content: String,
        growth_left: usize,
        triggers: usize,
    }

    impl GrowingSession {
        fn new(growth_left: usize) -> Self {
            Self {
                content: "seed".to_string(),
                growth_left,
                triggers: 0,
            }
        }
    }

    #[async_trait]
    impl PageSession for GrowingSession {
        fn content(&self) -> &str {
            &self.content
        }

        async fn trigger_more_content(&mut self) -> Result<String> {
            self.triggers += 1;
            if self.growth_left > 0 {
                self.growth_left -= 1;
                self.content.push_str(" more");
            }
            Ok(self.content.clone())
        }
    }

    struct StalledSession {
        content: String,
        triggers: usize,
    }

    #[async_trait]
    impl PageSession for StalledSession {
        fn content(&self) -> &str {
            &self.content
        }

        async fn trigger_more_content(&mut self) -> Result<String> {
            self.triggers += 1;
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(self.content.clone())
        }
    }

    #[tokio::test]
    async fn stops_one_trigger_after_growth_ends() {
        let mut session = GrowingSession::new(3);
        let loader = ScrollLoader::new(10, Duration::from_secs(1));

        let content = loader.load_all(&mut session).await;

        // Three productive triggers plus one confirming no-growth.
        assert_eq!(session.triggers, 4);
        assert_eq!(content.matches("more").count(), 3);
    }

    #[tokio::test]
    async fn never_exceeds_the_attempt_budget() {
        let mut session = GrowingSession::new(usize::MAX);
        let loader = ScrollLoader::new(5, Duration::from_secs(1));

        loader.load_all(&mut session).await;

        assert_eq!(session.triggers, 5);
    }

    #[tokio::test]
    async fn a_stalled_trigger_counts_as_no_growth() {
        let mut session = StalledSession {
            content: "seed".to_string(),
            triggers: 0,
        };
        let loader = ScrollLoader::new(10, Duration::from_millis(20));

        let content = loader.load_all(&mut session).await;

        assert_eq!(session.triggers, 1);
        assert_eq!(content, "seed");
    }

    #[tokio::test]
    async fn a_static_page_costs_a_single_confirming_trigger() {
        let mut session = GrowingSession::new(0);
        let loader = ScrollLoader::new(10, Duration::from_secs(1));

        let content = loader.load_all(&mut session).await;

        assert_eq!(session.triggers, 1);
        assert_eq!(content, "seed");
    }
}
