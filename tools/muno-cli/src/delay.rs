//! Real-time latency for the terminal storefront.

use std::time::Duration;

use async_trait::async_trait;
use muno_commerce::Delay;

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
