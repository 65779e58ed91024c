//! Simulated network latency.
//!
//! There is no backend, but screens still show a loading state while "data"
//! arrives. The wait goes through [`Delay`] so the CLI can sleep for real
//! while tests complete instantly and inspect what was requested.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// Source of simulated latency.
#[async_trait]
pub trait Delay: Send + Sync {
    /// Wait for `duration` (or pretend to).
    async fn wait(&self, duration: Duration);
}

/// Completes immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantDelay;

#[async_trait]
impl Delay for InstantDelay {
    async fn wait(&self, _duration: Duration) {}
}

/// Completes immediately and records every requested duration.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    calls: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Durations requested so far, in call order.
    pub fn recorded(&self) -> Vec<Duration> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Total simulated time requested.
    pub fn total(&self) -> Duration {
        self.recorded().iter().sum()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn wait(&self, duration: Duration) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(duration);
        }
    }
}
