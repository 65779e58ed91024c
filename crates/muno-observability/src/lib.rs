//! Observability for the Muno storefront.
//!
//! This crate provides:
//! - `StructuredLogger` - Session-scoped structured logging (JSON or human)
//! - `init_tracing` - Global `tracing` subscriber for library events

mod logging;
mod subscriber;

pub use logging::*;
pub use subscriber::*;

// Re-export SessionId from muno-commerce for convenience
pub use muno_commerce::SessionId;

use thiserror::Error;

/// Observability setup errors.
#[derive(Error, Debug)]
pub enum ObservabilityError {
    #[error("Unknown log level '{0}'")]
    InvalidLevel(String),

    #[error("Unknown log format '{0}' (expected json or human)")]
    InvalidFormat(String),

    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}
