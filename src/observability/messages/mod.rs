// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `callback` - Callback invocation events (continuation, abort, dropped errors)
//! * `config` - Configuration loading events

use tracing::Span;

pub mod callback;
pub mod config;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event.
    fn log(&self);

    /// Build a span carrying the message's fields.
    ///
    /// Only messages that wrap work (a continuation or an abort handler
    /// running) enter their span; point events such as a dropped error or a
    /// loaded config only `log`.
    fn span(&self, name: &str) -> Span;
}
