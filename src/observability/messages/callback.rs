// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for callback invocation events.
//!
//! Error values are never formatted: callbacks carry an opaque error type, so
//! messages report its type name instead.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A callback received results and is running its continuation.
///
/// # Log Level
/// `trace!` - Happens on every successful completion
pub struct ContinuationDispatched<'a> {
    pub callback: &'a str,
    pub results_type: &'a str,
}

impl Display for ContinuationDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Callback '{}' dispatching continuation with {}",
            self.callback, self.results_type
        )
    }
}

impl StructuredLog for ContinuationDispatched<'_> {
    fn log(&self) {
        tracing::trace!(
            callback = self.callback,
            results_type = self.results_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "continuation",
            span_name = name,
            callback = self.callback,
            results_type = self.results_type,
        )
    }
}

/// A callback received an error and is forwarding it to its abort handler.
///
/// # Log Level
/// `debug!` - The chain is being aborted, which the handler will report
///
/// # Example
/// ```
/// use flawless::observability::messages::callback::AbortDispatched;
///
/// let msg = AbortDispatched {
///     callback: "read_config",
///     error_type: "std::io::Error",
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Callback 'read_config' aborting chain with std::io::Error"
/// );
/// ```
pub struct AbortDispatched<'a> {
    pub callback: &'a str,
    pub error_type: &'a str,
}

impl Display for AbortDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Callback '{}' aborting chain with {}",
            self.callback, self.error_type
        )
    }
}

impl StructuredLog for AbortDispatched<'_> {
    fn log(&self) {
        tracing::debug!(
            callback = self.callback,
            error_type = self.error_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "abort",
            span_name = name,
            callback = self.callback,
            error_type = self.error_type,
        )
    }
}

/// A callback received an error but has no abort handler.
///
/// Only emitted under `UnhandledErrorPolicy::Log`.
///
/// # Log Level
/// `warn!` - The failure is invisible to the caller
pub struct UnhandledErrorDropped<'a> {
    pub callback: &'a str,
    pub error_type: &'a str,
}

impl Display for UnhandledErrorDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Callback '{}' dropped {} because no abort handler is attached",
            self.callback, self.error_type
        )
    }
}

impl StructuredLog for UnhandledErrorDropped<'_> {
    fn log(&self) {
        tracing::warn!(
            callback = self.callback,
            error_type = self.error_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "unhandled_error",
            span_name = name,
            callback = self.callback,
            error_type = self.error_type,
        )
    }
}

/// `or` was called on a callback that already had an abort handler.
///
/// # Log Level
/// `trace!` - Allowed, but usually a sign of a chaining mistake
pub struct AbortHandlerReplaced<'a> {
    pub callback: &'a str,
}

impl Display for AbortHandlerReplaced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Callback '{}' abort handler replaced", self.callback)
    }
}

impl StructuredLog for AbortHandlerReplaced<'_> {
    fn log(&self) {
        tracing::trace!(callback = self.callback, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!("abort_handler", span_name = name, callback = self.callback)
    }
}
