// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration loading.

use crate::errors::UnhandledErrorPolicy;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Guard configuration loaded from disk.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ConfigLoaded<'a> {
    pub path: &'a str,
    pub policy: UnhandledErrorPolicy,
    pub name_prefix: Option<&'a str>,
}

impl Display for ConfigLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded guard config from '{}': unhandled_errors={:?}",
            self.path, self.policy
        )?;
        if let Some(prefix) = self.name_prefix {
            write!(f, ", name_prefix={}", prefix)?;
        }
        Ok(())
    }
}

impl StructuredLog for ConfigLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            policy = ?self.policy,
            name_prefix = self.name_prefix,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "config",
            span_name = name,
            path = self.path,
            policy = ?self.policy,
        )
    }
}
