// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

/// What a callback does with an error when no abort handler is attached.
///
/// # Variants
/// * `Swallow` - Drop the error without any trace (default)
/// * `Log` - Report the dropped error at `warn!` level, then drop it
///
/// Neither variant changes control flow: the continuation is never run on
/// the error path and nothing is raised to the caller.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnhandledErrorPolicy {
    #[default]
    Swallow,
    Log,
}
