// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::rc::Rc;

use crate::config::consts::DEFAULT_CALLBACK_NAME;
use crate::config::GuardConfig;
use crate::errors::UnhandledErrorPolicy;
use crate::guard::callback::{qualify, Callback};
use crate::guard::link::Link;

/// Factory for callbacks that share a configuration.
///
/// The free functions [`then`](crate::guard::then) and
/// [`then_with`](crate::guard::then_with) use `Guard::default()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Guard {
    policy: UnhandledErrorPolicy,
    name_prefix: Option<String>,
}

impl Guard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a guard from a loaded configuration
    pub fn from_config(cfg: &GuardConfig) -> Self {
        Self {
            policy: cfg.unhandled_errors,
            name_prefix: cfg.name_prefix.clone(),
        }
    }

    pub fn with_policy(mut self, policy: UnhandledErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }

    pub fn policy(&self) -> UnhandledErrorPolicy {
        self.policy
    }

    pub fn name_prefix(&self) -> Option<&str> {
        self.name_prefix.as_deref()
    }

    pub fn then<'cb, T, E, F>(&self, continuation: F) -> Callback<'cb, T, E>
    where
        F: FnMut(T) + 'cb,
    {
        self.configure(Callback::new(continuation))
    }

    pub fn then_with<'cb, T, E, F>(&self, continuation: F) -> Callback<'cb, T, E>
    where
        F: FnMut(&Link<'cb, E>, T) + 'cb,
    {
        self.configure(Callback::with_link(continuation))
    }

    /// A callback with no continuation, for operations whose results are
    /// not needed but whose errors still should abort.
    pub fn detached<'cb, T, E>(&self) -> Callback<'cb, T, E> {
        self.configure(Callback::default())
    }

    fn configure<'cb, T, E>(&self, mut callback: Callback<'cb, T, E>) -> Callback<'cb, T, E> {
        let prefix: Option<Rc<str>> = self.name_prefix.as_deref().map(Rc::from);
        callback.name = qualify(prefix.as_deref(), DEFAULT_CALLBACK_NAME);
        callback.prefix = prefix;
        callback.policy = self.policy;
        callback
    }
}
