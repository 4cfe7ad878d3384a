// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::rc::Rc;

use crate::config::consts::DEFAULT_CALLBACK_NAME;
use crate::errors::UnhandledErrorPolicy;
use crate::guard::callback::{dispatch_abort, qualify, Callback};
use crate::guard::handler::AbortHandler;

/// The running callback, as seen from inside its continuation.
///
/// A continuation that starts another asynchronous operation uses its link to
/// build the next callback in the chain, so a single `.or(...)` at the top
/// covers every step below it:
///
/// ```
/// use std::cell::RefCell;
/// use flawless::guard::{then_with, Callback};
///
/// let errors = RefCell::new(Vec::new());
/// let mut read: Callback<'_, String, String> = then_with(|link, text: String| {
///     let mut parse = link.then(|_port: u16| {});
///     parse.invoke(text.parse::<u16>().map_err(|e| e.to_string()));
/// })
/// .or(|e| errors.borrow_mut().push(e));
///
/// read.invoke(Ok("not a port".to_string()));
/// assert_eq!(errors.borrow().len(), 1);
/// ```
pub struct Link<'cb, E> {
    pub(crate) name: Rc<str>,
    pub(crate) prefix: Option<Rc<str>>,
    pub(crate) abortion: Option<AbortHandler<'cb, E>>,
    pub(crate) policy: UnhandledErrorPolicy,
}

impl<'cb, E> Link<'cb, E> {
    /// Name of the callback this continuation belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abort_handler(&self) -> Option<&AbortHandler<'cb, E>> {
        self.abortion.as_ref()
    }

    /// Abort the chain from inside the continuation.
    ///
    /// Behaves exactly like the callback receiving `error`: the abort handler
    /// runs if one is attached, otherwise the unhandled policy applies.
    pub fn abort(&self, error: E) {
        dispatch_abort(&self.name, self.abortion.as_ref(), self.policy, error);
    }

    /// Build the next callback in the chain, sharing this link's abort handler.
    pub fn then<U, F>(&self, continuation: F) -> Callback<'cb, U, E>
    where
        F: FnMut(U) + 'cb,
    {
        self.inherit(Callback::new(continuation))
    }

    /// Like [`Link::then`], for a continuation that needs its own link.
    pub fn then_with<U, F>(&self, continuation: F) -> Callback<'cb, U, E>
    where
        F: FnMut(&Link<'cb, E>, U) + 'cb,
    {
        self.inherit(Callback::with_link(continuation))
    }

    fn inherit<U>(&self, mut callback: Callback<'cb, U, E>) -> Callback<'cb, U, E> {
        callback.name = qualify(self.prefix.as_deref(), DEFAULT_CALLBACK_NAME);
        callback.prefix = self.prefix.clone();
        callback.abortion = self.abortion.clone();
        callback.policy = self.policy;
        callback
    }
}
