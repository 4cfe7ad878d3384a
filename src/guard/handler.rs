// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::rc::Rc;

/// Shared handle to the function that receives a chain's error.
///
/// Cloning is cheap and yields a handle to the same function, which is how a
/// nested callback reuses its parent's handler.
pub struct AbortHandler<'cb, E> {
    inner: Rc<dyn Fn(E) + 'cb>,
}

impl<'cb, E> AbortHandler<'cb, E> {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(E) + 'cb,
    {
        Self {
            inner: Rc::new(handler),
        }
    }

    /// Run the handler with `error` as its sole argument.
    pub fn abort(&self, error: E) {
        (self.inner)(error)
    }

    /// True when both handles point at the same handler function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<E> Clone for AbortHandler<'_, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for AbortHandler<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbortHandler")
            .field("shared", &Rc::strong_count(&self.inner))
            .finish()
    }
}
