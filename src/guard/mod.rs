// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Callback guards for Node-style asynchronous operations.
//!
//! An operation that reports its outcome through a completion handler gets a
//! [`Callback`] built with [`then`]: the continuation runs with the results on
//! success, and `.or(handler)` decides where an error goes.
//!
//! ```
//! use std::cell::RefCell;
//! use flawless::guard::then;
//! use flawless::traits::Completion;
//!
//! fn read_port(raw: &str, mut done: impl Completion<u16, String>) {
//!     done.complete(raw.parse().map_err(|e: std::num::ParseIntError| e.to_string()));
//! }
//!
//! let ports = RefCell::new(Vec::new());
//! let errors = RefCell::new(Vec::new());
//!
//! read_port("8080", then(|port| ports.borrow_mut().push(port)).or(|e| errors.borrow_mut().push(e)));
//! read_port("http", then(|port| ports.borrow_mut().push(port)).or(|e| errors.borrow_mut().push(e)));
//!
//! assert_eq!(*ports.borrow(), vec![8080]);
//! assert_eq!(errors.borrow().len(), 1);
//! ```

mod callback;
mod factory;
mod handler;
mod link;


pub use callback::Callback;
pub use factory::Guard;
pub use handler::AbortHandler;
pub use link::Link;

/// Build a callback that forwards results to `continuation`.
pub fn then<'cb, T, E, F>(continuation: F) -> Callback<'cb, T, E>
where
    F: FnMut(T) + 'cb,
{
    Callback::new(continuation)
}

/// Build a callback whose continuation also receives its [`Link`], for
/// continuations that start the next step of a chain.
pub fn then_with<'cb, T, E, F>(continuation: F) -> Callback<'cb, T, E>
where
    F: FnMut(&Link<'cb, E>, T) + 'cb,
{
    Callback::with_link(continuation)
}
