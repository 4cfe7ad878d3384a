// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Something an asynchronous operation hands its outcome to when it finishes.
///
/// Operations written against this crate take `impl Completion<T, E>` so that
/// callers can pass either a [`Callback`](crate::guard::Callback) or a plain
/// closure. The operation is expected to call `complete` exactly once; nothing
/// enforces that.
pub trait Completion<T, E> {
    fn complete(&mut self, outcome: Result<T, E>);
}

impl<T, E, F> Completion<T, E> for F
where
    F: FnMut(Result<T, E>),
{
    fn complete(&mut self, outcome: Result<T, E>) {
        self(outcome)
    }
}
