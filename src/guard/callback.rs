// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::any::type_name;
use std::fmt;
use std::rc::Rc;

use crate::config::consts::{DEFAULT_CALLBACK_NAME, NAME_SEPARATOR};
use crate::errors::UnhandledErrorPolicy;
use crate::guard::handler::AbortHandler;
use crate::guard::link::Link;
use crate::observability::messages::callback::{
    AbortDispatched, AbortHandlerReplaced, ContinuationDispatched, UnhandledErrorDropped,
};
use crate::observability::messages::StructuredLog;
use crate::traits::Completion;

type Continuation<'cb, T, E> = Box<dyn FnMut(&Link<'cb, E>, T) + 'cb>;

/// Completion handler that runs a continuation on success and aborts the
/// chain on error.
///
/// `T` is the result payload handed to the continuation; use a tuple when an
/// operation produces several values and `()` when it produces none. `E` is
/// never inspected.
///
/// On `Err(error)` the continuation is skipped. The error goes to the abort
/// handler attached with [`Callback::or`]; without one it is handled by the
/// callback's [`UnhandledErrorPolicy`], which by default drops it silently.
///
/// # Example
/// ```
/// use std::cell::RefCell;
/// use flawless::guard::{then, Callback};
///
/// let errors = RefCell::new(Vec::new());
/// let mut sum = 0;
/// {
///     let mut cb: Callback<'_, (i32, i32), &str> =
///         then(|(a, b): (i32, i32)| sum = a + b).or(|e| errors.borrow_mut().push(e));
///
///     cb.invoke(Ok((2, 3)));
///     cb.invoke(Err("boom"));
/// }
///
/// assert_eq!(sum, 5);
/// assert_eq!(*errors.borrow(), vec!["boom"]);
/// ```
pub struct Callback<'cb, T, E> {
    continuation: Option<Continuation<'cb, T, E>>,
    pub(crate) abortion: Option<AbortHandler<'cb, E>>,
    pub(crate) name: Rc<str>,
    pub(crate) prefix: Option<Rc<str>>,
    pub(crate) policy: UnhandledErrorPolicy,
}

impl<'cb, T, E> Callback<'cb, T, E> {
    /// Callback whose continuation receives the results only.
    pub fn new<F>(mut continuation: F) -> Self
    where
        F: FnMut(T) + 'cb,
    {
        let continuation: Continuation<'cb, T, E> =
            Box::new(move |_: &Link<'cb, E>, results: T| continuation(results));
        Self::build(Some(continuation))
    }

    /// Callback whose continuation also receives the [`Link`] it runs in.
    pub fn with_link<F>(continuation: F) -> Self
    where
        F: FnMut(&Link<'cb, E>, T) + 'cb,
    {
        let continuation: Continuation<'cb, T, E> = Box::new(continuation);
        Self::build(Some(continuation))
    }

    fn build(continuation: Option<Continuation<'cb, T, E>>) -> Self {
        Self {
            continuation,
            abortion: None,
            name: Rc::from(DEFAULT_CALLBACK_NAME),
            prefix: None,
            policy: UnhandledErrorPolicy::default(),
        }
    }

    /// Attach the abort handler, replacing any previous one.
    pub fn or<F>(self, handler: F) -> Self
    where
        F: Fn(E) + 'cb,
    {
        self.or_handler(AbortHandler::new(handler))
    }

    /// Attach an already shared abort handler, replacing any previous one.
    pub fn or_handler(mut self, handler: AbortHandler<'cb, E>) -> Self {
        if self.abortion.is_some() {
            AbortHandlerReplaced {
                callback: &self.name,
            }
            .log();
        }
        self.abortion = Some(handler);
        self
    }

    /// Name used for this callback in log messages.
    pub fn named(mut self, name: impl AsRef<str>) -> Self {
        self.name = qualify(self.prefix.as_deref(), name.as_ref());
        self
    }

    pub fn with_policy(mut self, policy: UnhandledErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> UnhandledErrorPolicy {
        self.policy
    }

    pub fn has_continuation(&self) -> bool {
        self.continuation.is_some()
    }

    pub fn has_abort_handler(&self) -> bool {
        self.abortion.is_some()
    }

    pub fn abort_handler(&self) -> Option<&AbortHandler<'cb, E>> {
        self.abortion.as_ref()
    }

    /// Complete the callback.
    ///
    /// May be called more than once; each call runs the continuation or the
    /// abort path again.
    pub fn invoke(&mut self, outcome: Result<T, E>) {
        let results = match outcome {
            Ok(results) => results,
            Err(error) => {
                dispatch_abort(&self.name, self.abortion.as_ref(), self.policy, error);
                return;
            }
        };

        let Some(continuation) = self.continuation.as_mut() else {
            return;
        };

        let msg = ContinuationDispatched {
            callback: &self.name,
            results_type: type_name::<T>(),
        };
        msg.log();
        let _span = msg.span("invoke").entered();

        let link = Link {
            name: Rc::clone(&self.name),
            prefix: self.prefix.clone(),
            abortion: self.abortion.clone(),
            policy: self.policy,
        };
        continuation(&link, results);
    }

    /// Node-style completion: `Some(error)` aborts, `None` forwards `results`.
    pub fn respond(&mut self, error: Option<E>, results: T) {
        match error {
            Some(error) => self.invoke(Err(error)),
            None => self.invoke(Ok(results)),
        }
    }

    /// Turn the callback into a plain closure for APIs that take one.
    pub fn into_handler(mut self) -> impl FnMut(Result<T, E>) + 'cb
    where
        T: 'cb,
        E: 'cb,
    {
        move |outcome| self.invoke(outcome)
    }
}

impl<T, E> Default for Callback<'_, T, E> {
    /// A callback with no continuation: success does nothing.
    fn default() -> Self {
        Self::build(None)
    }
}

impl<T, E> Completion<T, E> for Callback<'_, T, E> {
    fn complete(&mut self, outcome: Result<T, E>) {
        self.invoke(outcome)
    }
}

impl<T, E> fmt::Debug for Callback<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("name", &self.name)
            .field("has_continuation", &self.has_continuation())
            .field("has_abort_handler", &self.has_abort_handler())
            .field("policy", &self.policy)
            .finish()
    }
}

/// Route an error to the abort handler, or apply the unhandled policy.
pub(crate) fn dispatch_abort<E>(
    name: &str,
    abortion: Option<&AbortHandler<'_, E>>,
    policy: UnhandledErrorPolicy,
    error: E,
) {
    let error_type = type_name::<E>();

    match abortion {
        Some(handler) => {
            let msg = AbortDispatched {
                callback: name,
                error_type,
            };
            msg.log();
            let _span = msg.span("abort").entered();
            handler.abort(error);
        }
        None => match policy {
            UnhandledErrorPolicy::Swallow => {}
            UnhandledErrorPolicy::Log => UnhandledErrorDropped {
                callback: name,
                error_type,
            }
            .log(),
        },
    }
}

pub(crate) fn qualify(prefix: Option<&str>, name: &str) -> Rc<str> {
    match prefix {
        Some(prefix) => Rc::from(format!("{}{}{}", prefix, NAME_SEPARATOR, name)),
        None => Rc::from(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn forwards_results_to_continuation() {
        let results = RefCell::new(Vec::new());
        let mut cb: Callback<'_, i32, &str> = Callback::new(|r| results.borrow_mut().push(r));

        cb.invoke(Ok(42));

        assert_eq!(*results.borrow(), vec![42]);
    }

    #[test]
    fn error_skips_continuation_and_reaches_handler() {
        let ran = Cell::new(false);
        let errors = RefCell::new(Vec::new());
        let mut cb: Callback<'_, i32, &str> =
            Callback::new(|_| ran.set(true)).or(|e| errors.borrow_mut().push(e));

        cb.invoke(Err("boom"));

        assert!(!ran.get());
        assert_eq!(*errors.borrow(), vec!["boom"]);
    }

    #[test]
    fn error_without_handler_is_dropped() {
        let ran = Cell::new(false);
        let mut cb: Callback<'_, i32, &str> = Callback::new(|_| ran.set(true));

        cb.invoke(Err("boom"));

        assert!(!ran.get());
        assert!(!cb.has_abort_handler());
    }

    #[test]
    fn error_without_handler_under_log_policy_still_skips_continuation() {
        let ran = Cell::new(false);
        let mut cb: Callback<'_, i32, &str> =
            Callback::new(|_| ran.set(true)).with_policy(UnhandledErrorPolicy::Log);

        cb.invoke(Err("boom"));

        assert!(!ran.get());
    }

    #[test]
    fn zero_is_an_error_value() {
        let errors = RefCell::new(Vec::new());
        let ran = Cell::new(false);
        let mut cb = Callback::new(|_: ()| ran.set(true)).or(|code: i32| errors.borrow_mut().push(code));

        cb.invoke(Err(0));

        assert!(!ran.get());
        assert_eq!(*errors.borrow(), vec![0]);
    }

    #[test]
    fn default_callback_does_nothing() {
        let mut cb: Callback<'_, i32, &str> = Callback::default();
        assert!(!cb.has_continuation());

        cb.invoke(Ok(1));
        cb.invoke(Err("ignored"));
    }

    #[test]
    fn default_callback_still_aborts() {
        let errors = RefCell::new(Vec::new());
        let mut cb: Callback<'_, (), &str> = Callback::default().or(|e| errors.borrow_mut().push(e));

        cb.invoke(Ok(()));
        cb.invoke(Err("late"));

        assert_eq!(*errors.borrow(), vec!["late"]);
    }

    #[test]
    fn or_replaces_previous_handler() {
        let first = RefCell::new(Vec::new());
        let second = RefCell::new(Vec::new());
        let mut cb: Callback<'_, (), &str> = Callback::default()
            .or(|e| first.borrow_mut().push(e))
            .or(|e| second.borrow_mut().push(e));

        cb.invoke(Err("boom"));

        assert!(first.borrow().is_empty());
        assert_eq!(*second.borrow(), vec!["boom"]);
    }

    #[test]
    fn or_keeps_continuation_and_name() {
        let calls = Cell::new(0);
        let cb: Callback<'_, (), &str> = Callback::new(|()| calls.set(calls.get() + 1)).named("write");
        let mut cb = cb.or(|_| {});

        assert_eq!(cb.name(), "write");
        assert!(cb.has_continuation());
        assert!(cb.has_abort_handler());

        cb.invoke(Ok(()));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn repeated_invocation_runs_again() {
        let calls = Cell::new(0);
        let errors = Cell::new(0);
        let mut cb: Callback<'_, (), ()> = Callback::new(|()| calls.set(calls.get() + 1))
            .or(|()| errors.set(errors.get() + 1));

        cb.invoke(Ok(()));
        cb.invoke(Ok(()));
        cb.invoke(Err(()));
        cb.invoke(Err(()));

        assert_eq!(calls.get(), 2);
        assert_eq!(errors.get(), 2);
    }

    #[test]
    fn respond_follows_node_convention() {
        let results = RefCell::new(Vec::new());
        let errors = RefCell::new(Vec::new());
        let mut cb = Callback::new(|r: u16| results.borrow_mut().push(r))
            .or(|e: String| errors.borrow_mut().push(e));

        cb.respond(None, 200);
        cb.respond(Some("failed".to_string()), 500);

        assert_eq!(*results.borrow(), vec![200]);
        assert_eq!(*errors.borrow(), vec!["failed".to_string()]);
    }

    #[test]
    fn into_handler_behaves_like_invoke() {
        let results = RefCell::new(Vec::new());
        let errors = RefCell::new(Vec::new());
        let cb: Callback<'_, u8, &str> =
            Callback::new(|r| results.borrow_mut().push(r)).or(|e| errors.borrow_mut().push(e));
        let mut handler = cb.into_handler();

        handler(Ok(1));
        handler(Err("nope"));

        assert_eq!(*results.borrow(), vec![1]);
        assert_eq!(*errors.borrow(), vec!["nope"]);
    }

    #[test]
    fn completion_trait_dispatches_to_invoke() {
        fn finish<C: Completion<u8, &'static str>>(mut c: C) {
            c.complete(Ok(9));
        }

        let results = RefCell::new(Vec::new());
        finish(Callback::new(|r: u8| results.borrow_mut().push(r)));

        assert_eq!(*results.borrow(), vec![9]);
    }

    #[test]
    fn link_names_the_running_callback() {
        let seen = RefCell::new(String::new());
        let mut cb: Callback<'_, (), ()> =
            Callback::with_link(|link, ()| seen.borrow_mut().push_str(link.name())).named("fetch");

        cb.invoke(Ok(()));

        assert_eq!(*seen.borrow(), "fetch");
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a TRACE-level subscriber and return everything it logged.
    fn capture_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, f);

        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn swallowed_error_logs_nothing() {
        let output = capture_logs(|| {
            let mut cb: Callback<'_, (), &str> = Callback::default();
            cb.invoke(Err("boom"));
        });

        assert_eq!(output, "");
    }

    #[test]
    fn log_policy_warns_once_with_callback_name() {
        let output = capture_logs(|| {
            let mut cb: Callback<'_, (), &str> = Callback::default()
                .named("sink")
                .with_policy(UnhandledErrorPolicy::Log);
            cb.invoke(Err("boom"));
        });

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1, "unexpected output: {}", output);
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].contains("Callback 'sink' dropped &str"));
    }

    #[test]
    fn qualify_joins_prefix() {
        assert_eq!(&*qualify(Some("io"), "read"), "io::read");
        assert_eq!(&*qualify(None, "read"), "read");
    }
}
