//! # Built-in Harness Adapter
//!
//! [`TestCase`] is a [`Tester`] for Rust's own `#[test]` harness, which only knows
//! that a test failed when it panics:
//!
//! - `log` prints `<file>:<line>: <message>` through the configured sink and
//!   keeps the failure for the final report
//! - `fail` marks the case failed; the case panics with the report when dropped
//! - `fail_now` panics with the report immediately
//!
//! ```rust,should_panic
//! use testr::{Assertion, TestCase};
//!
//! let t = TestCase::named("answer");
//! let assert = Assertion::new(&t);
//! assert.equal(41, 42, ());
//! // `t` panics here with "1 assertion in `answer` failed"
//! ```

use std::{
    cell::{Cell, RefCell},
    panic::Location,
    thread,
};

use crate::{
    errors::{CallSite, Failure, FailureReport},
    tester::{OutputSink, StdoutSink, Tester},
    Assertion,
};

/// How a failing test case renders its report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    pub use_colors: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stderr),
        }
    }
}

/// A [`Tester`] that fails the current `#[test]` by panicking.
pub struct TestCase {
    name: Option<String>,
    config: ReportConfig,
    sink: RefCell<Box<dyn OutputSink>>,
    site: Cell<Option<CallSite>>,
    failures: RefCell<Vec<Failure>>,
    failed: Cell<bool>,
}

impl TestCase {
    /// Creates a test case named after the current test thread, if any.
    pub fn new() -> Self {
        let name = thread::current()
            .name()
            .filter(|name| *name != "main")
            .map(str::to_owned);
        Self {
            name,
            config: ReportConfig::default(),
            sink: RefCell::new(Box::new(StdoutSink)),
            site: Cell::new(None),
            failures: RefCell::new(Vec::new()),
            failed: Cell::new(false),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        let mut case = Self::new();
        case.name = Some(name.into());
        case
    }

    pub fn with_config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_sink(self, sink: impl OutputSink + 'static) -> Self {
        *self.sink.borrow_mut() = Box::new(sink);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Assertion methods reporting into this test case.
    pub fn assert(&self) -> Assertion<'_, Self> {
        Assertion::new(self)
    }

    pub fn failed(&self) -> bool {
        self.failed.get()
    }

    /// The failures logged so far.
    pub fn report(&self) -> FailureReport {
        FailureReport {
            test: self.name.clone(),
            failures: self.failures.borrow().clone(),
        }
    }

    /// Clears the failed state so dropping the case does not panic.
    ///
    /// Returns the report that would otherwise have been raised.
    pub fn take_report(&self) -> FailureReport {
        self.failed.set(false);
        FailureReport {
            test: self.name.clone(),
            failures: self.failures.take(),
        }
    }

    fn rendered_report(&self) -> String {
        self.report().render(self.config.use_colors)
    }
}

impl Default for TestCase {
    fn default() -> Self {
        Self::new()
    }
}

impl Tester for TestCase {
    #[track_caller]
    fn helper(&self) {
        self.site.set(Some(Location::caller().into()));
    }

    fn log(&self, message: &str) {
        let site = self.site.take();
        let line = match site {
            Some(site) => format!("{site}: {message}"),
            None => message.to_string(),
        };
        self.sink.borrow_mut().emit(&line);
        self.failures.borrow_mut().push(Failure::new(message, site));
    }

    fn fail(&self) {
        self.failed.set(true);
    }

    #[track_caller]
    fn fail_now(&self) {
        self.failed.set(true);
        panic!("{}", self.rendered_report());
    }
}

impl Drop for TestCase {
    fn drop(&mut self) {
        if self.failed.get() && !thread::panicking() {
            panic!("{}", self.rendered_report());
        }
    }
}
