//! Failure reporting sinks.
//!
//! A [`Reporter`] is the only thing matchers know about the test runner:
//! they log messages and mark the current test as failed, either deferred
//! ([`Reporter::error`]) or immediately ([`Reporter::fatal`]).

use std::fmt;

/// Minimal test-reporting interface.
pub trait Reporter {
    /// Record a message.
    fn log(&mut self, message: &str);

    /// Mark the test as failed and keep going.
    fn fail(&mut self);

    /// Mark the test as failed and stop it.
    fn fail_now(&mut self);

    fn failed(&self) -> bool;

    /// Log `message`, then [`fail`](Reporter::fail).
    fn error(&mut self, message: &str) {
        self.log(message);
        self.fail();
    }

    /// Log `message`, then [`fail_now`](Reporter::fail_now).
    fn fatal(&mut self, message: &str) {
        self.log(message);
        self.fail_now();
    }
}

/// Records every call. Used as a test double for matchers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingReporter {
    /// Set by `fail`
    pub failed: bool,
    /// Set by `fail_now`
    pub fatal: bool,
    pub logs: Vec<String>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for RecordingReporter {
    fn log(&mut self, message: &str) {
        self.logs.push(message.to_string());
    }

    fn fail(&mut self) {
        self.failed = true;
    }

    fn fail_now(&mut self) {
        self.fatal = true;
    }

    fn failed(&self) -> bool {
        self.failed || self.fatal
    }
}

/// Reporter for plain `#[test]` functions.
///
/// Messages go to stderr as they are logged. `fail_now` panics with every
/// message logged so far; a reporter that failed without stopping panics
/// when it is dropped at the end of the test.
///
/// ```should_panic
/// use expect_core::reporter::{PanicReporter, Reporter};
///
/// let mut reporter = PanicReporter::new();
/// reporter.error("values are not equal");
/// // dropped here: panics
/// ```
#[derive(Debug, Default)]
pub struct PanicReporter {
    failed: bool,
    logs: Vec<String>,
}

impl PanicReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }
}

impl fmt::Display for PanicReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expectations failed:")?;
        for message in &self.logs {
            write!(f, "\n{}", message)?;
        }
        Ok(())
    }
}

impl Reporter for PanicReporter {
    fn log(&mut self, message: &str) {
        eprintln!("{}", message);
        self.logs.push(message.to_string());
    }

    fn fail(&mut self) {
        self.failed = true;
    }

    fn fail_now(&mut self) {
        self.failed = true;
        panic!("{}", self);
    }

    fn failed(&self) -> bool {
        self.failed
    }
}

impl Drop for PanicReporter {
    fn drop(&mut self) {
        if self.failed && !std::thread::panicking() {
            panic!("{}", self);
        }
    }
}

/// Prefixes every logged message with `"{prefix}: "`.
pub struct PrefixedReporter<'a> {
    inner: &'a mut dyn Reporter,
    prefix: String,
}

impl<'a> PrefixedReporter<'a> {
    pub fn new(inner: &'a mut dyn Reporter, prefix: impl Into<String>) -> Self {
        Self {
            inner,
            prefix: prefix.into(),
        }
    }
}

impl Reporter for PrefixedReporter<'_> {
    fn log(&mut self, message: &str) {
        self.inner.log(&format!("{}: {}", self.prefix, message));
    }

    fn fail(&mut self) {
        self.inner.fail();
    }

    fn fail_now(&mut self) {
        self.inner.fail_now();
    }

    fn failed(&self) -> bool {
        self.inner.failed()
    }
}

/// Escalates every `fail` to `fail_now`, so `error` behaves like `fatal`.
pub struct FailNowReporter<'a> {
    inner: &'a mut dyn Reporter,
}

impl<'a> FailNowReporter<'a> {
    pub fn new(inner: &'a mut dyn Reporter) -> Self {
        Self { inner }
    }
}

impl Reporter for FailNowReporter<'_> {
    fn log(&mut self, message: &str) {
        self.inner.log(message);
    }

    fn fail(&mut self) {
        self.inner.fail_now();
    }

    fn fail_now(&mut self) {
        self.inner.fail_now();
    }

    fn failed(&self) -> bool {
        self.inner.failed()
    }
}
