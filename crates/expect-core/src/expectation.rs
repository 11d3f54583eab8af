//! Deferred checks and the functions that run them.

use crate::reporter::{FailNowReporter, PrefixedReporter, Reporter};

/// A check that reports its outcome to a [`Reporter`].
pub trait Expectation {
    fn expect(&self, reporter: &mut dyn Reporter);
}

/// [`Expectation`] backed by a closure. Built with [`expect_fn`].
pub struct ExpectFn<F>(F);

impl<F> Expectation for ExpectFn<F>
where
    F: Fn(&mut dyn Reporter),
{
    fn expect(&self, reporter: &mut dyn Reporter) {
        (self.0)(reporter)
    }
}

/// Turn a closure into an [`Expectation`].
pub fn expect_fn<F>(check: F) -> ExpectFn<F>
where
    F: Fn(&mut dyn Reporter),
{
    ExpectFn(check)
}

/// Run `expectations` in order against `reporter`.
///
/// A reporter that stops on `fail_now` (e.g. by panicking) keeps later
/// expectations from running.
///
/// ```
/// use expect_core::expectation::that;
/// use expect_core::is;
/// use expect_core::reporter::{RecordingReporter, Reporter};
///
/// let mut reporter = RecordingReporter::new();
/// that(&mut reporter, &[&is::equal_to(2, 1 + 1), &is::string_containing("spam", "pa")]);
/// assert!(!reporter.failed());
/// ```
pub fn that(reporter: &mut dyn Reporter, expectations: &[&dyn Expectation]) {
    for expectation in expectations {
        expectation.expect(reporter);
    }
}

/// Like [`that`], with every logged message prefixed by `"{message}: "`.
pub fn with_message(
    reporter: &mut dyn Reporter,
    message: impl Into<String>,
    expectations: &[&dyn Expectation],
) {
    let mut prefixed = PrefixedReporter::new(reporter, message);
    that(&mut prefixed, expectations);
}

/// An expectation that always fails with `"test failed"`.
pub fn fail() -> impl Expectation {
    expect_fn(|reporter| reporter.error("test failed"))
}

/// Run `expectations` with every deferred failure escalated to an
/// immediate one.
pub fn fail_now<'a>(expectations: &'a [&'a dyn Expectation]) -> impl Expectation + 'a {
    expect_fn(move |reporter| {
        let mut escalated = FailNowReporter::new(reporter);
        for expectation in expectations {
            expectation.expect(&mut escalated);
        }
    })
}
