use crate::expectation::{expect_fn, Expectation};
use std::fmt::Debug;

/// `got == want`.
pub fn equal_to<T>(got: T, want: T) -> impl Expectation
where
    T: PartialEq + Debug,
{
    expect_fn(move |reporter| {
        if got != want {
            reporter.error(&format!(
                "values are not equal\nwant: {:?}\ngot:  {:?}",
                want, got
            ));
        }
    })
}
