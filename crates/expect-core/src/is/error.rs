use crate::expectation::{expect_fn, Expectation};
use std::error::Error;
use std::fmt::Debug;

/// `result` is `Ok`.
pub fn no_error<T, E>(result: &Result<T, E>) -> impl Expectation + '_
where
    E: Debug,
{
    expect_fn(move |reporter| {
        if let Err(err) = result {
            reporter.error(&format!("expected no error but got {:?}", err));
        }
    })
}

/// `result` is an `Err` whose error, or one of its sources, equals `target`.
pub fn error<'a, T, E, Target>(result: &'a Result<T, E>, target: &'a Target) -> impl Expectation + 'a
where
    E: Error + 'static,
    Target: Error + PartialEq + 'static,
{
    expect_fn(move |reporter| match result {
        Ok(_) => reporter.error(&format!(
            "expected an error with target {:?} but got no error",
            target
        )),
        Err(err) if !chain_contains(err, target) => reporter.error(&format!(
            "expected an error with target {:?} but got {:?}",
            target, err
        )),
        Err(_) => {}
    })
}

fn chain_contains<Target>(err: &(dyn Error + 'static), target: &Target) -> bool
where
    Target: Error + PartialEq + 'static,
{
    std::iter::successors(Some(err), |&e| e.source())
        .any(|e| e.downcast_ref::<Target>() == Some(target))
}
