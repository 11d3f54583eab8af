use crate::expectation::{expect_fn, Expectation};
use std::fmt::Debug;

/// `value` is `None`.
pub fn none<T: Debug>(value: &Option<T>) -> impl Expectation + '_ {
    expect_fn(move |reporter| {
        if let Some(v) = value {
            reporter.error(&format!("expected {:?} to be none", v));
        }
    })
}

/// `value` is `Some`.
pub fn some<T>(value: &Option<T>) -> impl Expectation + '_ {
    expect_fn(move |reporter| {
        if value.is_none() {
            reporter.error("expected value to be some");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::RecordingReporter;

    #[test]
    fn test_none_and_some() {
        let mut reporter = RecordingReporter::new();
        none(&None::<i32>).expect(&mut reporter);
        some(&Some(1)).expect(&mut reporter);
        assert!(!reporter.failed);

        none(&Some(3)).expect(&mut reporter);
        some(&None::<i32>).expect(&mut reporter);
        assert_eq!(
            reporter.logs,
            vec!["expected 3 to be none", "expected value to be some"]
        );
    }
}
