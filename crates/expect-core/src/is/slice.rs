use crate::expectation::{expect_fn, Expectation};
use std::fmt::Debug;

/// `slice` has exactly `want` elements.
pub fn slice_of_len<T: Debug>(slice: &[T], want: usize) -> impl Expectation + '_ {
    expect_fn(move |reporter| {
        if slice.len() != want {
            reporter.error(&format!(
                "expected slice with len {} but got slice with len {}: {:?}",
                want,
                slice.len(),
                slice
            ));
        }
    })
}

/// Every element of `wants` occurs in `slice`, in any order.
///
/// Duplicates in `wants` do not need to occur more than once.
pub fn slice_containing<'a, T>(slice: &'a [T], wants: &'a [T]) -> impl Expectation + 'a
where
    T: PartialEq + Debug,
{
    expect_fn(move |reporter| {
        let mut missing: Vec<&T> = Vec::new();
        for want in wants {
            if !slice.contains(want) && !missing.contains(&want) {
                missing.push(want);
            }
        }
        if !missing.is_empty() {
            reporter.error(&format!("slice does not contain {:?}", missing));
        }
    })
}

/// The elements of `wants` occur in `slice` in the given order, possibly
/// with other elements in between.
pub fn slice_containing_in_order<'a, T>(slice: &'a [T], wants: &'a [T]) -> impl Expectation + 'a
where
    T: PartialEq + Debug,
{
    expect_fn(move |reporter| {
        let mut remaining = wants.iter().peekable();
        for item in slice {
            if remaining.peek() == Some(&item) {
                remaining.next();
            }
        }
        if let Some(first_missing) = remaining.next() {
            reporter.error(&format!(
                "slice does not contain {:?} in order",
                first_missing
            ));
        }
    })
}
