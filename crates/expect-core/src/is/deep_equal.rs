use crate::deep_equal::{compare, Options, Reflect};
use crate::errors::ExErrorKind;
use crate::expectation::{expect_fn, Expectation};
use crate::reporter::Reporter;
use crate::schema::{FIELD_DIFF_COUNT, FIELD_MATCHER};
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

const OP: &str = "deep_equal_to";

/// `got` and `want` are structurally equal under default [`Options`].
pub fn deep_equal_to<'a, G, W>(got: &'a G, want: &'a W) -> impl Expectation + 'a
where
    G: Reflect,
    W: Reflect,
{
    expect_fn(move |reporter| check(reporter, "deep_equal_to", got, want, &Options::default()))
}

/// `got` and `want` are structurally equal under `options`.
///
/// Every difference is listed in the failure message. Malformed options and
/// values the engine cannot compare fail the expectation as well.
pub fn deep_equal_to_with<'a, G, W>(got: &'a G, want: &'a W, options: Options) -> impl Expectation + 'a
where
    G: Reflect,
    W: Reflect,
{
    expect_fn(move |reporter| check(reporter, "deep_equal_to_with", got, want, &options))
}

fn check(
    reporter: &mut dyn Reporter,
    matcher: &str,
    got: &dyn Reflect,
    want: &dyn Reflect,
    options: &Options,
) {
    let start = Instant::now();
    log_op_start!(OP, { FIELD_MATCHER } = matcher);

    match compare(want, got, options) {
        Ok(diff) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            log_op_end!(OP, duration_ms = duration_ms, { FIELD_DIFF_COUNT } = diff.len());
            if !diff.is_empty() {
                reporter.error(&format!("values are not deeply equal:{}", diff));
            }
        }
        Err(err) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            log_op_error!(OP, err.clone(), duration_ms = duration_ms);
            let message = match err.kind() {
                ExErrorKind::InvalidFieldPath | ExErrorKind::InvalidConfig => {
                    format!("invalid deep equal options: {}", err)
                }
                _ => format!("values cannot be deeply compared: {}", err),
            };
            reporter.error(&message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::RecordingReporter;

    #[test]
    fn test_deep_equal_to() {
        let mut reporter = RecordingReporter::new();
        deep_equal_to(&"foo", &"foo").expect(&mut reporter);
        deep_equal_to(&"bar", &"foo").expect(&mut reporter);

        assert!(reporter.failed);
        assert_eq!(
            reporter.logs,
            vec!["values are not deeply equal:\n  want: foo\n   got: bar"]
        );
    }

    #[test]
    fn test_invalid_options_fail() {
        let mut reporter = RecordingReporter::new();
        let options = Options::new().exclude_field_path("items");
        deep_equal_to_with(&1, &1, options).expect(&mut reporter);

        assert!(reporter.failed);
        assert!(reporter.logs[0].starts_with("invalid deep equal options: [ERR_INVALID_FIELD_PATH]"));
    }
}
