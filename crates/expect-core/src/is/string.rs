use crate::expectation::{expect_fn, Expectation};

/// `got` is `want` bytes long.
pub fn string_of_len(got: &str, want: usize) -> impl Expectation + '_ {
    expect_fn(move |reporter| {
        if got.len() != want {
            reporter.error(&format!(
                "expected {:?} to have len {} but got {}",
                got,
                want,
                got.len()
            ));
        }
    })
}

pub fn string_containing<'a>(got: &'a str, want: &'a str) -> impl Expectation + 'a {
    expect_fn(move |reporter| {
        if !got.contains(want) {
            reporter.error(&format!("expected {:?} to contain {:?}", got, want));
        }
    })
}

pub fn string_with_prefix<'a>(got: &'a str, want: &'a str) -> impl Expectation + 'a {
    expect_fn(move |reporter| {
        if !got.starts_with(want) {
            reporter.error(&format!("expected {:?} to have prefix {:?}", got, want));
        }
    })
}

pub fn string_with_suffix<'a>(got: &'a str, want: &'a str) -> impl Expectation + 'a {
    expect_fn(move |reporter| {
        if !got.ends_with(want) {
            reporter.error(&format!("expected {:?} to have suffix {:?}", got, want));
        }
    })
}

/// Line transformer that strips leading whitespace, for comparing against
/// an indented multi-line literal.
pub fn dedent_lines(line: &str) -> String {
    line.trim_start().to_string()
}

/// Compare `got` and `want` line by line, reporting each differing line.
///
/// Every transformer is applied in order to both sides of a line before
/// comparing; the messages show the lines untransformed. When the line
/// counts differ, only the first differing line is reported before the
/// surplus or missing lines.
pub fn equal_to_string_by_lines<'a>(
    got: &'a str,
    want: &'a str,
    transformers: &'a [fn(&str) -> String],
) -> impl Expectation + 'a {
    expect_fn(move |reporter| {
        let got_lines: Vec<&str> = got.split('\n').collect();
        let want_lines: Vec<&str> = want.split('\n').collect();

        let lengths_differ = got_lines.len() != want_lines.len();
        if lengths_differ {
            reporter.error(&format!(
                "expected string to have {} lines but got {}",
                want_lines.len(),
                got_lines.len()
            ));
        }

        let transform = |line: &str| {
            transformers
                .iter()
                .fold(line.to_string(), |line, transformer| transformer(line.as_str()))
        };

        let limit = got_lines.len().min(want_lines.len());
        for (i, (got_line, want_line)) in got_lines.iter().zip(&want_lines).enumerate() {
            if transform(*got_line) != transform(*want_line) {
                reporter.error(&format!(
                    "at line {}: wanted\n{:?}\nbut got\n{:?}",
                    i, want_line, got_line
                ));
                if lengths_differ {
                    return;
                }
            }
        }

        for (i, line) in got_lines.iter().enumerate().skip(limit) {
            reporter.error(&format!("line {}: wanted no line but got\n{:?}", i, line));
        }
        for (i, line) in want_lines.iter().enumerate().skip(limit) {
            reporter.error(&format!("line {}: wanted\n{:?}\nbut got no line", i, line));
        }
    })
}
