//! Matchers.
//!
//! Each function builds an [`Expectation`](crate::expectation::Expectation)
//! that checks one property of a value and reports a failure through
//! [`Reporter::error`](crate::reporter::Reporter::error). Wrap matchers in
//! [`fail_now`](crate::expectation::fail_now) to stop at the first failure.

mod deep_equal;
mod equal;
mod error;
mod http;
mod map;
mod option;
mod slice;
mod string;

pub use deep_equal::{deep_equal_to, deep_equal_to_with};
pub use equal::equal_to;
pub use error::{error, no_error};
pub use http::{http_header, http_status, HttpMessage};
pub use map::{map_containing, map_of_len, MapLike};
pub use option::{none, some};
pub use slice::{slice_containing, slice_containing_in_order, slice_of_len};
pub use string::{
    dedent_lines, equal_to_string_by_lines, string_containing, string_of_len, string_with_prefix,
    string_with_suffix,
};
