//! expect - composable test expectations
//!
//! This crate provides:
//! - A deep-equality engine that diffs values of arbitrary, possibly cyclic
//!   shape and reports every divergence with its path
//! - Thin matchers (`is::*`) over equality, errors, options, maps, slices and strings
//! - A minimal `Reporter` interface plus recording, panicking and decorating reporters
//! - The canonical error facility and structured logging facility
//!
//! # Example
//!
//! ```
//! use expect_core::{is, reflect_struct, that, PanicReporter};
//!
//! struct User {
//!     pub name: String,
//!     pub roles: Vec<String>,
//! }
//!
//! reflect_struct!(User { pub name, pub roles });
//!
//! let want = User { name: "ada".into(), roles: vec!["admin".into()] };
//! let got = User { name: "ada".into(), roles: vec!["admin".into()] };
//!
//! let mut reporter = PanicReporter::new();
//! that(&mut reporter, &[&is::deep_equal_to(&got, &want)]);
//! ```

pub mod deep_equal;
pub mod errors;
pub mod expectation;
pub mod is;
pub mod logging_facility;
pub mod reporter;

pub use expect_core_types::schema;

// Re-export commonly used types
pub use deep_equal::{compare, Diff, DiffEntry, Options, Reflect};
pub use errors::{ExError, ExErrorKind, FieldPathError};
pub use expectation::{expect_fn, fail, fail_now, that, with_message, Expectation};
pub use reporter::{FailNowReporter, PanicReporter, PrefixedReporter, RecordingReporter, Reporter};
