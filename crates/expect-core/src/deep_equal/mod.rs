//! Deep-equality comparison engine.
//!
//! Compares two values of arbitrary, possibly nested and possibly cyclic
//! shape and produces a path-annotated list of differences.
//!
//! ## Entry point
//!
//! ```
//! use expect_core::deep_equal::{compare, Options};
//!
//! let diff = compare(&vec![1, 2], &vec![1, 3], &Options::default()).unwrap();
//! assert_eq!(diff.len(), 1);
//! assert_eq!(diff.entries()[0].path, "[1]");
//! ```
//!
//! ## Guarantees
//!
//! - **Fresh state**: every call builds its own context; nothing leaks between calls.
//! - **Termination**: each expected-side node is entered at most once, so cyclic
//!   data terminates.
//! - **Determinism**: map entries are visited in ascending key-text order.
//! - **Read-only**: inputs are only borrowed; `RefCell`s are only shared-borrowed.

mod context;
pub mod engine;
pub mod model;
pub mod options;
pub mod path;
pub mod render;
pub mod value;

pub use engine::compare;
pub use model::{Diff, DiffEntry};
pub use options::{Options, DEFAULT_FLOAT_PRECISION};
pub use path::{FieldPattern, Segment};
pub use render::render;
pub use value::{Field, Kind, MapView, Nil, Reflect, SliceView, Target, Type, Value};
