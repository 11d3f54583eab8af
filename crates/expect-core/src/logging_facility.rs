//! Structured logging facility for expect
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for asserting on emitted events
//!
//! The comparison engine itself never logs. Matchers that wrap it emit one
//! start event and exactly one end or end_error event per call.
//!
//! # Usage
//!
//! ```rust
//! use expect_core::logging_facility::{init, Profile};
//!
//! // Initialize once, e.g. from a test harness setup function
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, ...)` - Log operation start
//! - `log_op_end!(op, duration_ms = ...)` - Log operation end
//! - `log_op_error!(op, err, duration_ms = ...)` - Log operation error

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
