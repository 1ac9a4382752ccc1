//! Structured logging facility for eavsearch
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! Every profile writes to stderr; stdout is reserved for prompts and
//! search results.
//!
//! # Usage
//!
//! ```rust
//! use eavsearch_core::logging_facility::{init, Profile};
//!
//! init(Profile::Interactive);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
