//! # testr
//!
//! A minimal extension to Rust's built-in test harness. Assertions compare two
//! values and, on mismatch, report one deterministic, type-annotated line:
//!
//! ```text
//! <actual> != expected:<expected>[ // <message>]
//! ```
//!
//! ## Modules
//!
//! - **`render`**: canonical value rendering and the mismatch line
//! - **`assertion`**: the [`Assertion`] engine (`equal`, `error_is`, `error_as`, `panic`)
//! - **`options`**: per-call [`Options`] (`with_message`, `with_fail_now`)
//! - **`tester`**: the [`Tester`] contract and output sinks
//! - **`harness`**: [`TestCase`], a tester for `#[test]` functions
//! - **`recorder`**: [`Recorder`], a tester that only records
//!
//! ## Examples
//!
//! ```rust
//! use testr::{Nil, Recorder};
//!
//! let t = Recorder::new();
//! let assert = testr::new(&t);
//!
//! assert.equal(Nil, Nil, ()); // PASS
//! assert.equal(false, true, ()); // FAIL
//! assert_eq!(t.output(), "bool(false) != expected:bool(true)");
//! assert.equal(0i32, 0i64, ()); // FAIL
//! assert_eq!(t.output(), "i32(0) != expected:i64(0)");
//! ```
//!
//! Errors are matched through their `source()` chain:
//!
//! ```rust
//! use testr::{with_message, Recorder};
//!
//! #[derive(Debug, PartialEq, thiserror::Error)]
//! #[error("{0}")]
//! struct Sentinel(&'static str);
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("wrap {0}")]
//! struct Wrap(#[source] Sentinel);
//!
//! let t = Recorder::new();
//! let assert = testr::new(&t);
//! let foo = Sentinel("foo");
//! let wrap_foo = Wrap(Sentinel("foo"));
//!
//! assert.error_is(None, None::<&Sentinel>, ()); // PASS
//! assert.error_is(Some(&wrap_foo), Some(&foo), ()); // PASS
//! assert.error_is(Some(&foo), None::<&Sentinel>, with_message("assert err is nil")); // FAIL
//! assert_eq!(t.output(), "error(foo) != expected:nil() // assert err is nil");
//!
//! let found = assert.error_as::<Sentinel>(Some(&wrap_foo), ()); // PASS
//! assert_eq!(found, Some(&foo));
//! ```

pub mod assertion;
pub mod errors;
pub mod harness;
pub mod options;
pub mod recorder;
pub mod render;
pub mod tester;

use std::fmt::Debug;

pub use crate::assertion::Assertion;
pub use crate::errors::{CallSite, Failure, FailureReport, RenderError};
pub use crate::harness::{ReportConfig, TestCase};
pub use crate::options::{with_fail_now, with_message, Options};
pub use crate::recorder::{Recorder, State};
pub use crate::render::{As, Nil, Raw};
pub use crate::tester::{OutputBuffer, OutputSink, StdoutSink, Tester};

/// Returns assertion methods around `tester`.
pub fn new<T: Tester + ?Sized>(tester: &T) -> Assertion<'_, T> {
    Assertion::new(tester)
}

/// Unwraps a fixture result, panicking with the error if there is one.
///
/// Meant for test setup, not for assertions: it does not go through a
/// [`Tester`] and produces no mismatch report.
///
/// ```rust
/// let n: i32 = testr::must("42".parse());
/// assert_eq!(n, 42);
/// ```
///
/// ```rust,should_panic
/// let n: i32 = testr::must("forty-two".parse());
/// ```
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("testr: must: {err:?}"),
    }
}
