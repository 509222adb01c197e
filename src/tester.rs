//! The collaborator contract between assertions and the test runner.
//!
//! An [`Assertion`](crate::Assertion) never decides how a failure reaches a human
//! or a CI system. It renders the message and hands it to a [`Tester`], which
//! records it and marks the test failed.
//!
//! Output leaving the crate goes through an [`OutputSink`]. [`StdoutSink`] prints
//! through `println!`, so the built-in harness captures it per test;
//! [`OutputBuffer`] collects text for inspection.

use std::{cell::RefCell, rc::Rc};

/// Failure-signalling hooks of a test runner.
///
/// Implementations use interior mutability: assertions only hold a shared
/// reference. One tester belongs to one running test; sharing a tester between
/// concurrently running tests is the caller's responsibility.
pub trait Tester {
    /// Marks the calling assertion as a helper so failures are attributed to
    /// its caller. Best effort; the default does nothing.
    fn helper(&self) {}

    /// Records a formatted failure message.
    fn log(&self, message: &str);

    /// Marks the test failed. Execution continues.
    fn fail(&self);

    /// Marks the test failed and stops it. Runner-backed testers unwind here.
    fn fail_now(&self);
}

// ============================================================================
// OUTPUT SINKS
// ============================================================================

/// Destination for text produced while reporting failures.
pub trait OutputSink {
    fn emit(&mut self, text: &str);
}

/// Collects output into a `String`, one emitted text per line.
#[derive(Debug, Default, Clone)]
pub struct OutputBuffer {
    pub buffer: String,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }
}

impl OutputSink for OutputBuffer {
    fn emit(&mut self, text: &str) {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(text);
    }
}

/// Writes output to stdout through `println!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, text: &str) {
        println!("{text}");
    }
}

/// A sink that can be handed to a tester while the caller keeps reading it.
pub type SharedOutput = Rc<RefCell<OutputBuffer>>;

impl OutputSink for SharedOutput {
    fn emit(&mut self, text: &str) {
        self.borrow_mut().emit(text);
    }
}
